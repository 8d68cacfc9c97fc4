pub mod llm_service;
pub mod notify_service;
pub mod prompts;

pub use llm_service::{AgentRequest, Generator, LlmService};
pub use notify_service::{NotificationPayload, Notifier, NotifyService};
pub use prompts::AgentRole;
