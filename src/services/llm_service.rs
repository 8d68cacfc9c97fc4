//! LLM 服务 - 业务能力层
//!
//! 只负责"看图生成文本"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 兼容 OpenAI API 的服务（如 Gemini OpenAI 兼容端点）
//! - 图片以 base64 data URL 内联发送

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
        ChatCompletionRequestMessageContentPartText, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessage, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequestArgs, ImageDetail, ImageUrl,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppResult, LlmError};
use crate::infrastructure::ImageData;
use crate::services::prompts::AgentRole;

/// 一次 Agent 生成请求
#[derive(Debug, Clone)]
pub struct AgentRequest<'a> {
    pub role: AgentRole,
    pub prompt: String,
    pub image: &'a ImageData,
}

impl<'a> AgentRequest<'a> {
    pub fn new(role: AgentRole, prompt: impl Into<String>, image: &'a ImageData) -> Self {
        Self {
            role,
            prompt: prompt.into(),
            image,
        }
    }
}

/// 生成协作方：(提示词, 图片) → 自由文本
#[allow(async_fn_in_trait)]
pub trait Generator {
    async fn generate(&self, request: &AgentRequest<'_>) -> AppResult<String>;
}

/// LLM 服务
///
/// 职责：
/// - 调用兼容 OpenAI 的 Vision API
/// - 每次调用都有超时上限
/// - 不解析返回内容，解析交给 analysis 层
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    timeout: Duration,
    temperature: f32,
    max_tokens: u32,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            timeout: Duration::from_secs(config.llm_timeout_secs.max(1)),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    /// - `image_urls`: 图片 URL 或 data URL 列表（可选），会追加到用户消息中
    ///
    /// # 返回
    /// 返回去除首尾空白的响应内容
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
        image_urls: Option<&[String]>,
    ) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = build_user_message(user_message, image_urls)?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()?;

        let response = match tokio::time::timeout(self.timeout, self.client.chat().create(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!("LLM API 调用失败: {}", e);
                return Err(LlmError::ApiCallFailed {
                    model: self.model_name.clone(),
                    message: e.to_string(),
                }
                .into());
            }
            Err(_) => {
                warn!("LLM API 调用超时 ({:?})", self.timeout);
                return Err(LlmError::Timeout {
                    model: self.model_name.clone(),
                    timeout_secs: self.timeout.as_secs(),
                }
                .into());
            }
        };

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }
}

impl Generator for LlmService {
    async fn generate(&self, request: &AgentRequest<'_>) -> AppResult<String> {
        debug!("{} 正在分析图片 {}", request.role, request.image.name);
        let image_urls = [request.image.to_data_url()];
        self.send_to_llm(&request.prompt, None, Some(&image_urls)).await
    }
}

/// 构建用户消息；有图片时使用多段内容（文本 + 图片）
fn build_user_message(
    user_message: &str,
    image_urls: Option<&[String]>,
) -> AppResult<ChatCompletionRequestUserMessage> {
    let urls = match image_urls {
        Some(urls) if !urls.is_empty() => urls,
        _ => {
            return Ok(ChatCompletionRequestUserMessageArgs::default()
                .content(user_message)
                .build()?);
        }
    };

    let mut content_parts: Vec<ChatCompletionRequestUserMessageContentPart> = Vec::new();

    content_parts.push(ChatCompletionRequestUserMessageContentPart::Text(
        ChatCompletionRequestMessageContentPartText {
            text: user_message.to_string(),
        },
    ));

    for url in urls {
        content_parts.push(ChatCompletionRequestUserMessageContentPart::ImageUrl(
            ChatCompletionRequestMessageContentPartImage {
                image_url: ImageUrl {
                    url: url.clone(),
                    detail: Some(ImageDetail::Auto),
                },
            },
        ));
    }

    debug!("使用 Vision API，包含 {} 张图片", urls.len());

    Ok(ChatCompletionRequestUserMessageArgs::default()
        .content(ChatCompletionRequestUserMessageContent::Array(content_parts))
        .build()?)
}
