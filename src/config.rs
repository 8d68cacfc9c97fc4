use std::path::Path;

use serde::Deserialize;

use crate::error::{AppResult, ConfigError};

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "waste_agents.toml";

/// 程序配置
///
/// 由调用方构造后传入编排层，不使用任何全局状态。
/// 凭证只能来自配置文件或环境变量，默认值为空。
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 单次生成调用的超时时间（秒）
    pub llm_timeout_secs: u64,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    // --- 通知 webhook 配置 ---
    pub notify_webhook_url: String,
    /// 通知调用的超时时间（秒）
    pub notify_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-1.5-flash-latest".to_string(),
            llm_timeout_secs: 60,
            llm_temperature: 0.3,
            llm_max_tokens: 1024,
            notify_webhook_url: String::new(),
            notify_timeout_secs: 10,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 解析 TOML 配置内容，缺失字段使用默认值
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// 读取 TOML 配置文件
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// 用环境变量覆盖已有配置
    pub fn with_env_overrides(self) -> Self {
        Self {
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.llm_timeout_secs),
            llm_temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.llm_temperature),
            llm_max_tokens: std::env::var("LLM_MAX_TOKENS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.llm_max_tokens),
            notify_webhook_url: std::env::var("NOTIFY_WEBHOOK_URL").unwrap_or(self.notify_webhook_url),
            notify_timeout_secs: std::env::var("NOTIFY_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.notify_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }

    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 加载配置：配置文件（若存在）+ 环境变量覆盖
    ///
    /// 配置文件路径取自 `WASTE_AGENTS_CONFIG`，否则使用当前目录下的 `waste_agents.toml`。
    pub fn load() -> AppResult<Self> {
        let explicit = std::env::var("WASTE_AGENTS_CONFIG").ok();
        Self::load_from(explicit.as_deref())
    }

    /// 按给定路径加载配置
    ///
    /// 显式指定的文件必须存在，否则返回 `ConfigError::ReadFailed`；
    /// 只有默认的 `waste_agents.toml` 允许缺失。
    pub fn load_from(explicit_path: Option<&str>) -> AppResult<Self> {
        let base = match explicit_path {
            Some(path) => Self::from_toml_file(Path::new(path))?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_toml_file(path)?
                } else {
                    Self::default()
                }
            }
        };

        Ok(base.with_env_overrides())
    }
}
