use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 图片读取错误
    #[error("图片错误: {0}")]
    Image(#[from] ImageError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 通知服务错误
    #[error("通知错误: {0}")]
    Notify(#[from] NotifyError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败: {0}")]
    TomlParseFailed(#[from] toml::de::Error),
}

/// 图片读取错误
#[derive(Debug, Error)]
pub enum ImageError {
    /// 文件不存在
    #[error("图片不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取图片失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 不支持的图片格式
    #[error("不支持的图片格式: {path} (仅支持 jpg / jpeg / png)")]
    UnsupportedFormat { path: String },
    /// 图片内容为空
    #[error("图片内容为空: {path}")]
    Empty { path: String },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 请求构建失败
    #[error("LLM 请求构建失败: {0}")]
    RequestBuildFailed(String),
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {message}")]
    ApiCallFailed { model: String, message: String },
    /// 调用超时
    #[error("LLM API调用超时 (模型: {model}, {timeout_secs}秒)")]
    Timeout { model: String, timeout_secs: u64 },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 通知服务错误
#[derive(Debug, Error)]
pub enum NotifyError {
    /// 未配置 webhook 地址
    #[error("未配置通知地址")]
    NotConfigured,
    /// 服务返回非成功状态码
    #[error("通知未送达 (状态码: {status})")]
    BadStatus { status: u16 },
    /// 连接失败
    #[error("无法连接到通知服务: {0}")]
    Connection(#[source] reqwest::Error),
}

impl From<async_openai::error::OpenAIError> for LlmError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        LlmError::RequestBuildFailed(err.to_string())
    }
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::Llm(err.into())
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建LLM API调用错误
    pub fn llm_api_failed(model: impl Into<String>, message: impl ToString) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            message: message.to_string(),
        })
    }

    /// 创建图片读取错误
    pub fn image_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Image(ImageError::ReadFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
