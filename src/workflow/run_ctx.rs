//! 单次运行上下文
//!
//! 封装"谁上传了哪张图片"这一信息

use std::fmt::Display;

/// 单次运行上下文
#[derive(Debug, Clone)]
pub struct RunCtx {
    /// 运行编号（仅用于日志显示）
    pub run_id: String,

    /// 接收通知的用户标识（邮箱）
    pub user_id: String,
}

impl RunCtx {
    /// 创建新的运行上下文，编号取当前时间
    pub fn new(user_id: impl Into<String>) -> Self {
        Self::with_id(chrono::Local::now().format("%Y%m%d-%H%M%S").to_string(), user_id)
    }

    pub fn with_id(run_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            user_id: user_id.into().trim().to_string(),
        }
    }
}

impl Display for RunCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[运行 #{} 用户 {}]", self.run_id, self.user_id)
    }
}
