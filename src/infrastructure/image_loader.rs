//! 上传图片 - 基础设施层
//!
//! 只负责读取文件字节并编码为 data URL，不做任何图片解码。

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tracing::debug;

use crate::error::{AppError, AppResult, ImageError};

/// 一张待分析的图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// 用于日志显示的名称
    pub name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ImageData {
    pub fn new(name: impl Into<String>, mime: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime,
            bytes,
        }
    }

    /// 从磁盘读取图片，只接受 jpg / jpeg / png
    pub async fn load(path: &Path) -> AppResult<Self> {
        let path_str = path.display().to_string();

        let mime = guess_image_mime(path).ok_or_else(|| ImageError::UnsupportedFormat {
            path: path_str.clone(),
        })?;

        if !path.exists() {
            return Err(ImageError::NotFound { path: path_str }.into());
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::image_read_failed(path_str.clone(), e))?;

        if bytes.is_empty() {
            return Err(ImageError::Empty { path: path_str }.into());
        }

        debug!("读取图片 {} ({} 字节, {})", path_str, bytes.len(), mime);

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or(path_str);

        Ok(Self::new(name, mime, bytes))
    }

    /// 编码为 `data:<mime>;base64,<...>`，供 Vision API 内联使用
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.bytes))
    }
}

/// 根据扩展名推断 MIME 类型
pub fn guess_image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}
