//! 上传文件落盘存储

use std::path::{Path, PathBuf};

use chrono::Utc;
use matmap_errors::{AppError, AppResult};
use tracing::info;

/// 上传图片的磁盘存储
///
/// 文件名取毫秒时间戳加原始扩展名，对外通过
/// `{public_base_url}/uploads/{file_name}` 原样访问
pub struct UploadStore {
    dir: PathBuf,
    public_base_url: String,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into();
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 确保落盘目录存在
    pub async fn ensure_dir(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::internal(format!("创建上传目录失败: {e}")))?;
        Ok(())
    }

    /// 写盘并返回可访问的绝对 URL
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> AppResult<String> {
        let file_name = disk_file_name(original_name, Utc::now().timestamp_millis());
        let path = self.dir.join(&file_name);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::internal(format!("保存上传文件失败: {e}")))?;

        info!(file = %file_name, size = bytes.len(), "Image stored");
        Ok(format!("{}/uploads/{}", self.public_base_url, file_name))
    }
}

/// 毫秒时间戳 + 原始扩展名
fn disk_file_name(original_name: &str, timestamp_millis: i64) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!("{timestamp_millis}{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_keeps_original_extension() {
        assert_eq!(disk_file_name("pin.png", 1700000000000), "1700000000000.png");
        assert_eq!(disk_file_name("photo.JPEG", 1700000000000), "1700000000000.JPEG");
    }

    #[test]
    fn test_file_name_without_extension() {
        assert_eq!(disk_file_name("pin", 1700000000000), "1700000000000");
    }

    #[test]
    fn test_file_name_ignores_directories_in_original() {
        assert_eq!(
            disk_file_name("../../etc/passwd.png", 1700000000000),
            "1700000000000.png"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let store = UploadStore::new("uploads", "http://localhost:3000/");
        assert_eq!(store.public_base_url, "http://localhost:3000");
    }
}
