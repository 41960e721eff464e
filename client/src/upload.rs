//! 图片上传管线
//!
//! 选中文件先本地校验（类型、大小），通过后才发起网络上传；
//! 上传成功返回的 URL 被缓存，供下一次材料提交引用。
//! 校验失败不产生任何网络调用，上传失败不自动重试，
//! 用户需重新选择文件。

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use matmap_common::{ApiFailure, UploadResponse};
use matmap_errors::{AppError, AppResult};
use tracing::{info, warn};

/// 单张图片大小上限
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// 接受的图片 MIME 类型
const ACCEPTED_MIME: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// 用户选中的本地图片文件
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// 本地预览 data URL
    ///
    /// 只用于即时视觉反馈，与网络上传结果无关
    pub fn preview_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.bytes))
    }
}

/// 管线状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Validating,
    Uploading,
    /// 上传完成，URL 已缓存
    Uploaded(String),
    /// 校验或上传失败，携带面向用户的原因
    Rejected(String),
}

/// 图片上传管线
///
/// `Idle → Validating → Uploading → Uploaded(url) | Rejected(reason)`
pub struct ImagePipeline {
    client: reqwest::Client,
    base_url: String,
    state: UploadState,
}

impl ImagePipeline {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            state: UploadState::Idle,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// 上一次成功上传缓存的 URL
    pub fn cached_url(&self) -> Option<&str> {
        match &self.state {
            UploadState::Uploaded(url) => Some(url),
            _ => None,
        }
    }

    /// 回到初始状态，重新选择文件后再次提交
    pub fn reset(&mut self) {
        self.state = UploadState::Idle;
    }

    /// 本地校验：类型白名单 + 大小上限
    pub fn validate(file: &ImageFile) -> Result<(), String> {
        if !ACCEPTED_MIME.contains(&file.mime.as_str()) {
            return Err("仅支持 jpg、jpeg 和 png 格式".to_string());
        }
        if file.bytes.len() > MAX_IMAGE_BYTES {
            return Err("文件大小不能超过 5MB".to_string());
        }
        Ok(())
    }

    /// 提交选中的文件
    ///
    /// 校验失败立即进入 `Rejected`，不发起网络请求；
    /// 上传成功进入 `Uploaded` 并缓存 URL
    pub async fn submit(&mut self, file: ImageFile) -> AppResult<String> {
        self.state = UploadState::Validating;
        if let Err(reason) = Self::validate(&file) {
            warn!(file = %file.file_name, %reason, "Image rejected");
            self.state = UploadState::Rejected(reason.clone());
            return Err(AppError::validation(reason));
        }

        self.state = UploadState::Uploading;
        match self.upload(file).await {
            Ok(url) => {
                info!(%url, "Image uploaded");
                self.state = UploadState::Uploaded(url.clone());
                Ok(url)
            }
            Err(err) => {
                warn!(error = %err, "Image upload failed");
                self.state = UploadState::Rejected(err.message().to_string());
                Err(err)
            }
        }
    }

    /// multipart 上传，字段名固定为 `image`
    async fn upload(&self, file: ImageFile) -> AppResult<String> {
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.mime)
            .map_err(|e| AppError::upload(format!("图片类型无法识别: {e}")))?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let response = self
            .client
            .post(format!("{}/api/upload", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::upload(format!("图片上传失败: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiFailure>()
                .await
                .map(|f| f.message)
                .unwrap_or_else(|_| format!("HTTP {status}"));
            return Err(AppError::upload(message));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::upload(format!("上传响应无法解析: {e}")))?;
        if !body.success {
            return Err(AppError::upload("图片上传失败"));
        }
        Ok(body.image_url)
    }
}
