//! API 路由

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use matmap_common::{ApiFailure, MaterialPayload, MaterialResponse, PersistedMaterial, UploadResponse};
use matmap_errors::AppError;
use serde::Serialize;
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::state::AppState;

/// 请求体上限，略高于客户端 5 MiB 的图片上限
const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/upload", post(upload_image))
        .route("/api/materials", post(create_material))
        .nest_service("/uploads", ServeDir::new(state.uploads.dir()))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// 图片上传：multipart 字段 `image`，返回可访问的图片 URL
async fn upload_image(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut image = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        match field.bytes().await {
            Ok(bytes) => image = Some((file_name, bytes)),
            Err(e) => {
                warn!(error = %e, "Failed to read upload field");
            }
        }
        break;
    }

    let Some((file_name, bytes)) = image else {
        return failure(StatusCode::BAD_REQUEST, "没有上传文件");
    };

    match state.uploads.store(&file_name, &bytes).await {
        Ok(image_url) => Json(UploadResponse {
            success: true,
            image_url,
        })
        .into_response(),
        Err(err) => {
            error!(error = %err, "Image store failed");
            reject(err)
        }
    }
}

/// 材料数据保存：校验必填字段后入库，回显带自增 id 的整行
async fn create_material(
    State(state): State<AppState>,
    Json(payload): Json<MaterialPayload>,
) -> Response {
    if payload.validate_required().is_err() {
        return failure(StatusCode::BAD_REQUEST, "缺少必要的材料数据");
    }

    match state.repo.insert(&payload).await {
        Ok(id) => Json(MaterialResponse {
            success: true,
            material: PersistedMaterial::from_payload(id, payload),
        })
        .into_response(),
        Err(err) => {
            error!(error = %err, "Material insert failed");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "服务器错误")
        }
    }
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(ApiFailure::new(message))).into_response()
}

fn reject(err: AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ApiFailure::new(err.message()))).into_response()
}
