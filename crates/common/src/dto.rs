//! HTTP 接口的请求/响应类型
//!
//! 字段名与线上格式保持一致（`imageUrl` 为 camelCase）

use matmap_errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::types::MaterialRecord;

/// `POST /api/materials` 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialPayload {
    pub name: String,
    pub density: f64,
    pub quantity: i64,
    pub volume: f64,
    pub lat: String,
    pub lng: String,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none", default)]
    pub image_url: Option<String>,
}

impl MaterialPayload {
    pub fn from_record(record: &MaterialRecord) -> Self {
        Self {
            name: record.name.clone(),
            density: record.density,
            quantity: record.quantity,
            volume: record.volume,
            lat: record.coordinate.lat.clone(),
            lng: record.coordinate.lng.clone(),
            image_url: record.image_url.clone(),
        }
    }

    /// 必填字段校验
    ///
    /// 客户端提交前和服务端入库前各执行一次
    pub fn validate_required(&self) -> AppResult<()> {
        let complete = !self.name.trim().is_empty()
            && self.density > 0.0
            && self.quantity > 0
            && self.volume > 0.0
            && !self.lat.is_empty()
            && !self.lng.is_empty();
        if !complete {
            return Err(AppError::validation("缺少必要的材料数据"));
        }
        Ok(())
    }
}

/// 服务端确认后的材料行，携带自增 id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedMaterial {
    pub id: i64,
    pub name: String,
    pub density: f64,
    pub quantity: i64,
    pub volume: f64,
    pub lat: String,
    pub lng: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

impl PersistedMaterial {
    pub fn from_payload(id: i64, payload: MaterialPayload) -> Self {
        Self {
            id,
            name: payload.name,
            density: payload.density,
            quantity: payload.quantity,
            volume: payload.volume,
            lat: payload.lat,
            lng: payload.lng,
            image_url: payload.image_url,
        }
    }
}

/// `POST /api/materials` 成功响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialResponse {
    pub success: bool,
    pub material: PersistedMaterial,
}

/// `POST /api/upload` 成功响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// 失败响应统一形态 `{success: false, message}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFailure {
    pub success: bool,
    pub message: String,
}

impl ApiFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coordinate, MaterialDraft};

    fn payload() -> MaterialPayload {
        let record = MaterialDraft {
            name: "Steel".to_string(),
            density: 7850.0,
            quantity: 10,
            volume: 0.05,
            image_url: None,
        }
        .into_record(Coordinate::from_degrees(-27.470125, 153.021072));
        MaterialPayload::from_record(&record)
    }

    #[test]
    fn test_payload_serializes_camel_case_image_url() {
        let mut p = payload();
        p.image_url = Some("http://localhost:3000/uploads/1.png".to_string());
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["imageUrl"], "http://localhost:3000/uploads/1.png");
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn test_payload_omits_missing_image_url() {
        let json = serde_json::to_value(payload()).unwrap();
        assert!(json.get("imageUrl").is_none());
    }

    #[test]
    fn test_required_check_rejects_empty_name() {
        let mut p = payload();
        p.name = String::new();
        assert!(p.validate_required().is_err());
    }

    #[test]
    fn test_required_check_rejects_zero_density() {
        let mut p = payload();
        p.density = 0.0;
        assert!(p.validate_required().is_err());
    }

    #[test]
    fn test_material_response_round_trips_wire_shape() {
        let body = serde_json::json!({
            "success": true,
            "material": {
                "id": 1,
                "name": "Steel",
                "density": 7850.0,
                "quantity": 10,
                "volume": 0.05,
                "lat": "-27.470125",
                "lng": "153.021072",
                "imageUrl": null
            }
        });
        let parsed: MaterialResponse = serde_json::from_value(body).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.material.id, 1);
        assert_eq!(parsed.material.lat, "-27.470125");
    }
}
