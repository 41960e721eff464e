//! 远端持久化客户端
//!
//! 把完成的材料记录提交到远端数据库，取回服务端分配的自增 id。
//! 提交失败时本地库存不回滚，记录保持本地可见（本地优先）。
//! 本地删除不会同步到远端，本地与远端库存可能永久分叉。

use matmap_common::{ApiFailure, MaterialPayload, MaterialRecord, MaterialResponse, PersistedMaterial};
use matmap_errors::{AppError, AppResult};
use tracing::info;

/// 远端持久化客户端
pub struct PersistenceClient {
    client: reqwest::Client,
    base_url: String,
}

impl PersistenceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// 提交材料记录，返回带服务端 id 的材料行
    ///
    /// 必填字段在客户端先校验一次，服务端入库前还会再校验一次
    pub async fn submit_material(&self, record: &MaterialRecord) -> AppResult<PersistedMaterial> {
        let payload = MaterialPayload::from_record(record);
        payload.validate_required()?;

        let response = self
            .client
            .post(format!("{}/api/materials", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::persistence(format!("提交材料数据失败: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiFailure>()
                .await
                .map(|f| f.message)
                .unwrap_or_else(|_| format!("HTTP {status}"));
            return Err(AppError::persistence(message));
        }

        let body: MaterialResponse = response
            .json()
            .await
            .map_err(|e| AppError::persistence(format!("提交响应无法解析: {e}")))?;
        if !body.success {
            return Err(AppError::persistence("服务器错误"));
        }

        info!(id = body.material.id, name = %body.material.name, "Material persisted");
        Ok(body.material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matmap_common::{Coordinate, MaterialDraft};

    fn record() -> MaterialRecord {
        MaterialDraft {
            name: "Steel".to_string(),
            density: 7850.0,
            quantity: 10,
            volume: 0.05,
            image_url: None,
        }
        .into_record(Coordinate::from_degrees(-27.470125, 153.021072))
    }

    #[tokio::test]
    async fn test_incomplete_record_rejected_before_network() {
        // base_url 不可达，到达网络层会得到 Persistence 错误而非 Validation
        let client = PersistenceClient::new("http://[invalid");
        let mut incomplete = record();
        incomplete.name = String::new();

        let result = client.submit_material(&incomplete).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_payload_carries_coordinate_strings() {
        let payload = MaterialPayload::from_record(&record());
        assert_eq!(payload.lat, "-27.470125");
        assert_eq!(payload.lng, "153.021072");
        assert!(payload.validate_required().is_ok());
    }
}
