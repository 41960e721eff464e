//! 材料数据仓储

use async_trait::async_trait;
use matmap_common::MaterialPayload;
use matmap_errors::{AppError, AppResult};
use sqlx::SqlitePool;

/// 材料仓储接口
#[async_trait]
pub trait MaterialRepository: Send + Sync {
    /// 插入材料数据，返回自增 id
    async fn insert(&self, payload: &MaterialPayload) -> AppResult<i64>;
}

/// 建表（幂等，启动时执行）
pub async fn ensure_schema(pool: &SqlitePool) -> AppResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS materials (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            density REAL NOT NULL,
            quantity INTEGER NOT NULL,
            volume REAL NOT NULL,
            lat TEXT NOT NULL,
            lng TEXT NOT NULL,
            imageUrl TEXT
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| AppError::database(format!("初始化数据库失败: {e}")))?;

    Ok(())
}

pub struct SqliteMaterialRepository {
    pool: SqlitePool,
}

impl SqliteMaterialRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaterialRepository for SqliteMaterialRepository {
    async fn insert(&self, payload: &MaterialPayload) -> AppResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO materials (name, density, quantity, volume, lat, lng, imageUrl)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&payload.name)
        .bind(payload.density)
        .bind(payload.quantity)
        .bind(payload.volume)
        .bind(&payload.lat)
        .bind(&payload.lng)
        .bind(&payload.image_url)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("插入材料数据出错: {e}")))?;

        Ok(result.last_insert_rowid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matmap_common::{Coordinate, MaterialDraft};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        ensure_schema(&pool).await.unwrap();
        pool
    }

    fn payload(name: &str) -> MaterialPayload {
        let record = MaterialDraft {
            name: name.to_string(),
            density: 7850.0,
            quantity: 10,
            volume: 0.05,
            image_url: None,
        }
        .into_record(Coordinate::from_degrees(-27.470125, 153.021072));
        MaterialPayload::from_record(&record)
    }

    #[tokio::test]
    async fn test_schema_bootstrap_is_idempotent() {
        let pool = memory_pool().await;
        ensure_schema(&pool).await.unwrap();
        ensure_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_assigns_monotonic_ids() {
        let pool = memory_pool().await;
        let repo = SqliteMaterialRepository::new(pool);

        let first = repo.insert(&payload("Steel")).await.unwrap();
        let second = repo.insert(&payload("Timber")).await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }
}
