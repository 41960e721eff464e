//! CSV 导出
//!
//! 字段按原样逗号拼接，不做 RFC 4180 转义：包含逗号或引号的
//! 字段值会导致列错位。导出内容与既有格式逐字节一致。

use matmap_common::MaterialRecord;
use matmap_errors::{AppError, AppResult};

use crate::session::InventoryEntry;

/// 导出文件名
pub const EXPORT_FILE_NAME: &str = "material inventory database.csv";

const CSV_HEADER: &str = "material category,density(kg/m³),quantity,volume(m³),latitude,longitude";

/// 一次导出的产物：文件名与 UTF-8 文本内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
}

/// 导出当前库存
///
/// 只读、同步、幂等：同一库存两次导出内容逐字节相同。
/// 空库存不产生文件，返回可提示用户的前置条件错误。
pub fn export_csv(entries: &[InventoryEntry]) -> AppResult<CsvExport> {
    if entries.is_empty() {
        return Err(AppError::failed_precondition("暂无材料数据可下载"));
    }

    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for entry in entries {
        lines.push(csv_line(&entry.record));
    }

    Ok(CsvExport {
        file_name: EXPORT_FILE_NAME.to_string(),
        content: lines.join("\n"),
    })
}

fn csv_line(r: &MaterialRecord) -> String {
    format!(
        "{},{},{},{},{},{}",
        r.name, r.density, r.quantity, r.volume, r.coordinate.lat, r.coordinate.lng
    )
}
