//! 清单投影
//!
//! 每次调用都从当前库存整体重建可见清单，不做增量 diff。
//! 行内删除动作绑定的是渲染时刻的下标，删除会使后续下标前移，
//! 所以每次库存变更之后必须立即重新渲染。

use crate::session::InventoryEntry;

/// 清单中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRow {
    /// 渲染时刻的条目下标，也是该行删除动作的目标
    pub index: usize,
    /// 展示文本
    pub line: String,
    /// 附图地址
    pub image_url: Option<String>,
}

/// 投影当前库存
pub fn render(entries: &[InventoryEntry]) -> Vec<InventoryRow> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let r = &entry.record;
            InventoryRow {
                index,
                line: format!(
                    "material category: {}, density: {} kg/m³, quantity: {}, volume: {} m³, coordinates: ({}, {})",
                    r.name, r.density, r.quantity, r.volume, r.coordinate.lat, r.coordinate.lng
                ),
                image_url: r.image_url.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MarkerHandle;
    use crate::session::EntryId;
    use matmap_common::{Coordinate, MaterialDraft};

    fn entry(id: u64, name: &str) -> InventoryEntry {
        InventoryEntry {
            id: EntryId(id),
            record: MaterialDraft {
                name: name.to_string(),
                density: 7850.0,
                quantity: 10,
                volume: 0.05,
                image_url: None,
            }
            .into_record(Coordinate::from_degrees(-27.470125, 153.021072)),
            marker: MarkerHandle(id),
        }
    }

    #[test]
    fn test_row_format_matches_inventory_line() {
        let rows = render(&[entry(1, "Steel")]);
        assert_eq!(
            rows[0].line,
            "material category: Steel, density: 7850 kg/m³, quantity: 10, volume: 0.05 m³, \
             coordinates: (-27.470125, 153.021072)"
        );
    }

    #[test]
    fn test_rebuild_after_delete_rebinds_indices() {
        let mut entries = vec![entry(1, "Steel"), entry(2, "Timber"), entry(3, "Glass")];
        entries.remove(0);

        let rows = render(&entries);
        assert_eq!(rows.len(), 2);
        // 删除后重渲染，每行的删除目标都落在现存下标上
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.index, i);
            assert!(row.index < entries.len());
        }
        assert!(rows[0].line.contains("Timber"));
    }

    #[test]
    fn test_empty_store_renders_empty_list() {
        assert!(render(&[]).is_empty());
    }
}
