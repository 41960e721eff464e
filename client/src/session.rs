//! 库存会话
//!
//! 材料记录与地图标记的同步模型。所有可变状态都集中在
//! [`InventorySession`] 中：一个有序的 {记录, 标记} 成对条目表，
//! 加上最多一个未消费的选中坐标。记录与标记成对存储，
//! 不可能出现有记录无标记（或相反）的状态。

use std::sync::Arc;

use derive_more::{Display, From};
use matmap_common::{Coordinate, MaterialDraft, MaterialRecord, PersistedMaterial};
use matmap_errors::{AppError, AppResult};
use tracing::{debug, info};

use crate::map::{MapSurface, MarkerHandle};

/// 条目 ID
///
/// 会话内稳定的本地标识，与服务端 id 无关。删除后不复用，
/// 用于在异步响应返回时判断条目是否仍然存在。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From)]
#[display("{_0}")]
pub struct EntryId(pub u64);

/// 库存条目：一条材料记录与它的地图标记
#[derive(Debug, Clone)]
pub struct InventoryEntry {
    pub id: EntryId,
    pub record: MaterialRecord,
    pub marker: MarkerHandle,
}

/// 库存会话
pub struct InventorySession {
    map: Arc<dyn MapSurface>,
    entries: Vec<InventoryEntry>,
    selected: Option<Coordinate>,
    next_entry: u64,
}

impl InventorySession {
    pub fn new(map: Arc<dyn MapSurface>) -> Self {
        Self {
            map,
            entries: Vec::new(),
            selected: None,
            next_entry: 1,
        }
    }

    /// 当前条目，按加入顺序
    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 最近一次未消费的地图点击坐标
    pub fn selected(&self) -> Option<&Coordinate> {
        self.selected.as_ref()
    }

    /// 记录一次地图点击
    ///
    /// 新的点击覆盖尚未消费的旧坐标，同一时刻最多保留一个
    pub fn select_coordinate(&mut self, lat: f64, lng: f64) -> &Coordinate {
        let coordinate = Coordinate::from_degrees(lat, lng);
        debug!(%coordinate, "Coordinate selected");
        self.selected.insert(coordinate)
    }

    /// 追加一条记录并在地图上放置标记
    ///
    /// 先校验后变更：任何字段非法都在产生副作用之前被拒绝，
    /// 条目表和地图都不会观察到部分更新。成功后清空选中坐标。
    pub fn add_record(&mut self, draft: MaterialDraft, coordinate: Coordinate) -> AppResult<EntryId> {
        draft.validate()?;

        let marker = self.map.place_marker(&coordinate)?;
        let record = draft.into_record(coordinate);
        let id = EntryId(self.next_entry);
        self.next_entry += 1;

        info!(%id, name = %record.name, "Material saved");
        self.entries.push(InventoryEntry { id, record, marker });
        self.selected = None;
        Ok(id)
    }

    /// 表单保存：消费当前选中的坐标
    pub fn save_material(&mut self, draft: MaterialDraft) -> AppResult<EntryId> {
        let coordinate = self
            .selected
            .clone()
            .ok_or_else(|| AppError::validation("请填写完整的材料属性并选择位置"))?;
        self.add_record(draft, coordinate)
    }

    /// 删除指定位置的条目
    ///
    /// 先把图钉从地图上摘除，再同步移除条目。后续条目的下标会
    /// 前移一位，调用方不得跨删除缓存下标。
    pub fn delete_record(&mut self, index: usize) -> AppResult<()> {
        if index >= self.entries.len() {
            return Err(AppError::not_found(format!("材料记录 {index} 不存在")));
        }

        self.map.remove_marker(&self.entries[index].marker);
        let removed = self.entries.remove(index);
        info!(id = %removed.id, name = %removed.record.name, "Material deleted");
        Ok(())
    }

    /// 并入服务端确认的记录
    ///
    /// 提交请求在途期间条目可能已被删除，此时丢弃过期响应，
    /// 不得套用到占据同一下标的其他条目上。
    pub fn apply_confirmation(&mut self, id: EntryId, confirmed: &PersistedMaterial) {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.record.id = Some(confirmed.id);
                if entry.record.image_url.is_none() {
                    entry.record.image_url = confirmed.image_url.clone();
                }
                debug!(%id, server_id = confirmed.id, "Server confirmation applied");
            }
            None => {
                debug!(%id, "Entry already deleted, stale confirmation discarded");
            }
        }
    }
}
