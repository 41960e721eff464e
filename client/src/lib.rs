//! matmap-client - 地图材料库存的客户端核心
//!
//! 地图标记与材料记录的同步模型、图片上传管线、远端持久化客户端、
//! 清单投影与 CSV 导出。地图组件本身通过 [`map::MapSurface`] 接入。

pub mod export;
pub mod map;
pub mod remote;
pub mod render;
pub mod session;
pub mod upload;

pub use export::{CsvExport, export_csv};
pub use map::{MapSurface, MarkerHandle};
pub use remote::PersistenceClient;
pub use render::{InventoryRow, render};
pub use session::{EntryId, InventoryEntry, InventorySession};
pub use upload::{ImageFile, ImagePipeline, UploadState};
