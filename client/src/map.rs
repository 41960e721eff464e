//! 地图表面接口
//!
//! 地图组件只通过这里的标记 API 被消费：点击事件产出坐标，
//! 标记的放置与移除由实现方负责渲染。

use derive_more::{Display, From};
use matmap_common::Coordinate;
use matmap_errors::AppResult;

/// 地图标记句柄
///
/// 由地图表面发放的不透明引用，1:1 对应一枚可见图钉
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From)]
#[display("{_0}")]
pub struct MarkerHandle(pub u64);

/// 地图表面
///
/// 外部地图组件的标记 API。实现方在 `place_marker` 中渲染图钉并
/// 返回句柄，在 `remove_marker` 中将图钉从渲染面上摘除。
#[cfg_attr(test, mockall::automock)]
pub trait MapSurface: Send + Sync {
    /// 在指定坐标放置标记，返回句柄
    fn place_marker(&self, at: &Coordinate) -> AppResult<MarkerHandle>;

    /// 将标记从地图上移除，句柄随后作废
    fn remove_marker(&self, handle: &MarkerHandle);
}
