//! 领域类型定义

use derive_more::Display;
use matmap_errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// 地图坐标
///
/// 经纬度以 6 位定点小数字符串保存，避免显示与提交之间的浮点漂移。
/// 一旦从地图点击捕获就不再变化。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("({lat}, {lng})")]
pub struct Coordinate {
    pub lat: String,
    pub lng: String,
}

impl Coordinate {
    /// 从度数构造，保留 6 位小数
    pub fn from_degrees(lat: f64, lng: f64) -> Self {
        Self {
            lat: format!("{lat:.6}"),
            lng: format!("{lng:.6}"),
        }
    }
}

/// 材料记录
///
/// `id` 在远端确认之前为空，此时记录处于待确认状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub id: Option<i64>,
    pub name: String,
    pub density: f64,
    pub quantity: i64,
    pub volume: f64,
    pub coordinate: Coordinate,
    pub image_url: Option<String>,
}

impl MaterialRecord {
    /// 是否尚未获得服务端分配的 id
    pub fn is_pending(&self) -> bool {
        self.id.is_none()
    }
}

/// 表单录入的材料属性，尚未绑定坐标
#[derive(Debug, Clone, Default)]
pub struct MaterialDraft {
    pub name: String,
    pub density: f64,
    pub quantity: i64,
    pub volume: f64,
    pub image_url: Option<String>,
}

impl MaterialDraft {
    /// 校验表单字段
    ///
    /// 任何字段缺失或非法（含 NaN/无穷）都返回错误，调用方必须在
    /// 产生副作用之前校验
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("材料名称不能为空"));
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(AppError::validation("材料密度必须为正数"));
        }
        if self.quantity <= 0 {
            return Err(AppError::validation("材料数量必须为正整数"));
        }
        if !self.volume.is_finite() || self.volume <= 0.0 {
            return Err(AppError::validation("材料体积必须为正数"));
        }
        Ok(())
    }

    /// 与捕获的坐标合并为一条待确认记录
    pub fn into_record(self, coordinate: Coordinate) -> MaterialRecord {
        MaterialRecord {
            id: None,
            name: self.name,
            density: self.density,
            quantity: self.quantity,
            volume: self.volume,
            coordinate,
            image_url: self.image_url,
        }
    }
}
