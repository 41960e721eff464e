//! matmap-server - 材料库存 HTTP 服务
//!
//! 图片上传落盘、材料数据入库（SQLite）、上传目录静态托管。

pub mod persistence;
pub mod routes;
pub mod state;
pub mod upload;
