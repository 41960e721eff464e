//! matmap-common - 通用类型库

pub mod dto;
pub mod types;

pub use dto::*;
pub use types::*;
