//! 定义了整个库通用的、与具体提供商无关的数据模型。

pub mod platform;
pub mod song;
