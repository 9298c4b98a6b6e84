//! 定义了点歌请求与标准化的搜索结果。

use serde::{Deserialize, Serialize};

use crate::{error::SongRequestError, model::platform::Platform};

/// 一次点歌请求，由指令解析得到。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// 目标平台。
    pub platform: Platform,
    /// 搜索关键词，非空，保留内部空格。
    pub keyword: String,
}

/// 与平台无关的歌曲描述。
///
/// 所有提供商的搜索结果都必须归约为这个结构。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongResult {
    /// 歌曲名。
    pub name: String,
    /// 主要演唱者。
    pub artist: String,
    /// 歌曲在平台上的网页链接。
    pub url: String,
    /// 封面图片链接，平台未提供时为空字符串。
    pub image_url: String,
}

/// 单次搜索的结果：成功时为 `SongResult`，失败时为带分类的 `SongRequestError`。
pub type SearchOutcome = std::result::Result<SongResult, SongRequestError>;
