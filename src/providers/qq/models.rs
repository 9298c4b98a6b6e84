//! 此模块定义了用于反序列化 QQ 音乐搜索接口响应的数据结构。
//!
//! 只声明了点歌需要的字段。容器字段均为 `Option`，以便区分“没有结果”和“结构错误”。
//! 歌曲列表保留为原始 JSON，只有第一条会被反序列化为 `Song`。

use serde::Deserialize;
use serde_json::Value;

/// 搜索 API 的顶层响应结构。
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub data: Option<SearchData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchData {
    pub song: Option<SongList>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SongList {
    pub list: Option<Vec<Value>>,
}

/// 代表一首歌曲。
#[derive(Debug, Deserialize)]
pub(crate) struct Song {
    /// 歌曲名。
    pub songname: String,
    /// 歌曲的 `mid`，用于构造歌曲页面链接。
    pub songmid: String,
    /// 专辑的 `mid`，用于构造封面链接。
    pub albummid: Option<String>,
    /// 演唱者列表。
    pub singer: Option<Vec<Singer>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Singer {
    pub name: String,
}
