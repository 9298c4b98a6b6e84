//! 此模块定义了用于反序列化网易云音乐搜索接口 (`/api/search/get/web`) 响应的数据结构。

use serde::Deserialize;
use serde_json::Value;

/// 搜索 API 的顶层响应结构。
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    /// API 返回码，`200` 表示成功。
    pub code: i64,
    /// 包含搜索结果的容器。
    pub result: Option<SearchResultData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResultData {
    /// 原始的歌曲列表，只有第一条会被反序列化为 `Song`。
    pub songs: Option<Vec<Value>>,
}

/// 代表一首歌曲。
#[derive(Debug, Deserialize)]
pub(crate) struct Song {
    /// 歌曲的数字 ID。
    pub id: u64,
    /// 歌曲名。
    pub name: String,
    /// 艺术家列表。
    #[serde(default)]
    pub artists: Vec<Artist>,
    /// 所属专辑。
    pub album: Option<Album>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Artist {
    pub name: String,
    /// 艺术家头像。
    #[serde(rename = "img1v1Url")]
    pub img1v1_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Album {
    /// 专辑封面，部分接口不返回。
    pub pic_url: Option<String>,
}
