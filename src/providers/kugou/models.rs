//! 此模块定义了用于反序列化酷狗音乐搜索接口 (`/api/v3/search/song`) 响应的数据结构。

use serde::Deserialize;
use serde_json::Value;

use crate::providers::deserialize_id;

/// 歌曲搜索 API 的顶层响应结构。
#[derive(Debug, Deserialize)]
pub(crate) struct SearchSongResponse {
    /// API 状态码，`1` 表示成功。
    pub status: i64,
    /// 错误的具体信息。
    pub error: Option<String>,
    /// 包含实际搜索结果的数据容器。
    pub data: Option<SearchSongData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchSongData {
    /// 原始的歌曲列表，只有第一条会被反序列化为 `SongInfo`。
    pub info: Option<Vec<Value>>,
}

/// 代表一首歌曲。
#[derive(Debug, Deserialize)]
pub(crate) struct SongInfo {
    /// 歌曲名。
    pub songname: String,
    /// 歌手名，多位歌手以 `、` 连接。
    #[serde(default)]
    pub singername: String,
    /// 歌曲的唯一文件哈希。
    pub hash: String,
    /// 专辑 ID，可能是字符串或数字。
    #[serde(default, deserialize_with = "deserialize_id")]
    pub album_id: String,
}
