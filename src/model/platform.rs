//! 定义了受支持的音乐平台。

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// 点歌插件支持的音乐平台。
///
/// 这是一个封闭的集合，新增平台需要同时新增一个提供商实现
/// 以及 `MusicSearchService` 中的一个分派分支。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Display, Serialize, Deserialize,
)]
pub enum Platform {
    /// QQ 音乐
    #[strum(to_string = "QQ音乐")]
    QQ,
    /// 网易云音乐
    #[strum(to_string = "网易云音乐")]
    Netease,
    /// 酷狗音乐
    #[strum(to_string = "酷狗音乐")]
    Kugou,
}

impl Platform {
    /// 用户在指令中输入的平台名，例如 `点歌 QQ 稻香` 中的 `QQ`。
    pub fn command_name(&self) -> &'static str {
        match self {
            Platform::QQ => "QQ",
            Platform::Netease => "网易云音乐",
            Platform::Kugou => "酷狗",
        }
    }

    /// 一个全小写的静态标识，用于日志和配置。
    pub fn provider_name(&self) -> &'static str {
        match self {
            Platform::QQ => "qq",
            Platform::Netease => "netease",
            Platform::Kugou => "kugou",
        }
    }

    /// 根据指令中的平台名查找平台。ASCII 字母不区分大小写。
    pub fn from_command_name(token: &str) -> Option<Self> {
        Platform::iter().find(|p| p.command_name().eq_ignore_ascii_case(token))
    }
}
