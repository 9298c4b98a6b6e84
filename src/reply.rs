//! 回复的构造与格式化。
//!
//! 回复如何送达用户由宿主框架决定，这里只负责生成内容。

use serde::Serialize;

use crate::{
    error::SongRequestError,
    model::{
        platform::Platform,
        song::{SearchOutcome, SongResult},
    },
};

/// 回复的类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReplyKind {
    /// 纯文本
    Text,
    /// 错误提示
    Error,
    /// 点歌结果
    Music,
}

/// 点歌成功时附带的结构化数据，供支持音乐卡片的宿主使用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MusicCard {
    /// 用户请求的平台。
    pub platform: Platform,
    /// 搜索到的歌曲。
    pub song: SongResult,
}

/// 插件对一条指令的回复。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    /// 回复类型。
    pub kind: ReplyKind,
    /// 回复文本，任何类型的回复都有。
    pub text: String,
    /// 点歌成功时的结构化结果。
    pub music: Option<MusicCard>,
}

impl Reply {
    /// 纯文本回复
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Text,
            text: text.into(),
            music: None,
        }
    }

    /// 错误回复
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Error,
            text: text.into(),
            music: None,
        }
    }

    /// 音乐回复
    pub fn music(platform: Platform, song: SongResult) -> Self {
        Self {
            kind: ReplyKind::Music,
            text: format_song(platform, &song),
            music: Some(MusicCard { platform, song }),
        }
    }

    /// 根据搜索结果构造回复。
    pub fn from_outcome(platform: Platform, outcome: SearchOutcome) -> Self {
        match outcome {
            Ok(song) => Self::music(platform, song),
            Err(e) => Self::error(format_search_failure(platform, &e)),
        }
    }
}

/// 格式化点歌成功的回复。封面链接为空时省略封面一行。
pub fn format_song(platform: Platform, song: &SongResult) -> String {
    let mut text = format!(
        "[{}] {}\n歌手：{}\n链接：{}",
        platform.command_name(),
        song.name,
        song.artist,
        song.url
    );
    if !song.image_url.is_empty() {
        text.push_str("\n封面：");
        text.push_str(&song.image_url);
    }
    text
}

/// 格式化搜索失败的回复。
pub fn format_search_failure(platform: Platform, error: &SongRequestError) -> String {
    format!("点歌失败（{}）：{}", platform.command_name(), error)
}

/// 格式化指令阶段（格式错误、不支持的平台）失败的回复。
pub fn format_command_failure(error: &SongRequestError) -> String {
    format!("点歌失败：{error}")
}

/// 按搜索结果格式化回复文本。
pub fn format_outcome(platform: Platform, outcome: &SearchOutcome) -> String {
    match outcome {
        Ok(song) => format_song(platform, song),
        Err(e) => format_search_failure(platform, e),
    }
}

/// 帮助文本，列出用法和已配置的平台。
pub fn help_text(trigger: &str, platforms: &[Platform]) -> String {
    let mut text = format!("使用格式：{trigger} [平台] [关键词]\n支持的平台：");
    if platforms.is_empty() {
        text.push_str("\n（暂无可用平台，请检查配置）");
    }
    for platform in platforms {
        let name = platform.command_name();
        text.push_str(&format!("\n- {name}：例如 {trigger} {name} 关键词"));
    }
    text
}
