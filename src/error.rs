//! 定义了整个 `song_request_rs` 库的错误类型 `SongRequestError`。

use std::io;
use thiserror::Error;

use crate::model::platform::Platform;

/// 点歌流程中可能出现的错误。
///
/// 前五个变体会被转换为面向用户的回复，其 `Display` 输出即为回复中的错误信息，
/// 不包含任何内部细节。其余变体只出现在配置加载和客户端构建阶段。
#[derive(Error, Debug)]
pub enum SongRequestError {
    /// 指令参数不足
    #[error("格式错误，请按照 {usage} 的格式输入")]
    MalformedCommand {
        /// 正确的指令格式
        usage: String,
    },

    /// 平台名不在已配置的平台之中
    #[error("不支持的平台：{requested}，支持的平台有：{supported}")]
    UnsupportedPlatform {
        /// 用户输入的平台名
        requested: String,
        /// 以顿号分隔的受支持平台列表
        supported: String,
    },

    /// 请求未能完成（连接失败、超时、非 2xx 状态码）
    #[error("{platform}搜索请求失败，请稍后重试")]
    Network {
        /// 出错的平台
        platform: Platform,
    },

    /// 请求成功但没有匹配的歌曲
    #[error("{platform}未找到相关歌曲，请尝试其他关键词")]
    NoResults {
        /// 出错的平台
        platform: Platform,
    },

    /// 响应不是合法的 JSON 或缺少必需字段
    #[error("{platform}搜索结果解析失败，请联系管理员")]
    Parse {
        /// 出错的平台
        platform: Platform,
    },

    /// I/O 错误 (源自 `io::Error`)
    #[error("I/O 错误: {0}")]
    Io(#[from] io::Error),

    /// JSON 解析失败 (源自 `serde_json::Error`)
    #[error("JSON 解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// HTTP 客户端构建失败 (源自 `reqwest::Error`)
    #[error("HTTP 客户端构建失败: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// 错误的分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 指令格式错误
    MalformedCommand,
    /// 不支持的平台
    UnsupportedPlatform,
    /// 网络请求失败
    NetworkFailure,
    /// 没有搜索结果
    NoResults,
    /// 响应解析失败
    ParseFailure,
    /// 配置或客户端初始化错误
    Internal,
}

impl SongRequestError {
    /// 返回该错误的分类。
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MalformedCommand { .. } => FailureKind::MalformedCommand,
            Self::UnsupportedPlatform { .. } => FailureKind::UnsupportedPlatform,
            Self::Network { .. } => FailureKind::NetworkFailure,
            Self::NoResults { .. } => FailureKind::NoResults,
            Self::Parse { .. } => FailureKind::ParseFailure,
            Self::Io(_) | Self::JsonParse(_) | Self::HttpClient(_) => FailureKind::Internal,
        }
    }

    /// 如果错误发生在某个平台的搜索中，返回该平台。
    pub fn platform(&self) -> Option<Platform> {
        match self {
            Self::Network { platform } | Self::NoResults { platform } | Self::Parse { platform } => {
                Some(*platform)
            }
            _ => None,
        }
    }
}

/// `SongRequestError` 的 `Result` 类型别名，方便在函数签名中使用。
pub type Result<T> = std::result::Result<T, SongRequestError>;
