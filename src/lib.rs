#![warn(missing_docs)]

//! # Song Request RS
//!
//! 一个多平台点歌插件库：用户发送 `点歌 <平台> <关键词>`，插件在 QQ音乐、网易云音乐或酷狗音乐中
//! 搜索第一首匹配的歌曲，并回复歌曲名、歌手、链接和封面。
//!
//! 消息循环、指令分发和回复的发送由宿主聊天机器人框架负责，本库只提供指令处理函数。
//!
//! ## 使用
//!
//! ```rust,no_run
//! use song_request_rs::{MusicPlugin, config::PluginConfig};
//!
//! async {
//!     let config = PluginConfig::load_default();
//!     let plugin = MusicPlugin::new(&config);
//!
//!     if let Some(reply) = plugin.handle_message("点歌 QQ 稻香").await {
//!         println!("{}", reply.text);
//!     }
//! };
//! ```
pub mod command;
pub mod config;
pub mod error;
pub mod model;
pub mod providers;
pub mod reply;
pub mod search;

use tracing::{debug, info};

pub use crate::{
    error::{FailureKind, Result, SongRequestError},
    model::{
        platform::Platform,
        song::{SearchOutcome, SearchRequest, SongResult},
    },
    reply::{Reply, ReplyKind},
    search::MusicSearchService,
};

use crate::{
    command::{Command, CommandParser, HELP_COMMAND},
    config::PluginConfig,
};

/// 插件名，用于 `#help MusicPlugin`。
pub const PLUGIN_NAME: &str = "MusicPlugin";
/// 插件版本。
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");
/// 插件描述。
pub const PLUGIN_DESCRIPTION: &str = "支持QQ音乐、网易云音乐和酷狗音乐的点歌插件";

// ==========================================================
//  顶层 API
// ==========================================================

/// 点歌插件，宿主框架与本库交互的主要入口点。
///
/// 构造后不可变，可以在多个任务间共享引用。
pub struct MusicPlugin {
    parser: CommandParser,
    service: MusicSearchService,
}

impl MusicPlugin {
    /// 根据配置创建插件，未配置的平台不可用。
    pub fn new(config: &PluginConfig) -> Self {
        Self::with_service(config, MusicSearchService::from_config(config))
    }

    /// 使用给定的搜索服务创建插件。可用平台以搜索服务中的提供商为准。
    pub fn with_service(config: &PluginConfig, service: MusicSearchService) -> Self {
        let parser = CommandParser::new(
            config.triggers.clone(),
            config.wake_words.clone(),
            service.supported_platforms(),
        );
        info!(
            "[{}] 插件已初始化，可用平台: {}",
            PLUGIN_NAME,
            search::join_platform_names(parser.supported_platforms())
        );
        Self { parser, service }
    }

    /// 插件的帮助文本。
    pub fn help_text(&self) -> String {
        reply::help_text(self.parser.primary_trigger(), self.parser.supported_platforms())
    }

    /// 处理一条文本消息。
    ///
    /// # 返回
    /// 消息不是发给本插件的时候返回 `None`；否则总是返回恰好一条回复，
    /// 任何失败都会转换为错误回复。
    pub async fn handle_message(&self, content: &str) -> Option<Reply> {
        let command = match self.parser.parse(content) {
            Ok(Some(command)) => command,
            Ok(None) => return None,
            Err(e) => {
                info!("[{}] 指令被拒绝: {}", PLUGIN_NAME, e);
                return Some(Reply::error(reply::format_command_failure(&e)));
            }
        };

        debug!("[{}] 解析得到指令: {:?}", PLUGIN_NAME, command);

        let reply = match command {
            Command::Help(None) => Reply::text(format!(
                "请指定要查看帮助的插件名，例如 {HELP_COMMAND} {PLUGIN_NAME}"
            )),
            Command::Help(Some(name)) if name == PLUGIN_NAME => Reply::text(self.help_text()),
            Command::Help(Some(name)) => Reply::error(format!("未知插件：{name}，请检查拼写")),
            Command::Request(request) => {
                let outcome = self.service.search(&request).await;
                Reply::from_outcome(request.platform, outcome)
            }
        };
        Some(reply)
    }
}
