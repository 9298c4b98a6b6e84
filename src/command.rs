//! 点歌指令解析。
//!
//! 指令格式为 `<指令词> <平台> <关键词...>`，关键词是平台名之后的整行内容，保留内部空格。

use crate::{
    error::{Result, SongRequestError},
    model::{platform::Platform, song::SearchRequest},
    search::join_platform_names,
};

/// 查看帮助的指令词。
pub const HELP_COMMAND: &str = "#help";

/// 解析后的指令。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 点歌请求。
    Request(SearchRequest),
    /// 查看帮助，可带目标插件名。
    Help(Option<String>),
}

/// 点歌指令解析器。
#[derive(Debug, Clone)]
pub struct CommandParser {
    triggers: Vec<String>,
    wake_words: Vec<String>,
    supported: Vec<Platform>,
}

impl CommandParser {
    /// 创建解析器。
    ///
    /// # 参数
    /// * `triggers` - 点歌指令词，例如 `点歌`。
    /// * `wake_words` - 唤醒词，为空时不要求唤醒词。互为前缀时优先匹配较长的唤醒词。
    /// * `supported` - 已配置的平台，其余平台名会被拒绝。
    pub fn new(triggers: Vec<String>, wake_words: Vec<String>, supported: Vec<Platform>) -> Self {
        let mut wake_words: Vec<String> =
            wake_words.into_iter().filter(|w| !w.is_empty()).collect();
        wake_words.sort_by(|a, b| b.len().cmp(&a.len()));

        Self {
            triggers: triggers.into_iter().filter(|t| !t.trim().is_empty()).collect(),
            wake_words,
            supported,
        }
    }

    /// 主要的指令词。
    pub fn primary_trigger(&self) -> &str {
        self.triggers.first().map_or("点歌", String::as_str)
    }

    /// 已配置的平台。
    pub fn supported_platforms(&self) -> &[Platform] {
        &self.supported
    }

    /// 正确的指令格式，例如 `点歌 [平台] [关键词]`。
    pub fn usage(&self) -> String {
        format!("{} [平台] [关键词]", self.primary_trigger())
    }

    /// 解析一条消息。
    ///
    /// # 返回
    /// * `Ok(None)` - 消息不是发给本插件的，不应回复。
    /// * `Ok(Some(command))` - 合法的指令。
    /// * `Err(_)` - 是发给本插件的指令但格式错误或平台不受支持，应回复错误信息。
    pub fn parse(&self, content: &str) -> Result<Option<Command>> {
        let mut content = content.trim();

        if !self.wake_words.is_empty() {
            let Some(rest) = self
                .wake_words
                .iter()
                .find_map(|w| content.strip_prefix(w.as_str()))
            else {
                return Ok(None);
            };
            content = rest.trim_start();
        }

        let (head, rest) = split_first_word(content);

        if head == HELP_COMMAND {
            let target = rest.split_whitespace().next().map(str::to_string);
            return Ok(Some(Command::Help(target)));
        }

        if !self.triggers.iter().any(|t| t == head) {
            return Ok(None);
        }

        let (platform_token, keyword) = split_first_word(rest);
        let keyword = keyword.trim();
        if platform_token.is_empty() || keyword.is_empty() {
            return Err(SongRequestError::MalformedCommand {
                usage: self.usage(),
            });
        }

        let platform = Platform::from_command_name(platform_token)
            .filter(|p| self.supported.contains(p))
            .ok_or_else(|| SongRequestError::UnsupportedPlatform {
                requested: platform_token.to_string(),
                supported: join_platform_names(&self.supported),
            })?;

        Ok(Some(Command::Request(SearchRequest {
            platform,
            keyword: keyword.to_string(),
        })))
    }
}

/// 拆出第一个单词，返回 `(单词, 剩余部分)`，剩余部分去掉了开头的空白。
fn split_first_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim_start()),
        None => (s, ""),
    }
}
