//! 负责加载点歌插件的配置。
//!
//! 配置在启动时加载一次，之后只读。缺失的平台配置不会导致启动失败，
//! 该平台只会被视为“不支持”。

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{error::Result, model::platform::Platform};

/// 配置目录下本插件使用的子目录名。
pub const CONFIG_DIR_NAME: &str = "song-request";
/// 默认的配置文件名。
pub const CONFIG_FILE_NAME: &str = "config.json";

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 8_000;

/// 单个平台的搜索接口配置。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// 搜索接口的完整地址。为空时视为未配置。
    #[serde(default)]
    pub api_url: String,
    /// 附加在每次请求上的固定查询参数。
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl ProviderConfig {
    /// 以接口地址创建一个不带附加参数的配置。
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            params: BTreeMap::new(),
        }
    }

    /// 追加一个固定查询参数。
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// 插件的完整配置。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// 触发点歌的指令词，例如 `点歌`。
    pub triggers: Vec<String>,
    /// 可选的唤醒词。非空时，消息必须以其中之一开头才会被处理。
    pub wake_words: Vec<String>,
    /// 上游请求的超时时间（毫秒）。
    pub request_timeout_ms: u64,
    /// QQ 音乐的接口配置。
    pub qq_music: Option<ProviderConfig>,
    /// 网易云音乐的接口配置。
    pub netease_music: Option<ProviderConfig>,
    /// 酷狗音乐的接口配置。
    pub kugou_music: Option<ProviderConfig>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            triggers: vec!["点歌".to_string(), "#点歌".to_string()],
            wake_words: Vec::new(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            qq_music: None,
            netease_music: None,
            kugou_music: None,
        }
    }
}

impl PluginConfig {
    /// 返回指定平台的有效配置。`api_url` 为空的条目视为未配置。
    pub fn provider(&self, platform: Platform) -> Option<&ProviderConfig> {
        let entry = match platform {
            Platform::QQ => self.qq_music.as_ref(),
            Platform::Netease => self.netease_music.as_ref(),
            Platform::Kugou => self.kugou_music.as_ref(),
        };
        entry.filter(|c| !c.api_url.trim().is_empty())
    }

    /// 设置指定平台的配置。
    pub fn with_provider(mut self, platform: Platform, config: ProviderConfig) -> Self {
        let slot = match platform {
            Platform::QQ => &mut self.qq_music,
            Platform::Netease => &mut self.netease_music,
            Platform::Kugou => &mut self.kugou_music,
        };
        *slot = Some(config);
        self
    }

    /// 上游请求的超时时间。配置为 0 时使用默认值。
    pub fn request_timeout(&self) -> Duration {
        match self.request_timeout_ms {
            0 => Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            ms => Duration::from_millis(ms),
        }
    }

    /// 从 JSON 字符串解析配置。
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// 从指定路径加载配置。文件不存在或格式错误时返回错误。
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        info!("[Config] 已从 {} 加载配置。", path.display());
        Ok(config)
    }

    /// 从指定路径加载配置，失败时记录错误并退回默认配置。
    ///
    /// 默认配置不包含任何平台，此时所有点歌请求都会得到“不支持的平台”回复。
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from_path(path) {
            Ok(config) => config,
            Err(crate::error::SongRequestError::Io(e))
                if e.kind() == std::io::ErrorKind::NotFound =>
            {
                error!(
                    "[Config] 配置文件 {} 不存在，请检查。将使用默认配置。",
                    path.display()
                );
                Self::default()
            }
            Err(e) => {
                error!(
                    "[Config] 加载配置文件 {} 失败: {}。将使用默认配置。",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// 从用户配置目录下的 `song-request/config.json` 加载配置。
    pub fn load_default() -> Self {
        match get_config_file_path(CONFIG_FILE_NAME) {
            Ok(path) => Self::load_or_default(&path),
            Err(e) => {
                warn!("[Config] {}，将使用默认配置。", e);
                Self::default()
            }
        }
    }
}

/// 获取应用配置目录下指定文件的完整路径。
///
/// # 参数
/// * `filename` - 目标配置文件的名称，例如 "config.json"。
pub fn get_config_file_path(filename: &str) -> std::result::Result<PathBuf, std::io::Error> {
    if let Some(mut config_dir) = dirs::config_dir() {
        config_dir.push(CONFIG_DIR_NAME);
        config_dir.push(filename);
        Ok(config_dir)
    } else {
        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "无法找到用户配置目录",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SongRequestError;
    use tracing_test::traced_test;

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "triggers": ["点歌"],
            "wake_words": ["猫猫"],
            "request_timeout_ms": 3000,
            "qq_music": { "api_url": "https://c.y.qq.com/soso/fcgi-bin/client_search_cp" },
            "netease_music": {
                "api_url": "https://music.163.com/api/search/get/web",
                "params": { "type": "1" }
            }
        }"#;

        let config = PluginConfig::from_json_str(json).unwrap();

        assert_eq!(config.triggers, vec!["点歌"]);
        assert_eq!(config.wake_words, vec!["猫猫"]);
        assert_eq!(config.request_timeout(), Duration::from_millis(3000));
        assert!(config.provider(Platform::QQ).is_some());
        assert_eq!(
            config
                .provider(Platform::Netease)
                .and_then(|c| c.params.get("type"))
                .map(String::as_str),
            Some("1")
        );
        assert!(config.provider(Platform::Kugou).is_none());
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config = PluginConfig::from_json_str("{}").unwrap();
        assert_eq!(config, PluginConfig::default());
        assert_eq!(config.triggers, vec!["点歌", "#点歌"]);
        assert_eq!(config.request_timeout(), Duration::from_secs(8));
    }

    #[test]
    fn test_empty_api_url_counts_as_unconfigured() {
        let config = PluginConfig::default().with_provider(Platform::Kugou, ProviderConfig::new("  "));
        assert!(config.provider(Platform::Kugou).is_none());
    }

    #[test]
    fn test_zero_timeout_uses_default() {
        let config = PluginConfig {
            request_timeout_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(8));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let result = PluginConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(SongRequestError::JsonParse(_))));
    }

    #[test]
    fn test_missing_file_degrades_to_default() {
        let path = std::env::temp_dir().join("song_request_rs_missing_config_for_test.json");
        let _ = fs::remove_file(&path);

        assert!(matches!(
            PluginConfig::load_from_path(&path),
            Err(SongRequestError::Io(_))
        ));
        assert_eq!(PluginConfig::load_or_default(&path), PluginConfig::default());
    }

    #[test]
    #[traced_test]
    fn test_malformed_file_degrades_to_default() {
        let path = std::env::temp_dir().join(format!(
            "song_request_rs_malformed_config_{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ not json").unwrap();

        let config = PluginConfig::load_or_default(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(config, PluginConfig::default());
        assert!(logs_contain("加载配置文件"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "song_request_rs_config_{}.json",
            std::process::id()
        ));
        fs::write(
            &path,
            r#"{ "kugou_music": { "api_url": "http://mobilecdn.kugou.com/api/v3/search/song" } }"#,
        )
        .unwrap();

        let config = PluginConfig::load_or_default(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(
            config.provider(Platform::Kugou).map(|c| c.api_url.as_str()),
            Some("http://mobilecdn.kugou.com/api/v3/search/song")
        );
    }
}
