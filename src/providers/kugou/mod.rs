//! 实现了与酷狗音乐平台进行交互的 `Provider`。
//!
//! 搜索接口通常为 `http://mobilecdn.kugou.com/api/v3/search/song`。
//! 该接口不返回封面，因此结果中的封面链接总是为空。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use crate::{
    config::ProviderConfig,
    error::{Result, SongRequestError},
    model::{
        platform::Platform,
        song::{SearchOutcome, SongResult},
    },
    providers::{
        Provider, UNKNOWN_ARTIST, build_http_client, build_query, first_entry, http_get_text,
        parse_json,
    },
};

pub(crate) mod models;

/// 酷狗音乐的 Provider 实现
#[derive(Debug, Clone)]
pub struct KugouMusic {
    http_client: Client,
    config: ProviderConfig,
}

impl KugouMusic {
    /// 根据接口配置和超时时间创建提供商实例。
    pub fn new(config: ProviderConfig, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http_client: build_http_client(timeout)?,
            config,
        })
    }

    fn search_query(&self, keyword: &str) -> Vec<(String, String)> {
        build_query(
            vec![
                ("keyword", keyword.to_string()),
                ("page", "1".to_string()),
                ("pagesize", "1".to_string()),
            ],
            &self.config,
        )
    }
}

#[async_trait]
impl Provider for KugouMusic {
    fn platform(&self) -> Platform {
        Platform::Kugou
    }

    async fn search(&self, keyword: &str) -> SearchOutcome {
        info!("[酷狗音乐] 搜索关键词 '{}'", keyword);
        let query = self.search_query(keyword);
        let body = http_get_text(
            &self.http_client,
            Platform::Kugou,
            &self.config.api_url,
            &query,
        )
        .await?;
        parse_search_response(&body)
    }
}

/// 将搜索接口的响应归约为 `SongResult`。
///
/// `status` 不为 `1`、缺少 `data.info` 或列表为空都视为没有结果。
/// 歌手名为空时使用占位名。
pub(crate) fn parse_search_response(body: &str) -> SearchOutcome {
    let response: models::SearchSongResponse = parse_json(Platform::Kugou, body)?;

    if response.status != 1 {
        warn!(
            "[酷狗音乐] 接口返回状态 {}，错误信息: {}",
            response.status,
            response.error.as_deref().unwrap_or("")
        );
        return Err(SongRequestError::NoResults {
            platform: Platform::Kugou,
        });
    }

    let song: models::SongInfo =
        first_entry(Platform::Kugou, response.data.and_then(|d| d.info))?;

    if song.hash.is_empty() {
        warn!("[酷狗音乐] 搜索结果缺少 hash: {:?}", song);
        return Err(SongRequestError::Parse {
            platform: Platform::Kugou,
        });
    }

    let artist = match song.singername.trim() {
        "" => UNKNOWN_ARTIST.to_string(),
        name => name.to_string(),
    };

    Ok(SongResult {
        name: song.songname,
        artist,
        url: format!(
            "https://www.kugou.com/song/#hash={}&album_id={}",
            song.hash, song.album_id
        ),
        image_url: String::new(),
    })
}
