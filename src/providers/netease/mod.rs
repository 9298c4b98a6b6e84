//! 此模块实现了与网易云音乐平台进行交互的 `Provider`。
//!
//! 搜索接口通常为 `https://music.163.com/api/search/get/web`，需要在配置中附加 `type=1`
//! 以只搜索单曲（默认请求已包含该参数）。

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
        Provider, build_http_client, build_query, first_entry, http_get_text, parse_json,
    },
};

pub(crate) mod models;

const SONG_PAGE_URL: &str = "https://music.163.com/#/song?id=";

/// 网易云音乐的提供商实现。
#[derive(Debug, Clone)]
pub struct NeteaseMusic {
    http_client: Client,
    config: ProviderConfig,
}

impl NeteaseMusic {
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
                ("keywords", keyword.to_string()),
                ("type", "1".to_string()),
                ("offset", "0".to_string()),
                ("limit", "1".to_string()),
            ],
            &self.config,
        )
    }
}

#[async_trait]
impl Provider for NeteaseMusic {
    fn platform(&self) -> Platform {
        Platform::Netease
    }

    async fn search(&self, keyword: &str) -> SearchOutcome {
        info!("[网易云音乐] 搜索关键词 '{}'", keyword);
        let query = self.search_query(keyword);
        let body = http_get_text(
            &self.http_client,
            Platform::Netease,
            &self.config.api_url,
            &query,
        )
        .await?;
        parse_search_response(&body)
    }
}

/// 将搜索接口的响应归约为 `SongResult`。
///
/// 返回码不是 `200`、缺少 `result.songs` 或列表为空都视为没有结果。
/// 网易云的单曲总是带有艺术家，艺术家列表为空说明响应结构异常，视为解析失败。
/// 封面优先使用专辑封面，其次是第一位艺术家的头像。
pub(crate) fn parse_search_response(body: &str) -> SearchOutcome {
    let response: models::SearchResponse = parse_json(Platform::Netease, body)?;

    if response.code != 200 {
        warn!("[网易云音乐] 接口返回码为 {}", response.code);
        return Err(SongRequestError::NoResults {
            platform: Platform::Netease,
        });
    }

    let song: models::Song =
        first_entry(Platform::Netease, response.result.and_then(|r| r.songs))?;

    let Some(first_artist) = song.artists.into_iter().next() else {
        warn!("[网易云音乐] 歌曲 {} 没有艺术家信息", song.id);
        return Err(SongRequestError::Parse {
            platform: Platform::Netease,
        });
    };

    let image_url = song
        .album
        .and_then(|a| a.pic_url)
        .filter(|url| !url.is_empty())
        .or(first_artist.img1v1_url)
        .unwrap_or_default();

    Ok(SongResult {
        name: song.name,
        artist: first_artist.name,
        url: format!("{SONG_PAGE_URL}{}", song.id),
        image_url,
    })
}
