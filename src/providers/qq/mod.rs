//! QQ音乐提供商模块。
//!
//! 通过配置中的搜索接口（通常为 `c.y.qq.com/soso/fcgi-bin/client_search_cp`）
//! 按关键词搜索歌曲，只取第一条结果。

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

const SONG_DETAIL_URL: &str = "https://y.qq.com/n/ryqq/songDetail/";
const ALBUM_COVER_URL: &str = "https://y.qq.com/music/photo_new/T002R300x300M000";

/// QQ 音乐的提供商实现。
#[derive(Debug, Clone)]
pub struct QQMusic {
    http_client: Client,
    config: ProviderConfig,
}

impl QQMusic {
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
                ("w", keyword.to_string()),
                ("format", "json".to_string()),
                ("p", "1".to_string()),
                ("n", "1".to_string()),
            ],
            &self.config,
        )
    }
}

#[async_trait]
impl Provider for QQMusic {
    fn platform(&self) -> Platform {
        Platform::QQ
    }

    async fn search(&self, keyword: &str) -> SearchOutcome {
        info!("[QQ音乐] 搜索关键词 '{}'", keyword);
        let query = self.search_query(keyword);
        let body = http_get_text(&self.http_client, Platform::QQ, &self.config.api_url, &query)
            .await?;
        parse_search_response(&body)
    }
}

/// 将搜索接口的响应归约为 `SongResult`。
///
/// 缺少 `data.song.list` 或列表为空视为没有结果；演唱者列表为空时使用占位名。
pub(crate) fn parse_search_response(body: &str) -> SearchOutcome {
    let response: models::SearchResponse = parse_json(Platform::QQ, body)?;

    let song: models::Song = first_entry(
        Platform::QQ,
        response.data.and_then(|d| d.song).and_then(|s| s.list),
    )?;

    if song.songmid.is_empty() {
        warn!("[QQ音乐] 搜索结果缺少 songmid: {:?}", song);
        return Err(SongRequestError::Parse {
            platform: Platform::QQ,
        });
    }

    let artist = song
        .singer
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(|s| s.name)
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

    let image_url = match song.albummid.as_deref() {
        Some(mid) if !mid.is_empty() => format!("{ALBUM_COVER_URL}{mid}.jpg"),
        _ => String::new(),
    };

    Ok(SongResult {
        name: song.songname,
        artist,
        url: format!("{SONG_DETAIL_URL}{}", song.songmid),
        image_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    fn init_tracing() {
        use tracing_subscriber::{EnvFilter, FmtSubscriber};
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,song_request_rs=trace"));
        let _ = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn test_parse_single_match() {
        let body = r#"{
            "code": 0,
            "data": {
                "song": {
                    "curnum": 1,
                    "list": [{
                        "songname": "稻香",
                        "songmid": "001abc",
                        "albummid": "xyz",
                        "singer": [{ "id": 4558, "name": "周杰伦" }, { "name": "其他" }]
                    }]
                }
            }
        }"#;

        let song = parse_search_response(body).unwrap();

        assert_eq!(song.name, "稻香");
        assert_eq!(song.artist, "周杰伦");
        assert_eq!(song.url, "https://y.qq.com/n/ryqq/songDetail/001abc");
        assert_eq!(
            song.image_url,
            "https://y.qq.com/music/photo_new/T002R300x300M000xyz.jpg"
        );
    }

    #[test]
    fn test_empty_singer_list_uses_placeholder() {
        let body = r#"{"data":{"song":{"list":[
            {"songname":"纯音乐","songmid":"002","albummid":"","singer":[]}
        ]}}}"#;

        let song = parse_search_response(body).unwrap();

        assert_eq!(song.artist, UNKNOWN_ARTIST);
        assert!(song.image_url.is_empty());
    }

    #[test]
    fn test_missing_or_empty_list_is_no_results() {
        for body in [
            r#"{"code":0,"data":{"song":{"list":[]}}}"#,
            r#"{"code":0,"data":{"song":{}}}"#,
            r#"{"code":0,"data":{}}"#,
            r#"{"code":0}"#,
            r#"{"code":0,"data":null}"#,
        ] {
            let err = parse_search_response(body).unwrap_err();
            assert_eq!(err.kind(), FailureKind::NoResults, "响应: {body}");
        }
    }

    #[test]
    fn test_invalid_body_is_parse_failure() {
        let err = parse_search_response("callback({})").unwrap_err();
        assert_eq!(err.kind(), FailureKind::ParseFailure);

        let err = parse_search_response(r#"{"data":{"song":{"list":[{"songname":"稻香"}]}}}"#)
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::ParseFailure, "缺少 songmid 应视为解析失败");
    }

    #[test]
    fn test_only_first_entry_is_validated() {
        let body = r#"{"data":{"song":{"list":[
            {"songname":"稻香","songmid":"001abc","albummid":"xyz","singer":[{"name":"周杰伦"}]},
            {"songname":"残缺条目"},
            "not an object"
        ]}}}"#;

        let song = parse_search_response(body).unwrap();

        assert_eq!(song.name, "稻香");
        assert_eq!(song.url, "https://y.qq.com/n/ryqq/songDetail/001abc");
    }

    #[test]
    fn test_search_query_requests_single_result() {
        let provider = QQMusic::new(
            ProviderConfig::new("https://c.y.qq.com/soso/fcgi-bin/client_search_cp"),
            Duration::from_secs(5),
        )
        .unwrap();

        let query = provider.search_query("稻香 周杰伦");

        assert!(query.contains(&("w".to_string(), "稻香 周杰伦".to_string())));
        assert!(query.contains(&("n".to_string(), "1".to_string())));
        assert!(query.contains(&("p".to_string(), "1".to_string())));
        assert!(query.contains(&("format".to_string(), "json".to_string())));
    }

    #[tokio::test]
    #[ignore]
    async fn test_search_live() {
        init_tracing();
        let provider = QQMusic::new(
            ProviderConfig::new("https://c.y.qq.com/soso/fcgi-bin/client_search_cp"),
            Duration::from_secs(10),
        )
        .unwrap();

        let song = provider.search("稻香").await.unwrap();

        assert!(song.url.starts_with(SONG_DETAIL_URL));
        info!("✅ 搜索成功: {:?}", song);
    }
}
