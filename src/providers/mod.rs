//! 提供商模块
//!
//! 该模块定义了与各音乐平台搜索接口交互的核心抽象，以及各提供商共用的 HTTP 辅助函数。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{
    config::ProviderConfig,
    error::{Result, SongRequestError},
    model::{platform::Platform, song::SearchOutcome},
};

pub mod kugou;
pub mod netease;
pub mod qq;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";

/// 上游响应体的大小上限。搜索接口只请求一条结果，正常响应远小于此值。
pub(crate) const MAX_RESPONSE_BYTES: usize = 2 * 1024 * 1024;

/// 部分平台允许演唱者列表为空，此时使用的占位名。
pub const UNKNOWN_ARTIST: &str = "未知歌手";

/// 定义了所有音乐平台提供商需要实现的通用接口。
#[async_trait]
pub trait Provider: Send + Sync {
    /// 该提供商对应的平台。
    fn platform(&self) -> Platform;

    ///
    /// 返回提供商的唯一名称。
    ///
    /// 一个全小写的静态字符串，例如 `"qq"`, `"netease"`。
    ///
    fn name(&self) -> &'static str {
        self.platform().provider_name()
    }

    ///
    /// 根据关键词搜索歌曲，只取第一条结果。
    ///
    /// # 参数
    /// * `keyword` - 搜索关键词。
    ///
    /// # 返回
    /// 成功时为标准化的 `SongResult`；失败时为 `Network`、`NoResults` 或 `Parse` 错误，
    /// 错误信息可直接展示给用户，内部细节只写入日志。
    ///
    async fn search(&self, keyword: &str) -> SearchOutcome;
}

/// 创建带有超时设置的 HTTP 客户端。
pub(crate) fn build_http_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()?;
    Ok(client)
}

/// 合并平台默认的查询参数和配置中的固定参数。同名参数以配置为准。
pub(crate) fn build_query(
    defaults: Vec<(&'static str, String)>,
    config: &ProviderConfig,
) -> Vec<(String, String)> {
    let mut query: Vec<(String, String)> = defaults
        .into_iter()
        .filter(|(key, _)| !config.params.contains_key(*key))
        .map(|(key, value)| (key.to_string(), value))
        .collect();
    query.extend(
        config
            .params
            .iter()
            .map(|(key, value)| (key.clone(), value.clone())),
    );
    query
}

/// 发送 GET 请求并读取响应文本。
///
/// 连接失败、超时、非 2xx 状态码、读取失败和响应体超过 `MAX_RESPONSE_BYTES`
/// 都会被记录并转换为 `Network` 错误。
pub(crate) async fn http_get_text(
    http_client: &Client,
    platform: Platform,
    url: &str,
    query: &[(String, String)],
) -> Result<String> {
    debug!("[{}] GET {} {:?}", platform, url, query);

    let mut response = http_client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                error!("[{}] GET 请求超时：{}: {}", platform, url, e);
            } else {
                error!("[{}] GET 请求异常：{}: {}", platform, url, e);
            }
            SongRequestError::Network { platform }
        })?;

    let status = response.status();
    if !status.is_success() {
        error!("[{}] GET 请求返回状态码 {}：{}", platform, status, url);
        return Err(SongRequestError::Network { platform });
    }

    if let Some(len) = response.content_length()
        && len > MAX_RESPONSE_BYTES as u64
    {
        error!("[{}] 响应体过大（{} 字节）：{}", platform, len, url);
        return Err(SongRequestError::Network { platform });
    }

    let mut body = Vec::new();
    loop {
        let chunk = response.chunk().await.map_err(|e| {
            error!("[{}] 读取响应内容失败：{}: {}", platform, url, e);
            SongRequestError::Network { platform }
        })?;
        let Some(chunk) = chunk else { break };

        if body.len() + chunk.len() > MAX_RESPONSE_BYTES {
            error!("[{}] 响应体超过 {} 字节，已中止读取：{}", platform, MAX_RESPONSE_BYTES, url);
            return Err(SongRequestError::Network { platform });
        }
        body.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// 将响应文本反序列化为平台的响应模型，失败时记录原因并返回 `Parse` 错误。
pub(crate) fn parse_json<T: DeserializeOwned>(platform: Platform, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        let excerpt: String = body.chars().take(200).collect();
        error!("[{}] 搜索结果解析异常: {}，响应内容: {}", platform, e, excerpt);
        SongRequestError::Parse { platform }
    })
}

/// 取出结果列表的第一条，反序列化为平台的歌曲模型。
///
/// 只有第一条会被使用，也只校验第一条。列表缺失或为空时返回 `NoResults`，
/// 第一条结构不符时返回 `Parse`。
pub(crate) fn first_entry<T: DeserializeOwned>(
    platform: Platform,
    entries: Option<Vec<Value>>,
) -> Result<T> {
    let Some(entry) = entries.and_then(|list| list.into_iter().next()) else {
        warn!("[{}] 搜索结果中没有歌曲", platform);
        return Err(SongRequestError::NoResults { platform });
    };

    serde_json::from_value(entry).map_err(|e| {
        error!("[{}] 第一条搜索结果结构异常: {}", platform, e);
        SongRequestError::Parse { platform }
    })
}

/// 将字符串或数字形式的 ID 统一反序列化为字符串，`null` 视为空字符串。
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(serde::de::Error::custom(format!("无效的 ID: {other}"))),
    }
}
