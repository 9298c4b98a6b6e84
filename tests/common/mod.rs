//! 集成测试共用的本地 HTTP 桩服务。
//!
//! 每个桩服务监听 `127.0.0.1` 上的随机端口，对所有请求返回相同的响应，
//! 并记录收到的请求行，以便检查查询参数。

#![allow(dead_code)]

use std::time::Duration;

use reqwest::Url;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    sync::mpsc,
};

pub struct StubServer {
    pub base_url: String,
    requests: mpsc::UnboundedReceiver<String>,
}

enum Behavior {
    Respond { status: u16, body: String },
    RespondUnsized { body: String },
    Hang,
}

impl StubServer {
    /// 对每个请求返回给定的状态码和 JSON 内容。
    pub async fn respond_with(status: u16, body: impl Into<String>) -> Self {
        Self::start(Behavior::Respond {
            status,
            body: body.into(),
        })
        .await
    }

    /// 返回 200 和给定内容，但不带 `Content-Length`，以关闭连接表示响应结束。
    pub async fn respond_unsized(body: impl Into<String>) -> Self {
        Self::start(Behavior::RespondUnsized { body: body.into() }).await
    }

    /// 接受连接但从不响应，用于测试超时。
    pub async fn hang() -> Self {
        Self::start(Behavior::Hang).await
    }

    async fn start(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("绑定本地端口失败");
        let addr = listener.local_addr().expect("获取本地地址失败");
        let (tx, requests) = mpsc::unbounded_channel();

        let (reply, body) = match behavior {
            Behavior::Respond { status, body } => (Some((status, true)), body),
            Behavior::RespondUnsized { body } => (Some((200, false)), body),
            Behavior::Hang => (None, String::new()),
        };

        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let tx = tx.clone();
                let body = body.clone();
                tokio::spawn(async move {
                    handle_connection(socket, reply, body, tx).await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    /// 返回桩服务上某个路径的完整地址。
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 取出下一个收到的请求，解析出路径和解码后的查询参数。
    pub async fn next_request(&mut self) -> Option<RecordedRequest> {
        let request_line = tokio::time::timeout(Duration::from_secs(5), self.requests.recv())
            .await
            .ok()??;
        let target = request_line.split_whitespace().nth(1)?;
        let url = Url::parse(&format!("http://localhost{target}")).ok()?;
        Some(RecordedRequest {
            path: url.path().to_string(),
            query: url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        })
    }
}

#[derive(Debug)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

async fn handle_connection(
    mut socket: TcpStream,
    reply: Option<(u16, bool)>,
    body: String,
    tx: mpsc::UnboundedSender<String>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") && buf.len() < 16 * 1024 {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&buf);
    let request_line = head.lines().next().unwrap_or_default().to_string();
    let _ = tx.send(request_line);

    let Some((status, sized)) = reply else {
        tokio::time::sleep(Duration::from_secs(30)).await;
        return;
    };

    let reason = if status == 200 { "OK" } else { "Error" };
    let length = if sized {
        format!("Content-Length: {}\r\n", body.len())
    } else {
        String::new()
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json; charset=utf-8\r\n{length}Connection: close\r\n\r\n{body}"
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,song_request_rs=debug"));
    let _ = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
