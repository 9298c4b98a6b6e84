//! 在终端里模拟聊天消息，演示点歌插件的完整流程。
//!
//! ## 如何运行
//!
//! ```bash
//! cargo run --example console -- config.example.json
//! ```
//!
//! 不指定配置文件时，从用户配置目录下的 `song-request/config.json` 加载。

use std::{
    io::{self, BufRead, Write},
    path::Path,
};

use song_request_rs::{MusicPlugin, config::PluginConfig, error::Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => PluginConfig::load_from_path(Path::new(&path))?,
        None => PluginConfig::load_default(),
    };

    let plugin = MusicPlugin::new(&config);
    info!("输入消息后回车，例如 `点歌 QQ 稻香`，输入空行退出。");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }

        match plugin.handle_message(&line).await {
            Some(reply) => writeln!(stdout, "[{:?}]\n{}\n", reply.kind, reply.text)?,
            None => writeln!(stdout, "（插件未响应这条消息）\n")?,
        }
        stdout.flush()?;
    }

    Ok(())
}
