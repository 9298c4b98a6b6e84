//! 搜索模块
//!
//! `MusicSearchService` 按平台把点歌请求分派给对应的提供商。

use tracing::{error, info};

use crate::{
    config::PluginConfig,
    error::{Result, SongRequestError},
    model::{
        platform::Platform,
        song::{SearchOutcome, SearchRequest},
    },
    providers::{Provider, kugou::KugouMusic, netease::NeteaseMusic, qq::QQMusic},
};

type ProviderSlot = Option<Box<dyn Provider>>;

/// 多平台音乐搜索服务。
///
/// 每个平台对应一个固定的提供商槽位，没有配置的平台槽位为空，
/// 对其发起的搜索会得到 `UnsupportedPlatform` 错误。
#[derive(Default)]
pub struct MusicSearchService {
    qq: ProviderSlot,
    netease: ProviderSlot,
    kugou: ProviderSlot,
}

impl MusicSearchService {
    /// 创建一个不含任何提供商的服务。
    pub fn new() -> Self {
        Self::default()
    }

    /// 根据配置创建提供商。
    ///
    /// 未配置的平台会被跳过；初始化失败的提供商会被记录并跳过，不会中断启动。
    pub fn from_config(config: &PluginConfig) -> Self {
        let timeout = config.request_timeout();
        let mut service = Self::new();

        for platform in [Platform::QQ, Platform::Netease, Platform::Kugou] {
            let Some(provider_config) = config.provider(platform).cloned() else {
                info!("[Search] 平台 '{}' 未配置，已跳过。", platform);
                continue;
            };

            let provider = match platform {
                Platform::QQ => boxed(QQMusic::new(provider_config, timeout)),
                Platform::Netease => boxed(NeteaseMusic::new(provider_config, timeout)),
                Platform::Kugou => boxed(KugouMusic::new(provider_config, timeout)),
            };

            match provider {
                Ok(provider) => {
                    info!("[Search] Provider '{}' 初始化成功。", provider.name());
                    *service.slot_mut(platform) = Some(provider);
                }
                Err(e) => {
                    error!("[Search] Provider '{}' 初始化失败: {}", platform, e);
                }
            }
        }

        service
    }

    /// 注册一个提供商，放入其平台对应的槽位，替换已有的提供商。
    pub fn with_provider(mut self, provider: Box<dyn Provider>) -> Self {
        let platform = provider.platform();
        *self.slot_mut(platform) = Some(provider);
        self
    }

    fn slot(&self, platform: Platform) -> &ProviderSlot {
        match platform {
            Platform::QQ => &self.qq,
            Platform::Netease => &self.netease,
            Platform::Kugou => &self.kugou,
        }
    }

    fn slot_mut(&mut self, platform: Platform) -> &mut ProviderSlot {
        match platform {
            Platform::QQ => &mut self.qq,
            Platform::Netease => &mut self.netease,
            Platform::Kugou => &mut self.kugou,
        }
    }

    /// 返回指定平台的提供商。
    pub fn provider(&self, platform: Platform) -> Option<&dyn Provider> {
        self.slot(platform).as_deref()
    }

    /// 当前可用的平台，按固定顺序排列。
    pub fn supported_platforms(&self) -> Vec<Platform> {
        [Platform::QQ, Platform::Netease, Platform::Kugou]
            .into_iter()
            .filter(|p| self.slot(*p).is_some())
            .collect()
    }

    /// 执行一次点歌搜索。
    pub async fn search(&self, request: &SearchRequest) -> SearchOutcome {
        let Some(provider) = self.provider(request.platform) else {
            error!(
                "[Search] 平台 '{}' 没有可用的提供商，请求应在解析阶段被拒绝。",
                request.platform
            );
            return Err(SongRequestError::UnsupportedPlatform {
                requested: request.platform.command_name().to_string(),
                supported: join_platform_names(&self.supported_platforms()),
            });
        };

        let outcome = provider.search(&request.keyword).await;
        match &outcome {
            Ok(song) => info!(
                "[Search] 平台 '{}' 找到歌曲 '{}' - '{}'",
                request.platform, song.name, song.artist
            ),
            Err(e) => info!("[Search] 平台 '{}' 搜索失败: {}", request.platform, e),
        }
        outcome
    }
}

fn boxed<P: Provider + 'static>(provider: Result<P>) -> Result<Box<dyn Provider>> {
    provider.map(|p| Box::new(p) as Box<dyn Provider>)
}

/// 将平台的指令名以顿号连接，例如 `QQ、网易云音乐、酷狗`。没有平台时返回 `无`。
pub fn join_platform_names(platforms: &[Platform]) -> String {
    if platforms.is_empty() {
        return "无".to_string();
    }
    platforms
        .iter()
        .map(|p| p.command_name())
        .collect::<Vec<_>>()
        .join("、")
}
