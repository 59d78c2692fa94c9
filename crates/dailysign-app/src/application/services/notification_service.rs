use log::{debug, error, info};
use std::sync::Arc;

use dailysign_domain::check_in::RunReport;
use dailysign_domain::notification::{ChannelType, NotificationMessage, NotificationSender};
use dailysign_infrastructure::config::AppConfig;
use dailysign_infrastructure::notification::create_sender;

/// Notification application service
/// Pushes the run summary through every configured channel
pub struct NotificationService {
    senders: Vec<Arc<dyn NotificationSender>>,
}

impl NotificationService {
    pub fn new(senders: Vec<Arc<dyn NotificationSender>>) -> Self {
        Self { senders }
    }

    /// Build senders for the channels present in the config, ServerChan first
    pub fn from_config(config: &AppConfig) -> Self {
        if config.server_chan_key().is_none() {
            info!("⚠️未检测到 Server酱 的 SENDKEY，跳过推送。");
        }
        if config.bark_base_url().is_none() {
            info!("❌️未检测到 Bark 的基础URL，跳过推送。");
        }

        let senders = config
            .channel_configs()
            .iter()
            .filter_map(|channel| match create_sender(channel) {
                Ok(sender) => Some(sender),
                Err(e) => {
                    error!(
                        "Failed to create sender for channel {}: {}",
                        channel.channel_type(),
                        e
                    );
                    None
                }
            })
            .collect();

        Self::new(senders)
    }

    pub fn channel_count(&self) -> usize {
        self.senders.len()
    }

    /// Send the summary of `report` to all channels, in order
    ///
    /// Returns the number of channels that confirmed delivery. Channel
    /// failures are logged and never abort the remaining channels.
    pub async fn dispatch(&self, report: &RunReport) -> usize {
        if self.senders.is_empty() {
            info!("No notification channels configured, skipping notification");
            return 0;
        }

        let message = NotificationMessage::summary(&report.lines());
        let mut delivered = 0;

        for sender in &self.senders {
            let channel = sender.channel_type();
            match sender.send(&message).await {
                Ok(()) => {
                    delivered += 1;
                    info!("{}", delivery_summary(channel, true));
                }
                Err(e) => {
                    error!("{}", delivery_summary(channel, false));
                    debug!("{} push error: {}", channel, e.format_with_code());
                }
            }
        }

        delivered
    }
}

/// Summary line logged once per channel after dispatch
fn delivery_summary(channel: ChannelType, delivered: bool) -> &'static str {
    match (channel, delivered) {
        (ChannelType::ServerChan, true) => "✈️所有账号的签到结果已通过Server酱推送。",
        (ChannelType::ServerChan, false) => "❌️Server酱消息推送失败。",
        (ChannelType::Bark, true) => "✈️所有账号的签到结果已通过Bark推送。",
        (ChannelType::Bark, false) => "❌️Bark消息推送失败。",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "Host": "bbs.example.com",
        "accounts": [{"username": "u", "password": "p"}],
        "ftqq_SENDKEY": "",
        "Bark_BASE_URL": "https://api.day.app/devkey/"
    }"#;

    #[test]
    fn test_from_config_skips_blank_channels() {
        let config = AppConfig::from_json(CONFIG).unwrap();
        let service = NotificationService::from_config(&config);
        assert_eq!(service.channel_count(), 1);
    }

    #[test]
    fn test_delivery_summary_lines() {
        assert_eq!(
            delivery_summary(ChannelType::ServerChan, true),
            "✈️所有账号的签到结果已通过Server酱推送。"
        );
        assert_eq!(
            delivery_summary(ChannelType::ServerChan, false),
            "❌️Server酱消息推送失败。"
        );
        assert_eq!(delivery_summary(ChannelType::Bark, false), "❌️Bark消息推送失败。");
    }

    #[tokio::test]
    async fn test_dispatch_without_channels_is_noop() {
        let service = NotificationService::new(Vec::new());
        let report = RunReport::default();
        assert_eq!(service.dispatch(&report).await, 0);
    }
}
