use std::sync::Arc;

use dailysign_domain::notification::{ChannelConfig, NotificationSender};
use dailysign_domain::shared::DomainError;

use super::bark::BarkSender;
use super::server_chan::ServerChanSender;

/// Create a notification sender based on channel configuration
pub fn create_sender(config: &ChannelConfig) -> Result<Arc<dyn NotificationSender>, DomainError> {
    config.validate()?;

    let sender: Arc<dyn NotificationSender> = match config {
        ChannelConfig::ServerChan { send_key } => {
            Arc::new(ServerChanSender::new(send_key.clone()).map_err(push_setup_error)?)
        }
        ChannelConfig::Bark { base_url, params } => Arc::new(
            BarkSender::new(base_url.clone())
                .map_err(push_setup_error)?
                .with_params(params.clone()),
        ),
    };

    Ok(sender)
}

fn push_setup_error(e: anyhow::Error) -> DomainError {
    DomainError::Push(format!("{:#}", e))
}
