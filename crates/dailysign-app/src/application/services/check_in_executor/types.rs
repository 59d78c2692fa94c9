use dailysign_domain::check_in::Forum;
use dailysign_infrastructure::config::AppConfig;
use dailysign_infrastructure::http::ClientOptions;

/// Everything a run needs, resolved from the loaded configuration
#[derive(Debug, Clone)]
pub struct ExecutorSettings {
    pub forum: Forum,
    pub client_options: ClientOptions,
}

impl ExecutorSettings {
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let forum = config.forum()?;
        let client_options = config.client_options(&forum);
        Ok(Self {
            forum,
            client_options,
        })
    }
}
