use log::{error, info};
use tracing::instrument;

use dailysign_domain::check_in::{CheckInOutcome, FormState, Forum, ResultRecord};
use dailysign_domain::Account;
use dailysign_infrastructure::http::{ClientOptions, HttpClient};

use crate::application::services::auth_service;

mod batch;
mod execution;
mod types;

pub use execution::{get_form, submit};
pub use types::ExecutorSettings;

/// Check-in executor service
///
/// Holds only the forum description and the options each session is built
/// from; every account gets its own `HttpClient` and therefore its own
/// cookie jar.
pub struct CheckInExecutor {
    forum: Forum,
    client_options: ClientOptions,
}

impl CheckInExecutor {
    pub fn new(settings: ExecutorSettings) -> Self {
        Self {
            forum: settings.forum,
            client_options: settings.client_options,
        }
    }

    pub fn forum(&self) -> &Forum {
        &self.forum
    }

    /// Execute check-in for a single account on a fresh session
    #[instrument(skip_all, fields(account = %account.username()))]
    pub async fn execute_check_in(&self, account: &Account) -> ResultRecord {
        let username = account.username();
        info!("[{}] 开始签到", username);

        let client = match HttpClient::with_options(self.client_options.clone()) {
            Ok(client) => client,
            Err(e) => {
                error!("[{}] 创建 HTTP 会话失败: {:#}", username, e);
                return ResultRecord::new(username, CheckInOutcome::LoginFailed);
            }
        };

        if !auth_service::login(&client, &self.forum, account).await {
            return ResultRecord::new(username, CheckInOutcome::LoginFailed);
        }

        let outcome = match get_form(&client, &self.forum).await {
            FormState::AlreadyCheckedIn => CheckInOutcome::AlreadyCheckedIn,
            FormState::Unavailable(_) => CheckInOutcome::FormExtractionFailed,
            FormState::Ready(form) => submit(&client, &self.forum, &form).await,
        };

        let record = ResultRecord::new(username, outcome);
        if outcome.is_success() {
            info!("{}", record);
        } else {
            error!("{}", record);
        }
        record
    }
}
