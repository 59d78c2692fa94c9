use log::{error, info};

use dailysign_domain::check_in::{Forum, LoginOutcome};
use dailysign_domain::Account;
use dailysign_infrastructure::http::HttpClient;

use crate::application::ResultExt;

/// Log one account in on the given session.
///
/// Returns `true` only when the response carries the welcome-back marker.
/// Every other outcome, including exhausted transport retries, is logged
/// with its reason and reported as `false`. Exactly one login POST is made
/// per call (the client may retry it at transport level).
pub async fn login(client: &HttpClient, forum: &Forum, account: &Account) -> bool {
    let username = account.username();

    let body = match client
        .post_login(forum, account)
        .await
        .log_err(&format!("[{}] 登录请求失败", username))
    {
        Ok(body) => body,
        Err(_) => return false,
    };

    let outcome = forum.markers().login_classifier().classify(&body);
    log_outcome(username, outcome);
    outcome.is_success()
}

fn log_outcome(username: &str, outcome: LoginOutcome) {
    match outcome {
        LoginOutcome::Success => info!("[{}] 登录成功", username),
        LoginOutcome::Unknown => error!(
            "[{}] 登录失败: {}，请检查账号状态或站点是否变更",
            username,
            outcome.reason()
        ),
        _ => error!("[{}] 登录失败: {}", username, outcome.reason()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dailysign_infrastructure::http::{ClientOptions, RetryConfig};
    use std::time::Duration;

    #[tokio::test]
    async fn test_transport_failure_returns_false() {
        let forum = Forum::new("http://127.0.0.1:9").unwrap();
        let client = HttpClient::with_options(ClientOptions {
            timeout: Duration::from_secs(2),
            retry: RetryConfig {
                max_attempts: 3,
                backoff: Duration::ZERO,
            },
            ..ClientOptions::default()
        })
        .unwrap();
        let account = Account::new("user1", "pass1").unwrap();

        assert!(!login(&client, &forum, &account).await);
    }
}
