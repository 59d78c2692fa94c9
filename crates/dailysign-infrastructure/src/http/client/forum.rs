use dailysign_domain::check_in::{FormData, Forum};
use dailysign_domain::shared::DomainError;
use dailysign_domain::Account;

use super::types::HttpMethod;

impl super::HttpClient {
    /// POST the login form and return the raw response body
    pub async fn post_login(&self, forum: &Forum, account: &Account) -> Result<String, DomainError> {
        let payload = vec![
            ("username".to_string(), account.username().to_string()),
            ("password".to_string(), account.password().to_string()),
            ("questionid".to_string(), "0".to_string()),
            ("answer".to_string(), String::new()),
        ];

        self.request(&forum.login_url(), HttpMethod::Post, Some(payload.as_slice()))
            .await
    }

    /// GET the check-in page HTML
    pub async fn fetch_sign_in_page(&self, forum: &Forum) -> Result<String, DomainError> {
        self.request(&forum.sign_in_page_url(), HttpMethod::Get, None)
            .await
    }

    /// POST the collected check-in form
    pub async fn submit_sign_in(
        &self,
        forum: &Forum,
        form: &FormData,
    ) -> Result<String, DomainError> {
        self.request(&forum.sign_in_url(), HttpMethod::Post, Some(form.fields()))
            .await
    }
}
