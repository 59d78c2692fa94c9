use serde::{Deserialize, Serialize};

use super::value_objects::CheckInOutcome;

/// Ordered substring rules mapping a response body to an outcome.
///
/// Rules are checked in insertion order and the first marker found in the
/// body wins. Bodies matching no rule fall back to `fallback`.
#[derive(Debug, Clone)]
pub struct MarkerClassifier<T> {
    rules: Vec<(String, T)>,
    fallback: T,
}

impl<T: Clone> MarkerClassifier<T> {
    pub fn new(fallback: T) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    pub fn rule(mut self, marker: impl Into<String>, outcome: T) -> Self {
        let marker = marker.into();
        // An empty marker would match every body
        if !marker.is_empty() {
            self.rules.push((marker, outcome));
        }
        self
    }

    pub fn classify(&self, body: &str) -> T {
        self.rules
            .iter()
            .find(|(marker, _)| body.contains(marker.as_str()))
            .map(|(_, outcome)| outcome.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Result of classifying a login response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    LockedOut,
    CaptchaRequired,
    WrongPassword,
    Unknown,
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success)
    }

    pub fn reason(&self) -> &'static str {
        match self {
            LoginOutcome::Success => "登录成功",
            LoginOutcome::LockedOut => "密码错误次数过多，账号暂时被锁定",
            LoginOutcome::CaptchaRequired => "需要输入验证码",
            LoginOutcome::WrongPassword => "用户名或密码错误",
            LoginOutcome::Unknown => "未知原因",
        }
    }
}

/// Forum specific response markers
///
/// Every field can be overridden from the config file; missing fields keep
/// the Discuz `dc_signin` defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForumMarkers {
    pub login_success: String,
    pub login_locked_out: String,
    pub login_captcha: String,
    pub login_wrong_password: String,
    pub page_already_checked_in: String,
    pub submit_success: String,
    pub submit_already_checked_in: String,
    /// Name of the hidden anti-forgery input every Discuz form carries
    pub form_token_field: String,
    /// Input only the check-in form carries; tells it apart from the header
    /// search form, which also holds the token
    pub form_submit_field: String,
}

impl Default for ForumMarkers {
    fn default() -> Self {
        Self {
            login_success: "欢迎您回来".to_string(),
            login_locked_out: "密码错误次数过多".to_string(),
            login_captcha: "验证码".to_string(),
            login_wrong_password: "登录失败".to_string(),
            page_already_checked_in: "您今日已经签过到".to_string(),
            submit_success: "签到成功".to_string(),
            submit_already_checked_in: "已经签过到".to_string(),
            form_token_field: "formhash".to_string(),
            form_submit_field: "signsubmit".to_string(),
        }
    }
}

impl ForumMarkers {
    pub fn login_classifier(&self) -> MarkerClassifier<LoginOutcome> {
        MarkerClassifier::new(LoginOutcome::Unknown)
            .rule(&self.login_success, LoginOutcome::Success)
            .rule(&self.login_locked_out, LoginOutcome::LockedOut)
            .rule(&self.login_captcha, LoginOutcome::CaptchaRequired)
            .rule(&self.login_wrong_password, LoginOutcome::WrongPassword)
    }

    pub fn submit_classifier(&self) -> MarkerClassifier<CheckInOutcome> {
        MarkerClassifier::new(CheckInOutcome::Failed)
            .rule(&self.submit_success, CheckInOutcome::Succeeded)
            .rule(&self.submit_already_checked_in, CheckInOutcome::AlreadyCheckedIn)
    }

    pub fn is_already_checked_in_page(&self, body: &str) -> bool {
        !self.page_already_checked_in.is_empty() && body.contains(&self.page_already_checked_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_matching_rule_wins() {
        let classifier = MarkerClassifier::new("none")
            .rule("alpha", "first")
            .rule("beta", "second");

        assert_eq!(classifier.classify("beta then alpha"), "first");
        assert_eq!(classifier.classify("only beta"), "second");
        assert_eq!(classifier.classify("nothing"), "none");
    }

    #[test]
    fn test_empty_marker_is_ignored() {
        let classifier = MarkerClassifier::new(false).rule("", true);
        assert!(classifier.is_empty());
        assert!(!classifier.classify("anything"));
    }

    #[test]
    fn test_login_success_beats_failure_markers() {
        let classifier = ForumMarkers::default().login_classifier();
        let body = "欢迎您回来，上次登录失败 1 次";
        assert_eq!(classifier.classify(body), LoginOutcome::Success);
    }

    #[test]
    fn test_login_failure_markers() {
        let classifier = ForumMarkers::default().login_classifier();

        assert_eq!(
            classifier.classify("密码错误次数过多，请 15 分钟后重新登录"),
            LoginOutcome::LockedOut
        );
        assert_eq!(
            classifier.classify("请输入验证码后继续登录"),
            LoginOutcome::CaptchaRequired
        );
        assert_eq!(
            classifier.classify("登录失败，您还可以尝试 4 次"),
            LoginOutcome::WrongPassword
        );
        assert_eq!(classifier.classify("<html></html>"), LoginOutcome::Unknown);
    }

    #[test]
    fn test_submit_classifier() {
        let classifier = ForumMarkers::default().submit_classifier();

        assert_eq!(
            classifier.classify("<root><![CDATA[签到成功]]></root>"),
            CheckInOutcome::Succeeded
        );
        assert_eq!(
            classifier.classify("您今日已经签过到了"),
            CheckInOutcome::AlreadyCheckedIn
        );
        assert_eq!(classifier.classify("系统繁忙"), CheckInOutcome::Failed);
    }

    #[test]
    fn test_partial_marker_override() {
        let markers: ForumMarkers =
            serde_json::from_str(r#"{"submit_success": "Signed in"}"#).unwrap();

        assert_eq!(markers.submit_success, "Signed in");
        assert_eq!(markers.login_success, "欢迎您回来");
        assert_eq!(
            markers.submit_classifier().classify("Signed in today"),
            CheckInOutcome::Succeeded
        );
    }
}
