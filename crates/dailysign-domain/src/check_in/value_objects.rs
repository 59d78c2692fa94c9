use std::fmt;

use crate::shared::DomainError;

/// Reaction id sent with every check-in
pub const CHECK_IN_EMOTE_ID: &str = "1";
/// Comment sent with every check-in
pub const CHECK_IN_COMMENT: &str = "记上一笔，hold住我的快乐！";

/// Per-account outcome of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInOutcome {
    LoginFailed,
    AlreadyCheckedIn,
    Succeeded,
    Failed,
    FormExtractionFailed,
}

impl CheckInOutcome {
    /// Already-checked-in counts as success: the daily credit was earned.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            CheckInOutcome::Succeeded | CheckInOutcome::AlreadyCheckedIn
        )
    }
}

/// Form fields collected from the check-in page, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing the value of an existing field with the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Append the fixed reaction and comment fields
    pub fn with_check_in_fields(mut self) -> Self {
        self.insert("emotid", CHECK_IN_EMOTE_ID);
        self.insert("content", CHECK_IN_COMMENT);
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormData::new();
        for (name, value) in iter {
            form.insert(name, value);
        }
        form
    }
}

/// State of the check-in page for the current session
#[derive(Debug)]
pub enum FormState {
    Ready(FormData),
    AlreadyCheckedIn,
    Unavailable(DomainError),
}

/// One line of the run summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub username: String,
    pub outcome: CheckInOutcome,
}

impl ResultRecord {
    pub fn new(username: impl Into<String>, outcome: CheckInOutcome) -> Self {
        Self {
            username: username.into(),
            outcome,
        }
    }
}

impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let u = &self.username;
        match self.outcome {
            CheckInOutcome::Succeeded => write!(f, "🎯账号 {}: 签到成功", u),
            CheckInOutcome::Failed => write!(f, "🎯账号 {}: 签到失败", u),
            CheckInOutcome::AlreadyCheckedIn => write!(f, "🎯账号 {}: 已经签过到了！", u),
            CheckInOutcome::FormExtractionFailed => write!(f, "⚠️账号 {}: 获取签到表单失败", u),
            CheckInOutcome::LoginFailed => write!(f, "❌️账号 {}: 登录失败，无法签到", u),
        }
    }
}

/// All records of one run, in account order
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub records: Vec<ResultRecord>,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunReport {
    pub fn from_records(records: Vec<ResultRecord>) -> Self {
        let succeeded = records.iter().filter(|r| r.outcome.is_success()).count();
        let failed = records.len() - succeeded;
        Self {
            records,
            succeeded,
            failed,
        }
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Rendered result lines
    pub fn lines(&self) -> Vec<String> {
        self.records.iter().map(ToString::to_string).collect()
    }
}
