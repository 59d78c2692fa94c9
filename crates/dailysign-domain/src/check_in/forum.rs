use super::classifier::ForumMarkers;
use crate::shared::DomainError;

const LOGIN_PATH: &str =
    "/member.php?mod=logging&action=login&loginsubmit=yes&infloat=yes&lssubmit=yes";
const SIGN_IN_PAGE_PATH: &str = "/plugin.php?id=dc_signin:sign";
const SIGN_IN_PATH: &str = "/plugin.php?id=dc_signin:sign&inajax=1";

/// The forum being checked in to
#[derive(Debug, Clone)]
pub struct Forum {
    base_url: String,
    markers: ForumMarkers,
}

impl Forum {
    /// `host` may be a bare domain (`https://` is assumed) or a full origin
    pub fn new(host: &str) -> Result<Self, DomainError> {
        let host = host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(DomainError::Config("Forum host is not configured".to_string()));
        }

        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        };

        Ok(Self {
            base_url,
            markers: ForumMarkers::default(),
        })
    }

    pub fn with_markers(mut self, markers: ForumMarkers) -> Self {
        self.markers = markers;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn markers(&self) -> &ForumMarkers {
        &self.markers
    }

    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url, LOGIN_PATH)
    }

    pub fn sign_in_page_url(&self) -> String {
        format!("{}{}", self.base_url, SIGN_IN_PAGE_PATH)
    }

    pub fn sign_in_url(&self) -> String {
        format!("{}{}", self.base_url, SIGN_IN_PATH)
    }
}
