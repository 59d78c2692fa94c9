use log::{info, warn};

use dailysign_domain::check_in::{CheckInOutcome, FormData, FormState, Forum};
use dailysign_infrastructure::html::extract_check_in_form;
use dailysign_infrastructure::http::HttpClient;

use crate::application::ResultExt;

/// Fetch the check-in page and work out what the session can do next
///
/// A page carrying the already-checked-in marker short-circuits before any
/// parsing. A page without a recognisable form is `Unavailable`, never an
/// implicit "already checked in".
pub async fn get_form(client: &HttpClient, forum: &Forum) -> FormState {
    let html = match client
        .fetch_sign_in_page(forum)
        .await
        .log_err("获取签到页面失败")
    {
        Ok(html) => html,
        Err(e) => return FormState::Unavailable(e),
    };

    if forum.markers().is_already_checked_in_page(&html) {
        info!("今日已签到，跳过表单提交");
        return FormState::AlreadyCheckedIn;
    }

    match extract_check_in_form(&html, forum.markers())
        .log_err("解析签到表单失败")
    {
        Ok(form) => FormState::Ready(form.with_check_in_fields()),
        Err(e) => FormState::Unavailable(e),
    }
}

/// POST the form once and classify the reply
pub async fn submit(client: &HttpClient, forum: &Forum, form: &FormData) -> CheckInOutcome {
    match client
        .submit_sign_in(forum, form)
        .await
        .log_err("提交签到表单失败")
    {
        Ok(body) => {
            let outcome = forum.markers().submit_classifier().classify(&body);
            if outcome == CheckInOutcome::Failed {
                warn!("签到响应未包含成功标记");
            }
            outcome
        }
        Err(_) => CheckInOutcome::Failed,
    }
}
