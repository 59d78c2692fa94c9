use scraper::{Html, Selector};

use dailysign_domain::check_in::{FormData, ForumMarkers};
use dailysign_domain::shared::DomainError;

/// Extract the check-in form from a page.
///
/// The check-in form is the first `<form>` holding both the token input and
/// the submit marker input; the header search form on Discuz pages carries
/// the token too. Every named input inside it is collected in document
/// order; inputs without a `value` attribute yield an empty string.
pub fn extract_check_in_form(html: &str, markers: &ForumMarkers) -> Result<FormData, DomainError> {
    let document = Html::parse_document(html);

    let form_sel = Selector::parse("form")
        .map_err(|e| DomainError::FormExtraction(format!("invalid form selector: {e:?}")))?;
    let input_sel = Selector::parse("input[name]")
        .map_err(|e| DomainError::FormExtraction(format!("invalid input selector: {e:?}")))?;

    let required = [
        markers.form_token_field.as_str(),
        markers.form_submit_field.as_str(),
    ];

    let form = document
        .select(&form_sel)
        .find(|form| {
            required.iter().filter(|name| !name.is_empty()).all(|name| {
                form.select(&input_sel)
                    .any(|input| input.value().attr("name") == Some(*name))
            })
        })
        .ok_or_else(|| {
            DomainError::FormExtraction(format!(
                "no form containing `{}` and `{}` fields was found on the check-in page",
                markers.form_token_field, markers.form_submit_field
            ))
        })?;

    let fields: FormData = form
        .select(&input_sel)
        .filter_map(|input| {
            let name = input.value().attr("name")?.trim();
            if name.is_empty() {
                return None;
            }
            let value = input.value().attr("value").unwrap_or_default();
            Some((name.to_string(), value.to_string()))
        })
        .collect();

    tracing::debug!(count = fields.len(), "Check-in form fields extracted");
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGN_PAGE: &str = r#"
        <html><body>
          <form id="scbar_form" method="post" action="search.php?searchsubmit=yes">
            <input type="hidden" name="mod" value="search">
            <input type="hidden" name="formhash" value="abc123">
            <input type="hidden" name="srchtype" value="title">
            <input type="text" name="srchtxt" value="">
          </form>
          <form id="signform" method="post" action="plugin.php?id=dc_signin:sign">
            <input type="hidden" name="formhash" value="abc123">
            <input type="hidden" name="signsubmit" value="yes">
            <input type="hidden" name="handlekey" value="signin">
            <input type="hidden" name="referer" value="https://bbs.example.com/">
            <input type="hidden" name="extra">
            <input type="submit" value="签到">
          </form>
        </body></html>
    "#;

    #[test]
    fn test_skips_search_form_that_also_holds_token() {
        let form = extract_check_in_form(SIGN_PAGE, &ForumMarkers::default()).unwrap();

        assert_eq!(form.get("formhash"), Some("abc123"));
        assert_eq!(form.get("signsubmit"), Some("yes"));
        assert_eq!(form.get("handlekey"), Some("signin"));
        assert_eq!(form.get("referer"), Some("https://bbs.example.com/"));
        assert_eq!(form.get("extra"), Some(""));
        assert_eq!(form.get("srchtxt"), None);
        assert_eq!(form.get("mod"), None);
        assert_eq!(form.len(), 5);
    }

    #[test]
    fn test_missing_form_is_an_extraction_failure() {
        let result = extract_check_in_form("<html><body>维护中</body></html>", &ForumMarkers::default());
        assert!(matches!(result, Err(DomainError::FormExtraction(_))));
    }

    #[test]
    fn test_form_without_token_is_ignored() {
        let html = r#"<form><input name="signsubmit" value="1"></form>"#;
        assert!(extract_check_in_form(html, &ForumMarkers::default()).is_err());
    }

    #[test]
    fn test_token_only_form_is_not_the_check_in_form() {
        let html = r#"<form id="scbar_form"><input name="formhash" value="abc"></form>"#;
        assert!(matches!(
            extract_check_in_form(html, &ForumMarkers::default()),
            Err(DomainError::FormExtraction(_))
        ));
    }

    #[test]
    fn test_submit_field_is_configurable() {
        let markers = ForumMarkers {
            form_submit_field: "qiandao".to_string(),
            ..ForumMarkers::default()
        };
        let html = r#"
            <form><input name="formhash" value="x"><input name="signsubmit" value="yes"></form>
            <form><input name="formhash" value="y"><input name="qiandao" value="1"></form>
        "#;

        let form = extract_check_in_form(html, &markers).unwrap();
        assert_eq!(form.get("formhash"), Some("y"));
    }
}
