/// HTTP client retry behaviour against a local mock server
use std::time::Duration;

use dailysign_domain::check_in::{FormData, Forum};
use dailysign_domain::shared::DomainError;
use dailysign_domain::Account;
use dailysign_infrastructure::http::{ClientOptions, HttpClient, HttpMethod, RetryConfig};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_client(referer: Option<String>) -> HttpClient {
    HttpClient::with_options(ClientOptions {
        timeout: Duration::from_secs(5),
        retry: RetryConfig {
            max_attempts: 3,
            backoff: Duration::ZERO,
        },
        accept_invalid_certs: false,
        referer,
    })
    .expect("client should build")
}

#[tokio::test]
async fn request_returns_body_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(None);
    let body = client
        .request(&format!("{}/ok", server.uri()), HttpMethod::Get, None)
        .await
        .unwrap();

    assert_eq!(body, "hello");
}

#[tokio::test]
async fn non_success_status_is_retried_then_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;

    let client = fast_client(None);
    let result = client
        .request(&format!("{}/broken", server.uri()), HttpMethod::Get, None)
        .await;

    assert!(matches!(result, Err(DomainError::Transport(_))));
}

#[tokio::test]
async fn transient_failure_recovers_on_next_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
        .mount(&server)
        .await;

    let client = fast_client(None);
    let body = client
        .request(&format!("{}/flaky", server.uri()), HttpMethod::Get, None)
        .await
        .unwrap();

    assert_eq!(body, "recovered");
}

#[tokio::test]
async fn unreachable_host_is_a_transport_failure() {
    // Nothing listens on the discard port
    let client = fast_client(None);
    let result = client
        .request("http://127.0.0.1:9/", HttpMethod::Get, None)
        .await;

    assert!(matches!(result, Err(DomainError::Transport(_))));
}

#[tokio::test]
async fn login_posts_credentials_as_form() {
    let server = MockServer::start().await;
    let forum = Forum::new(&server.uri()).unwrap();

    Mock::given(method("POST"))
        .and(path("/member.php"))
        .and(query_param("mod", "logging"))
        .and(query_param("action", "login"))
        .and(body_string_contains("username=user1"))
        .and(body_string_contains("password=pass1"))
        .and(body_string_contains("questionid=0"))
        .and(header("referer", forum.sign_in_page_url().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string("欢迎您回来"))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(Some(forum.sign_in_page_url()));
    let account = Account::new("user1", "pass1").unwrap();
    let body = client.post_login(&forum, &account).await.unwrap();

    assert!(body.contains("欢迎您回来"));
}

#[tokio::test]
async fn submit_posts_form_fields_to_ajax_endpoint() {
    let server = MockServer::start().await;
    let forum = Forum::new(&server.uri()).unwrap();

    Mock::given(method("POST"))
        .and(path("/plugin.php"))
        .and(query_param("id", "dc_signin:sign"))
        .and(query_param("inajax", "1"))
        .and(body_string_contains("formhash=abc"))
        .and(body_string_contains("emotid=1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("签到成功"))
        .expect(1)
        .mount(&server)
        .await;

    let form: FormData = vec![("formhash", "abc")].into_iter().collect();
    let form = form.with_check_in_fields();

    let client = fast_client(None);
    let body = client.submit_sign_in(&forum, &form).await.unwrap();

    assert_eq!(body, "签到成功");
}
