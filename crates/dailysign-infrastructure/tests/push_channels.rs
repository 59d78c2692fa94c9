/// ServerChan and Bark senders against a local mock server
use std::collections::BTreeMap;
use std::time::Duration;

use dailysign_domain::notification::{NotificationMessage, NotificationSender};
use dailysign_infrastructure::notification::{BarkSender, ServerChanSender};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn delivered() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": 0,
        "data": {"errno": 0, "error": "SUCCESS", "pushid": "1"}
    }))
}

#[tokio::test]
async fn server_chan_posts_title_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/SCT123.send"))
        .and(body_string_contains("text="))
        .and(body_string_contains("desp="))
        .respond_with(delivered())
        .expect(1)
        .mount(&server)
        .await;

    let sender = ServerChanSender::new("SCT123")
        .unwrap()
        .with_endpoint(server.uri());
    let lines = vec!["🎯账号 user1: 签到成功".to_string()];

    assert!(sender.push(&lines).await);
}

#[tokio::test]
async fn server_chan_retries_rejected_push() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/SCT123.send"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 40001, "message": "bad"})),
        )
        .expect(3)
        .mount(&server)
        .await;

    let sender = ServerChanSender::new("SCT123")
        .unwrap()
        .with_endpoint(server.uri())
        .with_retry(3, Duration::ZERO);

    assert!(!sender.push(&["line".to_string()]).await);
}

#[tokio::test]
async fn server_chan_stops_after_first_delivery() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/SCT123.send"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/SCT123.send"))
        .respond_with(delivered())
        .expect(1)
        .mount(&server)
        .await;

    let sender = ServerChanSender::new("SCT123")
        .unwrap()
        .with_endpoint(server.uri())
        .with_retry(3, Duration::ZERO);

    assert!(sender.push(&["line".to_string()]).await);
}

#[tokio::test]
async fn server_chan_blank_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(delivered())
        .expect(0)
        .mount(&server)
        .await;

    let sender = ServerChanSender::new("")
        .unwrap()
        .with_endpoint(server.uri());
    assert!(!sender.push(&["line".to_string()]).await);
}

#[tokio::test]
async fn server_chan_sender_trait_reports_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let sender = ServerChanSender::new("SCT123")
        .unwrap()
        .with_endpoint(server.uri())
        .with_retry(1, Duration::ZERO);
    let message = NotificationMessage::summary(&["line".to_string()]);

    assert!(sender.send(&message).await.is_err());
}

#[tokio::test]
async fn bark_sends_single_get_with_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/devkey/title/body"))
        .and(query_param("badge", "1"))
        .and(query_param("level", "passive"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 200, "message": "success", "timestamp": 1})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut params = BTreeMap::new();
    params.insert("badge".to_string(), "1".to_string());
    params.insert("level".to_string(), "passive".to_string());
    let sender = BarkSender::new(format!("{}/devkey/", server.uri()))
        .unwrap()
        .with_params(params);

    let response = sender.push("title", "body").await.unwrap();
    assert_eq!(response["code"], 200);
}

#[tokio::test]
async fn bark_returns_rejection_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 400, "message": "bad key"})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let sender = BarkSender::new(format!("{}/devkey/", server.uri())).unwrap();

    let response = sender.push("title", "body").await.unwrap();
    assert_eq!(response["message"], "bad key");

    let message = NotificationMessage::new("title", "body");
    assert!(sender.send(&message).await.is_err());
}

#[tokio::test]
async fn bark_blank_base_url_sends_nothing() {
    let sender = BarkSender::new("   ").unwrap();
    assert!(sender.push("title", "body").await.is_none());
}
