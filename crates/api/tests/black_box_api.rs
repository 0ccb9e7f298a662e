use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = pointledger_api::app::build_app();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn patch_amount(
    client: &reqwest::Client,
    base_url: &str,
    path: &str,
    amount: serde_json::Value,
) -> reqwest::Response {
    client
        .patch(format!("{}{}", base_url, path))
        .json(&json!({ "amount": amount }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn charge_use_query_history_full_flow() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Charge 1000 points.
    let res = patch_amount(&client, &srv.base_url, "/points/1/charge", json!(1000)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["user_id"], 1);
    assert_eq!(body["balance"], 1000);
    assert_eq!(body["amount"], 1000);
    assert_eq!(body["type"], "CHARGE");

    // Use 500 of them.
    let res = patch_amount(&client, &srv.base_url, "/points/1/use", json!(500)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["balance"], 500);
    assert_eq!(body["type"], "USE");

    // Balance reflects both.
    let res = client
        .get(format!("{}/points/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["balance"], 500);

    // History holds both records, in order.
    let res = client
        .get(format!("{}/points/1/histories", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["type"], "CHARGE");
    assert_eq!(items[0]["amount"], 1000);
    assert_eq!(items[1]["type"], "USE");
    assert_eq!(items[1]["amount"], 500);
}

#[tokio::test]
async fn a_fresh_user_has_zero_balance_and_empty_history() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/points/99", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["balance"], 0);

    let res = client
        .get(format!("{}/points/99/histories", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn validation_errors_carry_stable_codes() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let cases = [
        ("/points/0/charge", json!(1000), "invalid_user_id"),
        ("/points/1000000001/charge", json!(1000), "user_id_too_large"),
        ("/points/1/charge", json!(12.5), "non_integer_amount"),
        ("/points/1/charge", json!(-100), "negative_amount"),
        ("/points/1/charge", json!(1000000001i64), "amount_too_large"),
        ("/points/1/charge", json!(999), "below_minimum_charge"),
        ("/points/1/use", json!(0), "zero_amount"),
    ];

    for (path, amount, code) in cases {
        let res = patch_amount(&client, &srv.base_url, path, amount).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{path} {code}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], code, "{path}");
        assert!(!body["message"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn overdraw_and_balance_cap_are_unprocessable() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = patch_amount(&client, &srv.base_url, "/points/1/use", json!(100)).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "insufficient_balance");

    let res = patch_amount(&client, &srv.base_url, "/points/1/charge", json!(1000000)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = patch_amount(&client, &srv.base_url, "/points/1/charge", json!(1000)).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "max_balance_exceeded");

    // Balance is unchanged by the rejected charge.
    let res = client
        .get(format!("{}/points/1", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["balance"], 1000000);
}

#[tokio::test]
async fn concurrent_uses_through_http_cannot_overdraw() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = patch_amount(&client, &srv.base_url, "/points/1/charge", json!(1000)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let (first, second) = tokio::join!(
        patch_amount(&client, &srv.base_url, "/points/1/use", json!(800)),
        patch_amount(&client, &srv.base_url, "/points/1/use", json!(800)),
    );

    let statuses = [first.status(), second.status()];
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::OK).count(),
        1,
        "exactly one of two competing uses may win"
    );
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::UNPROCESSABLE_ENTITY)
            .count(),
        1
    );

    let res = client
        .get(format!("{}/points/1", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["balance"], 200);
}
