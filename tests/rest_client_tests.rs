//! Integration tests for the REST client against a mock HTTP server.
//!
//! Wiremock only serves plain HTTP, which conveniently exercises the
//! OAuth 1.0a signed-query path; the HTTPS header-auth path is covered by
//! the request-building unit tests inside the crate.

use woocommerce_rest::{QueryParams, RequestBody, RequestMethod, RequestSpec, RestClient};

use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn wc_client(server: &MockServer) -> RestClient {
    RestClient::new(&format!("{}/wp-json/wc/v3", server.uri()), "ck_x", "cs_y").unwrap()
}

#[tokio::test]
async fn test_http_get_is_signed_with_oauth_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .and(query_param("oauth_consumer_key", "ck_x"))
        .and(query_param("oauth_signature_method", "HMAC-SHA256"))
        .and(query_param("oauth_version", "1.0"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"id":1}]"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = wc_client(&server);
    let body = client
        .get("products", Some(QueryParams::from([("page", "2")])), None)
        .await
        .unwrap();
    assert_eq!(body, r#"[{"id":1}]"#);

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap();
    assert!(query.contains("oauth_nonce="));
    assert!(query.contains("oauth_timestamp="));
    assert!(query.contains("oauth_signature="));
}

#[tokio::test]
async fn test_endpoint_path_is_lowercased() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let client = wc_client(&server);
    let body = client.get("Products", None, None).await.unwrap();
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn test_error_status_still_returns_body_text() {
    let server = MockServer::start().await;
    let error_body = r#"{"code":"woocommerce_rest_term_invalid","message":"Resource does not exist.","data":{"status":404}}"#;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/999"))
        .respond_with(ResponseTemplate::new(404).set_body_string(error_body))
        .mount(&server)
        .await;

    let client = wc_client(&server);
    let body = client.get("products/999", None, None).await.unwrap();
    assert_eq!(body, error_body);
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/wp-json/wc/v3/products"))
        .and(body_json(serde_json::json!({"name": "Hoodie"})))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":7,"name":"Hoodie"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = wc_client(&server);
    let body = client
        .post(
            "products",
            &serde_json::json!({"name": "Hoodie"}),
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(body, r#"{"id":7,"name":"Hoodie"}"#);
}

#[tokio::test]
async fn test_delete_with_body_sends_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/wp-json/wc/v3/products/batch"))
        .and(body_json(serde_json::json!({"delete": [1, 2]})))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"delete":[]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = wc_client(&server);
    let body = client
        .delete_with_body(
            "products/batch",
            &serde_json::json!({"delete": [1, 2]}),
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(body, r#"{"delete":[]}"#);
}

#[tokio::test]
async fn test_head_request_via_request_spec() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/wp-json/wc/v3/products"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = wc_client(&server);
    let body = client
        .send(RequestSpec::new(RequestMethod::Head, "products"))
        .await
        .unwrap();
    assert_eq!(body, "");
}

#[tokio::test]
async fn test_file_upload_sends_raw_body_with_content_disposition() {
    let server = MockServer::start().await;

    let file_path = std::env::temp_dir().join(format!("wc-upload-{}.png", std::process::id()));
    tokio::fs::write(&file_path, "fake image bytes")
        .await
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/wp-json/wc/v3/media"))
        .and(header(
            "content-disposition",
            "attachment; filename=logo.png",
        ))
        .and(body_string_contains("fake image bytes"))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":11}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = wc_client(&server);
    let spec = RequestSpec::new(RequestMethod::Post, "media")
        .params(QueryParams::from([
            ("path", file_path.to_str().unwrap()),
            ("name", "logo.png"),
        ]))
        .body(RequestBody::FileUpload);
    let body = client.send(spec).await.unwrap();
    assert_eq!(body, r#"{"id":11}"#);

    tokio::fs::remove_file(&file_path).await.unwrap();
}

#[tokio::test]
async fn test_jwt_login_happens_once_and_sets_bearer_header() {
    let server = MockServer::start().await;

    // The login exchange must run exactly once, despite two API calls.
    Mock::given(method("POST"))
        .and(path("/jwt-auth/v1/token/"))
        .and(body_string_contains("username=ck_x"))
        .and(body_string_contains("password=cs_y"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"token":"jwt-token-value","user_email":"admin@store.test","user_nicename":"admin","user_display_name":"Admin"}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wp/v2/posts"))
        .and(header("authorization", "Bearer jwt-token-value"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(2)
        .mount(&server)
        .await;

    let client = RestClient::new(
        &format!("{}/jwt-auth/v1/token", server.uri()),
        "ck_x",
        "cs_y",
    )
    .unwrap();

    assert_eq!(client.get("posts", None, None).await.unwrap(), "[]");
    assert_eq!(client.get("posts", None, None).await.unwrap(), "[]");
    assert_eq!(client.session().jwt().unwrap().token, "jwt-token-value");
}

#[tokio::test]
async fn test_failed_jwt_login_is_retried_on_next_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/jwt-auth/v1/token/"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_string(r#"{"code":"jwt_auth_failed","message":"Invalid Credentials."}"#),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = RestClient::new(
        &format!("{}/jwt-auth/v1/token", server.uri()),
        "ck_x",
        "bad",
    )
    .unwrap();

    assert!(client.get("posts", None, None).await.is_err());
    // Nothing was cached, so the next call performs a fresh login.
    assert!(client.get("posts", None, None).await.is_err());
    assert!(client.session().jwt().is_none());
}

#[tokio::test]
async fn test_wordpress_api_request_is_token_signed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(query_param("oauth_consumer_key", "ck_x"))
        .and(query_param("oauth_token", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::builder(&format!("{}/wp-json/wp/v2", server.uri()), "ck_x", "cs_y")
        .oauth_token("tok")
        .oauth_token_secret("tok_secret")
        .build()
        .unwrap();

    assert_eq!(client.get("posts", None, None).await.unwrap(), "[]");
}
