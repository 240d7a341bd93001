use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use code_runner_server::{
    config::Config, create_app, database::Database, handlers::AppState,
    services::remote_compiler::RemoteCompiler,
};

const WEBHOOK_AGENT: &str = "PluginLab-Webhook-Delivery";

fn test_config(compiler_url: &str) -> Config {
    Config {
        // Lazy pool: never dialed by the endpoints under test here.
        database_url: "postgresql://localhost/code_runner_test".to_string(),
        port: 0,
        plugin_url: "https://plugin.test".to_string(),
        compiler_url: format!("{compiler_url}/v1/execute"),
        compiler_credit_url: format!("{compiler_url}/v1/credit-spent"),
        compiler_client_id: "client-id".to_string(),
        compiler_client_secret: "client-secret".to_string(),
        webhook_user_agent: WEBHOOK_AGENT.to_string(),
        interpreter_bin: "python3".to_string(),
        static_dir: "./static".to_string(),
    }
}

fn test_app(compiler_url: &str) -> Router {
    let config = test_config(compiler_url);
    let database = Database::connect_lazy(&config.database_url).unwrap();
    let compiler = RemoteCompiler::new(&config);
    create_app(AppState {
        database,
        compiler,
        config,
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn empty_code_is_rejected_without_upstream_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/execute"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = test_app(&server.uri());
    let response = app
        .oneshot(json_post(
            "/run_code",
            json!({ "code": "   \n  ", "language": "java" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "Code is empty.Please enter the code and try again."
    );
}

#[tokio::test]
async fn remote_execution_reply_is_decorated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/execute"))
        .and(body_partial_json(json!({
            "script": "public class Main {}",
            "language": "java",
            "compileOnly": true,
            "versionIndex": "0"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": "compiled\n",
            "statusCode": 200,
            "memory": "10240",
            "cpuTime": "0.02"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = test_app(&server.uri());
    let response = app
        .oneshot(json_post(
            "/run_code",
            json!({
                "code": "public class Main {}",
                "language": "java",
                "compileOnly": true
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["output"], "compiled\n");
    assert_eq!(body["id"].as_str().unwrap().len(), 8);
    assert!(body["support"].as_str().unwrap().contains("Discord"));
    assert!(body["extra_response_instructions"]
        .as_str()
        .unwrap()
        .contains("Markdown"));
}

#[tokio::test]
async fn upstream_failure_maps_to_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/execute"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = test_app(&server.uri());
    let response = app
        .oneshot(json_post(
            "/run_code",
            json!({ "code": "int main() {}", "language": "c" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Compiler service"));
}

#[tokio::test]
async fn credit_limit_reports_usage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/credit-spent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "used": 137 })))
        .mount(&server)
        .await;

    let app = test_app(&server.uri());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/credit_limit")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["credits"], 137);
}

#[tokio::test]
async fn webhooks_reject_unknown_user_agent() {
    for uri in ["/user_create", "/user_update", "/user_quota"] {
        let app = test_app("http://unused.test");
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::USER_AGENT, "curl/8.0")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
        let body = body_json(response).await;
        assert_eq!(body["status"], 403);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid user agent"));
    }
}

#[tokio::test]
async fn webhook_malformed_payload_is_bad_request() {
    let app = test_app("http://unused.test");
    let request = Request::builder()
        .method("POST")
        .uri("/user_create")
        .header(header::USER_AGENT, WEBHOOK_AGENT)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"id\": 42}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("An error occurred"));
}

#[tokio::test]
async fn identical_update_snapshots_skip_the_store() {
    // The pool points at an unreachable database, so any attempted write
    // would surface as a 500. An identical before/after pair must succeed
    // without touching the store at all.
    let snapshot = json!({
        "id": "user_1",
        "createdAtMs": 1_688_400_000_000i64,
        "updatedAtMs": 1_688_400_000_000i64,
        "isVerified": true,
        "auth": { "email": "u@example.com", "hasPassword": false }
    });
    let app = test_app("http://unused.test");
    let request = Request::builder()
        .method("POST")
        .uri("/user_update")
        .header(header::USER_AGENT, WEBHOOK_AGENT)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "before": snapshot, "after": snapshot }).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User updated successfully");
}

#[tokio::test]
async fn save_code_requires_filename_and_code() {
    let app = test_app("http://unused.test");
    let response = app
        .oneshot(json_post("/save_code", json!({ "code": "print(1)" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "filename or code not provided");
}

#[tokio::test]
async fn upload_requires_filename_and_data() {
    let app = test_app("http://unused.test");
    let response = app
        .oneshot(json_post("/upload", json!({ "filename": "notes.txt" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn help_lists_support_channels() {
    let app = test_app("http://unused.test");
    let response = app
        .oneshot(Request::builder().uri("/help").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn root_redirects_to_website() {
    let app = test_app("http://unused.test");
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert!(response.headers().contains_key(header::LOCATION));
}

#[tokio::test]
async fn static_files_carry_one_year_cache() {
    let app = test_app("http://unused.test");
    let response = app
        .oneshot(
            Request::builder()
                .uri("/robots.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "public, max-age=31536000"
    );
}

#[tokio::test]
async fn plugin_manifest_is_served() {
    let app = test_app("http://unused.test");
    let response = app
        .oneshot(
            Request::builder()
                .uri("/.well-known/ai-plugin.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["schema_version"], "v1");
}

// Requires a python3 binary on PATH; run with `cargo test -- --ignored`.
#[tokio::test]
#[ignore]
async fn local_execution_captures_stdout() {
    let app = test_app("http://unused.test");
    let response = app
        .oneshot(json_post(
            "/run_code",
            json!({ "code": "print(7 * 6)", "language": "python" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["result"]["output"].as_str().unwrap().trim(), "42");
}
