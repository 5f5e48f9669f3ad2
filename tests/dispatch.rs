use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use resource_dispatch::{
    app, async_trait, AcceptsInput, AppError, AppState, InputFiller, RequestSource, ResourceContext,
    ResourceOutcome, ResourceRegistry, ResourceResult, RestResource, ServerConfig,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower::ServiceExt;

#[derive(Debug, Default, Serialize, Deserialize)]
struct OrderInput {
    name: String,
    qty: i64,
}

#[derive(Default)]
struct Order {
    input: OrderInput,
}

#[async_trait]
impl RestResource for Order {
    async fn index(&mut self, _: &ResourceContext) -> ResourceResult {
        json!([{"id": "1", "name": "widget"}]).into()
    }

    async fn view(&mut self, ctx: &ResourceContext) -> ResourceResult {
        match ctx.id.as_deref() {
            Some("1") => ResourceOutcome::ok(json!({"id": "1", "name": "widget"})).into(),
            Some(id) => ResourceOutcome::error(404, format!("Order {} not found", id)).into(),
            None => ResourceOutcome::error(400, "id required").into(),
        }
    }

    async fn create(&mut self, _: &ResourceContext) -> ResourceResult {
        ResourceOutcome::created(json!({"name": self.input.name, "qty": self.input.qty})).into()
    }

    async fn update(&mut self, ctx: &ResourceContext) -> ResourceResult {
        json!({"id": ctx.id, "name": self.input.name, "qty": self.input.qty}).into()
    }

    async fn delete(&mut self, _: &ResourceContext) -> ResourceResult {
        Value::Null.into()
    }

    async fn upsert(&mut self, ctx: &ResourceContext) -> ResourceResult {
        json!({"upserted": ctx.id, "qty": self.input.qty}).into()
    }
}

impl AcceptsInput for Order {
    type Input = OrderInput;

    fn set_input_data(&mut self, input: OrderInput) {
        self.input = input;
    }
}

/// Plain resource answering every verb with a fixed label.
struct Label(&'static str);

#[async_trait]
impl RestResource for Label {
    async fn index(&mut self, _: &ResourceContext) -> ResourceResult {
        json!({ "resource": self.0 }).into()
    }
    async fn view(&mut self, _: &ResourceContext) -> ResourceResult {
        json!({ "resource": self.0 }).into()
    }
    async fn create(&mut self, _: &ResourceContext) -> ResourceResult {
        json!({ "resource": self.0 }).into()
    }
    async fn update(&mut self, _: &ResourceContext) -> ResourceResult {
        json!({ "resource": self.0 }).into()
    }
    async fn delete(&mut self, _: &ResourceContext) -> ResourceResult {
        json!({ "resource": self.0 }).into()
    }
    async fn upsert(&mut self, _: &ResourceContext) -> ResourceResult {
        json!({ "resource": self.0 }).into()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CouponInput {
    code: String,
}

#[derive(Default)]
struct Coupon {
    input: CouponInput,
}

#[async_trait]
impl RestResource for Coupon {
    async fn index(&mut self, _: &ResourceContext) -> ResourceResult {
        json!({ "code": self.input.code }).into()
    }
    async fn view(&mut self, _: &ResourceContext) -> ResourceResult {
        Value::Null.into()
    }
    async fn create(&mut self, _: &ResourceContext) -> ResourceResult {
        json!({ "code": self.input.code }).into()
    }
    async fn update(&mut self, _: &ResourceContext) -> ResourceResult {
        Value::Null.into()
    }
    async fn delete(&mut self, _: &ResourceContext) -> ResourceResult {
        Value::Null.into()
    }
    async fn upsert(&mut self, _: &ResourceContext) -> ResourceResult {
        Value::Null.into()
    }
}

impl AcceptsInput for Coupon {
    type Input = CouponInput;

    fn set_input_data(&mut self, input: CouponInput) {
        self.input = input;
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PageInput {
    limit: Option<u32>,
    active: Option<bool>,
    cursor: Option<String>,
}

/// Echoes its bound paging input.
#[derive(Default)]
struct Page {
    input: PageInput,
}

#[async_trait]
impl RestResource for Page {
    async fn index(&mut self, _: &ResourceContext) -> ResourceResult {
        serde_json::to_value(&self.input).unwrap_or(Value::Null).into()
    }
    async fn view(&mut self, _: &ResourceContext) -> ResourceResult {
        Value::Null.into()
    }
    async fn create(&mut self, _: &ResourceContext) -> ResourceResult {
        Value::Null.into()
    }
    async fn update(&mut self, _: &ResourceContext) -> ResourceResult {
        Value::Null.into()
    }
    async fn delete(&mut self, _: &ResourceContext) -> ResourceResult {
        Value::Null.into()
    }
    async fn upsert(&mut self, _: &ResourceContext) -> ResourceResult {
        Value::Null.into()
    }
}

impl AcceptsInput for Page {
    type Input = PageInput;

    fn set_input_data(&mut self, input: PageInput) {
        self.input = input;
    }
}

/// Reads the raw body as the coupon code, uppercased.
struct CouponFiller;

impl InputFiller<CouponInput> for CouponFiller {
    fn fill(&self, input: &mut CouponInput, source: RequestSource<'_>) -> Result<(), AppError> {
        input.code = String::from_utf8_lossy(source.body).to_uppercase();
        Ok(())
    }
}

fn registry() -> ResourceRegistry {
    let mut registry = ResourceRegistry::new();
    registry
        .register_with_input("shop/Order", Order::default)
        .register("shop/Customer/Customer", || Label("customer"))
        .register("shop/Item", || Label("item"))
        .register("shop/Item/Item", || Label("nested item"))
        .register("Ping", || Label("ping"))
        .register_with_input("shop/Coupon", Coupon::default)
        .register_with_input("shop/Page", Page::default)
        .register_filler::<CouponInput, _>(CouponFiller);
    registry
}

fn test_app() -> Router {
    app(AppState::new(registry()), &ServerConfig::default())
}

async fn send(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn create_binds_body_ignoring_case_and_returns_201() {
    let (status, body) = send(
        test_app(),
        Method::POST,
        "/api/v1/resource?resourceDir=shop&resourceName=order",
        r#"{"Name":"x","Qty":5}"#,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"name": "x", "qty": 5}));
}

#[tokio::test]
async fn unmatched_fields_come_from_query() {
    let (status, body) = send(
        test_app(),
        Method::POST,
        "/api/v1/resource?resourceDir=shop&resourceName=ORDER&QTY=7&name=ignored",
        r#"{"name":"from body"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"name": "from body", "qty": 7}));
}

#[tokio::test]
async fn optional_fields_take_their_type_from_query() {
    let (status, body) = send(
        test_app(),
        Method::GET,
        "/api/v1/resource?resourceDir=shop&resourceName=page&Limit=5&active=true&cursor=5",
        "",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"limit": 5, "active": true, "cursor": "5"}));
}

#[tokio::test]
async fn colliding_keys_bind_the_last_in_document_order() {
    let (status, body) = send(
        test_app(),
        Method::POST,
        "/api/v1/resource?resourceDir=shop&resourceName=order&qty=1&QTY=2",
        r#"{"name":"first","NAME":"last"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"name": "last", "qty": 2}));
}

#[tokio::test]
async fn ill_typed_field_reports_details() {
    let (status, body) = send(
        test_app(),
        Method::POST,
        "/api/v1/resource?resourceDir=shop&resourceName=order",
        r#"{"qty":"many"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_input");
    assert_eq!(body["error"]["message"], "Invalid input data.");
    assert!(body["error"]["details"]["reason"].as_str().unwrap().contains("many"));
}

#[tokio::test]
async fn raw_result_uses_200_for_update_and_sees_path_id() {
    let (status, body) = send(
        test_app(),
        Method::PATCH,
        "/api/v1/resource/42?resourceDir=shop&resourceName=order",
        r#"{"qty":2}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": "42", "name": "", "qty": 2}));
}

#[tokio::test]
async fn put_dispatches_to_upsert() {
    let (status, body) = send(
        test_app(),
        Method::PUT,
        "/api/v1/resource/9?resourceDir=shop&resourceName=order",
        r#"{"qty":1}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"upserted": "9", "qty": 1}));
}

#[tokio::test]
async fn null_result_is_sent_empty() {
    let (status, body) = send(
        test_app(),
        Method::DELETE,
        "/api/v1/resource?resourceDir=shop&resourceName=order",
        "",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn view_success_and_handler_error_status() {
    let (status, body) = send(
        test_app(),
        Method::GET,
        "/api/v1/resource/1?resourceDir=shop&resourceName=order",
        "",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "widget");

    let (status, body) = send(
        test_app(),
        Method::GET,
        "/api/v1/resource/2?resourceDir=shop&resourceName=order",
        "",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["message"], "Order 2 not found");
}

#[tokio::test]
async fn nested_candidate_is_found() {
    let (status, body) = send(
        test_app(),
        Method::GET,
        "/api/v1/resource?resourceDir=Shop&resourceName=customer",
        "",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"resource": "customer"}));
}

#[tokio::test]
async fn flat_candidate_is_tried_first() {
    let (_, body) = send(
        test_app(),
        Method::GET,
        "/api/v1/resource?resourceDir=shop&resourceName=item",
        "",
    )
    .await;
    assert_eq!(body, json!({"resource": "item"}));
}

#[tokio::test]
async fn resource_without_dir() {
    let (status, body) = send(test_app(), Method::GET, "/api/v1/resource?resourceName=ping", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"resource": "ping"}));
}

#[tokio::test]
async fn missing_resource_name_is_bad_request() {
    for uri in [
        "/api/v1/resource?resourceDir=shop",
        "/api/v1/resource?resourceDir=shop&resourceName=",
        "/api/v1/resource?resourceDir=shop&resourceName=--",
    ] {
        let (status, body) = send(test_app(), Method::POST, uri, "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"]["message"], "Bad Request");
    }
}

#[tokio::test]
async fn unknown_resource_is_not_implemented() {
    let (status, body) = send(
        test_app(),
        Method::GET,
        "/api/v1/resource?resourceDir=shop&resourceName=invoice",
        "",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body["error"]["message"], "Resource is absent.");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (status, body) = send(
        test_app(),
        Method::POST,
        "/api/v1/resource?resourceDir=shop&resourceName=order",
        "{bad",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Invalid JSON in the body.");
}

#[tokio::test]
async fn plain_resource_ignores_malformed_body() {
    let (status, _) = send(
        test_app(),
        Method::POST,
        "/api/v1/resource?resourceName=ping",
        "{bad",
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn filler_replaces_default_binding() {
    let (status, body) = send(
        test_app(),
        Method::POST,
        "/api/v1/resource?resourceDir=shop&resourceName=coupon&code=ignored",
        "save10",
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"code": "SAVE10"}));
}

#[tokio::test]
async fn verb_without_route_is_rejected() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/resource/1/extra?resourceName=ping")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let config = ServerConfig {
        body_limit_bytes: 16,
        ..ServerConfig::default()
    };
    let app = app(AppState::new(registry()), &config);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/resource?resourceDir=shop&resourceName=order")
        .header("content-length", "64")
        .body(Body::from("x".repeat(64)))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn health_is_served_at_root() {
    let (status, body) = send(test_app(), Method::GET, "/health", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}
