use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use server::{AuthConfig, JwtProvider, ServerState};

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await;
    let state = ServerState {
        engine: Arc::new(engine),
        jwt: Arc::new(JwtProvider::new(&AuthConfig {
            secret: "test-secret".to_string(),
            issuer: "almanac".to_string(),
            audience: "almanac-users".to_string(),
            expires_in_secs: 3600,
        })),
    };
    server::router(state, &["http://localhost:3000".to_string()])
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(body) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn sign_up(app: &Router, username: &str) -> String {
    let response = send(
        app,
        "POST",
        "/user/signUp",
        None,
        Some(json!({"username": username, "password": "triforce"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await["token"].as_str().unwrap().to_string()
}

async fn login(app: &Router, username: &str, password: &str) -> Response {
    send(
        app,
        "POST",
        "/user/login",
        None,
        Some(json!({"username": username, "password": password})),
    )
    .await
}

fn bracket(over: f64, not_over: Option<f64>) -> Value {
    json!({
        "year": 2020,
        "maritalStatus": "Single",
        "payPeriod": "Weekly",
        "over": over,
        "notOver": not_over,
        "plus": 0.0,
        "percent": 10.0,
        "nonTaxable": 0.0
    })
}

#[tokio::test]
async fn health_is_public() {
    let app = app().await;
    let response = send(&app, "GET", "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Server is up and running");
}

#[tokio::test]
async fn sign_up_rejects_blank_and_duplicate_users() {
    let app = app().await;
    sign_up(&app, "link").await;

    let duplicate = send(
        &app,
        "POST",
        "/user/signUp",
        None,
        Some(json!({"username": "link", "password": "again"})),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let blank = send(
        &app,
        "POST",
        "/user/signUp",
        None,
        Some(json!({"username": " ", "password": "x"})),
    )
    .await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_returns_token_in_body_and_header() {
    let app = app().await;
    sign_up(&app, "link").await;

    let wrong = send(
        &app,
        "POST",
        "/user/login",
        None,
        Some(json!({"username": "link", "password": "ganon"})),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(wrong).await;
    assert_eq!(body["reason"], "NoUserFound");
    assert_eq!(body["path"], "/user/login");
    assert_eq!(body["status"], 401);

    let ok = send(
        &app,
        "POST",
        "/user/login",
        None,
        Some(json!({"username": "link", "password": "triforce"})),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);
    let header_token = ok.headers()["x-auth-token"].to_str().unwrap().to_string();
    let body = json_body(ok).await;
    assert_eq!(body["token"], header_token.as_str());

    let account = send(&app, "GET", "/user/account", Some(&header_token), None).await;
    assert_eq!(account.status(), StatusCode::OK);
    let account = json_body(account).await;
    assert_eq!(account["username"], "link");
    assert!(account.get("password").is_none());
}

#[tokio::test]
async fn resources_require_a_valid_token() {
    let app = app().await;

    let missing = send(&app, "GET", "/images", None, None).await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(missing).await;
    assert_eq!(body["reason"], "General");
    assert_eq!(body["path"], "/images");

    let garbage = send(&app, "GET", "/images", Some("not-a-token"), None).await;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(garbage).await["reason"], "InvalidJwt");

    // Query tokens are only for websocket upgrades.
    let token = sign_up(&app, "link").await;
    let via_query = send(&app, "GET", &format!("/images?token={token}"), None, None).await;
    assert_eq!(via_query.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(via_query).await["reason"], "General");

    let via_header = send(&app, "GET", "/images", Some(&token), None).await;
    assert_eq!(via_header.status(), StatusCode::OK);
}

#[tokio::test]
async fn bracket_crud_over_http() {
    let app = app().await;
    let token = sign_up(&app, "link").await;
    let token = Some(token.as_str());

    let empty = send(&app, "GET", "/federalIncomeTax", token, None).await;
    assert_eq!(empty.status(), StatusCode::OK);
    assert_eq!(json_body(empty).await, json!({"items": []}));

    let created = send(&app, "POST", "/federalIncomeTax", token, Some(bracket(1.0, Some(5.0)))).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = json_body(created).await;
    let id = created["id"].as_i64().unwrap();
    assert!(created["dateCreated"].as_i64().unwrap() > 0);

    let overlap = send(&app, "POST", "/federalIncomeTax", token, Some(bracket(2.0, None))).await;
    assert_eq!(overlap.status(), StatusCode::CONFLICT);
    assert!(json_body(overlap).await["error"].is_string());

    let invalid = send(&app, "POST", "/federalIncomeTax", token, Some(bracket(9.0, Some(3.0)))).await;
    assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let upserted = send(&app, "PUT", "/federalIncomeTax", token, Some(bracket(5.0, None))).await;
    assert_eq!(upserted.status(), StatusCode::CREATED);

    let mut changed = created.clone();
    changed["percent"] = json!(12.0);
    let updated = send(&app, "PUT", "/federalIncomeTax", token, Some(changed)).await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(json_body(updated).await["percent"], 12.0);

    // Brackets are fetched and deleted by year.
    let single = send(&app, "GET", "/federalIncomeTax/2020", token, None).await;
    assert_eq!(single.status(), StatusCode::OK);
    assert_eq!(json_body(single).await["id"], id);

    let list = json_body(send(&app, "GET", "/federalIncomeTax", token, None).await).await;
    assert_eq!(list["items"].as_array().unwrap().len(), 2);

    let deleted = send(&app, "DELETE", "/federalIncomeTax/2020", token, None).await;
    assert_eq!(deleted.status(), StatusCode::OK);
    let gone = send(&app, "GET", "/federalIncomeTax/2020", token, None).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    let again = send(&app, "DELETE", "/federalIncomeTax/2020", token, None).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    let mut ghost = created;
    ghost["id"] = json!(999);
    let missing = send(&app, "PUT", "/federalIncomeTax", token, Some(ghost)).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn owned_rows_stay_with_their_owner() {
    let app = app().await;
    let link = sign_up(&app, "link").await;
    let zelda = sign_up(&app, "zelda").await;

    let created = send(&app, "POST", "/categories", Some(&link), Some(json!({"name": "Rent"}))).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = json_body(created).await["id"].as_i64().unwrap();

    let theirs = json_body(send(&app, "GET", "/categories", Some(&zelda), None).await).await;
    assert_eq!(theirs, json!({"items": []}));

    let peek = send(&app, "GET", &format!("/categories/{id}"), Some(&zelda), None).await;
    assert_eq!(peek.status(), StatusCode::NOT_FOUND);

    let same_name = send(&app, "POST", "/categories", Some(&zelda), Some(json!({"name": "rent"}))).await;
    assert_eq!(same_name.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn account_update_is_limited_to_the_caller() {
    let app = app().await;
    let token = sign_up(&app, "link").await;
    let account = json_body(send(&app, "GET", "/user/account", Some(&token), None).await).await;

    let wrong = send(
        &app,
        "PUT",
        "/user",
        Some(&token),
        Some(json!({"uuid": uuid::Uuid::new_v4(), "name": "Ganon"})),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(wrong).await["reason"], "WrongUser");

    let ok = send(
        &app,
        "PUT",
        "/user",
        Some(&token),
        Some(json!({"uuid": account["uuid"], "name": "Hero"})),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(json_body(ok).await["name"], "Hero");
}

#[tokio::test]
async fn medicare_reads_by_id_and_deletes_by_year() {
    let app = app().await;
    let token = sign_up(&app, "link").await;
    let token = Some(token.as_str());

    let rate = json!({
        "year": 2007,
        "percent": 1.45,
        "additionalPercent": 0.9,
        "limits": [{"maritalStatus": "Single", "amount": 200000}]
    });
    let created = send(&app, "POST", "/medicare", token, Some(rate)).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = json_body(created).await["id"].as_i64().unwrap();

    let by_id = send(&app, "GET", &format!("/medicare/{id}"), token, None).await;
    assert_eq!(by_id.status(), StatusCode::OK);
    assert_eq!(json_body(by_id).await["year"], 2007);
    let by_year = send(&app, "GET", "/medicare/2007", token, None).await;
    assert_eq!(by_year.status(), StatusCode::NOT_FOUND);

    let deleted = send(&app, "DELETE", "/medicare/2007", token, None).await;
    assert_eq!(deleted.status(), StatusCode::OK);
    let missing = send(&app, "DELETE", "/medicare/2099", token, None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_requests_get_json_errors() {
    let app = app().await;
    let token = sign_up(&app, "link").await;

    let wrong_type = send(&app, "POST", "/images", Some(&token), Some(json!({"name": 5}))).await;
    assert_eq!(wrong_type.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json_body(wrong_type).await["error"].is_string());

    let bad_key = send(&app, "GET", "/images/abc", Some(&token), None).await;
    assert_eq!(bad_key.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(bad_key).await["error"].is_string());

    let request = Request::builder()
        .method("POST")
        .uri("/user/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let syntax = app.clone().oneshot(request).await.unwrap();
    assert_eq!(syntax.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(syntax).await["error"].is_string());
}

#[tokio::test]
async fn passwords_are_matched_verbatim() {
    let app = app().await;
    let created = send(
        &app,
        "POST",
        "/user/signUp",
        None,
        Some(json!({"username": "link", "password": " secret "})),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    assert_eq!(login(&app, "link", " secret ").await.status(), StatusCode::OK);
    assert_eq!(
        login(&app, "link", "secret").await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn occurrences_must_point_at_the_callers_bills() {
    let app = app().await;
    let link = sign_up(&app, "link").await;
    let zelda = sign_up(&app, "zelda").await;

    let bill = send(
        &app,
        "POST",
        "/bills",
        Some(&link),
        Some(json!({"name": "Rent", "amount": "900.00", "payoffAmount": null, "color": null})),
    )
    .await;
    assert_eq!(bill.status(), StatusCode::CREATED);
    let bill_id = json_body(bill).await["id"].as_i64().unwrap();

    let occurrence = json!({
        "billId": bill_id,
        "amount": "900.00",
        "amountLeft": "900.00",
        "dueDate": 1_700_000_000_000_i64,
        "every": "Monthly"
    });
    let foreign = send(&app, "POST", "/occurrences", Some(&zelda), Some(occurrence.clone())).await;
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);

    let own = send(&app, "POST", "/occurrences", Some(&link), Some(occurrence)).await;
    assert_eq!(own.status(), StatusCode::CREATED);

    let stray_category = send(
        &app,
        "POST",
        "/bills",
        Some(&link),
        Some(json!({"name": "Water", "amount": "30", "payoffAmount": null, "color": null, "categoryIds": [42]})),
    )
    .await;
    assert_eq!(stray_category.status(), StatusCode::NOT_FOUND);
}
