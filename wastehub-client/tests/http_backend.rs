//! End-to-end tests over real HTTP.
//!
//! Starts an axum stand-in for the WasteHub backend on a random port, then
//! drives the full client stack against it: URL building, JSON bodies,
//! bearer headers, multipart encoding, status mapping and decoding all run
//! through the pooled hyper transport.

#![cfg(all(
    any(feature = "tls-ring", feature = "tls-aws-lc"),
    any(feature = "tls-native-roots", feature = "tls-webpki-roots")
))]

use std::sync::Arc;

use axum::extract::Path;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use chrono::{NaiveDate, NaiveDateTime};
use http::{HeaderMap, Method, StatusCode, header};
use wastehub_client::{
    ApiClient, ApiError, AuthApi, CredentialStore, FilePart, LabApi, MemoryCredentials, PickupApi,
    PickupRequestApi, QrApi, UserApi, NO_BODY,
};
use wastehub_core::{
    DisposalStatus, Lab, LoginRequest, ScanResult, TokenPair, UpdateLab, UserProfile,
    VerifyCodeRequest,
};

const SCAN_JPEG: &[u8] = b"\xff\xd8\xff\xe0 synthetic camera frame payload\xff\xd9";
const QR_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
];

fn canned_scan_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 18)
        .unwrap()
        .and_hms_opt(16, 54, 30)
        .unwrap()
}

async fn login(Json(body): Json<LoginRequest>) -> Response {
    if body.email == "a@b.com" && body.password == "secret" {
        Json(TokenPair {
            access_token: "T1".to_string(),
            refresh_token: "T2".to_string(),
        })
        .into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

async fn verify_code(Json(body): Json<VerifyCodeRequest>) -> StatusCode {
    if body.code == "123456" {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    }
}

async fn me(headers: HeaderMap) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    match authorization {
        Some("Bearer T1") => Json(UserProfile {
            id: 1,
            email: "a@b.com".to_string(),
            name: "Ada Park".to_string(),
            facility_id: Some(10),
        })
        .into_response(),
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

fn lab_fixture(id: i64) -> Lab {
    Lab {
        id,
        facility_id: 10,
        name: "Organic Chemistry Lab".to_string(),
        location: "Building A / 2F".to_string(),
    }
}

async fn list_labs() -> Json<Vec<Lab>> {
    Json(vec![lab_fixture(100), lab_fixture(101)])
}

async fn update_lab(Path(id): Path<i64>, Json(update): Json<UpdateLab>) -> Json<Lab> {
    let mut lab = lab_fixture(id);
    if let Some(name) = update.name {
        lab.name = name;
    }
    if let Some(location) = update.location {
        lab.location = location;
    }
    Json(lab)
}

/// Checks the multipart body byte for byte against the layout the client
/// promises, then answers with the canned match.
async fn scan(headers: HeaderMap, body: bytes::Bytes) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    let Some(boundary) = content_type.strip_prefix("multipart/form-data; boundary=") else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let mut expected = Vec::new();
    expected.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    expected.extend_from_slice(
        b"Content-Disposition: form-data; name=\"file\"; filename=\"scan.jpg\"\r\n",
    );
    expected.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
    expected.extend_from_slice(SCAN_JPEG);
    expected.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    if body.as_ref() != expected.as_slice() {
        return StatusCode::BAD_REQUEST.into_response();
    }

    Json(ScanResult {
        disposal_id: 201,
        status: DisposalStatus::PickedUp,
        processed_at: canned_scan_time(),
    })
    .into_response()
}

async fn cancel_pickup_request(Path(_id): Path<i64>) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn qr_image(Path(_id): Path<i64>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/png")], QR_PNG)
}

async fn status_echo(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn broken() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"unexpected":true}"#,
    )
}

fn router() -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/verify-code", post(verify_code))
        .route("/user/me", get(me))
        .route("/labs", get(list_labs))
        .route("/labs/{id}", patch(update_lab))
        .route("/pickups/scan", post(scan))
        .route("/pickup-requests/{id}", delete(cancel_pickup_request))
        .route("/qr/{id}/image", get(qr_image))
        .route("/status/{code}", get(status_echo))
        .route("/broken", get(broken))
}

/// Binds a random port, serves the stand-in backend from a background
/// thread and returns the base URL.
fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, router()).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn client(base: &str) -> ApiClient {
    ApiClient::builder(base)
        .credentials(Arc::new(MemoryCredentials::new()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_login_stores_tokens_and_me_rides_on_them() {
    let base = spawn_server();
    let store = Arc::new(MemoryCredentials::new());
    let client = ApiClient::builder(&base)
        .credentials(store.clone())
        .build()
        .unwrap();

    let pair = AuthApi::new(client.clone())
        .login("a@b.com", "secret")
        .await
        .unwrap();
    assert_eq!(pair.access_token, "T1");
    assert_eq!(pair.refresh_token, "T2");
    assert_eq!(store.access_token().as_deref(), Some("T1"));

    let profile = UserApi::new(client).me().await.unwrap();
    assert_eq!(profile.email, "a@b.com");
    assert_eq!(profile.facility_id, Some(10));
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let base = spawn_server();
    let err = AuthApi::new(client(&base))
        .login("a@b.com", "nope")
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);
}

#[tokio::test]
async fn test_stale_stored_token_is_unauthorized() {
    let base = spawn_server();
    let store = Arc::new(MemoryCredentials::with_tokens("expired", "R"));
    let client = ApiClient::builder(&base)
        .credentials(store)
        .build()
        .unwrap();
    let err = UserApi::new(client).me().await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);
}

#[tokio::test]
async fn test_verify_code_round_trips_empty_body() {
    let base = spawn_server();
    let auth = AuthApi::new(client(&base));
    auth.verify_code("a@b.com", "123456").await.unwrap();

    let err = auth.verify_code("a@b.com", "000000").await.unwrap_err();
    assert_eq!(err, ApiError::Status(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn test_get_labs_is_repeatable() {
    let base = spawn_server();
    let labs = LabApi::new(client(&base));
    let first = labs.list().await.unwrap();
    let second = labs.list().await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_patch_lab_round_trips() {
    let base = spawn_server();
    let labs = LabApi::new(client(&base));
    let update = UpdateLab {
        name: Some("Polymer Lab".to_string()),
        ..UpdateLab::default()
    };
    let lab = labs.update(100, &update).await.unwrap();
    assert_eq!(lab.id, 100);
    assert_eq!(lab.name, "Polymer Lab");
    assert_eq!(lab.location, "Building A / 2F");
}

#[tokio::test]
async fn test_multipart_scan_round_trips() {
    let base = spawn_server();
    let pickups = PickupApi::new(client(&base));
    let part = FilePart::new("scan.jpg", SCAN_JPEG.to_vec());
    let result = pickups.scan_image(part).await.unwrap();
    assert_eq!(result.disposal_id, 201);
    assert_eq!(result.status, DisposalStatus::PickedUp);
    assert_eq!(result.processed_at, canned_scan_time());
}

#[tokio::test]
async fn test_cancel_handles_204_no_content() {
    let base = spawn_server();
    let requests = PickupRequestApi::new(client(&base));
    requests.cancel(400).await.unwrap();
}

#[tokio::test]
async fn test_qr_image_returns_raw_bytes() {
    let base = spawn_server();
    let qr = QrApi::new(client(&base));
    let image = qr.image(7).await.unwrap();
    assert_eq!(image.as_ref(), QR_PNG);
    assert_eq!(&image[..4], &[0x89, 0x50, 0x4E, 0x47]);
}

#[tokio::test]
async fn test_error_statuses_pass_through_unchanged() {
    let base = spawn_server();
    let client = client(&base);
    for code in [400u16, 403, 404, 409, 500, 503] {
        let err = client
            .send_empty(Method::GET, &format!("/status/{code}"), NO_BODY, None)
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Status(StatusCode::from_u16(code).unwrap()));
    }

    let err = client
        .send_empty(Method::GET, "/status/401", NO_BODY, None)
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);
}

#[tokio::test]
async fn test_empty_success_body_is_no_data_for_typed_calls() {
    let base = spawn_server();
    let client = client(&base);

    let err = client
        .send::<(), Lab>(Method::GET, "/status/200", NO_BODY, None)
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::NoData);

    client
        .send_empty(Method::GET, "/status/200", NO_BODY, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_mismatched_json_is_a_decode_error() {
    let base = spawn_server();
    let client = client(&base);
    let err = client
        .send::<(), Lab>(Method::GET, "/broken", NO_BODY, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
