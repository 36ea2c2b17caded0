//! In-memory backend that answers like the real API.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime};
use http::request::Parts;
use http::{HeaderMap, HeaderValue, Method, Request, Response, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use wastehub_core::{
    CreatePickupRequest, CreateQr, Disposal, DisposalStatus, Facility, FacilityKind, Lab,
    LoginRequest, Pickup, PickupRequest, PickupRequestStatus, PickupStatus, QrCode,
    RefreshRequest, RegisterDisposal, RegisterFacility, RegisterLab, ScanRequest, ScanResult,
    SendCodeRequest, SignupRequest, TokenPair, UpdateDisposal, UpdateLab, UpdatePickupRequest,
    UserProfile, VerifyCodeRequest,
};

use crate::error::ApiError;

use super::Transport;

/// Code "mailed" by `/auth/send-code`.
const VERIFICATION_CODE: &str = "123456";

/// Disposal the scan endpoint recognizes when handed a label photo.
const SCAN_MATCH_ID: i64 = 201;

/// 1x1 transparent PNG served for every QR image.
const QR_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Mock backend for demos and tests: every endpoint of the real API,
/// served from memory.
///
/// Clones share one dataset, so a transport can be handed to a client and
/// inspected from the test at the same time. [`seeded`](Self::seeded) loads
/// a demo account with a small campus of labs, disposals and pickups;
/// [`new`](Self::new) starts empty, with signup as the way in.
///
/// All dates in the dataset pin to 2025-10-18 so answers stay deterministic.
#[derive(Clone)]
pub struct FixtureTransport {
    state: Arc<RwLock<FixtureState>>,
    latency: Option<Duration>,
}

impl FixtureTransport {
    /// Empty backend. No accounts, no data.
    pub fn new() -> Self {
        Self::from_state(FixtureState::empty())
    }

    /// Backend pre-loaded with the demo dataset.
    ///
    /// One account (`a@b.com` / `secret`) attached to facility 10, two
    /// labs, three disposals, pickups scheduled today and tomorrow, and an
    /// approved pickup request. The first login hands out tokens `T1`/`T2`.
    pub fn seeded() -> Self {
        Self::from_state(FixtureState::seeded())
    }

    /// Adds a fixed delay before every response.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    fn from_state(state: FixtureState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            latency: None,
        }
    }
}

impl Default for FixtureTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FixtureTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixtureTransport")
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

impl Transport for FixtureTransport {
    async fn request(&self, request: Request<Bytes>) -> Result<Response<Bytes>, ApiError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let (parts, body) = request.into_parts();
        let mut state = self.state.write().await;
        Ok(route(&mut state, &parts, &body))
    }
}

struct Account {
    profile: UserProfile,
    password: String,
}

struct FixtureState {
    accounts: Vec<Account>,
    access_tokens: HashMap<String, i64>,
    refresh_tokens: HashMap<String, i64>,
    verification_codes: HashMap<String, String>,
    facilities: Vec<Facility>,
    labs: Vec<Lab>,
    disposals: Vec<Disposal>,
    pickups: Vec<Pickup>,
    pickup_requests: Vec<PickupRequest>,
    qr_codes: Vec<QrCode>,
    next_id: i64,
    token_seq: u32,
}

impl FixtureState {
    fn empty() -> Self {
        Self {
            accounts: Vec::new(),
            access_tokens: HashMap::new(),
            refresh_tokens: HashMap::new(),
            verification_codes: HashMap::new(),
            facilities: Vec::new(),
            labs: Vec::new(),
            disposals: Vec::new(),
            pickups: Vec::new(),
            pickup_requests: Vec::new(),
            qr_codes: Vec::new(),
            next_id: 1,
            token_seq: 0,
        }
    }

    fn seeded() -> Self {
        let mut state = Self::empty();
        state.accounts.push(Account {
            profile: UserProfile {
                id: 1,
                email: "a@b.com".to_string(),
                name: "Ada Park".to_string(),
                facility_id: Some(10),
            },
            password: "secret".to_string(),
        });
        state.facilities.push(Facility {
            id: 10,
            name: "Greenfield Research Campus".to_string(),
            kind: FacilityKind::LabSite,
            address: "12 Loop Rd".to_string(),
        });
        state.labs.push(Lab {
            id: 100,
            facility_id: 10,
            name: "Organic Chemistry Lab".to_string(),
            location: "Building A / 2F".to_string(),
        });
        state.labs.push(Lab {
            id: 101,
            facility_id: 10,
            name: "Materials Lab".to_string(),
            location: "Building C / 1F".to_string(),
        });
        state.disposals.push(Disposal {
            id: 200,
            lab_id: 100,
            category: "SOLVENT".to_string(),
            weight: 12.5,
            unit: "kg".to_string(),
            status: DisposalStatus::Requested,
            registered_at: fixture_now(),
        });
        state.disposals.push(Disposal {
            id: SCAN_MATCH_ID,
            lab_id: 100,
            category: "ACID".to_string(),
            weight: 3.2,
            unit: "kg".to_string(),
            status: DisposalStatus::Requested,
            registered_at: fixture_now(),
        });
        state.disposals.push(Disposal {
            id: 202,
            lab_id: 101,
            category: "GLASS".to_string(),
            weight: 8.0,
            unit: "kg".to_string(),
            status: DisposalStatus::Registered,
            registered_at: fixture_now(),
        });
        state.pickups.push(Pickup {
            id: 300,
            disposal_id: 200,
            scheduled_for: fixture_today(),
            status: PickupStatus::Scheduled,
        });
        state.pickups.push(Pickup {
            id: 301,
            disposal_id: SCAN_MATCH_ID,
            scheduled_for: fixture_today(),
            status: PickupStatus::Scheduled,
        });
        state.pickups.push(Pickup {
            id: 302,
            disposal_id: 202,
            scheduled_for: fixture_tomorrow(),
            status: PickupStatus::Scheduled,
        });
        state.pickup_requests.push(PickupRequest {
            id: 400,
            facility_id: 10,
            disposal_ids: vec![200, SCAN_MATCH_ID],
            requested_date: fixture_today(),
            status: PickupRequestStatus::Approved,
            note: None,
        });
        state.qr_codes.push(QrCode {
            id: 7,
            disposal_id: 200,
        });
        state.next_id = 500;
        state
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn issue_tokens(&mut self, account_id: i64) -> TokenPair {
        self.token_seq += 1;
        let access_token = format!("T{}", self.token_seq);
        self.token_seq += 1;
        let refresh_token = format!("T{}", self.token_seq);
        self.access_tokens.insert(access_token.clone(), account_id);
        self.refresh_tokens.insert(refresh_token.clone(), account_id);
        TokenPair {
            access_token,
            refresh_token,
        }
    }
}

fn fixture_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 18).expect("valid calendar date")
}

fn fixture_tomorrow() -> NaiveDate {
    fixture_today().succ_opt().expect("valid calendar date")
}

fn fixture_now() -> NaiveDateTime {
    fixture_today()
        .and_hms_opt(16, 54, 30)
        .expect("valid wall-clock time")
}

fn route(state: &mut FixtureState, parts: &Parts, body: &Bytes) -> Response<Bytes> {
    let segments: Vec<&str> = parts
        .uri
        .path()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    match (&parts.method, segments.as_slice()) {
        // Public endpoints
        (&Method::POST, ["auth", "login"]) => login(state, body),
        (&Method::POST, ["auth", "signup"]) => signup(state, body),
        (&Method::POST, ["auth", "send-code"]) => send_code(state, body),
        (&Method::POST, ["auth", "verify-code"]) => verify_code(state, body),
        (&Method::POST, ["auth", "refresh"]) => refresh(state, body),
        // Everything else needs a live bearer token
        _ => {
            let caller = match authorize(state, &parts.headers) {
                Ok(account_id) => account_id,
                Err(response) => return response,
            };
            authorized_route(state, parts, segments.as_slice(), body, caller)
        }
    }
}

fn authorized_route(
    state: &mut FixtureState,
    parts: &Parts,
    segments: &[&str],
    body: &Bytes,
    caller: i64,
) -> Response<Bytes> {
    match (&parts.method, segments) {
        (&Method::GET, ["user", "me"]) => me(state, caller),
        (&Method::POST, ["facilities", "register"]) => register_facility(state, body, caller),
        (&Method::GET, ["facilities"]) => json_ok(&state.facilities),
        (&Method::GET, ["labs"]) => json_ok(&state.labs),
        (&Method::POST, ["labs", "register"]) => register_lab(state, body, caller),
        (&Method::GET, ["labs", id]) => get_lab(state, id),
        (&Method::PATCH, ["labs", id]) => update_lab(state, id, body),
        (&Method::GET, ["disposals"]) => json_ok(&state.disposals),
        (&Method::POST, ["disposals"]) => register_disposal(state, body),
        (&Method::GET, ["disposals", id]) => get_disposal(state, id),
        (&Method::PATCH, ["disposals", id]) => update_disposal(state, id, body),
        (&Method::POST, ["pickups", "scan"]) => scan(state, &parts.headers, body),
        (&Method::GET, ["pickups", "today"]) => pickups_on(state, fixture_today()),
        (&Method::GET, ["pickups", "tomorrow"]) => pickups_on(state, fixture_tomorrow()),
        (&Method::GET, ["pickups"]) => json_ok(&state.pickups),
        (&Method::GET, ["pickup-requests"]) => json_ok(&state.pickup_requests),
        (&Method::POST, ["pickup-requests"]) => create_pickup_request(state, body, caller),
        (&Method::GET, ["pickup-requests", id]) => get_pickup_request(state, id),
        (&Method::PATCH, ["pickup-requests", id]) => update_pickup_request(state, id, body),
        (&Method::DELETE, ["pickup-requests", id]) => cancel_pickup_request(state, id),
        (&Method::POST, ["qr"]) => create_qr(state, body),
        (&Method::GET, ["qr", id, "image"]) => qr_image(state, id),
        _ => plain_status(StatusCode::NOT_FOUND),
    }
}

fn authorize(state: &FixtureState, headers: &HeaderMap) -> Result<i64, Response<Bytes>> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    match token.and_then(|token| state.access_tokens.get(token)) {
        Some(account_id) => Ok(*account_id),
        None => Err(plain_status(StatusCode::UNAUTHORIZED)),
    }
}

fn login(state: &mut FixtureState, body: &Bytes) -> Response<Bytes> {
    let request: LoginRequest = match decode(body) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let account_id = state
        .accounts
        .iter()
        .find(|account| {
            account.profile.email == request.email && account.password == request.password
        })
        .map(|account| account.profile.id);
    match account_id {
        Some(id) => json_ok(&state.issue_tokens(id)),
        None => plain_status(StatusCode::UNAUTHORIZED),
    }
}

fn signup(state: &mut FixtureState, body: &Bytes) -> Response<Bytes> {
    let request: SignupRequest = match decode(body) {
        Ok(value) => value,
        Err(response) => return response,
    };
    if state
        .accounts
        .iter()
        .any(|account| account.profile.email == request.email)
    {
        return plain_status(StatusCode::CONFLICT);
    }
    let id = state.allocate_id();
    state.accounts.push(Account {
        profile: UserProfile {
            id,
            email: request.email,
            name: request.name,
            facility_id: None,
        },
        password: request.password,
    });
    plain_status(StatusCode::OK)
}

fn send_code(state: &mut FixtureState, body: &Bytes) -> Response<Bytes> {
    let request: SendCodeRequest = match decode(body) {
        Ok(value) => value,
        Err(response) => return response,
    };
    // The real backend mails the code; here it is always 123456.
    state
        .verification_codes
        .insert(request.email, VERIFICATION_CODE.to_string());
    plain_status(StatusCode::OK)
}

fn verify_code(state: &mut FixtureState, body: &Bytes) -> Response<Bytes> {
    let request: VerifyCodeRequest = match decode(body) {
        Ok(value) => value,
        Err(response) => return response,
    };
    match state.verification_codes.get(&request.email) {
        Some(code) if *code == request.code => {
            state.verification_codes.remove(&request.email);
            plain_status(StatusCode::OK)
        }
        _ => plain_status(StatusCode::BAD_REQUEST),
    }
}

fn refresh(state: &mut FixtureState, body: &Bytes) -> Response<Bytes> {
    let request: RefreshRequest = match decode(body) {
        Ok(value) => value,
        Err(response) => return response,
    };
    // Refresh tokens are single-use; a successful exchange rotates the pair.
    match state.refresh_tokens.remove(&request.refresh_token) {
        Some(account_id) => json_ok(&state.issue_tokens(account_id)),
        None => plain_status(StatusCode::UNAUTHORIZED),
    }
}

fn me(state: &FixtureState, caller: i64) -> Response<Bytes> {
    match state
        .accounts
        .iter()
        .find(|account| account.profile.id == caller)
    {
        Some(account) => json_ok(&account.profile),
        None => plain_status(StatusCode::UNAUTHORIZED),
    }
}

fn register_facility(state: &mut FixtureState, body: &Bytes, caller: i64) -> Response<Bytes> {
    let request: RegisterFacility = match decode(body) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let id = state.allocate_id();
    let facility = Facility {
        id,
        name: request.name,
        kind: request.kind,
        address: request.address,
    };
    state.facilities.push(facility.clone());
    if let Some(account) = state
        .accounts
        .iter_mut()
        .find(|account| account.profile.id == caller)
    {
        account.profile.facility_id = Some(id);
    }
    json_ok(&facility)
}

fn caller_facility(state: &FixtureState, caller: i64) -> Option<i64> {
    state
        .accounts
        .iter()
        .find(|account| account.profile.id == caller)
        .and_then(|account| account.profile.facility_id)
}

fn register_lab(state: &mut FixtureState, body: &Bytes, caller: i64) -> Response<Bytes> {
    let request: RegisterLab = match decode(body) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let Some(facility_id) = caller_facility(state, caller) else {
        return plain_status(StatusCode::CONFLICT);
    };
    let id = state.allocate_id();
    let lab = Lab {
        id,
        facility_id,
        name: request.name,
        location: request.location,
    };
    state.labs.push(lab.clone());
    json_ok(&lab)
}

fn get_lab(state: &FixtureState, raw_id: &str) -> Response<Bytes> {
    let id = match parse_id(raw_id) {
        Ok(value) => value,
        Err(response) => return response,
    };
    match state.labs.iter().find(|lab| lab.id == id) {
        Some(lab) => json_ok(lab),
        None => plain_status(StatusCode::NOT_FOUND),
    }
}

fn update_lab(state: &mut FixtureState, raw_id: &str, body: &Bytes) -> Response<Bytes> {
    let id = match parse_id(raw_id) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let update: UpdateLab = match decode(body) {
        Ok(value) => value,
        Err(response) => return response,
    };
    match state.labs.iter_mut().find(|lab| lab.id == id) {
        Some(lab) => {
            if let Some(name) = update.name {
                lab.name = name;
            }
            if let Some(location) = update.location {
                lab.location = location;
            }
            json_ok(lab)
        }
        None => plain_status(StatusCode::NOT_FOUND),
    }
}

fn register_disposal(state: &mut FixtureState, body: &Bytes) -> Response<Bytes> {
    let request: RegisterDisposal = match decode(body) {
        Ok(value) => value,
        Err(response) => return response,
    };
    if !state.labs.iter().any(|lab| lab.id == request.lab_id) {
        return plain_status(StatusCode::NOT_FOUND);
    }
    let id = state.allocate_id();
    let disposal = Disposal {
        id,
        lab_id: request.lab_id,
        category: request.category,
        weight: request.weight,
        unit: request.unit,
        status: DisposalStatus::Registered,
        registered_at: fixture_now(),
    };
    state.disposals.push(disposal.clone());
    json_ok(&disposal)
}

fn get_disposal(state: &FixtureState, raw_id: &str) -> Response<Bytes> {
    let id = match parse_id(raw_id) {
        Ok(value) => value,
        Err(response) => return response,
    };
    match state.disposals.iter().find(|disposal| disposal.id == id) {
        Some(disposal) => json_ok(disposal),
        None => plain_status(StatusCode::NOT_FOUND),
    }
}

fn update_disposal(state: &mut FixtureState, raw_id: &str, body: &Bytes) -> Response<Bytes> {
    let id = match parse_id(raw_id) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let update: UpdateDisposal = match decode(body) {
        Ok(value) => value,
        Err(response) => return response,
    };
    match state.disposals.iter_mut().find(|disposal| disposal.id == id) {
        Some(disposal) => {
            if let Some(category) = update.category {
                disposal.category = category;
            }
            if let Some(weight) = update.weight {
                disposal.weight = weight;
            }
            if let Some(unit) = update.unit {
                disposal.unit = unit;
            }
            json_ok(disposal)
        }
        None => plain_status(StatusCode::NOT_FOUND),
    }
}

fn scan(state: &mut FixtureState, headers: &HeaderMap, body: &Bytes) -> Response<Bytes> {
    let disposal_id = if is_multipart(headers) {
        // The real backend classifies the label photo; the fixture always
        // recognizes the demo ACID container.
        SCAN_MATCH_ID
    } else {
        match decode::<ScanRequest>(body) {
            Ok(request) => request.disposal_id,
            Err(response) => return response,
        }
    };

    let Some(disposal) = state
        .disposals
        .iter_mut()
        .find(|disposal| disposal.id == disposal_id)
    else {
        return plain_status(StatusCode::NOT_FOUND);
    };
    disposal.status = DisposalStatus::PickedUp;

    if let Some(pickup) = state
        .pickups
        .iter_mut()
        .find(|pickup| pickup.disposal_id == disposal_id)
    {
        pickup.status = PickupStatus::PickedUp;
    }

    json_ok(&ScanResult {
        disposal_id,
        status: DisposalStatus::PickedUp,
        processed_at: fixture_now(),
    })
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"))
}

fn pickups_on(state: &FixtureState, date: NaiveDate) -> Response<Bytes> {
    let scheduled: Vec<&Pickup> = state
        .pickups
        .iter()
        .filter(|pickup| pickup.scheduled_for == date)
        .collect();
    json_ok(&scheduled)
}

fn create_pickup_request(state: &mut FixtureState, body: &Bytes, caller: i64) -> Response<Bytes> {
    let request: CreatePickupRequest = match decode(body) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let Some(facility_id) = caller_facility(state, caller) else {
        return plain_status(StatusCode::CONFLICT);
    };
    for disposal_id in &request.disposal_ids {
        if !state
            .disposals
            .iter()
            .any(|disposal| disposal.id == *disposal_id)
        {
            return plain_status(StatusCode::NOT_FOUND);
        }
    }
    for disposal in state
        .disposals
        .iter_mut()
        .filter(|disposal| request.disposal_ids.contains(&disposal.id))
    {
        disposal.status = DisposalStatus::Requested;
    }
    let id = state.allocate_id();
    let created = PickupRequest {
        id,
        facility_id,
        disposal_ids: request.disposal_ids,
        requested_date: request.requested_date,
        status: PickupRequestStatus::Pending,
        note: request.note,
    };
    state.pickup_requests.push(created.clone());
    json_ok(&created)
}

fn get_pickup_request(state: &FixtureState, raw_id: &str) -> Response<Bytes> {
    let id = match parse_id(raw_id) {
        Ok(value) => value,
        Err(response) => return response,
    };
    match state.pickup_requests.iter().find(|request| request.id == id) {
        Some(request) => json_ok(request),
        None => plain_status(StatusCode::NOT_FOUND),
    }
}

fn update_pickup_request(state: &mut FixtureState, raw_id: &str, body: &Bytes) -> Response<Bytes> {
    let id = match parse_id(raw_id) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let update: UpdatePickupRequest = match decode(body) {
        Ok(value) => value,
        Err(response) => return response,
    };
    match state
        .pickup_requests
        .iter_mut()
        .find(|request| request.id == id)
    {
        Some(request) => {
            if let Some(disposal_ids) = update.disposal_ids {
                request.disposal_ids = disposal_ids;
            }
            if let Some(requested_date) = update.requested_date {
                request.requested_date = requested_date;
            }
            if let Some(note) = update.note {
                request.note = Some(note);
            }
            json_ok(request)
        }
        None => plain_status(StatusCode::NOT_FOUND),
    }
}

fn cancel_pickup_request(state: &mut FixtureState, raw_id: &str) -> Response<Bytes> {
    let id = match parse_id(raw_id) {
        Ok(value) => value,
        Err(response) => return response,
    };
    match state
        .pickup_requests
        .iter_mut()
        .find(|request| request.id == id)
    {
        Some(request) => {
            request.status = PickupRequestStatus::Cancelled;
            plain_status(StatusCode::NO_CONTENT)
        }
        None => plain_status(StatusCode::NOT_FOUND),
    }
}

fn create_qr(state: &mut FixtureState, body: &Bytes) -> Response<Bytes> {
    let request: CreateQr = match decode(body) {
        Ok(value) => value,
        Err(response) => return response,
    };
    if !state
        .disposals
        .iter()
        .any(|disposal| disposal.id == request.disposal_id)
    {
        return plain_status(StatusCode::NOT_FOUND);
    }
    let id = state.allocate_id();
    let code = QrCode {
        id,
        disposal_id: request.disposal_id,
    };
    state.qr_codes.push(code.clone());
    json_ok(&code)
}

fn qr_image(state: &FixtureState, raw_id: &str) -> Response<Bytes> {
    let id = match parse_id(raw_id) {
        Ok(value) => value,
        Err(response) => return response,
    };
    if state.qr_codes.iter().any(|code| code.id == id) {
        png_response()
    } else {
        plain_status(StatusCode::NOT_FOUND)
    }
}

fn parse_id(raw: &str) -> Result<i64, Response<Bytes>> {
    raw.parse()
        .map_err(|_| plain_status(StatusCode::BAD_REQUEST))
}

fn decode<T: DeserializeOwned>(body: &Bytes) -> Result<T, Response<Bytes>> {
    serde_json::from_slice(body).map_err(|_| plain_status(StatusCode::BAD_REQUEST))
}

fn json_ok<T: Serialize + ?Sized>(value: &T) -> Response<Bytes> {
    match serde_json::to_vec(value) {
        Ok(bytes) => {
            let mut response = Response::new(Bytes::from(bytes));
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            response
        }
        Err(_) => plain_status(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

fn plain_status(status: StatusCode) -> Response<Bytes> {
    let mut response = Response::new(Bytes::new());
    *response.status_mut() = status;
    response
}

fn png_response() -> Response<Bytes> {
    let mut response = Response::new(Bytes::from_static(QR_PNG));
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_parts(method: Method, path: &str, token: Option<&str>) -> Parts {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let (parts, _body) = builder.body(()).unwrap().into_parts();
        parts
    }

    fn json_body<T: Serialize>(value: &T) -> Bytes {
        Bytes::from(serde_json::to_vec(value).unwrap())
    }

    #[test]
    fn test_seeded_login_issues_first_pair() {
        let mut state = FixtureState::seeded();
        let parts = request_parts(Method::POST, "/auth/login", None);
        let body = json_body(&LoginRequest {
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
        });

        let response = route(&mut state, &parts, &body);
        assert_eq!(response.status(), StatusCode::OK);
        let pair: TokenPair = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(pair.access_token, "T1");
        assert_eq!(pair.refresh_token, "T2");
    }

    #[test]
    fn test_login_rejects_wrong_password() {
        let mut state = FixtureState::seeded();
        let parts = request_parts(Method::POST, "/auth/login", None);
        let body = json_body(&LoginRequest {
            email: "a@b.com".to_string(),
            password: "nope".to_string(),
        });

        let response = route(&mut state, &parts, &body);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_protected_route_needs_token() {
        let mut state = FixtureState::seeded();
        let parts = request_parts(Method::GET, "/labs", None);
        let response = route(&mut state, &parts, &Bytes::new());
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let parts = request_parts(Method::GET, "/labs", Some("bogus"));
        let response = route(&mut state, &parts, &Bytes::new());
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_labs_listed_with_valid_token() {
        let mut state = FixtureState::seeded();
        let pair = state.issue_tokens(1);

        let parts = request_parts(Method::GET, "/labs", Some(&pair.access_token));
        let response = route(&mut state, &parts, &Bytes::new());
        assert_eq!(response.status(), StatusCode::OK);
        let labs: Vec<Lab> = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(labs.len(), 2);
    }

    #[test]
    fn test_verification_round() {
        let mut state = FixtureState::empty();
        let parts = request_parts(Method::POST, "/auth/send-code", None);
        let body = json_body(&SendCodeRequest {
            email: "new@lab.com".to_string(),
        });
        assert_eq!(route(&mut state, &parts, &body).status(), StatusCode::OK);

        let parts = request_parts(Method::POST, "/auth/verify-code", None);
        let wrong = json_body(&VerifyCodeRequest {
            email: "new@lab.com".to_string(),
            code: "999999".to_string(),
        });
        assert_eq!(
            route(&mut state, &parts, &wrong).status(),
            StatusCode::BAD_REQUEST
        );

        let right = json_body(&VerifyCodeRequest {
            email: "new@lab.com".to_string(),
            code: VERIFICATION_CODE.to_string(),
        });
        assert_eq!(route(&mut state, &parts, &right).status(), StatusCode::OK);
    }

    #[test]
    fn test_refresh_rotates_and_consumes() {
        let mut state = FixtureState::seeded();
        let pair = state.issue_tokens(1);

        let parts = request_parts(Method::POST, "/auth/refresh", None);
        let body = json_body(&RefreshRequest {
            refresh_token: pair.refresh_token.clone(),
        });
        let response = route(&mut state, &parts, &body);
        assert_eq!(response.status(), StatusCode::OK);
        let rotated: TokenPair = serde_json::from_slice(response.body()).unwrap();
        assert_ne!(rotated.access_token, pair.access_token);

        // Second exchange with the consumed token fails
        let response = route(&mut state, &parts, &body);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_multipart_scan_answers_canned_match() {
        let mut state = FixtureState::seeded();
        let pair = state.issue_tokens(1);

        let builder = Request::builder()
            .method(Method::POST)
            .uri("/pickups/scan")
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", pair.access_token),
            )
            .header(
                header::CONTENT_TYPE,
                "multipart/form-data; boundary=abc123",
            );
        let (parts, _body) = builder.body(()).unwrap().into_parts();

        let response = route(&mut state, &parts, &Bytes::from_static(b"raw form"));
        assert_eq!(response.status(), StatusCode::OK);
        let result: ScanResult = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(result.disposal_id, SCAN_MATCH_ID);
        assert_eq!(result.status, DisposalStatus::PickedUp);
    }

    #[test]
    fn test_unknown_route_is_not_found() {
        let mut state = FixtureState::seeded();
        let pair = state.issue_tokens(1);
        let parts = request_parts(Method::GET, "/nope", Some(&pair.access_token));
        let response = route(&mut state, &parts, &Bytes::new());
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
