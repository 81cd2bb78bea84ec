//! In-process mock of the QvaPay API for integration tests.
//!
//! Serves canned bodies per path on an ephemeral port and records every
//! request it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use qvapay_sdk::client::{ClientError, Transport, TransportError};
use qvapay_sdk::http::{HttpRequest, HttpResponse};

pub const APP_ID: &str = "myAppID";
pub const APP_SECRET: &str = "mySecretID";

pub const APP_INFO: &str = r#"{
    "user_id":1,
    "name":"my_website",
    "url":"https:\/\/www.website.com",
    "desc":"WebSite",
    "callback":"https:\/\/www.website.com\/webhook",
    "logo":"",
    "uuid":"123456789",
    "secret":"123456987",
    "active":1,
    "enabled":1
}"#;

pub const INVOICE: &str = r#"{
    "app_id": "c2ffb4b5-0c73-44f8-b947-53eeddb0afc6",
    "amount": "25.60",
    "description": "Enanitos verdes",
    "remote_id": "BRID56568989",
    "signed": "1",
    "transation_uuid": "543105f4-b50a-4141-8ede-0ecbbaf5bc87",
    "url": "http://qvapay.com/pay/b9330412-2e3d-4fe8-a531-b2be5f68ff4c",
    "signedUrl": "http://qvapay.com/pay/b9330412-2e3d-4fe8-a531-b2be5f68ff4c?expires=1610255133&signature=c35db0f1f9e810fd51748aaf69f0981b8d5f83949b7082eeb28c56857b91072b"
}"#;

pub const TRANSACTIONS: &str = r#"{
    "current_page": 2,
    "data": [
        {
            "uuid": "b9330412-2e3d-4fe8-a531-b2be5f68ff4c",
            "user_id": 1,
            "app_id": 1,
            "amount": "25.60",
            "description": "Enanitos verdes",
            "remote_id": "BRID56568989",
            "status": "pending",
            "paid_by_user_id": 0,
            "created_at": "2021-01-10T04:35:33.000000Z",
            "updated_at": "2021-01-10T04:35:33.000000Z",
            "signed": 0
        }
    ],
    "first_page_url": "http://qvapay.com/api/v1/transactions?page=1",
    "from": 16,
    "last_page": 2,
    "last_page_url": "http://qvapay.com/api/v1/transactions?page=2",
    "next_page_url": null,
    "path": "http://qvapay.com/api/v1/transactions",
    "per_page": 15,
    "prev_page_url": "http://qvapay.com/api/v1/transactions?page=1",
    "to": 16,
    "total": 16
}"#;

pub const TRANSACTION: &str = r#"{
    "uuid": "6507ee0d-db6c-4aa9-b59a-75dc7f6eab52",
    "user_id": 1,
    "app_id": 1,
    "amount": "30.00",
    "description": "QVAPAY-APP",
    "remote_id": "15803",
    "status": "pending",
    "paid_by_user_id": 0,
    "signed": 0,
    "created_at": "2021-02-06T18:10:09.000000Z",
    "updated_at": "2021-02-06T18:10:09.000000Z",
    "paid_by": {"name": "QvaPay", "logo": "apps/qvapay.jpg"},
    "app": {
        "user_id": 1,
        "name": "QvaPay-app",
        "url": "https://qvapay.com",
        "uuid": "9955dd29-082f-470b-992d-f4f0f25ea164",
        "active": 1,
        "enabled": 1
    },
    "owner": {
        "uuid": "796a9e01-3d67-4a42-9dc2-02a5d069fa23",
        "username": "qvapay-owner",
        "name": "QvaPay",
        "lastname": "Pasarela Pagos",
        "logo": "profiles/zV93I93mbarZo0fKgwGcpWFWDn41UYfAgj7wNCbf.jpg"
    }
}"#;

pub const OFFERS: &str = r#"{"current_page":1,"data":[{"uuid":"offer-1","type":"buy","coin":"BANK_CUP","amount":"10.00"}]}"#;

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub query: Option<String>,
    pub user_agent: Option<String>,
    pub content_type: Option<String>,
    pub accept_encoding: Option<String>,
    /// Client end of the TCP connection the request arrived on.
    pub peer: SocketAddr,
}

impl Recorded {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let query = self.query.clone().unwrap_or_default();
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn param(&self, name: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

#[derive(Debug, Clone)]
struct Canned {
    status: StatusCode,
    body: String,
    delay: Duration,
}

#[derive(Debug, Clone, Default)]
struct MockState {
    routes: Arc<HashMap<String, Canned>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// Route table builder.
#[derive(Debug, Default)]
pub struct MockApi {
    routes: HashMap<String, Canned>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, path: &str, status: u16, body: &str) -> Self {
        self.slow_route(path, status, body, Duration::ZERO)
    }

    pub fn slow_route(mut self, path: &str, status: u16, body: &str, delay: Duration) -> Self {
        self.routes.insert(
            path.to_string(),
            Canned {
                status: StatusCode::from_u16(status).expect("valid status"),
                body: body.to_string(),
                delay,
            },
        );
        self
    }

    /// Every merchant route answering `200` with the reference fixtures.
    pub fn merchant_fixtures() -> Self {
        Self::new()
            .route("/api/v1/info", 200, APP_INFO)
            .route("/api/v1/create_invoice", 200, INVOICE)
            .route("/api/v1/transactions", 200, TRANSACTIONS)
            .route(
                "/api/v1/transaction/6507ee0d-db6c-4aa9-b59a-75dc7f6eab52",
                200,
                TRANSACTION,
            )
            .route("/api/v1/balance", 200, r#"{"66.00"}"#)
            .route("/api/p2p/index", 200, OFFERS)
    }

    pub async fn start(self) -> MockServer {
        let state = MockState {
            routes: Arc::new(self.routes),
            requests: Arc::default(),
        };
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("mock server");
        });

        MockServer {
            base_url: format!("http://{addr}/api"),
            requests: state.requests,
        }
    }
}

async fn handle(
    State(state): State<MockState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    uri: Uri,
    headers: HeaderMap,
) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    state.requests.lock().expect("lock").push(Recorded {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        user_agent: header("user-agent"),
        content_type: header("content-type"),
        accept_encoding: header("accept-encoding"),
        peer,
    });

    match state.routes.get(uri.path()) {
        Some(canned) => {
            if !canned.delay.is_zero() {
                tokio::time::sleep(canned.delay).await;
            }
            (canned.status, canned.body.clone())
        }
        None => (StatusCode::NOT_FOUND, "Not Found".to_string()),
    }
}

/// A running mock server.
pub struct MockServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockServer {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("lock").clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("at least one request")
    }
}

/// Transport double that never touches the network and counts calls.
#[derive(Debug, Default)]
pub struct CountingTransport {
    pub calls: Mutex<usize>,
}

impl CountingTransport {
    pub fn calls(&self) -> usize {
        *self.calls.lock().expect("lock")
    }
}

#[async_trait]
impl Transport for CountingTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        *self.calls.lock().expect("lock") += 1;
        Ok(HttpResponse::new(reqwest::StatusCode::OK, "{}"))
    }
}

/// In-memory writer shared between a trace sink and the test.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(pub Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("lock")).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub fn assert_construction(result: Result<impl std::fmt::Debug, ClientError>) {
    match result {
        Err(ClientError::Construction { .. }) => {}
        other => panic!("expected a construction error, got {other:?}"),
    }
}
