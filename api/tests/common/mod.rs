#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use kernel::gateway::payment::PaymentGateway;
use kernel::model::checkout::{event::CreateCheckoutSession, CheckoutSession};
use kernel::model::enrollment::{event::JoinEvent, EnrollmentRejection, JoinOutcome};
use kernel::model::event::{Event, EventStatus};
use kernel::model::id::{EventId, UserId};
use kernel::model::payment::{event::SettlePayment, SettlementOutcome};
use kernel::repository::{
    enrollment::EnrollmentRepository, event::EventRepository, health::HealthCheckRepository,
    payment::PaymentRepository,
};
use registry::AppRegistry;
use shared::error::AppResult;

pub const WEBHOOK_SECRET: &str = "whsec_test_secret";

// インメモリのストア。実装と同じ一意制約（participants の (event_id, user_id)、
// payments の transaction_id）をデータ構造で表現する
#[derive(Default)]
pub struct MockStore {
    pub events: Mutex<HashMap<EventId, Event>>,
    pub participants: Mutex<HashSet<(EventId, UserId)>>,
    pub payments: Mutex<HashMap<String, SettlePayment>>,
    pub events_attended: Mutex<HashMap<UserId, i64>>,
}

impl MockStore {
    pub fn insert_event(
        &self,
        host_id: UserId,
        status: EventStatus,
        date: DateTime<Utc>,
        joining_fee: i64,
        max_participants: i32,
    ) -> EventId {
        let event_id = EventId::new();
        self.events.lock().unwrap().insert(
            event_id,
            Event {
                event_id,
                host_id,
                title: "Test Event".into(),
                status,
                date,
                joining_fee,
                max_participants,
                participant_count: 0,
            },
        );
        event_id
    }

    pub fn insert_open_event(&self, joining_fee: i64, max_participants: i32) -> EventId {
        self.insert_event(
            UserId::new(),
            EventStatus::Open,
            Utc::now() + ChronoDuration::days(7),
            joining_fee,
            max_participants,
        )
    }

    pub fn participant_count(&self, event_id: EventId) -> usize {
        self.participants
            .lock()
            .unwrap()
            .iter()
            .filter(|(e, _)| *e == event_id)
            .count()
    }

    pub fn attended(&self, user_id: UserId) -> i64 {
        self.events_attended
            .lock()
            .unwrap()
            .get(&user_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn has_no_writes(&self) -> bool {
        self.participants.lock().unwrap().is_empty()
            && self.payments.lock().unwrap().is_empty()
            && self.events_attended.lock().unwrap().is_empty()
    }
}

pub struct MockEventRepository(pub Arc<MockStore>);

#[async_trait]
impl EventRepository for MockEventRepository {
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        let event = self.0.events.lock().unwrap().get(&event_id).cloned();
        // 実装と同様、参加者数は participants から導出する
        Ok(event.map(|mut e| {
            e.participant_count = self.0.participant_count(event_id) as i64;
            e
        }))
    }
}

pub struct MockEnrollmentRepository(pub Arc<MockStore>);

#[async_trait]
impl EnrollmentRepository for MockEnrollmentRepository {
    async fn already_joined(&self, event_id: EventId, user_id: UserId) -> AppResult<bool> {
        Ok(self
            .0
            .participants
            .lock()
            .unwrap()
            .contains(&(event_id, user_id)))
    }

    async fn join(&self, event: JoinEvent) -> AppResult<JoinOutcome> {
        let inserted = self
            .0
            .participants
            .lock()
            .unwrap()
            .insert((event.event_id, event.user_id));
        if !inserted {
            return Ok(JoinOutcome::Rejected(EnrollmentRejection::AlreadyJoined));
        }
        *self
            .0
            .events_attended
            .lock()
            .unwrap()
            .entry(event.user_id)
            .or_insert(0) += 1;
        Ok(JoinOutcome::Joined)
    }
}

pub struct MockPaymentRepository(pub Arc<MockStore>);

#[async_trait]
impl PaymentRepository for MockPaymentRepository {
    async fn settle(&self, event: SettlePayment) -> AppResult<SettlementOutcome> {
        let mut payments = self.0.payments.lock().unwrap();
        if payments.contains_key(&event.transaction_id) {
            return Ok(SettlementOutcome::AlreadyProcessed);
        }
        let mut participants = self.0.participants.lock().unwrap();
        if !participants.insert((event.event_id, event.user_id)) {
            return Ok(SettlementOutcome::AlreadyProcessed);
        }
        payments.insert(event.transaction_id.clone(), event.clone());
        *self
            .0
            .events_attended
            .lock()
            .unwrap()
            .entry(event.user_id)
            .or_insert(0) += 1;
        Ok(SettlementOutcome::Committed)
    }
}

pub struct MockHealthCheckRepository;

#[async_trait]
impl HealthCheckRepository for MockHealthCheckRepository {
    async fn check_db(&self) -> bool {
        true
    }
}

#[derive(Default)]
pub struct MockPaymentGateway {
    pub sessions: Mutex<Vec<CreateCheckoutSession>>,
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_checkout_session(
        &self,
        event: CreateCheckoutSession,
    ) -> AppResult<CheckoutSession> {
        self.sessions.lock().unwrap().push(event);
        Ok(CheckoutSession {
            url: "https://gateway.test/pay/cs_test_1".into(),
        })
    }

    fn verify_notification_signature(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> AppResult<()> {
        // 検証は実装と同じ方式で行う
        adapter::gateway::signature::verify(
            WEBHOOK_SECRET,
            payload,
            signature_header,
            Utc::now().timestamp(),
            300,
        )
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MockStore>,
    pub gateway: Arc<MockPaymentGateway>,
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MockStore::default());
    let gateway = Arc::new(MockPaymentGateway::default());
    let registry = AppRegistry::from_parts(
        Arc::new(MockHealthCheckRepository),
        Arc::new(MockEventRepository(store.clone())),
        Arc::new(MockEnrollmentRepository(store.clone())),
        Arc::new(MockPaymentRepository(store.clone())),
        gateway.clone(),
    );
    let router = Router::new()
        .merge(api::route::v1::routes())
        .merge(api::route::webhook::build_webhook_routers())
        .with_state(registry);
    TestApp {
        router,
        store,
        gateway,
    }
}

pub fn join_request(event_id: EventId, user_id: UserId) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri(format!("/api/v1/events/{event_id}/join"))
        .header("x-user-id", user_id.to_string())
        .header("x-user-role", "USER")
        .body(axum::body::Body::empty())
        .unwrap()
}

pub fn checkout_request(
    event_id: EventId,
    user_id: UserId,
) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/checkout")
        .header("content-type", "application/json")
        .header("x-user-id", user_id.to_string())
        .header("x-user-role", "USER")
        .body(axum::body::Body::from(format!(
            r#"{{"eventId":"{event_id}"}}"#
        )))
        .unwrap()
}

pub fn webhook_request(
    body: impl Into<String>,
    signature: Option<String>,
) -> axum::http::Request<axum::body::Body> {
    let mut builder = axum::http::Request::builder()
        .method("POST")
        .uri("/api/webhooks/payments")
        .header("content-type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("stripe-signature", signature);
    }
    builder.body(axum::body::Body::from(body.into())).unwrap()
}

pub async fn request_json(
    router: Router,
    req: axum::http::Request<axum::body::Body>,
) -> (axum::http::StatusCode, serde_json::Value) {
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    let res = router.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// バックグラウンドの確定タスクが書き込みを終えるまで待つ
pub async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..100 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("condition not met within timeout");
}
