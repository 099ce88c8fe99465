#![allow(dead_code)]

use {
    axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    },
    order_sync::{
        AppState,
        adapters::stripe::{SIGNATURE_HEADER, WebhookVerifier, sign_payload},
        domain::{
            error::PersistenceError,
            id::CustomPlanId,
            order::NewOrder,
            policy::AckPolicy,
            store::{OrderStore, StoreFuture},
        },
    },
    std::{
        collections::HashMap,
        sync::{
            Arc, Mutex,
            atomic::{AtomicBool, AtomicUsize, Ordering},
        },
    },
    tower::ServiceExt,
    uuid::Uuid,
};

pub const SECRET: &str = "whsec_test_secret";
pub const WEBHOOK_PATH: &str = "/webhook";

/// Store double: keeps orders in memory, counts every call and can be told
/// to fail either operation.
#[derive(Default)]
pub struct InMemoryStore {
    orders: Mutex<Vec<NewOrder>>,
    plans: Mutex<HashMap<String, String>>,
    calls: AtomicUsize,
    plan_writes: AtomicUsize,
    fail_orders: AtomicBool,
    fail_plans: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_plan(self: Arc<Self>, id: &str, payment_status: &str) -> Arc<Self> {
        self.plans
            .lock()
            .unwrap()
            .insert(id.to_string(), payment_status.to_string());
        self
    }

    pub fn fail_orders(&self) {
        self.fail_orders.store(true, Ordering::SeqCst);
    }

    pub fn fail_plans(&self) {
        self.fail_plans.store(true, Ordering::SeqCst);
    }

    pub fn orders(&self) -> Vec<NewOrder> {
        self.orders.lock().unwrap().clone()
    }

    pub fn plan_status(&self, id: &str) -> Option<String> {
        self.plans.lock().unwrap().get(id).cloned()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn plan_writes(&self) -> usize {
        self.plan_writes.load(Ordering::SeqCst)
    }
}

impl OrderStore for InMemoryStore {
    fn create_order<'a>(&'a self, order: &'a NewOrder) -> StoreFuture<'a, Uuid> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if self.fail_orders.load(Ordering::SeqCst) {
                return Err(PersistenceError::Unavailable("orders offline".into()));
            }
            self.orders.lock().unwrap().push(order.clone());
            Ok(order.id())
        })
    }

    fn mark_custom_plan_paid<'a>(&'a self, id: &'a CustomPlanId) -> StoreFuture<'a, bool> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.plan_writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_plans.load(Ordering::SeqCst) {
                return Err(PersistenceError::Unavailable("plans offline".into()));
            }
            let mut plans = self.plans.lock().unwrap();
            match plans.get_mut(id.as_str()) {
                Some(status) => {
                    *status = "paid".to_string();
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }
}

pub fn app_with(store: Arc<InMemoryStore>, secret: Option<&str>, ack_policy: AckPolicy) -> Router {
    let state = AppState {
        store,
        verifier: WebhookVerifier::new(secret, 300),
        ack_policy,
    };
    order_sync::router(state, WEBHOOK_PATH)
}

pub fn app(store: Arc<InMemoryStore>) -> Router {
    app_with(store, Some(SECRET), AckPolicy::default())
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn signed_request(body: &str) -> Request<Body> {
    let sig = sign_payload(body.as_bytes(), SECRET, now());
    request(body, Some(&sig))
}

pub fn request(body: &str, signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(WEBHOOK_PATH)
        .header("content-type", "application/json");
    if let Some(sig) = signature {
        builder = builder.header(SIGNATURE_HEADER, sig);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

// ── Event builders ─────────────────────────────────────────────────────────

pub fn payment_intent_succeeded(
    event_id: &str,
    pi_id: &str,
    amount: i64,
    metadata: serde_json::Value,
) -> String {
    serde_json::json!({
        "id": event_id,
        "object": "event",
        "type": "payment_intent.succeeded",
        "created": now(),
        "livemode": false,
        "data": {"object": {
            "id": pi_id,
            "object": "payment_intent",
            "amount": amount,
            "currency": "usd",
            "metadata": metadata,
        }},
    })
    .to_string()
}

pub fn charge_succeeded(
    event_id: &str,
    charge_id: &str,
    pi_id: Option<&str>,
    amount: i64,
    metadata: serde_json::Value,
) -> String {
    serde_json::json!({
        "id": event_id,
        "object": "event",
        "type": "charge.succeeded",
        "created": now(),
        "livemode": false,
        "data": {"object": {
            "id": charge_id,
            "object": "charge",
            "payment_intent": pi_id,
            "amount": amount,
            "currency": "usd",
            "metadata": metadata,
        }},
    })
    .to_string()
}

pub fn pro_hosting_metadata() -> serde_json::Value {
    serde_json::json!({
        "userId": "u1",
        "serviceId": "s1",
        "planId": "p1",
        "amount": "9.99",
        "planName": "Pro",
        "serviceName": "Hosting",
    })
}
