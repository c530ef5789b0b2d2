#![allow(dead_code)]

use axum::Router;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use shortlink::api::middleware::rate_limit::RateLimitPolicy;
use shortlink::application::services::{AllocationPolicy, LinkService};
use shortlink::config::VisitCounting;
use shortlink::domain::entities::NewShortLink;
use shortlink::domain::repositories::LinkRepository;
use shortlink::domain::visit_event::VisitEvent;
use shortlink::infrastructure::cache::MokaCache;
use shortlink::infrastructure::persistence::InMemoryLinkRepository;
use shortlink::routes::build_router;
use shortlink::state::AppState;
use shortlink::utils::code_generator::{CodeGenerator, generate_code};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tower::Layer;

pub const BASE_URL: &str = "http://localhost:3000";

/// Hands out queued codes first, then random ones.
#[derive(Default)]
pub struct ScriptedGenerator {
    codes: Mutex<VecDeque<String>>,
}

impl ScriptedGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
        }
    }
}

impl CodeGenerator for ScriptedGenerator {
    fn generate(&self, length: usize) -> String {
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| generate_code(length))
    }
}

/// Always returns the same code.
pub struct FixedGenerator(pub &'static str);

impl CodeGenerator for FixedGenerator {
    fn generate(&self, _length: usize) -> String {
        self.0.to_string()
    }
}

pub fn generous_rate_limit() -> RateLimitPolicy {
    RateLimitPolicy {
        requests: 10_000,
        window: Duration::from_secs(60),
        behind_proxy: false,
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub repo: Arc<InMemoryLinkRepository>,
    pub service: Arc<LinkService>,
    pub visits: Option<mpsc::Receiver<VisitEvent>>,
}

impl TestApp {
    pub async fn insert(&self, code: &str, url: &str) {
        self.repo
            .insert_if_absent(NewShortLink {
                code: code.to_string(),
                original_url: url.to_string(),
            })
            .await
            .unwrap()
            .expect("code already taken");
    }

    pub async fn visits_of(&self, code: &str) -> i64 {
        self.repo
            .find_by_code(code)
            .await
            .unwrap()
            .map(|link| link.visits)
            .unwrap_or_default()
    }
}

pub struct TestAppBuilder {
    generator: Arc<dyn CodeGenerator>,
    counting: VisitCounting,
    policy: AllocationPolicy,
    rate_limit: RateLimitPolicy,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            generator: Arc::new(ScriptedGenerator::default()),
            counting: VisitCounting::Strict,
            policy: AllocationPolicy::default(),
            rate_limit: generous_rate_limit(),
        }
    }
}

impl TestAppBuilder {
    pub fn generator(mut self, generator: impl CodeGenerator + 'static) -> Self {
        self.generator = Arc::new(generator);
        self
    }

    pub fn counting(mut self, counting: VisitCounting) -> Self {
        self.counting = counting;
        self
    }

    pub fn policy(mut self, policy: AllocationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn rate_limit(mut self, rate_limit: RateLimitPolicy) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    pub fn build(self) -> TestApp {
        let repo = Arc::new(InMemoryLinkRepository::new());
        let service = Arc::new(LinkService::new(
            repo.clone(),
            Arc::new(MokaCache::new(1_000, None)),
            self.generator,
            self.policy,
        ));

        let (tx, rx) = mpsc::channel(128);
        let state = AppState::new(service.clone(), tx, self.counting, BASE_URL);

        let app: Router = build_router(state, self.rate_limit)
            .unwrap()
            .layer(MockConnectInfoLayer);

        TestApp {
            server: TestServer::new(app).unwrap(),
            repo,
            service,
            visits: Some(rx),
        }
    }
}

pub fn spawn_app() -> TestApp {
    TestAppBuilder::default().build()
}

/// Inserts a fixed `ConnectInfo` so per-IP rate limiting can key requests.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
