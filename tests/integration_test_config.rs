#![allow(dead_code)]

use async_trait::async_trait;
use coinbridge::core::errors::ExchangeError;
use coinbridge::core::kernel::{HttpRequest, HttpResponse, HttpTransport};
use coinbridge::{AdapterBuilder, SpotApi, SwapApi};
use std::collections::VecDeque;
use std::env;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Test configuration utilities
pub struct TestConfig;

impl TestConfig {
    /// Check if live API tests should run (requires network, and credentials for private calls)
    pub fn should_run_live_tests() -> bool {
        env::var("RUN_LIVE_TESTS").unwrap_or_default() == "true"
    }

    /// Builder with throwaway credentials, enough to sign requests
    pub fn signed_builder() -> AdapterBuilder {
        AdapterBuilder::new()
            .api_key("test_api_key")
            .secret_key("test_secret_key")
            .passphrase("test_passphrase")
            .account_id("12345")
    }
}

/// Transport that records every request and answers from a queue of canned responses.
///
/// An empty queue answers `200 {}`.
#[derive(Default)]
pub struct StubTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<HttpResponse, ExchangeError>>>,
}

impl StubTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn replying(status: u16, body: &str) -> Arc<Self> {
        let stub = Self::new();
        stub.push(status, body);
        stub
    }

    pub fn failing(error: ExchangeError) -> Arc<Self> {
        let stub = Self::new();
        stub.responses.lock().unwrap().push_back(Err(error));
        stub
    }

    pub fn push(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests()
            .pop()
            .expect("no request was sent")
    }

    /// Query string of the last request, without the leading `?`.
    pub fn last_query(&self) -> String {
        let url = self.last_request().url;
        url.split_once('?').map(|(_, q)| q.to_string()).unwrap_or_default()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ExchangeError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, "{}")))
    }
}

/// Common test utilities
pub mod utils {
    use super::*;

    pub fn spot(name: &str, transport: &Arc<StubTransport>) -> Box<dyn SpotApi> {
        AdapterBuilder::new()
            .with_transport(transport.clone())
            .build(name)
            .unwrap()
    }

    pub fn signed_spot(name: &str, transport: &Arc<StubTransport>) -> Box<dyn SpotApi> {
        TestConfig::signed_builder()
            .with_transport(transport.clone())
            .build(name)
            .unwrap()
    }

    pub fn swap(name: &str, transport: &Arc<StubTransport>) -> Box<dyn SwapApi> {
        AdapterBuilder::new()
            .with_transport(transport.clone())
            .build_swap(name)
            .unwrap()
    }

    /// Route `tracing` output through the test harness; `RUST_LOG` picks the level.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    }
}
