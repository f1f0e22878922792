//! Shared helpers for the root crate's integration tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use play_architect::ui::App;
use play_architect_core::gateway::{FakeTransport, Transport};
use play_architect_core::{Gateway, GatewayConfig};
use tokio::runtime::Runtime;

/// Gateway responses recorded under `core/tests/fixtures`
pub fn load_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("core/tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", path.display()))
}

/// Gateway with a key that replies with `fixture` to every call
pub fn fake_gateway(fixture: &str) -> Gateway {
    Gateway::with_transport(
        GatewayConfig::default().with_api_key("test-key"),
        Transport::Fake(FakeTransport::new(&load_fixture(fixture))),
    )
}

/// Gateway without a key
pub fn unconfigured_gateway(fixture: &str) -> Gateway {
    Gateway::with_transport(
        GatewayConfig::default(),
        Transport::Fake(FakeTransport::new(&load_fixture(fixture))),
    )
}

pub fn call_count(gateway: &Gateway) -> usize {
    gateway.transport().as_fake().map_or(0, |f| f.call_count())
}

pub fn runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("Failed to build runtime")
}

/// App wired to `gateway` on `runtime`
pub fn app_with(gateway: &Arc<Gateway>, runtime: &Runtime) -> App {
    App::new(Arc::clone(gateway), runtime.handle().clone(), "Health & Fitness")
}

/// Poll completions until `expected` have been applied or a few seconds pass
pub fn wait_for_completions(app: &mut App, expected: usize) -> usize {
    let mut applied = 0;
    for _ in 0..500 {
        applied += app.process_completions();
        if applied >= expected {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    applied
}
