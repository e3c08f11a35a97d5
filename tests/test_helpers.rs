#![allow(dead_code)]

use std::sync::Arc;

use hop_mock::client::{Client, ClientBuilder};
use hop_mock::MockBroker;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Generated random topic name for testing.
pub fn random_topic_name() -> String {
    format!("test_topic_{}", uuid::Uuid::new_v4())
}

/// Generated random consumer group name for testing.
pub fn random_group_name() -> String {
    format!("test_group_{}", uuid::Uuid::new_v4())
}

/// A fresh broker and a client bound to it.
pub fn client() -> (Arc<MockBroker>, Client) {
    let broker = Arc::new(MockBroker::new());
    let client = ClientBuilder::new(Arc::clone(&broker))
        .client_id("test")
        .build();

    (broker, client)
}

/// Enables debug logging if the `RUST_LOG` environment variable is set. Does nothing if
/// `RUST_LOG` is not set.
pub fn maybe_start_logging() {
    if std::env::var("RUST_LOG").is_ok() {
        start_logging()
    }
}

/// Start logging.
pub fn start_logging() {
    // `try_init` fails when another test already installed the subscriber, which is fine
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .finish()
        .try_init();
}
