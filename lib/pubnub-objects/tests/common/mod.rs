#![allow(dead_code, missing_docs)]

use rstest::fixture;
use serde_json::json;
use tracing::info;

mod mock_server;
pub use self::mock_server::*;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

pub fn memberships_payload() -> serde_json::Value {
    json!({
        "status": 200,
        "data": [
            {
                "channel": {"id": "news", "name": "News"},
                "custom": {"role": "subscriber"},
                "updated": "2024-01-10T10:00:00.000Z",
                "eTag": "AZO/t53al7m8fw"
            },
            {
                "channel": {"id": "sports"},
                "updated": "2024-01-10T10:00:00.000Z",
                "eTag": "AZO/t53al7m8fx"
            }
        ],
        "totalCount": 2,
        "next": "Mg"
    })
}

pub fn members_payload() -> serde_json::Value {
    json!({
        "status": 200,
        "data": [
            {
                "uuid": {"id": "user-1", "name": "John"},
                "custom": {"role": "admin"},
                "eTag": "AbCd"
            }
        ],
        "prev": "MA"
    })
}

#[fixture]
pub async fn memberships_server() -> MockServer {
    init_tracing();
    match MockServer::start(200, memberships_payload()).await {
        Ok(server) => server,
        Err(error) => {
            panic!("fail to start mock server: {error:?}");
        }
    }
}

#[fixture]
pub async fn members_server() -> MockServer {
    init_tracing();
    match MockServer::start(200, members_payload()).await {
        Ok(server) => server,
        Err(error) => {
            panic!("fail to start mock server: {error:?}");
        }
    }
}
