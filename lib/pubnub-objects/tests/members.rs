#![allow(missing_docs, clippy::expect_used)]

use http::Method;
use pubnub_objects::{CollectionEndpoint, MemberInclude, Page, PubNubError};
use rstest::rstest;
use serde_json::json;

mod common;
pub use self::common::*;

#[rstest]
#[tokio::test]
async fn test_set_members(#[future] members_server: MockServer) -> anyhow::Result<()> {
    let server = members_server.await;
    let mut custom = serde_json::Map::new();
    custom.insert("role".to_string(), json!("admin"));

    let result = server
        .client()
        .set_members()
        .with_channel("news")
        .with_uuids(["user-1", "user-2"])
        .with_custom(custom)
        .add_include(MemberInclude::CustomUuidFields)
        .add_include(MemberInclude::CustomFields)
        .await?;

    let request = server.single_request();
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.path, "/v2/objects/sub-c-key/channels/news/uuids");
    assert_eq!(request.query_values("include"), vec!["custom%2Cuuid.custom"]);
    assert_eq!(
        request.json_body(),
        json!({
            "set": [
                {"uuid": {"id": "user-1"}, "custom": {"role": "admin"}},
                {"uuid": {"id": "user-2"}, "custom": {"role": "admin"}}
            ]
        })
    );

    assert_eq!(result.data.len(), 1);
    assert_eq!(result.data[0].uuid.id, "user-1");
    assert_eq!(result.data[0].uuid.name.as_deref(), Some("John"));
    assert_eq!(result.total_count, None);
    assert_eq!(result.next_page(), None);
    assert_eq!(result.prev_page(), Some(Page::prev("MA")));

    Ok(())
}

#[rstest]
#[case::missing_channel(None, vec!["user-1"], "channel missing")]
#[case::missing_uuids(Some("news"), vec![], "uuids missing")]
#[tokio::test]
async fn test_set_members_validation_before_network(
    #[future] members_server: MockServer,
    #[case] channel: Option<&str>,
    #[case] uuids: Vec<&str>,
    #[case] expected: &str,
) {
    let server = members_server.await;
    let mut builder = server.client().set_members().with_uuids(uuids);
    if let Some(channel) = channel {
        builder = builder.with_channel(channel);
    }

    let error = builder.await.expect_err("should fail validation");

    assert!(
        matches!(&error, PubNubError::Validation { message } if message == expected),
        "unexpected error: {error:?}"
    );
    assert!(server.requests().is_empty(), "no request should be sent");
}

#[rstest]
#[tokio::test]
async fn test_get_members(#[future] members_server: MockServer) -> anyhow::Result<()> {
    let server = members_server.await;

    server
        .client()
        .get_members()
        .with_channel("news")
        .add_include(MemberInclude::TotalCount)
        .with_page(Page::prev("MA"))
        .with_limit(0)
        .await?;

    let request = server.single_request();
    assert_eq!(request.method, Method::GET);
    insta::assert_snapshot!(
        request.query,
        @"pnsdk=PubNub-Rust-Objects%2F0.1.0&uuid=gateway&count=true&end=MA"
    );

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_remove_members(#[future] members_server: MockServer) -> anyhow::Result<()> {
    let server = members_server.await;

    server
        .client()
        .remove_members()
        .with_channel("news")
        .with_uuids(["user-1", "user-2"])
        .await?;

    let request = server.single_request();
    assert_eq!(
        request.json_body(),
        json!({"delete": [{"uuid": {"id": "user-1"}}, {"uuid": {"id": "user-2"}}]})
    );

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_manage_members(#[future] members_server: MockServer) -> anyhow::Result<()> {
    let server = members_server.await;

    server
        .client()
        .manage_members()
        .with_channel("news")
        .with_set_uuids(["user-1"])
        .with_remove_uuids(["user-2"])
        .await?;

    let request = server.single_request();
    assert_eq!(
        request.json_body(),
        json!({
            "set": [{"uuid": {"id": "user-1"}}],
            "delete": [{"uuid": {"id": "user-2"}}]
        })
    );

    Ok(())
}
