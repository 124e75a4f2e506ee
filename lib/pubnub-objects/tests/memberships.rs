#![allow(missing_docs, clippy::expect_used)]

use http::Method;
use pubnub_objects::{
    CollectionEndpoint, MembershipInclude, Page, PubNubError, SortDirection,
};
use rstest::rstest;
use serde_json::json;
use tracing::info;

mod common;
pub use self::common::*;

#[rstest]
#[tokio::test]
async fn test_set_memberships(#[future] memberships_server: MockServer) -> anyhow::Result<()> {
    let server = memberships_server.await;
    let mut custom = serde_json::Map::new();
    custom.insert("role".to_string(), json!("subscriber"));

    let result = server
        .client()
        .set_memberships()
        .with_uuid("user-1")
        .with_channels(["news", "sports"])
        .with_custom(custom)
        .with_include([MembershipInclude::ChannelFields, MembershipInclude::TotalCount])
        .with_limit(2)
        .add_sort("channel.name", SortDirection::Desc)
        .await?;
    info!(?result, "set memberships");

    let request = server.single_request();
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.path, "/v2/objects/sub-c-key/uuids/user-1/channels");
    insta::assert_snapshot!(
        request.query,
        @"pnsdk=PubNub-Rust-Objects%2F0.1.0&uuid=gateway&include=channel&count=true&limit=2&sort=channel.name%3Adesc"
    );
    insta::assert_json_snapshot!(request.json_body(), @r#"
    {
      "set": [
        {
          "channel": {
            "id": "news"
          },
          "custom": {
            "role": "subscriber"
          }
        },
        {
          "channel": {
            "id": "sports"
          },
          "custom": {
            "role": "subscriber"
          }
        }
      ]
    }
    "#);

    assert_eq!(result.data.len(), 2);
    assert_eq!(result.data[0].channel.id, "news");
    assert_eq!(result.data[0].channel.name.as_deref(), Some("News"));
    assert_eq!(result.data[1].custom, None);
    assert_eq!(result.total_count, Some(2));
    assert_eq!(result.next_page(), Some(Page::next("Mg")));

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_set_memberships_path_segments_are_encoded(
    #[future] memberships_server: MockServer,
) -> anyhow::Result<()> {
    let server = memberships_server.await;

    server
        .client()
        .set_memberships()
        .with_uuid("john doe")
        .add_channel("news")
        .await?;

    let request = server.single_request();
    assert_eq!(request.path, "/v2/objects/sub-c-key/uuids/john%20doe/channels");

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_set_memberships_sends_auth_key(
    #[future] memberships_server: MockServer,
) -> anyhow::Result<()> {
    let server = memberships_server.await;
    let client = server.client_builder().with_auth_key("my-token").build()?;

    client
        .set_memberships()
        .with_uuid("user-1")
        .add_channel("news")
        .await?;

    let request = server.single_request();
    assert_eq!(request.query_values("auth"), vec!["my-token"]);

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_set_memberships_signed_with_secret_key(
    #[future] memberships_server: MockServer,
) -> anyhow::Result<()> {
    let server = memberships_server.await;
    let client = server
        .client_builder()
        .with_publish_key("pub-c-key")
        .with_secret_key("sec-c-secret")
        .build()?;

    client
        .set_memberships()
        .with_uuid("user-1")
        .add_channel("news")
        .await?;

    let request = server.single_request();
    let timestamps = request.query_values("timestamp");
    assert_eq!(timestamps.len(), 1);
    assert!(timestamps[0].parse::<u64>().is_ok());
    let signatures = request.query_values("signature");
    assert_eq!(
        signatures,
        vec![request.expected_signature("sec-c-secret", "pub-c-key")]
    );

    Ok(())
}

#[rstest]
#[case::missing_uuid(None, vec!["news"], "uuid missing")]
#[case::empty_uuid(Some(""), vec!["news"], "uuid missing")]
#[case::missing_channels(Some("user-1"), vec![], "channels missing")]
#[tokio::test]
async fn test_set_memberships_validation_before_network(
    #[future] memberships_server: MockServer,
    #[case] uuid: Option<&str>,
    #[case] channels: Vec<&str>,
    #[case] expected: &str,
) {
    let server = memberships_server.await;
    let mut builder = server.client().set_memberships().with_channels(channels);
    if let Some(uuid) = uuid {
        builder = builder.with_uuid(uuid);
    }

    let error = builder.await.expect_err("should fail validation");

    assert!(
        matches!(&error, PubNubError::Validation { message } if message == expected),
        "unexpected error: {error:?}"
    );
    assert!(server.requests().is_empty(), "no request should be sent");
}

#[tokio::test]
async fn test_set_memberships_without_subscribe_key() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start(200, memberships_payload()).await?;
    let client = pubnub_objects::PubNubClient::builder()
        .with_scheme(http::uri::Scheme::HTTP)
        .with_origin("127.0.0.1")
        .build()?;

    let error = client
        .set_memberships()
        .with_uuid("user-1")
        .add_channel("news")
        .await
        .expect_err("should fail validation");

    insta::assert_snapshot!(error, @"Validation error: Subscribe Key not configured");
    assert!(server.requests().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_set_memberships_server_error() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start(
        400,
        json!({
            "status": 400,
            "error": {
                "message": "Request payload contained invalid input.",
                "source": "objects",
                "details": [{
                    "message": "Provided custom field values are invalid.",
                    "location": "set[0].custom",
                    "locationType": "body"
                }]
            }
        }),
    )
    .await?;

    let error = server
        .client()
        .set_memberships()
        .with_uuid("user-1")
        .add_channel("news")
        .await
        .expect_err("should fail");

    let PubNubError::Server {
        status_code,
        message,
        service,
        details,
    } = error
    else {
        anyhow::bail!("expected a server error, got: {error:?}");
    };
    assert_eq!(status_code, 400);
    assert_eq!(message, "Request payload contained invalid input.");
    assert_eq!(service.as_deref(), Some("objects"));
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].location.as_deref(), Some("set[0].custom"));

    Ok(())
}

#[tokio::test]
async fn test_set_memberships_unexpected_status() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start(503, json!("Service Unavailable")).await?;

    let error = server
        .client()
        .set_memberships()
        .with_uuid("user-1")
        .add_channel("news")
        .await
        .expect_err("should fail");

    let PubNubError::UnexpectedStatusCode { status_code, body } = error else {
        anyhow::bail!("expected an unexpected status code, got: {error:?}");
    };
    assert_eq!(status_code, 503);
    assert_eq!(body, r#""Service Unavailable""#);

    Ok(())
}

#[tokio::test]
async fn test_set_memberships_malformed_payload() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start(200, json!({"data": [{"channel": {"id": 42}}]})).await?;

    let error = server
        .client()
        .set_memberships()
        .with_uuid("user-1")
        .add_channel("news")
        .await
        .expect_err("should fail");

    let PubNubError::JsonError { path, .. } = error else {
        anyhow::bail!("expected a JSON error, got: {error:?}");
    };
    assert_eq!(path, "data[0].channel.id");

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_get_memberships(#[future] memberships_server: MockServer) -> anyhow::Result<()> {
    let server = memberships_server.await;

    let result = server
        .client()
        .get_memberships()
        .with_uuid("user-1")
        .with_page(Page::next("MQ"))
        .with_filter("channel.name like 'n*'")
        .await?;

    let request = server.single_request();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.body, "");
    assert_eq!(request.query_values("start"), vec!["MQ"]);
    assert_eq!(request.query_values("filter"), vec!["channel.name%20like%20%27n%2A%27"]);
    assert_eq!(result.data.len(), 2);

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_remove_memberships(#[future] memberships_server: MockServer) -> anyhow::Result<()> {
    let server = memberships_server.await;

    server
        .client()
        .remove_memberships()
        .with_uuid("user-1")
        .with_channels(["news"])
        .await?;

    let request = server.single_request();
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(
        request.json_body(),
        json!({"delete": [{"channel": {"id": "news"}}]})
    );

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_manage_memberships(#[future] memberships_server: MockServer) -> anyhow::Result<()> {
    let server = memberships_server.await;

    server
        .client()
        .manage_memberships()
        .with_uuid("user-1")
        .with_set_channels(["news"])
        .with_remove_channels(["sports"])
        .add_sort_field("updated")
        .await?;

    let request = server.single_request();
    assert_eq!(request.query_values("sort"), vec!["updated"]);
    assert_eq!(
        request.json_body(),
        json!({
            "set": [{"channel": {"id": "news"}}],
            "delete": [{"channel": {"id": "sports"}}]
        })
    );

    Ok(())
}
