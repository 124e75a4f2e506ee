//! # PubNub Objects
//!
//! Typed request builders for the PubNub App Context (objects) API:
//! channel memberships of a user and members of a channel.
//!
//! Every endpoint follows the same flow: configure a builder, await it.
//! Required parameters are validated before any network call; the request is
//! then assembled, optionally signed, sent, and its JSON response decoded.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pubnub_objects::{CollectionEndpoint, MembershipInclude, PubNubClient, SortDirection};
//!
//! # async fn example() -> Result<(), pubnub_objects::PubNubError> {
//! let client = PubNubClient::builder()
//!     .with_subscribe_key("sub-c-key")
//!     .with_user_id("fax-gateway")
//!     .build()?;
//!
//! // PATCH /v2/objects/sub-c-key/uuids/user-1/channels
//! let result = client
//!     .set_memberships()
//!     .with_uuid("user-1")
//!     .with_channels(["news", "sports"])
//!     .with_include([MembershipInclude::ChannelFields, MembershipInclude::TotalCount])
//!     .add_sort("channel.name", SortDirection::Asc)
//!     .await?;
//!
//! println!("{:?} memberships", result.total_count);
//!
//! // Walk the following pages
//! let mut page = result.next_page();
//! while let Some(next) = page {
//!     let result = client.get_memberships().with_uuid("user-1").with_page(next).await?;
//!     page = result.next_page();
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Missing parameters surface as [`PubNubError::Validation`] without any I/O:
//!
//! ```rust
//! use pubnub_objects::{PubNubClient, PubNubError};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let client = PubNubClient::builder().with_subscribe_key("sub-c-key").build().unwrap();
//!
//! let error = client.set_memberships().with_channels(["news"]).await.unwrap_err();
//! assert!(matches!(error, PubNubError::Validation { message } if message == "uuid missing"));
//! # }
//! ```
//!
//! Non-2xx answers carrying the service error envelope become [`PubNubError::Server`],
//! other failures [`PubNubError::UnexpectedStatusCode`].
//!
//! ## Logging
//!
//! Requests and responses are logged with [`tracing`] at `debug` level,
//! failed calls at `warn`. Secret and auth keys never appear in logs.

mod client;
pub use self::client::{
    Configuration, DEFAULT_CONNECT_TIMEOUT, DEFAULT_ORIGIN, DEFAULT_REQUEST_TIMEOUT, PNSDK,
    PubNubClient, PubNubClientBuilder, PubNubError, SecureString,
};

pub mod objects;
pub use self::objects::{
    ChannelMetadata, CollectionEndpoint, CollectionOptions, Custom, ErrorDetail, GetMembers,
    GetMemberships, IncludeField, ManageMembers, ManageMemberships, Member, MemberInclude,
    MembersResult, Membership, MembershipInclude, MembershipsResult, OperationType, Page,
    RemoveMembers, RemoveMemberships, SetMembers, SetMemberships, SortDirection, UuidMetadata,
};
