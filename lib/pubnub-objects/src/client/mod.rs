use std::sync::Arc;

use crate::objects::{
    GetMembers, GetMemberships, ManageMembers, ManageMemberships, RemoveMembers,
    RemoveMemberships, SetMembers, SetMemberships,
};

mod builder;
pub use self::builder::PubNubClientBuilder;

mod config;
pub use self::config::{
    Configuration, DEFAULT_CONNECT_TIMEOUT, DEFAULT_ORIGIN, DEFAULT_REQUEST_TIMEOUT,
};

mod auth;
pub use self::auth::SecureString;

mod error;
pub use self::error::PubNubError;

mod request;
pub(crate) use self::request::{ObjectsRequest, QueryParams, RequestPath};

mod execution;
mod signature;

/// SDK identifier sent as `pnsdk` with every request.
pub const PNSDK: &str = concat!("PubNub-Rust-Objects/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the PubNub App Context (objects) API.
///
/// Cloning is cheap: clones share the HTTP connection pool and the configuration.
/// Each endpoint method returns a fresh request builder; awaiting the builder sends it.
///
/// # Example
///
/// ```rust,no_run
/// use pubnub_objects::PubNubClient;
///
/// # async fn example() -> Result<(), pubnub_objects::PubNubError> {
/// let client = PubNubClient::builder()
///     .with_subscribe_key("sub-c-key")
///     .with_user_id("fax-gateway")
///     .build()?;
///
/// let members = client.get_members().with_channel("news").await?;
/// println!("{} members", members.data.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PubNubClient {
    http: reqwest::Client,
    config: Arc<Configuration>,
}

impl PubNubClient {
    /// Creates a new builder with the default configuration.
    pub fn builder() -> PubNubClientBuilder {
        PubNubClientBuilder::default()
    }

    /// Returns the client configuration.
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Lists the channel memberships of a user.
    pub fn get_memberships(&self) -> GetMemberships {
        GetMemberships::new(self.clone())
    }

    /// Adds or updates channel memberships of a user.
    pub fn set_memberships(&self) -> SetMemberships {
        SetMemberships::new(self.clone())
    }

    /// Removes channel memberships of a user.
    pub fn remove_memberships(&self) -> RemoveMemberships {
        RemoveMemberships::new(self.clone())
    }

    /// Adds and removes channel memberships of a user in one call.
    pub fn manage_memberships(&self) -> ManageMemberships {
        ManageMemberships::new(self.clone())
    }

    /// Lists the members of a channel.
    pub fn get_members(&self) -> GetMembers {
        GetMembers::new(self.clone())
    }

    /// Adds or updates members of a channel.
    pub fn set_members(&self) -> SetMembers {
        SetMembers::new(self.clone())
    }

    /// Removes members of a channel.
    pub fn remove_members(&self) -> RemoveMembers {
        RemoveMembers::new(self.clone())
    }

    /// Adds and removes members of a channel in one call.
    pub fn manage_members(&self) -> ManageMembers {
        ManageMembers::new(self.clone())
    }

    /// Query parameters sent with every request: `pnsdk`, `uuid`, then `auth` when set.
    pub(crate) fn default_params(&self, auth_required: bool) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert("pnsdk", PNSDK);
        params.insert("uuid", self.config.user_id());

        if auth_required
            && let Some(auth_key) = self.config.auth_key().filter(|key| !key.is_empty())
        {
            params.insert("auth", auth_key.as_str());
        }

        params
    }
}
