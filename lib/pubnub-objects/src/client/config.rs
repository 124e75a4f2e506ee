use std::time::Duration;

use url::Url;

use super::auth::SecureString;

/// Default origin of the PubNub network.
pub const DEFAULT_ORIGIN: &str = "ps.pndsn.com";

/// Default timeout of a non-subscribe request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for establishing a connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolved, immutable client configuration.
///
/// Created by [`PubNubClientBuilder::build`](super::PubNubClientBuilder::build)
/// and shared by every request built from the same client.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub(super) base_url: Url,
    pub(super) subscribe_key: Option<String>,
    pub(super) publish_key: Option<String>,
    pub(super) secret_key: Option<SecureString>,
    pub(super) auth_key: Option<SecureString>,
    pub(super) user_id: String,
    pub(super) non_subscribe_request_timeout: Duration,
    pub(super) connect_timeout: Duration,
}

impl Configuration {
    /// Scheme, origin and port every request path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Subscribe key, the first path segment of every objects endpoint.
    pub fn subscribe_key(&self) -> Option<&str> {
        self.subscribe_key.as_deref()
    }

    /// Publish key, part of the signed message.
    pub fn publish_key(&self) -> Option<&str> {
        self.publish_key.as_deref()
    }

    /// Secret key; when set, every request is signed.
    pub fn secret_key(&self) -> Option<&SecureString> {
        self.secret_key.as_ref()
    }

    /// Access Manager token sent as `auth`.
    pub fn auth_key(&self) -> Option<&SecureString> {
        self.auth_key.as_ref()
    }

    /// Identity of this client, sent as `uuid`.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Overall timeout of a request.
    pub fn non_subscribe_request_timeout(&self) -> Duration {
        self.non_subscribe_request_timeout
    }

    /// Timeout for establishing a connection.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}
