use std::sync::Arc;
use std::time::Duration;

use http::Uri;
use http::uri::Scheme;
use url::Url;

use super::auth::SecureString;
use super::config::{
    Configuration, DEFAULT_CONNECT_TIMEOUT, DEFAULT_ORIGIN, DEFAULT_REQUEST_TIMEOUT,
};
use super::{PubNubClient, PubNubError};

/// Builder for creating [`PubNubClient`] instances.
///
/// # Default Configuration
///
/// - **Scheme**: HTTPS
/// - **Origin**: `ps.pndsn.com`
/// - **Port**: the scheme default
/// - **User id**: `pn-` followed by a random UUID v4
/// - **Timeouts**: 10 seconds for both the request and the connection
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
///
/// use pubnub_objects::PubNubClient;
///
/// # fn example() -> Result<(), pubnub_objects::PubNubError> {
/// let client = PubNubClient::builder()
///     .with_subscribe_key("sub-c-key")
///     .with_publish_key("pub-c-key")
///     .with_user_id("fax-gateway")
///     .with_auth_key("p0F2AkF0GmX...")
///     .with_non_subscribe_request_timeout(Duration::from_secs(5))
///     .build()?;
/// # let _ = client;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PubNubClientBuilder {
    client: Option<reqwest::Client>,
    scheme: Scheme,
    origin: String,
    port: Option<u16>,
    subscribe_key: Option<String>,
    publish_key: Option<String>,
    secret_key: Option<SecureString>,
    auth_key: Option<SecureString>,
    user_id: String,
    non_subscribe_request_timeout: Duration,
    connect_timeout: Duration,
}

impl Default for PubNubClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            scheme: Scheme::HTTPS,
            origin: DEFAULT_ORIGIN.to_string(),
            port: None,
            subscribe_key: None,
            publish_key: None,
            secret_key: None,
            auth_key: None,
            user_id: format!("pn-{}", uuid::Uuid::new_v4()),
            non_subscribe_request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl PubNubClientBuilder {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - [`PubNubError::InvalidOrigin`] if scheme, origin and port do not form a valid URL
    /// - [`PubNubError::Validation`] if the user id is empty
    /// - [`PubNubError::ReqwestError`] if the HTTP client cannot be created
    pub fn build(self) -> Result<PubNubClient, PubNubError> {
        let Self {
            client,
            scheme,
            origin,
            port,
            subscribe_key,
            publish_key,
            secret_key,
            auth_key,
            user_id,
            non_subscribe_request_timeout,
            connect_timeout,
        } = self;

        if user_id.is_empty() {
            return Err(PubNubError::validation("uuid missing"));
        }

        let base_url = build_base_url(scheme, &origin, port)?;
        let http = match client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .connect_timeout(connect_timeout)
                .build()?,
        };

        let config = Configuration {
            base_url,
            subscribe_key,
            publish_key,
            secret_key,
            auth_key,
            user_id,
            non_subscribe_request_timeout,
            connect_timeout,
        };

        Ok(PubNubClient {
            http,
            config: Arc::new(config),
        })
    }

    /// Uses a preconfigured HTTP client instead of creating one.
    ///
    /// The connect timeout is then left to that client.
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the scheme, `https` by default.
    #[must_use]
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the origin host name.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Sets an explicit port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the subscribe key, required by every objects endpoint.
    #[must_use]
    pub fn with_subscribe_key(mut self, subscribe_key: impl Into<String>) -> Self {
        self.subscribe_key = Some(subscribe_key.into());
        self
    }

    /// Sets the publish key.
    #[must_use]
    pub fn with_publish_key(mut self, publish_key: impl Into<String>) -> Self {
        self.publish_key = Some(publish_key.into());
        self
    }

    /// Sets the secret key. Requests are then signed.
    #[must_use]
    pub fn with_secret_key(mut self, secret_key: impl Into<SecureString>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Sets the Access Manager token.
    #[must_use]
    pub fn with_auth_key(mut self, auth_key: impl Into<SecureString>) -> Self {
        self.auth_key = Some(auth_key.into());
        self
    }

    /// Sets the identity of this client.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Sets the overall timeout of a request.
    #[must_use]
    pub fn with_non_subscribe_request_timeout(mut self, timeout: Duration) -> Self {
        self.non_subscribe_request_timeout = timeout;
        self
    }

    /// Sets the timeout for establishing a connection.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

fn build_base_url(scheme: Scheme, origin: &str, port: Option<u16>) -> Result<Url, PubNubError> {
    let invalid = |error: String| PubNubError::InvalidOrigin { error };

    if origin.is_empty() {
        return Err(invalid("origin is empty".to_string()));
    }

    let authority = match port {
        Some(port) => format!("{origin}:{port}"),
        None => origin.to_string(),
    };
    let uri = Uri::builder()
        .scheme(scheme)
        .authority(authority)
        .path_and_query("/")
        .build()
        .map_err(|err| invalid(err.to_string()))?;

    uri.to_string()
        .parse::<Url>()
        .map_err(|err| invalid(err.to_string()))
}
