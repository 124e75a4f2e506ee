use std::time::{SystemTime, UNIX_EPOCH};

use headers::HeaderMapExt;
use reqwest::{Body, Request};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::request::{ObjectsRequest, QueryParams};
use super::signature::sign_v2;
use super::{PubNubClient, PubNubError};
use crate::objects::ErrorEnvelope;

/// Maximum length of a response body kept in an error.
const BODY_MAX_LENGTH: usize = 1024;

impl PubNubClient {
    /// Signs, sends the request and decodes the response.
    pub(crate) async fn exchange<T>(&self, mut request: ObjectsRequest) -> Result<T, PubNubError>
    where
        T: DeserializeOwned,
    {
        let path = request.path().resolve()?;
        self.sign(&path, &mut request)?;

        let url = self.build_url(&path, request.query())?;
        let http_request = self.build_request(url, &request);

        let operation = request.operation();
        debug!(%operation, method = %request.method(), %path, "sending...");
        let response = self.http.execute(http_request).await?;
        debug!(%operation, status = %response.status(), "...receiving");

        let status_code = response.status().as_u16();
        let body = response.text().await?;
        if !(200..300).contains(&status_code) {
            let error = error_from_response(status_code, body);
            warn!(%operation, %error, "request failed");
            return Err(error);
        }

        decode_json(&body)
    }

    /// Adds `timestamp` and `signature` when a secret key is configured.
    fn sign(&self, path: &str, request: &mut ObjectsRequest) -> Result<(), PubNubError> {
        let Some(secret_key) = self
            .config
            .secret_key()
            .filter(|secret_key| !secret_key.is_empty())
        else {
            return Ok(());
        };

        let timestamp = unix_timestamp(SystemTime::now())?;
        request.query_mut().insert("timestamp", timestamp.to_string());

        let signature = sign_v2(
            secret_key,
            self.config.publish_key().unwrap_or_default(),
            request.method(),
            path,
            request.query(),
            request.body(),
        )?;
        request.query_mut().insert("signature", signature);
        Ok(())
    }

    fn build_url(&self, path: &str, query: &QueryParams) -> Result<Url, PubNubError> {
        let url = format!(
            "{}/{}",
            self.config.base_url().as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = url.parse::<Url>()?;

        if !query.is_empty() {
            url.set_query(Some(&query.to_query_string()));
        }

        Ok(url)
    }

    fn build_request(&self, url: Url, request: &ObjectsRequest) -> Request {
        let mut http_request = Request::new(request.method().clone(), url);
        *http_request.timeout_mut() = Some(self.config.non_subscribe_request_timeout());

        if let Some(body) = request.body() {
            http_request
                .headers_mut()
                .typed_insert(headers::ContentType::json());
            *http_request.body_mut() = Some(Body::from(body.to_vec()));
        }

        http_request
    }
}

/// Seconds since the Unix epoch; a clock set before it cannot sign.
fn unix_timestamp(now: SystemTime) -> Result<u64, PubNubError> {
    now.duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .map_err(|err| PubNubError::InvalidTimestamp {
            error: format!("system clock is {:?} before the Unix epoch", err.duration()),
        })
}

fn decode_json<T>(body: &str) -> Result<T, PubNubError>
where
    T: DeserializeOwned,
{
    let deserializer = &mut serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(deserializer).map_err(|err| PubNubError::JsonError {
        path: err.path().to_string(),
        error: err.into_inner(),
        body: truncate(body),
    })
}

fn error_from_response(status_code: u16, body: String) -> PubNubError {
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => PubNubError::Server {
            status_code,
            message: envelope
                .error
                .message
                .unwrap_or_else(|| "Unknown error".to_string()),
            service: envelope.error.source,
            details: envelope.error.details,
        },
        Err(_) => PubNubError::UnexpectedStatusCode {
            status_code,
            body: truncate(&body),
        },
    }
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(BODY_MAX_LENGTH) {
        Some((end, _)) => format!("{}... (truncated)", text.get(..end).unwrap_or(text)),
        None => text.to_string(),
    }
}
