use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use http::Method;
use sha2::Sha256;

use super::PubNubError;
use super::auth::SecureString;
use super::request::QueryParams;

type HmacSha256 = Hmac<Sha256>;

/// Computes the `v2` request signature.
///
/// The signed message is `METHOD\nPUBLISH_KEY\nPATH\nSORTED_QUERY\nBODY`, where the
/// query excludes `signature` itself and must already contain `timestamp`.
pub(crate) fn sign_v2(
    secret_key: &SecureString,
    publish_key: &str,
    method: &Method,
    path: &str,
    query: &QueryParams,
    body: Option<&[u8]>,
) -> Result<String, PubNubError> {
    let body = body.map(String::from_utf8_lossy).unwrap_or_default();
    let message = format!(
        "{method}\n{publish_key}\n{path}\n{}\n{body}",
        query.to_sorted_query_string()
    );

    let mut mac = HmacSha256::new_from_slice(secret_key.as_str().as_bytes())
        .map_err(|err| PubNubError::validation(format!("invalid secret key: {err}")))?;
    mac.update(message.as_bytes());
    let digest = mac.finalize().into_bytes();

    Ok(format!("v2.{}", URL_SAFE_NO_PAD.encode(digest)))
}
