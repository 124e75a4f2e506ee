//! Objects API endpoints.
//!
//! Every endpoint is a fluent builder following the same template:
//! accumulate parameters, validate them, assemble path/query/body,
//! execute the HTTP call and decode the typed result.
//! Builders implement [`IntoFuture`](std::future::IntoFuture): awaiting one sends the request.

use http::Method;
use serde::Serialize;

use crate::client::{ObjectsRequest, PubNubClient, PubNubError, QueryParams, RequestPath};

mod collection;
pub use self::collection::{
    CollectionEndpoint, CollectionOptions, IncludeField, MemberInclude, MembershipInclude, Page,
    SortDirection,
};

mod result;
pub(crate) use self::result::ErrorEnvelope;
pub use self::result::{
    ChannelMetadata, ErrorDetail, Member, MembersResult, Membership, MembershipsResult,
    UuidMetadata,
};

mod memberships;
pub use self::memberships::{GetMemberships, ManageMemberships, RemoveMemberships, SetMemberships};

mod members;
pub use self::members::{GetMembers, ManageMembers, RemoveMembers, SetMembers};

/// Free-form custom fields attached to an object or an association.
pub type Custom = serde_json::Map<String, serde_json::Value>;

/// Identifies the endpoint a request was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum OperationType {
    /// List the channel memberships of a user.
    GetMemberships,
    /// Add or update channel memberships of a user.
    SetMemberships,
    /// Remove channel memberships of a user.
    RemoveMemberships,
    /// Add and remove channel memberships of a user in one call.
    ManageMemberships,
    /// List the members of a channel.
    GetMembers,
    /// Add or update members of a channel.
    SetMembers,
    /// Remove members of a channel.
    RemoveMembers,
    /// Add and remove members of a channel in one call.
    ManageMembers,
}

/// `{"id": ...}` reference to a channel or user inside a request body.
#[derive(Debug, Serialize)]
pub(crate) struct ObjectId<'a> {
    pub(crate) id: &'a str,
}

/// The request template shared by all objects endpoints.
pub(crate) trait Endpoint {
    const OPERATION: OperationType;

    fn client(&self) -> &PubNubClient;

    /// Synchronous checks run before any I/O.
    fn validate_params(&self) -> Result<(), PubNubError>;

    fn http_method(&self) -> Method;

    fn build_path(&self) -> RequestPath;

    /// Endpoint parameters, added after the client defaults.
    fn custom_params(&self, params: &mut QueryParams);

    /// JSON body, if the endpoint sends one.
    fn build_data(&self) -> Result<Option<Vec<u8>>, PubNubError> {
        Ok(None)
    }

    fn is_auth_required(&self) -> bool {
        true
    }

    /// Validates and assembles the request without sending it.
    fn prepare(&self) -> Result<ObjectsRequest, PubNubError> {
        self.validate_params()?;

        let mut params = self.client().default_params(self.is_auth_required());
        self.custom_params(&mut params);

        let request = ObjectsRequest::new(
            Self::OPERATION,
            self.http_method(),
            self.build_path(),
            params,
        );
        Ok(match self.build_data()? {
            Some(body) => request.with_body(body),
            None => request,
        })
    }
}

/// Ensures the configured subscribe key is usable.
pub(crate) fn validate_subscribe_key(client: &PubNubClient) -> Result<&str, PubNubError> {
    client
        .configuration()
        .subscribe_key()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| PubNubError::validation("Subscribe Key not configured"))
}

/// Ensures an identifier was provided and is not empty.
pub(crate) fn validate_identifier<'a>(
    value: Option<&'a str>,
    missing: &'static str,
) -> Result<&'a str, PubNubError> {
    value
        .filter(|value| !value.is_empty())
        .ok_or_else(|| PubNubError::validation(missing))
}

/// Ensures an identifier list has at least one entry.
pub(crate) fn validate_list(values: &[String], missing: &'static str) -> Result<(), PubNubError> {
    if values.is_empty() {
        return Err(PubNubError::validation(missing));
    }
    Ok(())
}

/// Custom fields to send, `None` when unset or empty.
pub(crate) fn non_empty_custom(custom: Option<&Custom>) -> Option<&Custom> {
    custom.filter(|custom| !custom.is_empty())
}

pub(crate) async fn execute<E, T>(endpoint: E) -> Result<T, PubNubError>
where
    E: Endpoint,
    T: serde::de::DeserializeOwned,
{
    let request = endpoint.prepare()?;
    let client = endpoint.client().clone();
    drop(endpoint);
    client.exchange(request).await
}

/// Implements `IntoFuture` so that awaiting the builder executes the request.
macro_rules! impl_into_future {
    ($endpoint:ty => $output:ty) => {
        impl std::future::IntoFuture for $endpoint {
            type Output = Result<$output, $crate::PubNubError>;
            type IntoFuture =
                std::pin::Pin<Box<dyn std::future::Future<Output = Self::Output> + Send>>;

            fn into_future(self) -> Self::IntoFuture {
                Box::pin($crate::objects::execute::<_, $output>(self))
            }
        }
    };
}
pub(crate) use impl_into_future;

/// Setter of the required target identifier, `Option<String>` field.
macro_rules! impl_target_setter {
    ($setter:ident($field:ident), $doc:literal: $($endpoint:ty),+ $(,)?) => {
        $(
            impl $endpoint {
                #[doc = $doc]
                #[must_use]
                pub fn $setter(mut self, $field: impl Into<String>) -> Self {
                    self.$field = Some($field.into());
                    self
                }
            }
        )+
    };
}
pub(crate) use impl_target_setter;

/// Setter replacing an identifier list, `Vec<String>` field.
macro_rules! impl_list_setter {
    ($setter:ident($field:ident), $doc:literal: $($endpoint:ty),+ $(,)?) => {
        $(
            impl $endpoint {
                #[doc = $doc]
                #[must_use]
                pub fn $setter<I, S>(mut self, $field: I) -> Self
                where
                    I: IntoIterator<Item = S>,
                    S: Into<String>,
                {
                    self.$field = $field.into_iter().map(Into::into).collect();
                    self
                }
            }
        )+
    };
}
pub(crate) use impl_list_setter;

/// Setter appending one identifier to a `Vec<String>` field.
macro_rules! impl_add_setter {
    ($setter:ident($field:ident), $doc:literal: $($endpoint:ty),+ $(,)?) => {
        $(
            impl $endpoint {
                #[doc = $doc]
                #[must_use]
                pub fn $setter(mut self, value: impl Into<String>) -> Self {
                    self.$field.push(value.into());
                    self
                }
            }
        )+
    };
}
pub(crate) use impl_add_setter;

/// `with_custom` setter, `Option<Custom>` field.
macro_rules! impl_custom_setter {
    ($($endpoint:ty),+ $(,)?) => {
        $(
            impl $endpoint {
                /// Custom fields attached to every added association; an empty map is not sent.
                #[must_use]
                pub fn with_custom(mut self, custom: $crate::objects::Custom) -> Self {
                    self.custom = Some(custom);
                    self
                }
            }
        )+
    };
}
pub(crate) use impl_custom_setter;
