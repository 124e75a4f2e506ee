use serde::Deserialize;

use super::{Custom, Page};

/// Channel object embedded in a membership.
///
/// Only `id` is guaranteed; the other fields are present when the
/// `channel` (or `channel.custom`) include flag is requested.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelMetadata {
    /// Channel identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Custom channel fields.
    #[serde(default)]
    pub custom: Option<Custom>,
    /// Last update timestamp (ISO 8601).
    #[serde(default)]
    pub updated: Option<String>,
    /// Entity tag of the channel object.
    #[serde(default)]
    pub e_tag: Option<String>,
}

/// User object embedded in a channel member.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UuidMetadata {
    /// User identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Identifier in an external system.
    #[serde(default)]
    pub external_id: Option<String>,
    /// Profile picture URL.
    #[serde(default)]
    pub profile_url: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Custom user fields.
    #[serde(default)]
    pub custom: Option<Custom>,
    /// Last update timestamp (ISO 8601).
    #[serde(default)]
    pub updated: Option<String>,
    /// Entity tag of the user object.
    #[serde(default)]
    pub e_tag: Option<String>,
}

/// A membership of the target user in one channel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    /// The channel the user belongs to.
    pub channel: ChannelMetadata,
    /// Custom membership fields.
    #[serde(default)]
    pub custom: Option<Custom>,
    /// Last update timestamp (ISO 8601).
    #[serde(default)]
    pub updated: Option<String>,
    /// Entity tag of the membership.
    #[serde(default)]
    pub e_tag: Option<String>,
}

/// A member (user) of the target channel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// The user belonging to the channel.
    pub uuid: UuidMetadata,
    /// Custom membership fields.
    #[serde(default)]
    pub custom: Option<Custom>,
    /// Last update timestamp (ISO 8601).
    #[serde(default)]
    pub updated: Option<String>,
    /// Entity tag of the membership.
    #[serde(default)]
    pub e_tag: Option<String>,
}

/// One page of memberships, as returned by the membership endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipsResult {
    /// Memberships in this page.
    #[serde(default)]
    pub data: Vec<Membership>,
    /// Total number of memberships, when `TotalCount` was requested.
    #[serde(default)]
    pub total_count: Option<u64>,
    /// Cursor of the next page.
    #[serde(default)]
    pub next: Option<String>,
    /// Cursor of the previous page.
    #[serde(default)]
    pub prev: Option<String>,
}

/// One page of channel members, as returned by the member endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembersResult {
    /// Members in this page.
    #[serde(default)]
    pub data: Vec<Member>,
    /// Total number of members, when `TotalCount` was requested.
    #[serde(default)]
    pub total_count: Option<u64>,
    /// Cursor of the next page.
    #[serde(default)]
    pub next: Option<String>,
    /// Cursor of the previous page.
    #[serde(default)]
    pub prev: Option<String>,
}

macro_rules! impl_paging {
    ($result:ty) => {
        impl $result {
            /// Page selector for the page after this one, if any.
            pub fn next_page(&self) -> Option<Page> {
                self.next.as_deref().map(Page::next)
            }

            /// Page selector for the page before this one, if any.
            pub fn prev_page(&self) -> Option<Page> {
                self.prev.as_deref().map(Page::prev)
            }
        }
    };
}

impl_paging!(MembershipsResult);
impl_paging!(MembersResult);

/// One entry of the `details` list of a service error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    /// What went wrong.
    #[serde(default)]
    pub message: Option<String>,
    /// Where it went wrong, e.g. `"set[0].channel.id"`.
    #[serde(default)]
    pub location: Option<String>,
    /// Kind of location, e.g. `"body"` or `"query"`.
    #[serde(default)]
    pub location_type: Option<String>,
}

/// Error envelope returned by the service on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub(crate) error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) source: Option<String>,
    #[serde(default)]
    pub(crate) details: Vec<ErrorDetail>,
}
