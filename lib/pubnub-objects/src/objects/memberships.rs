use http::Method;
use serde::Serialize;

use super::{
    CollectionEndpoint, CollectionOptions, Custom, Endpoint, MembershipInclude, MembershipsResult,
    ObjectId, OperationType, impl_add_setter, impl_custom_setter, impl_into_future,
    impl_list_setter, impl_target_setter, non_empty_custom, validate_identifier, validate_list,
    validate_subscribe_key,
};
use crate::client::{PubNubClient, PubNubError, QueryParams, RequestPath};

const PATH: &str = "/v2/objects/{sub_key}/uuids/{uuid}/channels";

/// Only the values that are set become path arguments; resolving reports the others.
fn memberships_path(client: &PubNubClient, uuid: Option<&str>) -> RequestPath {
    let mut path = RequestPath::from(PATH);
    if let Some(sub_key) = client.configuration().subscribe_key() {
        path = path.add_param("sub_key", sub_key);
    }
    if let Some(uuid) = uuid {
        path = path.add_param("uuid", uuid);
    }
    path
}

#[derive(Debug, Serialize)]
struct ChannelEntry<'a> {
    channel: ObjectId<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom: Option<&'a Custom>,
}

#[derive(Debug, Default, Serialize)]
struct MembershipsBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    set: Option<Vec<ChannelEntry<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delete: Option<Vec<ChannelEntry<'a>>>,
}

impl MembershipsBody<'_> {
    fn to_bytes(&self) -> Result<Vec<u8>, PubNubError> {
        Ok(serde_json::to_vec(self)?)
    }
}

fn entries<'a>(channels: &'a [String], custom: Option<&'a Custom>) -> Vec<ChannelEntry<'a>> {
    let custom = non_empty_custom(custom);
    channels
        .iter()
        .map(|channel| ChannelEntry {
            channel: ObjectId { id: channel },
            custom,
        })
        .collect()
}

/// Lists the channel memberships of a user.
///
/// `GET /v2/objects/{subscribeKey}/uuids/{uuid}/channels`
#[derive(Debug, Clone)]
pub struct GetMemberships {
    client: PubNubClient,
    uuid: Option<String>,
    collection: CollectionOptions<MembershipInclude>,
}

impl GetMemberships {
    pub(crate) fn new(client: PubNubClient) -> Self {
        Self {
            client,
            uuid: None,
            collection: CollectionOptions::default(),
        }
    }
}

impl Endpoint for GetMemberships {
    const OPERATION: OperationType = OperationType::GetMemberships;

    fn client(&self) -> &PubNubClient {
        &self.client
    }

    fn validate_params(&self) -> Result<(), PubNubError> {
        validate_subscribe_key(&self.client)?;
        validate_identifier(self.uuid.as_deref(), "uuid missing")?;
        Ok(())
    }

    fn http_method(&self) -> Method {
        Method::GET
    }

    fn build_path(&self) -> RequestPath {
        memberships_path(&self.client, self.uuid.as_deref())
    }

    fn custom_params(&self, params: &mut QueryParams) {
        self.collection.apply(params);
    }
}

/// Adds or updates channel memberships of a user.
///
/// `PATCH /v2/objects/{subscribeKey}/uuids/{uuid}/channels` with
/// `{"set": [{"channel": {"id": ...}, "custom": {...}}, ...]}`.
///
/// # Example
///
/// ```rust,no_run
/// use pubnub_objects::{CollectionEndpoint, MembershipInclude, PubNubClient};
///
/// # async fn example() -> Result<(), pubnub_objects::PubNubError> {
/// let client = PubNubClient::builder()
///     .with_subscribe_key("sub-c-key")
///     .with_user_id("fax-gateway")
///     .build()?;
///
/// let mut custom = serde_json::Map::new();
/// custom.insert("role".to_string(), "subscriber".into());
///
/// let result = client
///     .set_memberships()
///     .with_uuid("user-1")
///     .with_channels(["news", "sports"])
///     .with_custom(custom)
///     .add_include(MembershipInclude::ChannelFields)
///     .await?;
///
/// for membership in result.data {
///     println!("{}", membership.channel.id);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SetMemberships {
    client: PubNubClient,
    uuid: Option<String>,
    channels: Vec<String>,
    custom: Option<Custom>,
    collection: CollectionOptions<MembershipInclude>,
}

impl SetMemberships {
    pub(crate) fn new(client: PubNubClient) -> Self {
        Self {
            client,
            uuid: None,
            channels: Vec::new(),
            custom: None,
            collection: CollectionOptions::default(),
        }
    }
}

impl Endpoint for SetMemberships {
    const OPERATION: OperationType = OperationType::SetMemberships;

    fn client(&self) -> &PubNubClient {
        &self.client
    }

    fn validate_params(&self) -> Result<(), PubNubError> {
        validate_subscribe_key(&self.client)?;
        validate_identifier(self.uuid.as_deref(), "uuid missing")?;
        validate_list(&self.channels, "channels missing")
    }

    fn http_method(&self) -> Method {
        Method::PATCH
    }

    fn build_path(&self) -> RequestPath {
        memberships_path(&self.client, self.uuid.as_deref())
    }

    fn custom_params(&self, params: &mut QueryParams) {
        self.collection.apply(params);
    }

    fn build_data(&self) -> Result<Option<Vec<u8>>, PubNubError> {
        let body = MembershipsBody {
            set: Some(entries(&self.channels, self.custom.as_ref())),
            delete: None,
        };
        body.to_bytes().map(Some)
    }
}

/// Removes channel memberships of a user.
///
/// `PATCH /v2/objects/{subscribeKey}/uuids/{uuid}/channels` with
/// `{"delete": [{"channel": {"id": ...}}, ...]}`.
#[derive(Debug, Clone)]
pub struct RemoveMemberships {
    client: PubNubClient,
    uuid: Option<String>,
    channels: Vec<String>,
    collection: CollectionOptions<MembershipInclude>,
}

impl RemoveMemberships {
    pub(crate) fn new(client: PubNubClient) -> Self {
        Self {
            client,
            uuid: None,
            channels: Vec::new(),
            collection: CollectionOptions::default(),
        }
    }
}

impl Endpoint for RemoveMemberships {
    const OPERATION: OperationType = OperationType::RemoveMemberships;

    fn client(&self) -> &PubNubClient {
        &self.client
    }

    fn validate_params(&self) -> Result<(), PubNubError> {
        validate_subscribe_key(&self.client)?;
        validate_identifier(self.uuid.as_deref(), "uuid missing")?;
        validate_list(&self.channels, "channels missing")
    }

    fn http_method(&self) -> Method {
        Method::PATCH
    }

    fn build_path(&self) -> RequestPath {
        memberships_path(&self.client, self.uuid.as_deref())
    }

    fn custom_params(&self, params: &mut QueryParams) {
        self.collection.apply(params);
    }

    fn build_data(&self) -> Result<Option<Vec<u8>>, PubNubError> {
        let body = MembershipsBody {
            set: None,
            delete: Some(entries(&self.channels, None)),
        };
        body.to_bytes().map(Some)
    }
}

/// Adds and removes channel memberships of a user in a single call.
///
/// `PATCH /v2/objects/{subscribeKey}/uuids/{uuid}/channels` with
/// `{"set": [...], "delete": [...]}`; both lists are always sent.
#[derive(Debug, Clone)]
pub struct ManageMemberships {
    client: PubNubClient,
    uuid: Option<String>,
    set_channels: Vec<String>,
    remove_channels: Vec<String>,
    custom: Option<Custom>,
    collection: CollectionOptions<MembershipInclude>,
}

impl ManageMemberships {
    pub(crate) fn new(client: PubNubClient) -> Self {
        Self {
            client,
            uuid: None,
            set_channels: Vec::new(),
            remove_channels: Vec::new(),
            custom: None,
            collection: CollectionOptions::default(),
        }
    }
}

impl Endpoint for ManageMemberships {
    const OPERATION: OperationType = OperationType::ManageMemberships;

    fn client(&self) -> &PubNubClient {
        &self.client
    }

    fn validate_params(&self) -> Result<(), PubNubError> {
        validate_subscribe_key(&self.client)?;
        validate_identifier(self.uuid.as_deref(), "uuid missing")?;
        if self.set_channels.is_empty() && self.remove_channels.is_empty() {
            return Err(PubNubError::validation("channels missing"));
        }
        Ok(())
    }

    fn http_method(&self) -> Method {
        Method::PATCH
    }

    fn build_path(&self) -> RequestPath {
        memberships_path(&self.client, self.uuid.as_deref())
    }

    fn custom_params(&self, params: &mut QueryParams) {
        self.collection.apply(params);
    }

    fn build_data(&self) -> Result<Option<Vec<u8>>, PubNubError> {
        let body = MembershipsBody {
            set: Some(entries(&self.set_channels, self.custom.as_ref())),
            delete: Some(entries(&self.remove_channels, None)),
        };
        body.to_bytes().map(Some)
    }
}

impl_target_setter!(
    with_uuid(uuid),
    "Sets the user whose memberships are targeted (required, non-empty).":
    GetMemberships, SetMemberships, RemoveMemberships, ManageMemberships,
);
impl_list_setter!(
    with_channels(channels),
    "Replaces the channels of the request (required, non-empty).":
    SetMemberships, RemoveMemberships,
);
impl_add_setter!(
    add_channel(channels),
    "Adds one channel to the request.":
    SetMemberships, RemoveMemberships,
);
impl_list_setter!(with_set_channels(set_channels), "Replaces the channels to join.": ManageMemberships);
impl_list_setter!(
    with_remove_channels(remove_channels),
    "Replaces the channels to leave.": ManageMemberships,
);
impl_custom_setter!(SetMemberships, ManageMemberships);

macro_rules! impl_collection_endpoint {
    ($($endpoint:ty),+) => {
        $(
            impl CollectionEndpoint for $endpoint {
                type Include = MembershipInclude;

                fn collection_mut(&mut self) -> &mut CollectionOptions<MembershipInclude> {
                    &mut self.collection
                }
            }

            impl_into_future!($endpoint => MembershipsResult);
        )+
    };
}

impl_collection_endpoint!(
    GetMemberships,
    SetMemberships,
    RemoveMemberships,
    ManageMemberships
);
