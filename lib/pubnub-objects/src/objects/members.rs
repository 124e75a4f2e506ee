use http::Method;
use serde::Serialize;

use super::{
    CollectionEndpoint, CollectionOptions, Custom, Endpoint, MemberInclude, MembersResult,
    ObjectId, OperationType, impl_add_setter, impl_custom_setter, impl_into_future,
    impl_list_setter, impl_target_setter, non_empty_custom, validate_identifier, validate_list,
    validate_subscribe_key,
};
use crate::client::{PubNubClient, PubNubError, QueryParams, RequestPath};

const PATH: &str = "/v2/objects/{sub_key}/channels/{channel}/uuids";

/// Only the values that are set become path arguments; resolving reports the others.
fn members_path(client: &PubNubClient, channel: Option<&str>) -> RequestPath {
    let mut path = RequestPath::from(PATH);
    if let Some(sub_key) = client.configuration().subscribe_key() {
        path = path.add_param("sub_key", sub_key);
    }
    if let Some(channel) = channel {
        path = path.add_param("channel", channel);
    }
    path
}

#[derive(Debug, Serialize)]
struct UuidEntry<'a> {
    uuid: ObjectId<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom: Option<&'a Custom>,
}

#[derive(Debug, Default, Serialize)]
struct MembersBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    set: Option<Vec<UuidEntry<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delete: Option<Vec<UuidEntry<'a>>>,
}

impl MembersBody<'_> {
    fn to_bytes(&self) -> Result<Vec<u8>, PubNubError> {
        Ok(serde_json::to_vec(self)?)
    }
}

fn entries<'a>(uuids: &'a [String], custom: Option<&'a Custom>) -> Vec<UuidEntry<'a>> {
    let custom = non_empty_custom(custom);
    uuids
        .iter()
        .map(|uuid| UuidEntry {
            uuid: ObjectId { id: uuid },
            custom,
        })
        .collect()
}

/// Lists the members of a channel.
///
/// `GET /v2/objects/{subscribeKey}/channels/{channel}/uuids`
#[derive(Debug, Clone)]
pub struct GetMembers {
    client: PubNubClient,
    channel: Option<String>,
    collection: CollectionOptions<MemberInclude>,
}

impl GetMembers {
    pub(crate) fn new(client: PubNubClient) -> Self {
        Self {
            client,
            channel: None,
            collection: CollectionOptions::default(),
        }
    }
}

impl Endpoint for GetMembers {
    const OPERATION: OperationType = OperationType::GetMembers;

    fn client(&self) -> &PubNubClient {
        &self.client
    }

    fn validate_params(&self) -> Result<(), PubNubError> {
        validate_subscribe_key(&self.client)?;
        validate_identifier(self.channel.as_deref(), "channel missing")?;
        Ok(())
    }

    fn http_method(&self) -> Method {
        Method::GET
    }

    fn build_path(&self) -> RequestPath {
        members_path(&self.client, self.channel.as_deref())
    }

    fn custom_params(&self, params: &mut QueryParams) {
        self.collection.apply(params);
    }
}

/// Adds or updates members of a channel.
///
/// `PATCH /v2/objects/{subscribeKey}/channels/{channel}/uuids` with
/// `{"set": [{"uuid": {"id": ...}, "custom": {...}}, ...]}`.
#[derive(Debug, Clone)]
pub struct SetMembers {
    client: PubNubClient,
    channel: Option<String>,
    uuids: Vec<String>,
    custom: Option<Custom>,
    collection: CollectionOptions<MemberInclude>,
}

impl SetMembers {
    pub(crate) fn new(client: PubNubClient) -> Self {
        Self {
            client,
            channel: None,
            uuids: Vec::new(),
            custom: None,
            collection: CollectionOptions::default(),
        }
    }
}

impl Endpoint for SetMembers {
    const OPERATION: OperationType = OperationType::SetMembers;

    fn client(&self) -> &PubNubClient {
        &self.client
    }

    fn validate_params(&self) -> Result<(), PubNubError> {
        validate_subscribe_key(&self.client)?;
        validate_identifier(self.channel.as_deref(), "channel missing")?;
        validate_list(&self.uuids, "uuids missing")
    }

    fn http_method(&self) -> Method {
        Method::PATCH
    }

    fn build_path(&self) -> RequestPath {
        members_path(&self.client, self.channel.as_deref())
    }

    fn custom_params(&self, params: &mut QueryParams) {
        self.collection.apply(params);
    }

    fn build_data(&self) -> Result<Option<Vec<u8>>, PubNubError> {
        let body = MembersBody {
            set: Some(entries(&self.uuids, self.custom.as_ref())),
            delete: None,
        };
        body.to_bytes().map(Some)
    }
}

/// Removes members of a channel.
#[derive(Debug, Clone)]
pub struct RemoveMembers {
    client: PubNubClient,
    channel: Option<String>,
    uuids: Vec<String>,
    collection: CollectionOptions<MemberInclude>,
}

impl RemoveMembers {
    pub(crate) fn new(client: PubNubClient) -> Self {
        Self {
            client,
            channel: None,
            uuids: Vec::new(),
            collection: CollectionOptions::default(),
        }
    }
}

impl Endpoint for RemoveMembers {
    const OPERATION: OperationType = OperationType::RemoveMembers;

    fn client(&self) -> &PubNubClient {
        &self.client
    }

    fn validate_params(&self) -> Result<(), PubNubError> {
        validate_subscribe_key(&self.client)?;
        validate_identifier(self.channel.as_deref(), "channel missing")?;
        validate_list(&self.uuids, "uuids missing")
    }

    fn http_method(&self) -> Method {
        Method::PATCH
    }

    fn build_path(&self) -> RequestPath {
        members_path(&self.client, self.channel.as_deref())
    }

    fn custom_params(&self, params: &mut QueryParams) {
        self.collection.apply(params);
    }

    fn build_data(&self) -> Result<Option<Vec<u8>>, PubNubError> {
        let body = MembersBody {
            set: None,
            delete: Some(entries(&self.uuids, None)),
        };
        body.to_bytes().map(Some)
    }
}

/// Adds and removes members of a channel in a single call.
#[derive(Debug, Clone)]
pub struct ManageMembers {
    client: PubNubClient,
    channel: Option<String>,
    set_uuids: Vec<String>,
    remove_uuids: Vec<String>,
    custom: Option<Custom>,
    collection: CollectionOptions<MemberInclude>,
}

impl ManageMembers {
    pub(crate) fn new(client: PubNubClient) -> Self {
        Self {
            client,
            channel: None,
            set_uuids: Vec::new(),
            remove_uuids: Vec::new(),
            custom: None,
            collection: CollectionOptions::default(),
        }
    }
}

impl Endpoint for ManageMembers {
    const OPERATION: OperationType = OperationType::ManageMembers;

    fn client(&self) -> &PubNubClient {
        &self.client
    }

    fn validate_params(&self) -> Result<(), PubNubError> {
        validate_subscribe_key(&self.client)?;
        validate_identifier(self.channel.as_deref(), "channel missing")?;
        if self.set_uuids.is_empty() && self.remove_uuids.is_empty() {
            return Err(PubNubError::validation("uuids missing"));
        }
        Ok(())
    }

    fn http_method(&self) -> Method {
        Method::PATCH
    }

    fn build_path(&self) -> RequestPath {
        members_path(&self.client, self.channel.as_deref())
    }

    fn custom_params(&self, params: &mut QueryParams) {
        self.collection.apply(params);
    }

    fn build_data(&self) -> Result<Option<Vec<u8>>, PubNubError> {
        let body = MembersBody {
            set: Some(entries(&self.set_uuids, self.custom.as_ref())),
            delete: Some(entries(&self.remove_uuids, None)),
        };
        body.to_bytes().map(Some)
    }
}

impl_target_setter!(
    with_channel(channel),
    "Sets the channel whose members are targeted (required, non-empty).":
    GetMembers, SetMembers, RemoveMembers, ManageMembers,
);
impl_list_setter!(
    with_uuids(uuids),
    "Replaces the users of the request (required, non-empty).":
    SetMembers, RemoveMembers,
);
impl_add_setter!(add_uuid(uuids), "Adds one user to the request.": SetMembers, RemoveMembers);
impl_list_setter!(with_set_uuids(set_uuids), "Replaces the users to add.": ManageMembers);
impl_list_setter!(with_remove_uuids(remove_uuids), "Replaces the users to remove.": ManageMembers);
impl_custom_setter!(SetMembers, ManageMembers);

macro_rules! impl_collection_endpoint {
    ($($endpoint:ty),+) => {
        $(
            impl CollectionEndpoint for $endpoint {
                type Include = MemberInclude;

                fn collection_mut(&mut self) -> &mut CollectionOptions<MemberInclude> {
                    &mut self.collection
                }
            }

            impl_into_future!($endpoint => MembersResult);
        )+
    };
}

impl_collection_endpoint!(GetMembers, SetMembers, RemoveMembers, ManageMembers);
