use std::collections::BTreeSet;
use std::fmt::Debug;

use indexmap::IndexMap;

use crate::client::QueryParams;

/// A field-inclusion flag of a list endpoint.
///
/// The `Ord` implementation is the order of the lookup table: tokens are always
/// emitted in that order, whatever order the flags were added in.
pub trait IncludeField: Copy + Ord + Debug + Send + Sync + 'static {
    /// Token added to the `include` query parameter, `None` for flags that map elsewhere.
    fn include_token(self) -> Option<&'static str>;

    /// Whether this flag requests the total count (`count=true`).
    fn is_total_count(self) -> bool;
}

/// Related fields to expand in membership responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MembershipInclude {
    /// Membership custom fields (`custom`).
    CustomFields,
    /// Channel custom fields (`channel.custom`).
    CustomChannelFields,
    /// Channel fields (`channel`).
    ChannelFields,
    /// Total number of memberships (`count=true`).
    TotalCount,
}

impl IncludeField for MembershipInclude {
    fn include_token(self) -> Option<&'static str> {
        match self {
            Self::CustomFields => Some("custom"),
            Self::CustomChannelFields => Some("channel.custom"),
            Self::ChannelFields => Some("channel"),
            Self::TotalCount => None,
        }
    }

    fn is_total_count(self) -> bool {
        self == Self::TotalCount
    }
}

/// Related fields to expand in channel member responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemberInclude {
    /// Membership custom fields (`custom`).
    CustomFields,
    /// User custom fields (`uuid.custom`).
    CustomUuidFields,
    /// User fields (`uuid`).
    UuidFields,
    /// Total number of members (`count=true`).
    TotalCount,
}

impl IncludeField for MemberInclude {
    fn include_token(self) -> Option<&'static str> {
        match self {
            Self::CustomFields => Some("custom"),
            Self::CustomUuidFields => Some("uuid.custom"),
            Self::UuidFields => Some("uuid"),
            Self::TotalCount => None,
        }
    }

    fn is_total_count(self) -> bool {
        self == Self::TotalCount
    }
}

/// Sort direction of a sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SortDirection {
    /// Ascending order.
    #[display("asc")]
    Asc,
    /// Descending order.
    #[display("desc")]
    Desc,
}

/// Pagination cursors, as returned in `next`/`prev` of a previous result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Cursor sent as `start`.
    pub next: Option<String>,
    /// Cursor sent as `end`.
    pub prev: Option<String>,
}

impl Page {
    /// Page following the given cursor.
    pub fn next(cursor: impl Into<String>) -> Self {
        Self {
            next: Some(cursor.into()),
            prev: None,
        }
    }

    /// Page preceding the given cursor.
    pub fn prev(cursor: impl Into<String>) -> Self {
        Self {
            next: None,
            prev: Some(cursor.into()),
        }
    }
}

/// Pagination, filtering, sorting and field-inclusion shared by the list endpoints.
#[derive(Debug, Clone)]
pub struct CollectionOptions<I> {
    pub(crate) include: BTreeSet<I>,
    pub(crate) page: Page,
    pub(crate) filter: Option<String>,
    pub(crate) limit: Option<u32>,
    pub(crate) sort: IndexMap<String, Option<SortDirection>>,
}

impl<I> Default for CollectionOptions<I> {
    fn default() -> Self {
        Self {
            include: BTreeSet::new(),
            page: Page::default(),
            filter: None,
            limit: None,
            sort: IndexMap::new(),
        }
    }
}

impl<I: IncludeField> CollectionOptions<I> {
    /// Comma-joined include tokens in table order, `None` when no token applies.
    pub(crate) fn include_param(&self) -> Option<String> {
        let tokens: Vec<&str> = self
            .include
            .iter()
            .filter_map(|field| field.include_token())
            .collect();
        (!tokens.is_empty()).then(|| tokens.join(","))
    }

    /// `field`, `field:asc` or `field:desc` for every sort entry, in insertion order.
    pub(crate) fn sort_tokens(&self) -> Vec<String> {
        self.sort
            .iter()
            .map(|(field, direction)| match direction {
                Some(direction) => format!("{field}:{direction}"),
                None => field.clone(),
            })
            .collect()
    }

    pub(crate) fn apply(&self, params: &mut QueryParams) {
        if let Some(include) = self.include_param() {
            params.insert("include", include);
        }

        if self.include.iter().any(|field| field.is_total_count()) {
            params.insert("count", "true");
        }

        if let Some(next) = &self.page.next {
            params.insert("start", next.as_str());
        }

        if let Some(prev) = &self.page.prev {
            params.insert("end", prev.as_str());
        }

        if let Some(filter) = self.filter.as_deref().filter(|filter| !filter.is_empty()) {
            params.insert("filter", filter);
        }

        if let Some(limit) = self.limit.filter(|limit| *limit > 0) {
            params.insert("limit", limit.to_string());
        }

        for token in self.sort_tokens() {
            params.append("sort", token);
        }
    }
}

/// Fluent setters shared by every list endpoint builder.
///
/// # Example
///
/// ```rust
/// use pubnub_objects::{CollectionEndpoint, MembershipInclude, PubNubClient, SortDirection};
///
/// # fn example() -> Result<(), pubnub_objects::PubNubError> {
/// let client = PubNubClient::builder().with_subscribe_key("sub-c-key").build()?;
///
/// let request = client
///     .get_memberships()
///     .with_uuid("user-1")
///     .add_include(MembershipInclude::ChannelFields)
///     .add_include(MembershipInclude::TotalCount)
///     .with_filter("channel.name like 'news*'")
///     .add_sort("channel.updated", SortDirection::Desc)
///     .with_limit(50);
/// # let _ = request;
/// # Ok(())
/// # }
/// ```
pub trait CollectionEndpoint: Sized {
    /// Include flag type of this endpoint family.
    type Include: IncludeField;

    #[doc(hidden)]
    fn collection_mut(&mut self) -> &mut CollectionOptions<Self::Include>;

    /// Replaces the set of related fields to expand.
    #[must_use]
    fn with_include<T>(mut self, fields: T) -> Self
    where
        T: IntoIterator<Item = Self::Include>,
    {
        self.collection_mut().include = fields.into_iter().collect();
        self
    }

    /// Adds one related field to expand.
    #[must_use]
    fn add_include(mut self, field: Self::Include) -> Self {
        self.collection_mut().include.insert(field);
        self
    }

    /// Selects the page to fetch.
    #[must_use]
    fn with_page(mut self, page: Page) -> Self {
        self.collection_mut().page = page;
        self
    }

    /// Sets the filter expression; an empty expression is not sent.
    #[must_use]
    fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.collection_mut().filter = Some(filter.into());
        self
    }

    /// Sets the maximum number of entries per page; `0` is not sent.
    #[must_use]
    fn with_limit(mut self, limit: u32) -> Self {
        self.collection_mut().limit = Some(limit);
        self
    }

    /// Replaces the sort fields.
    #[must_use]
    fn with_sort<T, K>(mut self, sort: T) -> Self
    where
        T: IntoIterator<Item = (K, Option<SortDirection>)>,
        K: Into<String>,
    {
        self.collection_mut().sort = sort
            .into_iter()
            .map(|(field, direction)| (field.into(), direction))
            .collect();
        self
    }

    /// Adds one sort field, with or without an explicit direction.
    #[must_use]
    fn add_sort(mut self, field: impl Into<String>, direction: impl Into<Option<SortDirection>>) -> Self {
        self.collection_mut()
            .sort
            .insert(field.into(), direction.into());
        self
    }

    /// Adds one sort field with the service's default direction (sent as bare `field`).
    #[must_use]
    fn add_sort_field(self, field: impl Into<String>) -> Self {
        self.add_sort(field, None::<SortDirection>)
    }
}
