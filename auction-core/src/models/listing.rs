use super::{BidRecord, CommentRecord, Price, floor_price};

/// The user-editable description of a listing.
///
/// Every field is optional: a listing can be created with nothing but an end
/// time, and the starting price defaults to zero when computing the floor.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListingData {
    /// A short headline for the item
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
    /// A free-form description of the item
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    /// The starting price; bids must strictly exceed it while no bids exist
    #[cfg_attr(feature = "serde", serde(default))]
    pub price: Option<Price>,
    /// A reference to an uploaded image of the item
    #[cfg_attr(feature = "serde", serde(default))]
    pub image_path: Option<String>,
}

impl ListingData {
    /// Overlay the fields present in `self` onto `current`.
    ///
    /// An absent field leaves the current value untouched, so an edit only
    /// needs to carry what changes.
    pub fn patch(self, current: ListingData) -> ListingData {
        ListingData {
            title: self.title.or(current.title),
            description: self.description.or(current.description),
            price: self.price.or(current.price),
            image_path: self.image_path.or(current.image_path),
        }
    }
}

/// A listing as stored.
///
/// The owner is stamped at creation from the authenticated caller. The
/// `version` increments on every successful update and serves as the
/// optimistic-concurrency token for edits.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ListingRecord<DateTime, ListingId, UserId> {
    /// Unique identifier for the listing
    pub id: ListingId,
    /// The user who created the listing
    pub owner_id: UserId,
    /// The user-editable fields
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub data: ListingData,
    /// Whether the item has been marked as sold
    pub is_sold: bool,
    /// No bid is accepted at or after this instant
    pub end_time: DateTime,
    /// Incremented on each update
    pub version: u64,
    /// When the listing was created
    pub created_at: DateTime,
    /// When the listing was last modified
    pub updated_at: DateTime,
}

impl<DateTime: Ord, ListingId, UserId> ListingRecord<DateTime, ListingId, UserId> {
    /// The open/closed state of the listing at `now`.
    pub fn status(&self, now: &DateTime) -> ListingStatus {
        ListingStatus::at(&self.end_time, now)
    }
}

/// Whether a listing still accepts bids.
///
/// This is never stored: it is a pure function of the listing's end time and
/// the instant at which the question is asked.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingStatus {
    /// The end time is in the future
    Open,
    /// The end time has been reached
    Closed,
}

impl ListingStatus {
    /// Compute the status of a listing ending at `end_time`, as seen at `now`.
    pub fn at<DateTime: Ord>(end_time: &DateTime, now: &DateTime) -> Self {
        if now >= end_time {
            Self::Closed
        } else {
            Self::Open
        }
    }
}

/// The input for creating a listing.
///
/// There is no owner field: any owner a client sends is dropped during
/// deserialization, and the owner always comes from the caller.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub struct ListingDraft<DateTime> {
    /// The initial user-editable fields
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub data: ListingData,
    /// When bidding closes; defaults to the configured listing duration
    pub end_time: Option<DateTime>,
}

/// The input for editing a listing.
///
/// Every field is optional and an absent field is left untouched, see
/// [`ListingData::patch`].
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub struct ListingUpdate<UserId> {
    /// The user-editable fields to change
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub data: ListingData,
    /// Mark the listing as sold
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_sold: Option<bool>,
    /// Transfer the listing to another user (admins only)
    pub owner_id: Option<UserId>,
    /// The version the client last saw, if it wants stale edits rejected
    #[cfg_attr(feature = "serde", serde(default))]
    pub version: Option<u64>,
}

impl<DateTime> Default for ListingDraft<DateTime> {
    fn default() -> Self {
        Self {
            data: ListingData::default(),
            end_time: None,
        }
    }
}

impl<UserId> Default for ListingUpdate<UserId> {
    fn default() -> Self {
        Self {
            data: ListingData::default(),
            is_sold: None,
            owner_id: None,
            version: None,
        }
    }
}

/// A filter over the listings, which doubles as a page cursor.
///
/// Results come newest first. `before` and `before_id` resume a search after
/// the last listing of the previous page; a response fills them in for the
/// next page whenever there is one.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ListingQuery<DateTime, ListingId, UserId> {
    /// Only listings owned by this user
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub owner_id: Option<UserId>,
    /// Only listings with this sold flag
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub sold: Option<bool>,
    /// Only listings that are open (or closed) at the time of the query
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub status: Option<ListingStatus>,
    /// Only listings created before this instant
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub before: Option<DateTime>,
    /// Breaks ties between listings created at exactly `before`
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub before_id: Option<ListingId>,
}

impl<DateTime, ListingId, UserId> Default for ListingQuery<DateTime, ListingId, UserId> {
    fn default() -> Self {
        Self {
            owner_id: None,
            sold: None,
            status: None,
            before: None,
            before_id: None,
        }
    }
}

impl<DateTime: Clone, ListingId: Clone, UserId> ListingQuery<DateTime, ListingId, UserId> {
    /// The same filter, resumed after `last`.
    pub fn after(self, last: &ListingRecord<DateTime, ListingId, UserId>) -> Self {
        Self {
            before: Some(last.created_at.clone()),
            before_id: Some(last.id.clone()),
            ..self
        }
    }
}

/// One page of query results.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub struct QueryResponse<T, U> {
    /// The matching records
    pub results: Vec<T>,
    /// The query for the next page, if there is one
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub more: Option<U>,
}

/// A listing together with all of its bids and comments.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub struct ListingDetail<DateTime, ListingId, BidId, CommentId, UserId> {
    /// The listing itself
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub listing: ListingRecord<DateTime, ListingId, UserId>,
    /// Every bid on the listing, newest first
    pub bids: Vec<BidRecord<DateTime, BidId, ListingId, UserId>>,
    /// Every comment on the listing, newest first
    pub comments: Vec<CommentRecord<DateTime, CommentId, ListingId, UserId>>,
}

impl<DateTime, ListingId, BidId, CommentId, UserId>
    ListingDetail<DateTime, ListingId, BidId, CommentId, UserId>
{
    /// The amount the next bid has to beat.
    pub fn floor_price(&self) -> Price {
        floor_price(self.listing.data.price, self.bids.iter().map(|bid| bid.price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn listing(end_time: u32) -> ListingRecord<u32, u32, &'static str> {
        ListingRecord {
            id: 1,
            owner_id: "alice",
            data: ListingData::default(),
            is_sold: false,
            end_time,
            version: 0,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[rstest]
    #[case(10, 9, ListingStatus::Open)]
    #[case(10, 10, ListingStatus::Closed)]
    #[case(10, 11, ListingStatus::Closed)]
    fn status_is_closed_from_the_end_time_on(
        #[case] end_time: u32,
        #[case] now: u32,
        #[case] expected: ListingStatus,
    ) {
        assert_eq!(listing(end_time).status(&now), expected);
    }

    #[test]
    fn draft_ignores_a_client_supplied_owner() {
        let draft: ListingDraft<u32> = serde_json::from_str(
            r#"{"title": "Lamp", "price": "12.50", "owner_id": "mallory", "end_time": 30}"#,
        )
        .unwrap();
        assert_eq!(draft.data.title.as_deref(), Some("Lamp"));
        assert_eq!(draft.data.price, Some("12.5".parse().unwrap()));
        assert_eq!(draft.end_time, Some(30));
    }

    /// An identifier with no `Default`, like the ones real repositories use.
    #[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Handle(String);

    #[test]
    fn inputs_deserialize_without_default_ids() {
        let draft: ListingDraft<Handle> = serde_json::from_str(r#"{"title": "Lamp"}"#).unwrap();
        assert_eq!(draft.end_time, None);

        let update: ListingUpdate<Handle> = serde_json::from_str("{}").unwrap();
        assert_eq!(update.owner_id, None);
        assert_eq!(update.version, None);

        let query: ListingQuery<Handle, Handle, Handle> = serde_json::from_str("{}").unwrap();
        assert_eq!(query, ListingQuery::default());

        let query: ListingQuery<Handle, Handle, Handle> =
            serde_json::from_str(r#"{"owner_id": "alice", "status": "open"}"#).unwrap();
        assert_eq!(query.owner_id, Some(Handle("alice".into())));
        assert_eq!(query.status, Some(ListingStatus::Open));
    }

    #[test]
    fn next_page_keeps_the_filter() {
        let query = ListingQuery::<u32, u32, &str> {
            owner_id: Some("alice"),
            sold: Some(false),
            ..Default::default()
        };
        let mut last = listing(10);
        last.id = 7;
        last.created_at = 3;

        let next = query.after(&last);
        assert_eq!(next.owner_id, Some("alice"));
        assert_eq!(next.sold, Some(false));
        assert_eq!((next.before, next.before_id), (Some(3), Some(7)));
    }

    #[test]
    fn patch_keeps_absent_fields() {
        let current = ListingData {
            title: Some("Lamp".into()),
            description: Some("Brass".into()),
            price: Some(Price::from(10)),
            image_path: None,
        };
        let edit = ListingData {
            price: Some(Price::from(12)),
            image_path: Some("lamp.jpg".into()),
            ..Default::default()
        };

        let patched = edit.patch(current);
        assert_eq!(patched.title.as_deref(), Some("Lamp"));
        assert_eq!(patched.description.as_deref(), Some("Brass"));
        assert_eq!(patched.price, Some(Price::from(12)));
        assert_eq!(patched.image_path.as_deref(), Some("lamp.jpg"));
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ListingStatus::Closed).unwrap(),
            "\"closed\""
        );
    }
}
