/// A comment as stored.
///
/// `listing_id` is empty once the listing it was posted on has been deleted.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CommentRecord<DateTime, CommentId, ListingId, UserId> {
    /// Unique identifier for the comment
    pub id: CommentId,
    /// The listing the comment was posted on
    pub listing_id: Option<ListingId>,
    /// The user who wrote the comment
    pub author_id: UserId,
    /// The text of the comment
    pub content: String,
    /// When the comment was posted
    pub created_at: DateTime,
}
