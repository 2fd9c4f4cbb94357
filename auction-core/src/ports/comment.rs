use super::Comment;

/// Repository interface for comment storage.
pub trait CommentRepository: super::ListingRepository {
    /// Attach a comment to a listing.
    ///
    /// Returns Option::None (and writes nothing) if the listing does not exist.
    fn create_comment(
        &self,
        comment_id: Self::CommentId,
        listing_id: Self::ListingId,
        author_id: Self::UserId,
        content: String,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Option<Comment<Self>>, Self::Error>> + Send;
}
