use crate::{
    models::Caller,
    ports::{Comment, CommentRepository},
};
use thiserror::Error;
use tracing::{Level, event};

/// The ways in which a comment can be rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommentFailure {
    /// The listing does not exist
    #[error("listing not found")]
    NotFound,
    /// The comment is empty once surrounding whitespace is removed
    #[error("comment content must not be empty")]
    EmptyContent,
}

/// Attach a comment by `caller` to a listing.
///
/// Surrounding whitespace is stripped before storing.
pub async fn post_comment<R: CommentRepository>(
    db: &R,
    caller: &Caller<R::UserId>,
    comment_id: R::CommentId,
    listing_id: R::ListingId,
    content: &str,
    as_of: R::DateTime,
) -> Result<Result<Comment<R>, CommentFailure>, R::Error> {
    let content = content.trim();
    if content.is_empty() {
        return Ok(Err(CommentFailure::EmptyContent));
    }

    let comment = db
        .create_comment(
            comment_id,
            listing_id.clone(),
            caller.user_id.clone(),
            content.to_owned(),
            as_of,
        )
        .await?;

    match comment {
        Some(comment) => {
            event!(
                Level::INFO,
                comment_id = %comment.id,
                listing_id = %listing_id,
                author_id = %comment.author_id,
                "comment posted"
            );
            Ok(Ok(comment))
        }
        None => Ok(Err(CommentFailure::NotFound)),
    }
}
