use super::COMMENT_COLUMNS;
use crate::{Db, types::CommentRow};
use auction_core::ports::{Comment, CommentRepository};

impl CommentRepository for Db {
    async fn create_comment(
        &self,
        comment_id: Self::CommentId,
        listing_id: Self::ListingId,
        author_id: Self::UserId,
        content: String,
        as_of: Self::DateTime,
    ) -> Result<Option<Comment<Self>>, Self::Error> {
        // Inserts nothing (and returns no row) when the listing is missing.
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            r#"
            insert into
                comment (id, listing_id, author_id, content, created_at)
            select
                $1, id, $3, $4, $5
            from
                listing
            where
                id = $2
            returning {COMMENT_COLUMNS}
            "#
        ))
        .bind(comment_id)
        .bind(listing_id)
        .bind(author_id)
        .bind(content)
        .bind(as_of)
        .fetch_optional(&self.writer)
        .await?;

        Ok(row.map(Into::into))
    }
}
