//! Repository trait implementations for the SQLite database.

use crate::{
    Db,
    types::{BidId, CommentId, DateTime, ListingId, UserId},
};
use auction_core::ports::Repository;

mod bid;
mod comment;
mod listing;

impl Repository for Db {
    type Error = sqlx::Error;
    type DateTime = DateTime;
    type UserId = UserId;
    type ListingId = ListingId;
    type BidId = BidId;
    type CommentId = CommentId;
}

const LISTING_COLUMNS: &str = "id, owner_id, title, description, price, image_path, is_sold, end_time, version, created_at, updated_at";
const BID_COLUMNS: &str = "id, listing_id, bidder_id, price, created_at";
const COMMENT_COLUMNS: &str = "id, listing_id, author_id, content, created_at";
