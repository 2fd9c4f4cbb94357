mod bidding;
mod comments;
mod lifecycle;

pub use bidding::{BidFailure, MAX_BID_ATTEMPTS, place_bid};
pub use comments::{CommentFailure, post_comment};
pub use lifecycle::{ListingFailure, create_listing, delete_listing, update_listing};
