mod bid;
mod caller;
mod comment;
mod config;
mod listing;
mod price;

pub use bid::{BidRecord, BidSnapshot, floor_price};
pub use caller::Caller;
pub use comment::CommentRecord;
pub use config::AuctionConfig;
pub use listing::{
    ListingData, ListingDetail, ListingDraft, ListingQuery, ListingRecord, ListingStatus,
    ListingUpdate, QueryResponse,
};
pub use price::Price;
