mod application;
mod bid;
mod comment;
mod listing;

pub use application::Application;
pub use bid::BidRepository;
pub use comment::CommentRepository;
pub use listing::ListingRepository;

use crate::models::{
    BidRecord, BidSnapshot, CommentRecord, ListingDetail, ListingQuery, ListingRecord, QueryResponse,
};
use std::{fmt::Display, hash::Hash, ops::Add, time::Duration};

/// The base trait of the persistence gateway.
///
/// An implementation chooses its own error, datetime and identifier types;
/// the services are written against these associated types and never see
/// the concrete representation.
pub trait Repository: Sized + Send + Sync {
    /// Infrastructure failures (connection loss, I/O, corrupt rows, ...)
    type Error: std::error::Error + Send + Sync + 'static;
    /// A point in time, with enough resolution to order events
    type DateTime: Copy + Ord + Add<Duration, Output = Self::DateTime> + Display + Send + Sync;
    /// Identifies a user, as reported by the identity gateway
    type UserId: Clone + Eq + Hash + Display + Send + Sync;
    /// Identifies a listing
    type ListingId: Clone + Eq + Hash + Display + Send + Sync;
    /// Identifies a bid
    type BidId: Clone + Eq + Hash + Display + Send + Sync;
    /// Identifies a comment
    type CommentId: Clone + Eq + Hash + Display + Send + Sync;
}

/// A listing record in the types of repository `R`
pub type Listing<R> = ListingRecord<
    <R as Repository>::DateTime,
    <R as Repository>::ListingId,
    <R as Repository>::UserId,
>;

/// A bid record in the types of repository `R`
pub type Bid<R> = BidRecord<
    <R as Repository>::DateTime,
    <R as Repository>::BidId,
    <R as Repository>::ListingId,
    <R as Repository>::UserId,
>;

/// A comment record in the types of repository `R`
pub type Comment<R> = CommentRecord<
    <R as Repository>::DateTime,
    <R as Repository>::CommentId,
    <R as Repository>::ListingId,
    <R as Repository>::UserId,
>;

/// A listing with its bids and comments in the types of repository `R`
pub type Detail<R> = ListingDetail<
    <R as Repository>::DateTime,
    <R as Repository>::ListingId,
    <R as Repository>::BidId,
    <R as Repository>::CommentId,
    <R as Repository>::UserId,
>;

/// A bid snapshot in the types of repository `R`
pub type Snapshot<R> = BidSnapshot<
    <R as Repository>::DateTime,
    <R as Repository>::ListingId,
    <R as Repository>::BidId,
    <R as Repository>::UserId,
>;

/// A listing search in the types of repository `R`
pub type ListingSearch<R> = ListingQuery<
    <R as Repository>::DateTime,
    <R as Repository>::ListingId,
    <R as Repository>::UserId,
>;

/// A page of listing search results in the types of repository `R`
pub type ListingPage<R> = QueryResponse<Listing<R>, ListingSearch<R>>;
