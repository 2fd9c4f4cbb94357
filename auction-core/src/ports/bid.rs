use super::{Bid, Snapshot};
use crate::models::Price;

/// Repository interface for bid storage.
pub trait BidRepository: super::ListingRepository {
    /// Read a listing and every one of its bids in a single consistent read.
    ///
    /// Returns Option::None if the listing does not exist.
    fn get_bid_snapshot(
        &self,
        listing_id: Self::ListingId,
    ) -> impl Future<Output = Result<Option<Snapshot<Self>>, Self::Error>> + Send;

    /// Append a bid, provided the listing's floor price is unchanged.
    ///
    /// The floor is recomputed inside the write transaction. If it no longer
    /// equals `expected_floor` (or the listing has vanished) nothing is
    /// written, so a bid validated against a stale snapshot can never land.
    ///
    /// # Returns
    ///
    /// - Ok(Some(bid)) if the bid was recorded
    /// - Ok(None) if the floor moved or the listing is gone
    /// - Err otherwise
    fn add_bid(
        &self,
        bid_id: Self::BidId,
        listing_id: Self::ListingId,
        bidder_id: Self::UserId,
        price: Price,
        expected_floor: Price,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Option<Bid<Self>>, Self::Error>> + Send;
}
