use super::{ListingRecord, Price};

/// A bid as stored. Bids are immutable once accepted.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct BidRecord<DateTime, BidId, ListingId, UserId> {
    /// Unique identifier for the bid
    pub id: BidId,
    /// The listing the bid was placed on
    pub listing_id: ListingId,
    /// The user who placed the bid
    pub bidder_id: UserId,
    /// The amount offered
    pub price: Price,
    /// When the bid was accepted
    pub created_at: DateTime,
}

/// A listing together with its complete set of bids, read at a single point
/// in time. Only a snapshot can be used to validate a new bid.
#[derive(Clone, Debug)]
pub struct BidSnapshot<DateTime, ListingId, BidId, UserId> {
    /// The listing being bid on
    pub listing: ListingRecord<DateTime, ListingId, UserId>,
    /// All of the listing's bids
    pub bids: Vec<BidRecord<DateTime, BidId, ListingId, UserId>>,
}

impl<DateTime, ListingId, BidId, UserId> BidSnapshot<DateTime, ListingId, BidId, UserId> {
    /// The amount the next bid has to beat.
    pub fn floor_price(&self) -> Price {
        floor_price(self.listing.data.price, self.bids.iter().map(|bid| bid.price))
    }
}

/// Compute the floor price: the highest existing bid if there is one,
/// otherwise the starting price (zero when the listing has none).
pub fn floor_price(starting_price: Option<Price>, bids: impl IntoIterator<Item = Price>) -> Price {
    bids.into_iter()
        .max()
        .or(starting_price)
        .unwrap_or(Price::ZERO)
}
