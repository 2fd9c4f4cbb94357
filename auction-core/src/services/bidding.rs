use crate::{
    models::Price,
    ports::{Bid, BidRepository},
};
use thiserror::Error;
use tracing::{Level, event};

/// How many times a bid is re-validated against a fresh snapshot before the
/// service gives up and reports contention.
pub const MAX_BID_ATTEMPTS: usize = 8;

/// The ways in which a bid can be rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BidFailure {
    /// The listing does not exist
    #[error("listing not found")]
    NotFound,
    /// The listing's end time has passed
    #[error("auction has closed")]
    AuctionClosed,
    /// The bid does not exceed the current floor price
    #[error("bid must exceed {floor}")]
    BidTooLow {
        /// The price the bid needed to beat
        floor: Price,
    },
    /// Competing bids kept moving the floor while this one was validated
    #[error("listing received competing bids, try again")]
    ConcurrentModification,
}

/// Place a bid of `amount` on a listing.
///
/// A bid is accepted only while the listing is open and only if it is
/// strictly greater than the floor price: the highest bid so far, or the
/// starting price when there are none. The check and the insert are made
/// atomic by asking the repository to insert only if the floor is still the
/// one the bid was validated against; when it is not, the whole validation is
/// repeated against a fresh snapshot, up to [`MAX_BID_ATTEMPTS`] times.
pub async fn place_bid<R: BidRepository>(
    db: &R,
    bid_id: R::BidId,
    listing_id: R::ListingId,
    bidder_id: R::UserId,
    amount: Price,
    now: R::DateTime,
) -> Result<Result<Bid<R>, BidFailure>, R::Error> {
    for attempt in 1..=MAX_BID_ATTEMPTS {
        let Some(snapshot) = db.get_bid_snapshot(listing_id.clone()).await? else {
            return Ok(Err(BidFailure::NotFound));
        };

        if now >= snapshot.listing.end_time {
            return Ok(Err(BidFailure::AuctionClosed));
        }

        // A negative starting price never admits a non-positive bid.
        let observed_floor = snapshot.floor_price();
        let floor = observed_floor.max(Price::ZERO);
        if amount <= floor {
            event!(
                Level::INFO,
                listing_id = %listing_id,
                %amount,
                %floor,
                "bid rejected as too low"
            );
            return Ok(Err(BidFailure::BidTooLow { floor }));
        }

        let placed = db
            .add_bid(
                bid_id.clone(),
                listing_id.clone(),
                bidder_id.clone(),
                amount,
                observed_floor,
                now,
            )
            .await?;

        if let Some(bid) = placed {
            event!(
                Level::INFO,
                bid_id = %bid.id,
                listing_id = %bid.listing_id,
                bidder_id = %bid.bidder_id,
                price = %bid.price,
                "bid accepted"
            );
            return Ok(Ok(bid));
        }

        event!(
            Level::DEBUG,
            listing_id = %listing_id,
            attempt,
            "floor moved during bid, retrying"
        );
    }

    event!(
        Level::WARN,
        listing_id = %listing_id,
        attempts = MAX_BID_ATTEMPTS,
        "giving up on contended bid"
    );
    Ok(Err(BidFailure::ConcurrentModification))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{BidRecord, BidSnapshot, ListingData, ListingRecord},
        ports::{Detail, Listing, ListingPage, ListingRepository, ListingSearch, Repository, Snapshot},
    };
    use std::{
        fmt,
        ops::Add,
        sync::{Mutex, PoisonError},
        time::Duration,
    };

    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
    struct Tick(u64);

    impl Add<Duration> for Tick {
        type Output = Tick;
        fn add(self, rhs: Duration) -> Tick {
            Tick(self.0 + rhs.as_secs())
        }
    }

    impl fmt::Display for Tick {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "t{}", self.0)
        }
    }

    /// A single listing whose floor is bumped by a rival every time a write
    /// is attempted, for the first `contended` attempts.
    struct Contended {
        bids: Mutex<Vec<u32>>,
        contended: Mutex<usize>,
    }

    impl Contended {
        fn new(contended: usize) -> Self {
            Self {
                bids: Mutex::new(Vec::new()),
                contended: Mutex::new(contended),
            }
        }

        fn prices(&self) -> Vec<u32> {
            self.bids
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    impl Repository for Contended {
        type Error = std::convert::Infallible;
        type DateTime = Tick;
        type UserId = &'static str;
        type ListingId = u32;
        type BidId = u32;
        type CommentId = u32;
    }

    impl ListingRepository for Contended {
        async fn get_listing(&self, _: u32) -> Result<Option<Listing<Self>>, Self::Error> {
            unimplemented!()
        }
        async fn get_listing_detail(&self, _: u32) -> Result<Option<Detail<Self>>, Self::Error> {
            unimplemented!()
        }
        async fn listing_exists(&self, _: u32) -> Result<bool, Self::Error> {
            unimplemented!()
        }
        async fn query_listings(
            &self,
            _: ListingSearch<Self>,
            _: usize,
            _: Tick,
        ) -> Result<ListingPage<Self>, Self::Error> {
            unimplemented!()
        }
        async fn create_listing(
            &self,
            _: u32,
            _: &'static str,
            _: ListingData,
            _: Tick,
            _: Tick,
        ) -> Result<Listing<Self>, Self::Error> {
            unimplemented!()
        }
        async fn update_listing(
            &self,
            _: u32,
            _: u64,
            _: &'static str,
            _: ListingData,
            _: bool,
            _: Tick,
        ) -> Result<Option<Listing<Self>>, Self::Error> {
            unimplemented!()
        }
        async fn delete_listing(&self, _: u32, _: u64) -> Result<bool, Self::Error> {
            unimplemented!()
        }
    }

    impl BidRepository for Contended {
        async fn get_bid_snapshot(&self, listing_id: u32) -> Result<Option<Snapshot<Self>>, Self::Error> {
            let bids = self
                .prices()
                .into_iter()
                .enumerate()
                .map(|(id, price)| BidRecord {
                    id: id as u32,
                    listing_id,
                    bidder_id: "rival",
                    price: Price::from(i64::from(price)),
                    created_at: Tick(0),
                })
                .collect();
            Ok(Some(BidSnapshot {
                listing: ListingRecord {
                    id: listing_id,
                    owner_id: "seller",
                    data: ListingData {
                        price: Some(Price::from(100)),
                        ..Default::default()
                    },
                    is_sold: false,
                    end_time: Tick(100),
                    version: 0,
                    created_at: Tick(0),
                    updated_at: Tick(0),
                },
                bids,
            }))
        }

        async fn add_bid(
            &self,
            bid_id: u32,
            listing_id: u32,
            bidder_id: &'static str,
            price: Price,
            _expected_floor: Price,
            as_of: Tick,
        ) -> Result<Option<Bid<Self>>, Self::Error> {
            let mut contended = self.contended.lock().unwrap_or_else(PoisonError::into_inner);
            let mut bids = self.bids.lock().unwrap_or_else(PoisonError::into_inner);
            if *contended > 0 {
                *contended -= 1;
                // A rival outbids by one and our write is refused.
                let floor = bids.last().copied().unwrap_or(100);
                bids.push(floor + 1);
                return Ok(None);
            }
            bids.push(u32::try_from(price.0.mantissa()).unwrap());
            Ok(Some(BidRecord {
                id: bid_id,
                listing_id,
                bidder_id,
                price,
                created_at: as_of,
            }))
        }
    }

    async fn bid(db: &Contended, amount: i64) -> Result<Bid<Contended>, BidFailure> {
        let Ok(outcome) = place_bid(db, 99, 1, "me", Price::from(amount), Tick(10)).await;
        outcome
    }

    #[tokio::test]
    async fn a_moved_floor_is_revalidated() {
        let db = Contended::new(2);
        let placed = bid(&db, 150).await.unwrap();
        assert_eq!(placed.price, Price::from(150));
        assert_eq!(db.prices(), vec![101, 102, 150]);
    }

    #[tokio::test]
    async fn revalidation_can_reject_the_bid() {
        // After two rival bids the floor is 102, which our 102 does not beat.
        let db = Contended::new(2);
        let outcome = bid(&db, 102).await;
        assert_eq!(
            outcome.unwrap_err(),
            BidFailure::BidTooLow {
                floor: Price::from(102)
            }
        );
        assert_eq!(db.prices(), vec![101, 102]);
    }

    #[tokio::test]
    async fn sustained_contention_gives_up() {
        let db = Contended::new(usize::MAX);
        let outcome = bid(&db, 1_000_000).await;
        assert_eq!(outcome.unwrap_err(), BidFailure::ConcurrentModification);
        assert_eq!(db.prices().len(), MAX_BID_ATTEMPTS);
    }

    #[tokio::test]
    async fn closing_time_is_exclusive() {
        let db = Contended::new(0);
        let Ok(outcome) = place_bid(&db, 99, 1, "me", Price::from(500), Tick(100)).await;
        assert_eq!(outcome.unwrap_err(), BidFailure::AuctionClosed);
        assert!(db.prices().is_empty());
    }
}
