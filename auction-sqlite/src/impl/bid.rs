use super::{BID_COLUMNS, LISTING_COLUMNS};
use crate::{
    Db,
    types::{BidRow, ListingRow, convert_all},
};
use auction_core::{
    models::{BidSnapshot, ListingRecord, Price, floor_price},
    ports::{Bid, BidRepository, Snapshot},
};

impl BidRepository for Db {
    async fn get_bid_snapshot(
        &self,
        listing_id: Self::ListingId,
    ) -> Result<Option<Snapshot<Self>>, Self::Error> {
        let mut tx = self.reader.begin().await?;

        let Some(listing) = sqlx::query_as::<_, ListingRow>(&format!(
            "select {LISTING_COLUMNS} from listing where id = $1"
        ))
        .bind(listing_id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };

        let bids = sqlx::query_as::<_, BidRow>(&format!(
            "select {BID_COLUMNS} from bid where listing_id = $1"
        ))
        .bind(listing_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(BidSnapshot {
            listing: listing.try_into()?,
            bids: convert_all(bids)?,
        }))
    }

    async fn add_bid(
        &self,
        bid_id: Self::BidId,
        listing_id: Self::ListingId,
        bidder_id: Self::UserId,
        price: Price,
        expected_floor: Price,
        as_of: Self::DateTime,
    ) -> Result<Option<Bid<Self>>, Self::Error> {
        // The writer pool has a single connection, so nothing else can insert
        // a bid between recomputing the floor and writing ours.
        let mut tx = self.writer.begin().await?;

        let Some(listing) = sqlx::query_as::<_, ListingRow>(&format!(
            "select {LISTING_COLUMNS} from listing where id = $1"
        ))
        .bind(listing_id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };
        let listing: ListingRecord<_, _, _> = listing.try_into()?;

        let prices = sqlx::query_scalar::<_, String>("select price from bid where listing_id = $1")
            .bind(listing_id)
            .fetch_all(&mut *tx)
            .await?
            .iter()
            .map(|price| price.parse::<Price>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| sqlx::Error::ColumnDecode {
                index: "price".to_owned(),
                source: Box::new(err),
            })?;

        let current_floor = floor_price(listing.data.price, prices);
        if current_floor != expected_floor {
            tracing::debug!(
                listing_id = %listing_id,
                %expected_floor,
                %current_floor,
                "stale floor, bid not written"
            );
            return Ok(None);
        }

        let row = sqlx::query_as::<_, BidRow>(&format!(
            r#"
            insert into
                bid (id, listing_id, bidder_id, price, created_at)
            values
                ($1, $2, $3, $4, $5)
            returning {BID_COLUMNS}
            "#
        ))
        .bind(bid_id)
        .bind(listing_id)
        .bind(bidder_id)
        .bind(price.to_string())
        .bind(as_of)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(row.try_into()?))
    }
}
