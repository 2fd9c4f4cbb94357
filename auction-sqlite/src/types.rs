//! Type definitions for the SQLite implementation.
//!
//! The public types are the strongly-typed ids and datetime that the rest of
//! the system sees. The crate-private row types mirror the tables and convert
//! into the `auction-core` records, parsing the decimal columns on the way.

use auction_core::models::{
    BidRecord, CommentRecord, ListingData, ListingRecord, Price,
};

mod datetime;
pub use datetime::DateTime;

mod ids;
pub use ids::{BidId, CommentId, ListingId, UserId};

fn parse_price(column: &str, value: &str) -> Result<Price, sqlx::Error> {
    value.parse().map_err(|err| sqlx::Error::ColumnDecode {
        index: column.to_owned(),
        source: Box::new(err),
    })
}

#[derive(sqlx::FromRow)]
pub(crate) struct ListingRow {
    pub id: ListingId,
    pub owner_id: UserId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image_path: Option<String>,
    pub is_sold: bool,
    pub end_time: DateTime,
    pub version: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl TryFrom<ListingRow> for ListingRecord<DateTime, ListingId, UserId> {
    type Error = sqlx::Error;

    fn try_from(row: ListingRow) -> Result<Self, Self::Error> {
        let price = row
            .price
            .as_deref()
            .map(|price| parse_price("price", price))
            .transpose()?;
        let version = u64::try_from(row.version).map_err(|err| sqlx::Error::ColumnDecode {
            index: "version".to_owned(),
            source: Box::new(err),
        })?;

        Ok(ListingRecord {
            id: row.id,
            owner_id: row.owner_id,
            data: ListingData {
                title: row.title,
                description: row.description,
                price,
                image_path: row.image_path,
            },
            is_sold: row.is_sold,
            end_time: row.end_time,
            version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct BidRow {
    pub id: BidId,
    pub listing_id: ListingId,
    pub bidder_id: UserId,
    pub price: String,
    pub created_at: DateTime,
}

impl TryFrom<BidRow> for BidRecord<DateTime, BidId, ListingId, UserId> {
    type Error = sqlx::Error;

    fn try_from(row: BidRow) -> Result<Self, Self::Error> {
        Ok(BidRecord {
            price: parse_price("price", &row.price)?,
            id: row.id,
            listing_id: row.listing_id,
            bidder_id: row.bidder_id,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct CommentRow {
    pub id: CommentId,
    pub listing_id: Option<ListingId>,
    pub author_id: UserId,
    pub content: String,
    pub created_at: DateTime,
}

impl From<CommentRow> for CommentRecord<DateTime, CommentId, ListingId, UserId> {
    fn from(row: CommentRow) -> Self {
        CommentRecord {
            id: row.id,
            listing_id: row.listing_id,
            author_id: row.author_id,
            content: row.content,
            created_at: row.created_at,
        }
    }
}

/// Convert a batch of rows, failing on the first one that does not decode.
pub(crate) fn convert_all<Row, Record>(rows: Vec<Row>) -> Result<Vec<Record>, sqlx::Error>
where
    Record: TryFrom<Row, Error = sqlx::Error>,
{
    rows.into_iter().map(Record::try_from).collect()
}
