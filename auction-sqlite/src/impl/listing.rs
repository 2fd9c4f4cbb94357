use super::{BID_COLUMNS, COMMENT_COLUMNS, LISTING_COLUMNS};
use crate::{
    Db,
    types::{BidRow, CommentRow, ListingRow, convert_all},
};
use auction_core::{
    models::{ListingData, ListingDetail, ListingStatus, QueryResponse},
    ports::{Detail, Listing, ListingPage, ListingRepository, ListingSearch},
};

impl ListingRepository for Db {
    async fn get_listing(
        &self,
        listing_id: Self::ListingId,
    ) -> Result<Option<Listing<Self>>, Self::Error> {
        let row = sqlx::query_as::<_, ListingRow>(&format!(
            "select {LISTING_COLUMNS} from listing where id = $1"
        ))
        .bind(listing_id)
        .fetch_optional(&self.reader)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn get_listing_detail(
        &self,
        listing_id: Self::ListingId,
    ) -> Result<Option<Detail<Self>>, Self::Error> {
        // One transaction so the bids and comments belong to the listing we read.
        let mut tx = self.reader.begin().await?;

        let Some(row) = sqlx::query_as::<_, ListingRow>(&format!(
            "select {LISTING_COLUMNS} from listing where id = $1"
        ))
        .bind(listing_id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };

        let bids = sqlx::query_as::<_, BidRow>(&format!(
            r#"
            select {BID_COLUMNS}
            from bid
            where listing_id = $1
            order by created_at desc, cast(price as real) desc
            "#
        ))
        .bind(listing_id)
        .fetch_all(&mut *tx)
        .await?;

        let comments = sqlx::query_as::<_, CommentRow>(&format!(
            r#"
            select {COMMENT_COLUMNS}
            from comment
            where listing_id = $1
            order by created_at desc
            "#
        ))
        .bind(listing_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(ListingDetail {
            listing: row.try_into()?,
            bids: convert_all(bids)?,
            comments: comments.into_iter().map(Into::into).collect(),
        }))
    }

    async fn listing_exists(&self, listing_id: Self::ListingId) -> Result<bool, Self::Error> {
        sqlx::query_scalar::<_, bool>("select exists (select 1 from listing where id = $1)")
            .bind(listing_id)
            .fetch_one(&self.reader)
            .await
    }

    async fn query_listings(
        &self,
        query: ListingSearch<Self>,
        limit: usize,
        as_of: Self::DateTime,
    ) -> Result<ListingPage<Self>, Self::Error> {
        // Each filter is disabled by binding null.
        let (open, closed) = match query.status {
            Some(ListingStatus::Open) => (Some(true), None),
            Some(ListingStatus::Closed) => (None, Some(true)),
            None => (None, None),
        };

        // One extra row tells us whether there is another page.
        let fetch = i64::try_from(limit.saturating_add(1)).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, ListingRow>(&format!(
            r#"
            select {LISTING_COLUMNS}
            from listing
            where ($1 is null or owner_id = $1)
            and ($2 is null or is_sold = $2)
            and ($3 is null or end_time > $5)
            and ($4 is null or end_time <= $5)
            and ($6 is null or created_at < $6 or (created_at = $6 and $7 is not null and id < $7))
            order by created_at desc, id desc
            limit $8
            "#
        ))
        .bind(query.owner_id)
        .bind(query.sold)
        .bind(open)
        .bind(closed)
        .bind(as_of)
        .bind(query.before)
        .bind(query.before_id)
        .bind(fetch)
        .fetch_all(&self.reader)
        .await?;

        let mut results: Vec<Listing<Self>> = convert_all(rows)?;
        let more = if results.len() > limit {
            results.truncate(limit);
            results.last().map(|last| query.clone().after(last))
        } else {
            None
        };

        Ok(QueryResponse { results, more })
    }

    async fn create_listing(
        &self,
        listing_id: Self::ListingId,
        owner_id: Self::UserId,
        data: ListingData,
        end_time: Self::DateTime,
        as_of: Self::DateTime,
    ) -> Result<Listing<Self>, Self::Error> {
        let row = sqlx::query_as::<_, ListingRow>(&format!(
            r#"
            insert into
                listing (id, owner_id, title, description, price, image_path, is_sold, end_time, version, created_at, updated_at)
            values
                ($1, $2, $3, $4, $5, $6, 0, $7, 0, $8, $8)
            returning {LISTING_COLUMNS}
            "#
        ))
        .bind(listing_id)
        .bind(owner_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.price.map(|price| price.to_string()))
        .bind(data.image_path)
        .bind(end_time)
        .bind(as_of)
        .fetch_one(&self.writer)
        .await?;

        row.try_into()
    }

    async fn update_listing(
        &self,
        listing_id: Self::ListingId,
        expected_version: u64,
        owner_id: Self::UserId,
        data: ListingData,
        is_sold: bool,
        as_of: Self::DateTime,
    ) -> Result<Option<Listing<Self>>, Self::Error> {
        let expected_version = i64::try_from(expected_version).unwrap_or(i64::MAX);

        let row = sqlx::query_as::<_, ListingRow>(&format!(
            r#"
            update
                listing
            set
                owner_id = $3,
                title = $4,
                description = $5,
                price = $6,
                image_path = $7,
                is_sold = $8,
                version = version + 1,
                updated_at = $9
            where
                id = $1 and version = $2
            returning {LISTING_COLUMNS}
            "#
        ))
        .bind(listing_id)
        .bind(expected_version)
        .bind(owner_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.price.map(|price| price.to_string()))
        .bind(data.image_path)
        .bind(is_sold)
        .bind(as_of)
        .fetch_optional(&self.writer)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn delete_listing(
        &self,
        listing_id: Self::ListingId,
        expected_version: u64,
    ) -> Result<bool, Self::Error> {
        let expected_version = i64::try_from(expected_version).unwrap_or(i64::MAX);

        let result = sqlx::query("delete from listing where id = $1 and version = $2")
            .bind(listing_id)
            .bind(expected_version)
            .execute(&self.writer)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
