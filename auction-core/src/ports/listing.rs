use super::{Detail, Listing, ListingPage, ListingSearch};
use crate::models::ListingData;

/// Repository interface for listing storage.
///
/// This trait encapsulates the create/read/update/delete operations over
/// listings. It performs no authorization and no validation; those belong to
/// the listing lifecycle service.
pub trait ListingRepository: super::Repository {
    /// Retrieve a listing without its related entities.
    fn get_listing(
        &self,
        listing_id: Self::ListingId,
    ) -> impl Future<Output = Result<Option<Listing<Self>>, Self::Error>> + Send;

    /// Retrieve a listing together with all of its bids and comments.
    fn get_listing_detail(
        &self,
        listing_id: Self::ListingId,
    ) -> impl Future<Output = Result<Option<Detail<Self>>, Self::Error>> + Send;

    /// Check whether a listing exists.
    fn listing_exists(
        &self,
        listing_id: Self::ListingId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Find at most `limit` listings matching `query`, newest first.
    ///
    /// The open/closed filter is evaluated against `as_of`. When more
    /// listings match, the response carries the query for the next page.
    fn query_listings(
        &self,
        query: ListingSearch<Self>,
        limit: usize,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<ListingPage<Self>, Self::Error>> + Send;

    /// Store a new, unsold listing at version 0.
    fn create_listing(
        &self,
        listing_id: Self::ListingId,
        owner_id: Self::UserId,
        data: ListingData,
        end_time: Self::DateTime,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Listing<Self>, Self::Error>> + Send;

    /// Overwrite a listing, provided it is still at `expected_version`.
    ///
    /// # Returns
    ///
    /// - Ok(Some(record)) with the version incremented if the write happened
    /// - Ok(None) if no listing with this id is at `expected_version`, either
    ///   because it does not exist or because another write got there first
    /// - Err otherwise
    fn update_listing(
        &self,
        listing_id: Self::ListingId,
        expected_version: u64,
        owner_id: Self::UserId,
        data: ListingData,
        is_sold: bool,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Option<Listing<Self>>, Self::Error>> + Send;

    /// Remove a listing, provided it is still at `expected_version`. Its bids
    /// go with it; its comments are detached.
    ///
    /// # Returns
    ///
    /// - Ok(true) if the listing was removed
    /// - Ok(false) if no listing with this id is at `expected_version`
    /// - Err otherwise
    fn delete_listing(
        &self,
        listing_id: Self::ListingId,
        expected_version: u64,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
