//! REST API endpoints for listings and the bids and comments placed on them.

use crate::ApiApplication;
use aide::{
    axum::{ApiRouter, routing::get_with, routing::post_with},
    transform::TransformOperation,
};

mod bid;
use bid::*;

mod comment;
use comment::*;

mod crud;
use crud::*;

/// Path parameter for listing-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct Id<T> {
    /// The unique identifier of the listing
    listing_id: T,
}

/// Creates a router with listing-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get_with(list_listings::<T>, list_listings_docs)
                .post_with(create_listing::<T>, create_listing_docs),
            |route| route.tag("listing"),
        )
        .api_route_with(
            "/{listing_id}",
            get_with(read_listing::<T>, read_listing_docs)
                .put_with(update_listing::<T>, update_listing_docs)
                .delete_with(delete_listing::<T>, delete_listing_docs),
            |route| route.tag("listing"),
        )
        .api_route_with(
            "/{listing_id}/bid",
            post_with(place_bid::<T>, place_bid_docs),
            |route| route.security_requirement("jwt").tag("bid"),
        )
        .api_route_with(
            "/{listing_id}/comment",
            post_with(post_comment::<T>, post_comment_docs),
            |route| route.security_requirement("jwt").tag("comment"),
        )
}

fn list_listings_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Search listings")
        .description(
            r#"
            List listings, newest first, optionally filtered by owner, sold flag
            and whether bidding is still open. No authentication required.
            Results are paged; when more listings match, `more` holds the query
            for the next page.
            "#,
        )
        .response_with::<500, String, _>(|res| res.description("Database query failed"))
}

fn create_listing_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Create listing")
        .description(
            r#"
            Put an item up for auction. The authenticated user becomes the
            owner; an `owner_id` in the body is ignored. Without an `end_time`
            bidding closes after the configured default duration.
            "#,
        )
        .security_requirement("jwt")
        .response_with::<401, String, _>(|res| res.description("Not authenticated"))
        .response_with::<500, String, _>(|res| res.description("Database operation failed"))
}

fn read_listing_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Get listing")
        .description("A listing with all of its bids and comments, newest first.")
        .response_with::<404, String, _>(|res| res.description("Listing does not exist"))
        .response_with::<500, String, _>(|res| res.description("Database query failed"))
}

fn update_listing_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Edit listing")
        .description(
            r#"
            Change any of a listing's fields; absent fields are left as they are.
            Only the owner or an admin may edit, and only an admin may change
            the owner. Send the `version` last read to have the edit refused if
            the listing changed in the meantime.
            "#,
        )
        .security_requirement("jwt")
        .response_with::<401, String, _>(|res| res.description("Not authenticated"))
        .response_with::<403, String, _>(|res| res.description("Not the owner or an admin"))
        .response_with::<404, String, _>(|res| res.description("Listing does not exist"))
        .response_with::<409, String, _>(|res| res.description("Listing was modified concurrently"))
        .response_with::<422, String, _>(|res| res.description("A sold listing cannot be unsold"))
        .response_with::<500, String, _>(|res| res.description("Database operation failed"))
}

fn delete_listing_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Delete listing")
        .description(
            r#"
            Remove a listing and its bids. Comments are kept but detached.
            Deleting a listing that does not exist succeeds.
            "#,
        )
        .security_requirement("jwt")
        .response_with::<204, (), _>(|res| res.description("Listing is gone"))
        .response_with::<401, String, _>(|res| res.description("Not authenticated"))
        .response_with::<403, String, _>(|res| res.description("Not the owner or an admin"))
        .response_with::<409, String, _>(|res| res.description("Listing changed while deleting"))
        .response_with::<500, String, _>(|res| res.description("Database operation failed"))
}

fn place_bid_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Place bid")
        .description(
            r#"
            Bid on an open listing. The bid must be strictly greater than the
            highest bid so far, or than the starting price if there are none.
            "#,
        )
        .response_with::<401, String, _>(|res| res.description("Not authenticated"))
        .response_with::<404, String, _>(|res| res.description("Listing does not exist"))
        .response_with::<409, String, _>(|res| {
            res.description("Auction closed, bid too low, or too much contention")
        })
        .response_with::<500, String, _>(|res| res.description("Database operation failed"))
}

fn post_comment_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Post comment")
        .response_with::<401, String, _>(|res| res.description("Not authenticated"))
        .response_with::<404, String, _>(|res| res.description("Listing does not exist"))
        .response_with::<422, String, _>(|res| res.description("Comment is empty"))
        .response_with::<500, String, _>(|res| res.description("Database operation failed"))
}
