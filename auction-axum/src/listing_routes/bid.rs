use super::Id;
use crate::{ApiApplication, authenticate, internal_error};

use auction_core::{
    models::Price,
    ports::{Bid, Repository},
    services::{self, BidFailure},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};

/// Request body for placing a bid.
#[derive(schemars::JsonSchema, serde::Deserialize)]
#[schemars(inline)]
pub(crate) struct PlaceBidDto {
    /// The amount offered, as a decimal string or number
    price: Price,
}

/// Bid on a listing as the authenticated user.
///
/// # Returns
///
/// - `201 Created`: The accepted bid
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Listing does not exist
/// - `409 Conflict`: The auction has closed, the bid does not beat the
///   current floor, or competing bids kept moving the floor
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn place_bid<T: ApiApplication>(
    State(app): State<T>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Path(Id { listing_id }): Path<Id<<T::Repository as Repository>::ListingId>>,
    Json(body): Json<PlaceBidDto>,
) -> Result<(StatusCode, Json<Bid<T::Repository>>), (StatusCode, String)> {
    let caller = authenticate(&app, auth).await?;

    services::place_bid(
        app.database(),
        app.generate_bid_id(),
        listing_id,
        caller.user_id,
        body.price,
        app.now(),
    )
    .await
    .map_err(internal_error("failed to place bid"))?
    .map(|bid| (StatusCode::CREATED, Json(bid)))
    .map_err(|failure| {
        let status = match failure {
            BidFailure::NotFound => StatusCode::NOT_FOUND,
            BidFailure::AuctionClosed
            | BidFailure::BidTooLow { .. }
            | BidFailure::ConcurrentModification => StatusCode::CONFLICT,
        };
        (status, failure.to_string())
    })
}
