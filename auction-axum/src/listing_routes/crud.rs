use super::Id;
use crate::{ApiApplication, UserIdOf, authenticate, config::AxumConfig, internal_error};

use auction_core::{
    models::{ListingDraft, ListingUpdate},
    ports::{Detail, Listing, ListingPage, ListingRepository as _, ListingSearch, Repository},
    services::{self, ListingFailure},
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use std::sync::Arc;

type ListingIdOf<T> = <<T as auction_core::ports::Application>::Repository as Repository>::ListingId;
type DateTimeOf<T> = <<T as auction_core::ports::Application>::Repository as Repository>::DateTime;

fn refuse(failure: ListingFailure) -> (StatusCode, String) {
    let status = match failure {
        ListingFailure::NotFound => StatusCode::NOT_FOUND,
        ListingFailure::Unauthorized => StatusCode::FORBIDDEN,
        ListingFailure::ConcurrentModification => StatusCode::CONFLICT,
        ListingFailure::InvalidTransition => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (status, failure.to_string())
}

/// Search listings.
///
/// At most `page_limit` listings are returned. When there are more, the
/// response carries the query that fetches the next page.
pub(crate) async fn list_listings<T: ApiApplication>(
    State(app): State<T>,
    Extension(config): Extension<Arc<AxumConfig>>,
    Query(query): Query<ListingSearch<T::Repository>>,
) -> Result<Json<ListingPage<T::Repository>>, (StatusCode, String)> {
    app.database()
        .query_listings(query, config.page_limit, app.now())
        .await
        .map(Json)
        .map_err(internal_error("failed to query listings"))
}

/// Create a listing owned by the authenticated user.
///
/// # Returns
///
/// - `201 Created`: The stored listing
/// - `401 Unauthorized`: Missing or invalid token
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn create_listing<T: ApiApplication>(
    State(app): State<T>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Json(draft): Json<ListingDraft<DateTimeOf<T>>>,
) -> Result<(StatusCode, Json<Listing<T::Repository>>), (StatusCode, String)> {
    let caller = authenticate(&app, auth).await?;

    services::create_listing(
        app.database(),
        app.config(),
        &caller,
        app.generate_listing_id(),
        draft,
        app.now(),
    )
    .await
    .map(|listing| (StatusCode::CREATED, Json(listing)))
    .map_err(internal_error("failed to create listing"))
}

/// Retrieve a listing along with its bids and comments.
pub(crate) async fn read_listing<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { listing_id }): Path<Id<ListingIdOf<T>>>,
) -> Result<Json<Detail<T::Repository>>, (StatusCode, String)> {
    app.database()
        .get_listing_detail(listing_id.clone())
        .await
        .map_err(internal_error("failed to get listing"))?
        .map(Json)
        .ok_or((
            StatusCode::NOT_FOUND,
            format!("unknown listing {}", listing_id),
        ))
}

/// Edit a listing.
///
/// # Returns
///
/// - `200 OK`: The updated listing
/// - `401 Unauthorized`: Missing or invalid token
/// - `403 Forbidden`: Caller is neither the owner nor an admin
/// - `404 Not Found`: Listing does not exist
/// - `409 Conflict`: Listing changed since it was read
/// - `422 Unprocessable Entity`: Attempt to unsell a sold listing
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn update_listing<T: ApiApplication>(
    State(app): State<T>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Path(Id { listing_id }): Path<Id<ListingIdOf<T>>>,
    Json(update): Json<ListingUpdate<UserIdOf<T>>>,
) -> Result<Json<Listing<T::Repository>>, (StatusCode, String)> {
    let caller = authenticate(&app, auth).await?;

    services::update_listing(app.database(), &caller, listing_id, update, app.now())
        .await
        .map_err(internal_error("failed to update listing"))?
        .map(Json)
        .map_err(refuse)
}

/// Delete a listing. Succeeds if the listing is already gone.
pub(crate) async fn delete_listing<T: ApiApplication>(
    State(app): State<T>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Path(Id { listing_id }): Path<Id<ListingIdOf<T>>>,
) -> Result<StatusCode, (StatusCode, String)> {
    let caller = authenticate(&app, auth).await?;

    services::delete_listing(app.database(), &caller, listing_id)
        .await
        .map_err(internal_error("failed to delete listing"))?
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(refuse)
}
