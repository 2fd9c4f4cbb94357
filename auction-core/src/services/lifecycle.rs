use crate::{
    models::{AuctionConfig, Caller, ListingDraft, ListingUpdate},
    ports::{Listing, ListingRepository},
};
use thiserror::Error;
use tracing::{Level, event};

/// The ways in which a listing mutation can be refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListingFailure {
    /// The listing does not exist
    #[error("listing not found")]
    NotFound,
    /// The caller neither owns the listing nor is an admin
    #[error("not authorized to modify this listing")]
    Unauthorized,
    /// The listing changed between being read and being written
    #[error("listing was modified concurrently")]
    ConcurrentModification,
    /// The update would move the listing from sold back to unsold
    #[error("a sold listing cannot be marked unsold")]
    InvalidTransition,
}

/// Create a listing owned by `caller`.
///
/// The owner is always the caller and the listing always starts unsold. When
/// the draft has no end time the listing closes `config.default_duration`
/// after `as_of`.
pub async fn create_listing<R: ListingRepository>(
    db: &R,
    config: &AuctionConfig,
    caller: &Caller<R::UserId>,
    listing_id: R::ListingId,
    draft: ListingDraft<R::DateTime>,
    as_of: R::DateTime,
) -> Result<Listing<R>, R::Error> {
    let end_time = draft
        .end_time
        .unwrap_or_else(|| as_of + config.default_duration);

    let listing = db
        .create_listing(
            listing_id,
            caller.user_id.clone(),
            draft.data,
            end_time,
            as_of,
        )
        .await?;

    event!(
        Level::INFO,
        listing_id = %listing.id,
        owner_id = %listing.owner_id,
        end_time = %listing.end_time,
        "listing created"
    );
    Ok(listing)
}

/// Edit a listing on behalf of `caller`.
///
/// Only the owner or an admin may edit, and only an admin may hand the
/// listing to another owner. A sold listing stays sold.
pub async fn update_listing<R: ListingRepository>(
    db: &R,
    caller: &Caller<R::UserId>,
    listing_id: R::ListingId,
    update: ListingUpdate<R::UserId>,
    as_of: R::DateTime,
) -> Result<Result<Listing<R>, ListingFailure>, R::Error> {
    let Some(current) = db.get_listing(listing_id.clone()).await? else {
        return Ok(Err(ListingFailure::NotFound));
    };

    if !caller.can_manage(&current.owner_id) {
        event!(
            Level::WARN,
            listing_id = %listing_id,
            caller_id = %caller.user_id,
            "refused edit by non-owner"
        );
        return Ok(Err(ListingFailure::Unauthorized));
    }

    let owner_id = match update.owner_id {
        Some(owner_id) if owner_id != current.owner_id => {
            if !caller.is_admin {
                return Ok(Err(ListingFailure::Unauthorized));
            }
            owner_id
        }
        _ => current.owner_id.clone(),
    };

    let is_sold = update.is_sold.unwrap_or(current.is_sold);
    if current.is_sold && !is_sold {
        return Ok(Err(ListingFailure::InvalidTransition));
    }

    if update.version.is_some_and(|v| v != current.version) {
        return Ok(Err(ListingFailure::ConcurrentModification));
    }

    let updated = db
        .update_listing(
            listing_id.clone(),
            current.version,
            owner_id,
            update.data.patch(current.data),
            is_sold,
            as_of,
        )
        .await?;

    match updated {
        Some(listing) => {
            event!(
                Level::INFO,
                listing_id = %listing.id,
                version = listing.version,
                "listing updated"
            );
            Ok(Ok(listing))
        }
        // The write matched nothing: either the listing vanished or someone
        // else bumped its version after we read it.
        None if db.listing_exists(listing_id).await? => {
            Ok(Err(ListingFailure::ConcurrentModification))
        }
        None => Ok(Err(ListingFailure::NotFound)),
    }
}

/// Delete a listing on behalf of `caller`.
///
/// Deleting a listing that does not exist succeeds, so the operation is
/// idempotent. The delete only goes through if the listing is unchanged since
/// the caller was authorized against it.
pub async fn delete_listing<R: ListingRepository>(
    db: &R,
    caller: &Caller<R::UserId>,
    listing_id: R::ListingId,
) -> Result<Result<(), ListingFailure>, R::Error> {
    let Some(current) = db.get_listing(listing_id.clone()).await? else {
        return Ok(Ok(()));
    };

    if !caller.can_manage(&current.owner_id) {
        event!(
            Level::WARN,
            listing_id = %listing_id,
            caller_id = %caller.user_id,
            "refused delete by non-owner"
        );
        return Ok(Err(ListingFailure::Unauthorized));
    }

    if db
        .delete_listing(listing_id.clone(), current.version)
        .await?
    {
        event!(Level::INFO, listing_id = %listing_id, "listing deleted");
        return Ok(Ok(()));
    }

    // Someone else got there first: either the listing is already gone, which
    // is what we wanted, or it was edited after the ownership check.
    if db.listing_exists(listing_id).await? {
        Ok(Err(ListingFailure::ConcurrentModification))
    } else {
        Ok(Ok(()))
    }
}
