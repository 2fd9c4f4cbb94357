use super::Id;
use crate::{ApiApplication, authenticate, internal_error};

use auction_core::{
    ports::{Comment, Repository},
    services::{self, CommentFailure},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};

/// Request body for posting a comment.
#[derive(schemars::JsonSchema, serde::Deserialize)]
#[schemars(inline)]
pub(crate) struct PostCommentDto {
    /// The comment text; surrounding whitespace is dropped
    content: String,
}

/// Comment on a listing as the authenticated user.
pub(crate) async fn post_comment<T: ApiApplication>(
    State(app): State<T>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Path(Id { listing_id }): Path<Id<<T::Repository as Repository>::ListingId>>,
    Json(body): Json<PostCommentDto>,
) -> Result<(StatusCode, Json<Comment<T::Repository>>), (StatusCode, String)> {
    let caller = authenticate(&app, auth).await?;

    services::post_comment(
        app.database(),
        &caller,
        app.generate_comment_id(),
        listing_id,
        &body.content,
        app.now(),
    )
    .await
    .map_err(internal_error("failed to post comment"))?
    .map(|comment| (StatusCode::CREATED, Json(comment)))
    .map_err(|failure| match failure {
        CommentFailure::NotFound => (StatusCode::NOT_FOUND, failure.to_string()),
        CommentFailure::EmptyContent => (StatusCode::UNPROCESSABLE_ENTITY, failure.to_string()),
    })
}
