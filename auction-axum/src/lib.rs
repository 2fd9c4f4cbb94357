#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the auction-axum crate.
//! [auction_core]: https://docs.rs/auction_core/latest/auction_core/index.html
//! [auction_axum]: https://docs.rs/auction_axum/latest/auction_axum/index.html
//! [auction_sqlite]: https://docs.rs/auction_sqlite/latest/auction_sqlite/index.html
#![doc = include_str!("../README.md")]

mod listing_routes;

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use auction_core::{
    models::Caller,
    ports::{Application, Repository},
};
use axum::{
    Extension, Json,
    http::{HeaderValue, StatusCode, header},
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use std::{fmt::Display, sync::Arc};
use tower_http::cors::{self, AllowOrigin, CorsLayer};

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Construct a full API router with the given state and config
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> axum::Router {
    let mut api = OpenApi::default();
    let cors = cors_layer(&config);
    ApiRouter::new()
        .api_route("/health", get(health_check))
        .nest("/listing", listing_routes::router())
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs)
        .layer(Extension(Arc::new(api))) // the document is large, so share it rather than clone it per request
        .layer(Extension(Arc::new(config)))
        .layer(cors)
        .with_state(state)
}

/// Render the OpenAPI document the router would serve, without serving it.
pub fn openapi_schema<T: ApiApplication>() -> OpenApi {
    let mut api = OpenApi::default();
    let _: axum::Router<T> = ApiRouter::new()
        .api_route("/health", get(health_check))
        .nest("/listing", listing_routes::router::<T>())
        .finish_api_with(&mut api, api_docs);
    api
}

fn cors_layer(config: &AxumConfig) -> CorsLayer {
    let origins = if config.allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(config.allowed_origins.iter().filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|_| tracing::warn!(origin, "ignoring unparseable CORS origin"))
                .ok()
        }))
    };
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(cors::Any)
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    let service = router(app, config);
    axum::serve(listener, service).await
}

/// The caller's user id type, for a given application
pub(crate) type UserIdOf<T> = <<T as Application>::Repository as Repository>::UserId;

/// Resolve the bearer token into a caller, or reject the request with 401.
pub(crate) async fn authenticate<T: ApiApplication>(
    app: &T,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Caller<UserIdOf<T>>, (StatusCode, String)> {
    let Some(TypedHeader(auth)) = auth else {
        return Err((StatusCode::UNAUTHORIZED, "missing bearer token".to_string()));
    };
    app.caller(&auth)
        .await
        .ok_or((StatusCode::UNAUTHORIZED, "not authenticated".to_string()))
}

/// Log an infrastructure failure and turn it into an opaque 500.
pub(crate) fn internal_error<E: Display>(message: &str) -> impl FnOnce(E) -> (StatusCode, String) {
    move |err| {
        tracing::event!(tracing::Level::ERROR, err = err.to_string(), message);
        (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
    }
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place. If a function takes a generic `T: ApiApplication`, then
/// everything one might reasonably want to do should work.
pub trait ApiApplication:
    Clone
    + Send
    + Sync
    + 'static
    + Application<
        Context = Authorization<Bearer>,
        Repository: Clone
                        + Send
                        + Sync
                        + 'static
                        + Repository<
            DateTime: Serialize + DeserializeOwned + JsonSchema + 'static,
            UserId: Serialize + DeserializeOwned + JsonSchema + 'static,
            ListingId: Serialize + DeserializeOwned + JsonSchema + 'static,
            BidId: Serialize + DeserializeOwned + JsonSchema + 'static,
            CommentId: Serialize + DeserializeOwned + JsonSchema + 'static,
        >,
    >
{
}

// this is the blanket implementation
impl<T: Clone + Send + Sync + 'static> ApiApplication for T where
    T: Application<
            Context = Authorization<Bearer>,
            Repository: Clone
                            + Send
                            + Sync
                            + 'static
                            + Repository<
                DateTime: Serialize + DeserializeOwned + JsonSchema + 'static,
                UserId: Serialize + DeserializeOwned + JsonSchema + 'static,
                ListingId: Serialize + DeserializeOwned + JsonSchema + 'static,
                BidId: Serialize + DeserializeOwned + JsonSchema + 'static,
                CommentId: Serialize + DeserializeOwned + JsonSchema + 'static,
            >,
        >
{
}
