use super::{BidRepository, CommentRepository, Repository};
use crate::models::{AuctionConfig, Caller};

type UserId<T> = <<T as Application>::Repository as Repository>::UserId;

/// The identity gateway, bundled with everything else an adapter needs to
/// serve a request.
///
/// An implementation decides how a caller is identified (the `Context`, e.g.
/// an `Authorization` header), which repository backs the services, how ids
/// are minted and what "now" is. Services never consult this trait directly;
/// adapters resolve a [`Caller`] and pass it in.
pub trait Application: Send + Sync {
    /// The per-request information used to identify the caller
    type Context: Send + Sync;

    /// The persistence gateway
    type Repository: BidRepository + CommentRepository;

    /// Get a handle to the repository
    fn database(&self) -> &Self::Repository;

    /// The service settings
    fn config(&self) -> &AuctionConfig;

    /// The current time, as seen by the application
    fn now(&self) -> <Self::Repository as Repository>::DateTime;

    /// Mint a fresh listing id
    fn generate_listing_id(&self) -> <Self::Repository as Repository>::ListingId;

    /// Mint a fresh bid id
    fn generate_bid_id(&self) -> <Self::Repository as Repository>::BidId;

    /// Mint a fresh comment id
    fn generate_comment_id(&self) -> <Self::Repository as Repository>::CommentId;

    /// The id of the user making the request, if the request is authenticated
    fn current_user_id(
        &self,
        context: &Self::Context,
    ) -> impl Future<Output = Option<UserId<Self>>> + Send;

    /// Whether the user making the request is an administrator
    fn is_admin(&self, context: &Self::Context) -> impl Future<Output = bool> + Send;

    /// Whether the request carries a valid identity
    fn is_authenticated(&self, context: &Self::Context) -> impl Future<Output = bool> + Send {
        async move { self.current_user_id(context).await.is_some() }
    }

    /// Resolve the request into an explicit caller, or None if anonymous
    fn caller(
        &self,
        context: &Self::Context,
    ) -> impl Future<Output = Option<Caller<UserId<Self>>>> + Send {
        async move {
            let user_id = self.current_user_id(context).await?;
            let is_admin = self.is_admin(context).await;
            Some(Caller { user_id, is_admin })
        }
    }
}
