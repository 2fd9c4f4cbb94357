use super::Permissions;
use auction_core::{models::AuctionConfig, ports::Application};
use auction_sqlite::{
    Db,
    types::{BidId, CommentId, DateTime, ListingId, UserId},
};
use headers::{Authorization, authorization::Bearer};

#[derive(Clone)]
pub struct TestApp {
    pub db: Db,
    pub config: AuctionConfig,
}

impl TestApp {
    fn permissions(&self, context: &Authorization<Bearer>) -> Option<Permissions> {
        context.0.token().parse().ok()
    }
}

impl Application for TestApp {
    type Context = Authorization<Bearer>;
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn config(&self) -> &AuctionConfig {
        &self.config
    }

    fn now(&self) -> DateTime {
        time::OffsetDateTime::now_utc().into()
    }

    fn generate_listing_id(&self) -> ListingId {
        uuid::Uuid::new_v4().into()
    }

    fn generate_bid_id(&self) -> BidId {
        uuid::Uuid::new_v4().into()
    }

    fn generate_comment_id(&self) -> CommentId {
        uuid::Uuid::new_v4().into()
    }

    async fn current_user_id(&self, context: &Self::Context) -> Option<UserId> {
        self.permissions(context)?.user_id
    }

    async fn is_admin(&self, context: &Self::Context) -> bool {
        self.permissions(context).is_some_and(|p| p.admin)
    }
}
