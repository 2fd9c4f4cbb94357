#![allow(dead_code)]

use auction_core::{
    models::{AuctionConfig, Caller, ListingData, ListingDraft, Price},
    ports::{Application, Listing},
    services,
};
use auction_sqlite::{
    Db,
    config::SqliteConfig,
    types::{BidId, CommentId, DateTime, ListingId, UserId},
};
use std::time::Duration;

/// The caller is passed straight through as the request context.
pub struct TestApp {
    pub db: Db,
    pub config: AuctionConfig,
    pub now: DateTime,
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        Ok(Self {
            db: Db::open(&SqliteConfig::default()).await?,
            config: AuctionConfig::default(),
            now: time::OffsetDateTime::now_utc().into(),
        })
    }

    pub fn later(&self, secs: u64) -> DateTime {
        self.now + Duration::from_secs(secs)
    }

    /// Create a listing that closes an hour from `now`.
    pub async fn listing(
        &self,
        owner: &Caller<UserId>,
        price: Option<i64>,
    ) -> anyhow::Result<Listing<Db>> {
        let draft = ListingDraft {
            data: ListingData {
                title: Some("Brass lamp".to_owned()),
                description: Some("Works, mostly".to_owned()),
                price: price.map(Price::from),
                image_path: None,
            },
            end_time: Some(self.later(3600)),
        };
        Ok(services::create_listing(
            &self.db,
            &self.config,
            owner,
            self.generate_listing_id(),
            draft,
            self.now,
        )
        .await?)
    }
}

pub fn user() -> Caller<UserId> {
    Caller::user(uuid::Uuid::new_v4().into())
}

pub fn admin() -> Caller<UserId> {
    Caller::admin(uuid::Uuid::new_v4().into())
}

impl Application for TestApp {
    type Context = Option<Caller<UserId>>;
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn config(&self) -> &AuctionConfig {
        &self.config
    }

    fn now(&self) -> DateTime {
        self.now
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
        context.as_ref().map(|caller| caller.user_id)
    }

    async fn is_admin(&self, context: &Self::Context) -> bool {
        context.as_ref().is_some_and(|caller| caller.is_admin)
    }
}
