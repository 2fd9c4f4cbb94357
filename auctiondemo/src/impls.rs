//! Application implementation with JWT-based identity.
//!
//! A request is authenticated by an HS256-signed JWT. The standard `sub`
//! claim is the user id and a custom `admin` claim grants admin rights.

use auction_core::{models::AuctionConfig, ports::Application};
use auction_sqlite::{
    Db,
    types::{BidId, CommentId, DateTime, ListingId, UserId},
};
use headers::{Authorization, authorization::Bearer};
use jwt_simple::{
    claims::JWTClaims,
    prelude::{HS256Key, MACLike},
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Namespace nibbles distinguishing the kinds of generated ids. The top two
// bits of each are the RFC 9562 variant.
const LISTING_NAMESPACE: u64 = 0x9;
const BID_NAMESPACE: u64 = 0xA;
const COMMENT_NAMESPACE: u64 = 0xB;

/// The demo application: a SQLite database and a JWT key.
#[derive(Clone)]
pub struct DemoApp {
    /// Database connection for persistent storage
    pub db: Db,
    /// HMAC key for JWT token verification
    pub key: HS256Key,
    /// Auction rules
    pub config: AuctionConfig,
}

impl DemoApp {
    /// Extract and verify JWT claims from the authorization header.
    fn claims(&self, context: &Authorization<Bearer>) -> Option<JWTClaims<CustomJWTClaims>> {
        let token = context.0.token();
        self.key.verify_token::<CustomJWTClaims>(token, None).ok()
    }
}

/// Build a v8 UUID that sorts by creation time.
///
/// The unix timestamp is split (48, 12, 4 bits) around the version and variant
/// fields, followed by a namespace nibble and 56 random bits.
fn time_ordered_id(namespace: u64, now: time::OffsetDateTime) -> Uuid {
    let rng56 = rand::rng().next_u64() >> 8;

    let now = now.unix_timestamp() as u64;
    let now48 = 0xffff_ffff_ffff_0000 & now;
    let now12 = (0xfff0 & now) >> 4;
    let now04 = (0x000f & now) << 56;

    let hi = 0x0000_0000_0000_8000 | now48 | now12;
    let lo = (namespace << 60) | now04 | rng56;
    Uuid::from_u64_pair(hi, lo)
}

impl Application for DemoApp {
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
        time_ordered_id(LISTING_NAMESPACE, time::OffsetDateTime::now_utc()).into()
    }

    fn generate_bid_id(&self) -> BidId {
        time_ordered_id(BID_NAMESPACE, time::OffsetDateTime::now_utc()).into()
    }

    fn generate_comment_id(&self) -> CommentId {
        time_ordered_id(COMMENT_NAMESPACE, time::OffsetDateTime::now_utc()).into()
    }

    async fn current_user_id(&self, context: &Self::Context) -> Option<UserId> {
        // The demo app takes the standard sub: claim to be the user id
        self.claims(context)?.subject?.parse().ok()
    }

    async fn is_admin(&self, context: &Self::Context) -> bool {
        // admin rights come from an `admin: true` custom claim
        self.claims(context)
            .map(|claims| claims.custom.admin)
            .unwrap_or(false)
    }
}

/// Custom claims structure for JWT tokens.
#[derive(Serialize, Deserialize)]
pub struct CustomJWTClaims {
    /// Whether the token holder may act on listings they do not own.
    #[serde(default)]
    pub admin: bool,
}
