mod common;

use auction_core::{
    models::{ListingData, Price},
    ports::{Application, Bid, BidRepository as _, Listing, ListingRepository as _},
    services::{BidFailure, place_bid},
};
use auction_sqlite::Db;
use common::{TestApp, user};
use rstest::rstest;

async fn bid(
    app: &TestApp,
    listing: &Listing<Db>,
    amount: &str,
) -> anyhow::Result<Result<Bid<Db>, BidFailure>> {
    Ok(place_bid(
        app.database(),
        app.generate_bid_id(),
        listing.id,
        user().user_id,
        amount.parse()?,
        app.now,
    )
    .await?)
}

#[rstest]
#[case("99.99", false)]
#[case("100", false)]
#[case("100.00", false)]
#[case("100.01", true)]
#[tokio::test]
async fn starting_price_is_the_floor_without_bids(
    #[case] amount: &str,
    #[case] accepted: bool,
) -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let listing = app.listing(&user(), Some(100)).await?;

    let outcome = bid(&app, &listing, amount).await?;
    if accepted {
        let placed = outcome?;
        let amount = amount.parse::<Price>()?;
        assert_eq!(placed.price, amount);
        let snapshot = app.db.get_bid_snapshot(listing.id).await?.unwrap();
        assert_eq!(snapshot.floor_price(), amount);
    } else {
        assert_eq!(
            outcome.unwrap_err(),
            BidFailure::BidTooLow {
                floor: Price::from(100)
            }
        );
    }
    Ok(())
}

#[tokio::test]
async fn the_floor_follows_the_highest_bid() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let listing = app.listing(&user(), Some(100)).await?;

    assert_eq!(
        bid(&app, &listing, "100").await?.unwrap_err(),
        BidFailure::BidTooLow {
            floor: Price::from(100)
        }
    );
    bid(&app, &listing, "150").await??;
    assert_eq!(
        bid(&app, &listing, "150").await?.unwrap_err(),
        BidFailure::BidTooLow {
            floor: Price::from(150)
        }
    );
    bid(&app, &listing, "151").await??;

    let detail = app.db.get_listing_detail(listing.id).await?.unwrap();
    let prices: Vec<Price> = detail.bids.iter().map(|bid| bid.price).collect();
    assert_eq!(prices, vec![Price::from(151), Price::from(150)]);
    assert_eq!(detail.floor_price(), Price::from(151));
    Ok(())
}

#[tokio::test]
async fn a_listing_without_a_price_starts_at_zero() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let listing = app.listing(&user(), None).await?;

    assert_eq!(
        bid(&app, &listing, "0").await?.unwrap_err(),
        BidFailure::BidTooLow { floor: Price::ZERO }
    );
    bid(&app, &listing, "0.01").await??;
    Ok(())
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(7200)]
#[tokio::test]
async fn closed_listings_reject_every_bid(#[case] secs_after_close: u64) -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let listing = app.listing(&user(), Some(50)).await?;
    let after_close = listing.end_time + std::time::Duration::from_secs(secs_after_close);

    let outcome = place_bid(
        &app.db,
        app.generate_bid_id(),
        listing.id,
        user().user_id,
        Price::from(1000),
        after_close,
    )
    .await?;

    assert_eq!(outcome.unwrap_err(), BidFailure::AuctionClosed);
    let snapshot = app.db.get_bid_snapshot(listing.id).await?.unwrap();
    assert!(snapshot.bids.is_empty());
    Ok(())
}

#[tokio::test]
async fn bids_on_missing_listings_are_not_found() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let outcome = place_bid(
        &app.db,
        app.generate_bid_id(),
        app.generate_listing_id(),
        user().user_id,
        Price::from(10),
        app.now,
    )
    .await?;

    assert_eq!(outcome.unwrap_err(), BidFailure::NotFound);
    Ok(())
}

#[tokio::test]
async fn a_stale_floor_writes_nothing() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let listing = app.listing(&user(), Some(100)).await?;
    bid(&app, &listing, "150").await??;

    // Validated against the starting price, but a bid has landed since.
    let stale = app
        .db
        .add_bid(
            app.generate_bid_id(),
            listing.id,
            user().user_id,
            Price::from(120),
            Price::from(100),
            app.now,
        )
        .await?;

    assert!(stale.is_none());
    let snapshot = app.db.get_bid_snapshot(listing.id).await?.unwrap();
    assert_eq!(snapshot.bids.len(), 1);
    assert_eq!(snapshot.floor_price(), Price::from(150));
    Ok(())
}

#[tokio::test]
async fn price_edits_move_the_floor_for_new_bids() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let listing = app.listing(&user(), Some(100)).await?;

    app.db
        .update_listing(
            listing.id,
            listing.version,
            listing.owner_id,
            ListingData {
                price: Some(Price::from(200)),
                ..listing.data.clone()
            },
            false,
            app.now,
        )
        .await?
        .unwrap();

    assert_eq!(
        bid(&app, &listing, "150").await?.unwrap_err(),
        BidFailure::BidTooLow {
            floor: Price::from(200)
        }
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_equal_bids_accept_exactly_one() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let listing = app.listing(&user(), Some(100)).await?;

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let db = app.db.clone();
            let listing_id = listing.id;
            let bid_id = app.generate_bid_id();
            let now = app.now;
            tokio::spawn(async move {
                place_bid(
                    &db,
                    bid_id,
                    listing_id,
                    user().user_id,
                    Price::from(150),
                    now,
                )
                .await
            })
        })
        .collect();

    let mut accepted = 0;
    for task in tasks {
        match task.await?? {
            Ok(_) => accepted += 1,
            Err(BidFailure::BidTooLow { floor }) => assert_eq!(floor, Price::from(150)),
            Err(BidFailure::ConcurrentModification) => {}
            Err(other) => panic!("unexpected failure: {other}"),
        }
    }

    assert_eq!(accepted, 1);
    let snapshot = app.db.get_bid_snapshot(listing.id).await?.unwrap();
    assert_eq!(snapshot.bids.len(), 1);
    Ok(())
}
