#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the auction-core crate.
//! [auction_core]: https://docs.rs/auction_core/latest/auction_core/index.html
//! [auction_sqlite]: https://docs.rs/auction_sqlite/latest/auction_sqlite/index.html
//! [auction_axum]: https://docs.rs/auction_axum/latest/auction_axum/index.html
#![doc = include_str!("../README.md")]

/// Core domain models for the auction house.
///
/// This module contains the listings, bids and comments, along with the small
/// amount of logic that is a pure function of their data: the floor price a new
/// bid must beat and whether a listing is still open at a given instant.
pub mod models;

/// Interface traits for the auction house.
///
/// This module contains the "ports" in the hexagonal architecture pattern: the
/// persistence gateway the services read from and write to, and the identity
/// gateway that answers who is calling.
pub mod ports;

/// The business rules of the auction house.
///
/// Each service is a set of free functions that are generic over a repository
/// and take the caller and the current time as explicit arguments.
pub mod services;
