//! Urithi Core - Shared types library.
//!
//! This crate provides common types used across all Urithi components:
//! - `cart` - Cart store, persistence and session handling
//! - `cli` - Command-line front end for a file-backed cart
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no clocks or randomness. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, quantities and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
