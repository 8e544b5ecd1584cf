//! Host implementations of the clock traits.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`] for various hosts.
//!
//! # Available Implementations
//!
//! - `mock`: Deterministic test doubles
//! - `desktop`: System clock and terminal display (requires `std` feature)

pub mod mock;

#[cfg(feature = "std")]
pub mod desktop;

pub use mock::*;

#[cfg(feature = "std")]
pub use desktop::*;
