//! Core types for the dashboard page.
//!
//! This crate provides:
//! - `range`: the `DateRange` value and the default one-month policy
//! - `event`: `RangeBus`, the injectable range-changed channel
//! - `error`: the shared error type

pub mod error;
pub mod event;
pub mod range;

pub use error::{Error, Result};
pub use event::{RangeBus, Subscription};
pub use range::DateRange;
