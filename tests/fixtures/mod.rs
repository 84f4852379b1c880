//! Test fixtures for field-planner.
//!
//! Provides real customer-site coordinates around Las Vegas / Henderson
//! and a builder for test stops.

pub mod customer_sites;

pub use customer_sites::*;
