//! Drawing gallery persistence and HTTP API.
//!
//! Converts submitted drawings into a flat JSON store on disk, with locking
//! and atomic writes, and serves them over the contest's small REST API.

pub mod server;
pub mod store;

pub use server::{routes, run};
pub use store::{ClearOutcome, DrawingEntry, DrawingStore, StoreInspection};
