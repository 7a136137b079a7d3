//! Core library for parcel pickup tracking.
//!
//! This crate provides:
//! - Rule-based parsing of free-text delivery notifications
//!   (carrier, pickup code, pickup address)
//! - Reconciliation of parsed notifications into a collection keyed by pickup code
//! - JSON persistence of the collection
//! - The pending-parcel summary shown by front ends

pub mod book;
pub mod error;
pub mod message;
pub mod models;
pub mod reconcile;
pub mod store;
pub mod summary;

pub use book::ParcelBook;
pub use error::{PickupError, Result, StoreError};
pub use message::{parse_message, split_batch, MessageParser, NotificationParser, ParsedMessage};
pub use models::config::PickupConfig;
pub use models::parcel::{ParcelRecord, ParcelStatus, ParseStatusError};
pub use reconcile::{reconcile, Reconciler, Reconciliation};
pub use store::{MemoryStore, ParcelStore};
#[cfg(feature = "native")]
pub use store::JsonFileStore;
pub use summary::{simplify_carrier_name, Summary, SummaryEntry};
