//! Data models.

pub mod config;
pub mod parcel;

pub use parcel::{ParcelRecord, ParcelStatus, ParseStatusError};
