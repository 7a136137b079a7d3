//! WASM bindings for parcel pickup tracking.
//!
//! This crate provides WebAssembly bindings for use in browsers, widgets and Node.js.
//! Persistence stays on the JavaScript side: load the stored JSON into a
//! [`ParcelTracker`], mutate it, and write [`ParcelTracker::to_json`] back.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use pickup_core::models::parcel::timestamp;
use pickup_core::store::decode_document;
use pickup_core::{MemoryStore, ParcelBook, ParcelStatus, ParcelStore};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[derive(Serialize)]
struct ParsedMessageJs {
    carrier: String,
    code: String,
    address: String,
    time: String,
    complete: bool,
}

#[derive(Serialize)]
struct ImportResultJs {
    added: Vec<String>,
    updated: usize,
    skipped: usize,
    total: usize,
    notice: String,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Extract carrier, pickup code and address from one notification.
#[wasm_bindgen]
pub fn parse_message(text: &str) -> Result<JsValue, JsValue> {
    let parsed = pickup_core::parse_message(text);

    to_js(&ParsedMessageJs {
        complete: parsed.is_complete(),
        time: parsed.received_at.format(timestamp::FORMAT).to_string(),
        carrier: parsed.carrier,
        code: parsed.code,
        address: parsed.address,
    })
}

/// Shorten a carrier name for display.
#[wasm_bindgen]
pub fn simplify_carrier_name(name: &str) -> String {
    pickup_core::simplify_carrier_name(name)
}

/// Parcel collection held in memory.
#[wasm_bindgen]
pub struct ParcelTracker {
    book: ParcelBook<MemoryStore>,
}

#[wasm_bindgen]
impl ParcelTracker {
    /// Create an empty tracker.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            book: ParcelBook::new(MemoryStore::new()),
        }
    }

    /// Create a tracker from a stored JSON document.
    #[wasm_bindgen]
    pub fn from_json(json: &str) -> Result<ParcelTracker, JsValue> {
        let records = decode_document(json).map_err(to_js_error)?;
        Ok(Self {
            book: ParcelBook::new(MemoryStore::with_records(records)),
        })
    }

    /// Serialize the collection for storage.
    #[wasm_bindgen]
    pub fn to_json(&self) -> Result<String, JsValue> {
        let records = self.book.store().load().map_err(to_js_error)?;
        serde_json::to_string(&records).map_err(to_js_error)
    }

    /// Number of stored parcels.
    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.book.store().snapshot().len()
    }

    /// Whether the tracker holds no parcels.
    #[wasm_bindgen(getter)]
    pub fn is_empty(&self) -> bool {
        self.book.store().snapshot().is_empty()
    }

    /// Import notifications separated by new lines or `;`.
    #[wasm_bindgen]
    pub fn add_batch(&self, input: &str) -> Result<JsValue, JsValue> {
        let result = self.book.add_batch(input).map_err(to_js_error)?;

        to_js(&ImportResultJs {
            notice: result.notice(),
            total: result.records.len(),
            added: result.added,
            updated: result.updated,
            skipped: result.skipped,
        })
    }

    /// Set a parcel's status (`待取件`/`pending` or `已取件`/`collected`).
    #[wasm_bindgen]
    pub fn mark(&self, selector: &str, status: &str) -> Result<(), JsValue> {
        let status: ParcelStatus = status.parse().map_err(to_js_error)?;
        self.book.mark(selector, status).map_err(to_js_error)?;
        Ok(())
    }

    /// Delete one parcel by pickup code or 1-based position.
    #[wasm_bindgen]
    pub fn delete(&self, selector: &str) -> Result<(), JsValue> {
        self.book.delete(selector).map_err(to_js_error)?;
        Ok(())
    }

    /// Delete every parcel.
    #[wasm_bindgen]
    pub fn clear(&self) -> Result<usize, JsValue> {
        self.book.clear().map_err(to_js_error)
    }

    /// Summary of the newest pending parcels.
    #[wasm_bindgen]
    pub fn summary(&self, max_show: usize) -> Result<JsValue, JsValue> {
        let summary = self.book.summary(max_show).map_err(to_js_error)?;
        to_js(&summary)
    }
}

impl Default for ParcelTracker {
    fn default() -> Self {
        Self::new()
    }
}
