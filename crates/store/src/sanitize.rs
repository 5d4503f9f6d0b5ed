// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized pre-write sanitization.
//!
//! The remote store's write contract rejects documents carrying
//! null-placeholder values for absent fields. Every writer routes through
//! [`scrub`] (via `WriteBatch::set`) so the rule holds uniformly instead
//! of being re-implemented at each call site.

use crate::document::Document;
use serde_json::Value;

/// Remove null-valued fields from a document, recursing through nested
/// objects and arrays. Null elements inside arrays are dropped too.
pub fn scrub(doc: &mut Document) {
    doc.retain(|_, v| !v.is_null());
    for value in doc.values_mut() {
        scrub_value(value);
    }
}

fn scrub_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            for v in map.values_mut() {
                scrub_value(v);
            }
        }
        Value::Array(items) => {
            items.retain(|v| !v.is_null());
            for v in items.iter_mut() {
                scrub_value(v);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "sanitize_tests.rs"]
mod tests;
