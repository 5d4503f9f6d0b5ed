// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Total parsing for the estimated-duration field.
//!
//! Upstream job records are inconsistent about this field: some carry an
//! integer minute count, others free text like "30 minutes" or "1 hour",
//! and some omit it entirely. Parsing is total — any shape yields a number,
//! falling back to [`DEFAULT_ESTIMATED_MINUTES`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Fallback when the estimated duration is absent or unparseable.
pub const DEFAULT_ESTIMATED_MINUTES: u32 = 30;

/// Extract an estimated minute count from a loosely-typed field value.
///
/// Numbers are taken as-is (truncated to integer minutes); strings yield
/// their first contiguous digit run ("30 minutes" → 30, "1 hour" → 1).
/// Null, empty, negative, and digit-free inputs all yield the default.
pub fn parse_estimated_minutes(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_ESTIMATED_MINUTES),
        Value::String(s) => first_digit_run(s).unwrap_or(DEFAULT_ESTIMATED_MINUTES),
        _ => DEFAULT_ESTIMATED_MINUTES,
    }
}

fn first_digit_run(s: &str) -> Option<u32> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let rest = &s[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok().filter(|v| *v > 0)
}

/// Serde deserializer for `estimated_minutes` on stored job documents.
///
/// Pair with `#[serde(default = "default_minutes")]` so a missing field
/// also lands on the fallback.
pub fn deserialize_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_estimated_minutes(&value))
}

/// Serde default for `estimated_minutes`.
pub fn default_minutes() -> u32 {
    DEFAULT_ESTIMATED_MINUTES
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
