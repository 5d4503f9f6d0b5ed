// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Photographic evidence references.

use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a captured photo.
    pub struct PhotoId("pho-");
}

/// When in the job a photo was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoPhase {
    Before,
    During,
    After,
    Issue,
}

crate::simple_display! {
    PhotoPhase {
        Before => "before",
        During => "during",
        After => "after",
        Issue => "issue",
    }
}

/// A stored photo: remote URL tagged by capture phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRef {
    pub id: PhotoId,
    pub url: String,
    pub phase: PhotoPhase,
}

impl PhotoRef {
    pub fn new(url: impl Into<String>, phase: PhotoPhase) -> Self {
        Self { id: PhotoId::new(), url: url.into(), phase }
    }
}
