// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Best-effort GPS sampling for audit sessions.

use async_trait::async_trait;
use dispatch_core::GpsSample;

/// Adapter for the device location provider.
///
/// A sample is strictly best-effort: `None` must never block or fail the
/// operation that asked for it.
#[async_trait]
pub trait LocationSource: Clone + Send + Sync + 'static {
    async fn sample(&self) -> Option<GpsSample>;
}

/// Location source for contexts without GPS (admin tooling, servers).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationSource for NoLocation {
    async fn sample(&self) -> Option<GpsSample> {
        None
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::LocationSource;
    use async_trait::async_trait;
    use dispatch_core::GpsSample;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Fake location source with a settable sample.
    #[derive(Clone, Default)]
    pub struct FakeLocationSource {
        current: Arc<Mutex<Option<GpsSample>>>,
    }

    impl FakeLocationSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_sample(sample: GpsSample) -> Self {
            let source = Self::new();
            source.set_sample(Some(sample));
            source
        }

        pub fn set_sample(&self, sample: Option<GpsSample>) {
            *self.current.lock() = sample;
        }
    }

    #[async_trait]
    impl LocationSource for FakeLocationSource {
        async fn sample(&self) -> Option<GpsSample> {
            *self.current.lock()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeLocationSource;
