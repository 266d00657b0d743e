//! Display surface
//!
//! Single place where action results are shown. Every dispatched call updates it exactly once;
//! the last call to complete wins.

use crate::models::ApiResult;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use tracing::{debug, warn};

/// Anything that can show an action result
pub trait ResponseDisplay: Debug + Send + Sync {
    fn show(&self, result: &ApiResult);
}

/// In-memory display holding the last result as pretty JSON
#[derive(Debug, Default)]
pub struct DisplaySurface {
    content: RwLock<Option<String>>,
    updates: AtomicU64,
}

impl DisplaySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently shown, `None` until the first update
    pub fn current(&self) -> Option<String> {
        match self.content.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of updates since startup
    pub fn update_count(&self) -> u64 {
        self.updates.load(Ordering::SeqCst)
    }
}

impl ResponseDisplay for DisplaySurface {
    fn show(&self, result: &ApiResult) {
        let rendered = result.to_pretty_json();
        match self.content.write() {
            Ok(mut guard) => *guard = Some(rendered),
            Err(poisoned) => {
                warn!("Display lock poisoned, overwriting content");
                *poisoned.into_inner() = Some(rendered);
            }
        }
        let count = self.updates.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Display updated (update #{})", count);
    }
}
