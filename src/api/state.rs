//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::aggregate::Aggregator;
use crate::clock::{Clock, SystemClock};
use crate::store::Store;

pub use crate::config::ApiConfig;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Record store handle
    pub store: Arc<Store>,
    /// Derived views over the same store
    pub aggregator: Aggregator,
    /// Source of "now" and "today"
    pub clock: Arc<dyn Clock>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state reading the system clock
    pub fn new(store: Arc<Store>, config: ApiConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    /// Create state with an explicit clock
    pub fn with_clock(store: Arc<Store>, config: ApiConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            aggregator: Aggregator::new(Arc::clone(&store)),
            store,
            clock,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
