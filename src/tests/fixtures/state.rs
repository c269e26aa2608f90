// App state wired with in-memory adapters for inbound adapter tests.

use crate::shared::core::primitives::{Clock, SystemClock};
use crate::shared::infrastructure::local_store::in_memory::InMemoryLocalStore;
use crate::shell::state::{AppState, InMemoryAdapters};
use std::sync::Arc;
use std::time::Duration;

/// Tickers never fire on their own; tests drive timers explicitly.
pub const TEST_TICK_PERIOD: Duration = Duration::from_secs(3600);
pub const TEST_SESSION_HISTORY: usize = 200;

pub fn make_test_state() -> AppState {
    make_test_state_with(|_| {})
}

pub fn make_test_state_with(configure: impl FnOnce(&mut InMemoryAdapters)) -> AppState {
    make_test_state_at(Arc::new(SystemClock), configure)
}

pub fn make_test_state_at(
    clock: Arc<dyn Clock>,
    configure: impl FnOnce(&mut InMemoryAdapters),
) -> AppState {
    let mut adapters = InMemoryAdapters::default();
    configure(&mut adapters);
    AppState::new(
        adapters,
        Arc::new(InMemoryLocalStore::new()),
        clock,
        TEST_TICK_PERIOD,
        TEST_SESSION_HISTORY,
    )
}
