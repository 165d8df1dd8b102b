//! Spawn + Flush Tick
//!
//! Runs once per tick period: spawn diamonds for the clients that are
//! waiting, then answer all of them with the same snapshot. The flush
//! happens even when nothing spawned, so parked requests never wait more
//! than one period.

use crate::game::diamond::Diamond;
use crate::game::state::HuntState;
use crate::game::waitqueue::FlushReport;

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Tick number (first tick is 1)
    pub tick: u64,
    /// Diamonds created this tick
    pub spawned: Vec<Diamond>,
    /// Field size after spawning
    pub field_size: usize,
    /// How the flush went
    pub flush: FlushReport,
}

/// Run one tick.
///
/// Demand is the size of the wait queue, including requests whose client
/// has already gone away.
pub fn tick(state: &mut HuntState) -> TickResult {
    #[cfg(test)]
    if std::mem::take(&mut state.fail_next_tick) {
        panic!("tick failure injected by test");
    }

    state.tick += 1;

    let waiting = state.waiting.len();
    let spawned = state.field.try_spawn(waiting, state.spawning_enabled);

    let snapshot = state.field.snapshot();
    let flush = state.waiting.flush(&snapshot);

    TickResult {
        tick: state.tick,
        spawned,
        field_size: snapshot.len(),
        flush,
    }
}
