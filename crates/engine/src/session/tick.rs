//! Fixed-rate tick loop.

use super::{SessionState, TickStatus};
use futures_util::FutureExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, warn};

/// Drive round `round` until it ends or is superseded.
///
/// One task runs per started round; the session aborts it on leave and
/// before starting another round.
pub async fn run_tick_loop(state: Arc<RwLock<SessionState>>, round: u64, tick_interval_ms: u64) {
    let period = Duration::from_millis(tick_interval_ms.max(1));
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    debug!("Tick loop for round {} started ({}ms)", round, tick_interval_ms);

    loop {
        let scheduled = ticker.tick().await;

        // Drain any backlog so a late tick does not run twice in a row.
        let mut skipped = 0u32;
        while ticker.tick().now_or_never().is_some() {
            skipped += 1;
        }
        if skipped > 0 {
            debug!(
                "Skipped {} ticks to stay current (lag: {:?})",
                skipped,
                Instant::now().saturating_duration_since(scheduled)
            );
        }

        let mut session = state.write().await;
        let tick_start = std::time::Instant::now();
        let status = session.advance(round);
        let tick_ms = tick_start.elapsed().as_secs_f64() * 1000.0;

        let tick_budget = tick_interval_ms as f64 * 0.9;
        if tick_ms > tick_budget {
            warn!(
                "Slow tick #{}: {:.3}ms (budget: {:.1}ms)",
                session.simulation.tick_count(),
                tick_ms,
                tick_budget
            );
        }

        match status {
            TickStatus::Running => {}
            TickStatus::Ended => {
                // This task is the round's timer; dropping the handle detaches it.
                session.tick_task = None;
                info!("Round {} finished, tick loop stopped", round);
                break;
            }
            TickStatus::Stale => {
                debug!("Round {} superseded, tick loop stopped", round);
                break;
            }
        }
    }
}
