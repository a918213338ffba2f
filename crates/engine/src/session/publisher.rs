//! State publishing.
//!
//! Two ways to observe a session:
//! - Handlers registered with [`StatePublisher::on_state_change`] run
//!   synchronously after every mutation, in registration order.
//! - A `watch` receiver from [`StatePublisher::subscribe`] always holds the
//!   latest snapshot, for renderers polling at their own cadence.

use shared::StateUpdate;
use tokio::sync::watch;

/// Callback invoked with every published snapshot.
///
/// Handlers run while the session is locked and must not call back into it.
pub type StateHandler = Box<dyn Fn(&StateUpdate) + Send + Sync>;

/// Fans snapshots out to handlers and watchers.
pub struct StatePublisher {
    handlers: Vec<StateHandler>,
    latest: watch::Sender<StateUpdate>,
}

impl StatePublisher {
    pub fn new(initial: StateUpdate) -> Self {
        let (latest, _) = watch::channel(initial);
        Self {
            handlers: Vec::new(),
            latest,
        }
    }

    pub fn on_state_change(&mut self, handler: StateHandler) {
        self.handlers.push(handler);
    }

    /// Receiver that always holds the most recent snapshot.
    pub fn subscribe(&self) -> watch::Receiver<StateUpdate> {
        self.latest.subscribe()
    }

    #[inline]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Deliver `update` to every handler, then store it as the latest snapshot.
    pub fn publish(&self, update: StateUpdate) {
        for handler in &self.handlers {
            handler(&update);
        }
        self.latest.send_replace(update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::GameState;
    use std::sync::Arc;
    use std::sync::Mutex;

    fn update(player_id: u32) -> StateUpdate {
        StateUpdate {
            lobby: None,
            game_state: GameState::default(),
            player_id,
        }
    }

    #[test]
    fn test_handlers_run_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut publisher = StatePublisher::new(update(0));

        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            publisher.on_state_change(Box::new(move |u| {
                seen.lock().unwrap().push((tag, u.player_id));
            }));
        }
        publisher.publish(update(5));

        assert_eq!(publisher.handler_count(), 2);
        assert_eq!(*seen.lock().unwrap(), vec![("first", 5), ("second", 5)]);
    }

    #[test]
    fn test_watchers_see_latest() {
        let publisher = StatePublisher::new(update(0));
        let mut rx = publisher.subscribe();
        assert_eq!(rx.borrow().player_id, 0);

        publisher.publish(update(1));
        publisher.publish(update(2));

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().player_id, 2);
    }
}
