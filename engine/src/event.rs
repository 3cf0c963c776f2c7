//! Emitting countdown timer events to listeners

use strum::{Display, EnumString};

/// Things a countdown timer reports to its listeners.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum TimerEventKind {
    Started,
    Paused,
    Stopped,
    Reset,
    /// Timer ticked while running.
    Updated,
    /// Remaining time crossed the warning threshold.
    Warning,
    /// Remaining time crossed the critical threshold.
    Critical,
    Expired,
    TimeAdded,
    TimeRemoved,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TimerEvent {
    pub kind: TimerEventKind,
    /// Seconds left on the timer when the event was emitted.
    pub remaining: f64,
}

/// Handle for unregistering a listener.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ListenerId(usize);

pub type Listener = Box<dyn FnMut(&TimerEvent) -> anyhow::Result<()>>;

/// Registered event callbacks.
///
/// A listener that returns an error is logged and skipped, the remaining
/// listeners still get the event.
#[derive(Default)]
pub struct Listeners {
    next_id: usize,
    callbacks: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub fn subscribe(
        &mut self,
        f: impl FnMut(&TimerEvent) -> anyhow::Result<()> + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(f)));
        id
    }

    /// Remove a listener, return whether it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let n = self.callbacks.len();
        self.callbacks.retain(|(i, _)| *i != id);
        self.callbacks.len() != n
    }

    pub fn dispatch(&mut self, event: &TimerEvent) {
        for (id, f) in self.callbacks.iter_mut() {
            if let Err(e) = f(event) {
                log::warn!(
                    "timer listener {id:?} failed on {}: {e}",
                    event.kind
                );
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
