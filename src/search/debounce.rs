// Quiet-period timers for keystroke-triggered searches.
//
// One timer may be pending per slot. Scheduling a new search for a slot
// aborts its previous timer outright, so within a quiet period only the
// last keystroke's query survives. Timer expiry emits a `QueryDue` event;
// the orchestrator decides whether to spawn the lookup.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::store::SlotKey;
use super::SearchEvent;

pub struct Debouncer<K> {
    quiet_period: Duration,
    timers: HashMap<K, JoinHandle<()>>,
    tx: mpsc::Sender<SearchEvent<K>>,
}

impl<K: SlotKey> Debouncer<K> {
    pub fn new(quiet_period: Duration, tx: mpsc::Sender<SearchEvent<K>>) -> Self {
        Debouncer {
            quiet_period,
            timers: HashMap::new(),
            tx,
        }
    }

    /// Start (or restart) the slot's timer. When it fires, a `QueryDue`
    /// event carrying the query and its generation is emitted.
    pub fn schedule(&mut self, key: K, query: String, generation: u64) {
        self.cancel(key);

        let tx = self.tx.clone();
        let quiet_period = self.quiet_period;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            let _ = tx
                .send(SearchEvent::QueryDue {
                    key,
                    query,
                    generation,
                })
                .await;
        });
        self.timers.insert(key, handle);
    }

    /// Cancel the slot's pending timer, if any. The timer never fires.
    pub fn cancel(&mut self, key: K) {
        if let Some(handle) = self.timers.remove(&key) {
            handle.abort();
            debug!(?key, "cancelled pending search timer");
        }
    }

    /// Cancel every pending timer. Called when the owning surface goes away
    /// so no timer mutates state of a destroyed slot.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
    }
}

impl<K> Drop for Debouncer<K> {
    fn drop(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
    }
}
