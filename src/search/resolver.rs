// Suggestion lookup tasks.
//
// Each due query spawns one lookup task. A failed or malformed search
// response degrades to zero suggestions; the user never sees a raw search
// error. The emitted `Results` event carries the generation the query was
// issued under so the store can discard responses a newer query superseded.
// In-flight lookups are never cancelled at the transport level; the
// generation check alone makes delivery order irrelevant.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::PlayerApi;

use super::store::SlotKey;
use super::SearchEvent;

/// Spawn a lookup for `query` on behalf of `key`.
pub fn spawn_lookup<K: SlotKey>(
    api: Arc<dyn PlayerApi>,
    key: K,
    query: String,
    generation: u64,
    tx: mpsc::Sender<SearchEvent<K>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let candidates = match api.search(&query).await {
            Ok(list) => list,
            Err(e) => {
                // Degraded search: swallow and show an empty panel.
                debug!(%query, error = %e, "player search failed");
                Vec::new()
            }
        };
        let _ = tx
            .send(SearchEvent::Results {
                key,
                generation,
                candidates,
            })
            .await;
    })
}
