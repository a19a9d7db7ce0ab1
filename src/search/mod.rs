// Incremental search-and-select machinery.
//
// Three pieces, per the debounce-then-fetch-then-conditionally-apply
// pattern: the store (slot state + single active panel + generation
// counters), the debouncer (quiet-period timers), and the resolver
// (lookup tasks). A slot's search moves through
// Idle -> Pending(generation) -> Applied | Discarded; discards are silent.

pub mod debounce;
pub mod resolver;
pub mod store;

use crate::protocol::Candidate;

/// Events flowing from timers and lookup tasks back to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent<K> {
    /// A slot's quiet period elapsed; its query is ready to resolve.
    QueryDue {
        key: K,
        query: String,
        generation: u64,
    },
    /// A lookup finished (possibly degraded to an empty list).
    Results {
        key: K,
        generation: u64,
        candidates: Vec<Candidate>,
    },
}
