// Slot selection state machine.
//
// A `SlotStore` owns, per logical slot, the pair (query text, resolved
// selection) plus the single shared active-slot pointer and its suggestion
// list. It is generic over the slot key so the same machine backs both the
// one-field Predict surface and the 14-field roster builder.
//
// Invariants, held after every operation:
// - a selection and free text never disagree: `selection.is_some()` implies
//   `query_text == selection.display_name`, and editing text clears the
//   selection first;
// - at most one slot is active, and when no slot is active the shared
//   suggestion list is empty.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::protocol::Candidate;

/// Key type for a slot. Blanket-implemented; surfaces pick a concrete key
/// (a roster position, or a unit-like struct for a single search box).
pub trait SlotKey: Copy + Eq + Hash + Debug + Send + 'static {}

impl<K: Copy + Eq + Hash + Debug + Send + 'static> SlotKey for K {}

/// Per-slot state: raw user input plus the explicit pick, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotState {
    pub query_text: String,
    pub selection: Option<Candidate>,
}

/// Read model for one slot, handed to the rendering layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotView {
    pub query_text: String,
    pub selection: Option<Candidate>,
    pub is_active: bool,
    /// Non-empty only when `is_active` is true.
    pub suggestions: Vec<Candidate>,
}

/// Directive returned by `on_text_changed`, telling the caller what to do
/// with the slot's debounce timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextChange {
    /// Start (or restart) the quiet-period timer for this query, tagged
    /// with the slot's freshly bumped generation.
    Schedule { query: String, generation: u64 },
    /// The query fell below the floor: cancel any pending timer.
    Cancel,
}

/// The search-and-select store for one surface.
pub struct SlotStore<K> {
    min_query_len: usize,
    slots: HashMap<K, SlotState>,
    /// Monotonically increasing per-slot counters; responses tagged with an
    /// older generation are discarded.
    generations: HashMap<K, u64>,
    /// The single slot, if any, permitted to display its suggestion panel.
    active: Option<K>,
    /// Suggestions for the active slot. Empty whenever `active` is `None`.
    suggestions: Vec<Candidate>,
}

impl<K: SlotKey> SlotStore<K> {
    pub fn new(min_query_len: usize) -> Self {
        SlotStore {
            min_query_len,
            slots: HashMap::new(),
            generations: HashMap::new(),
            active: None,
            suggestions: Vec::new(),
        }
    }

    // -- queries ------------------------------------------------------------

    pub fn query_text(&self, key: K) -> &str {
        self.slots
            .get(&key)
            .map(|s| s.query_text.as_str())
            .unwrap_or("")
    }

    pub fn selection(&self, key: K) -> Option<&Candidate> {
        self.slots.get(&key).and_then(|s| s.selection.as_ref())
    }

    pub fn active_slot(&self) -> Option<K> {
        self.active
    }

    pub fn is_active(&self, key: K) -> bool {
        self.active == Some(key)
    }

    /// Suggestions for the active slot's open panel.
    pub fn suggestions(&self) -> &[Candidate] {
        &self.suggestions
    }

    pub fn current_generation(&self, key: K) -> u64 {
        self.generations.get(&key).copied().unwrap_or(0)
    }

    /// Build the read model for one slot.
    pub fn view(&self, key: K) -> SlotView {
        let state = self.slots.get(&key).cloned().unwrap_or_default();
        let is_active = self.is_active(key);
        SlotView {
            query_text: state.query_text,
            selection: state.selection,
            is_active,
            suggestions: if is_active {
                self.suggestions.clone()
            } else {
                Vec::new()
            },
        }
    }

    // -- operations ---------------------------------------------------------

    /// Record a keystroke in the slot.
    ///
    /// Unconditionally replaces the slot's text and clears its selection.
    /// Below the query-length floor the slot deactivates and the caller is
    /// told to cancel the pending timer; otherwise the slot activates, its
    /// generation is bumped, and the caller schedules a debounced search
    /// for the trimmed query.
    pub fn on_text_changed(&mut self, key: K, text: &str) -> TextChange {
        let slot = self.slots.entry(key).or_default();
        slot.query_text = text.to_owned();
        slot.selection = None;

        let query = text.trim();
        if query.len() < self.min_query_len {
            if self.is_active(key) {
                self.deactivate();
            }
            return TextChange::Cancel;
        }

        self.activate_unchecked(key);
        let generation = self.bump_generation(key);
        TextChange::Schedule {
            query: query.to_owned(),
            generation,
        }
    }

    /// Mark the slot active, subject to the query-length gate. No-op when
    /// the slot's trimmed text is below the floor.
    ///
    /// Activating a slot other than the current one clears the shared
    /// suggestion list so a panel never shows another slot's results.
    pub fn activate(&mut self, key: K) {
        if self.query_text(key).trim().len() < self.min_query_len {
            return;
        }
        self.activate_unchecked(key);
    }

    fn activate_unchecked(&mut self, key: K) {
        if self.active != Some(key) {
            self.suggestions.clear();
        }
        self.active = Some(key);
    }

    /// Commit a pick: the candidate becomes the slot's selection, the text
    /// mirrors its display name, and the panel closes.
    pub fn pick(&mut self, key: K, candidate: Candidate) {
        let slot = self.slots.entry(key).or_default();
        slot.query_text = candidate.display_name.clone();
        slot.selection = Some(candidate);
        if self.is_active(key) {
            self.deactivate();
        }
    }

    /// Commit the suggestion at `index` in the slot's open panel.
    ///
    /// Returns the picked candidate, or `None` when the slot's panel is not
    /// open or the index is out of range.
    pub fn pick_suggestion(&mut self, key: K, index: usize) -> Option<Candidate> {
        if !self.is_active(key) {
            return None;
        }
        let candidate = self.suggestions.get(index).cloned()?;
        self.pick(key, candidate.clone());
        Some(candidate)
    }

    /// Reset the slot to empty text and no selection.
    pub fn clear(&mut self, key: K) {
        if let Some(slot) = self.slots.get_mut(&key) {
            slot.query_text.clear();
            slot.selection = None;
        }
        if self.is_active(key) {
            self.deactivate();
        }
    }

    /// Close the active panel, whichever slot holds it.
    pub fn deactivate(&mut self) {
        self.active = None;
        self.suggestions.clear();
    }

    /// Apply a resolver response for `key` tagged with `generation`.
    ///
    /// The response is discarded (returning `false`) when a newer search
    /// superseded it, or when the slot's panel is no longer the open one.
    pub fn apply_results(&mut self, key: K, generation: u64, candidates: Vec<Candidate>) -> bool {
        if self.current_generation(key) != generation {
            return false;
        }
        if !self.is_active(key) {
            return false;
        }
        self.suggestions = candidates;
        true
    }

    fn bump_generation(&mut self, key: K) -> u64 {
        let counter = self.generations.entry(key).or_insert(0);
        *counter += 1;
        *counter
    }
}
