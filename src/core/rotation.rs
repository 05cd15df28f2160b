//! Non-repeating random selection over a fixed clip catalog.
//!
//! Recently played items are kept in a bounded FIFO window and excluded
//! from the next draw, so the same clip does not come back right away.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

/// Upper bound on the exclusion window regardless of catalog size
const MAX_RECENT: usize = 5;

/// Exclusion window size for a catalog: `min(5, len / 2)`
pub fn history_limit(catalog_len: usize) -> usize {
    MAX_RECENT.min(catalog_len / 2)
}

/// Pick the next item, avoiding anything in `recent`.
///
/// When two or fewer candidates remain the window is cleared before the
/// draw; the draw itself still comes from those candidates. If no candidate
/// is left at all the whole catalog is used. Returns `None` only for an
/// empty catalog.
pub fn pick_next<T, R>(
    catalog: &[T],
    recent: &mut VecDeque<T>,
    max_history: usize,
    rng: &mut R,
) -> Option<T>
where
    T: Clone + PartialEq,
    R: Rng + ?Sized,
{
    if catalog.is_empty() {
        return None;
    }

    let candidates: Vec<&T> = catalog.iter().filter(|item| !recent.contains(item)).collect();

    if candidates.len() <= 2 {
        log::debug!(
            "Only {} candidate(s) left, clearing {} recent item(s)",
            candidates.len(),
            recent.len()
        );
        recent.clear();
    }

    let choice = match candidates.choose(rng) {
        Some(item) => (*item).clone(),
        None => catalog.choose(rng)?.clone(),
    };

    recent.push_back(choice.clone());
    while recent.len() > max_history {
        recent.pop_front();
    }

    Some(choice)
}

/// A catalog together with its recent-history window
#[derive(Debug, Clone)]
pub struct ClipRotation {
    catalog: Vec<String>,
    recent: VecDeque<String>,
    max_history: usize,
}

impl ClipRotation {
    pub fn new(catalog: Vec<String>) -> Self {
        let max_history = history_limit(catalog.len());
        Self::with_history(catalog, max_history)
    }

    pub fn with_history(catalog: Vec<String>, max_history: usize) -> Self {
        Self {
            catalog,
            recent: VecDeque::with_capacity(max_history + 1),
            max_history,
        }
    }

    pub fn next_clip<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        pick_next(&self.catalog, &mut self.recent, self.max_history, rng)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.catalog.iter().any(|c| c == item)
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    pub fn recent(&self) -> &VecDeque<String> {
        &self.recent
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    pub fn clear_history(&mut self) {
        self.recent.clear();
    }
}
