use std::collections::HashMap;

use super::rule::ThresholdRule;

/// Per-rule position in the ARMED / FIRED cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleState {
    Armed,
    Fired,
}

/// Armed flags for one watch session, keyed by rule id
#[derive(Debug, Clone, Default)]
pub struct NotifierState {
    armed: HashMap<String, bool>,
}

impl NotifierState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State with every rule of `rules` armed
    pub fn for_rules(rules: &[ThresholdRule]) -> Self {
        let mut state = Self::new();
        for rule in rules {
            state.register(&rule.id);
        }
        state
    }

    /// Track a rule id, armed. Existing entries are left untouched.
    pub fn register(&mut self, id: &str) {
        self.armed.entry(id.to_string()).or_insert(true);
    }

    pub fn is_armed(&self, id: &str) -> Option<bool> {
        self.armed.get(id).copied()
    }

    pub fn state_of(&self, id: &str) -> Option<RuleState> {
        self.is_armed(id).map(|armed| {
            if armed {
                RuleState::Armed
            } else {
                RuleState::Fired
            }
        })
    }

    pub(super) fn flag_mut(&mut self, id: &str) -> Option<&mut bool> {
        self.armed.get_mut(id)
    }

    /// Re-arm every rule (new game or navigation away from a game)
    pub fn reset(&mut self) {
        for armed in self.armed.values_mut() {
            *armed = true;
        }
    }

    pub fn len(&self) -> usize {
        self.armed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}
