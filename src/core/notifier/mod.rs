//! Threshold-crossing notifier.
//!
//! Evaluates threshold rules against each polled [`Quantity`] and reports
//! the rules that crossed on this tick.
//!
//! ```text
//!            metric >= value (fires)
//!   ARMED ───────────────────────────► FIRED
//!     ▲                                  │
//!     └──────── metric < value ──────────┘
//! ```
//!
//! A rule fires once per contiguous run of ticks at or above its value and
//! re-arms as soon as the metric drops below it again.

mod rule;
mod state;

pub use rule::{CrossCallback, Metric, ThresholdRule};
pub use state::{NotifierState, RuleState};

use crate::core::quantity::Quantity;
use crate::error::{Result, WatchError};

/// Run one poll tick over `rules` in declaration order.
///
/// Returns the ids of the rules that fired on this tick, in order. A rule
/// without an entry in `state` is a setup bug and yields
/// [`WatchError::UnknownRule`]; flags changed by earlier rules in the same
/// tick are kept.
pub fn evaluate(
    quantity: &Quantity,
    rules: &mut [ThresholdRule],
    state: &mut NotifierState,
) -> Result<Vec<String>> {
    let mut fired = Vec::new();

    for rule in rules.iter_mut() {
        let metric_value = rule.metric.value_of(quantity);
        let armed = state
            .flag_mut(&rule.id)
            .ok_or_else(|| WatchError::unknown_rule(&rule.id))?;

        if rule.is_met_by(quantity) {
            if *armed {
                *armed = false;
                log::info!(
                    "Rule '{}' fired: {} {} >= {}",
                    rule.id,
                    rule.metric,
                    metric_value,
                    rule.value
                );
                fired.push(rule.id.clone());
                rule.fire(quantity);
            }
        } else {
            if !*armed {
                log::debug!(
                    "Rule '{}' re-armed: {} {} < {}",
                    rule.id,
                    rule.metric,
                    metric_value,
                    rule.value
                );
            }
            *armed = true;
        }
    }

    Ok(fired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn at_percent(percent: f64) -> Quantity {
        Quantity::new(percent, 100.0)
    }

    #[test]
    fn test_fires_once_per_crossing() {
        let mut rules = vec![ThresholdRule::new("half", Metric::Percentage, 50.0)];
        let mut state = NotifierState::for_rules(&rules);

        let ticks = [10.0, 49.0, 50.0, 51.0, 49.0, 50.0];
        let fired_ticks: Vec<usize> = ticks
            .iter()
            .enumerate()
            .filter(|&(_, &p)| {
                !evaluate(&at_percent(p), &mut rules, &mut state)
                    .unwrap()
                    .is_empty()
            })
            .map(|(i, _)| i)
            .collect();

        assert_eq!(fired_ticks, vec![2, 5]);
    }

    #[test]
    fn test_callback_runs_exactly_once_per_run() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut rules = vec![ThresholdRule::new("big", Metric::Current, 2_500.0)
            .on_cross(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })];
        let mut state = NotifierState::for_rules(&rules);

        for current in [0.0, 2_500.0, 3_000.0, 9_000.0, 2_499.0, 2_600.0, 2_600.0] {
            evaluate(&Quantity::new(current, 10_000.0), &mut rules, &mut state).unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_fire_count_matches_runs_above_threshold() {
        let values = [
            0.0, 60.0, 70.0, 10.0, 55.0, 55.0, 40.0, 90.0, 100.0, 49.0, 51.0,
        ];
        let threshold = 50.0;
        let mut rules = vec![ThresholdRule::new("t", Metric::Percentage, threshold)];
        let mut state = NotifierState::for_rules(&rules);

        let mut fires = 0;
        let mut runs = 0;
        let mut previous_above = false;
        for &v in &values {
            let above = v >= threshold;
            if above && !previous_above {
                runs += 1;
            }
            previous_above = above;
            fires += evaluate(&at_percent(v), &mut rules, &mut state)
                .unwrap()
                .len();
        }

        assert_eq!(fires, runs);
        assert_eq!(runs, 4);
    }

    #[test]
    fn test_fired_ids_follow_declaration_order() {
        let mut rules = vec![
            ThresholdRule::new("seventy", Metric::Percentage, 70.0),
            ThresholdRule::new("fifty", Metric::Percentage, 50.0),
            ThresholdRule::new("start", Metric::Current, 2.0),
        ];
        let mut state = NotifierState::for_rules(&rules);

        let fired = evaluate(&at_percent(80.0), &mut rules, &mut state).unwrap();
        assert_eq!(fired, vec!["seventy", "fifty", "start"]);

        let fired = evaluate(&at_percent(60.0), &mut rules, &mut state).unwrap();
        assert!(fired.is_empty());
        assert_eq!(state.state_of("seventy"), Some(RuleState::Armed));
        assert_eq!(state.state_of("fifty"), Some(RuleState::Fired));

        let fired = evaluate(&at_percent(75.0), &mut rules, &mut state).unwrap();
        assert_eq!(fired, vec!["seventy"]);
    }

    #[test]
    fn test_unknown_rule_is_an_error() {
        let mut rules = vec![ThresholdRule::new("ghost", Metric::Percentage, 10.0)];
        let mut state = NotifierState::new();

        let err = evaluate(&at_percent(20.0), &mut rules, &mut state).unwrap_err();
        assert!(matches!(err, WatchError::UnknownRule(id) if id == "ghost"));
    }

    #[test]
    fn test_reset_rearms_fired_rules() {
        let mut rules = vec![ThresholdRule::new("half", Metric::Percentage, 50.0)];
        let mut state = NotifierState::for_rules(&rules);

        assert_eq!(evaluate(&at_percent(60.0), &mut rules, &mut state).unwrap().len(), 1);
        assert_eq!(state.is_armed("half"), Some(false));

        state.reset();
        assert_eq!(state.is_armed("half"), Some(true));
        assert_eq!(evaluate(&at_percent(60.0), &mut rules, &mut state).unwrap().len(), 1);
    }

    #[test]
    fn test_zero_threshold_holds_on_empty_quantity() {
        let mut rules = vec![ThresholdRule::new("zero", Metric::Percentage, 0.0)];
        let mut state = NotifierState::for_rules(&rules);

        // percentage of an empty quantity is 0, which meets a 0 threshold
        let fired = evaluate(&Quantity::default(), &mut rules, &mut state).unwrap();
        assert_eq!(fired, vec!["zero"]);
        let fired = evaluate(&Quantity::default(), &mut rules, &mut state).unwrap();
        assert!(fired.is_empty());
    }
}
