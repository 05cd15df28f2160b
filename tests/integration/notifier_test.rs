use popwatch::{evaluate, Metric, NotifierState, Quantity, ThresholdRule, WatchError};

fn run(percentages: &[f64], rule_value: f64) -> Vec<usize> {
    let mut rules = vec![ThresholdRule::new("rule", Metric::Percentage, rule_value)];
    let mut state = NotifierState::for_rules(&rules);

    percentages
        .iter()
        .enumerate()
        .filter_map(|(i, &p)| {
            let fired = evaluate(&Quantity::new(p, 100.0), &mut rules, &mut state).unwrap();
            (!fired.is_empty()).then_some(i)
        })
        .collect()
}

#[test]
fn test_fifty_percent_sequence() {
    assert_eq!(run(&[10.0, 49.0, 50.0, 51.0, 49.0, 50.0], 50.0), vec![2, 5]);
}

#[test]
fn test_one_fire_per_run_above_threshold() {
    let values = [0.0, 80.0, 80.0, 10.0, 10.0, 71.0, 69.0, 70.0, 70.0, 100.0];
    // runs at or above 70 start at 1, 5 and 7
    assert_eq!(run(&values, 70.0), vec![1, 5, 7]);
}

#[test]
fn test_absolute_and_percentage_rules_are_independent() {
    let mut rules = vec![
        ThresholdRule::new("start", Metric::Current, 2_500.0),
        ThresholdRule::new("half", Metric::Percentage, 50.0),
    ];
    let mut state = NotifierState::for_rules(&rules);

    let fired = evaluate(&Quantity::new(3_000.0, 10_000.0), &mut rules, &mut state).unwrap();
    assert_eq!(fired, vec!["start"]);

    let fired = evaluate(&Quantity::new(5_000.0, 10_000.0), &mut rules, &mut state).unwrap();
    assert_eq!(fired, vec!["half"]);

    let fired = evaluate(&Quantity::new(2_000.0, 2_000.0), &mut rules, &mut state).unwrap();
    assert!(fired.is_empty());

    let fired = evaluate(&Quantity::new(2_600.0, 2_600.0), &mut rules, &mut state).unwrap();
    assert_eq!(fired, vec!["start"]);
}

#[test]
fn test_missing_state_surfaces_error() {
    let mut rules = vec![ThresholdRule::new("late", Metric::Current, 1.0)];
    let mut state = NotifierState::new();
    state.register("other");

    let result = evaluate(&Quantity::new(5.0, 10.0), &mut rules, &mut state);
    assert!(matches!(result, Err(WatchError::UnknownRule(_))));
}
