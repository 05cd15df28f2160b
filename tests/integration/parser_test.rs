use popwatch::core::quantity::parse_amount;
use popwatch::{parse, Quantity};

#[test]
fn test_parse_game_fragment() {
    let q = parse("53.2K / 1.3M");
    assert_eq!(q, Quantity::new(53_200.0, 1_300_000.0));
    assert_eq!(q.percentage(), 4.0);
}

#[test]
fn test_parse_never_fails_on_partial_text() {
    for text in ["", "garbage", "Pop:", "/", "K / M", "12 /", "/ 40K"] {
        let q = parse(text);
        assert_eq!(q, Quantity::default(), "input {:?}", text);
        assert_eq!(q.percentage(), 0.0);
    }
}

#[test]
fn test_division_by_zero_is_guarded() {
    let q = parse("100 / 0");
    assert_eq!(q.percentage(), 0.0);
    assert!(q.percentage().is_finite());
}

#[test]
fn test_parse_amount_matches_ratio_sides() {
    let q = parse("2.5K / 1.3M");
    assert_eq!(q.current, parse_amount("2.5K"));
    assert_eq!(q.total, parse_amount("1.3M"));
}
