//! Population text parsing.
//!
//! Turns a scraped fragment such as `"53.2K / 1.3M"` into a [`Quantity`].
//! Parsing never fails: the overlay regularly sees empty or half-rendered
//! text while the game page loads, so anything unrecognizable becomes zero.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// `<number><unit?> / <number><unit?>`, unit is K or M.
///
/// The unit must touch the number and end the word, so `"10 max"` or
/// `"600 Military"` keep their plain value.
static RATIO_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+\.?\d*|\.\d+)(?:([KkMm])\b)?\s*/\s*(\d+\.?\d*|\.\d+)(?:([KkMm])\b)?")
        .expect("ratio pattern is a valid regex")
});

/// Current and total population of one poll tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Quantity {
    pub current: f64,
    pub total: f64,
}

impl Quantity {
    /// Build a quantity, clamping negative or non-finite values to zero
    pub fn new(current: f64, total: f64) -> Self {
        Self {
            current: sanitize(current),
            total: sanitize(total),
        }
    }

    /// Rounded `current / total` in percent, 0 when `total` is 0.
    ///
    /// Always recomputed from the two fields, never cached.
    pub fn percentage(&self) -> f64 {
        if self.total > 0.0 {
            (self.current / self.total * 100.0).round()
        } else {
            0.0
        }
    }

    pub fn is_zero(&self) -> bool {
        self.current == 0.0 && self.total == 0.0
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Multiplier for a unit suffix (`K`, `M`, or none)
fn unit_scale(unit: Option<&str>) -> f64 {
    match unit.map(|u| u.to_ascii_uppercase()) {
        Some(u) if u == "K" => 1_000.0,
        Some(u) if u == "M" => 1_000_000.0,
        _ => 1.0,
    }
}

/// Parse a `current / total` fragment out of free-form text.
///
/// Returns `Quantity { current: 0, total: 0 }` when no ratio is present.
pub fn parse(text: &str) -> Quantity {
    let Some(caps) = RATIO_PATTERN.captures(text) else {
        log::trace!("No population ratio in {:?}", text);
        return Quantity::default();
    };

    let side = |number: usize, unit: usize| {
        let literal = caps.get(number).map(|m| m.as_str()).unwrap_or("");
        let scale = unit_scale(caps.get(unit).map(|m| m.as_str()));
        literal.parse::<f64>().unwrap_or(0.0) * scale
    };

    Quantity::new(side(1, 2), side(3, 4))
}

/// Parse a single amount such as `"2.5K"`, `"1.3M"` or `"750"`.
///
/// Surrounding whitespace is ignored; text without a usable number gives 0.
pub fn parse_amount(text: &str) -> f64 {
    let trimmed = text.trim();
    let (literal, scale) = match trimmed.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => {
            (&trimmed[..idx], unit_scale(Some(&trimmed[idx..])))
        }
        _ => (trimmed, 1.0),
    };

    // An unknown suffix leaves scale at 1 but the literal still has to be numeric
    if scale == 1.0 && literal.len() != trimmed.len() {
        return 0.0;
    }

    sanitize(literal.parse::<f64>().unwrap_or(0.0) * scale)
}
