use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::quantity::Quantity;

/// Callback invoked once per threshold crossing
pub type CrossCallback = Box<dyn FnMut(&Quantity) + Send>;

/// Which derived value of a [`Quantity`] a rule watches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Absolute current population
    Current,
    /// Rounded current / total percentage
    Percentage,
}

impl Metric {
    pub fn value_of(self, quantity: &Quantity) -> f64 {
        match self {
            Metric::Current => quantity.current,
            Metric::Percentage => quantity.percentage(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Current => write!(f, "current"),
            Metric::Percentage => write!(f, "percentage"),
        }
    }
}

/// A named threshold on one metric.
///
/// The armed flag is not stored here; it lives in
/// [`NotifierState`](super::NotifierState) so the rule list can be shared
/// between sessions while each session keeps its own flags.
pub struct ThresholdRule {
    pub id: String,
    pub metric: Metric,
    pub value: f64,
    on_cross: Option<CrossCallback>,
}

impl ThresholdRule {
    pub fn new<S: Into<String>>(id: S, metric: Metric, value: f64) -> Self {
        Self {
            id: id.into(),
            metric,
            value,
            on_cross: None,
        }
    }

    /// Attach the callback run when the rule fires
    pub fn on_cross<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Quantity) + Send + 'static,
    {
        self.on_cross = Some(Box::new(callback));
        self
    }

    pub fn set_on_cross(&mut self, callback: CrossCallback) {
        self.on_cross = Some(callback);
    }

    pub fn is_met_by(&self, quantity: &Quantity) -> bool {
        self.metric.value_of(quantity) >= self.value
    }

    pub(super) fn fire(&mut self, quantity: &Quantity) {
        if let Some(callback) = self.on_cross.as_mut() {
            callback(quantity);
        }
    }
}

impl fmt::Debug for ThresholdRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThresholdRule")
            .field("id", &self.id)
            .field("metric", &self.metric)
            .field("value", &self.value)
            .field("on_cross", &self.on_cross.as_ref().map(|_| "<callback>"))
            .finish()
    }
}
