//! Discretization of the future into variable-length timesteps.

use std::fmt;

use serde_json::{Value, json};

use crate::Minutes;
use crate::error::ModelResult;
use crate::validation::{array_of_durations, ensure_object_with_size, key_path, require_key};

pub(crate) const JSON_FUTURE_DURATIONS: &str = "future-durations";

/// Ordered sequence of future timestep durations.
///
/// Every per-timestep array in zones, plants and plans is indexed by this
/// timeline.
///
/// # Examples
///
/// ```
/// use simprod::timeline::Timeline;
///
/// let timeline = Timeline::new(vec![10, 30, 60]);
/// assert_eq!(timeline.num_future_timesteps(), 3);
/// assert_eq!(timeline.to_json().to_string(), r#"{"future-durations":[10,30,60]}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    future_durations: Vec<Minutes>,
}

impl Timeline {
    /// Creates a timeline from the durations of its future timesteps.
    pub fn new(future_durations: impl Into<Vec<Minutes>>) -> Self {
        Self {
            future_durations: future_durations.into(),
        }
    }

    /// Number of future timesteps.
    pub fn num_future_timesteps(&self) -> usize {
        self.future_durations.len()
    }

    pub fn future_durations(&self) -> &[Minutes] {
        &self.future_durations
    }

    /// Total length of the horizon.
    pub fn total_minutes(&self) -> u64 {
        self.future_durations.iter().map(|&d| u64::from(d)).sum()
    }

    /// Loads a timeline from `{"future-durations": [int, ...]}`.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::error::ModelError`] if the value is not an object
    /// with exactly that key holding non-negative integers.
    pub fn from_json(j: &Value) -> ModelResult<Self> {
        Self::from_json_at(j, "$")
    }

    pub(crate) fn from_json_at(j: &Value, path: &str) -> ModelResult<Self> {
        let obj = ensure_object_with_size(j, 1, path)?;
        let j_durations = require_key(obj, JSON_FUTURE_DURATIONS, path)?;
        let durations = array_of_durations(j_durations, &key_path(path, JSON_FUTURE_DURATIONS))?;
        Ok(Self::new(durations))
    }

    pub fn to_json(&self) -> Value {
        json!({ JSON_FUTURE_DURATIONS: self.future_durations })
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A timeline of {} future timesteps with durations ",
            self.num_future_timesteps()
        )?;
        for (t, duration) in self.future_durations.iter().enumerate() {
            if t > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{duration}min")?;
        }
        Ok(())
    }
}
