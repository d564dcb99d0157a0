//! Demand nodes of the network.

use std::fmt;
use std::rc::Rc;

use serde_json::{Value, json};

use super::{ROOT, checked_id, write_values};
use crate::Mw;
use crate::error::{ModelError, ModelResult};
use crate::timeline::Timeline;
use crate::validation::{
    array_of_numbers_with_size, ensure_object_with_size, ensure_string, key_path, require_key,
};

pub(crate) const JSON_ID: &str = "id";
pub(crate) const JSON_EXPECTED_DEMANDS: &str = "expected-demands";

/// A demand node with one expected demand per timestep.
///
/// The zone shares the timeline it was built against; the number of
/// demands always equals the number of timesteps of that timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    id: String,
    timeline: Rc<Timeline>,
    expected_demands: Vec<Mw>,
}

impl Zone {
    /// Creates a zone.
    ///
    /// # Errors
    ///
    /// Fails if `id` is too long or if `expected_demands` does not hold one
    /// value per timestep.
    pub fn new(id: &str, timeline: &Rc<Timeline>, expected_demands: &[Mw]) -> ModelResult<Self> {
        let id = checked_id(id, &key_path(ROOT, JSON_ID))?;
        if expected_demands.len() != timeline.num_future_timesteps() {
            return Err(ModelError::SizeMismatch {
                path: key_path(ROOT, JSON_EXPECTED_DEMANDS),
                expected: timeline.num_future_timesteps(),
                found: expected_demands.len(),
            });
        }
        Ok(Self {
            id,
            timeline: Rc::clone(timeline),
            expected_demands: expected_demands.to_vec(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn expected_demands(&self) -> &[Mw] {
        &self.expected_demands
    }

    /// Loads a zone from `{"id": string, "expected-demands": [number, ...]}`.
    pub fn from_json(timeline: &Rc<Timeline>, j: &Value) -> ModelResult<Self> {
        Self::from_json_at(timeline, j, "$")
    }

    pub(crate) fn from_json_at(
        timeline: &Rc<Timeline>,
        j: &Value,
        path: &str,
    ) -> ModelResult<Self> {
        let obj = ensure_object_with_size(j, 2, path)?;
        let id_path = key_path(path, JSON_ID);
        let id = ensure_string(require_key(obj, JSON_ID, path)?, &id_path)?;
        let demands = array_of_numbers_with_size(
            require_key(obj, JSON_EXPECTED_DEMANDS, path)?,
            timeline.num_future_timesteps(),
            &key_path(path, JSON_EXPECTED_DEMANDS),
        )?;
        let id = checked_id(id, &id_path)?;
        Ok(Self {
            id,
            timeline: Rc::clone(timeline),
            expected_demands: demands,
        })
    }

    pub fn to_json(&self) -> Value {
        json!({
            JSON_EXPECTED_DEMANDS: self.expected_demands,
            JSON_ID: self.id,
        })
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "A zone with identifier \"{}\"", self.id)?;
        write!(f, "  Expected demands: ")?;
        write_values(f, &self.expected_demands)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn timeline() -> Rc<Timeline> {
        Rc::new(Timeline::new(vec![10, 30, 60]))
    }

    #[test]
    fn new_zone() {
        let timeline = timeline();
        let zone = Zone::new("Z1", &timeline, &[5.0, 10.0, 8.0]).unwrap();
        assert_eq!(zone.id(), "Z1");
        assert_eq!(zone.timeline(), &*timeline);
        assert_eq!(zone.expected_demands(), &[5.0, 10.0, 8.0]);
    }

    #[test]
    fn demands_must_match_timeline() {
        let err = Zone::new("Z1", &timeline(), &[5.0]).unwrap_err();
        assert_eq!(
            err,
            ModelError::SizeMismatch {
                path: "$.expected-demands".into(),
                expected: 3,
                found: 1,
            }
        );
    }

    #[test]
    fn equality_is_structural_over_timeline() {
        let a = Zone::new("Z1", &timeline(), &[5.0, 10.0, 8.0]).unwrap();
        let b = Zone::new("Z1", &timeline(), &[5.0, 10.0, 8.0]).unwrap();
        assert_eq!(a, b);
        let c = Zone::new("Z2", &timeline(), &[5.0, 10.0, 8.0]).unwrap();
        assert_ne!(a, c);
        let other = Rc::new(Timeline::new(vec![10, 30, 61]));
        let d = Zone::new("Z1", &other, &[5.0, 10.0, 8.0]).unwrap();
        assert_ne!(a, d);
    }

    #[test]
    fn json_round_trip() {
        let timeline = timeline();
        let zone = Zone::new("Z1", &timeline, &[5.0, 10.0, 8.0]).unwrap();
        let j = zone.to_json();
        assert_eq!(j, json!({"id": "Z1", "expected-demands": [5.0, 10.0, 8.0]}));
        assert_eq!(Zone::from_json(&timeline, &j), Ok(zone));
    }

    #[test]
    fn integer_demands_are_numbers() {
        let j = json!({"id": "Z1", "expected-demands": [5, 10, 8]});
        let zone = Zone::from_json(&timeline(), &j).unwrap();
        assert_eq!(zone.expected_demands(), &[5.0, 10.0, 8.0]);
    }

    #[test]
    fn from_json_rejects_bad_shapes() {
        let timeline = timeline();
        let cases = [
            json!("Z1"),
            json!({"id": "Z1"}),
            json!({"id": "Z1", "demands": [1, 2, 3]}),
            json!({"id": 1, "expected-demands": [1, 2, 3]}),
            json!({"id": "Z1", "expected-demands": [1, 2]}),
            json!({"id": "Z1", "expected-demands": [1, "2", 3]}),
            json!({"id": "Z1", "expected-demands": [1, 2, 3], "extra": true}),
        ];
        for j in &cases {
            assert!(Zone::from_json(&timeline, j).is_err(), "should reject {j}");
        }
    }

    #[test]
    fn size_mismatch_reports_location() {
        let j = json!({"id": "Z1", "expected-demands": [1, 2]});
        let err = Zone::from_json(&timeline(), &j).unwrap_err();
        assert_eq!(
            err,
            ModelError::SizeMismatch {
                path: "$.expected-demands".into(),
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn display() {
        let zone = Zone::new("Z1", &timeline(), &[5.0, 10.0, 8.0]).unwrap();
        assert_eq!(
            zone.to_string(),
            "A zone with identifier \"Z1\"\n  Expected demands: 5.000000, 10.000000, 8.000000"
        );
    }
}
