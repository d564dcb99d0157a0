//! Production units located in a zone.

use std::fmt;
use std::rc::Rc;

use serde_json::{Value, json};

use super::{ROOT, Zone, checked_id, write_values};
use crate::Mw;
use crate::error::{ModelError, ModelResult};
use crate::timeline::Timeline;
use crate::validation::{
    array_of_numbers_with_size, ensure_object_with_size, ensure_string,
    ensure_zone_identifiers_are_the_same, key_path, require_key,
};

pub(crate) const JSON_ID: &str = "id";
pub(crate) const JSON_ZONE: &str = "zone";
pub(crate) const JSON_MIN_POWERS: &str = "min-powers";
pub(crate) const JSON_MAX_POWERS: &str = "max-powers";

/// A production unit with one `(min, max)` power bound per timestep.
///
/// `min_powers[t] <= max_powers[t]` is not enforced here; see
/// [`crate::scenario::Scenario::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Plant {
    id: String,
    timeline: Rc<Timeline>,
    zone: Rc<Zone>,
    min_powers: Vec<Mw>,
    max_powers: Vec<Mw>,
}

impl Plant {
    /// Creates a plant located in `zone`.
    ///
    /// # Errors
    ///
    /// Fails if `id` is too long or if either bound array does not hold one
    /// value per timestep.
    pub fn new(
        id: &str,
        timeline: &Rc<Timeline>,
        zone: &Rc<Zone>,
        min_powers: &[Mw],
        max_powers: &[Mw],
    ) -> ModelResult<Self> {
        let id = checked_id(id, &key_path(ROOT, JSON_ID))?;
        let len = timeline.num_future_timesteps();
        for (name, values) in [(JSON_MIN_POWERS, min_powers), (JSON_MAX_POWERS, max_powers)] {
            if values.len() != len {
                return Err(ModelError::SizeMismatch {
                    path: key_path(ROOT, name),
                    expected: len,
                    found: values.len(),
                });
            }
        }
        Ok(Self {
            id,
            timeline: Rc::clone(timeline),
            zone: Rc::clone(zone),
            min_powers: min_powers.to_vec(),
            max_powers: max_powers.to_vec(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    pub fn min_powers(&self) -> &[Mw] {
        &self.min_powers
    }

    pub fn max_powers(&self) -> &[Mw] {
        &self.max_powers
    }

    /// Loads a plant from
    /// `{"id": string, "zone": string, "min-powers": [...], "max-powers": [...]}`.
    ///
    /// The `zone` string must equal the identifier of the resolved `zone`.
    pub fn from_json(timeline: &Rc<Timeline>, zone: &Rc<Zone>, j: &Value) -> ModelResult<Self> {
        Self::from_json_at(timeline, zone, j, "$")
    }

    pub(crate) fn from_json_at(
        timeline: &Rc<Timeline>,
        zone: &Rc<Zone>,
        j: &Value,
        path: &str,
    ) -> ModelResult<Self> {
        let obj = ensure_object_with_size(j, 4, path)?;
        let id_path = key_path(path, JSON_ID);
        let id = ensure_string(require_key(obj, JSON_ID, path)?, &id_path)?;
        let zone_path = key_path(path, JSON_ZONE);
        let zone_id = ensure_string(require_key(obj, JSON_ZONE, path)?, &zone_path)?;
        ensure_zone_identifiers_are_the_same(zone_id, zone.id(), &zone_path)?;

        let len = timeline.num_future_timesteps();
        let min_powers = array_of_numbers_with_size(
            require_key(obj, JSON_MIN_POWERS, path)?,
            len,
            &key_path(path, JSON_MIN_POWERS),
        )?;
        let max_powers = array_of_numbers_with_size(
            require_key(obj, JSON_MAX_POWERS, path)?,
            len,
            &key_path(path, JSON_MAX_POWERS),
        )?;
        Ok(Self {
            id: checked_id(id, &id_path)?,
            timeline: Rc::clone(timeline),
            zone: Rc::clone(zone),
            min_powers,
            max_powers,
        })
    }

    pub fn to_json(&self) -> Value {
        json!({
            JSON_ID: self.id,
            JSON_MAX_POWERS: self.max_powers,
            JSON_MIN_POWERS: self.min_powers,
            JSON_ZONE: self.zone.id(),
        })
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "A plant with identifier \"{}\"", self.id)?;
        writeln!(f, "  Zone: {}", self.zone.id())?;
        write!(f, "  Minimum powers: ")?;
        write_values(f, &self.min_powers)?;
        write!(f, "\n  Maximum powers: ")?;
        write_values(f, &self.max_powers)
    }
}
