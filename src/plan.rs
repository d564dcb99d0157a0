//! The output dataset: per-timestep plant productions.

use std::fmt;

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::Mw;
use crate::error::{ModelError, ModelResult};
use crate::timeline::Timeline;
use crate::treemap::{OrderedMap, balanced_insertion_order};
use crate::validation::{array_of_numbers, ensure_object, key_path, require_key};

const JSON_PRODUCTIONS: &str = "productions";
const JSON_TIMELINE: &str = "timeline";

/// A production schedule: one plant-to-production map per timestep.
///
/// Plant identifiers are plain strings; a plan is not tied to any
/// scenario. A plant without an entry at some timestep produces `0.0`.
///
/// # Examples
///
/// ```
/// use simprod::plan::Plan;
/// use simprod::timeline::Timeline;
///
/// let mut plan = Plan::new(&Timeline::new(vec![10, 30, 60]));
/// plan.set_production(0, "P1", 1.0).unwrap();
/// plan.set_production(1, "P1", 2.0).unwrap();
/// plan.set_production(2, "P1", 3.0).unwrap();
/// assert_eq!(
///     plan.to_json().to_string(),
///     r#"{"productions":{"P1":[1.0,2.0,3.0]},"timeline":{"future-durations":[10,30,60]}}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    timeline: Timeline,
    productions: Vec<OrderedMap>,
}

impl Plan {
    /// Creates an empty plan over a copy of `timeline`.
    pub fn new(timeline: &Timeline) -> Self {
        let productions = (0..timeline.num_future_timesteps())
            .map(|_| OrderedMap::new())
            .collect();
        Self {
            timeline: timeline.clone(),
            productions,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Production map of timestep `t`, if `t` is inside the horizon.
    pub fn productions_at(&self, t: usize) -> Option<&OrderedMap> {
        self.productions.get(t)
    }

    /// Records the production of `plant_id` at timestep `t`.
    ///
    /// # Errors
    ///
    /// Fails with [`ModelError::TimestepOutOfRange`] if `t` is not a
    /// timestep of the plan's timeline.
    pub fn set_production(&mut self, t: usize, plant_id: &str, production: Mw) -> ModelResult<()> {
        let len = self.productions.len();
        let map = self
            .productions
            .get_mut(t)
            .ok_or(ModelError::TimestepOutOfRange { timestep: t, len })?;
        map.set(plant_id, production);
        Ok(())
    }

    /// Production of `plant_id` at timestep `t`; `0.0` when nothing was
    /// recorded, including outside the horizon.
    pub fn get_production(&self, t: usize, plant_id: &str) -> Mw {
        self.productions.get(t).map_or(0.0, |map| map.get(plant_id))
    }

    /// Plant identifiers exported by [`Plan::to_json`], in ascending order.
    ///
    /// Only plants with an entry at timestep 0 are listed.
    pub fn plant_ids(&self) -> Vec<String> {
        self.productions
            .first()
            .map(OrderedMap::keys)
            .unwrap_or_default()
    }

    /// Loads a plan from `{"timeline": ..., "productions": {id: [number, ...]}}`.
    ///
    /// Production arrays may be shorter than the timeline; missing
    /// timesteps read as `0.0`. Their length is otherwise unconstrained by
    /// the format, but an array longer than the timeline has nowhere to go
    /// and is rejected instead of being truncated.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule, including [`ModelError::SizeMismatch`]
    /// for production arrays longer than the timeline.
    pub fn from_json(j: &Value) -> ModelResult<Self> {
        let obj = ensure_object(j, "$")?;
        let timeline = Timeline::from_json_at(
            require_key(obj, JSON_TIMELINE, "$")?,
            &key_path("$", JSON_TIMELINE),
        )?;
        let mut plan = Self::new(&timeline);

        let path = key_path("$", JSON_PRODUCTIONS);
        let j_productions = ensure_object(require_key(obj, JSON_PRODUCTIONS, "$")?, &path)?;
        let mut entries = Vec::with_capacity(j_productions.len());
        for (plant_id, j_plant_productions) in j_productions {
            let plant_path = key_path(&path, plant_id);
            let values = array_of_numbers(j_plant_productions, &plant_path)?;
            if values.len() > timeline.num_future_timesteps() {
                return Err(ModelError::SizeMismatch {
                    path: plant_path,
                    expected: timeline.num_future_timesteps(),
                    found: values.len(),
                });
            }
            entries.push((plant_id, values));
        }
        // Object keys arrive sorted; inserting them as is would degrade
        // every per-timestep map into a chain.
        for i in balanced_insertion_order(entries.len()) {
            let (plant_id, values) = &entries[i];
            for (t, &production) in values.iter().enumerate() {
                plan.set_production(t, plant_id, production)?;
            }
        }
        debug!(
            timesteps = timeline.num_future_timesteps(),
            plants = j_productions.len(),
            "loaded plan"
        );
        Ok(plan)
    }

    /// Exports the plan; each listed plant gets one value per timestep.
    ///
    /// Plants are those of [`Plan::plant_ids`]: a plant absent at timestep 0
    /// is left out even if it produces later.
    pub fn to_json(&self) -> Value {
        let mut j_productions = Map::new();
        for plant_id in self.plant_ids() {
            let values: Vec<Mw> = self
                .productions
                .iter()
                .map(|map| map.get(&plant_id))
                .collect();
            j_productions.insert(plant_id, json!(values));
        }
        json!({
            JSON_PRODUCTIONS: j_productions,
            JSON_TIMELINE: self.timeline.to_json(),
        })
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A plan over {}", self.timeline)?;
        for (t, map) in self.productions.iter().enumerate() {
            write!(f, "\n  t={t}:")?;
            for (plant_id, production) in map {
                write!(f, " {plant_id}={production:.6}")?;
            }
        }
        Ok(())
    }
}
