//! Directed transmission edges between zones.

use std::fmt;
use std::rc::Rc;

use serde_json::{Value, json};

use super::{ROOT, Zone, checked_id};
use crate::error::ModelResult;
use crate::validation::{
    ensure_object_with_size, ensure_string, ensure_zone_identifiers_are_the_same, key_path,
    require_key,
};

pub(crate) const JSON_ID: &str = "id";
pub(crate) const JSON_SOURCE: &str = "source";
pub(crate) const JSON_TARGET: &str = "target";

/// A directed edge from `source` to `target`.
///
/// A link may connect a zone to itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    id: String,
    source: Rc<Zone>,
    target: Rc<Zone>,
}

impl Link {
    pub fn new(id: &str, source: &Rc<Zone>, target: &Rc<Zone>) -> ModelResult<Self> {
        Ok(Self {
            id: checked_id(id, &key_path(ROOT, JSON_ID))?,
            source: Rc::clone(source),
            target: Rc::clone(target),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &Zone {
        &self.source
    }

    pub fn target(&self) -> &Zone {
        &self.target
    }

    /// Loads a link from `{"id": string, "source": string, "target": string}`.
    ///
    /// The caller resolves both endpoints; their identifiers must equal the
    /// `source` and `target` strings.
    pub fn from_json(source: &Rc<Zone>, target: &Rc<Zone>, j: &Value) -> ModelResult<Self> {
        Self::from_json_at(source, target, j, "$")
    }

    pub(crate) fn from_json_at(
        source: &Rc<Zone>,
        target: &Rc<Zone>,
        j: &Value,
        path: &str,
    ) -> ModelResult<Self> {
        let obj = ensure_object_with_size(j, 3, path)?;
        let id_path = key_path(path, JSON_ID);
        let id = ensure_string(require_key(obj, JSON_ID, path)?, &id_path)?;
        let source_path = key_path(path, JSON_SOURCE);
        let source_id = ensure_string(require_key(obj, JSON_SOURCE, path)?, &source_path)?;
        let target_path = key_path(path, JSON_TARGET);
        let target_id = ensure_string(require_key(obj, JSON_TARGET, path)?, &target_path)?;
        ensure_zone_identifiers_are_the_same(source_id, source.id(), &source_path)?;
        ensure_zone_identifiers_are_the_same(target_id, target.id(), &target_path)?;
        Ok(Self {
            id: checked_id(id, &id_path)?,
            source: Rc::clone(source),
            target: Rc::clone(target),
        })
    }

    pub fn to_json(&self) -> Value {
        json!({
            JSON_ID: self.id,
            JSON_SOURCE: self.source.id(),
            JSON_TARGET: self.target.id(),
        })
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "A link with identifier \"{}\"", self.id)?;
        writeln!(f, "  Source zone: {}", self.source.id())?;
        write!(f, "  Target zone: {}", self.target.id())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ModelError;
    use crate::timeline::Timeline;

    fn zones() -> (Rc<Zone>, Rc<Zone>) {
        let timeline = Rc::new(Timeline::new(vec![10, 30, 60]));
        (
            Rc::new(Zone::new("Z1", &timeline, &[5.0, 10.0, 8.0]).unwrap()),
            Rc::new(Zone::new("Z2", &timeline, &[1.0, 1.0, 1.0]).unwrap()),
        )
    }

    #[test]
    fn json_round_trip() {
        let (z1, z2) = zones();
        let link = Link::new("L1", &z1, &z2).unwrap();
        let j = link.to_json();
        assert_eq!(j, json!({"id": "L1", "source": "Z1", "target": "Z2"}));
        assert_eq!(Link::from_json(&z1, &z2, &j), Ok(link));
    }

    #[test]
    fn self_loop_is_accepted() {
        let (z1, _) = zones();
        let link = Link::new("L1", &z1, &z1).unwrap();
        assert_eq!(link.source(), link.target());
    }

    #[test]
    fn endpoints_must_match_resolved_zones() {
        let (z1, z2) = zones();
        let j = json!({"id": "L1", "source": "Z1", "target": "Z2"});
        assert_eq!(
            Link::from_json(&z2, &z1, &j),
            Err(ModelError::IdentifierMismatch {
                path: "$.source".into(),
                expected: "Z2".into(),
                found: "Z1".into(),
            })
        );
    }

    #[test]
    fn from_json_rejects_bad_shapes() {
        let (z1, z2) = zones();
        let cases = [
            json!({"id": "L1", "source": "Z1"}),
            json!({"id": "L1", "source": "Z1", "target": "Z2", "capacity": 4}),
            json!({"id": "L1", "source": "Z1", "destination": "Z2"}),
            json!({"id": 3, "source": "Z1", "target": "Z2"}),
            json!({"id": "L1", "source": ["Z1"], "target": "Z2"}),
            json!(null),
        ];
        for j in &cases {
            assert!(Link::from_json(&z1, &z2, j).is_err(), "should reject {j}");
        }
    }

    #[test]
    fn equality() {
        let (z1, z2) = zones();
        let a = Link::new("L1", &z1, &z2).unwrap();
        assert_eq!(a, a.clone());
        assert_ne!(a, Link::new("L1", &z2, &z1).unwrap());
        assert_ne!(a, Link::new("L2", &z1, &z2).unwrap());
    }

    #[test]
    fn display() {
        let (z1, z2) = zones();
        let link = Link::new("L1", &z1, &z2).unwrap();
        assert_eq!(
            link.to_string(),
            "A link with identifier \"L1\"\n  Source zone: Z1\n  Target zone: Z2"
        );
    }
}
