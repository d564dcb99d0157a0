//! The input dataset: a timeline with zones, plants and links.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::component::{Link, Plant, Zone, link, plant};
use crate::error::{ModelError, ModelResult};
use crate::timeline::Timeline;
use crate::validation::{
    ensure_array, ensure_object, ensure_string, index_path, key_path, require_key,
};

const JSON_LINKS: &str = "links";
const JSON_PLANTS: &str = "plants";
const JSON_TIMELINE: &str = "timeline";
const JSON_ZONES: &str = "zones";

/// Capacities of the scenario collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioLimits {
    pub max_zones: usize,
    pub max_plants: usize,
    pub max_links: usize,
}

impl Default for ScenarioLimits {
    fn default() -> Self {
        Self {
            max_zones: 64,
            max_plants: 256,
            max_links: 256,
        }
    }
}

/// A timeline together with bounded collections of zones, plants and links.
///
/// Zones are stored behind shared handles so that plants and links can
/// refer to them; comparisons always look at the zones' values. Plants
/// and links loaded from JSON are bound to zones of this scenario.
///
/// # Examples
///
/// ```
/// use simprod::component::Zone;
/// use simprod::scenario::Scenario;
/// use simprod::timeline::Timeline;
///
/// let mut scenario = Scenario::new(&Timeline::new(vec![10, 30, 60]));
/// let zone = Zone::new("Z1", scenario.timeline(), &[5.0, 10.0, 8.0]).unwrap();
/// scenario.add_zone(zone).unwrap();
/// assert!(scenario.zone_by_id("Z1").is_some());
/// assert!(scenario.zone_by_id("Z2").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Scenario {
    timeline: Rc<Timeline>,
    zones: Vec<Rc<Zone>>,
    plants: Vec<Plant>,
    links: Vec<Link>,
    limits: ScenarioLimits,
}

/// A semantic problem found by [`Scenario::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioIssue {
    /// Location of the offending value (e.g. `$.plants[0].min-powers[2]`).
    pub path: String,
    pub message: String,
}

impl fmt::Display for ScenarioIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at `{}`: {}", self.path, self.message)
    }
}

impl Scenario {
    /// Creates an empty scenario over a copy of `timeline`.
    pub fn new(timeline: &Timeline) -> Self {
        Self::with_limits(timeline, ScenarioLimits::default())
    }

    pub fn with_limits(timeline: &Timeline, limits: ScenarioLimits) -> Self {
        Self {
            timeline: Rc::new(timeline.clone()),
            zones: Vec::new(),
            plants: Vec::new(),
            links: Vec::new(),
            limits,
        }
    }

    /// The reference timeline, shareable with zones and plants built for
    /// this scenario.
    pub fn timeline(&self) -> &Rc<Timeline> {
        &self.timeline
    }

    pub fn zones(&self) -> &[Rc<Zone>] {
        &self.zones
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn limits(&self) -> ScenarioLimits {
        self.limits
    }

    /// Appends a zone and returns the handle under which it is stored.
    ///
    /// Identifiers are not checked for uniqueness.
    ///
    /// # Errors
    ///
    /// Fails with [`ModelError::CapacityExceeded`] when the scenario already
    /// holds `max_zones` zones.
    pub fn add_zone(&mut self, zone: Zone) -> ModelResult<Rc<Zone>> {
        ensure_capacity(self.zones.len(), self.limits.max_zones, "zones")?;
        let zone = Rc::new(zone);
        self.zones.push(Rc::clone(&zone));
        Ok(zone)
    }

    /// Appends a plant.
    ///
    /// # Errors
    ///
    /// Fails with [`ModelError::CapacityExceeded`] when the scenario already
    /// holds `max_plants` plants.
    pub fn add_plant(&mut self, plant: Plant) -> ModelResult<()> {
        ensure_capacity(self.plants.len(), self.limits.max_plants, "plants")?;
        self.plants.push(plant);
        Ok(())
    }

    /// Appends a link.
    ///
    /// # Errors
    ///
    /// Fails with [`ModelError::CapacityExceeded`] when the scenario already
    /// holds `max_links` links.
    pub fn add_link(&mut self, link: Link) -> ModelResult<()> {
        ensure_capacity(self.links.len(), self.limits.max_links, "links")?;
        self.links.push(link);
        Ok(())
    }

    /// Returns the first zone, in insertion order, with the given identifier.
    pub fn zone_by_id(&self, id: &str) -> Option<&Rc<Zone>> {
        self.zones.iter().find(|zone| zone.id() == id)
    }

    /// Loads a scenario with the default limits.
    ///
    /// The `timeline` key is required; `zones`, `links` and `plants` are
    /// optional. Zones are loaded first, then links, then plants, each
    /// link and plant being resolved against the loaded zones.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule; no partial scenario is produced.
    pub fn from_json(j: &Value) -> ModelResult<Self> {
        Self::from_json_with_limits(j, ScenarioLimits::default())
    }

    pub fn from_json_with_limits(j: &Value, limits: ScenarioLimits) -> ModelResult<Self> {
        let obj = ensure_object(j, "$")?;
        let timeline = Timeline::from_json_at(
            require_key(obj, JSON_TIMELINE, "$")?,
            &key_path("$", JSON_TIMELINE),
        )?;
        let mut scenario = Self::with_limits(&timeline, limits);
        if let Some(j_zones) = obj.get(JSON_ZONES) {
            scenario.add_zones_from_json(j_zones)?;
        }
        if let Some(j_links) = obj.get(JSON_LINKS) {
            scenario.add_links_from_json(j_links)?;
        }
        if let Some(j_plants) = obj.get(JSON_PLANTS) {
            scenario.add_plants_from_json(j_plants)?;
        }
        debug!(
            timesteps = scenario.timeline.num_future_timesteps(),
            zones = scenario.zones.len(),
            links = scenario.links.len(),
            plants = scenario.plants.len(),
            "loaded scenario"
        );
        Ok(scenario)
    }

    fn add_zones_from_json(&mut self, j_zones: &Value) -> ModelResult<()> {
        let path = key_path("$", JSON_ZONES);
        for (z, j_zone) in ensure_array(j_zones, &path)?.iter().enumerate() {
            let zone = Zone::from_json_at(&self.timeline, j_zone, &index_path(&path, z))?;
            self.add_zone(zone)?;
        }
        Ok(())
    }

    fn add_links_from_json(&mut self, j_links: &Value) -> ModelResult<()> {
        let path = key_path("$", JSON_LINKS);
        for (l, j_link) in ensure_array(j_links, &path)?.iter().enumerate() {
            let link_path = index_path(&path, l);
            let obj = ensure_object(j_link, &link_path)?;
            let source = self.resolve_zone(obj, link::JSON_SOURCE, &link_path)?;
            let target = self.resolve_zone(obj, link::JSON_TARGET, &link_path)?;
            let link = Link::from_json_at(&source, &target, j_link, &link_path)?;
            self.add_link(link)?;
        }
        Ok(())
    }

    fn add_plants_from_json(&mut self, j_plants: &Value) -> ModelResult<()> {
        let path = key_path("$", JSON_PLANTS);
        for (p, j_plant) in ensure_array(j_plants, &path)?.iter().enumerate() {
            let plant_path = index_path(&path, p);
            let obj = ensure_object(j_plant, &plant_path)?;
            let zone = self.resolve_zone(obj, plant::JSON_ZONE, &plant_path)?;
            let plant = Plant::from_json_at(&self.timeline, &zone, j_plant, &plant_path)?;
            self.add_plant(plant)?;
        }
        Ok(())
    }

    /// Looks up the zone named by `obj[key]`; an unknown name is an error.
    fn resolve_zone(
        &self,
        obj: &Map<String, Value>,
        key: &'static str,
        path: &str,
    ) -> ModelResult<Rc<Zone>> {
        let zone_path = key_path(path, key);
        let id = ensure_string(require_key(obj, key, path)?, &zone_path)?;
        self.zone_by_id(id)
            .cloned()
            .ok_or_else(|| ModelError::UnresolvedReference {
                path: zone_path,
                id: id.to_string(),
            })
    }

    pub fn to_json(&self) -> Value {
        let links: Vec<Value> = self.links.iter().map(Link::to_json).collect();
        let plants: Vec<Value> = self.plants.iter().map(Plant::to_json).collect();
        let zones: Vec<Value> = self.zones.iter().map(|zone| zone.to_json()).collect();
        json!({
            JSON_LINKS: links,
            JSON_PLANTS: plants,
            JSON_TIMELINE: self.timeline.to_json(),
            JSON_ZONES: zones,
        })
    }

    /// Checks the rules that loading does not enforce.
    ///
    /// Reports plants whose minimum power exceeds their maximum power,
    /// links from a zone to itself, duplicated identifiers, and plants,
    /// links or zones that do not agree with the scenario's own zones and
    /// timeline. Each issue is also logged as a warning.
    pub fn validate(&self) -> Vec<ScenarioIssue> {
        let mut issues = Vec::new();

        check_duplicates(JSON_ZONES, self.zones.iter().map(|z| z.id()), &mut issues);
        check_duplicates(JSON_PLANTS, self.plants.iter().map(Plant::id), &mut issues);
        check_duplicates(JSON_LINKS, self.links.iter().map(Link::id), &mut issues);

        for (z, zone) in self.zones.iter().enumerate() {
            if zone.timeline() != &*self.timeline {
                issues.push(ScenarioIssue {
                    path: index_path("$.zones", z),
                    message: "timeline differs from the scenario timeline".into(),
                });
            }
        }

        for (p, plant) in self.plants.iter().enumerate() {
            let path = index_path("$.plants", p);
            if plant.timeline() != &*self.timeline {
                issues.push(ScenarioIssue {
                    path: path.clone(),
                    message: "timeline differs from the scenario timeline".into(),
                });
            }
            let zone_path = key_path(&path, plant::JSON_ZONE);
            self.check_zone_membership(plant.zone(), &zone_path, &mut issues);
            let bounds = plant.min_powers().iter().zip(plant.max_powers());
            for (t, (min, max)) in bounds.enumerate() {
                if min > max {
                    issues.push(ScenarioIssue {
                        path: index_path(&key_path(&path, plant::JSON_MIN_POWERS), t),
                        message: format!("minimum power {min} exceeds maximum power {max}"),
                    });
                }
            }
        }

        for (l, link) in self.links.iter().enumerate() {
            let path = index_path("$.links", l);
            let source_path = key_path(&path, link::JSON_SOURCE);
            self.check_zone_membership(link.source(), &source_path, &mut issues);
            let target_path = key_path(&path, link::JSON_TARGET);
            self.check_zone_membership(link.target(), &target_path, &mut issues);
            if link.source().id() == link.target().id() {
                issues.push(ScenarioIssue {
                    path,
                    message: format!("source and target are both zone \"{}\"", link.source().id()),
                });
            }
        }

        for issue in &issues {
            warn!(path = %issue.path, "{}", issue.message);
        }
        issues
    }

    fn check_zone_membership(&self, zone: &Zone, path: &str, issues: &mut Vec<ScenarioIssue>) {
        let registered = self.zone_by_id(zone.id()).is_some_and(|z| **z == *zone);
        if !registered {
            issues.push(ScenarioIssue {
                path: path.to_string(),
                message: format!("zone \"{}\" is not part of the scenario", zone.id()),
            });
        }
    }
}

fn ensure_capacity(len: usize, capacity: usize, kind: &'static str) -> ModelResult<()> {
    if len >= capacity {
        return Err(ModelError::CapacityExceeded { kind, capacity });
    }
    Ok(())
}

fn check_duplicates<'a>(
    collection: &str,
    ids: impl Iterator<Item = &'a str>,
    issues: &mut Vec<ScenarioIssue>,
) {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    for (i, id) in ids.enumerate() {
        if let Some(first) = first_seen.get(id) {
            issues.push(ScenarioIssue {
                path: format!("$.{collection}[{i}].id"),
                message: format!("duplicate identifier \"{id}\" (first used at index {first})"),
            });
        } else {
            first_seen.insert(id, i);
        }
    }
}

/// Scenarios are equal when their timelines are equal and their links,
/// plants and zones are pairwise equal position by position. Limits are
/// not compared.
impl PartialEq for Scenario {
    fn eq(&self, other: &Self) -> bool {
        self.timeline == other.timeline
            && self.links == other.links
            && self.plants == other.plants
            && self.zones == other.zones
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A scenario with the following components:\n  {}", self.timeline)?;
        for plant in &self.plants {
            write!(f, "\n{plant}")?;
        }
        for zone in &self.zones {
            write!(f, "\n{zone}")?;
        }
        for link in &self.links {
            write!(f, "\n{link}")?;
        }
        Ok(())
    }
}
