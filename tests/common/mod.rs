//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::rc::Rc;

use simprod::component::{Link, Plant, Zone};
use simprod::plan::Plan;
use simprod::scenario::Scenario;
use simprod::timeline::Timeline;

/// Three future timesteps of 10, 30 and 60 minutes.
pub fn default_timeline() -> Timeline {
    Timeline::new(vec![10, 30, 60])
}

/// Scenario with zones Z1 and Z2, link L1 from Z1 to Z2 and plant P1 in Z1.
///
/// Matches the content of `data/scenario.json` minus plant P2.
pub fn default_scenario() -> Scenario {
    let mut scenario = Scenario::new(&default_timeline());
    let timeline = Rc::clone(scenario.timeline());
    let z1 = scenario
        .add_zone(Zone::new("Z1", &timeline, &[5.0, 10.0, 8.0]).unwrap())
        .unwrap();
    let z2 = scenario
        .add_zone(Zone::new("Z2", &timeline, &[2.0, 2.5, 3.0]).unwrap())
        .unwrap();
    scenario
        .add_link(Link::new("L1", &z1, &z2).unwrap())
        .unwrap();
    scenario
        .add_plant(Plant::new("P1", &timeline, &z1, &[1.0, 2.0, 3.0], &[7.0, 8.0, 9.0]).unwrap())
        .unwrap();
    scenario
}

/// Plan where P1 produces 1, 2 and 3 MW.
pub fn default_plan() -> Plan {
    let mut plan = Plan::new(&default_timeline());
    for (t, production) in [1.0, 2.0, 3.0].into_iter().enumerate() {
        plan.set_production(t, "P1", production).unwrap();
    }
    plan
}

/// Path of a file under the crate's `data/` directory.
pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}
