//! Energy-network scenarios and production plans.
//!
//! A [`scenario::Scenario`] gathers a [`timeline::Timeline`] with zones,
//! plants and links; a [`plan::Plan`] records per-timestep plant
//! productions. Every entity converts to and from JSON without loss.

/// Thin command-line front end.
pub mod cli;
/// Zones, plants and links.
pub mod component;
pub mod config;
pub mod error;
/// JSON documents on disk and CSV export.
pub mod io;
pub mod plan;
pub mod scenario;
pub mod timeline;
pub mod treemap;
mod validation;

/// Power or energy quantity.
pub type Mw = f64;

/// Duration of a timestep.
pub type Minutes = u32;
