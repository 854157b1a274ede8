//! Analysis core for cytometry results dashboards.
//!
//! Given per-sample, per-population observation rows for one project, the
//! [`analysis`] module produces a responder vs. non-responder comparison
//! table, per-population raw value distributions, and per-population
//! significance results. The [`query`] module runs ad-hoc filtered queries
//! over a project/subject/sample dataset. [`schema`] models the results-API
//! payloads these are fed from.
//!
//! Everything here is synchronous and side-effect-free apart from `tracing`
//! events; derived values are recomputed from scratch on every call.

pub mod analysis;
pub mod math;
pub mod query;
pub mod schema;
