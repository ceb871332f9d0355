#[macro_use] extern crate log;
extern crate serde_json;
extern crate thiserror;

mod disjoint_set;
mod error;
mod scenario;

pub use disjoint_set::{DisjointSet, Entry};
pub use error::{DisjointSetError, ScenarioError};
pub use scenario::{Answer, Query, Scenario};
