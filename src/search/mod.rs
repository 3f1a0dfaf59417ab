//! Search orchestration module
//!
//! Dispatches free-text queries to the engine, re-hydrates the ranked
//! identifiers from the record store without disturbing their order, and
//! times the whole run.

mod dispatcher;
mod enricher;
mod models;
mod pipeline;

pub use dispatcher::{build_disjunction, Dispatcher};
pub use enricher::{restore_rank_order, Enricher};
pub use models::*;
pub use pipeline::{SearchOutcome, SearchPipeline};
