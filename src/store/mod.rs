//! Relational record store
//!
//! Supplies the descriptive fields for identifiers produced by the engine.

mod postgres;
mod traits;

pub use postgres::PgRecordStore;
pub use traits::*;
