//! Search engine backends
//!
//! The engine is an external ranked-identifier source; this module only
//! speaks its query protocol.

mod manticore;
mod traits;

pub use manticore::Manticore;
pub use traits::*;
