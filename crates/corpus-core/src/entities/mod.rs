//! Entity structs for the Corpus domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize` and `Deserialize` for the JSON contract.

mod analysis;
mod study;

pub use analysis::Analysis;
pub use study::{NewStudy, Study};
