//! Repository modules implementing the study index operations.
//!
//! Each module adds methods to `CorpusService` via `impl CorpusService`
//! blocks. `names` also exposes the free-function resolver so `add_study`
//! can run it inside its own transaction.

pub mod analysis;
pub mod names;
pub mod study;
pub mod summary;
