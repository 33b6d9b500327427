//! Domain types - commit records independent of git access and rendering

pub mod commit;

pub use commit::{Commit, Note, Reference};
