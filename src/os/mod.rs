//! OS-level collaborators.
//!
//! Provides the [`Environment`](env::Environment) reader used for every variable lookup.

pub mod env;
