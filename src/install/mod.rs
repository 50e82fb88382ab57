//! Type Installation
//!
//! Registers every catalog kind as a schema-less custom resource type in the
//! host cluster before any object is stored.

pub mod definition;
pub mod installer;

pub use definition::definition_for;
pub use installer::{Installer, PollConfig};
