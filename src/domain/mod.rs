//! Domain layer - Port definitions
//!
//! This module defines the capabilities the storage adapter needs from the
//! host cluster. Adapters implement these traits to provide concrete
//! functionality.

pub mod ports;

pub use ports::*;
