//! Versioned Storage
//!
//! Resource version handling for the generic storage layer. Custom resources
//! have no transactions, so optimistic concurrency rests on stamping and
//! reading `metadata.resourceVersion` around every mutation.

pub mod versioner;

pub use versioner::{update_state, CrdVersioner, ObjectState, ResponseMeta, Versioner};
