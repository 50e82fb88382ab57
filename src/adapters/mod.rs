//! Host Cluster Adapters
//!
//! Implementations of the domain ports against a live API server.

pub mod kubernetes;

pub use kubernetes::KubeHost;
