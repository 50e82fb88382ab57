//! Catalog CRD Storage
//!
//! Storage backend that persists service catalog objects (brokers, instances
//! and service classes) as schema-less Kubernetes custom resources, in place
//! of a dedicated datastore.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        Generic Storage Layer (caller)                       │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────────┐  │
//! │  │  Type Installer │  │   Kind Clients  │  │          Versioner          │  │
//! │  │ (startup, once) │  │ broker/instance │  │       resourceVersion       │  │
//! │  │                 │  │  service class  │  │         update_state        │  │
//! │  └────────┬────────┘  └────────┬────────┘  └──────────────┬──────────────┘  │
//! │           │           ┌────────┴────────┐                 │                 │
//! │           │           │   Object Codec  │                 │                 │
//! │           │           └────────┬────────┘                 │                 │
//! │           └────────────────────┼──────────────────────────┘                 │
//! │                    ┌───────────┴───────────┐                                │
//! │                    │     Kind Registry     │                                │
//! │                    └───────────────────────┘                                │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │                            Ports (domain::ports)                            │
//! │      DefinitionStore     ResourceStore (kind, namespace)     RawWriter      │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │                    KubeHost adapter (kube::Client, CRDs)                    │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`registry`]: Kind metadata table
//! - [`install`]: Custom resource type registration
//! - [`codec`]: Typed <-> unstructured conversion
//! - [`client`]: Per-kind CRUD clients
//! - [`storage`]: Resource version handling
//! - [`crd`]: Catalog object types
//! - [`domain`]: Host cluster ports
//! - [`adapters`]: Kubernetes implementation of the ports
//! - [`error`]: Error types and handling

pub mod adapters;
pub mod client;
pub mod codec;
pub mod config;
pub mod crd;
pub mod domain;
pub mod error;
pub mod install;
pub mod registry;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use adapters::KubeHost;

pub use client::{BrokerClient, CatalogClients, InstanceClient, KindClient, ServiceClassClient};

pub use config::{StorageConfig, DEFAULT_NAMESPACE};

pub use crd::{Broker, CatalogObject, Instance, ServiceClass};

pub use domain::ports::{DefinitionStore, RawWriter, ResourceStore};

pub use error::{Error, KindFailure, Result};

pub use install::{Installer, PollConfig};

pub use registry::{KindId, KindRegistry, ResourceKind};

pub use storage::{update_state, CrdVersioner, ObjectState, ResponseMeta, Versioner};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
