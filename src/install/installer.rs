//! Type Installer
//!
//! Ensures every kind in the registry is registered with the host cluster.
//! Registration is create-if-absent: an existing registration is never
//! re-created or updated. A kind whose registration fails is reported and the
//! remaining kinds are still installed. Kinds created by this run are polled
//! until the host reports them, since type registration in the host cluster
//! is asynchronous. A registration found on the first fetch is already served
//! and is not polled.

use super::definition::definition_for;
use crate::domain::ports::DefinitionStoreRef;
use crate::error::{Error, KindFailure, Result};
use crate::registry::{KindRegistry, ResourceKind};
use backoff::ExponentialBackoff;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

// =============================================================================
// Configuration
// =============================================================================

/// Readiness polling settings
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay before the first retry
    pub initial_interval: Duration,
    /// Upper bound on the delay between retries
    pub max_interval: Duration,
    /// Give up on a kind after this long
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            max_interval: Duration::from_secs(5),
            timeout: Duration::from_secs(60),
        }
    }
}

impl PollConfig {
    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.initial_interval,
            current_interval: self.initial_interval,
            max_interval: self.max_interval,
            max_elapsed_time: Some(self.timeout),
            ..ExponentialBackoff::default()
        }
    }
}

// =============================================================================
// Installer
// =============================================================================

/// Outcome of registering a single kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Registration {
    Existing,
    Created,
}

/// Registers catalog kinds as extension resource types
pub struct Installer {
    definitions: DefinitionStoreRef,
    registry: Arc<KindRegistry>,
    poll: PollConfig,
}

impl Installer {
    pub fn new(definitions: DefinitionStoreRef, registry: Arc<KindRegistry>) -> Self {
        Self::with_poll_config(definitions, registry, PollConfig::default())
    }

    pub fn with_poll_config(
        definitions: DefinitionStoreRef,
        registry: Arc<KindRegistry>,
        poll: PollConfig,
    ) -> Self {
        Self {
            definitions,
            registry,
            poll,
        }
    }

    /// Install every kind in the registry
    ///
    /// Registrations are created one kind at a time in registry order. The
    /// kinds created here are then polled concurrently. Every failure,
    /// whether from creation or from polling, is returned in one
    /// [`Error::Install`].
    pub async fn install_types(&self) -> Result<()> {
        let mut failures = Vec::new();
        let mut installed = Vec::new();

        for kind in self.registry.iter() {
            let definition = kind.definition_name();
            match self.ensure_registered(kind).await {
                Ok(Registration::Created) => installed.push(definition),
                Ok(Registration::Existing) => {}
                Err(e) => {
                    error!("Failed to install resource type {}: {}", definition, e);
                    failures.push(KindFailure {
                        definition,
                        error: Box::new(e),
                    });
                }
            }
        }

        let polls = installed.iter().map(|name| self.wait_until_ready(name));
        let results = join_all(polls).await;

        for (definition, result) in installed.into_iter().zip(results) {
            if let Err(e) = result {
                error!("Resource type {} did not become ready: {}", definition, e);
                failures.push(KindFailure {
                    definition,
                    error: Box::new(e),
                });
            }
        }

        if failures.is_empty() {
            info!("Installed {} resource types", self.registry.len());
            Ok(())
        } else {
            Err(Error::Install { failures })
        }
    }

    /// Create the registration for a kind unless it already exists
    async fn ensure_registered(&self, kind: &ResourceKind) -> Result<Registration> {
        let name = kind.definition_name();
        match self.definitions.get(&name).await {
            Ok(_) => {
                debug!("Resource type {} already installed, skipping", name);
                Ok(Registration::Existing)
            }
            Err(e) if e.is_not_found() => {
                info!("Installing resource type {}", name);
                self.definitions.create(&definition_for(kind)).await?;
                Ok(Registration::Created)
            }
            Err(e) => Err(e),
        }
    }

    /// Poll a registration until the host reports it
    async fn wait_until_ready(&self, name: &str) -> Result<()> {
        let definitions = &self.definitions;

        let result = backoff::future::retry(self.poll.backoff(), || async move {
            match definitions.get(name).await {
                Ok(_) => Ok(()),
                Err(e) if e.is_transient() => {
                    debug!("Resource type {} not ready yet: {}", name, e);
                    Err(backoff::Error::transient(e))
                }
                Err(e) => Err(backoff::Error::permanent(e)),
            }
        })
        .await;

        match result {
            Ok(()) => {
                debug!("Resource type {} is ready", name);
                Ok(())
            }
            Err(e) if e.is_transient() => Err(Error::PollTimeout {
                definition: name.to_string(),
                timeout_secs: self.poll.timeout.as_secs(),
                last_error: e.to_string(),
            }),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDefinitionStore;
    use assert_matches::assert_matches;

    fn fast_poll() -> PollConfig {
        PollConfig {
            initial_interval: Duration::from_millis(2),
            max_interval: Duration::from_millis(10),
            timeout: Duration::from_millis(100),
        }
    }

    fn installer(store: &Arc<FakeDefinitionStore>) -> Installer {
        Installer::with_poll_config(
            store.clone(),
            Arc::new(KindRegistry::service_catalog()),
            fast_poll(),
        )
    }

    fn names() -> Vec<String> {
        KindRegistry::service_catalog()
            .iter()
            .map(|k| k.definition_name())
            .collect()
    }

    #[tokio::test]
    async fn test_install_all_resources() {
        let store = Arc::new(FakeDefinitionStore::default());

        installer(&store).install_types().await.unwrap();

        assert_eq!(store.create_calls(), names());
        // one initial fetch and one readiness poll per kind
        assert_eq!(store.get_calls().len(), 2 * names().len());
    }

    #[tokio::test]
    async fn test_install_skips_existing_resource() {
        let store = Arc::new(FakeDefinitionStore::default());
        store.preinstall("brokers.servicecatalog.k8s.io");

        installer(&store).install_types().await.unwrap();

        let created = store.create_calls();
        assert_eq!(created.len(), names().len() - 1);
        assert!(!created.iter().any(|n| n == "brokers.servicecatalog.k8s.io"));

        // only the three created kinds are polled
        let gets = store.get_calls();
        let polled = &gets[names().len()..];
        assert_eq!(polled.len(), 3);
        assert!(!polled.iter().any(|n| n == "brokers.servicecatalog.k8s.io"));
        assert_eq!(polled, &names()[1..]);
    }

    #[tokio::test]
    async fn test_install_aggregates_errors() {
        let store = Arc::new(FakeDefinitionStore::default());
        store.fail_first_creates(2);

        let err = installer(&store).install_types().await.unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("Error 1"), "unexpected error: {}", msg);
        assert!(msg.contains("Error 2"), "unexpected error: {}", msg);
        assert_matches!(err, Error::Install { ref failures } if failures.len() == 2);

        // only the kinds created by calls 3 and 4 are polled
        let all = names();
        let gets = store.get_calls();
        let polled = &gets[all.len()..];
        assert_eq!(polled, &all[2..]);
    }

    #[tokio::test]
    async fn test_install_does_not_poll_failed_resources() {
        let store = Arc::new(FakeDefinitionStore::default());
        store.fail_create("brokers.servicecatalog.k8s.io", "Error creating CRD");
        store.fail_create("instances.servicecatalog.k8s.io", "Error creating CRD");

        let err = installer(&store).install_types().await.unwrap_err();
        assert_matches!(err, Error::Install { ref failures } if failures.len() == 2);

        let gets = store.get_calls();
        let polled = &gets[names().len()..];
        assert_eq!(polled.len(), 2);
        for name in polled {
            assert_ne!(name, "brokers.servicecatalog.k8s.io");
            assert_ne!(name, "instances.servicecatalog.k8s.io");
        }
    }

    #[tokio::test]
    async fn test_install_reports_fetch_failure() {
        let store = Arc::new(FakeDefinitionStore::default());
        store.fail_get("serviceclasses.servicecatalog.k8s.io", 403);

        let err = installer(&store).install_types().await.unwrap_err();
        assert_matches!(
            err,
            Error::Install { ref failures }
                if failures.len() == 1
                    && failures[0].definition == "serviceclasses.servicecatalog.k8s.io"
        );
        assert!(!store
            .create_calls()
            .iter()
            .any(|n| n == "serviceclasses.servicecatalog.k8s.io"));
    }

    #[tokio::test]
    async fn test_install_poll_timeout_is_per_kind() {
        let store = Arc::new(FakeDefinitionStore::default());
        store.never_ready("bindings.servicecatalog.k8s.io");

        let err = installer(&store).install_types().await.unwrap_err();
        match err {
            Error::Install { failures } => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].definition, "bindings.servicecatalog.k8s.io");
                assert_matches!(*failures[0].error, Error::PollTimeout { .. });
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(store.create_calls(), names());
    }

    #[tokio::test]
    async fn test_install_is_idempotent() {
        let store = Arc::new(FakeDefinitionStore::default());
        let installer = installer(&store);

        installer.install_types().await.unwrap();
        let first_run_gets = store.get_calls().len();
        installer.install_types().await.unwrap();

        assert_eq!(store.create_calls().len(), names().len());
        // everything is present on the second run: one fetch per kind, no polls
        assert_eq!(store.get_calls().len(), first_run_gets + names().len());
    }
}
