use futures_util::{StreamExt, stream};
use tracing::{debug, info, warn};

use super::error::{AggregateError, StatusError};
use super::registry::is_ready;
use super::result::{ResourceStatus, StatusResult};
use crate::store::ObjectStore;
use crate::unstructured::Unstructured;

/// Fetches each referenced resource and evaluates its readiness.
///
/// A failing item never aborts the batch: its error is recorded on its own
/// [`ResourceStatus`] and repeated in the returned [`AggregateError`].
pub struct StatusRunner<S> {
    store: S,
    concurrency: usize,
}

impl<S: ObjectStore> StatusRunner<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            concurrency: 1,
        }
    }

    /// Number of references fetched at once. Results keep input order
    /// whatever the value; 0 is treated as 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(resources = resources.len(), concurrency = self.concurrency)
    )]
    pub async fn run(
        &self,
        resources: Vec<Unstructured>,
    ) -> (StatusResult, Option<AggregateError>) {
        info!(resources = resources.len(), "evaluating resource status");
        let statuses: Vec<ResourceStatus> = stream::iter(resources)
            .map(|resource| self.check(resource))
            .buffered(self.concurrency)
            .collect()
            .await;

        let result = StatusResult {
            resources: statuses,
        };
        let aggregate = AggregateError::new(result.errors());
        if let Some(e) = &aggregate {
            warn!(
                failed = e.len(),
                total = result.len(),
                "some resources could not be evaluated"
            );
        }
        (result, aggregate)
    }

    async fn check(&self, resource: Unstructured) -> ResourceStatus {
        let reference = resource.object_ref();
        let live = match self.store.get(&reference).await {
            Ok(live) => live,
            Err(source) => {
                warn!(%reference, error = %source, "fetch failed");
                return ResourceStatus::failed(
                    resource,
                    StatusError::Fetch {
                        reference: reference.to_string(),
                        source,
                    },
                );
            }
        };

        match is_ready(&live) {
            Ok(conditions) => {
                debug!(%reference, ?conditions, "evaluated");
                ResourceStatus::evaluated(live, conditions)
            }
            Err(e) => {
                warn!(%reference, error = %e, "evaluation failed");
                ResourceStatus::failed(live, e)
            }
        }
    }
}
