//! Helpers shared by the Diesel adapter integration suites.

mod cluster_skip;
mod pg_embed;

pub use cluster_skip::handle_cluster_setup_failure;
pub use pg_embed::{PgContext, pg_context};

/// Context for one test, or `None` when the cluster is unavailable and
/// `SKIP_TEST_CLUSTER` allows skipping.
pub fn pg_context_or_skip() -> Option<PgContext> {
    match pg_context() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}
