//! Embedded PostgreSQL for the Diesel adapter suites.
//!
//! Each context boots its own cluster under the cargo target directory,
//! creates the `jokes_test` database and applies the crate's embedded
//! migrations through [`run_pending_migrations`], so the tests run against
//! the same schema the server uses.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::{Connection, RunQueryDsl};
use jokes::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::TestCluster;
use tokio::runtime::Runtime;
use uuid::Uuid;

const TEST_DB: &str = "jokes_test";

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;

fn pg_embed_dirs() -> Result<(PathBuf, PathBuf), std::io::Error> {
    let target = std::env::var_os("CARGO_TARGET_DIR").map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("target"),
        PathBuf::from,
    );
    let base = target
        .join("pg-embed")
        .join(format!("bootstrap-{}-{}", std::process::id(), Uuid::new_v4()));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");
    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;
    Ok((runtime_dir, data_dir))
}

fn is_transient(err: &str) -> bool {
    let err = err.to_lowercase();
    [
        "error decoding response body",
        "connection reset",
        "timed out",
        "timeout",
        "temporarily unavailable",
        "dns error",
    ]
    .iter()
    .any(|pattern| err.contains(pattern))
}

/// Start a cluster, pointing `PG_RUNTIME_DIR`/`PG_DATA_DIR` at the target
/// directory unless both are already set. Binary downloads are retried with
/// backoff on transient network errors.
fn test_cluster() -> Result<TestCluster, String> {
    let _bootstrap = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let needs_override =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    let _env = if needs_override {
        let (runtime_dir, data_dir) = pg_embed_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime_dir.to_string_lossy().into_owned())),
            ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
        ]))
    } else {
        None
    };

    let mut last_error = String::new();
    for attempt in 0..=MAX_RETRIES {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                last_error = format!("{err:?}");
                if attempt == MAX_RETRIES || !is_transient(&last_error) {
                    break;
                }
                std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS << attempt));
            }
        }
    }
    Err(last_error)
}

fn create_database(cluster: &TestCluster) -> Result<String, String> {
    let admin_url = cluster.connection().database_url("postgres");
    let mut conn = PgConnection::establish(&admin_url).map_err(|err| err.to_string())?;
    diesel::sql_query(format!("CREATE DATABASE {TEST_DB}"))
        .execute(&mut conn)
        .map_err(|err| format!("create {TEST_DB}: {err}"))?;
    Ok(cluster.connection().database_url(TEST_DB))
}

/// A migrated database with a small pool and a runtime to drive it.
///
/// Fields drop in order: the pool goes while the runtime is still alive and
/// the cluster shuts down last.
pub struct PgContext {
    pub pool: DbPool,
    pub runtime: Runtime,
    _cluster: TestCluster,
}

impl PgContext {
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

pub fn pg_context() -> Result<PgContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let url = create_database(&cluster)?;
    runtime
        .block_on(run_pending_migrations(&url))
        .map_err(|err| err.to_string())?;
    let config = PoolConfig::new(&url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;
    Ok(PgContext {
        pool,
        runtime,
        _cluster: cluster,
    })
}
