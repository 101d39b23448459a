//! testlog-core - Factory test report ingestion and audit log
//!
//! This crate provides the core of the device test log service: it accepts
//! machine-generated test reports from provisioning clients, records them
//! idempotently, and serves a permission-scoped listing. HTTP, user
//! authentication and the datastore engine belong to the host; with the
//! `python` feature the service is exposed to a Python host via PyO3. The
//! implementation prioritizes:
//!
//! 1. **Idempotence** - One entry per submission key, duplicates reported
//! 2. **Access control** - Explicit per-operation permission table, checked first
//! 3. **Logging** - Every decision point logged with request context
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `pipeline` - `TestLogService`, the ingest and list request paths
//! - `access` - Principals and the access gate
//! - `submission` - Submission key resolution from the request path
//! - `validation` - Report decoding (base64 + XML) and structural checks
//! - `security` - Injection pattern scan over report text
//! - `storage` - Store trait, in-memory store, SQL builders
//! - `response` - Stable external result shape and error codes
//! - `config` - Service configuration
//! - `logging` - Structured logging with request context

pub mod access;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod response;
pub mod security;
pub mod storage;
pub mod submission;
pub mod validation;

pub use access::{Operation, PermissionClass, Principal};
pub use config::ServiceConfig;
pub use logging::init_logger;
pub use pipeline::{RequestContext, TestLogService};
pub use response::{ApiResponse, ResponseBody};
pub use storage::{MemoryStore, PutOutcome, StoreError, TestLogEntry, TestLogStore};
pub use submission::SubmissionKey;
pub use validation::{ReportStatus, TestReport, TestResult};

#[cfg(feature = "python")]
mod python {
    use std::sync::Arc;

    use anyhow::Context;
    use pyo3::exceptions::{PyRuntimeError, PyValueError};
    use pyo3::prelude::*;

    use crate::access::principal::{PermissionClass, Principal};
    use crate::config::ServiceConfig;
    use crate::logging::init_logger;
    use crate::pipeline::TestLogService;
    use crate::response::ApiResponse;
    use crate::storage::{queries, MemoryStore};

    fn load_config(config_json: Option<&str>) -> anyhow::Result<ServiceConfig> {
        let base = match config_json {
            Some(json) => ServiceConfig::from_json(json).context("invalid config JSON")?,
            None => ServiceConfig::default(),
        };
        let config = base
            .with_overrides(|name| std::env::var(name).ok())
            .context("invalid TESTLOG_* environment override")?;
        Ok(config)
    }

    fn principal(identity: &str, permission: &str, models: Vec<String>) -> Principal {
        Principal::new(identity, PermissionClass::from_name(permission), models)
    }

    fn render(response: ApiResponse) -> PyResult<(u16, String)> {
        let body = response.to_json().map_err(|e| {
            log::error!("RESPONSE_ENCODE_FAILED error={}", e);
            PyRuntimeError::new_err(e.to_string())
        })?;
        Ok((response.status, body))
    }

    /// Test log service backed by the in-process store.
    ///
    /// The host resolves the caller (identity, permission class, authorized
    /// models) and passes it on every call. Returns `(http_status, json_body)`.
    #[pyclass(name = "TestLogService")]
    struct PyTestLogService {
        inner: TestLogService,
    }

    #[pymethods]
    impl PyTestLogService {
        #[new]
        #[pyo3(signature = (config_json=None))]
        fn new(config_json: Option<&str>) -> PyResult<Self> {
            init_logger();
            let config =
                load_config(config_json).map_err(|e| PyValueError::new_err(format!("{:#}", e)))?;
            Ok(Self {
                inner: TestLogService::new(Arc::new(MemoryStore::new()), config),
            })
        }

        /// Ingest a base64-encoded report under `key_path`.
        fn ingest(
            &self,
            identity: &str,
            permission: &str,
            models: Vec<String>,
            key_path: &str,
            body: &[u8],
        ) -> PyResult<(u16, String)> {
            let caller = principal(identity, permission, models);
            render(self.inner.ingest(&caller, key_path, body))
        }

        /// List the test logs visible to the caller.
        fn list(
            &self,
            identity: &str,
            permission: &str,
            models: Vec<String>,
        ) -> PyResult<(u16, String)> {
            let caller = principal(identity, permission, models);
            render(self.inner.list(&caller))
        }
    }

    /// SQL for an external Postgres store.
    #[pyfunction]
    fn test_log_insert_query() -> String {
        queries::build_test_log_insert()
    }

    #[pyfunction]
    fn allowed_list_query() -> String {
        queries::build_allowed_list_query()
    }

    #[pyfunction]
    fn test_log_table_ddl() -> &'static str {
        queries::build_test_log_table()
    }

    /// Python module definition
    #[pymodule]
    fn testlog_core(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
        m.add_class::<PyTestLogService>()?;
        m.add_function(wrap_pyfunction!(test_log_insert_query, m)?)?;
        m.add_function(wrap_pyfunction!(allowed_list_query, m)?)?;
        m.add_function(wrap_pyfunction!(test_log_table_ddl, m)?)?;
        Ok(())
    }
}
