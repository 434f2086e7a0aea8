use employee_registry::config::{AppConfig, RegistryConfig};
use employee_registry::employees::{EmployeeRequest, EmployeeService, HttpEmployeeRegistry};
use employee_registry::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Replace the configured registry location, keeping its timeout.
pub(crate) fn override_registry_url(
    config: &mut AppConfig,
    registry_url: Option<String>,
) -> Result<(), AppError> {
    if let Some(url) = registry_url {
        config.registry = RegistryConfig::new(url, config.registry.timeout)?;
    }
    Ok(())
}

/// Must run inside the tokio runtime; the client captures its handle.
pub(crate) fn employee_service(
    config: &RegistryConfig,
) -> Result<Arc<EmployeeService<HttpEmployeeRegistry>>, AppError> {
    let registry = Arc::new(HttpEmployeeRegistry::with_current_runtime(config)?);
    Ok(Arc::new(EmployeeService::new(registry)))
}

pub(crate) fn load_request(path: &Path) -> Result<EmployeeRequest, AppError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
