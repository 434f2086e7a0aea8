use crate::cli::ServeArgs;
use crate::infra::{employee_service, override_registry_url, AppState};
use crate::routes::with_employee_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use employee_registry::config::AppConfig;
use employee_registry::error::AppError;
use employee_registry::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    override_registry_url(&mut config, args.registry_url.take())?;

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let employee_service = employee_service(&config.registry)?;

    let app = with_employee_routes(employee_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        registry = %config.registry.endpoint(),
        "employee registration gateway ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
