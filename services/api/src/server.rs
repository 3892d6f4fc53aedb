use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryLeadRepository, InMemoryNotificationPublisher};
use crate::routes::with_intake_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fresh_start::config::AppConfig;
use fresh_start::error::AppError;
use fresh_start::telemetry;
use fresh_start::workflows::intake::{
    EligibilityDisclosure, LeadIntakeService, StaticThresholdProvider,
};
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryLeadRepository::default());
    let notifier = Arc::new(InMemoryNotificationPublisher::new(
        config.intake.staff_email.clone(),
    ));
    let disclosure = if config.intake.show_eligibility {
        EligibilityDisclosure::Full
    } else {
        EligibilityDisclosure::Withheld
    };
    let intake_service = Arc::new(LeadIntakeService::new(
        repository,
        notifier,
        StaticThresholdProvider::utah_2025(),
        disclosure,
    ));

    let app = with_intake_routes(intake_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "lead intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
