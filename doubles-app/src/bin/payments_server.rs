//! Payments API test double.

use doubles_app::{Config, ServiceKind, telemetry};
use doubles_hex::{FaultInjector, PaymentService, inbound::PaymentsServer};
use doubles_repo::InMemoryPaymentRepo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env(ServiceKind::Payments)?;
    telemetry::init(config.log_format);

    tracing::info!(
        fault_probability = config.fault_probability,
        "Starting Payments API (volatile store) on {}",
        config.addr()
    );

    let service = PaymentService::new(InMemoryPaymentRepo::new());
    let faults = FaultInjector::with_probability(config.fault_probability);

    PaymentsServer::with_faults(service, faults)
        .run(&config.addr())
        .await
}
