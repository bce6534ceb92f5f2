//! Order Issues API test double.

use doubles_app::{Config, ServiceKind, telemetry};
use doubles_hex::{FaultInjector, IssueService, inbound::IssuesServer};
use doubles_repo::InMemoryIssueRepo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env(ServiceKind::Issues)?;
    telemetry::init(config.log_format);

    tracing::info!(
        fault_probability = config.fault_probability,
        "Starting Order Issues API (volatile store) on {}",
        config.addr()
    );

    // The store lives exactly as long as the server
    let service = IssueService::new(InMemoryIssueRepo::new());
    let faults = FaultInjector::with_probability(config.fault_probability);

    IssuesServer::with_faults(service, faults)
        .run(&config.addr())
        .await
}
