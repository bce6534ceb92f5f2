//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use doubles_types::{IssueRepository, PaymentRepository};

use super::fault::fault_middleware;
use super::handlers::{self, IssuesState, PaymentsState};
use crate::{FaultInjector, IssueService, PaymentService};

/// HTTP server for the Order Issues API.
pub struct IssuesServer<R: IssueRepository> {
    state: Arc<IssuesState<R>>,
    faults: FaultInjector,
}

impl<R: IssueRepository> IssuesServer<R> {
    /// Creates a server with fault injection disabled.
    pub fn new(service: IssueService<R>) -> Self {
        Self::with_faults(service, FaultInjector::disabled())
    }

    pub fn with_faults(service: IssueService<R>, faults: FaultInjector) -> Self {
        Self {
            state: Arc::new(IssuesState { service }),
            faults,
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route(
                "/issues",
                get(handlers::list_issues::<R>).post(handlers::create_issue::<R>),
            )
            .route("/issues/by-date", get(handlers::issues_by_date::<R>))
            .route(
                "/issues/{id}",
                get(handlers::get_issue::<R>)
                    .put(handlers::replace_issue::<R>)
                    .patch(handlers::patch_issue::<R>)
                    .delete(handlers::delete_issue::<R>),
            )
            .route(
                "/orders/{order_id}/issues",
                get(handlers::issues_for_order::<R>),
            )
            .layer(middleware::from_fn_with_state(
                self.faults.clone(),
                fault_middleware,
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Binds `addr` and serves until a shutdown signal arrives.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serves on an already bound listener.
    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        tracing::info!("Order Issues API listening on {}", listener.local_addr()?);
        serve(listener, self.router()).await
    }
}

/// HTTP server for the Payments API.
pub struct PaymentsServer<R: PaymentRepository> {
    state: Arc<PaymentsState<R>>,
    faults: FaultInjector,
}

impl<R: PaymentRepository> PaymentsServer<R> {
    /// Creates a server with fault injection disabled.
    pub fn new(service: PaymentService<R>) -> Self {
        Self::with_faults(service, FaultInjector::disabled())
    }

    pub fn with_faults(service: PaymentService<R>, faults: FaultInjector) -> Self {
        Self {
            state: Arc::new(PaymentsState { service }),
            faults,
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route(
                "/payments",
                get(handlers::list_payments::<R>).post(handlers::create_payment::<R>),
            )
            .route(
                "/payments/{order_id}",
                axum::routing::put(handlers::replace_payment::<R>)
                    .patch(handlers::patch_payment::<R>)
                    .delete(handlers::delete_payment::<R>),
            )
            .route(
                "/payments/{order_id}/status",
                get(handlers::payment_status::<R>),
            )
            .layer(middleware::from_fn_with_state(
                self.faults.clone(),
                fault_middleware,
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Binds `addr` and serves until a shutdown signal arrives.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serves on an already bound listener.
    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        tracing::info!("Payments API listening on {}", listener.local_addr()?);
        serve(listener, self.router()).await
    }
}

async fn serve(listener: TcpListener, router: Router) -> anyhow::Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, discarding in-memory store...");
}
