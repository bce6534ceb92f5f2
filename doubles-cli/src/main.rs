//! Doubles CLI
//!
//! Command-line interface for seeding and inspecting the Order Issues and
//! Payments test doubles.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use doubles_client::{IssuesClient, PaymentsClient};
use doubles_types::{
    DateRange, IssueChanges, IssueFilter, IssueId, NewIssue, NewPayment, OrderId, PaymentChanges,
    PaymentFilter,
};

#[derive(Parser)]
#[command(name = "doubles")]
#[command(author, version, about = "CLI for the order-issues and payments test doubles", long_about = None)]
struct Cli {
    /// Base URL of the Order Issues API
    #[arg(long, env = "ISSUES_API_URL", default_value = "http://localhost:8081")]
    issues_url: String,

    /// Base URL of the Payments API
    #[arg(long, env = "PAYMENTS_API_URL", default_value = "http://localhost:8080")]
    payments_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Order issue operations
    Issue {
        #[command(subcommand)]
        action: IssueCommands,
    },
    /// Payment operations
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
    /// Check both APIs
    Health,
}

#[derive(Subcommand)]
enum IssueCommands {
    /// List issues, optionally filtered
    List {
        #[arg(long)]
        order_id: Option<String>,
        #[arg(long)]
        severity: Option<String>,
        /// Only issues stamped at or after this ISO-8601 instant
        #[arg(long)]
        since: Option<String>,
    },
    /// List issues stamped within an inclusive window
    ByDate {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Get one issue
    Get { id: i64 },
    /// List the issues of one order
    ByOrder { order_id: OrderId },
    /// Record a new issue
    Create {
        #[arg(long)]
        order_id: OrderId,
        #[arg(long)]
        error_code: String,
        #[arg(long)]
        error_message: String,
        #[arg(long, default_value = "LOW")]
        severity: String,
    },
    /// Full update (PUT)
    Update {
        id: i64,
        #[command(flatten)]
        fields: IssueFields,
    },
    /// Partial update (PATCH)
    Patch {
        id: i64,
        #[command(flatten)]
        fields: IssueFields,
    },
    /// Delete an issue
    Delete {
        id: i64,
        /// Ask the server to simulate a deletion conflict
        #[arg(long)]
        conflict: bool,
    },
}

#[derive(Args)]
struct IssueFields {
    #[arg(long)]
    order_id: Option<OrderId>,
    #[arg(long)]
    error_code: Option<String>,
    #[arg(long)]
    error_message: Option<String>,
    #[arg(long)]
    severity: Option<String>,
    /// Ask the server to simulate an update conflict
    #[arg(long)]
    conflict: bool,
}

impl IssueFields {
    fn into_changes(self) -> IssueChanges {
        IssueChanges {
            order_id: self.order_id,
            error_code: self.error_code,
            error_message: self.error_message,
            severity: self.severity,
        }
    }
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// List payments, optionally filtered
    List {
        #[arg(long)]
        order_id: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        since: Option<String>,
    },
    /// Show the status of an order's payment
    Status { order_id: OrderId },
    /// Create the payment for an order
    Create {
        #[arg(long)]
        order_id: OrderId,
        /// JSON value, bare text is sent as a string
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "USD")]
        currency: String,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        external_tx_id: Option<String>,
    },
    /// Full update (PUT)
    Update {
        order_id: OrderId,
        #[command(flatten)]
        fields: PaymentFields,
    },
    /// Partial update (PATCH)
    Patch {
        order_id: OrderId,
        #[command(flatten)]
        fields: PaymentFields,
    },
    /// Delete an order's payment
    Delete {
        order_id: OrderId,
        /// Ask the server to simulate a deletion conflict
        #[arg(long)]
        conflict: bool,
    },
}

#[derive(Args)]
struct PaymentFields {
    #[arg(long)]
    status: Option<String>,
    /// JSON value, bare text is sent as a string
    #[arg(long)]
    amount: Option<String>,
    #[arg(long)]
    currency: Option<String>,
    #[arg(long)]
    external_tx_id: Option<String>,
    /// Ask the server to simulate an update conflict
    #[arg(long)]
    conflict: bool,
}

impl PaymentFields {
    fn into_changes(self) -> PaymentChanges {
        PaymentChanges {
            status: self.status,
            amount: self.amount.as_deref().map(json_or_text),
            currency: self.currency.map(Value::String),
            external_tx_id: self.external_tx_id,
        }
    }
}

/// Parses `raw` as JSON, falling back to a JSON string.
fn json_or_text(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let issues = IssuesClient::new(&cli.issues_url);
    let payments = PaymentsClient::new(&cli.payments_url);

    match cli.command {
        Commands::Health => {
            let issues_ok = issues.health().await.unwrap_or(false);
            let payments_ok = payments.health().await.unwrap_or(false);
            println!("issues   {} {}", cli.issues_url, up_or_down(issues_ok));
            println!("payments {} {}", cli.payments_url, up_or_down(payments_ok));
        }
        Commands::Issue { action } => run_issue(&issues, action).await?,
        Commands::Payment { action } => run_payment(&payments, action).await?,
    }

    Ok(())
}

fn up_or_down(ok: bool) -> &'static str {
    if ok { "up" } else { "down" }
}

async fn run_issue(client: &IssuesClient, action: IssueCommands) -> Result<()> {
    match action {
        IssueCommands::List {
            order_id,
            severity,
            since,
        } => {
            let filter = IssueFilter {
                order_id,
                severity,
                since,
            };
            print_json(&client.list_issues(&filter).await?)
        }
        IssueCommands::ByDate { from, to } => {
            print_json(&client.issues_by_date(&DateRange { from, to }).await?)
        }
        IssueCommands::Get { id } => print_json(&client.get_issue(IssueId::new(id)).await?),
        IssueCommands::ByOrder { order_id } => {
            print_json(&client.issues_for_order(order_id).await?)
        }
        IssueCommands::Create {
            order_id,
            error_code,
            error_message,
            severity,
        } => {
            let issue = NewIssue {
                order_id,
                error_code,
                error_message,
                severity,
            };
            print_json(&client.create_issue(&issue).await?)
        }
        IssueCommands::Update { id, fields } | IssueCommands::Patch { id, fields }
            if fields.conflict =>
        {
            print_json(&client.simulate_update_conflict(IssueId::new(id)).await?)
        }
        IssueCommands::Update { id, fields } => {
            let changes = fields.into_changes();
            print_json(&client.replace_issue(IssueId::new(id), &changes).await?)
        }
        IssueCommands::Patch { id, fields } => {
            let changes = fields.into_changes();
            print_json(&client.patch_issue(IssueId::new(id), &changes).await?)
        }
        IssueCommands::Delete { id, conflict } => {
            print_json(&client.delete_issue(IssueId::new(id), conflict).await?)
        }
    }
}

async fn run_payment(client: &PaymentsClient, action: PaymentCommands) -> Result<()> {
    match action {
        PaymentCommands::List {
            order_id,
            status,
            since,
        } => {
            let filter = PaymentFilter {
                order_id,
                status,
                since,
            };
            print_json(&client.list_payments(&filter).await?)
        }
        PaymentCommands::Status { order_id } => {
            print_json(&client.payment_status(order_id).await?)
        }
        PaymentCommands::Create {
            order_id,
            amount,
            currency,
            status,
            external_tx_id,
        } => {
            let payment = NewPayment {
                order_id,
                amount: json_or_text(&amount),
                currency: Value::String(currency),
                status,
                external_tx_id,
            };
            print_json(&client.create_payment(&payment).await?)
        }
        PaymentCommands::Update { order_id, fields }
        | PaymentCommands::Patch { order_id, fields }
            if fields.conflict =>
        {
            print_json(&client.simulate_update_conflict(order_id).await?)
        }
        PaymentCommands::Update { order_id, fields } => {
            let changes = fields.into_changes();
            print_json(&client.replace_payment(order_id, &changes).await?)
        }
        PaymentCommands::Patch { order_id, fields } => {
            let changes = fields.into_changes();
            print_json(&client.patch_payment(order_id, &changes).await?)
        }
        PaymentCommands::Delete {
            order_id,
            conflict,
        } => print_json(&client.delete_payment(order_id, conflict).await?),
    }
}
