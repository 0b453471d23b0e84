use anyhow::Context;
use colored::Colorize;
use serde_json::json;

use tally_ledger::{
    Amount, Auditor, InMemoryLedger, LedgerError, LedgerReader, LedgerStats, LedgerWriter,
    PageRequest, Transaction, TransactionKind,
};
use tally_server::{ServerConfig, TallyServer};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Demo(args) => cmd_demo(args, &cli.format),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = server_config(&args)?;
    println!("Tally server on {}", config.bind_addr.to_string().bold());

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(TallyServer::new(config).serve())?;
    Ok(())
}

/// File (or defaults), then environment, then command-line flags.
fn server_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::from_env()?,
    };
    if let Some(bind) = &args.bind {
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address {bind:?}"))?;
    }
    if let Some(port) = args.port {
        config = config.with_port(port);
    }
    Ok(config)
}

/// One step of the sample scenario.
struct Step {
    kind: TransactionKind,
    amount: f64,
    description: &'static str,
}

const SCENARIO: &[Step] = &[
    Step { kind: TransactionKind::Deposit, amount: 500.0, description: "Salary" },
    Step { kind: TransactionKind::Deposit, amount: 200.0, description: "Freelance" },
    Step { kind: TransactionKind::Withdrawal, amount: 100.0, description: "Groceries" },
    Step { kind: TransactionKind::Withdrawal, amount: 1000.0, description: "Too much" },
];

fn cmd_demo(args: DemoArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let ledger = InMemoryLedger::new();
    let mut rejected = Vec::new();

    for step in SCENARIO {
        let amount = Amount::new(step.amount)?;
        let outcome = match step.kind {
            TransactionKind::Deposit => ledger.record_deposit(amount, Some(step.description)),
            TransactionKind::Withdrawal => ledger.record_withdrawal(amount, Some(step.description)),
        };
        match outcome {
            Ok(receipt) => {
                if *format == OutputFormat::Text {
                    println!(
                        "{} {} {} ({}) → balance {}",
                        "✓".green().bold(),
                        receipt.transaction.kind.to_string().cyan(),
                        amount,
                        step.description,
                        format!("{:.2}", receipt.new_balance).bold()
                    );
                }
            }
            Err(e @ LedgerError::InsufficientFunds { .. }) => {
                if *format == OutputFormat::Text {
                    println!("{} {} {}: {}", "✗".red().bold(), step.kind, amount, e.to_string().red());
                }
                rejected.push(json!({
                    "type": step.kind,
                    "amount": step.amount,
                    "error": e.to_string(),
                }));
            }
            Err(e) => return Err(e.into()),
        }
    }

    let balance = ledger.balance()?;
    let page = ledger.list_transactions(PageRequest::new(args.limit, 0))?;
    let stats = LedgerStats::compute(&ledger)?;
    let audit = Auditor::audit(&ledger)?;

    match format {
        OutputFormat::Json => {
            let summary = json!({
                "balance": balance.balance,
                "currency": balance.currency,
                "transactions": page.transactions,
                "total": page.total,
                "rejected": rejected,
                "stats": stats,
                "auditClean": audit.is_clean(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            println!();
            println!("Balance: {} {}", format!("{:.2}", balance.balance).bold(), balance.currency);
            println!("History ({} of {}):", page.transactions.len(), page.total);
            for tx in &page.transactions {
                print_transaction(tx);
            }
            println!();
            println!("Deposits:    {} × avg {:.2} = {:.2}", stats.deposit_count, stats.average_deposit, stats.total_deposits);
            println!("Withdrawals: {} × avg {:.2} = {:.2}", stats.withdrawal_count, stats.average_withdrawal, stats.total_withdrawals);
            println!("Net flow:    {:.2}", stats.net_flow);
            if audit.is_clean() {
                println!("{} Balance matches replayed history", "✓".green().bold());
            } else {
                println!("{} {} audit violation(s)", "✗".red().bold(), audit.violations.len());
            }
        }
    }

    Ok(())
}

fn print_transaction(tx: &Transaction) {
    let kind = match tx.kind {
        TransactionKind::Deposit => tx.kind.to_string().green(),
        TransactionKind::Withdrawal => tx.kind.to_string().yellow(),
    };
    println!(
        "  {} {:<10} {:>10.2}  {}  {}",
        tx.id.short_id().dimmed(),
        kind,
        tx.amount,
        tx.description,
        tx.timestamp.to_rfc3339().dimmed()
    );
}
