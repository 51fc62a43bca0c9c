use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use bunker::audit::AuditLogger;
use bunker::cli::{
    handle_dashboard_command, handle_history_command, handle_record_command, BalanceArgs,
    DashboardArgs, ExpenseArgs, HistoryArgs, PaymentArgs, RecordCommand, TransferDoneArgs,
};
use bunker::config::{BunkerPaths, Settings};
use bunker::logging::init_tracing;
use bunker::store::CsvStore;

#[derive(Parser)]
#[command(
    name = "bunker",
    version,
    about = "Half-monthly envelope budgeting over plain CSV tables",
    long_about = "Bunker keeps an envelope budget in four tables: envelope configuration, \
                  current balances, a transaction log and credit cards. It shows what is \
                  still missing from each envelope and records spending against them."
)]
struct Cli {
    /// Directory holding the settings, tables and audit log
    #[arg(long, global = true, env = "BUNKER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, empty tables and default settings
    Init,

    /// Show paths and settings
    Config,

    /// Show envelopes, alerts and totals
    #[command(alias = "dash")]
    Dashboard(DashboardArgs),

    /// Spend from an envelope and take the amount off its balance
    Expense(ExpenseArgs),

    /// Log spending that doesn't come out of an envelope
    FreeExpense(ExpenseArgs),

    /// Log income
    Income(ExpenseArgs),

    /// Log a payment and take it off the matching balance
    Payment(PaymentArgs),

    /// Log a transfer to the subscriptions card
    SubscriptionTransfer(PaymentArgs),

    /// Overwrite the amount of a balance row
    SetBalance(BalanceArgs),

    /// Mark this half-month's subscription transfer as done
    TransferDone(TransferDoneArgs),

    /// Show recent changes from the audit log
    History(HistoryArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => BunkerPaths::with_base_dir(dir),
        None => BunkerPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    let audit = AuditLogger::new(paths.audit_log());

    let record = match cli.command {
        None => {
            println!("Bunker - envelope budgeting over plain tables");
            println!();
            println!("Run 'bunker init' to create the tables.");
            println!("Run 'bunker --help' for usage information.");
            return Ok(());
        }
        Some(Commands::Init) => {
            println!("Initializing Bunker at: {}", paths.base_dir().display());
            let store = CsvStore::new(paths.clone())?;
            let created = store.initialize()?;
            settings.save(&paths)?;

            if created.is_empty() {
                println!("All tables already exist.");
            } else {
                for table in created {
                    println!("  created {}", paths.table_file(table).display());
                }
            }
            println!("Initialization complete!");
            return Ok(());
        }
        Some(Commands::Config) => {
            println!("Bunker Configuration");
            println!("====================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!("Initialized:     {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("{}", serde_json::to_string_pretty(&settings)?);
            return Ok(());
        }
        Some(Commands::Dashboard(args)) => {
            let store = CsvStore::new(paths)?;
            handle_dashboard_command(&store, &settings, args)?;
            return Ok(());
        }
        Some(Commands::History(args)) => {
            handle_history_command(&audit, args)?;
            return Ok(());
        }
        Some(Commands::Expense(args)) => RecordCommand::Expense(args),
        Some(Commands::FreeExpense(args)) => RecordCommand::FreeExpense(args),
        Some(Commands::Income(args)) => RecordCommand::Income(args),
        Some(Commands::Payment(args)) => RecordCommand::Payment(args),
        Some(Commands::SubscriptionTransfer(args)) => RecordCommand::SubscriptionTransfer(args),
        Some(Commands::SetBalance(args)) => RecordCommand::SetBalance(args),
        Some(Commands::TransferDone(args)) => RecordCommand::TransferDone(args),
    };

    let store = CsvStore::new(paths)?;
    let outcome = handle_record_command(&store, &settings, &audit, record);
    if !outcome.is_ok() {
        std::process::exit(1);
    }

    Ok(())
}
