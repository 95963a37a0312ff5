use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use zbb_cli::audit::AuditLogger;
use zbb_cli::cli::{
    handle_budget_command, handle_category_command, handle_export_command,
    handle_history_command, handle_summary_command, handle_transaction_command,
};
use zbb_cli::clock::SystemClock;
use zbb_cli::config::{paths::ZbbPaths, settings::Settings};
use zbb_cli::logging::init_tracing;
use zbb_cli::services::BudgetSession;
use zbb_cli::storage::{JsonFileRepository, Repository};

#[derive(Parser)]
#[command(
    name = "zbb",
    version,
    about = "Zero-based monthly budgeting (50/30/20) in the terminal",
    long_about = "zbb gives every đồng of monthly income a job. Allocate income across \
                  savings, needs and wants, log transactions against those budgets and \
                  export each month to a spreadsheet."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory with default budgets
    Init,

    /// Show or change configuration
    Config {
        /// Enable or disable the debt transaction type
        #[arg(long)]
        debt_tracking: Option<bool>,
        /// Currency symbol shown after amounts
        #[arg(long)]
        currency: Option<String>,
        /// Default directory for exports
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(zbb_cli::cli::TransactionCommands),

    /// Budget allocation commands
    #[command(subcommand)]
    Budget(zbb_cli::cli::BudgetCommands),

    /// Category commands
    #[command(subcommand)]
    Category(zbb_cli::cli::CategoryCommands),

    /// Show the month's totals and allocation balance
    Summary {
        /// Month to show (e.g. "2025-06"), defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },

    /// Export the month to a SpreadsheetML workbook (.xls)
    Export {
        /// Directory to write the workbook into
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Month to export (e.g. "2025-06"), defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = ZbbPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let open_session = |settings: &Settings| -> Result<BudgetSession<JsonFileRepository>> {
        let repo = JsonFileRepository::open(&paths)?;
        Ok(BudgetSession::open(repo, settings.catalog(), SystemClock)
            .with_audit(AuditLogger::new(paths.audit_log())))
    };

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing zbb at: {}", paths.base_dir().display());
            let repo = JsonFileRepository::open(&paths)?;
            let budgets = repo.load_budgets();
            repo.save_budgets(&budgets)?;
            settings.save(&paths)?;

            println!("Initialization complete!");
            println!();
            println!("Default monthly budgets ({} total):", budgets.total());
            println!("  - Tiết Kiệm (20%): savings fund, debt principal");
            println!("  - Thiết Yếu (50%): rent, utilities, groceries, transport");
            println!("  - Giải Trí (30%): dining out, health, entertainment, shopping");
            println!();
            println!("Run 'zbb budget show' to review them.");
        }
        Some(Commands::Config {
            debt_tracking,
            currency,
            export_dir,
        }) => {
            let changed = debt_tracking.is_some() || currency.is_some() || export_dir.is_some();
            if let Some(enabled) = debt_tracking {
                settings.debt_tracking = enabled;
            }
            if let Some(symbol) = currency {
                settings.currency_symbol = symbol;
            }
            if let Some(dir) = export_dir {
                settings.export_dir = Some(dir);
            }
            if changed {
                settings.save(&paths)?;
                println!("Configuration saved.");
                println!();
            }

            println!("zbb Configuration");
            println!("=================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Debt tracking:   {}", settings.debt_tracking);
            match &settings.export_dir {
                Some(dir) => println!("  Export dir:      {}", dir.display()),
                None => println!("  Export dir:      (current directory)"),
            }

            let months = JsonFileRepository::open(&paths)?.list_months();
            if !months.is_empty() {
                let labels: Vec<String> = months.iter().map(|m| m.label()).collect();
                println!();
                println!("Stored months: {}", labels.join(", "));
            }
        }
        Some(Commands::Transaction(cmd)) => {
            let mut session = open_session(&settings)?;
            handle_transaction_command(&mut session, &settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            let mut session = open_session(&settings)?;
            handle_budget_command(&mut session, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&settings.catalog(), cmd)?;
        }
        Some(Commands::Summary { month }) => {
            let session = open_session(&settings)?;
            handle_summary_command(&session, &settings, month)?;
        }
        Some(Commands::Export { output_dir, month }) => {
            let session = open_session(&settings)?;
            handle_export_command(&session, &settings, output_dir, month)?;
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&AuditLogger::new(paths.audit_log()), limit)?;
        }
        None => {
            println!("zbb - zero-based monthly budgeting");
            println!();
            println!("Run 'zbb --help' for usage information.");
            if paths.is_initialized() {
                println!("Run 'zbb summary' to see this month at a glance.");
            } else {
                println!("Run 'zbb init' to get started.");
            }
        }
    }

    Ok(())
}
