//! Clinicbot CLI
//!
//! Usage:
//!   clinicbot --serve                                   # Action server (default)
//!   clinicbot --init-db                                 # Create the audit table and exit
//!   clinicbot --logs --limit 20                         # Show recent audit rows
//!   clinicbot --mock-directory                          # Toy doctor directory on :8000
//!   clinicbot --action action_symptom_check --entity symptom=fever
//!                                                       # Run one action locally

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use clinicbot::config::{default_log_filter, Config};
use clinicbot::core::{run_mock_directory, run_server, ActionDispatcher, AuditStore, DirectoryClient};
use clinicbot::types::{ActionName, StoredRecord, Turn};
use clinicbot::{DEFAULT_ACTION_ADDR, DEFAULT_DB_PATH, DEFAULT_DIRECTORY_ADDR, DEFAULT_DIRECTORY_URL, VERSION};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(
    name = "clinicbot",
    version = VERSION,
    about = "Clinicbot - action server for a hospital appointment assistant",
    long_about = "Clinicbot runs the custom actions of a hospital appointment assistant.\n\n\
                  The dialogue engine posts each action call to /webhook; actions\n\
                  validate the booking form, answer symptom questions, look doctors\n\
                  up in the directory service and append an audit row per turn.\n\n\
                  Modes:\n  \
                  --serve           Action server (default)\n  \
                  --init-db         Create the audit table and exit\n  \
                  --logs            Print recent audit rows\n  \
                  --mock-directory  Toy doctor directory service\n  \
                  --action NAME     Run one action against a turn built from flags"
)]
struct Args {
    /// Run the action server
    #[arg(short, long)]
    serve: bool,

    /// Create the audit table if missing, then exit
    #[arg(long)]
    init_db: bool,

    /// Print the most recent audit rows
    #[arg(short, long)]
    logs: bool,

    /// Number of rows for --logs
    #[arg(long, default_value_t = 50)]
    limit: usize,

    /// Run the toy doctor directory
    #[arg(long)]
    mock_directory: bool,

    /// Run a single action (e.g. action_doctor_info)
    #[arg(short, long)]
    action: Option<String>,

    /// Intent for --action
    #[arg(long, default_value = "cli")]
    intent: String,

    /// User text for --action
    #[arg(short, long, default_value = "")]
    text: String,

    /// Slot for --action, as name=value (repeatable)
    #[arg(long = "slot", value_parser = parse_pair)]
    slots: Vec<(String, String)>,

    /// Entity for --action, as entity=value (repeatable)
    #[arg(long = "entity", value_parser = parse_pair)]
    entities: Vec<(String, String)>,

    /// Server address
    #[arg(long, env = "ACTION_SERVER_ADDR", default_value = DEFAULT_ACTION_ADDR)]
    addr: String,

    /// Mock directory address
    #[arg(long, default_value = DEFAULT_DIRECTORY_ADDR)]
    directory_addr: String,

    /// Doctor directory base URL
    #[arg(long, env = "DOCTOR_API_BASE", default_value = DEFAULT_DIRECTORY_URL)]
    directory_url: String,

    /// Audit database file
    #[arg(long, env = "DB_PATH", default_value = DEFAULT_DB_PATH)]
    db_path: PathBuf,

    /// Directory lookup timeout (milliseconds)
    #[arg(long, default_value_t = clinicbot::LOOKUP_TIMEOUT_MS)]
    lookup_timeout_ms: u64,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            directory_url: self.directory_url.clone(),
            db_path: self.db_path.clone(),
            addr: self.addr.clone(),
            lookup_timeout: Duration::from_millis(self.lookup_timeout_ms),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_log_filter())),
        )
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let result = if args.init_db {
        run_init_db(&args)
    } else if args.logs {
        run_logs(&args)
    } else if args.mock_directory {
        run_mock_directory(&args.directory_addr).await
    } else if let Some(ref action) = args.action {
        run_single(action, &args).await
    } else {
        run_serve(&args).await
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Parse `name=value`
fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

/// Create the audit table
fn run_init_db(args: &Args) -> CliResult {
    AuditStore::new(&args.db_path).ensure_schema()?;
    println!("{} audit table ready in {}", "✓".green(), args.db_path.display());
    Ok(())
}

/// Print recent audit rows
fn run_logs(args: &Args) -> CliResult {
    let rows = AuditStore::new(&args.db_path).recent(args.limit)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("{}", "No audit rows yet.".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:>5}  {:<19}  {:<22}  {:<12}  {:<10}  {:<6}  {:<12}  {:<12}  {}",
            "id", "timestamp", "intent", "department", "date", "time", "doctor", "symptom", "message"
        )
        .bold()
    );
    for row in &rows {
        print_row(row);
    }
    Ok(())
}

fn print_row(row: &StoredRecord) {
    let r = &row.record;
    let cell = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    println!(
        "{:>5}  {:<19}  {:<22}  {:<12}  {:<10}  {:<6}  {:<12}  {:<12}  {}",
        row.id.to_string().cyan(),
        r.timestamp,
        cell(&r.intent),
        cell(&r.department),
        cell(&r.date),
        cell(&r.time),
        cell(&r.doctor),
        cell(&r.symptom),
        cell(&r.user_message).dimmed()
    );
}

/// Run one action against a turn built from the command line
async fn run_single(action: &str, args: &Args) -> CliResult {
    let action = ActionName::from_name(action).ok_or_else(|| format!("unknown action '{action}'"))?;
    let config = args.config();

    let store = AuditStore::new(&config.db_path);
    store.ensure_schema()?;
    let directory = DirectoryClient::new(&config.directory_url, config.lookup_timeout)?;
    let dispatcher = ActionDispatcher::new(directory, store);

    let mut turn = Turn::new(&args.intent, &args.text);
    for (name, value) in &args.slots {
        turn = turn.with_slot(name, value);
    }
    for (entity, value) in &args.entities {
        turn = turn.with_entity(entity, value);
    }

    let outcome = dispatcher.dispatch(action, &turn).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    for reply in &outcome.replies {
        println!("{} {}", "bot>".green().bold(), reply);
    }
    for event in &outcome.events {
        println!(
            "{}",
            format!("  slot {} = {}", event.name, event.value.as_deref().unwrap_or("null")).dimmed()
        );
    }
    if outcome.record.is_some() {
        println!("{}", format!("  logged to {}", config.db_path.display()).dimmed());
    }
    Ok(())
}

/// Run the action server
async fn run_serve(args: &Args) -> CliResult {
    println!("{} v{}", "Clinicbot action server".bold(), VERSION);
    run_server(&args.config()).await
}
