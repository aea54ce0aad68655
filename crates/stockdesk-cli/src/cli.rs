//! Command-line front-end over the Stockdesk stores.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use stockdesk_config::ClientConfig;
use stockdesk_telemetry::{CommandContextGuard, LogFormat, LoggingConfig, init_logging};
use tracing::debug;

use crate::client::{CliContext, CliError, CliResult};
use crate::commands::activity::{
    handle_audit_logs, handle_dashboard, handle_notifications_list, handle_notifications_read,
};
use crate::commands::auth::{handle_login, handle_logout, handle_whoami};
use crate::commands::ledger::{
    handle_payment_status, handle_transaction_item_status, handle_transaction_status,
};
use crate::commands::matrix::{handle_matrix_show, handle_matrix_toggle};
use crate::commands::navigation::handle_nav;
use crate::commands::resources::{
    handle_action, handle_create, handle_import, handle_list, handle_update,
};

const SESSION_DIR: &str = ".stockdesk";
const SESSION_FILE: &str = "session.json";

/// Parses CLI arguments, executes the requested command, and prints any
/// failure. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            return err.exit_code();
        }
    };

    let logging = LoggingConfig {
        level: &config.log_level,
        format: cli.log_format,
        build_sha: option_env!("STOCKDESK_BUILD_SHA").unwrap_or("dev"),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: logging disabled: {err}");
    }
    let _context = CommandContextGuard::new(command_label(&cli.command));
    debug!(api_url = %config.api_url, "dispatching command");

    match dispatch(cli.command, config, cli.output).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

pub(crate) async fn dispatch(
    command: Command,
    config: ClientConfig,
    output: OutputFormat,
) -> CliResult<()> {
    let ctx = CliContext::connect(config, output).await?;
    match command {
        Command::Login(args) => handle_login(&ctx, args).await,
        Command::Logout => handle_logout(&ctx).await,
        Command::Whoami => handle_whoami(&ctx),
        Command::Ls(args) => handle_list(&ctx, args).await,
        Command::Create(args) => handle_create(&ctx, args).await,
        Command::Update(args) => handle_update(&ctx, args).await,
        Command::Action(args) => handle_action(&ctx, args).await,
        Command::Import(args) => handle_import(&ctx, args).await,
        Command::Transaction(command) => match command {
            TransactionCommand::ItemStatus(args) => {
                handle_transaction_item_status(&ctx, args).await
            }
            TransactionCommand::Status(args) => handle_transaction_status(&ctx, args).await,
        },
        Command::Payment(command) => match command {
            PaymentCommand::Status(args) => handle_payment_status(&ctx, args).await,
        },
        Command::AuditLogs(args) => handle_audit_logs(&ctx, args).await,
        Command::Notifications(command) => match command {
            NotificationCommand::List(args) => handle_notifications_list(&ctx, args).await,
            NotificationCommand::Read(args) => handle_notifications_read(&ctx, args).await,
        },
        Command::Dashboard => handle_dashboard(&ctx).await,
        Command::Matrix(command) => match command {
            MatrixCommand::Show(args) => handle_matrix_show(&ctx, args).await,
            MatrixCommand::Toggle(args) => handle_matrix_toggle(&ctx, args).await,
        },
        Command::Nav(args) => handle_nav(&args, ctx.output),
    }
}

#[derive(Parser)]
#[command(
    name = "stockdesk",
    about = "Administrative CLI for the Stockdesk inventory backend"
)]
pub(crate) struct Cli {
    #[arg(long, global = true, help = "Backend base URL including the API prefix")]
    pub(crate) api_url: Option<String>,
    #[arg(long, global = true, help = "Where the session is kept between runs")]
    pub(crate) session_file: Option<PathBuf>,
    #[arg(long, global = true, help = "Default rows per page")]
    pub(crate) per_page: Option<u32>,
    #[arg(long, global = true, help = "HTTP timeout in seconds")]
    pub(crate) timeout: Option<u64>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        env = "STOCKDESK_OUTPUT",
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[arg(
        long,
        global = true,
        env = "STOCKDESK_LOG_FORMAT",
        value_parser = parse_log_format,
        default_value = "compact"
    )]
    pub(crate) log_format: LogFormat,
    #[arg(long, global = true, help = "Log level directive (RUST_LOG wins)")]
    pub(crate) log_level: Option<String>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Sign in and keep the session for later commands.
    Login(LoginArgs),
    /// Drop the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// List a resource.
    Ls(ListArgs),
    /// Create a row from a JSON draft.
    Create(FileArgs),
    /// Replace a row with a JSON document.
    Update(FileArgs),
    /// Delete, restore, activate or deactivate a row.
    Action(ActionArgs),
    /// Import inventory units from a CSV file.
    Import(ImportArgs),
    #[command(subcommand)]
    Transaction(TransactionCommand),
    #[command(subcommand)]
    Payment(PaymentCommand),
    /// Page through the audit trail.
    AuditLogs(AuditLogArgs),
    #[command(subcommand)]
    Notifications(NotificationCommand),
    /// Show dashboard figures.
    Dashboard,
    #[command(subcommand)]
    Matrix(MatrixCommand),
    /// Print a navigation menu.
    Nav(NavArgs),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ResourceKind {
    Categories,
    Products,
    Inventory,
    Debtors,
    Suppliers,
    Users,
    Roles,
    Permissions,
    Transactions,
    Payments,
    Collectors,
}

impl ResourceKind {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Products => "products",
            Self::Inventory => "inventory",
            Self::Debtors => "debtors",
            Self::Suppliers => "suppliers",
            Self::Users => "users",
            Self::Roles => "roles",
            Self::Permissions => "permissions",
            Self::Transactions => "transactions",
            Self::Payments => "payments",
            Self::Collectors => "collectors",
        }
    }
}

#[derive(Args)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long, env = "STOCKDESK_PASSWORD", hide_env_values = true)]
    pub(crate) password: Option<String>,
}

#[derive(Args)]
pub(crate) struct ListArgs {
    #[arg(value_enum)]
    pub(crate) resource: ResourceKind,
    #[arg(long, value_parser = page_number)]
    pub(crate) page: Option<u32>,
    #[arg(long, value_parser = page_number)]
    pub(crate) per_page: Option<u32>,
    #[arg(long, help = "List only active rows")]
    pub(crate) active: bool,
}

#[derive(Args)]
pub(crate) struct FileArgs {
    #[arg(value_enum)]
    pub(crate) resource: ResourceKind,
    #[arg(short = 'f', long = "file")]
    pub(crate) file: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum RowAction {
    Delete,
    Restore,
    Activate,
    Deactivate,
}

#[derive(Args)]
pub(crate) struct ActionArgs {
    #[arg(value_enum)]
    pub(crate) resource: ResourceKind,
    #[arg(value_enum)]
    pub(crate) action: RowAction,
    #[arg(help = "Row identifier")]
    pub(crate) id: String,
}

#[derive(Args)]
pub(crate) struct ImportArgs {
    #[arg(help = "CSV file of inventory units")]
    pub(crate) file: PathBuf,
}

#[derive(Subcommand)]
pub(crate) enum TransactionCommand {
    /// Change the status of one transaction line.
    ItemStatus(StatusArgs),
    /// Change the status of a whole transaction.
    Status(StatusArgs),
}

#[derive(Subcommand)]
pub(crate) enum PaymentCommand {
    /// Change the status of a payment.
    Status(StatusArgs),
}

#[derive(Args)]
pub(crate) struct StatusArgs {
    #[arg(help = "Row identifier")]
    pub(crate) id: String,
    #[arg(long)]
    pub(crate) status: String,
}

#[derive(Args)]
pub(crate) struct AuditLogArgs {
    #[arg(long, value_parser = page_number)]
    pub(crate) page: Option<u32>,
    #[arg(long, value_parser = page_number)]
    pub(crate) per_page: Option<u32>,
    #[arg(long, help = "First day to include (YYYY-MM-DD)")]
    pub(crate) from: Option<NaiveDate>,
    #[arg(long, help = "Last day to include (YYYY-MM-DD)")]
    pub(crate) to: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub(crate) enum NotificationCommand {
    /// List a page of notifications.
    List(NotificationPageArgs),
    /// Mark a notification as read.
    Read(NotificationReadArgs),
}

#[derive(Args)]
pub(crate) struct NotificationPageArgs {
    #[arg(long, default_value_t = 1, value_parser = page_number)]
    pub(crate) page: u32,
}

#[derive(Args)]
pub(crate) struct NotificationReadArgs {
    pub(crate) uuid: String,
    #[arg(
        long,
        default_value_t = 1,
        value_parser = page_number,
        help = "Page the notification is on"
    )]
    pub(crate) page: u32,
}

#[derive(Subcommand)]
pub(crate) enum MatrixCommand {
    /// Show grants for a page of permissions.
    Show(MatrixPageArgs),
    /// Grant or revoke a permission for a role.
    Toggle(MatrixToggleArgs),
}

#[derive(Args)]
pub(crate) struct MatrixPageArgs {
    #[arg(long, default_value_t = 1, value_parser = page_number)]
    pub(crate) page: u32,
    #[arg(long, value_parser = page_number)]
    pub(crate) per_page: Option<u32>,
}

#[derive(Args)]
pub(crate) struct MatrixToggleArgs {
    pub(crate) role: String,
    pub(crate) permission: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum MenuLayout {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Args)]
pub(crate) struct NavArgs {
    #[arg(long, value_enum, default_value_t = MenuLayout::Horizontal)]
    pub(crate) layout: MenuLayout,
    #[arg(long, help = "Print only the title of this route")]
    pub(crate) route: Option<String>,
}

fn page_number(value: &str) -> Result<u32, String> {
    match value.parse::<u32>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(number) => Ok(number),
        Err(err) => Err(err.to_string()),
    }
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    LogFormat::from_str(value).map_err(|err| err.to_string())
}

/// Layer flag overrides on top of file and environment configuration.
pub(crate) fn resolve_config(cli: &Cli) -> CliResult<ClientConfig> {
    let base = stockdesk_config::load().map_err(|err| {
        CliError::failure(anyhow::Error::new(err).context("failed to load configuration"))
    })?;
    apply_overrides(base, cli, env::var_os("HOME").map(PathBuf::from))
}

fn apply_overrides(
    mut config: ClientConfig,
    cli: &Cli,
    home: Option<PathBuf>,
) -> CliResult<ClientConfig> {
    if let Some(api_url) = &cli.api_url {
        config.api_url.clone_from(api_url);
    }
    if let Some(per_page) = cli.per_page {
        config.per_page = per_page;
    }
    if let Some(timeout) = cli.timeout {
        config.http_timeout_secs = timeout;
    }
    if let Some(level) = &cli.log_level {
        config.log_level.clone_from(level);
    }
    if let Some(path) = &cli.session_file {
        config.session_file = Some(path.clone());
    }
    if config.session_file.is_none() {
        config.session_file = home.map(|home| home.join(SESSION_DIR).join(SESSION_FILE));
    }
    stockdesk_config::validate(&config)
        .map_err(|err| CliError::validation(format!("invalid option: {err}")))?;
    Ok(config)
}

pub(crate) const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Login(_) => "login",
        Command::Logout => "logout",
        Command::Whoami => "whoami",
        Command::Ls(_) => "ls",
        Command::Create(_) => "create",
        Command::Update(_) => "update",
        Command::Action(_) => "action",
        Command::Import(_) => "import",
        Command::Transaction(TransactionCommand::ItemStatus(_)) => "transaction_item_status",
        Command::Transaction(TransactionCommand::Status(_)) => "transaction_status",
        Command::Payment(PaymentCommand::Status(_)) => "payment_status",
        Command::AuditLogs(_) => "audit_logs",
        Command::Notifications(NotificationCommand::List(_)) => "notifications_list",
        Command::Notifications(NotificationCommand::Read(_)) => "notifications_read",
        Command::Dashboard => "dashboard",
        Command::Matrix(MatrixCommand::Show(_)) => "matrix_show",
        Command::Matrix(MatrixCommand::Toggle(_)) => "matrix_toggle",
        Command::Nav(_) => "nav",
    }
}
