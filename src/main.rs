use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rhcli::{
    api::{DEFAULT_EMPLOYEES_PER_PAGE, DEFAULT_LEAVES_PER_PAGE},
    cli, config, error,
    types::{ShiftKind, SummaryFilter},
    utils::{self, Field},
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Increase diagnostic output on stderr (-v info, -vv debug)
    #[clap(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in and store the session
    Login(LoginOptions),

    /// Sign out and remove the stored session
    Logout,

    /// Show the signed-in user
    Me,

    /// Change the signed-in user's password
    Password(PasswordOptions),

    /// List the screens available to your role
    Menu,

    /// Manage work shifts
    Shifts(ShiftsOptions),

    /// Handle departments
    Departments(DepartmentsOptions),

    /// Handle staff
    Employees(EmployeesOptions),

    /// Handle permission requests
    Permissions(PermissionsOptions),

    /// Handle leave requests
    Leaves(LeavesOptions),

    /// Attendance summaries and auto-fill
    Attendance(AttendanceOptions),

    /// Handle weekly days off
    DayOffs(DayOffsOptions),

    /// Monthly statistics and today's situation
    Stats(StatsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct LoginOptions {
    /// Login (email or matricule)
    login: String,

    /// Password; prompted when omitted
    #[clap(long)]
    password: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PasswordOptions {
    /// The new password
    password: String,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Manage work shifts")]
pub struct ShiftsOptions {
    /// Subcommands under `shifts`; lists shifts when omitted
    #[command(subcommand)]
    pub command: Option<ShiftsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ShiftsSubcommand {
    /// List shifts
    List,

    /// Create a shift
    Add(ShiftAddOpts),

    /// Update a shift; omitted values are kept
    Edit(ShiftEditOpts),

    /// Delete a shift
    Delete(DeleteOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct ShiftAddOpts {
    /// Start time (HH:MM)
    #[clap(long)]
    pub start: String,

    /// End time (HH:MM)
    #[clap(long)]
    pub end: String,

    /// morning (matin) or evening (soir)
    #[clap(long, default_value = "morning", value_parser = utils::parse_shift_kind)]
    pub kind: ShiftKind,
}

#[derive(Parser, Debug, Clone)]
pub struct ShiftEditOpts {
    pub id: u64,

    #[clap(long)]
    pub start: Option<String>,

    #[clap(long)]
    pub end: Option<String>,

    #[clap(long, value_parser = utils::parse_shift_kind)]
    pub kind: Option<ShiftKind>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteOpts {
    pub id: u64,

    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct IdOpts {
    pub id: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct FieldsOpts {
    /// Request field as key=value; repeat a key to send a list
    #[clap(
        long = "field",
        short = 'f',
        value_parser = utils::parse_field,
        action = ArgAction::Append,
        num_args = 1
    )]
    pub fields: Vec<Field>,
}

#[derive(Parser, Debug, Clone)]
pub struct UpdateOpts {
    pub id: u64,

    #[command(flatten)]
    pub fields: FieldsOpts,
}

#[derive(Parser, Debug, Clone)]
pub struct MonthOpts {
    /// Month as YYYY-MM; the server picks the current one when omitted
    #[clap(long)]
    pub month: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SummaryOpts {
    /// daily, weekly or monthly
    #[clap(long)]
    pub period: Option<String>,

    /// Reference date (YYYY-MM-DD)
    #[clap(long)]
    pub date: Option<String>,

    #[clap(long)]
    pub page: Option<u32>,

    #[clap(long)]
    pub per_page: Option<u32>,
}

impl From<SummaryOpts> for SummaryFilter {
    fn from(opts: SummaryOpts) -> Self {
        SummaryFilter {
            period: opts.period,
            date: opts.date,
            page: opts.page,
            per_page: opts.per_page,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Handle departments",
    args_conflicts_with_subcommands = true // disallow mixing --id with subcommands
)]
pub struct DepartmentsOptions {
    /// Show a single department
    #[clap(long)]
    pub id: Option<u64>,

    #[command(subcommand)]
    pub command: Option<DepartmentsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum DepartmentsSubcommand {
    /// Update a department
    Update(UpdateOpts),

    /// Delete a department
    Delete(DeleteOpts),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Handle staff", args_conflicts_with_subcommands = true)]
pub struct EmployeesOptions {
    #[clap(long, default_value_t = 1)]
    pub page: u32,

    #[clap(long, default_value_t = DEFAULT_EMPLOYEES_PER_PAGE)]
    pub per_page: u32,

    #[command(subcommand)]
    pub command: Option<EmployeesSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum EmployeesSubcommand {
    /// Add an employee
    Add(FieldsOpts),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Handle permission requests")]
pub struct PermissionsOptions {
    /// Subcommands under `permissions`; lists requests when omitted
    #[command(subcommand)]
    pub command: Option<PermissionsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PermissionsSubcommand {
    /// List permission requests
    List,

    /// Approve a permission request
    Approve(IdOpts),

    /// Reject a permission request
    Reject(IdOpts),

    /// Request a permission for yourself
    Request(FieldsOpts),

    /// Show your own permissions
    Mine(MonthOpts),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Handle leave requests", args_conflicts_with_subcommands = true)]
pub struct LeavesOptions {
    #[clap(long, default_value_t = 1)]
    pub page: u32,

    #[clap(long, default_value_t = DEFAULT_LEAVES_PER_PAGE)]
    pub per_page: u32,

    #[command(subcommand)]
    pub command: Option<LeavesSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum LeavesSubcommand {
    /// Approve a leave request
    Approve(IdOpts),

    /// Reject a leave request
    Reject(IdOpts),

    /// Request a leave for yourself
    Request(FieldsOpts),

    /// Show your own leaves
    Mine,
}

#[derive(Parser, Debug, Clone)]
pub struct AttendanceOptions {
    #[command(subcommand)]
    pub command: AttendanceSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AttendanceSubcommand {
    /// Attendance summary of the staff
    Summary(SummaryOpts),

    /// Your own attendance summary
    Mine(SummaryOpts),

    /// Fill missing attendances
    AutoFill(FieldsOpts),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Handle weekly days off")]
pub struct DayOffsOptions {
    /// Subcommands under `day-offs`; lists days off when omitted
    #[command(subcommand)]
    pub command: Option<DayOffsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum DayOffsSubcommand {
    /// List weekly days off
    List,

    /// Staff eligible for a weekly day off
    Candidates,

    /// Assign a weekly day off
    Add(FieldsOpts),

    /// Remove a weekly day off
    Delete(DeleteOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct StatsOptions {
    #[command(subcommand)]
    pub command: StatsSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum StatsSubcommand {
    /// Monthly statistics
    Monthly(MonthOpts),

    /// Monthly attendance summary
    Summary(MonthOpts),

    /// Today's situation
    Today,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,rhcli=info".to_string(),
            _ => "info,rhcli=debug".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Login(opt) => cli::login(opt.login, opt.password).await,
        Command::Logout => cli::logout().await,
        Command::Me => cli::me().await,
        Command::Password(opt) => cli::change_password(opt.password).await,
        Command::Menu => cli::menu().await,

        Command::Shifts(opt) => match opt.command {
            None | Some(ShiftsSubcommand::List) => cli::list_shifts().await,
            Some(ShiftsSubcommand::Add(a)) => cli::add_shift(a.start, a.end, a.kind).await,
            Some(ShiftsSubcommand::Edit(e)) => cli::edit_shift(e.id, e.start, e.end, e.kind).await,
            Some(ShiftsSubcommand::Delete(d)) => cli::delete_shift(d.id, d.yes).await,
        },

        Command::Departments(opt) => match opt.command {
            Some(DepartmentsSubcommand::Update(u)) => {
                cli::manager::update_department(u.id, u.fields.fields).await
            }
            Some(DepartmentsSubcommand::Delete(d)) => {
                cli::manager::delete_department(d.id, d.yes).await
            }
            None => cli::manager::departments(opt.id).await,
        },

        Command::Employees(opt) => match opt.command {
            Some(EmployeesSubcommand::Add(f)) => cli::manager::add_employee(f.fields).await,
            None => cli::manager::employees(opt.page, opt.per_page).await,
        },

        Command::Permissions(opt) => match opt.command {
            None | Some(PermissionsSubcommand::List) => cli::manager::permissions().await,
            Some(PermissionsSubcommand::Approve(i)) => cli::manager::approve_permission(i.id).await,
            Some(PermissionsSubcommand::Reject(i)) => cli::manager::reject_permission(i.id).await,
            Some(PermissionsSubcommand::Request(f)) => {
                cli::employee::request_permission(f.fields).await
            }
            Some(PermissionsSubcommand::Mine(m)) => cli::employee::my_permissions(m.month).await,
        },

        Command::Leaves(opt) => match opt.command {
            Some(LeavesSubcommand::Approve(i)) => cli::manager::approve_leave(i.id).await,
            Some(LeavesSubcommand::Reject(i)) => cli::manager::reject_leave(i.id).await,
            Some(LeavesSubcommand::Request(f)) => cli::employee::request_leave(f.fields).await,
            Some(LeavesSubcommand::Mine) => cli::employee::my_leaves().await,
            None => cli::manager::leaves(opt.page, opt.per_page).await,
        },

        Command::Attendance(opt) => match opt.command {
            AttendanceSubcommand::Summary(s) => cli::manager::attendance_summary(s.into()).await,
            AttendanceSubcommand::Mine(s) => cli::employee::my_attendance(s.into()).await,
            AttendanceSubcommand::AutoFill(f) => cli::manager::fill_attendances(f.fields).await,
        },

        Command::DayOffs(opt) => match opt.command {
            None | Some(DayOffsSubcommand::List) => cli::manager::day_offs().await,
            Some(DayOffsSubcommand::Candidates) => cli::manager::day_off_candidates().await,
            Some(DayOffsSubcommand::Add(f)) => cli::manager::add_day_off(f.fields).await,
            Some(DayOffsSubcommand::Delete(d)) => cli::manager::delete_day_off(d.id, d.yes).await,
        },

        Command::Stats(opt) => match opt.command {
            StatsSubcommand::Monthly(m) => cli::manager::monthly_stats(m.month).await,
            StatsSubcommand::Summary(m) => cli::manager::monthly_summary(m.month).await,
            StatsSubcommand::Today => cli::manager::today().await,
        },

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
