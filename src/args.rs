//! These structs provide the CLI interface for the centavo CLI.

use crate::model::TransactionKind;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// centavo: A command-line personal finance tracker.
///
/// Record income and expense transactions into a local ledger, then view balances, monthly
/// trends and category-based spending reports. All data lives on this device in a plain JSON
/// datastore under the centavo home directory; there is no account, no server and no sync.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Record a new transaction in the ledger.
    Add(AddArgs),
    /// Replace the fields of an existing transaction, keeping its id.
    Update(UpdateArgs),
    /// Delete a transaction by id. Deleting an id that does not exist is not an error.
    Remove(RemoveArgs),
    /// Delete every transaction and its persisted copy. Requires --yes.
    Clear(ClearArgs),
    /// List transactions, most recent first.
    List(ListArgs),
    /// Show the overall balance and the income and expense totals.
    Summary,
    /// Show a per-month report: totals, category breakdown and top expenses.
    Report(ReportArgs),
    /// Show the monthly expense trend for the last N months.
    Trend(TrendArgs),
    /// Export the full ledger to an indented JSON file.
    Export(ExportArgs),
    /// Show or set the display currency.
    Currency(CurrencyArgs),
    /// Show or change the notification and dark-mode preferences.
    Settings(SettingsArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where centavo data is held. Defaults to ~/centavo
    #[arg(long, env = "CENTAVO_HOME", default_value_t = default_centavo_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Args for the `centavo add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// The amount as a non-negative magnitude, e.g. 40 or $1,250.50. Whether it adds to or
    /// subtracts from the balance is controlled by --kind.
    #[arg(long)]
    amount: String,

    /// A free-text category label, e.g. Food or Transport.
    #[arg(long)]
    category: String,

    /// Whether this is income or an expense.
    #[arg(long, value_enum, default_value_t = TransactionKind::Expense)]
    kind: TransactionKind,

    /// The transaction date, either RFC 3339 or YYYY-MM-DD. Defaults to now.
    #[arg(long)]
    date: Option<String>,

    /// An optional free-text description.
    #[arg(long)]
    description: Option<String>,
}

impl AddArgs {
    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Args for the `centavo update` command.
#[derive(Debug, Parser, Clone)]
pub struct UpdateArgs {
    /// The id of the transaction to replace.
    id: String,

    #[clap(flatten)]
    fields: AddArgs,
}

impl UpdateArgs {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> &AddArgs {
        &self.fields
    }
}

/// Args for the `centavo remove` command.
#[derive(Debug, Parser, Clone)]
pub struct RemoveArgs {
    /// The id of the transaction to delete.
    id: String,
}

impl RemoveArgs {
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Args for the `centavo clear` command.
#[derive(Debug, Parser, Clone)]
pub struct ClearArgs {
    /// Confirm that every transaction should be deleted. This cannot be undone.
    #[arg(long)]
    yes: bool,
}

impl ClearArgs {
    pub fn yes(&self) -> bool {
        self.yes
    }
}

/// Args for the `centavo list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// Only show transactions in this calendar month (1-12). Requires --year.
    #[arg(long, requires = "year")]
    month: Option<u32>,

    /// Only show transactions in this calendar year.
    #[arg(long)]
    year: Option<i32>,

    /// Show at most this many transactions.
    #[arg(long)]
    limit: Option<usize>,
}

impl ListArgs {
    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// Args for the `centavo report` command.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// The calendar month to report on (1-12). Defaults to the current month.
    #[arg(long)]
    month: Option<u32>,

    /// The calendar year to report on. Defaults to the current year.
    #[arg(long)]
    year: Option<i32>,
}

impl ReportArgs {
    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }
}

/// Args for the `centavo trend` command.
#[derive(Debug, Parser, Clone)]
pub struct TrendArgs {
    /// How many months to include, ending with the current month.
    #[arg(long, default_value_t = 6)]
    months: u32,
}

impl TrendArgs {
    pub fn months(&self) -> u32 {
        self.months
    }
}

/// Args for the `centavo export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// The directory to write the export into. Defaults to the exports directory in the
    /// centavo home.
    #[arg(long)]
    out: Option<PathBuf>,
}

impl ExportArgs {
    pub fn out(&self) -> Option<&Path> {
        self.out.as_deref()
    }
}

/// Args for the `centavo currency` command.
#[derive(Debug, Parser, Clone)]
pub struct CurrencyArgs {
    /// The currency code to switch to, e.g. USD or COP. Omit to show the current currency.
    code: Option<String>,
}

impl CurrencyArgs {
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

/// Args for the `centavo settings` command.
#[derive(Debug, Parser, Clone)]
pub struct SettingsArgs {
    /// Turn notifications on or off.
    #[arg(long)]
    notifications: Option<bool>,

    /// Turn dark mode on or off.
    #[arg(long)]
    dark_mode: Option<bool>,
}

impl SettingsArgs {
    pub fn notifications(&self) -> Option<bool> {
        self.notifications
    }

    pub fn dark_mode(&self) -> Option<bool> {
        self.dark_mode
    }
}

fn default_centavo_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("centavo"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or CENTAVO_HOME instead of relying on the default \
                centavo home directory. If you continue using the program right now, you may \
                have problems!",
            );
            PathBuf::from("centavo")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
