//! These structs provide the CLI interface for the zenwealth CLI.

use crate::import::ImportMode;
use crate::model::{Amount, TransactionType};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// zenwealth: a local-only personal finance tracker.
///
/// Record your income and expenses, see where the money goes, and get simple budgeting
/// suggestions. Everything is kept in a directory on your machine (by default ~/zenwealth); run
/// `zenwealth init` once to create it.
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
    /// Create the data directory and the default configuration file.
    ///
    /// This is the first command you should run. By default the data directory is
    /// $HOME/zenwealth; pass --zenwealth-home or set ZENWEALTH_HOME to put it somewhere else.
    Init,
    /// Record a new income or expense.
    Add(AddArgs),
    /// Delete a transaction by ID. Asks for confirmation unless --yes is given.
    Delete(DeleteArgs),
    /// List transactions, newest first.
    List(ListArgs),
    /// Show total income, total expenses and the balance.
    Summary,
    /// Show budgeting suggestions based on your transactions.
    Insights,
    /// Show totals per category or per month.
    Breakdown(BreakdownArgs),
    /// List the built-in categories.
    Categories(CategoriesArgs),
    /// Write all transactions to a JSON file.
    Export(ExportArgs),
    /// Replace all transactions with the contents of a JSON file written by `export`.
    Import(ImportArgs),
    /// Delete every transaction. Asks for confirmation unless --yes is given.
    Clear(ClearArgs),
    /// Print the JSON Schema of a stored transaction record.
    Schema,
}

/// How command results are written to stdout.
#[derive(
    Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// A human-readable message.
    #[default]
    Text,
    /// The structured result as pretty-printed JSON.
    Json,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where zenwealth data and configuration is held. Defaults to ~/zenwealth
    #[arg(long, env = "ZENWEALTH_HOME", default_value_t = default_zenwealth_home())]
    zenwealth_home: DisplayPath,

    /// How to print results: text or json.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Common {
    pub fn new(log_level: LevelFilter, zenwealth_home: PathBuf, format: OutputFormat) -> Self {
        Self {
            log_level,
            zenwealth_home: zenwealth_home.into(),
            format,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn zenwealth_home(&self) -> &DisplayPath {
        &self.zenwealth_home
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// Args for the `zenwealth add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// Whether this is income or an expense.
    #[arg(long = "type", value_enum)]
    r#type: TransactionType,

    /// The amount, e.g. 12.50 or $1,200.00. Must be greater than zero.
    #[arg(long)]
    amount: Amount,

    /// The category, e.g. "Food & Dining" or "Salary". See `zenwealth categories`.
    #[arg(long)]
    category: String,

    /// A short description.
    #[arg(long, default_value = "")]
    description: String,

    /// The date in YYYY-MM-DD format. Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl AddArgs {
    pub fn new(
        r#type: TransactionType,
        amount: Amount,
        category: impl Into<String>,
        description: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            r#type,
            amount,
            category: category.into(),
            description: description.into(),
            date,
        }
    }

    pub fn r#type(&self) -> TransactionType {
        self.r#type
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

/// Args for the `zenwealth delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The ID of the transaction to delete.
    id: String,

    /// Do not ask for confirmation.
    #[arg(long, short = 'y')]
    yes: bool,
}

impl DeleteArgs {
    pub fn new(id: impl Into<String>, yes: bool) -> Self {
        Self { id: id.into(), yes }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

/// Args for the `zenwealth list` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ListArgs {
    /// Only show transactions of this type.
    #[arg(long = "type", value_enum)]
    r#type: Option<TransactionType>,

    /// Only show transactions in this category.
    #[arg(long)]
    category: Option<String>,

    /// Show at most this many transactions.
    #[arg(long)]
    limit: Option<usize>,
}

impl ListArgs {
    pub fn new(
        r#type: Option<TransactionType>,
        category: Option<String>,
        limit: Option<usize>,
    ) -> Self {
        Self {
            r#type,
            category,
            limit,
        }
    }

    pub fn r#type(&self) -> Option<TransactionType> {
        self.r#type
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// Args for the `zenwealth breakdown` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct BreakdownArgs {
    /// Which transactions to break down by category.
    #[arg(long = "type", value_enum, default_value_t = TransactionType::Expense)]
    r#type: TransactionType,

    /// Break down income and expenses by month instead of by category.
    #[arg(long)]
    monthly: bool,
}

impl BreakdownArgs {
    pub fn new(r#type: TransactionType, monthly: bool) -> Self {
        Self { r#type, monthly }
    }

    pub fn r#type(&self) -> TransactionType {
        self.r#type
    }

    pub fn monthly(&self) -> bool {
        self.monthly
    }
}

/// Args for the `zenwealth categories` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct CategoriesArgs {
    /// Only show categories for this type.
    #[arg(long = "type", value_enum)]
    r#type: Option<TransactionType>,
}

impl CategoriesArgs {
    pub fn new(r#type: Option<TransactionType>) -> Self {
        Self { r#type }
    }

    pub fn r#type(&self) -> Option<TransactionType> {
        self.r#type
    }
}

/// Args for the `zenwealth export` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ExportArgs {
    /// Where to write the file. Defaults to a dated file in $ZENWEALTH_HOME/.backups, where old
    /// exports are rotated out.
    #[arg(long)]
    out: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(out: Option<PathBuf>) -> Self {
        Self { out }
    }

    pub fn out(&self) -> Option<&Path> {
        self.out.as_deref()
    }
}

/// Args for the `zenwealth import` command.
#[derive(Debug, Parser, Clone)]
pub struct ImportArgs {
    /// The JSON file to import.
    file: PathBuf,

    /// Override the `import_mode` from config.json: strict or lenient.
    #[arg(long, value_enum)]
    mode: Option<ImportMode>,
}

impl ImportArgs {
    pub fn new(file: impl Into<PathBuf>, mode: Option<ImportMode>) -> Self {
        Self {
            file: file.into(),
            mode,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn mode(&self) -> Option<ImportMode> {
        self.mode
    }
}

/// Args for the `zenwealth clear` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ClearArgs {
    /// Do not ask for confirmation.
    #[arg(long, short = 'y')]
    yes: bool,
}

impl ClearArgs {
    pub fn new(yes: bool) -> Self {
        Self { yes }
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

fn default_zenwealth_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("zenwealth"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --zenwealth-home or ZENWEALTH_HOME instead of relying on the \
                default directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("zenwealth")
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
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cli_definition() {
        <Args as CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let args = Args::try_parse_from([
            "zenwealth",
            "--zenwealth-home",
            "/tmp/zw",
            "add",
            "--type",
            "expense",
            "--amount",
            "$1,200.50",
            "--category",
            "Rent/Mortgage",
            "--date",
            "2025-03-01",
        ])
        .unwrap();
        assert_eq!(args.common().zenwealth_home().path(), Path::new("/tmp/zw"));
        match args.command() {
            Command::Add(add) => {
                assert_eq!(add.r#type(), TransactionType::Expense);
                assert_eq!(add.amount().value(), dec!(1200.50));
                assert_eq!(add.category(), "Rent/Mortgage");
                assert_eq!(add.description(), "");
                assert_eq!(add.date(), NaiveDate::from_ymd_opt(2025, 3, 1));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_bad_date() {
        let result = Args::try_parse_from([
            "zenwealth",
            "add",
            "--type",
            "income",
            "--amount",
            "10",
            "--category",
            "Salary",
            "--date",
            "03/01/2025",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_format_and_delete() {
        let args =
            Args::try_parse_from(["zenwealth", "--format", "json", "delete", "abc", "-y"]).unwrap();
        assert_eq!(args.common().format(), OutputFormat::Json);
        match args.command() {
            Command::Delete(d) => {
                assert_eq!(d.id(), "abc");
                assert!(d.yes());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
