use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "khata",
    about = "Khata — customer credit ledger for a small retail shop",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the ledger files (and optional khata.toml)
    #[arg(long, global = true, default_value = ".")]
    pub data_dir: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register a customer with an opening credit amount
    New(NewArgs),
    /// Record further credit (the customer owes more)
    Due(TransactArgs),
    /// Record a payment received
    Pay(TransactArgs),
    /// List customers and outstanding balances
    List(ListArgs),
    /// Show one customer's history with running balances
    History(CustomerArgs),
    /// Delete one transaction entry and its paired cash entry
    DropEntry(DropEntryArgs),
    /// Delete a customer and every paired cash entry
    Drop(CustomerArgs),
    /// List cash drawer movements
    Drawer(DrawerArgs),
    /// Audit the due ledger against the cash drawer
    Reconcile(ReconcileArgs),
}

#[derive(Args)]
pub struct NewArgs {
    /// Customer name
    pub name: String,
    /// Opening credit amount
    pub amount: String,
    #[arg(short, long)]
    pub mobile: Option<String>,
    /// Business date; defaults to today, may be back-dated
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct TransactArgs {
    /// Customer name or id prefix
    pub customer: String,
    pub amount: String,
    /// Business date; defaults to today, may be back-dated
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Filter by name or mobile substring
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct CustomerArgs {
    /// Customer name or id prefix
    pub customer: String,
}

#[derive(Args)]
pub struct DropEntryArgs {
    /// Customer name or id prefix
    pub customer: String,
    /// Log entry id (or unambiguous prefix)
    pub entry: String,
}

#[derive(Args)]
pub struct DrawerArgs {}

#[derive(Args)]
pub struct ReconcileArgs {
    /// Repair what the audit finds
    #[arg(long)]
    pub repair: bool,
}
