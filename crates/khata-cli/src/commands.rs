use anyhow::{anyhow, bail};
use colored::Colorize;

use khata_drawer::{CashDrawer, JsonFileDrawer};
use khata_ledger::{statement, DueLedger};
use khata_protocol::{DueProtocol, NewCustomer, Reconciler, TracingSink};
use khata_store::JsonFileDueStore;
use khata_types::{today, LogId, LogKind, Money};

use crate::cli::*;
use crate::config::Config;

type Protocol = DueProtocol<JsonFileDueStore, JsonFileDrawer, TracingSink>;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.data_dir)?;
    let store = JsonFileDueStore::open(config.ledger_path(&cli.data_dir));
    let drawer = JsonFileDrawer::open(config.drawer_path(&cli.data_dir));
    let mut protocol = DueProtocol::new(store, drawer, TracingSink);
    protocol.refresh().await?;

    match cli.command {
        Command::New(args) => cmd_new(&mut protocol, &config, args).await,
        Command::Due(args) => cmd_transact(&mut protocol, &config, args, LogKind::Due).await,
        Command::Pay(args) => cmd_transact(&mut protocol, &config, args, LogKind::Add).await,
        Command::List(args) => cmd_list(&protocol, &config, args),
        Command::History(args) => cmd_history(&protocol, &config, args),
        Command::DropEntry(args) => cmd_drop_entry(&mut protocol, args).await,
        Command::Drop(args) => cmd_drop(&mut protocol, args).await,
        Command::Drawer(_) => cmd_drawer(&protocol, &config).await,
        Command::Reconcile(args) => cmd_reconcile(&protocol, args).await,
    }
}

async fn cmd_new(protocol: &mut Protocol, config: &Config, args: NewArgs) -> anyhow::Result<()> {
    let amount: Money = args.amount.parse()?;
    let id = protocol
        .new_customer(NewCustomer {
            name: args.name.clone(),
            mobile: args.mobile,
            image: None,
            initial_amount: amount,
            date: args.date.unwrap_or_else(today),
        })
        .await?;
    println!(
        "{} Added {} ({}) owing {}",
        "✓".green().bold(),
        args.name.bold(),
        id.short_id().dimmed(),
        money(config, amount).red()
    );
    Ok(())
}

async fn cmd_transact(
    protocol: &mut Protocol,
    config: &Config,
    args: TransactArgs,
    kind: LogKind,
) -> anyhow::Result<()> {
    let amount: Money = args.amount.parse()?;
    let customer = resolve_customer(protocol.customers(), &args.customer)?;
    let (id, name) = (customer.id, customer.customer_name.clone());

    protocol
        .add_transaction(id, kind, amount, args.date.unwrap_or_else(today))
        .await?;

    let record = protocol
        .selected()
        .ok_or_else(|| anyhow!("customer disappeared after refresh"))?;
    let action = match kind {
        LogKind::Due => format!("{} took", name.bold()),
        LogKind::Add => format!("{} paid", name.bold()),
    };
    println!(
        "{} {} {}; balance now {}",
        "✓".green().bold(),
        action,
        money(config, amount),
        money(config, record.balance()).red().bold()
    );
    Ok(())
}

fn cmd_list(protocol: &Protocol, config: &Config, args: ListArgs) -> anyhow::Result<()> {
    let needle = args.search.as_deref().unwrap_or("").to_lowercase();
    // Most recent activity first, the reverse of the store's order.
    let mut customers: Vec<&DueLedger> = protocol
        .customers()
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.customer_name.to_lowercase().contains(&needle)
                || c.mobile.as_deref().is_some_and(|m| m.contains(&needle))
        })
        .collect();
    customers.reverse();

    if customers.is_empty() {
        println!("No customers.");
        return Ok(());
    }

    for c in &customers {
        println!(
            "{}  {:<24} {:<14} {}",
            c.id.short_id().dimmed(),
            c.customer_name.bold(),
            c.mobile.as_deref().unwrap_or("-"),
            money(config, c.balance()).red().bold()
        );
    }

    let total: Money = customers.iter().map(|c| c.balance()).sum();
    println!(
        "\n{} customer(s), {} outstanding",
        customers.len(),
        money(config, total).red().bold()
    );
    Ok(())
}

fn cmd_history(protocol: &Protocol, config: &Config, args: CustomerArgs) -> anyhow::Result<()> {
    let customer = resolve_customer(protocol.customers(), &args.customer)?;
    println!(
        "{} ({})  balance {}",
        customer.customer_name.bold(),
        customer.mobile.as_deref().unwrap_or("no mobile"),
        money(config, customer.balance()).red().bold()
    );

    for line in statement(&customer.logs) {
        let (due, paid) = match line.log.kind {
            LogKind::Due => (money(config, line.log.amount).red().to_string(), "-".dimmed().to_string()),
            LogKind::Add => ("-".dimmed().to_string(), money(config, line.log.amount).green().to_string()),
        };
        println!(
            "{}  {} {}  due {:<12} paid {:<12} balance {}",
            line.log.id.short_id().dimmed(),
            line.log.date,
            line.log.time.dimmed(),
            due,
            paid,
            money(config, line.running).bold()
        );
    }
    Ok(())
}

async fn cmd_drop_entry(protocol: &mut Protocol, args: DropEntryArgs) -> anyhow::Result<()> {
    let customer = resolve_customer(protocol.customers(), &args.customer)?;
    let id = customer.id;
    let log = resolve_log(customer, &args.entry)?;
    protocol.delete_entry(id, log).await?;
    println!("{} Entry {} deleted", "✓".green().bold(), log.short_id());
    Ok(())
}

async fn cmd_drop(protocol: &mut Protocol, args: CustomerArgs) -> anyhow::Result<()> {
    let customer = resolve_customer(protocol.customers(), &args.customer)?;
    let (id, name) = (customer.id, customer.customer_name.clone());
    protocol.delete_customer(id).await?;
    println!("{} Deleted {} and all paired cash entries", "✓".green().bold(), name.bold());
    Ok(())
}

async fn cmd_drawer(protocol: &Protocol, config: &Config) -> anyhow::Result<()> {
    let entries = protocol.drawer().entries().await?;
    if entries.is_empty() {
        println!("Drawer is empty.");
        return Ok(());
    }
    for e in &entries {
        let amount = match e.direction {
            khata_types::CashDirection::Add => money(config, e.amount).green().to_string(),
            khata_types::CashDirection::Withdraw => money(config, e.amount).red().to_string(),
        };
        println!("{}  {}  {:<9} {:<12} {}", e.id.short_id().dimmed(), e.date, e.direction, amount, e.note);
    }
    Ok(())
}

async fn cmd_reconcile(protocol: &Protocol, args: ReconcileArgs) -> anyhow::Result<()> {
    let report = Reconciler::audit(protocol.store(), protocol.drawer()).await?;
    println!(
        "Checked {} customer(s), {} drawer entries",
        report.customers_checked, report.entries_checked
    );

    if report.is_clean() {
        println!("{} Ledgers agree.", "✓".green().bold());
        return Ok(());
    }

    for d in &report.discrepancies {
        println!("  {} {}", "✗".red().bold(), d.description);
    }

    if args.repair {
        let summary = Reconciler::repair(protocol.store(), protocol.drawer()).await?;
        println!(
            "{} Repaired: {} recreated, {} removed, {} aggregates fixed",
            "✓".green().bold(),
            summary.entries_recreated,
            summary.entries_removed,
            summary.aggregates_repaired
        );
    } else {
        println!("Run with {} to fix.", "--repair".bold());
    }
    Ok(())
}

fn money(config: &Config, amount: Money) -> String {
    format!("{} {}", config.currency, amount)
}

/// Find a customer by exact name (case-insensitive) or id prefix.
fn resolve_customer<'a>(customers: &'a [DueLedger], query: &str) -> anyhow::Result<&'a DueLedger> {
    let by_name: Vec<&DueLedger> = customers
        .iter()
        .filter(|c| c.customer_name.eq_ignore_ascii_case(query))
        .collect();
    match by_name.len() {
        1 => return Ok(by_name[0]),
        n if n > 1 => bail!("'{query}' matches {n} customers; use the id prefix"),
        _ => {}
    }

    let by_id: Vec<&DueLedger> = customers
        .iter()
        .filter(|c| c.id.to_string().starts_with(query))
        .collect();
    match by_id.len() {
        1 => Ok(by_id[0]),
        0 => bail!("no customer matches '{query}'"),
        n => bail!("'{query}' matches {n} customers; use a longer id prefix"),
    }
}

/// Find a log entry on a customer by id or unambiguous id prefix.
fn resolve_log(customer: &DueLedger, query: &str) -> anyhow::Result<LogId> {
    let matches: Vec<LogId> = customer
        .logs
        .iter()
        .filter(|l| l.id.to_string().starts_with(query))
        .map(|l| l.id)
        .collect();
    match matches.len() {
        1 => Ok(matches[0]),
        0 => bail!("no entry of {} matches '{query}'", customer.customer_name),
        n => bail!("'{query}' matches {n} entries; use a longer prefix"),
    }
}
