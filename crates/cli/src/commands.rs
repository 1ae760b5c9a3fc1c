// FILE: crates/cli/src/commands.rs

use crate::gate::InteractiveGate;
use crate::snapshot::SnapshotClient;
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use console::style;
use shelfsync_catalog::{LibraryFetcher, LibraryScanner, ValidatorChain};
use shelfsync_config::{AccountsFile, AppSettings};
use shelfsync_core::{Account, LiberatedStatus, LibraryBook, ProductId};
use shelfsync_database::{
    connect, queries::library, run_migrations, DatabaseConfig, DbPool,
};
use shelfsync_reconcile::{ApproveAll, ReconcileReport, Reconciler, RemovalGate};
use shelfsync_resilience::RetryPolicy;
use std::path::Path;

/// Loads settings from the platform config dir, defaults when unavailable
pub fn load_settings() -> Result<AppSettings> {
    match shelfsync_config::settings_path() {
        Some(path) => Ok(AppSettings::load(&path)?),
        None => Ok(AppSettings::default()),
    }
}

async fn connect_db(db_path: &str) -> Result<DbPool> {
    let pool = connect(DatabaseConfig::new(db_path))
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to apply database migrations")?;
    Ok(pool)
}

fn load_accounts() -> Result<AccountsFile> {
    let path = shelfsync_config::accounts_path()
        .context("No config directory available on this platform")?;
    Ok(AccountsFile::load(&path)?)
}

fn build_reconciler(settings: &AppSettings, pool: DbPool) -> Reconciler {
    let scanner = LibraryScanner::new(
        LibraryFetcher::new(settings.page_size),
        ValidatorChain::standard(),
        RetryPolicy::new(settings.fetch_attempts),
    );
    Reconciler::new(scanner, pool)
}

/// Initialize the library database
pub async fn init_database(db_path: &str) -> Result<()> {
    let _pool = connect_db(db_path).await?;
    println!("{} Library database ready at {}", style("✓").green().bold(), db_path);
    Ok(())
}

/// Show or edit the configured accounts
pub fn accounts(matches: &ArgMatches) -> Result<()> {
    let mut file = load_accounts()?;

    if let Some(username) = matches.get_one::<String>("add") {
        let locale = matches
            .get_one::<String>("locale")
            .map(|s| s.as_str())
            .unwrap_or("us");

        if !file.add(username.as_str(), locale) {
            bail!("Account already configured");
        }
        let path = shelfsync_config::accounts_path()
            .context("No config directory available on this platform")?;
        file.save(&path)?;
        println!("{} Account added", style("✓").green().bold());
        return Ok(());
    }

    if file.is_empty() {
        println!("No accounts configured. Use 'accounts --add USERNAME --locale LOCALE'.");
        return Ok(());
    }

    println!("\n{} Configured Accounts", style(file.accounts.len()).bold().cyan());
    println!("{}", "=".repeat(60));
    for account in file.to_accounts() {
        println!("  {}", account);
    }

    Ok(())
}

/// List tracked library books
pub async fn list_books(db_path: &str, matches: &ArgMatches) -> Result<()> {
    let pool = connect_db(db_path).await?;
    let mut books = library::list_library_books(&pool)
        .await
        .context("Failed to list library books")?;

    if let Some(username) = matches.get_one::<String>("account") {
        books.retain(|lb| lb.account.username() == username);
    }

    if books.is_empty() {
        println!("No books in library. Run 'scan' to import your purchases.");
        return Ok(());
    }

    println!("\n{} Books in Library", style(books.len()).bold().cyan());
    println!("{}", "=".repeat(80));
    for book in &books {
        print_book_summary(book);
    }

    Ok(())
}

/// Edit tags and download statuses of one tracked book
pub async fn edit_book(db_path: &str, matches: &ArgMatches) -> Result<()> {
    let id_str = matches
        .get_one::<String>("id")
        .ok_or_else(|| anyhow::anyhow!("Product id is required"))?;
    let product_id = ProductId::new(id_str.as_str());

    let pool = connect_db(db_path).await?;
    let book = library::get_library_book(&pool, &product_id)
        .await
        .context("Failed to get library book")?;

    let mut user_item = book.user_item.clone();

    if let Some(tags) = matches.get_one::<String>("tags") {
        user_item.tags = tags.clone();
    }
    if let Some(status) = matches.get_one::<String>("status") {
        user_item.book_status = parse_status(status)?;
    }
    if let Some(status) = matches.get_one::<String>("pdf-status") {
        if user_item.pdf_status.is_none() {
            bail!("This book has no PDF companion");
        }
        user_item.pdf_status = Some(parse_status(status)?);
    }

    library::update_user_item(&pool, &product_id, &user_item)
        .await
        .context("Failed to update book")?;

    println!("{} Updated {}", style("✓").green().bold(), style(&book.book.title).bold());
    Ok(())
}

/// The edit surface only moves statuses between downloaded states; an Error
/// status can be left but never entered from here.
fn parse_status(value: &str) -> Result<LiberatedStatus> {
    match value {
        "downloaded" => Ok(LiberatedStatus::Liberated),
        "not-downloaded" => Ok(LiberatedStatus::NotLiberated),
        other => bail!("Unknown status '{}'", other),
    }
}

/// Scan every account and report what a removal pass would offer
pub async fn scan(db_path: &str, settings: &AppSettings, matches: &ArgMatches) -> Result<()> {
    let (client, accounts) = snapshot_and_accounts(matches)?;
    let pool = connect_db(db_path).await?;
    let reconciler = build_reconciler(settings, pool);

    let outcomes = reconciler.scan_accounts(&client, &accounts).await;

    for outcome in &outcomes {
        match &outcome.result {
            Ok(summary) => {
                println!(
                    "\n{} {}: {} item(s) remote, {} imported, {} inactive",
                    style("✓").green().bold(),
                    outcome.account,
                    summary.total_remote,
                    summary.imported,
                    summary.candidates.len()
                );
                for candidate in &summary.candidates {
                    println!("    no longer listed: {}", style(&candidate.book.title).yellow());
                }
            }
            Err(err) => {
                println!("\n{} {}: {}", style("✗").red().bold(), outcome.account, err);
            }
        }
    }

    Ok(())
}

/// Scan, confirm, and remove inactive books
pub async fn remove(db_path: &str, settings: &AppSettings, matches: &ArgMatches) -> Result<()> {
    let (client, accounts) = snapshot_and_accounts(matches)?;
    let pool = connect_db(db_path).await?;
    let reconciler = build_reconciler(settings, pool);

    let gate: Box<dyn RemovalGate> = if matches.get_flag("yes") {
        Box::new(ApproveAll)
    } else {
        Box::new(InteractiveGate)
    };

    let report = reconciler
        .reconcile(&client, &accounts, gate.as_ref())
        .await
        .context("Reconciliation failed")?;

    print_report(&report);
    Ok(())
}

fn snapshot_and_accounts(matches: &ArgMatches) -> Result<(SnapshotClient, Vec<Account>)> {
    let snapshot_path = matches
        .get_one::<String>("snapshot")
        .ok_or_else(|| anyhow::anyhow!("Snapshot file is required"))?;
    let client = SnapshotClient::load(Path::new(snapshot_path))
        .context("Failed to load library snapshot")?;

    let accounts = load_accounts()?.to_accounts();
    if accounts.is_empty() {
        bail!("No accounts configured. Use 'accounts --add USERNAME --locale LOCALE'.");
    }

    Ok((client, accounts))
}

fn print_report(report: &ReconcileReport) {
    println!(
        "\n{} Reconciliation finished: {} candidate(s), {} removed",
        style("✓").green().bold(),
        report.candidate_count(),
        report.removed
    );

    for account in report.failed_accounts() {
        println!("  {} scan failed for {}", style("✗").red().bold(), account);
    }
}

fn print_book_summary(library_book: &LibraryBook) {
    let book = &library_book.book;
    let status = match book_status_label(library_book) {
        (label, true) => style(label).green(),
        (label, false) => style(label).dim(),
    };

    println!("{} [{}]", style(&book.title).bold(), status);
    if !book.authors.is_empty() {
        println!("  by {}", book.authors.join(", "));
    }
    if !book.length_display().is_empty() {
        println!("  {}", book.length_display());
    }
    println!(
        "  {} · {} · added {}",
        book.product_id,
        library_book.account,
        library_book.date_added.format("%Y-%m-%d")
    );
    if !library_book.user_item.tags.is_empty() {
        println!("  tags: {}", library_book.user_item.tags);
    }
    println!();
}

fn book_status_label(library_book: &LibraryBook) -> (&'static str, bool) {
    match library_book.user_item.book_status {
        LiberatedStatus::Liberated => ("Downloaded", true),
        LiberatedStatus::NotLiberated => ("Not Downloaded", false),
        LiberatedStatus::Error => ("Error", false),
    }
}
