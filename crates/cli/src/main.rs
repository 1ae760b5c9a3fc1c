// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use clap::{Arg, Command};

mod commands;
mod gate;
mod snapshot;

fn build_cli() -> Command {
    Command::new("shelfsync")
        .version("0.1.0")
        .about("Audiobook storefront library manager")
        .arg(
            Arg::new("database")
                .short('d')
                .long("database")
                .value_name("PATH")
                .help("Path to the library database (defaults to settings.toml)")
                .global(true),
        )
        .subcommand(Command::new("init").about("Initialize the library database"))
        .subcommand(
            Command::new("accounts")
                .about("Show or edit the configured storefront accounts")
                .arg(Arg::new("add").long("add").value_name("USERNAME").help("Add an account"))
                .arg(
                    Arg::new("locale")
                        .long("locale")
                        .value_name("LOCALE")
                        .help("Locale for --add (e.g. us, uk, de)")
                        .default_value("us"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List tracked library books")
                .arg(
                    Arg::new("account")
                        .short('a')
                        .long("account")
                        .value_name("USERNAME")
                        .help("Restrict to one account's books"),
                ),
        )
        .subcommand(
            Command::new("edit")
                .about("Edit tags and download statuses of a tracked book")
                .arg(Arg::new("id").required(true).value_name("PRODUCT_ID").help("Product id"))
                .arg(Arg::new("tags").short('t').long("tags").value_name("TAGS").help("Replace the free-text tags"))
                .arg(
                    Arg::new("status")
                        .short('s')
                        .long("status")
                        .value_name("STATUS")
                        .help("Audio status")
                        .value_parser(["downloaded", "not-downloaded"]),
                )
                .arg(
                    Arg::new("pdf-status")
                        .long("pdf-status")
                        .value_name("STATUS")
                        .help("PDF companion status")
                        .value_parser(["downloaded", "not-downloaded"]),
                ),
        )
        .subcommand(
            Command::new("scan")
                .about("Fetch and validate each account's remote library, import new purchases and report inactive books")
                .arg(
                    Arg::new("snapshot")
                        .long("snapshot")
                        .required(true)
                        .value_name("FILE")
                        .help("Library snapshot exported by the storefront client"),
                ),
        )
        .subcommand(
            Command::new("remove")
                .about("Scan, then confirm and remove books no longer listed remotely")
                .arg(
                    Arg::new("snapshot")
                        .long("snapshot")
                        .required(true)
                        .value_name("FILE")
                        .help("Library snapshot exported by the storefront client"),
                )
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Approve every candidate without prompting")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = build_cli().get_matches();

    let settings = commands::load_settings().context("Failed to load settings")?;
    let db_path = matches
        .get_one::<String>("database")
        .cloned()
        .unwrap_or_else(|| settings.database_path.display().to_string());

    match matches.subcommand() {
        Some(("init", _)) => commands::init_database(&db_path).await,
        Some(("accounts", sub_matches)) => commands::accounts(sub_matches),
        Some(("list", sub_matches)) => commands::list_books(&db_path, sub_matches).await,
        Some(("edit", sub_matches)) => commands::edit_book(&db_path, sub_matches).await,
        Some(("scan", sub_matches)) => commands::scan(&db_path, &settings, sub_matches).await,
        Some(("remove", sub_matches)) => commands::remove(&db_path, &settings, sub_matches).await,
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}
