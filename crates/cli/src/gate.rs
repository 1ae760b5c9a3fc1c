// FILE: crates/cli/src/gate.rs
//! Interactive confirmation of removal candidates

use async_trait::async_trait;
use console::style;
use shelfsync_core::{Account, LibraryBook};
use shelfsync_reconcile::RemovalGate;
use std::io::{self, Write};

/// Prompts the operator per candidate on the terminal
pub struct InteractiveGate;

impl InteractiveGate {
    fn prompt_yes_no(prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

#[async_trait]
impl RemovalGate for InteractiveGate {
    async fn confirm(&self, account: &Account, candidates: &[LibraryBook]) -> Vec<LibraryBook> {
        println!(
            "\n{} book(s) under {} are no longer listed in the remote library:",
            style(candidates.len()).bold().yellow(),
            account
        );

        let mut approved = Vec::new();
        for candidate in candidates {
            let book = &candidate.book;
            println!(
                "\n  {} ({})",
                style(&book.title).bold(),
                book.authors.join(", ")
            );
            println!("  Added {}", candidate.date_added.format("%Y-%m-%d"));

            if Self::prompt_yes_no("  Remove this book from the local library?") {
                approved.push(candidate.clone());
            }
        }

        approved
    }
}
