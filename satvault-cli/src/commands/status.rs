//! Status command - show ledger status and summary

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let status = ctx.status_service.get_status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Custody Ledger Status".bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Users", &status.total_users.to_string()]);
    table.add_row(vec!["Wallets", &status.total_wallets.to_string()]);
    table.add_row(vec!["Transactions", &status.total_transactions.to_string()]);
    table.add_row(vec![
        "BTC in custody",
        &status.total_btc_in_custody.to_string(),
    ]);

    println!("{}", table);
    println!();

    println!("Database: {}", status.db_path);
    if let Some(size) = status.db_size_bytes {
        println!("Size: {}", output::format_size(size));
    }
    if ctx.config.sandbox_mode {
        println!();
        println!("{}", "Sandbox mode is ON (sandbox.duckdb)".yellow());
    }

    Ok(())
}
