//! Transactions command - ledger views and CSV export

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use satvault_core::ports::Repository;
use satvault_core::Transaction;

use super::get_context;
use crate::output;

pub fn run(
    api_key: Option<&str>,
    wallet: Option<&str>,
    export: Option<&Path>,
    json: bool,
) -> Result<()> {
    if api_key.is_some() && wallet.is_some() {
        anyhow::bail!("--api-key and --wallet cannot be combined.");
    }

    let ctx = get_context()?;

    if let Some(path) = export {
        if api_key.is_some() || wallet.is_some() {
            anyhow::bail!("--export writes the full ledger and cannot be filtered.");
        }
        let result = ctx.admin_service.export_csv(path)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            output::success("Ledger exported");
            println!("  File: {}", result.path.display());
            println!("  Rows: {}", result.rows);
        }
        return Ok(());
    }

    let (transactions, scope) = if let Some(api_key) = api_key {
        let user = ctx
            .repository
            .get_user(api_key)?
            .ok_or_else(|| anyhow::anyhow!("No user registered for the given API key"))?;
        let transactions = ctx.repository.get_user_transactions(&user)?;
        (transactions, format!("involving {}", user.email))
    } else if let Some(address) = wallet {
        let transactions = ctx.repository.get_wallet_transactions(address)?;
        (transactions, format!("involving wallet {}", address))
    } else {
        (ctx.admin_service.fetch_all_transactions()?, String::new())
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&transactions)?);
        return Ok(());
    }

    if transactions.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    print_table(&transactions);
    println!();
    if scope.is_empty() {
        println!("{} transaction(s)", transactions.len());
    } else {
        println!("{} transaction(s) {}", transactions.len(), scope.dimmed());
    }

    Ok(())
}

fn print_table(transactions: &[Transaction]) {
    let mut table = output::create_table();
    table.set_header(vec!["From", "To", "Amount (BTC)", "Fee (%)", "Rate"]);

    for tx in transactions {
        table.add_row(vec![
            tx.wallet_address_from.clone(),
            tx.wallet_address_to.clone(),
            tx.btc_amount.to_string(),
            tx.fee_pct.to_string(),
            tx.exchange_rate.to_string(),
        ]);
    }

    println!("{}", table);
}
