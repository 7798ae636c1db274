//! Send command - record a transfer between wallets

use anyhow::Result;
use colored::Colorize;
use rust_decimal::Decimal;
use satvault_core::LogEvent;

use super::{get_context, get_logger, log_event};

pub fn run(
    from: &str,
    to: &str,
    amount: &str,
    fee_pct: Option<&str>,
    exchange_rate: Option<&str>,
    json: bool,
) -> Result<()> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new("command").with_command("send"));

    let amount: Decimal = amount
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid amount"))?;
    let fee_pct: Option<Decimal> = match fee_pct {
        Some(s) => Some(s.parse().map_err(|_| anyhow::anyhow!("Invalid fee percentage"))?),
        None => None,
    };
    let exchange_rate: Option<Decimal> = match exchange_rate {
        Some(s) => Some(s.parse().map_err(|_| anyhow::anyhow!("Invalid exchange rate"))?),
        None => None,
    };

    let ctx = get_context()?;
    let tx = ctx
        .transfer_service
        .record_transfer(from, to, amount, fee_pct, exchange_rate)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tx)?);
        return Ok(());
    }

    println!("{}", "Transfer recorded".green());
    println!("  From:   {}", tx.wallet_address_from);
    println!("  To:     {}", tx.wallet_address_to);
    println!("  Amount: {} BTC", tx.btc_amount);
    println!("  Fee:    {} %", tx.fee_pct);
    println!("  Rate:   {}", tx.exchange_rate);
    if tx.is_self_transfer() {
        println!("{}", "  (self transfer)".dimmed());
    }

    Ok(())
}
