//! Extended scalar types: dates, times, exact decimals, and UUIDs.

use chrono::{NaiveDate, NaiveTime};
use envsettings::EnvSettings;
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(EnvSettings)]
#[allow(dead_code)]
struct FinancialConfig {
    pub transaction_date: Option<NaiveDate>,
    pub transaction_time: Option<NaiveTime>,
    pub amount: Option<Decimal>,
    pub tax_rate: Option<Decimal>,
    pub transaction_id: Option<Uuid>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("TRANSACTION_DATE", "2024-12-25");
    std::env::set_var("TRANSACTION_TIME", "14:35:22");
    std::env::set_var("AMOUNT", "1999.99");
    std::env::set_var("TAX_RATE", "0.0875");
    std::env::set_var("TRANSACTION_ID", "a1b2c3d4-e5f6-7890-abcd-ef1234567890");

    let settings = FinancialConfig::settings()?;

    println!("Transaction:");
    println!("  Date:   {}", settings.get("TRANSACTION_DATE")?);
    println!("  Time:   {}", settings.get("TRANSACTION_TIME")?);
    println!("  Amount: {}", settings.get("AMOUNT")?);
    println!("  Id:     {}", settings.get("TRANSACTION_ID")?);

    // Decimals keep exact textual precision, so money math stays exact
    let amount = settings
        .get("AMOUNT")?
        .as_decimal()
        .ok_or_else(|| anyhow::anyhow!("AMOUNT is not a decimal"))?;
    let tax_rate = settings
        .get("TAX_RATE")?
        .as_decimal()
        .ok_or_else(|| anyhow::anyhow!("TAX_RATE is not a decimal"))?;
    println!("  Tax:    {}", amount * tax_rate);

    Ok(())
}
