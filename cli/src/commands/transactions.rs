//! Transaction history subcommands

use std::collections::HashMap;

use cointrack_core::{display_date, Result};
use cointrack_networking::ApiClient;

/// Print a user's transactions
pub async fn list(client: &ApiClient, user_id: &str) -> Result<()> {
    let user = client.get_user(user_id).await?;
    let transactions = client.user_transactions(user_id).await?;

    println!("Transactions of {}", user.name);
    println!("{}", "=".repeat(72));

    if transactions.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    // One lookup per distinct crypto; the shared cache absorbs repeats
    let mut names: HashMap<String, String> = HashMap::new();
    for crypto_id in transactions.iter().map(|t| t.crypto_id.clone()) {
        if !names.contains_key(&crypto_id) {
            let label = match client.get_crypto(&crypto_id).await {
                Ok(crypto) => format!("{} ({})", crypto.name, crypto.symbol),
                Err(_) => crypto_id.clone(),
            };
            names.insert(crypto_id, label);
        }
    }

    for tx in &transactions {
        let label = names.get(&tx.crypto_id).map(String::as_str).unwrap_or("?");
        println!(
            "{} | {} | {} | {:.8} @ {:.2} | total {:.2} | {}",
            tx.id,
            display_date(&tx.date),
            tx.kind,
            tx.quantity,
            tx.unit_price,
            tx.total,
            label
        );
    }
    println!("{}", "=".repeat(72));
    println!("{} transactions", transactions.len());

    Ok(())
}

/// Delete one transaction record
pub async fn remove(client: &ApiClient, id: &str) -> Result<()> {
    client.delete_transaction(id).await?;
    println!("Removed transaction {}", id);
    Ok(())
}
