//! Crypto catalog subcommands

use cointrack_core::{display_date, CryptoDraft, Result};
use cointrack_networking::{api, ApiClient};

/// Print the catalog
pub async fn list(client: &ApiClient) -> Result<()> {
    let cryptos = client.list_cryptos().await?;

    if cryptos.is_empty() {
        println!("No cryptos in the catalog");
        return Ok(());
    }

    println!("{}", "=".repeat(72));
    for crypto in &cryptos {
        let state = if crypto.active { "active" } else { "inactive" };
        let full_name = if crypto.full_name.is_empty() {
            crypto.name.as_str()
        } else {
            crypto.full_name.as_str()
        };
        println!(
            "{} | {} ({}) | {} | {:.2} | created {} | {} days | {}",
            crypto.id,
            crypto.name,
            crypto.symbol,
            full_name,
            crypto.current_value,
            display_date(&crypto.created_at),
            crypto.age_days,
            state
        );
    }
    println!("{}", "=".repeat(72));
    println!("{} cryptos", cryptos.len());

    Ok(())
}

/// Add a new crypto
pub async fn add(
    client: &ApiClient,
    name: &str,
    symbol: &str,
    value: f64,
    created: &str,
    active: bool,
) -> Result<()> {
    let draft = CryptoDraft {
        name: name.to_string(),
        symbol: symbol.to_string(),
        created_at: created.to_string(),
        active,
        current_value: value,
    };

    api::create_crypto(client, &draft).await?;
    println!("Added {} ({})", name, symbol);
    Ok(())
}

/// Edit fields of an existing crypto; unset flags keep current values
pub async fn edit(
    client: &ApiClient,
    id: &str,
    name: Option<String>,
    symbol: Option<String>,
    value: Option<f64>,
    created: Option<String>,
    active: Option<bool>,
) -> Result<()> {
    let current = client.get_crypto(id).await?;
    let mut draft = current.to_draft();

    if let Some(name) = name {
        draft.name = name;
    }
    if let Some(symbol) = symbol {
        draft.symbol = symbol;
    }
    if let Some(value) = value {
        draft.current_value = value;
    }
    if let Some(created) = created {
        draft.created_at = created;
    }
    if let Some(active) = active {
        draft.active = active;
    }

    api::update_crypto(client, id, &draft).await?;
    println!("Updated {} ({})", draft.name, id);
    Ok(())
}

/// Remove a crypto unless a wallet still holds it
pub async fn remove(client: &ApiClient, id: &str) -> Result<()> {
    api::remove_crypto(client, id).await?;
    println!("Removed crypto {}", id);
    Ok(())
}
