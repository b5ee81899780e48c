//! Wallet view

use cointrack_core::Result;
use cointrack_networking::ApiClient;

/// Print the user's wallet with current values
pub async fn show(client: &ApiClient, user_id: &str) -> Result<()> {
    let user = client.get_user(user_id).await?;

    println!("Wallet of {}", user.name);
    println!("{}", "=".repeat(72));

    if user.wallet.is_empty() {
        println!("No positions");
        return Ok(());
    }

    let mut total = 0.0;
    for position in &user.wallet {
        // One lookup per position; the shared cache absorbs repeat views
        match client.get_crypto(&position.crypto_id).await {
            Ok(crypto) => {
                let value = position.value_at(crypto.current_value);
                total += value;
                println!(
                    "{} ({}) | {:.8} units | {:.2}",
                    crypto.name, crypto.symbol, position.quantity, value
                );
            }
            Err(_) => println!(
                "unknown crypto {} | {:.8} units | value unavailable",
                position.crypto_id, position.quantity
            ),
        }

        for address in &position.addresses {
            println!("    {}", address);
        }
    }

    println!("{}", "=".repeat(72));
    println!("Total value: {:.2}", total);

    Ok(())
}
