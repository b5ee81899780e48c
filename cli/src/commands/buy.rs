//! Purchase subcommand

use cointrack_core::{Result, Spend, UnitPrice};
use cointrack_networking::{api, ApiClient};

/// Buy a crypto at its current value and show the receipt
pub async fn run(client: &ApiClient, user_id: &str, crypto_id: &str, amount: f64) -> Result<()> {
    let user = client.get_user(user_id).await?;
    let crypto = client.get_crypto(crypto_id).await?;

    let receipt = api::buy_crypto(
        client,
        &user,
        &crypto.id,
        Spend::new(amount),
        UnitPrice::new(crypto.current_value),
    )
    .await?;

    println!(
        "Bought {:.8} {} at {:.2} (total {:.2})",
        receipt.quantity, crypto.symbol, receipt.unit_price, receipt.total
    );

    let position = receipt.user.wallet.iter().find(|p| p.crypto_id == crypto.id);
    if let Some(position) = position {
        println!("Position now {:.8} {}", position.quantity, crypto.symbol);
    }

    Ok(())
}
