//! The purchase flow: wallet merge, wholesale write, transaction log

use cointrack_core::{credit_position, Error, Result, Spend, TransactionDraft, UnitPrice, User};
use serde::Serialize;
use tracing::{info, warn};

use crate::ApiClient;

/// Outcome of a completed purchase
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseReceipt {
    pub crypto_id: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
    /// Freshest user record available after the writes
    pub user: User,
}

/// Buy a crypto for `user`, spending `spend` at `unit_price`
///
/// The quantity bought is `spend / unit_price`. The merged wallet is
/// written back as a whole user record, then the purchase is recorded
/// as a separate transaction row.
///
/// The two writes are not atomic. When the second one fails this
/// returns [`Error::TransactionLogFailed`] and the wallet keeps the
/// new position with no matching log entry.
pub async fn buy_crypto(
    client: &ApiClient,
    user: &User,
    crypto_id: &str,
    spend: Spend,
    unit_price: UnitPrice,
) -> Result<PurchaseReceipt> {
    if crypto_id.is_empty() {
        return Err(Error::ValidationError(
            "a crypto must be selected".to_string(),
        ));
    }
    if spend.as_f64() <= 0.0 {
        return Err(Error::ValidationError(
            "amount to spend must be positive".to_string(),
        ));
    }
    if unit_price.as_f64() <= 0.0 {
        return Err(Error::ValidationError(
            "unit price must be positive".to_string(),
        ));
    }

    let quantity = spend.quantity_at(unit_price);

    // Merge into a copy so the server sees the whole record at once
    let mut updated = user.clone();
    credit_position(&mut updated.wallet, crypto_id, quantity.as_f64());

    info!(
        "Buying {} of crypto {} for user {} ({} spent at {})",
        quantity.as_f64(),
        crypto_id,
        user.id,
        spend.as_f64(),
        unit_price.as_f64()
    );
    client.update_user(&updated).await?;

    let draft =
        TransactionDraft::buy_now(&user.id, crypto_id, quantity.as_f64(), unit_price.as_f64());
    let total = draft.total;
    if let Err(err) = client.create_transaction(&draft).await {
        return Err(Error::TransactionLogFailed(err.to_string()));
    }

    // Re-read the record the backend now has. Keep the local merge as a
    // fallback; the purchase itself already went through.
    let user = match client.get_user(&user.id).await {
        Ok(fresh) => fresh,
        Err(err) => {
            warn!("Could not re-fetch user after purchase: {}", err);
            updated
        }
    };

    Ok(PurchaseReceipt {
        crypto_id: crypto_id.to_string(),
        quantity: quantity.as_f64(),
        unit_price: unit_price.as_f64(),
        total,
        user,
    })
}
