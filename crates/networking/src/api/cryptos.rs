//! Crypto catalog operations with validation and the delete guard

use cointrack_core::{CryptoDraft, Error, Result, User};
use tracing::{info, warn};

use crate::ApiClient;

/// Add a crypto to the catalog after checking the draft
pub async fn create_crypto(client: &ApiClient, draft: &CryptoDraft) -> Result<()> {
    draft.validate()?;

    info!("Adding {} ({}) to the catalog", draft.name, draft.symbol);
    client.create_crypto(draft).await
}

/// Rewrite an existing crypto after checking the draft
pub async fn update_crypto(client: &ApiClient, id: &str, draft: &CryptoDraft) -> Result<()> {
    draft.validate()?;

    info!("Updating {} ({})", draft.name, id);
    client.update_crypto(id, draft).await
}

/// Delete a crypto, refusing while any user still holds it
///
/// The check reads the current user list first, so a wallet updated
/// between the read and the delete can still slip through.
pub async fn remove_crypto(client: &ApiClient, id: &str) -> Result<()> {
    let users = client.list_users().await?;

    if is_held_by_any(&users, id) {
        let name = client
            .get_crypto(id)
            .await
            .map(|c| c.name)
            .unwrap_or_else(|_| id.to_string());
        warn!("Refusing to delete crypto {}: still held in a wallet", id);
        return Err(Error::CryptoInUse { name });
    }

    client.delete_crypto(id).await
}

/// True when any of the given users holds a position in the crypto
pub fn is_held_by_any(users: &[User], crypto_id: &str) -> bool {
    users
        .iter()
        .any(|user| user.wallet.iter().any(|p| p.crypto_id == crypto_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cointrack_core::{CryptoDraft, Position, User};

    fn user_holding(crypto_id: &str) -> User {
        User {
            id: "64f0aa12".to_string(),
            name: "Alice".to_string(),
            wallet: vec![Position {
                id: None,
                crypto_id: crypto_id.to_string(),
                quantity: 1.0,
                addresses: Vec::new(),
            }],
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_held_crypto_is_detected() {
        let users = vec![user_holding("17"), user_holding("18")];
        assert!(is_held_by_any(&users, "17"));
        assert!(!is_held_by_any(&users, "99"));
    }

    #[test]
    fn test_empty_wallets_do_not_block() {
        let mut user = user_holding("17");
        user.wallet.clear();
        assert!(!is_held_by_any(&[user], "17"));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_draft_without_a_request() {
        let client = ApiClient::new("test-token").with_base_url("http://127.0.0.1:9");
        let draft = CryptoDraft {
            name: "Bitcoin".to_string(),
            symbol: "btc".to_string(),
            created_at: "2009-01-03".to_string(),
            active: true,
            current_value: 1.0,
        };

        let result = create_crypto(&client, &draft).await;
        assert!(matches!(result, Err(Error::ValidationError(_))));
    }
}
