//! User account operations

use cointrack_core::{Result, UserDraft};
use tracing::info;

use crate::ApiClient;

/// Register a new user after checking the draft
pub async fn create_user(client: &ApiClient, draft: &UserDraft) -> Result<()> {
    draft.validate()?;

    info!("Registering user {}", draft.name);
    client.create_user(draft).await
}

/// Delete a user along with every transaction recorded for them
///
/// The transaction purge runs before the user delete.
pub async fn remove_user(client: &ApiClient, user_id: &str) -> Result<()> {
    let transactions = client.user_transactions(user_id).await?;

    if !transactions.is_empty() {
        info!(
            "Purging {} transactions for user {}",
            transactions.len(),
            user_id
        );
        client.delete_user_transactions(user_id).await?;
    }

    client.delete_user(user_id).await
}
