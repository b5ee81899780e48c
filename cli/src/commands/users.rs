//! User subcommands

use cointrack_core::{Result, UserDraft};
use cointrack_networking::{api, ApiClient};

/// Print all users with wallet sizes
pub async fn list(client: &ApiClient) -> Result<()> {
    let users = client.list_users().await?;

    if users.is_empty() {
        println!("No registered users");
        return Ok(());
    }

    for user in &users {
        println!(
            "{} | {} | {} position(s)",
            user.id,
            user.name,
            user.wallet.len()
        );
    }
    println!("{} users", users.len());

    Ok(())
}

/// Register a user
pub async fn add(
    client: &ApiClient,
    name: &str,
    email: &str,
    password: &str,
    active: bool,
) -> Result<()> {
    let draft = UserDraft::new(name, email, password, active);
    api::create_user(client, &draft).await?;
    println!("Registered {}", name);
    Ok(())
}

/// Remove a user and their transaction history
pub async fn remove(client: &ApiClient, id: &str) -> Result<()> {
    api::remove_user(client, id).await?;
    println!("Removed user {} and their transactions", id);
    Ok(())
}
