//! User account models

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::de::deserialize_id;
use super::wallet::Position;
use crate::errors::{Error, Result};

/// API response wrapper for the user listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    #[serde(rename = "utilisateurs")]
    pub users: Vec<User>,
}

/// API response wrapper for a single user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "utilisateur")]
    pub user: User,
}

/// A user record with their wallet
///
/// Updates rewrite the whole record, so fields this client does not
/// model (password hash, registration date, ...) are kept in `extra`
/// and sent back untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "portefeuille", default)]
    pub wallet: Vec<Position>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Payload for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDraft {
    #[serde(rename = "nom")]
    pub name: String,
    pub email: String,
    #[serde(rename = "mot_de_passe")]
    pub password: String,
    #[serde(rename = "date_inscription")]
    pub registered_at: String,
    #[serde(rename = "actif")]
    pub active: bool,
}

impl UserDraft {
    /// Build a draft registered now
    pub fn new(name: &str, email: &str, password: &str, active: bool) -> Self {
        UserDraft {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            registered_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            active,
        }
    }

    /// Check the draft against the signup rules
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(Error::ValidationError(
                "name, email, and password are all required".to_string(),
            ));
        }
        if self.password.chars().count() < 8 {
            return Err(Error::ValidationError(
                "password must be at least 8 characters".to_string(),
            ));
        }
        if !email_shape_ok(&self.email) {
            return Err(Error::ValidationError(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        Ok(())
    }
}

/// Loose shape check: something before the @, a dot somewhere after it.
/// Real validation is the backend's job.
fn email_shape_ok(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain
                    .split_once('.')
                    .map_or(false, |(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_with_wallet() {
        let json = r#"{
            "utilisateur": {
                "_id": "64f0aa12",
                "nom": "Alice Martin",
                "email": "alice@example.com",
                "mot_de_passe": "$2b$10$abcdef",
                "date_inscription": "2023-09-01T08:00:00.000Z",
                "actif": true,
                "portefeuille": [
                    {
                        "_id": "64f0ab01",
                        "cryptomonnaie_id": "66b2f1",
                        "quantite": "2.5",
                        "adresses": ["9f8e7d6c5b4a39281706f5e4d3c2b1a0"]
                    }
                ]
            }
        }"#;

        let parsed: UserResponse = serde_json::from_str(json).unwrap();
        let user = parsed.user;
        assert_eq!(user.id, "64f0aa12");
        assert_eq!(user.name, "Alice Martin");
        assert_eq!(user.wallet.len(), 1);
        assert_eq!(user.wallet[0].quantity, 2.5);
        assert_eq!(user.extra["email"], "alice@example.com");
    }

    #[test]
    fn test_update_keeps_unmodeled_fields() {
        let json = r#"{
            "_id": "64f0aa12",
            "nom": "Alice Martin",
            "mot_de_passe": "$2b$10$abcdef",
            "actif": true,
            "__v": 3,
            "portefeuille": []
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["_id"], "64f0aa12");
        assert_eq!(back["mot_de_passe"], "$2b$10$abcdef");
        assert_eq!(back["actif"], true);
        assert_eq!(back["__v"], 3);
    }

    #[test]
    fn test_valid_draft_passes() {
        let draft = UserDraft::new("Bob", "bob@example.com", "hunter2hunter2", true);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_short_password_rejected() {
        let draft = UserDraft::new("Bob", "bob@example.com", "hunter2", true);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_missing_fields_rejected() {
        let draft = UserDraft::new("", "bob@example.com", "hunter2hunter2", true);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        for email in ["bob", "bob@", "@example.com", "bob@example", "bob @example.com"] {
            let draft = UserDraft::new("Bob", email, "hunter2hunter2", true);
            assert!(draft.validate().is_err(), "accepted {email}");
        }
    }

    #[test]
    fn test_email_shapes() {
        assert!(email_shape_ok("a@b.c"));
        assert!(email_shape_ok("first.last@mail.example.org"));
        assert!(!email_shape_ok("a@b."));
        assert!(!email_shape_ok("a@.b"));
    }

    #[test]
    fn test_draft_serializes_wire_names() {
        let draft = UserDraft::new("Bob", "bob@example.com", "hunter2hunter2", false);
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["nom"], "Bob");
        assert_eq!(value["mot_de_passe"], "hunter2hunter2");
        assert_eq!(value["actif"], false);
        assert!(value["date_inscription"].as_str().unwrap().ends_with('Z'));
    }
}
