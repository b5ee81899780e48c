//! Wallet positions and the merge rule applied on purchase

use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};

use super::de::{deserialize_f64_lenient, deserialize_id, deserialize_id_option};

/// Length of generated wallet addresses
const ADDRESS_LEN: usize = 32;

/// One wallet entry: a quantity of a single crypto
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Subdocument id assigned by the backend; absent on fresh entries
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_id_option"
    )]
    pub id: Option<String>,
    #[serde(rename = "cryptomonnaie_id", deserialize_with = "deserialize_id")]
    pub crypto_id: String,
    #[serde(
        rename = "quantite",
        default,
        deserialize_with = "deserialize_f64_lenient"
    )]
    pub quantity: f64,
    #[serde(rename = "adresses", default)]
    pub addresses: Vec<String>,
}

impl Position {
    /// Current value of this position at the given unit price
    pub fn value_at(&self, unit_price: f64) -> f64 {
        self.quantity * unit_price
    }
}

/// Generate a display-only wallet address: 32 alphanumeric characters.
/// The backend stores it verbatim; it is not a key of any kind.
pub fn generate_address() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ADDRESS_LEN)
        .map(char::from)
        .collect()
}

/// Merge a purchase into `wallet`: add to the existing position for
/// `crypto_id`, or append a new one carrying a single fresh address.
/// A wallet never holds two positions for the same crypto.
pub fn credit_position(wallet: &mut Vec<Position>, crypto_id: &str, quantity: f64) {
    match wallet.iter_mut().find(|p| p.crypto_id == crypto_id) {
        Some(position) => position.quantity += quantity,
        None => wallet.push(Position {
            id: None,
            crypto_id: crypto_id.to_string(),
            quantity,
            addresses: vec![generate_address()],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(crypto_id: &str, quantity: f64) -> Position {
        Position {
            id: Some("64f0aa".to_string()),
            crypto_id: crypto_id.to_string(),
            quantity,
            addresses: vec!["3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy".to_string()],
        }
    }

    #[test]
    fn test_credit_existing_position() {
        let mut wallet = vec![position("btc", 1.5), position("eth", 10.0)];
        credit_position(&mut wallet, "btc", 0.5);

        assert_eq!(wallet.len(), 2);
        assert_eq!(wallet[0].quantity, 2.0);
        assert_eq!(wallet[0].addresses.len(), 1);
    }

    #[test]
    fn test_credit_new_position() {
        let mut wallet = vec![position("btc", 1.5)];
        credit_position(&mut wallet, "sol", 25.0);

        assert_eq!(wallet.len(), 2);
        let added = &wallet[1];
        assert_eq!(added.crypto_id, "sol");
        assert_eq!(added.quantity, 25.0);
        assert!(added.id.is_none());
        assert_eq!(added.addresses.len(), 1);
    }

    #[test]
    fn test_one_position_per_crypto() {
        let mut wallet = Vec::new();
        credit_position(&mut wallet, "btc", 1.0);
        credit_position(&mut wallet, "btc", 2.0);
        credit_position(&mut wallet, "btc", 3.0);

        assert_eq!(wallet.len(), 1);
        assert_eq!(wallet[0].quantity, 6.0);
    }

    #[test]
    fn test_generated_address_shape() {
        let address = generate_address();
        assert_eq!(address.len(), 32);
        assert!(address.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_fresh_position_omits_id() {
        let mut wallet = Vec::new();
        credit_position(&mut wallet, "btc", 1.0);

        let value = serde_json::to_value(&wallet[0]).unwrap();
        assert!(value.get("_id").is_none());
        assert_eq!(value["cryptomonnaie_id"], "btc");
        assert_eq!(value["quantite"], 1.0);
    }

    #[test]
    fn test_position_value() {
        assert_eq!(position("btc", 2.5).value_at(100.0), 250.0);
    }
}
