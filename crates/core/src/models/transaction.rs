//! Transaction log models

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::de::{deserialize_f64_lenient, deserialize_id};

/// Transaction kind as encoded by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "achat")]
    Buy,
    #[serde(rename = "vente")]
    Sell,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Buy => write!(f, "buy"),
            TransactionKind::Sell => write!(f, "sell"),
        }
    }
}

/// Response from the per-user transaction listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
}

/// An immutable record of one buy or sell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "utilisateur_id", deserialize_with = "deserialize_id")]
    pub user_id: String,
    #[serde(rename = "cryptomonnaie_id", deserialize_with = "deserialize_id")]
    pub crypto_id: String,
    #[serde(
        rename = "quantite",
        default,
        deserialize_with = "deserialize_f64_lenient"
    )]
    pub quantity: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// ISO-8601 timestamp of the trade
    pub date: String,
    #[serde(
        rename = "prix_unitaire",
        default,
        deserialize_with = "deserialize_f64_lenient"
    )]
    pub unit_price: f64,
    #[serde(default, deserialize_with = "deserialize_f64_lenient")]
    pub total: f64,
}

/// Payload for recording a transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDraft {
    #[serde(rename = "utilisateur_id")]
    pub user_id: String,
    #[serde(rename = "cryptomonnaie_id")]
    pub crypto_id: String,
    #[serde(rename = "quantite")]
    pub quantity: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: String,
    #[serde(rename = "prix_unitaire")]
    pub unit_price: f64,
    pub total: f64,
}

impl TransactionDraft {
    /// Build a buy record dated now; total is always quantity times price
    pub fn buy_now(user_id: &str, crypto_id: &str, quantity: f64, unit_price: f64) -> Self {
        TransactionDraft {
            user_id: user_id.to_string(),
            crypto_id: crypto_id.to_string(),
            quantity,
            kind: TransactionKind::Buy,
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            unit_price,
            total: quantity * unit_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transaction_listing() {
        let json = r#"{
            "transactions": [
                {
                    "_id": "6701aa",
                    "utilisateur_id": "64f0aa12",
                    "cryptomonnaie_id": 17,
                    "quantite": 0.25,
                    "type": "achat",
                    "date": "2024-03-17T09:30:00.000Z",
                    "prix_unitaire": "43250.75",
                    "total": 10812.6875
                },
                {
                    "_id": "6701ab",
                    "utilisateur_id": "64f0aa12",
                    "cryptomonnaie_id": "66b2f1",
                    "quantite": 1.0,
                    "type": "vente",
                    "date": "2024-03-18T10:00:00.000Z",
                    "prix_unitaire": 2301.5,
                    "total": null
                }
            ]
        }"#;

        let parsed: TransactionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.transactions.len(), 2);

        let buy = &parsed.transactions[0];
        assert_eq!(buy.kind, TransactionKind::Buy);
        assert_eq!(buy.crypto_id, "17");
        assert_eq!(buy.unit_price, 43250.75);

        let sell = &parsed.transactions[1];
        assert_eq!(sell.kind, TransactionKind::Sell);
        assert_eq!(sell.total, 0.0);
    }

    #[test]
    fn test_buy_draft_wire_shape() {
        let draft = TransactionDraft::buy_now("64f0aa12", "66b2f1", 0.5, 2000.0);
        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(value["utilisateur_id"], "64f0aa12");
        assert_eq!(value["cryptomonnaie_id"], "66b2f1");
        assert_eq!(value["type"], "achat");
        assert_eq!(value["total"], 1000.0);
        assert!(value["date"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TransactionKind::Buy.to_string(), "buy");
        assert_eq!(TransactionKind::Sell.to_string(), "sell");
    }
}
