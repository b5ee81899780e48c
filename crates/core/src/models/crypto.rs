//! Crypto catalog models

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::de::{deserialize_f64_lenient, deserialize_id};
use crate::errors::{Error, Result};
use crate::types::parse_date;

/// API response wrapper for the crypto listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptosResponse {
    pub cryptos: Vec<Crypto>,
}

/// API response wrapper for a single crypto
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoResponse {
    pub crypto: Crypto,
}

/// A cryptocurrency as stored by the backend
///
/// The wire format uses French field names; the serde renames keep the
/// Rust side in English.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crypto {
    #[serde(rename = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "symbole")]
    pub symbol: String,
    /// ISO-8601 timestamp or bare `YYYY-MM-DD`, as sent by the backend
    #[serde(rename = "date_creation")]
    pub created_at: String,
    #[serde(rename = "actif", default)]
    pub active: bool,
    #[serde(
        rename = "valeur_actuelle",
        default,
        deserialize_with = "deserialize_f64_lenient"
    )]
    pub current_value: f64,
    #[serde(rename = "nom_complet", default)]
    pub full_name: String,
    /// Age in days, derived by the backend
    #[serde(rename = "nombre_jours", default)]
    pub age_days: i64,
}

impl Crypto {
    /// Editable fields of this record, for building an update payload
    pub fn to_draft(&self) -> CryptoDraft {
        CryptoDraft {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            created_at: self.created_at.clone(),
            active: self.active,
            current_value: self.current_value,
        }
    }
}

/// Payload for creating or updating a crypto
///
/// The backend derives `nom_complet` and `nombre_jours` itself, so they
/// are never sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoDraft {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "symbole")]
    pub symbol: String,
    #[serde(rename = "date_creation")]
    pub created_at: String,
    #[serde(rename = "actif")]
    pub active: bool,
    #[serde(rename = "valeur_actuelle")]
    pub current_value: f64,
}

impl CryptoDraft {
    /// Check the draft against the catalog rules
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() || self.symbol.is_empty() || self.created_at.is_empty() {
            return Err(Error::ValidationError(
                "name, symbol, and creation date are all required".to_string(),
            ));
        }
        if self.symbol != self.symbol.to_uppercase() {
            return Err(Error::ValidationError(
                "symbol must be uppercase".to_string(),
            ));
        }
        match parse_date(&self.created_at) {
            Some(date) => {
                if date > Utc::now().date_naive() {
                    return Err(Error::ValidationError(
                        "creation date cannot be in the future".to_string(),
                    ));
                }
            }
            None => {
                return Err(Error::ValidationError(format!(
                    "creation date '{}' is not a valid date",
                    self.created_at
                )));
            }
        }
        if self.current_value < 0.0 {
            return Err(Error::ValidationError(
                "current value cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn draft() -> CryptoDraft {
        CryptoDraft {
            name: "Bitcoin".to_string(),
            symbol: "BTC".to_string(),
            created_at: "2009-01-03".to_string(),
            active: true,
            current_value: 43250.75,
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_lowercase_symbol_rejected() {
        let mut d = draft();
        d.symbol = "btc".to_string();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_future_date_rejected() {
        let mut d = draft();
        let tomorrow = Utc::now().date_naive() + Days::new(1);
        d.created_at = tomorrow.format("%Y-%m-%d").to_string();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_unparseable_date_rejected() {
        let mut d = draft();
        d.created_at = "last tuesday".to_string();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_negative_value_rejected() {
        let mut d = draft();
        d.current_value = -0.01;
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_zero_value_allowed() {
        let mut d = draft();
        d.current_value = 0.0;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_missing_name_rejected() {
        let mut d = draft();
        d.name = String::new();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_parse_listing() {
        let json = r#"{
            "cryptos": [
                {
                    "_id": 17,
                    "nom": "Bitcoin",
                    "symbole": "BTC",
                    "date_creation": "2009-01-03T00:00:00.000Z",
                    "actif": true,
                    "valeur_actuelle": "43250.75",
                    "nom_complet": "Bitcoin (BTC)",
                    "nombre_jours": 5000
                },
                {
                    "_id": "66b2f1",
                    "nom": "Ethereum",
                    "symbole": "ETH",
                    "date_creation": "2015-07-30",
                    "valeur_actuelle": 2301.5
                }
            ]
        }"#;

        let parsed: CryptosResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.cryptos.len(), 2);

        let btc = &parsed.cryptos[0];
        assert_eq!(btc.id, "17");
        assert_eq!(btc.symbol, "BTC");
        assert_eq!(btc.current_value, 43250.75);
        assert_eq!(btc.age_days, 5000);

        let eth = &parsed.cryptos[1];
        assert_eq!(eth.id, "66b2f1");
        assert!(!eth.active);
        assert_eq!(eth.full_name, "");
    }

    #[test]
    fn test_draft_serializes_wire_names() {
        let value = serde_json::to_value(draft()).unwrap();
        assert_eq!(value["nom"], "Bitcoin");
        assert_eq!(value["symbole"], "BTC");
        assert_eq!(value["valeur_actuelle"], 43250.75);
        assert!(value.get("nom_complet").is_none());
    }
}
