//! Cointrack HTTP client with bearer-token authentication

use cointrack_core::{
    Crypto, CryptoDraft, CryptoResponse, CryptosResponse, Error, Result, Transaction,
    TransactionDraft, TransactionsResponse, User, UserDraft, UserResponse, UsersResponse,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client, Response,
};
use std::sync::Arc;
use tracing::{debug, error, instrument};

use crate::cache::CryptoCache;

/// Backend origin used when none is configured
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

const USER_AGENT_VALUE: &str = concat!("cointrack/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the cointrack backend
///
/// Sends the bearer token with every request. Optionally uses an
/// in-memory cache for crypto records to reduce API calls; the cache
/// can be shared across clients.
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: String,
    cache: Option<Arc<CryptoCache>>,
}

impl ApiClient {
    /// Create a new client with the given bearer token
    pub fn new(token: &str) -> Self {
        let http = Client::builder()
            .user_agent(USER_AGENT_VALUE)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.to_string(),
            cache: None,
        }
    }

    /// Create a new client with a shared crypto cache
    pub fn new_with_cache(token: &str, cache: Arc<CryptoCache>) -> Self {
        let mut client = Self::new(token);
        client.cache = Some(cache);
        client
    }

    /// Point the client at a different backend origin
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Default headers for requests
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Check if response indicates authentication failure
    fn check_auth_error(response: &Response) -> Option<Error> {
        match response.status().as_u16() {
            401 => Some(Error::TokenExpired),
            403 => Some(Error::AuthenticationError("Access forbidden".to_string())),
            _ => None,
        }
    }

    /// Get the whole crypto catalog
    #[instrument(skip(self))]
    pub async fn list_cryptos(&self) -> Result<Vec<Crypto>> {
        let url = format!("{}/cryptos/", self.base_url);

        debug!("Fetching crypto catalog from: {}", url);

        let response = self
            .http
            .get(&url)
            .headers(self.default_headers())
            .bearer_auth(&self.token)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let response = response.error_for_status().map_err(|e| {
            error!("Crypto catalog request failed: {}", e);
            Error::ApiError(e.to_string())
        })?;

        let data: CryptosResponse = response.json().await.map_err(|e| {
            error!("Failed to parse crypto catalog: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        debug!("Fetched {} cryptos", data.cryptos.len());
        Ok(data.cryptos)
    }

    /// Get a single crypto by id (cache-aware)
    #[instrument(skip(self))]
    pub async fn get_crypto(&self, id: &str) -> Result<Crypto> {
        // Check cache first
        if let Some(ref cache) = self.cache {
            if let Some(cached) = cache.get(id) {
                debug!("Cache hit for crypto {}", id);
                return Ok(cached);
            }
        }

        let url = format!("{}/cryptos/{}", self.base_url, id);

        let response = self
            .http
            .get(&url)
            .headers(self.default_headers())
            .bearer_auth(&self.token)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let response = response.error_for_status().map_err(|e| {
            error!("Crypto request failed: {}", e);
            Error::ApiError(e.to_string())
        })?;

        let wrapper: CryptoResponse = response.json().await.map_err(|e| {
            error!("Failed to parse crypto response: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        debug!(
            "Crypto fetched: {} @ {}",
            wrapper.crypto.symbol, wrapper.crypto.current_value
        );

        if let Some(ref cache) = self.cache {
            cache.insert(wrapper.crypto.clone());
        }

        Ok(wrapper.crypto)
    }

    /// Add a crypto to the catalog
    #[instrument(skip(self, draft))]
    pub async fn create_crypto(&self, draft: &CryptoDraft) -> Result<()> {
        let url = format!("{}/cryptos/", self.base_url);

        debug!("Creating crypto {} ({})", draft.name, draft.symbol);

        let body = serde_json::json!({ "crypto": draft });

        let response = self
            .http
            .post(&url)
            .headers(self.default_headers())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            error!("Crypto create failed: HTTP {}: {}", status, body);
            return Err(Error::ApiError(format!("HTTP {}: {}", status, body)));
        }

        Ok(())
    }

    /// Rewrite an existing crypto
    ///
    /// The payload carries the editable fields plus the id; derived
    /// fields are left to the backend.
    #[instrument(skip(self, draft))]
    pub async fn update_crypto(&self, id: &str, draft: &CryptoDraft) -> Result<()> {
        let url = format!("{}/cryptos/", self.base_url);

        debug!("Updating crypto {}", id);

        let mut crypto = serde_json::to_value(draft)?;
        crypto["_id"] = serde_json::Value::String(id.to_string());
        let body = serde_json::json!({ "crypto": crypto });

        let response = self
            .http
            .put(&url)
            .headers(self.default_headers())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            error!("Crypto update failed: HTTP {}: {}", status, body);
            return Err(Error::ApiError(format!("HTTP {}: {}", status, body)));
        }

        // The stored record changed
        if let Some(ref cache) = self.cache {
            cache.invalidate(id);
        }

        Ok(())
    }

    /// Delete a crypto by id
    #[instrument(skip(self))]
    pub async fn delete_crypto(&self, id: &str) -> Result<()> {
        let url = format!("{}/cryptos/{}", self.base_url, id);

        debug!("Deleting crypto {}", id);

        let response = self
            .http
            .delete(&url)
            .headers(self.default_headers())
            .bearer_auth(&self.token)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            error!("Crypto delete failed: HTTP {}: {}", status, body);
            return Err(Error::ApiError(format!("HTTP {}: {}", status, body)));
        }

        if let Some(ref cache) = self.cache {
            cache.invalidate(id);
        }

        Ok(())
    }

    /// Get all users
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let url = format!("{}/utilisateurs/", self.base_url);

        debug!("Fetching user listing from: {}", url);

        let response = self
            .http
            .get(&url)
            .headers(self.default_headers())
            .bearer_auth(&self.token)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let response = response.error_for_status().map_err(|e| {
            error!("User listing request failed: {}", e);
            Error::ApiError(e.to_string())
        })?;

        let data: UsersResponse = response.json().await.map_err(|e| {
            error!("Failed to parse user listing: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        debug!("Fetched {} users", data.users.len());
        Ok(data.users)
    }

    /// Get a single user with their wallet
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> Result<User> {
        let url = format!("{}/utilisateurs/{}", self.base_url, id);

        let response = self
            .http
            .get(&url)
            .headers(self.default_headers())
            .bearer_auth(&self.token)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let response = response.error_for_status().map_err(|e| {
            error!("User request failed: {}", e);
            Error::ApiError(e.to_string())
        })?;

        let wrapper: UserResponse = response.json().await.map_err(|e| {
            error!("Failed to parse user response: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        debug!(
            "User fetched: {} ({} positions)",
            wrapper.user.name,
            wrapper.user.wallet.len()
        );
        Ok(wrapper.user)
    }

    /// Register a new user
    #[instrument(skip(self, draft))]
    pub async fn create_user(&self, draft: &UserDraft) -> Result<()> {
        let url = format!("{}/utilisateurs/", self.base_url);

        debug!("Creating user {}", draft.name);

        let body = serde_json::json!({ "utilisateur": draft });

        let response = self
            .http
            .post(&url)
            .headers(self.default_headers())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            error!("User create failed: HTTP {}: {}", status, body);
            return Err(Error::ApiError(format!("HTTP {}: {}", status, body)));
        }

        Ok(())
    }

    /// Rewrite a user record wholesale
    ///
    /// The backend replaces the stored record with this one, which is
    /// why `User` round-trips fields it does not model.
    #[instrument(skip(self, user))]
    pub async fn update_user(&self, user: &User) -> Result<()> {
        let url = format!("{}/utilisateurs/", self.base_url);

        debug!(
            "Updating user {} ({} positions)",
            user.id,
            user.wallet.len()
        );

        let body = serde_json::json!({ "utilisateur": user });

        let response = self
            .http
            .put(&url)
            .headers(self.default_headers())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            error!("User update failed: HTTP {}: {}", status, body);
            return Err(Error::ApiError(format!("HTTP {}: {}", status, body)));
        }

        Ok(())
    }

    /// Delete a user by id
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        let url = format!("{}/utilisateurs/{}", self.base_url, id);

        debug!("Deleting user {}", id);

        let response = self
            .http
            .delete(&url)
            .headers(self.default_headers())
            .bearer_auth(&self.token)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            error!("User delete failed: HTTP {}: {}", status, body);
            return Err(Error::ApiError(format!("HTTP {}: {}", status, body)));
        }

        Ok(())
    }

    /// Record a transaction
    #[instrument(skip(self, draft))]
    pub async fn create_transaction(&self, draft: &TransactionDraft) -> Result<()> {
        let url = format!("{}/transactions/", self.base_url);

        debug!(
            "Recording {} of crypto {} for user {}",
            draft.kind, draft.crypto_id, draft.user_id
        );

        let body = serde_json::json!({ "transaction": draft });

        let response = self
            .http
            .post(&url)
            .headers(self.default_headers())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            error!("Transaction create failed: HTTP {}: {}", status, body);
            return Err(Error::ApiError(format!("HTTP {}: {}", status, body)));
        }

        Ok(())
    }

    /// Get all transactions recorded for a user
    #[instrument(skip(self))]
    pub async fn user_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let url = format!(
            "{}/transactions/transaction_utilisateur/{}",
            self.base_url, user_id
        );

        debug!("Fetching transactions from: {}", url);

        let response = self
            .http
            .get(&url)
            .headers(self.default_headers())
            .bearer_auth(&self.token)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let response = response.error_for_status().map_err(|e| {
            error!("Transactions request failed: {}", e);
            Error::ApiError(e.to_string())
        })?;

        let data: TransactionsResponse = response.json().await.map_err(|e| {
            error!("Failed to parse transactions: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        debug!("Fetched {} transactions", data.transactions.len());
        Ok(data.transactions)
    }

    /// Delete every transaction recorded for a user
    #[instrument(skip(self))]
    pub async fn delete_user_transactions(&self, user_id: &str) -> Result<()> {
        let url = format!(
            "{}/transactions/transaction_utilisateur/{}",
            self.base_url, user_id
        );

        debug!("Deleting all transactions for user {}", user_id);

        let response = self
            .http
            .delete(&url)
            .headers(self.default_headers())
            .bearer_auth(&self.token)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            error!("Transaction purge failed: HTTP {}: {}", status, body);
            return Err(Error::ApiError(format!("HTTP {}: {}", status, body)));
        }

        Ok(())
    }

    /// Delete a single transaction record
    #[instrument(skip(self))]
    pub async fn delete_transaction(&self, id: &str) -> Result<()> {
        let url = format!("{}/transactions/{}", self.base_url, id);

        debug!("Deleting transaction {}", id);

        let response = self
            .http
            .delete(&url)
            .headers(self.default_headers())
            .bearer_auth(&self.token)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            error!("Transaction delete failed: HTTP {}: {}", status, body);
            return Err(Error::ApiError(format!("HTTP {}: {}", status, body)));
        }

        Ok(())
    }

    /// Backend origin this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the bearer token (for re-authentication checks)
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Get a reference to the cache (if one is attached)
    pub fn cache(&self) -> Option<&Arc<CryptoCache>> {
        self.cache.as_ref()
    }
}
