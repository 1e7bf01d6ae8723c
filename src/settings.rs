//! Persisted user preferences: the currency code and the notification/dark-mode flags.
//!
//! Each preference lives under its own datastore key. The currency code is stored as a raw
//! string; the boolean flags are stored as JSON booleans. Reads degrade to the default value
//! with a logged warning so a storage hiccup never breaks a session; writes surface their
//! errors to the caller.

use crate::currency::DEFAULT_CURRENCY;
use crate::storage::KeyValueStore;
use crate::LedgerError;
use tracing::warn;

const CURRENCY_KEY: &str = "currency";
const NOTIFICATIONS_KEY: &str = "notifications";
const DARK_MODE_KEY: &str = "dark_mode";

/// Access to the persisted preferences.
#[derive(Debug, Clone)]
pub struct Settings<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Settings<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The selected currency code, or [`DEFAULT_CURRENCY`] if never set. The code is an open
    /// string; it is not validated against a known set.
    pub async fn currency(&self) -> String {
        match self.store.get(CURRENCY_KEY).await {
            Ok(Some(code)) => code,
            Ok(None) => DEFAULT_CURRENCY.to_string(),
            Err(e) => {
                warn!("Failed to read the currency preference, using the default: {e}");
                DEFAULT_CURRENCY.to_string()
            }
        }
    }

    pub async fn set_currency(&self, code: &str) -> Result<(), LedgerError> {
        self.store.set(CURRENCY_KEY, code).await
    }

    /// Whether notifications are enabled. Defaults to true.
    pub async fn notifications_enabled(&self) -> bool {
        self.flag(NOTIFICATIONS_KEY, true).await
    }

    pub async fn set_notifications_enabled(&self, enabled: bool) -> Result<(), LedgerError> {
        self.set_flag(NOTIFICATIONS_KEY, enabled).await
    }

    /// Whether the dark theme is selected. Defaults to false.
    pub async fn dark_mode(&self) -> bool {
        self.flag(DARK_MODE_KEY, false).await
    }

    pub async fn set_dark_mode(&self, enabled: bool) -> Result<(), LedgerError> {
        self.set_flag(DARK_MODE_KEY, enabled).await
    }

    async fn flag(&self, key: &str, default: bool) -> bool {
        match self.store.get(key).await {
            Ok(Some(json)) => match serde_json::from_str::<bool>(&json) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Ignoring malformed '{key}' setting: {e}");
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                warn!("Failed to read the '{key}' setting, using the default: {e}");
                default
            }
        }
    }

    async fn set_flag(&self, key: &str, value: bool) -> Result<(), LedgerError> {
        // Serializing a bool cannot fail.
        let json = serde_json::to_string(&value).unwrap_or_default();
        self.store.set(key, &json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_currency_defaults_to_cop() {
        let settings = Settings::new(MemoryStore::new());
        assert_eq!(settings.currency().await, "COP");
    }

    #[tokio::test]
    async fn test_set_currency_round_trip() {
        let store = MemoryStore::new();
        let settings = Settings::new(store.clone());
        settings.set_currency("USD").await.unwrap();
        assert_eq!(settings.currency().await, "USD");

        // Stored as a raw string, not JSON.
        assert_eq!(store.get("currency").await.unwrap(), Some("USD".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_codes_are_not_rejected() {
        let settings = Settings::new(MemoryStore::new());
        settings.set_currency("EUR").await.unwrap();
        assert_eq!(settings.currency().await, "EUR");
    }

    #[tokio::test]
    async fn test_flag_defaults() {
        let settings = Settings::new(MemoryStore::new());
        assert!(settings.notifications_enabled().await);
        assert!(!settings.dark_mode().await);
    }

    #[tokio::test]
    async fn test_flags_persist_as_json_booleans() {
        let store = MemoryStore::new();
        let settings = Settings::new(store.clone());
        settings.set_notifications_enabled(false).await.unwrap();
        settings.set_dark_mode(true).await.unwrap();

        assert!(!settings.notifications_enabled().await);
        assert!(settings.dark_mode().await);
        assert_eq!(
            store.get("notifications").await.unwrap(),
            Some("false".to_string())
        );
        assert_eq!(store.get("dark_mode").await.unwrap(), Some("true".to_string()));
    }

    #[tokio::test]
    async fn test_malformed_flag_falls_back_to_default() {
        let store = MemoryStore::new();
        store.set("dark_mode", "not a bool").await.unwrap();
        let settings = Settings::new(store);
        assert!(!settings.dark_mode().await);
    }
}
