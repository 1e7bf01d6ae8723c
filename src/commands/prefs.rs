//! The preference commands: currency and settings.

use crate::args::{CurrencyArgs, SettingsArgs};
use crate::commands::Out;
use crate::{FileStore, Home, Result, Settings};
use serde::{Deserialize, Serialize};

/// The full set of persisted preferences, for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    pub currency: String,
    pub notifications: bool,
    pub dark_mode: bool,
}

/// Show the current currency, or switch to a new one. Codes are stored as given; an
/// unrecognized code simply falls back to plain formatting.
pub async fn currency(home: &Home, args: CurrencyArgs) -> Result<Out<String>> {
    let settings = Settings::new(FileStore::new(home));
    match args.code() {
        Some(code) => {
            settings.set_currency(code).await?;
            Ok(Out::new(format!("Currency set to {code}"), code.to_string()))
        }
        None => {
            let current = settings.currency().await;
            Ok(Out::new(format!("Currency is {current}"), current))
        }
    }
}

/// Show the persisted preferences, applying any toggles first.
pub async fn settings(home: &Home, args: SettingsArgs) -> Result<Out<Preferences>> {
    let settings = Settings::new(FileStore::new(home));

    if let Some(enabled) = args.notifications() {
        settings.set_notifications_enabled(enabled).await?;
    }
    if let Some(enabled) = args.dark_mode() {
        settings.set_dark_mode(enabled).await?;
    }

    let preferences = Preferences {
        currency: settings.currency().await,
        notifications: settings.notifications_enabled().await,
        dark_mode: settings.dark_mode().await,
    };
    let message = format!(
        "Currency: {}\nNotifications: {}\nDark mode: {}",
        preferences.currency,
        on_off(preferences.notifications),
        on_off(preferences.dark_mode),
    );
    Ok(Out::new(message, preferences))
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
