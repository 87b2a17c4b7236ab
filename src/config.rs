use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Get the data directory for the application.
pub fn get_data_dir() -> PathBuf {
    if let Ok(s) = std::env::var("SUN_WALLET_DATA") {
        PathBuf::from(s)
    } else if let Some(proj_dirs) = ProjectDirs::from("com", "sunwallet", "sun-wallet") {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

/// Get the config directory for the application.
pub fn get_config_dir() -> PathBuf {
    if let Ok(s) = std::env::var("SUN_WALLET_CONFIG") {
        PathBuf::from(s)
    } else if let Some(proj_dirs) = ProjectDirs::from("com", "sunwallet", "sun-wallet") {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    /// Base URL of the wallet API fronting the TRON network.
    pub api_url: String,
}

/// Push notification endpoint and application id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub url: String,
    pub app_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub notifications: NotificationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::testnet()
    }
}

impl Config {
    /// Create config from CLI args.
    pub fn new(network: &str, api_url: Option<&str>) -> Self {
        let mut config = Self::from_network(network);
        if let Some(url) = api_url {
            config.network.api_url = url.trim_end_matches('/').to_string();
        }
        config
    }

    pub fn testnet() -> Self {
        Self {
            network: NetworkConfig {
                name: "testnet".to_string(),
                api_url: "https://api.shasta.sunwallet.dev".to_string(),
            },
            notifications: NotificationConfig {
                url: "https://onesignal.com/api/v1/notifications".to_string(),
                app_id: "sun-wallet-testnet".to_string(),
            },
        }
    }

    pub fn mainnet() -> Self {
        Self {
            network: NetworkConfig {
                name: "mainnet".to_string(),
                api_url: "https://api.sunwallet.dev".to_string(),
            },
            notifications: NotificationConfig {
                url: "https://onesignal.com/api/v1/notifications".to_string(),
                app_id: "sun-wallet".to_string(),
            },
        }
    }

    pub fn devnet() -> Self {
        Self {
            network: NetworkConfig {
                name: "devnet".to_string(),
                api_url: "http://127.0.0.1:8090".to_string(),
            },
            notifications: NotificationConfig {
                url: "http://127.0.0.1:8091/notifications".to_string(),
                app_id: "sun-wallet-devnet".to_string(),
            },
        }
    }

    pub fn from_network(network: &str) -> Self {
        match network {
            "mainnet" => Self::mainnet(),
            "devnet" => Self::devnet(),
            _ => Self::testnet(),
        }
    }
}
