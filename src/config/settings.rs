use std::path::PathBuf;

use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Json,
    Sqlite,
}

impl StorageBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" | "file" => Some(StorageBackend::Json),
            "sqlite" | "db" => Some(StorageBackend::Sqlite),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub json_path: PathBuf,
    pub sqlite_path: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Json,
            json_path: PathBuf::from("data/local-tournaments.json"),
            sqlite_path: PathBuf::from("deck_log.db"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

#[derive(Debug, Clone)]
pub struct OutboxSettings {
    pub path: PathBuf,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
}

impl Default for OutboxSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/outbox.json"),
            user_agent: "DeckLog/0.1",
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageSettings,
    pub server: ServerSettings,
    pub outbox: OutboxSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            storage: StorageSettings::default(),
            server: ServerSettings::default(),
            outbox: OutboxSettings::default(),
        }
    }

    /// Defaults overridden by `DECK_LOG_BACKEND`, `DECK_LOG_DATA_FILE`,
    /// `DATABASE_PATH`, `DECK_LOG_PORT` and `DECK_LOG_OUTBOX`
    pub fn from_env() -> Self {
        let mut config = Self::new();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("DECK_LOG_BACKEND") {
            match StorageBackend::parse(&value) {
                Some(backend) => self.storage.backend = backend,
                None => warn!("Ignoring unknown DECK_LOG_BACKEND value: {}", value),
            }
        }
        if let Some(path) = lookup("DECK_LOG_DATA_FILE") {
            self.storage.json_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("DATABASE_PATH") {
            self.storage.sqlite_path = PathBuf::from(path);
        }
        if let Some(value) = lookup("DECK_LOG_PORT") {
            match value.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!("Ignoring invalid DECK_LOG_PORT value: {}", value),
            }
        }
        if let Some(path) = lookup("DECK_LOG_OUTBOX") {
            self.outbox.path = PathBuf::from(path);
        }
    }
}
