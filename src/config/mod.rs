pub mod settings;

pub use settings::{AppConfig, OutboxSettings, ServerSettings, StorageBackend, StorageSettings};
