/// Database connection and schema creation
pub mod database;

/// Application settings loaded from pos.toml
pub mod settings;
