//! imagestream adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `assets`: Filesystem asset store
//! - `articles`: SQLite and in-memory article repositories
//! - `bitly`: Bit.ly URL-shortening client (plus a stub)
//! - `twitter`: Twitter publishing client (plus a stub)

mod articles_memory;
mod articles_sqlite;
mod assets_fs;

pub mod bitly;
pub mod twitter;

/// Re-exports for asset store adapters
pub mod assets {
    pub use crate::assets_fs::FsAssetStore;
}

/// Re-exports for article repository adapters
pub mod articles {
    pub use crate::articles_memory::InMemoryArticleRepository;
    pub use crate::articles_sqlite::SqliteArticleRepository;
}
