use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config::config;

/// Errors from the persistence gateway
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database not configured")]
    NotConfigured,

    #[error("Invalid collection name: {0}")]
    InvalidCollection(String),

    #[error("Unexpected row shape from collection: {0}")]
    UnexpectedRow(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Lazily-connected singleton pool for the dashboard datastore.
///
/// When DATABASE_URL is absent the datastore is considered unconfigured and
/// every operation fails with `DatabaseError::NotConfigured`; the process
/// itself stays up and non-datastore routes keep working.
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn pool() -> Result<PgPool, DatabaseError> {
        let cfg = &config().database;
        let url = cfg.url.as_deref().ok_or(DatabaseError::NotConfigured)?;

        let pool = POOL
            .get_or_try_init(|| async {
                let pool = PgPoolOptions::new()
                    .max_connections(cfg.max_connections)
                    .connect(url)
                    .await?;
                info!("connected to datastore");
                Ok::<_, sqlx::Error>(pool)
            })
            .await?;

        Ok(pool.clone())
    }

    /// Collection names come from route code, never from callers, but they
    /// are still interpolated into SQL and must be plain identifiers.
    pub fn ensure_identifier(name: &str) -> Result<(), DatabaseError> {
        let mut chars = name.chars();
        let valid = match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        };

        if valid && name.len() <= 63 {
            Ok(())
        } else {
            Err(DatabaseError::InvalidCollection(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_validation() {
        assert!(DatabaseManager::ensure_identifier("clients").is_ok());
        assert!(DatabaseManager::ensure_identifier("voice_agents").is_ok());
        assert!(DatabaseManager::ensure_identifier("_private").is_ok());

        assert!(DatabaseManager::ensure_identifier("").is_err());
        assert!(DatabaseManager::ensure_identifier("1clients").is_err());
        assert!(DatabaseManager::ensure_identifier("clients; drop table x").is_err());
        assert!(DatabaseManager::ensure_identifier("clients\"").is_err());
    }
}
