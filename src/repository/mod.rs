// Repository layer for database operations
// One repository per entity, each holding its own pool handle

pub mod campanhas;
pub mod doacoes;
pub mod noticias;
pub mod relatorios;
pub mod usuarios;
pub mod views;

pub use campanhas::CampanhaRepository;
pub use doacoes::DoacaoRepository;
pub use noticias::NoticiaRepository;
pub use relatorios::RelatorioRepository;
pub use usuarios::UsuarioRepository;
pub use views::{DoacaoDetalhada, NomeUsuario, ViewRepository};

use std::collections::BTreeSet;

use thiserror::Error;

/// Ids per `IN (...)` batch, kept under the SQLite bind parameter limit.
pub(crate) const ID_CHUNK_SIZE: usize = 500;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A foreign key points at a row that does not exist.
    #[error("{0}")]
    InvalidReference(String),
    /// A unique field is already taken by another row.
    #[error("{0}")]
    Duplicate(String),
    #[error("database error: {0}")]
    Store(#[from] sqlx::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Logs a store failure with its context and wraps it unchanged.
pub(crate) fn store_failure(
    entity: &'static str,
    operation: &'static str,
    id: Option<i64>,
) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |e| {
        tracing::error!(error = %e, entity, operation, id, "Database operation failed");
        RepositoryError::Store(e)
    }
}

/// Distinct ids in ascending order.
pub(crate) fn distinct_ids(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    let config = crate::config::DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        ..Default::default()
    };
    crate::infra::sqlite::init_sqlite(&config)
        .await
        .expect("in-memory database")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_ids_sorted() {
        assert_eq!(distinct_ids([3, 1, 3, 2, 1]), vec![1, 2, 3]);
        assert!(distinct_ids(Vec::new()).is_empty());
    }

    #[test]
    fn test_domain_errors_display_message() {
        let err = RepositoryError::Duplicate("Email a@x.com já está em uso".to_string());
        assert_eq!(err.to_string(), "Email a@x.com já está em uso");
    }
}
