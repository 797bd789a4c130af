// Read-only projections joining donations with their donor and campaign

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::{store_failure, RepositoryResult};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct NomeUsuario {
    pub nome_completo: String,
    pub nome_usuario: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct DoacaoDetalhada {
    pub cd_doacao: i64,
    pub nome_doador: Option<String>,
    pub nome_campanha: Option<String>,
    pub nome_doacao: String,
    pub tipo_doacao: String,
    pub forma_arrecadacao: Option<String>,
    pub status_arrecadacao: String,
}

pub struct ViewRepository {
    pool: SqlitePool,
}

impl ViewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Full name and login of the user with the given login
    pub async fn buscar_nome(&self, nome_usuario: &str) -> RepositoryResult<Option<NomeUsuario>> {
        let nome = sqlx::query_as::<_, NomeUsuario>(
            r#"
            SELECT nome_completo, nome_usuario
            FROM Usuario
            WHERE nome_usuario = ?
            "#,
        )
        .bind(nome_usuario)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_failure("Usuario", "buscar_nome", None))?;

        Ok(nome)
    }

    /// Every donation flattened with donor and campaign names
    pub async fn doacoes_detalhadas(&self) -> RepositoryResult<Vec<DoacaoDetalhada>> {
        let rows = sqlx::query_as::<_, DoacaoDetalhada>(
            r#"
            SELECT d.cd_doacao,
                   u.nome_completo AS nome_doador,
                   c.nome_campanha,
                   d.nome_doacao,
                   d.tipo_doacao,
                   d.forma_arrecadacao,
                   d.status_arrecadacao
            FROM Doacao d
            LEFT JOIN Usuario u ON u.cd_cliente = d.cd_cliente
            LEFT JOIN Campanha c ON c.cd_campanha = d.cd_campanha
            ORDER BY d.cd_doacao
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_failure("Doacao", "doacoes_detalhadas", None))?;

        Ok(rows)
    }
}
