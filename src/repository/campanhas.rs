use std::collections::HashMap;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{distinct_ids, store_failure, RepositoryResult, ID_CHUNK_SIZE};
use crate::models::Campanha;

pub struct CampanhaRepository {
    pool: SqlitePool,
}

impl CampanhaRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all campaigns in id order
    pub async fn list(&self) -> RepositoryResult<Vec<Campanha>> {
        let campanhas = sqlx::query_as::<_, Campanha>(
            r#"
            SELECT cd_campanha, nome_campanha, meta_arrecadacao, inicio, fim
            FROM Campanha
            ORDER BY cd_campanha
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_failure("Campanha", "list", None))?;

        Ok(campanhas)
    }

    /// Get campaign by id
    pub async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Campanha>> {
        let campanha = sqlx::query_as::<_, Campanha>(
            r#"
            SELECT cd_campanha, nome_campanha, meta_arrecadacao, inicio, fim
            FROM Campanha
            WHERE cd_campanha = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_failure("Campanha", "get_by_id", Some(id)))?;

        Ok(campanha)
    }

    pub async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM Campanha WHERE cd_campanha = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(store_failure("Campanha", "exists", Some(id)))?;

        Ok(count > 0)
    }

    /// Load several campaigns at once, keyed by id. Unknown ids are skipped.
    pub async fn find_by_ids(&self, ids: &[i64]) -> RepositoryResult<HashMap<i64, Campanha>> {
        let ids = distinct_ids(ids.iter().copied());
        let mut found = HashMap::with_capacity(ids.len());

        for chunk in ids.chunks(ID_CHUNK_SIZE) {
            let mut query_builder = QueryBuilder::<Sqlite>::new(
                "SELECT cd_campanha, nome_campanha, meta_arrecadacao, inicio, fim FROM Campanha WHERE cd_campanha IN (",
            );
            let mut separated = query_builder.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");

            let rows = query_builder
                .build_query_as::<Campanha>()
                .fetch_all(&self.pool)
                .await
                .map_err(store_failure("Campanha", "find_by_ids", None))?;

            found.extend(rows.into_iter().map(|c| (c.cd_campanha, c)));
        }

        Ok(found)
    }

    /// Insert a campaign; the id in the input is ignored
    pub async fn create(&self, campanha: &Campanha) -> RepositoryResult<Campanha> {
        let created = sqlx::query_as::<_, Campanha>(
            r#"
            INSERT INTO Campanha (nome_campanha, meta_arrecadacao, inicio, fim)
            VALUES (?, ?, ?, ?)
            RETURNING cd_campanha, nome_campanha, meta_arrecadacao, inicio, fim
            "#,
        )
        .bind(&campanha.nome_campanha)
        .bind(campanha.meta_arrecadacao)
        .bind(campanha.inicio)
        .bind(campanha.fim)
        .fetch_one(&self.pool)
        .await
        .map_err(store_failure("Campanha", "create", None))?;

        tracing::info!(id = created.cd_campanha, "Campanha created");
        Ok(created)
    }

    /// Replace every mutable field of an existing campaign
    pub async fn update(&self, id: i64, campanha: &Campanha) -> RepositoryResult<Option<Campanha>> {
        let updated = sqlx::query_as::<_, Campanha>(
            r#"
            UPDATE Campanha
            SET nome_campanha = ?, meta_arrecadacao = ?, inicio = ?, fim = ?
            WHERE cd_campanha = ?
            RETURNING cd_campanha, nome_campanha, meta_arrecadacao, inicio, fim
            "#,
        )
        .bind(&campanha.nome_campanha)
        .bind(campanha.meta_arrecadacao)
        .bind(campanha.inicio)
        .bind(campanha.fim)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_failure("Campanha", "update", Some(id)))?;

        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM Campanha WHERE cd_campanha = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_failure("Campanha", "delete", Some(id)))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_pool;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn campanha(nome: &str) -> Campanha {
        Campanha {
            cd_campanha: 0,
            nome_campanha: nome.to_string(),
            meta_arrecadacao: Some(10000.0),
            inicio: NaiveDate::from_ymd_opt(2024, 6, 1),
            fim: NaiveDate::from_ymd_opt(2024, 8, 31),
        }
    }

    #[actix_rt::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = CampanhaRepository::new(test_pool().await);

        let mut input = campanha("Agasalho");
        input.cd_campanha = 77;
        let first = repo.create(&input).await.unwrap();
        let second = repo.create(&campanha("Natal")).await.unwrap();

        assert!(first.cd_campanha > 0);
        assert_ne!(first.cd_campanha, 77);
        assert!(second.cd_campanha > first.cd_campanha);
        assert_eq!(first.inicio, input.inicio);

        let all = repo.list().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[actix_rt::test]
    async fn test_update_and_delete() {
        let repo = CampanhaRepository::new(test_pool().await);
        let created = repo.create(&campanha("Agasalho")).await.unwrap();

        let mut changes = campanha("Agasalho 2025");
        changes.meta_arrecadacao = None;
        let updated = repo
            .update(created.cd_campanha, &changes)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.cd_campanha, created.cd_campanha);
        assert_eq!(updated.nome_campanha, "Agasalho 2025");
        assert_eq!(updated.meta_arrecadacao, None);

        assert!(repo.update(999, &changes).await.unwrap().is_none());

        assert!(repo.delete(created.cd_campanha).await.unwrap());
        assert!(!repo.delete(created.cd_campanha).await.unwrap());
        assert!(repo.get_by_id(created.cd_campanha).await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_find_by_ids_skips_unknown() {
        let repo = CampanhaRepository::new(test_pool().await);
        let a = repo.create(&campanha("A")).await.unwrap();
        let b = repo.create(&campanha("B")).await.unwrap();

        let found = repo
            .find_by_ids(&[b.cd_campanha, a.cd_campanha, b.cd_campanha, 404])
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[&a.cd_campanha].nome_campanha, "A");

        assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
        assert!(repo.exists(a.cd_campanha).await.unwrap());
        assert!(!repo.exists(404).await.unwrap());
    }
}
