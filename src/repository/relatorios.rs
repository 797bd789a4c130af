use sqlx::SqlitePool;

use super::{store_failure, CampanhaRepository, RepositoryError, RepositoryResult};
use crate::models::Relatorio;

pub struct RelatorioRepository {
    pool: SqlitePool,
}

impl RelatorioRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> RepositoryResult<Vec<Relatorio>> {
        let relatorios = sqlx::query_as::<_, Relatorio>(
            r#"
            SELECT cd_relatorio, cd_campanha, tipo_relatorio, valor_gasto, data_relatorio
            FROM Relatorio
            ORDER BY cd_relatorio
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_failure("Relatorio", "list", None))?;

        self.hydrate(relatorios).await
    }

    pub async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Relatorio>> {
        match self.fetch(id).await? {
            Some(relatorio) => Ok(self.hydrate(vec![relatorio]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn fetch(&self, id: i64) -> RepositoryResult<Option<Relatorio>> {
        let relatorio = sqlx::query_as::<_, Relatorio>(
            r#"
            SELECT cd_relatorio, cd_campanha, tipo_relatorio, valor_gasto, data_relatorio
            FROM Relatorio
            WHERE cd_relatorio = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_failure("Relatorio", "get_by_id", Some(id)))?;

        Ok(relatorio)
    }

    pub async fn create(&self, relatorio: &Relatorio) -> RepositoryResult<Relatorio> {
        self.ensure_campanha(relatorio.cd_campanha).await?;

        let created = sqlx::query_as::<_, Relatorio>(
            r#"
            INSERT INTO Relatorio (cd_campanha, tipo_relatorio, valor_gasto, data_relatorio)
            VALUES (?, ?, ?, ?)
            RETURNING cd_relatorio, cd_campanha, tipo_relatorio, valor_gasto, data_relatorio
            "#,
        )
        .bind(relatorio.cd_campanha)
        .bind(relatorio.tipo_relatorio)
        .bind(relatorio.valor_gasto)
        .bind(relatorio.data_relatorio)
        .fetch_one(&self.pool)
        .await
        .map_err(store_failure("Relatorio", "create", None))?;

        tracing::info!(
            id = created.cd_relatorio,
            cd_campanha = created.cd_campanha,
            tipo_relatorio = %created.tipo_relatorio,
            "Relatorio created"
        );
        Ok(created)
    }

    pub async fn update(&self, id: i64, relatorio: &Relatorio) -> RepositoryResult<Option<Relatorio>> {
        let Some(existing) = self.fetch(id).await? else {
            return Ok(None);
        };

        if existing.cd_campanha != relatorio.cd_campanha {
            self.ensure_campanha(relatorio.cd_campanha).await?;
        }

        sqlx::query(
            r#"
            UPDATE Relatorio
            SET cd_campanha = ?, tipo_relatorio = ?, valor_gasto = ?, data_relatorio = ?
            WHERE cd_relatorio = ?
            "#,
        )
        .bind(relatorio.cd_campanha)
        .bind(relatorio.tipo_relatorio)
        .bind(relatorio.valor_gasto)
        .bind(relatorio.data_relatorio)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(store_failure("Relatorio", "update", Some(id)))?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM Relatorio WHERE cd_relatorio = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_failure("Relatorio", "delete", Some(id)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn ensure_campanha(&self, cd_campanha: i64) -> RepositoryResult<()> {
        if CampanhaRepository::new(self.pool.clone()).exists(cd_campanha).await? {
            Ok(())
        } else {
            Err(RepositoryError::InvalidReference(format!(
                "Campanha {} não encontrada",
                cd_campanha
            )))
        }
    }

    async fn hydrate(&self, mut relatorios: Vec<Relatorio>) -> RepositoryResult<Vec<Relatorio>> {
        let ids: Vec<i64> = relatorios.iter().map(|r| r.cd_campanha).collect();
        let campanhas = CampanhaRepository::new(self.pool.clone())
            .find_by_ids(&ids)
            .await?;

        for relatorio in &mut relatorios {
            relatorio.campanha = campanhas.get(&relatorio.cd_campanha).cloned();
        }

        Ok(relatorios)
    }
}
