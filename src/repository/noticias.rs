use sqlx::SqlitePool;

use super::{store_failure, CampanhaRepository, RepositoryError, RepositoryResult};
use crate::models::Noticia;

pub struct NoticiaRepository {
    pool: SqlitePool,
}

impl NoticiaRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all news posts with their campaign
    pub async fn list(&self) -> RepositoryResult<Vec<Noticia>> {
        let noticias = sqlx::query_as::<_, Noticia>(
            r#"
            SELECT cd_noticias, cd_campanha, titulo_noticia, data_noticia, autor, conteudo
            FROM Noticias
            ORDER BY cd_noticias
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_failure("Noticias", "list", None))?;

        self.hydrate(noticias).await
    }

    pub async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Noticia>> {
        match self.fetch(id).await? {
            Some(noticia) => Ok(self.hydrate(vec![noticia]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn fetch(&self, id: i64) -> RepositoryResult<Option<Noticia>> {
        let noticia = sqlx::query_as::<_, Noticia>(
            r#"
            SELECT cd_noticias, cd_campanha, titulo_noticia, data_noticia, autor, conteudo
            FROM Noticias
            WHERE cd_noticias = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_failure("Noticias", "get_by_id", Some(id)))?;

        Ok(noticia)
    }

    pub async fn create(&self, noticia: &Noticia) -> RepositoryResult<Noticia> {
        self.ensure_campanha(noticia.cd_campanha).await?;

        let created = sqlx::query_as::<_, Noticia>(
            r#"
            INSERT INTO Noticias (cd_campanha, titulo_noticia, data_noticia, autor, conteudo)
            VALUES (?, ?, ?, ?, ?)
            RETURNING cd_noticias, cd_campanha, titulo_noticia, data_noticia, autor, conteudo
            "#,
        )
        .bind(noticia.cd_campanha)
        .bind(&noticia.titulo_noticia)
        .bind(noticia.data_noticia)
        .bind(&noticia.autor)
        .bind(&noticia.conteudo)
        .fetch_one(&self.pool)
        .await
        .map_err(store_failure("Noticias", "create", None))?;

        tracing::info!(id = created.cd_noticias, cd_campanha = created.cd_campanha, "Noticia created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, noticia: &Noticia) -> RepositoryResult<Option<Noticia>> {
        let Some(existing) = self.fetch(id).await? else {
            return Ok(None);
        };

        if existing.cd_campanha != noticia.cd_campanha {
            self.ensure_campanha(noticia.cd_campanha).await?;
        }

        sqlx::query(
            r#"
            UPDATE Noticias
            SET cd_campanha = ?, titulo_noticia = ?, data_noticia = ?, autor = ?, conteudo = ?
            WHERE cd_noticias = ?
            "#,
        )
        .bind(noticia.cd_campanha)
        .bind(&noticia.titulo_noticia)
        .bind(noticia.data_noticia)
        .bind(&noticia.autor)
        .bind(&noticia.conteudo)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(store_failure("Noticias", "update", Some(id)))?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM Noticias WHERE cd_noticias = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_failure("Noticias", "delete", Some(id)))?;

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

    async fn hydrate(&self, mut noticias: Vec<Noticia>) -> RepositoryResult<Vec<Noticia>> {
        let ids: Vec<i64> = noticias.iter().map(|n| n.cd_campanha).collect();
        let campanhas = CampanhaRepository::new(self.pool.clone())
            .find_by_ids(&ids)
            .await?;

        for noticia in &mut noticias {
            noticia.campanha = campanhas.get(&noticia.cd_campanha).cloned();
        }

        Ok(noticias)
    }
}
