use sqlx::SqlitePool;

use super::{
    store_failure, CampanhaRepository, RepositoryError, RepositoryResult, UsuarioRepository,
};
use crate::models::Doacao;

pub struct DoacaoRepository {
    pool: SqlitePool,
}

impl DoacaoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all donations with their donor and campaign
    pub async fn list(&self) -> RepositoryResult<Vec<Doacao>> {
        let doacoes = sqlx::query_as::<_, Doacao>(
            r#"
            SELECT cd_doacao, cd_cliente, cd_campanha, nome_doacao,
                   tipo_doacao, forma_arrecadacao, status_arrecadacao
            FROM Doacao
            ORDER BY cd_doacao
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_failure("Doacao", "list", None))?;

        self.hydrate(doacoes).await
    }

    pub async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Doacao>> {
        match self.fetch(id).await? {
            Some(doacao) => Ok(self.hydrate(vec![doacao]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn fetch(&self, id: i64) -> RepositoryResult<Option<Doacao>> {
        let doacao = sqlx::query_as::<_, Doacao>(
            r#"
            SELECT cd_doacao, cd_cliente, cd_campanha, nome_doacao,
                   tipo_doacao, forma_arrecadacao, status_arrecadacao
            FROM Doacao
            WHERE cd_doacao = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_failure("Doacao", "get_by_id", Some(id)))?;

        Ok(doacao)
    }

    /// Insert a donation after checking the donor and campaign exist
    pub async fn create(&self, doacao: &Doacao) -> RepositoryResult<Doacao> {
        self.ensure_usuario(doacao.cd_cliente).await?;
        self.ensure_campanha(doacao.cd_campanha).await?;

        let created = sqlx::query_as::<_, Doacao>(
            r#"
            INSERT INTO Doacao (cd_cliente, cd_campanha, nome_doacao, tipo_doacao,
                                forma_arrecadacao, status_arrecadacao)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING cd_doacao, cd_cliente, cd_campanha, nome_doacao,
                      tipo_doacao, forma_arrecadacao, status_arrecadacao
            "#,
        )
        .bind(doacao.cd_cliente)
        .bind(doacao.cd_campanha)
        .bind(&doacao.nome_doacao)
        .bind(doacao.tipo_doacao)
        .bind(doacao.forma_arrecadacao)
        .bind(doacao.status_arrecadacao)
        .fetch_one(&self.pool)
        .await
        .map_err(store_failure("Doacao", "create", None))?;

        tracing::info!(
            id = created.cd_doacao,
            cd_cliente = created.cd_cliente,
            cd_campanha = created.cd_campanha,
            tipo_doacao = %created.tipo_doacao,
            status = %created.status_arrecadacao,
            "Doacao created"
        );
        Ok(created)
    }

    /// Replace every mutable field; references are re-checked only when they change
    pub async fn update(&self, id: i64, doacao: &Doacao) -> RepositoryResult<Option<Doacao>> {
        let Some(existing) = self.fetch(id).await? else {
            return Ok(None);
        };

        if existing.cd_cliente != doacao.cd_cliente {
            self.ensure_usuario(doacao.cd_cliente).await?;
        }
        if existing.cd_campanha != doacao.cd_campanha {
            self.ensure_campanha(doacao.cd_campanha).await?;
        }

        sqlx::query(
            r#"
            UPDATE Doacao
            SET cd_cliente = ?, cd_campanha = ?, nome_doacao = ?, tipo_doacao = ?,
                forma_arrecadacao = ?, status_arrecadacao = ?
            WHERE cd_doacao = ?
            "#,
        )
        .bind(doacao.cd_cliente)
        .bind(doacao.cd_campanha)
        .bind(&doacao.nome_doacao)
        .bind(doacao.tipo_doacao)
        .bind(doacao.forma_arrecadacao)
        .bind(doacao.status_arrecadacao)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(store_failure("Doacao", "update", Some(id)))?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM Doacao WHERE cd_doacao = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_failure("Doacao", "delete", Some(id)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn ensure_usuario(&self, cd_cliente: i64) -> RepositoryResult<()> {
        if UsuarioRepository::new(self.pool.clone()).exists(cd_cliente).await? {
            Ok(())
        } else {
            Err(RepositoryError::InvalidReference(format!(
                "Usuário {} não encontrado",
                cd_cliente
            )))
        }
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

    async fn hydrate(&self, mut doacoes: Vec<Doacao>) -> RepositoryResult<Vec<Doacao>> {
        let cliente_ids: Vec<i64> = doacoes.iter().map(|d| d.cd_cliente).collect();
        let campanha_ids: Vec<i64> = doacoes.iter().map(|d| d.cd_campanha).collect();

        let usuarios = UsuarioRepository::new(self.pool.clone())
            .find_by_ids(&cliente_ids)
            .await?;
        let campanhas = CampanhaRepository::new(self.pool.clone())
            .find_by_ids(&campanha_ids)
            .await?;

        for doacao in &mut doacoes {
            doacao.usuario = usuarios.get(&doacao.cd_cliente).cloned();
            doacao.campanha = campanhas.get(&doacao.cd_campanha).cloned();
        }

        Ok(doacoes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Campanha, FormaArrecadacao, StatusArrecadacao, TipoDoacao, Usuario};
    use crate::repository::test_pool;
    use pretty_assertions::assert_eq;

    async fn parents(pool: &SqlitePool) -> (i64, i64) {
        let usuario = UsuarioRepository::new(pool.clone())
            .create(&Usuario {
                cd_cliente: 0,
                nome_completo: "João Silva Santos".to_string(),
                telefone: None,
                cpf: None,
                cep: None,
                nome_usuario: "joao123".to_string(),
                senha: "123456".to_string(),
                email: "joao@example.com".to_string(),
            })
            .await
            .unwrap();
        let campanha = CampanhaRepository::new(pool.clone())
            .create(&Campanha {
                cd_campanha: 0,
                nome_campanha: "Natal Solidário".to_string(),
                meta_arrecadacao: Some(20000.0),
                inicio: None,
                fim: None,
            })
            .await
            .unwrap();
        (usuario.cd_cliente, campanha.cd_campanha)
    }

    fn doacao(cd_cliente: i64, cd_campanha: i64) -> Doacao {
        Doacao {
            cd_doacao: 0,
            cd_cliente,
            cd_campanha,
            nome_doacao: "Doação em dinheiro".to_string(),
            tipo_doacao: TipoDoacao::Dinheiro,
            forma_arrecadacao: Some(FormaArrecadacao::Pix),
            status_arrecadacao: StatusArrecadacao::Confirmada,
            usuario: None,
            campanha: None,
        }
    }

    #[actix_rt::test]
    async fn test_reads_are_hydrated() {
        let pool = test_pool().await;
        let (cd_cliente, cd_campanha) = parents(&pool).await;
        let repo = DoacaoRepository::new(pool);

        let created = repo.create(&doacao(cd_cliente, cd_campanha)).await.unwrap();
        assert!(created.usuario.is_none());
        assert_eq!(created.forma_arrecadacao, Some(FormaArrecadacao::Pix));

        let loaded = repo.get_by_id(created.cd_doacao).await.unwrap().unwrap();
        assert_eq!(loaded.usuario.as_ref().unwrap().nome_usuario, "joao123");
        assert_eq!(loaded.campanha.as_ref().unwrap().nome_campanha, "Natal Solidário");

        let all = repo.list().await.unwrap();
        assert_eq!(all, vec![loaded]);
    }

    #[actix_rt::test]
    async fn test_missing_reference_persists_nothing() {
        let pool = test_pool().await;
        let (cd_cliente, _) = parents(&pool).await;
        let repo = DoacaoRepository::new(pool);

        let err = repo.create(&doacao(cd_cliente, 999)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidReference(ref m) if m == "Campanha 999 não encontrada"));

        let err = repo.create(&doacao(999, 1)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidReference(ref m) if m == "Usuário 999 não encontrado"));

        assert!(repo.list().await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_update_is_idempotent() {
        let pool = test_pool().await;
        let (cd_cliente, cd_campanha) = parents(&pool).await;
        let repo = DoacaoRepository::new(pool);
        let created = repo.create(&doacao(cd_cliente, cd_campanha)).await.unwrap();

        let mut changes = created.clone();
        changes.status_arrecadacao = StatusArrecadacao::Recebida;
        changes.forma_arrecadacao = None;

        let first = repo.update(created.cd_doacao, &changes).await.unwrap().unwrap();
        let second = repo.update(created.cd_doacao, &changes).await.unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(second.status_arrecadacao, StatusArrecadacao::Recebida);
        assert!(second.usuario.is_some());

        changes.cd_campanha = 999;
        let err = repo.update(created.cd_doacao, &changes).await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidReference(_)));
    }

    #[actix_rt::test]
    async fn test_parent_with_donations_cannot_be_deleted() {
        let pool = test_pool().await;
        let (cd_cliente, cd_campanha) = parents(&pool).await;
        DoacaoRepository::new(pool.clone())
            .create(&doacao(cd_cliente, cd_campanha))
            .await
            .unwrap();

        let err = CampanhaRepository::new(pool.clone())
            .delete(cd_campanha)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Store(_)));

        let err = UsuarioRepository::new(pool).delete(cd_cliente).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Store(_)));
    }
}
