use std::collections::HashMap;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{distinct_ids, store_failure, RepositoryError, RepositoryResult, ID_CHUNK_SIZE};
use crate::models::Usuario;

pub struct UsuarioRepository {
    pool: SqlitePool,
}

impl UsuarioRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all users in id order
    pub async fn list(&self) -> RepositoryResult<Vec<Usuario>> {
        let usuarios = sqlx::query_as::<_, Usuario>(
            r#"
            SELECT cd_cliente, nome_completo, telefone, cpf, cep, nome_usuario, senha, email
            FROM Usuario
            ORDER BY cd_cliente
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_failure("Usuario", "list", None))?;

        Ok(usuarios)
    }

    pub async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Usuario>> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            SELECT cd_cliente, nome_completo, telefone, cpf, cep, nome_usuario, senha, email
            FROM Usuario
            WHERE cd_cliente = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_failure("Usuario", "get_by_id", Some(id)))?;

        Ok(usuario)
    }

    pub async fn get_by_email(&self, email: &str) -> RepositoryResult<Option<Usuario>> {
        self.get_by_unique("email", email).await
    }

    pub async fn get_by_nome_usuario(&self, nome_usuario: &str) -> RepositoryResult<Option<Usuario>> {
        self.get_by_unique("nome_usuario", nome_usuario).await
    }

    pub async fn get_by_cpf(&self, cpf: &str) -> RepositoryResult<Option<Usuario>> {
        self.get_by_unique("cpf", cpf).await
    }

    // `column` is always one of the literals above, never caller input.
    async fn get_by_unique(&self, column: &'static str, value: &str) -> RepositoryResult<Option<Usuario>> {
        let mut query_builder = QueryBuilder::<Sqlite>::new(
            "SELECT cd_cliente, nome_completo, telefone, cpf, cep, nome_usuario, senha, email FROM Usuario WHERE ",
        );
        query_builder.push(column);
        query_builder.push(" = ");
        query_builder.push_bind(value);

        let usuario = query_builder
            .build_query_as::<Usuario>()
            .fetch_optional(&self.pool)
            .await
            .map_err(store_failure("Usuario", "get_by_unique", None))?;

        Ok(usuario)
    }

    pub async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM Usuario WHERE cd_cliente = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(store_failure("Usuario", "exists", Some(id)))?;

        Ok(count > 0)
    }

    /// Load several users at once, keyed by id. Unknown ids are skipped.
    pub async fn find_by_ids(&self, ids: &[i64]) -> RepositoryResult<HashMap<i64, Usuario>> {
        let ids = distinct_ids(ids.iter().copied());
        let mut found = HashMap::with_capacity(ids.len());

        for chunk in ids.chunks(ID_CHUNK_SIZE) {
            let mut query_builder = QueryBuilder::<Sqlite>::new(
                "SELECT cd_cliente, nome_completo, telefone, cpf, cep, nome_usuario, senha, email FROM Usuario WHERE cd_cliente IN (",
            );
            let mut separated = query_builder.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");

            let rows = query_builder
                .build_query_as::<Usuario>()
                .fetch_all(&self.pool)
                .await
                .map_err(store_failure("Usuario", "find_by_ids", None))?;

            found.extend(rows.into_iter().map(|u| (u.cd_cliente, u)));
        }

        Ok(found)
    }

    /// Insert a user after checking email, username and cpf are free
    pub async fn create(&self, usuario: &Usuario) -> RepositoryResult<Usuario> {
        self.ensure_unique(usuario, None).await?;

        let created = sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO Usuario (nome_completo, telefone, cpf, cep, nome_usuario, senha, email)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING cd_cliente, nome_completo, telefone, cpf, cep, nome_usuario, senha, email
            "#,
        )
        .bind(&usuario.nome_completo)
        .bind(&usuario.telefone)
        .bind(&usuario.cpf)
        .bind(&usuario.cep)
        .bind(&usuario.nome_usuario)
        .bind(&usuario.senha)
        .bind(&usuario.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, usuario, "create", None))?;

        tracing::info!(id = created.cd_cliente, "Usuario created");
        Ok(created)
    }

    /// Replace every mutable field; unique fields are re-checked only when they change.
    /// An empty `senha` keeps the stored one.
    pub async fn update(&self, id: i64, usuario: &Usuario) -> RepositoryResult<Option<Usuario>> {
        let Some(existing) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        self.ensure_unique(usuario, Some(&existing)).await?;

        let updated = sqlx::query_as::<_, Usuario>(
            r#"
            UPDATE Usuario
            SET nome_completo = ?, telefone = ?, cpf = ?, cep = ?,
                nome_usuario = ?, senha = COALESCE(NULLIF(?, ''), senha), email = ?
            WHERE cd_cliente = ?
            RETURNING cd_cliente, nome_completo, telefone, cpf, cep, nome_usuario, senha, email
            "#,
        )
        .bind(&usuario.nome_completo)
        .bind(&usuario.telefone)
        .bind(&usuario.cpf)
        .bind(&usuario.cep)
        .bind(&usuario.nome_usuario)
        .bind(&usuario.senha)
        .bind(&usuario.email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unique_violation(e, usuario, "update", Some(id)))?;

        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM Usuario WHERE cd_cliente = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_failure("Usuario", "delete", Some(id)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn ensure_unique(&self, usuario: &Usuario, existing: Option<&Usuario>) -> RepositoryResult<()> {
        if existing.map_or(true, |e| e.email != usuario.email)
            && self.get_by_email(&usuario.email).await?.is_some()
        {
            return Err(RepositoryError::Duplicate(email_taken(&usuario.email)));
        }

        if existing.map_or(true, |e| e.nome_usuario != usuario.nome_usuario)
            && self.get_by_nome_usuario(&usuario.nome_usuario).await?.is_some()
        {
            return Err(RepositoryError::Duplicate(nome_usuario_taken(&usuario.nome_usuario)));
        }

        if let Some(cpf) = usuario.cpf.as_deref() {
            if existing.map_or(true, |e| e.cpf.as_deref() != Some(cpf))
                && self.get_by_cpf(cpf).await?.is_some()
            {
                return Err(RepositoryError::Duplicate(cpf_taken(cpf)));
            }
        }

        Ok(())
    }
}

fn email_taken(email: &str) -> String {
    format!("Email {} já está em uso", email)
}

fn nome_usuario_taken(nome_usuario: &str) -> String {
    format!("Nome de usuário {} já está em uso", nome_usuario)
}

fn cpf_taken(cpf: &str) -> String {
    format!("CPF {} já está em uso", cpf)
}

/// Turns a unique index violation into `Duplicate`; a concurrent writer can
/// take the value between the check and the write.
fn unique_violation(
    e: sqlx::Error,
    usuario: &Usuario,
    operation: &'static str,
    id: Option<i64>,
) -> RepositoryError {
    let message = e
        .as_database_error()
        .filter(|db| db.is_unique_violation())
        .map(|db| db.message().to_string());
    let Some(message) = message else {
        return store_failure("Usuario", operation, id)(e);
    };

    tracing::warn!(error = %e, operation, id, "Unique index rejected Usuario write");

    let duplicate = if message.contains("Usuario.email") {
        email_taken(&usuario.email)
    } else if message.contains("Usuario.nome_usuario") {
        nome_usuario_taken(&usuario.nome_usuario)
    } else if message.contains("Usuario.cpf") {
        cpf_taken(usuario.cpf.as_deref().unwrap_or_default())
    } else {
        "Usuário já cadastrado".to_string()
    };

    RepositoryError::Duplicate(duplicate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_pool;
    use pretty_assertions::assert_eq;

    fn usuario(nome_usuario: &str, email: &str, cpf: Option<&str>) -> Usuario {
        Usuario {
            cd_cliente: 0,
            nome_completo: "Ana Souza".to_string(),
            telefone: None,
            cpf: cpf.map(str::to_string),
            cep: None,
            nome_usuario: nome_usuario.to_string(),
            senha: "pw".to_string(),
            email: email.to_string(),
        }
    }

    #[actix_rt::test]
    async fn test_create_and_lookup() {
        let repo = UsuarioRepository::new(test_pool().await);
        let created = repo
            .create(&usuario("ana1", "a@x.com", Some("12345678901")))
            .await
            .unwrap();
        assert!(created.cd_cliente > 0);
        assert_eq!(created.senha, "pw");

        let by_email = repo.get_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.cd_cliente, created.cd_cliente);
        assert!(repo.get_by_nome_usuario("ana1").await.unwrap().is_some());
        assert!(repo.get_by_cpf("12345678901").await.unwrap().is_some());
        assert!(repo.get_by_email("b@x.com").await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_duplicates_rejected_on_create() {
        let repo = UsuarioRepository::new(test_pool().await);
        repo.create(&usuario("ana1", "a@x.com", Some("111"))).await.unwrap();

        let err = repo.create(&usuario("ana2", "a@x.com", None)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(ref m) if m == "Email a@x.com já está em uso"));

        let err = repo.create(&usuario("ana1", "b@x.com", None)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(ref m) if m.contains("ana1")));

        let err = repo.create(&usuario("ana3", "c@x.com", Some("111"))).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(ref m) if m.contains("CPF 111")));

        // users without cpf do not collide with each other
        repo.create(&usuario("ana4", "d@x.com", None)).await.unwrap();
        repo.create(&usuario("ana5", "e@x.com", None)).await.unwrap();

        assert_eq!(repo.list().await.unwrap().len(), 3);
    }

    #[actix_rt::test]
    async fn test_update_rechecks_only_changed_fields() {
        let repo = UsuarioRepository::new(test_pool().await);
        let ana = repo.create(&usuario("ana1", "a@x.com", Some("111"))).await.unwrap();
        repo.create(&usuario("bia1", "b@x.com", None)).await.unwrap();

        let mut same = ana.clone();
        same.nome_completo = "Ana Maria Souza".to_string();
        let updated = repo.update(ana.cd_cliente, &same).await.unwrap().unwrap();
        assert_eq!(updated.nome_completo, "Ana Maria Souza");
        assert_eq!(updated.email, "a@x.com");

        let mut taken = ana.clone();
        taken.email = "b@x.com".to_string();
        let err = repo.update(ana.cd_cliente, &taken).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(_)));

        assert!(repo.update(999, &same).await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_update_without_senha_keeps_stored_one() {
        let repo = UsuarioRepository::new(test_pool().await);
        let ana = repo.create(&usuario("ana1", "a@x.com", None)).await.unwrap();

        let mut changes = ana.clone();
        changes.senha = String::new();
        changes.cep = Some("01001000".to_string());
        let updated = repo.update(ana.cd_cliente, &changes).await.unwrap().unwrap();
        assert_eq!(updated.senha, "pw");
        assert_eq!(updated.cep.as_deref(), Some("01001000"));

        changes.senha = "nova".to_string();
        let updated = repo.update(ana.cd_cliente, &changes).await.unwrap().unwrap();
        assert_eq!(updated.senha, "nova");
    }

    #[actix_rt::test]
    async fn test_unique_index_error_maps_to_duplicate() {
        let pool = test_pool().await;
        let repo = UsuarioRepository::new(pool.clone());
        let ana = usuario("ana1", "a@x.com", Some("111"));
        repo.create(&ana).await.unwrap();

        // a write that skipped the pre-check, as a racing signup would
        let insert = "INSERT INTO Usuario (nome_completo, nome_usuario, senha, email, cpf) VALUES (?, ?, ?, ?, ?)";
        let e = sqlx::query(insert)
            .bind("Outra Ana")
            .bind("ana2")
            .bind("pw")
            .bind("a@x.com")
            .bind(None::<String>)
            .execute(&pool)
            .await
            .unwrap_err();
        let mapped = unique_violation(e, &usuario("ana2", "a@x.com", None), "create", None);
        assert!(matches!(mapped, RepositoryError::Duplicate(ref m) if m == "Email a@x.com já está em uso"));

        let e = sqlx::query(insert)
            .bind("Outra Ana")
            .bind("ana1")
            .bind("pw")
            .bind("b@x.com")
            .bind(None::<String>)
            .execute(&pool)
            .await
            .unwrap_err();
        let mapped = unique_violation(e, &usuario("ana1", "b@x.com", None), "create", None);
        assert!(matches!(mapped, RepositoryError::Duplicate(ref m) if m == "Nome de usuário ana1 já está em uso"));

        let e = sqlx::query(insert)
            .bind("Outra Ana")
            .bind("ana3")
            .bind("pw")
            .bind("c@x.com")
            .bind("111")
            .execute(&pool)
            .await
            .unwrap_err();
        let mapped = unique_violation(e, &usuario("ana3", "c@x.com", Some("111")), "create", None);
        assert!(matches!(mapped, RepositoryError::Duplicate(ref m) if m == "CPF 111 já está em uso"));

        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[actix_rt::test]
    async fn test_other_store_errors_stay_store() {
        let pool = test_pool().await;
        let e = sqlx::query("INSERT INTO Usuario (nome_completo, nome_usuario, senha, email) VALUES (NULL, ?, ?, ?)")
            .bind("ana1")
            .bind("pw")
            .bind("a@x.com")
            .execute(&pool)
            .await
            .unwrap_err();

        let mapped = unique_violation(e, &usuario("ana1", "a@x.com", None), "create", None);
        assert!(matches!(mapped, RepositoryError::Store(_)));
    }

    #[actix_rt::test]
    async fn test_delete_missing_returns_false() {
        let repo = UsuarioRepository::new(test_pool().await);
        assert!(!repo.delete(42).await.unwrap());
    }
}
