/// Sample data for empty databases
///
/// Each table is filled only when it has no rows yet.
use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use crate::models::{Campanha, Doacao, FormaArrecadacao, StatusArrecadacao, TipoDoacao, Usuario};
use crate::repository::{
    store_failure, CampanhaRepository, DoacaoRepository, RepositoryResult, UsuarioRepository,
};

pub async fn seed_if_empty(pool: &SqlitePool) -> RepositoryResult<()> {
    let usuarios = UsuarioRepository::new(pool.clone());
    if count(pool, "Usuario").await? == 0 {
        for usuario in sample_usuarios() {
            usuarios.create(&usuario).await?;
        }
        tracing::info!("Seeded sample users");
    }

    let campanhas = CampanhaRepository::new(pool.clone());
    if count(pool, "Campanha").await? == 0 {
        for campanha in sample_campanhas() {
            campanhas.create(&campanha).await?;
        }
        tracing::info!("Seeded sample campaigns");
    }

    if count(pool, "Doacao").await? == 0 {
        let usuario_ids: Vec<i64> = usuarios.list().await?.iter().map(|u| u.cd_cliente).collect();
        let campanha_ids: Vec<i64> = campanhas.list().await?.iter().map(|c| c.cd_campanha).collect();

        if usuario_ids.len() >= 2 && campanha_ids.len() >= 2 {
            let doacoes = DoacaoRepository::new(pool.clone());
            doacoes
                .create(&sample_doacao(
                    usuario_ids[0],
                    campanha_ids[0],
                    "Doação de roupas",
                    TipoDoacao::Roupas,
                    FormaArrecadacao::Entrega,
                    StatusArrecadacao::Pendente,
                ))
                .await?;
            doacoes
                .create(&sample_doacao(
                    usuario_ids[1],
                    campanha_ids[1],
                    "Doação em dinheiro",
                    TipoDoacao::Dinheiro,
                    FormaArrecadacao::Pix,
                    StatusArrecadacao::Confirmada,
                ))
                .await?;
            tracing::info!("Seeded sample donations");
        }
    }

    Ok(())
}

// `table` is always one of the literals above.
async fn count(pool: &SqlitePool, table: &'static str) -> RepositoryResult<i64> {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .map_err(store_failure(table, "count", None))
}

fn sample_usuarios() -> Vec<Usuario> {
    vec![
        Usuario {
            cd_cliente: 0,
            nome_completo: "João Silva Santos".to_string(),
            telefone: Some("11999990000".to_string()),
            cpf: Some("12345678901".to_string()),
            cep: Some("01000-000".to_string()),
            nome_usuario: "joao123".to_string(),
            senha: "123456".to_string(),
            email: "joao@example.com".to_string(),
        },
        Usuario {
            cd_cliente: 0,
            nome_completo: "Maria Oliveira".to_string(),
            telefone: Some("11988880000".to_string()),
            cpf: Some("98765432100".to_string()),
            cep: Some("02000-000".to_string()),
            nome_usuario: "maria456".to_string(),
            senha: "123456".to_string(),
            email: "maria@example.com".to_string(),
        },
    ]
}

fn sample_campanhas() -> Vec<Campanha> {
    let today = Utc::now().date_naive();
    vec![
        Campanha {
            cd_campanha: 0,
            nome_campanha: "Campanha do Agasalho 2024".to_string(),
            meta_arrecadacao: Some(10000.0),
            inicio: Some(today - Duration::days(30)),
            fim: Some(today + Duration::days(60)),
        },
        Campanha {
            cd_campanha: 0,
            nome_campanha: "Natal Solidário".to_string(),
            meta_arrecadacao: Some(20000.0),
            inicio: Some(today - Duration::days(10)),
            fim: Some(today + Duration::days(90)),
        },
    ]
}

fn sample_doacao(
    cd_cliente: i64,
    cd_campanha: i64,
    nome_doacao: &str,
    tipo_doacao: TipoDoacao,
    forma_arrecadacao: FormaArrecadacao,
    status_arrecadacao: StatusArrecadacao,
) -> Doacao {
    Doacao {
        cd_doacao: 0,
        cd_cliente,
        cd_campanha,
        nome_doacao: nome_doacao.to_string(),
        tipo_doacao,
        forma_arrecadacao: Some(forma_arrecadacao),
        status_arrecadacao,
        usuario: None,
        campanha: None,
    }
}
