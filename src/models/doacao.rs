use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{Campanha, FormaArrecadacao, StatusArrecadacao, TipoDoacao, Usuario};

/// A donation made by a user to a campaign.
///
/// `usuario` and `campanha` are filled only on read paths and are ignored on
/// input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, FromRow)]
pub struct Doacao {
    #[serde(default)]
    pub cd_doacao: i64,
    pub cd_cliente: i64,
    pub cd_campanha: i64,
    #[validate(length(min = 1, max = 200))]
    pub nome_doacao: String,
    pub tipo_doacao: TipoDoacao,
    pub forma_arrecadacao: Option<FormaArrecadacao>,
    #[serde(default)]
    pub status_arrecadacao: StatusArrecadacao,
    #[sqlx(skip)]
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub usuario: Option<Usuario>,
    #[sqlx(skip)]
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub campanha: Option<Campanha>,
}
