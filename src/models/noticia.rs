use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::Campanha;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, FromRow)]
pub struct Noticia {
    #[serde(default)]
    pub cd_noticias: i64,
    pub cd_campanha: i64,
    #[validate(length(min = 1, max = 200))]
    pub titulo_noticia: String,
    pub data_noticia: NaiveDate,
    #[validate(length(max = 100))]
    pub autor: Option<String>,
    pub conteudo: Option<String>,
    #[sqlx(skip)]
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub campanha: Option<Campanha>,
}
