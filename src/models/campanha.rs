use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, FromRow)]
pub struct Campanha {
    #[serde(default)]
    pub cd_campanha: i64,
    #[validate(length(min = 1, max = 200))]
    pub nome_campanha: String,
    pub meta_arrecadacao: Option<f64>,
    pub inicio: Option<NaiveDate>,
    pub fim: Option<NaiveDate>,
}
