use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{Campanha, TipoRelatorio};

/// Spending report attached to a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, FromRow)]
pub struct Relatorio {
    #[serde(default)]
    pub cd_relatorio: i64,
    pub cd_campanha: i64,
    pub tipo_relatorio: TipoRelatorio,
    pub valor_gasto: Option<f64>,
    pub data_relatorio: NaiveDate,
    #[sqlx(skip)]
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub campanha: Option<Campanha>,
}
