use serde::{Deserialize, Serialize};
use std::fmt;

/// What was donated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum TipoDoacao {
    Dinheiro,
    Roupas,
    Alimentos,
    Brinquedos,
    Moveis,
    Outros,
}

/// How the donation reaches the campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum FormaArrecadacao {
    Entrega,
    Coleta,
    #[serde(rename = "PIX")]
    #[sqlx(rename = "PIX")]
    Pix,
    Transferencia,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum StatusArrecadacao {
    #[default]
    Pendente,
    Confirmada,
    Recebida,
    Cancelada,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum TipoRelatorio {
    Financeiro,
    Distribuicao,
    Prestacao,
    Impacto,
}

impl TipoDoacao {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoDoacao::Dinheiro => "Dinheiro",
            TipoDoacao::Roupas => "Roupas",
            TipoDoacao::Alimentos => "Alimentos",
            TipoDoacao::Brinquedos => "Brinquedos",
            TipoDoacao::Moveis => "Moveis",
            TipoDoacao::Outros => "Outros",
        }
    }
}

impl FormaArrecadacao {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormaArrecadacao::Entrega => "Entrega",
            FormaArrecadacao::Coleta => "Coleta",
            FormaArrecadacao::Pix => "PIX",
            FormaArrecadacao::Transferencia => "Transferencia",
        }
    }
}

impl StatusArrecadacao {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusArrecadacao::Pendente => "Pendente",
            StatusArrecadacao::Confirmada => "Confirmada",
            StatusArrecadacao::Recebida => "Recebida",
            StatusArrecadacao::Cancelada => "Cancelada",
        }
    }
}

impl TipoRelatorio {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoRelatorio::Financeiro => "Financeiro",
            TipoRelatorio::Distribuicao => "Distribuicao",
            TipoRelatorio::Prestacao => "Prestacao",
            TipoRelatorio::Impacto => "Impacto",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_as_str!(TipoDoacao, FormaArrecadacao, StatusArrecadacao, TipoRelatorio);
