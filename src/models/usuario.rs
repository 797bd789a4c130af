use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError, ValidationErrors};

/// Registered donor with login credentials.
///
/// `senha` is accepted on input but never written back out, so it is
/// required on create only. An update without it keeps the stored one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, FromRow)]
pub struct Usuario {
    #[serde(default)]
    pub cd_cliente: i64,
    #[validate(length(min = 1, max = 200))]
    pub nome_completo: String,
    #[validate(length(max = 20))]
    pub telefone: Option<String>,
    #[validate(length(max = 11))]
    pub cpf: Option<String>,
    #[validate(length(max = 10))]
    pub cep: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub nome_usuario: String,
    #[serde(default, skip_serializing)]
    #[validate(length(max = 255))]
    pub senha: String,
    #[validate(length(min = 1, max = 100))]
    pub email: String,
}

impl Usuario {
    /// Shape checks for a new user, which must carry a password.
    pub fn validate_new(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if self.senha.is_empty() {
            errors.add("senha", ValidationError::new("required"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usuario() -> Usuario {
        Usuario {
            cd_cliente: 0,
            nome_completo: "Ana Souza".to_string(),
            telefone: Some("11999990000".to_string()),
            cpf: Some("12345678901".to_string()),
            cep: None,
            nome_usuario: "ana1".to_string(),
            senha: "pw".to_string(),
            email: "a@x.com".to_string(),
        }
    }

    #[test]
    fn test_usuario_validate() {
        assert!(usuario().validate().is_ok());

        let mut invalid = usuario();
        invalid.cpf = Some("123456789012".to_string());
        let errors = invalid.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("cpf"));

        let mut blank = usuario();
        blank.nome_usuario = String::new();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_senha_required_only_for_new_users() {
        let mut sem_senha = usuario();
        sem_senha.senha = String::new();
        assert!(sem_senha.validate().is_ok());

        let errors = sem_senha.validate_new().unwrap_err();
        assert!(errors.field_errors().contains_key("senha"));
        assert!(usuario().validate_new().is_ok());

        let mut both = sem_senha.clone();
        both.cpf = Some("123456789012".to_string());
        let errors = both.validate_new().unwrap_err();
        assert!(errors.field_errors().contains_key("senha"));
        assert!(errors.field_errors().contains_key("cpf"));
    }

    #[test]
    fn test_senha_is_never_serialized() {
        let json = serde_json::to_value(usuario()).unwrap();
        assert!(json.get("senha").is_none());
        assert_eq!(json["nome_usuario"], "ana1");
    }

    #[test]
    fn test_missing_id_defaults_to_zero() {
        let parsed: Usuario = serde_json::from_str(
            r#"{"nome_completo":"Ana","nome_usuario":"ana1","email":"a@x.com","senha":"pw"}"#,
        )
        .unwrap();
        assert_eq!(parsed.cd_cliente, 0);
        assert!(parsed.telefone.is_none());

        let echoed: Usuario = serde_json::from_value(serde_json::to_value(&parsed).unwrap()).unwrap();
        assert!(echoed.senha.is_empty());
    }
}
