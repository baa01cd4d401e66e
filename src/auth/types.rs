//! Session records exchanged with the auth endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Account kind as reported by the backend in `tipo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Veterinarian,
    Client,
    Other(String),
}

impl UserRole {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "admin" => Self::Admin,
            "veterinario" => Self::Veterinarian,
            "cliente" => Self::Client,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Veterinarian => "veterinario",
            Self::Client => "cliente",
            Self::Other(raw) => raw,
        }
    }
}

/// Signed-in user as stored in the `user` slot.
///
/// Fields the client does not interpret are kept in `extra` so the record
/// round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn role(&self) -> Option<UserRole> {
        self.tipo.as_deref().map(UserRole::parse)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(UserRole::Admin)
    }

    pub fn is_client(&self) -> bool {
        self.role() == Some(UserRole::Client)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub senha: &'a str,
}

/// Body returned by login and registration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_round_trips_unknown_fields() {
        let raw = json!({
            "id": 7,
            "nome": "Ana",
            "email": "ana@example.com",
            "tipo": "veterinario",
            "telefone": "555-0101"
        });
        let user: User = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.role(), Some(UserRole::Veterinarian));
        assert_eq!(user.extra.get("telefone"), Some(&json!("555-0101")));
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn role_checks_follow_tipo() {
        let admin = User {
            tipo: Some("admin".into()),
            ..User::default()
        };
        assert!(admin.is_admin());
        assert!(!admin.is_client());
        assert!(!User::default().is_admin());
        assert_eq!(UserRole::parse("recepcao"), UserRole::Other("recepcao".into()));
        assert_eq!(UserRole::parse("cliente").label(), "cliente");
    }
}
