use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The signed-in account as returned by `/auth/me`, `/auth/login` and
/// `/auth/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub organization_name: String,
    #[serde(default)]
    pub organization_type: String,
}

fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub organization_name: String,
    pub organization_type: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_is_optional_and_may_be_numeric() {
        let user: User = serde_json::from_str(
            r#"{"id": 5, "email": "a@b.co", "organization_name": "Acme"}"#,
        )
        .unwrap();
        assert_eq!(user.id.as_deref(), Some("5"));
        assert_eq!(user.organization_type, "");

        let user: User = serde_json::from_str(r#"{"id": null, "email": "a@b.co"}"#).unwrap();
        assert_eq!(user.id, None);
    }
}
