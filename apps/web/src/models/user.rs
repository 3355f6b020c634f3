use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "idUsuario", alias = "id")]
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "dataNascimento", default)]
    pub birth_date: Option<NaiveDate>,
}

/// Body of `PUT /usuarios/{id}`. Absent fields are left untouched upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "dataNascimento", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.birth_date.is_none()
    }

    /// Applies the update to a cached copy of the user.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if self.birth_date.is_some() {
            user.birth_date = self.birth_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_portuguese_fields() {
        let json = r#"{"idUsuario": 7, "nome": "Ana", "email": "ana@fiap.com.br", "dataNascimento": "2001-04-12"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.name, "Ana");
        assert_eq!(user.birth_date, NaiveDate::from_ymd_opt(2001, 4, 12));
    }

    #[test]
    fn test_user_accepts_plain_id_alias() {
        let user: User = serde_json::from_str(r#"{"id": 3, "nome": "Rui"}"#).unwrap();
        assert_eq!(user.id, 3);
        assert!(user.email.is_empty());
        assert!(user.birth_date.is_none());
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let update = UserUpdate {
            name: Some("Bia".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"nome": "Bia"}));
    }

    #[test]
    fn test_update_apply_to() {
        let mut user = User {
            id: 1,
            name: "Old".to_string(),
            email: "old@x.com".to_string(),
            birth_date: None,
        };
        let update = UserUpdate {
            email: Some("new@x.com".to_string()),
            ..Default::default()
        };
        update.apply_to(&mut user);
        assert_eq!(user.name, "Old");
        assert_eq!(user.email, "new@x.com");
    }
}
