use serde::{Deserialize, Serialize};

use crate::shared::validation::FieldErrors;

/// User as listed by `/usuarios/` and returned by `/me/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub rut: Option<String>,
    pub is_active: bool,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserDto {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub rut: Option<String>,
}

impl CreateUserDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.username.trim().is_empty() {
            errors.add("username", "El nombre de usuario es obligatorio.");
        }
        if self.password.chars().count() < 4 {
            errors.add("password", "La contraseña debe tener al menos 4 caracteres.");
        }
        if let Some(email) = self.email.as_deref() {
            if !email.trim().is_empty() && !email.contains('@') {
                errors.add("email", "Correo inválido.");
            }
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_trims_missing_parts() {
        let user = UserProfile {
            id: 1,
            username: "admin".into(),
            email: None,
            first_name: "Ana".into(),
            last_name: "".into(),
            rut: None,
            is_active: true,
        };
        assert_eq!(user.full_name(), "Ana");
    }

    #[test]
    fn test_create_user_validation() {
        let dto = CreateUserDto {
            username: "caja1".into(),
            password: "12".into(),
            email: Some("sin-arroba".into()),
            ..Default::default()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.contains("password"));
        assert!(errors.contains("email"));
        assert!(!errors.contains("username"));
    }
}
