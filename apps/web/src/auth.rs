//! Auth adapter: maps login/registration forms onto the REST contract,
//! validates the response shape and persists the user in the session.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::api::{LoginBody, RegisterBody, SkillMatchApi};
use crate::http_client::HttpError;
use crate::models::User;
use crate::session::{Session, SessionError};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Erro de conexão com o servidor. Tente novamente.")]
    Network,

    #[error("Email ou senha inválidos.")]
    InvalidCredentials,

    #[error("Resposta inválida do servidor.")]
    InvalidResponse,

    #[error("{0}")]
    Validation(String),

    #[error("Este email já está cadastrado.")]
    DuplicateEmail,

    #[error("Erro no servidor (status {0}).")]
    Server(u16),

    #[error("Falha ao salvar a sessão: {0}")]
    Session(#[from] SessionError),
}

/// Registration form as submitted on `/cadastro`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl RegistrationForm {
    fn validate(&self) -> Result<(), AuthError> {
        if self.name.trim().is_empty() {
            return Err(AuthError::Validation("Nome é obrigatório.".to_string()));
        }
        if !self.email.contains('@') {
            return Err(AuthError::Validation("Email inválido.".to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "A senha deve ter pelo menos {MIN_PASSWORD_LEN} caracteres."
            )));
        }
        if self.password != self.password_confirmation {
            return Err(AuthError::Validation("As senhas não coincidem.".to_string()));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn SkillMatchApi>,
    session: Session,
}

impl AuthService {
    pub fn new(api: Arc<dyn SkillMatchApi>, session: Session) -> Self {
        Self { api, session }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let body = LoginBody {
            email: email.trim().to_string(),
            senha: password.to_string(),
        };

        let response = self.api.login(&body).await.map_err(|e| match e.status() {
            Some(400 | 401 | 403 | 404) => AuthError::InvalidCredentials,
            Some(status) => AuthError::Server(status),
            None if e.is_network() => AuthError::Network,
            None => AuthError::InvalidResponse,
        })?;

        let user = user_from_response(&response).ok_or_else(|| {
            warn!("Login response is missing id or nome");
            AuthError::InvalidResponse
        })?;

        self.session.store_user(&user)?;
        info!("User {} logged in", user.id);
        Ok(user)
    }

    pub async fn register(&self, form: &RegistrationForm) -> Result<User, AuthError> {
        form.validate()?;

        let body = RegisterBody {
            nome: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            senha: form.password.clone(),
            data_nascimento: form.birth_date,
        };

        let response = self
            .api
            .register(&body)
            .await
            .map_err(categorize_register_error)?;

        let user = user_from_response(&response).ok_or(AuthError::InvalidResponse)?;
        self.session.store_user(&user)?;
        info!("User {} registered", user.id);
        Ok(user)
    }

    pub fn logout(&self) {
        match self.session.user_id() {
            Some(id) => info!("User {id} logged out"),
            None => info!("Session cleared"),
        }
        self.session.clear();
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

fn categorize_register_error(e: HttpError) -> AuthError {
    match &e {
        HttpError::Status { status: 409, .. } => AuthError::DuplicateEmail,
        HttpError::Status {
            status: 400 | 422,
            message,
        } => {
            if message.to_lowercase().contains("email") {
                AuthError::DuplicateEmail
            } else {
                AuthError::Validation(message.clone())
            }
        }
        HttpError::Status { status, .. } => AuthError::Server(*status),
        HttpError::Network(_) => AuthError::Network,
        HttpError::Decode(_) => AuthError::InvalidResponse,
    }
}

/// Builds a user from an auth response. Requires a positive id (`idUsuario`
/// or `id`) and a non-empty `nome`.
fn user_from_response(response: &Value) -> Option<User> {
    let id = response
        .get("idUsuario")
        .or_else(|| response.get("id"))
        .and_then(Value::as_i64)
        .filter(|id| *id > 0)?;
    let name = response
        .get("nome")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|n| !n.is_empty())?;

    Some(User {
        id,
        name: name.to_string(),
        email: response
            .get("email")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        birth_date: response
            .get("dataNascimento")
            .and_then(Value::as_str)
            .and_then(|d| d.parse().ok()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeApi, Failure};
    use crate::session::SESSION_KEYS;
    use serde_json::json;

    fn service(api: FakeApi) -> (AuthService, Session) {
        let session = Session::in_memory();
        (AuthService::new(Arc::new(api), session.clone()), session)
    }

    fn form() -> RegistrationForm {
        RegistrationForm {
            name: "Lucas".to_string(),
            email: "lucas@skillmatch.dev".to_string(),
            password: "segredo1".to_string(),
            password_confirmation: "segredo1".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1999, 9, 9),
        }
    }

    #[tokio::test]
    async fn test_login_success_persists_user() {
        let api = FakeApi::new().with(|s| {
            s.login_response = Some(json!({"idUsuario": 3, "nome": "Lia", "email": "lia@x.com"}))
        });
        let (auth, session) = service(api);

        let user = auth.login("lia@x.com", "123456").await.unwrap();
        assert_eq!(user.id, 3);
        assert!(auth.is_authenticated());
        assert_eq!(session.user_id(), Some(3));
    }

    #[tokio::test]
    async fn test_login_missing_nome_is_invalid_response_and_persists_nothing() {
        let api = FakeApi::new().with(|s| s.login_response = Some(json!({"idUsuario": 3})));
        let (auth, session) = service(api);

        let err = auth.login("lia@x.com", "123456").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidResponse));
        for key in SESSION_KEYS {
            assert!(session.storage().get(key).is_none(), "key {key} persisted");
        }
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_unauthorized_is_invalid_credentials() {
        let api = FakeApi::new();
        api.fail("login", Failure::Status(401));
        let (auth, _) = service(api);

        let err = auth.login("a@b.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_network_failure() {
        let api = FakeApi::new();
        api.fail("login", Failure::Network);
        let (auth, _) = service(api);

        let err = auth.login("a@b.com", "123456").await.unwrap_err();
        assert!(matches!(err, AuthError::Network));
        assert_eq!(err.to_string(), "Erro de conexão com o servidor. Tente novamente.");
    }

    #[tokio::test]
    async fn test_logout_clears_all_keys() {
        let api = FakeApi::new()
            .with(|s| s.login_response = Some(json!({"id": 8, "nome": "Caio"})));
        let (auth, session) = service(api);
        auth.login("caio@x.com", "123456").await.unwrap();

        auth.logout();
        for key in SESSION_KEYS {
            assert!(session.storage().get(key).is_none(), "key {key} survived");
        }
        assert!(!auth.is_authenticated());
        assert!(auth.current_user().is_none());
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn test_logout_without_session_is_harmless() {
        let (auth, session) = service(FakeApi::new());
        auth.logout();
        assert_eq!(session.user_id(), None);
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_success_logs_in() {
        let (auth, _) = service(FakeApi::new());
        let user = auth.register(&form()).await.unwrap();
        assert_eq!(user.name, "Lucas");
        assert!(auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_conflict_is_duplicate_email() {
        let api = FakeApi::new();
        api.fail("register", Failure::Status(409));
        let (auth, _) = service(api);

        let err = auth.register(&form()).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_register_rejects_mismatched_passwords_before_calling_api() {
        let api = Arc::new(FakeApi::new());
        let auth = AuthService::new(api.clone(), Session::in_memory());
        let mut f = form();
        f.password_confirmation = "outra123".to_string();

        let err = auth.register(&f).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_register_bad_request_mentioning_email() {
        let err = categorize_register_error(HttpError::Status {
            status: 400,
            message: "Email already registered".to_string(),
        });
        assert!(matches!(err, AuthError::DuplicateEmail));

        let err = categorize_register_error(HttpError::Status {
            status: 422,
            message: "senha fraca".to_string(),
        });
        assert!(matches!(err, AuthError::Validation(m) if m == "senha fraca"));
    }

    #[test]
    fn test_user_from_response_rejects_zero_id() {
        assert!(user_from_response(&json!({"idUsuario": 0, "nome": "X"})).is_none());
        assert!(user_from_response(&json!({"idUsuario": 1, "nome": ""})).is_none());
        let user = user_from_response(
            &json!({"idUsuario": 1, "nome": "X", "dataNascimento": "2000-01-02"}),
        )
        .unwrap();
        assert_eq!(user.birth_date, NaiveDate::from_ymd_opt(2000, 1, 2));
    }
}
