use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{RegistrationForm, MIN_PASSWORD_LEN};
use crate::errors::AppError;
use crate::models::User;
use crate::pages::{bare, Page};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    #[serde(alias = "senha")]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub authenticated: bool,
    pub user: Option<User>,
    pub next: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    pub required: bool,
}

#[derive(Debug, Serialize)]
pub struct RegisterPage {
    pub fields: Vec<FormField>,
    pub min_password_len: usize,
    pub submit: &'static str,
    pub login: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SessionStarted {
    pub user: User,
    pub redirect: &'static str,
}

/// GET /login
pub async fn login_page(State(state): State<AppState>) -> Json<Page<LoginPage>> {
    let user = state.auth.current_user();
    bare(LoginPage {
        authenticated: state.auth.is_authenticated(),
        user,
        next: "/dashboard",
    })
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<Page<SessionStarted>>, AppError> {
    if form.email.trim().is_empty() || form.password.is_empty() {
        return Err(AppError::Validation("Informe email e senha.".to_string()));
    }
    let user = state.auth.login(&form.email, &form.password).await?;
    state.trail_cache().trail = None;
    Ok(bare(SessionStarted {
        user,
        redirect: "/dashboard",
    }))
}

fn field(
    name: &'static str,
    label: &'static str,
    kind: &'static str,
    required: bool,
) -> FormField {
    FormField {
        name,
        label,
        kind,
        required,
    }
}

/// GET /cadastro
pub async fn register_page() -> Json<Page<RegisterPage>> {
    bare(RegisterPage {
        fields: vec![
            field("name", "Nome", "text", true),
            field("email", "Email", "email", true),
            field("password", "Senha", "password", true),
            field("password_confirmation", "Confirme a senha", "password", true),
            field("birth_date", "Data de nascimento", "date", false),
        ],
        min_password_len: MIN_PASSWORD_LEN,
        submit: "/cadastro",
        login: "/login",
    })
}

/// POST /cadastro
///
/// Registration logs the user in; the next step is the profile questionnaire.
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegistrationForm>,
) -> Result<(StatusCode, Json<Page<SessionStarted>>), AppError> {
    let user = state.auth.register(&form).await?;
    state.trail_cache().trail = None;
    Ok((
        StatusCode::CREATED,
        bare(SessionStarted {
            user,
            redirect: "/formulario-perfil",
        }),
    ))
}

/// POST /logout
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    state.auth.logout();
    *state.trail_cache() = Default::default();
    StatusCode::NO_CONTENT
}
