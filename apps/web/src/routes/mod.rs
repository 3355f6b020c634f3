pub mod health;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::pages::{
    auth, dashboard, profile, public, questionnaire, ranking, recommendations, trail,
};
use crate::state::AppState;

/// Gate for every page rendered inside the header/sidebar chrome.
async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.session.is_authenticated() {
        tracing::debug!("Blocked unauthenticated request to {}", request.uri().path());
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(request).await)
}

pub fn build_router(state: AppState) -> Router {
    let open_routes = Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(public::home))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/cadastro", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
        .route(
            "/formulario-perfil",
            get(questionnaire::questions).post(questionnaire::submit),
        )
        .route("/sobre", get(public::about))
        .route("/integrantes", get(public::members))
        .route("/faq", get(public::faq));

    let gated_routes = Router::new()
        .route("/dashboard", get(dashboard::dashboard))
        .route("/trilha/:id_carreira", get(trail::trail))
        .route(
            "/trilha/:id_carreira/cursos/:id_curso/iniciar",
            post(trail::start_course),
        )
        .route(
            "/trilha/:id_carreira/cursos/:id_curso/progresso",
            post(trail::update_progress),
        )
        .route(
            "/trilha/:id_carreira/cursos/:id_curso/concluir",
            post(trail::complete_course),
        )
        .route("/recomendacoes", get(recommendations::recommendations))
        .route(
            "/recomendacoes/:id_carreira",
            post(recommendations::select_career),
        )
        .route("/ranking", get(ranking::ranking))
        .route("/perfil", get(profile::profile).put(profile::update_profile))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    open_routes
        .merge(gated_routes)
        .fallback(public::not_found)
        .with_state(state)
}
