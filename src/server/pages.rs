//! HTML page handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::{context, Environment, Value};
use tracing::error;

use crate::emotion::Emotion;
use crate::error::AppError;
use crate::types::ResultQuery;

use super::AppState;

/// Served when a template fails to render
const INTERNAL_ERROR_PAGE: &str = include_str!("../../templates/500.html");

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("deteksi.html", include_str!("../../templates/deteksi.html")),
    ("tentang.html", include_str!("../../templates/tentang.html")),
    ("hasil.html", include_str!("../../templates/hasil.html")),
    ("404.html", include_str!("../../templates/404.html")),
    ("500.html", INTERNAL_ERROR_PAGE),
];

/// Compiled page templates
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, AppError> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|e| AppError::Internal(format!("Template {name} failed to compile: {e}")))?;
        }
        Ok(Self { env })
    }

    /// Render `name` with `ctx`.
    pub fn render(&self, name: &str, ctx: Value) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }

    /// Render a page, answering with the static error page if rendering fails
    fn respond(&self, status: StatusCode, name: &str, ctx: Value) -> Response {
        match self.render(name, ctx) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                error!(template = name, error = %e, "Template rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(INTERNAL_ERROR_PAGE)).into_response()
            }
        }
    }
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Response {
    state
        .pages
        .respond(StatusCode::OK, "index.html", context! { page => "index" })
}

/// GET /deteksi
pub async fn deteksi(State(state): State<AppState>) -> Response {
    state
        .pages
        .respond(StatusCode::OK, "deteksi.html", context! { page => "deteksi" })
}

/// GET /tentang
pub async fn tentang(State(state): State<AppState>) -> Response {
    let emotions: Vec<_> = Emotion::ALL.iter().map(|e| e.info()).collect();
    state.pages.respond(
        StatusCode::OK,
        "tentang.html",
        context! { page => "tentang", emotions },
    )
}

/// GET /hasil?emotion=<tag>&confidence=<int>
///
/// Pairs are taken raw so repeated or malformed parameters still render.
pub async fn hasil(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let (emotion, confidence) = ResultQuery::from_pairs(pairs).resolve();
    state.pages.respond(
        StatusCode::OK,
        "hasil.html",
        context! {
            page => "hasil",
            emotion => emotion.tag(),
            confidence,
            emotion_info => emotion.info(),
        },
    )
}

/// Fallback for unknown routes
pub async fn not_found(State(state): State<AppState>) -> Response {
    state
        .pages
        .respond(StatusCode::NOT_FOUND, "404.html", context! {})
}
