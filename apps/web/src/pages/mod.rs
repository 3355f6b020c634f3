//! Page handlers. Each returns a JSON view-model wrapped in its layout.

pub mod auth;
pub mod dashboard;
pub mod profile;
pub mod public;
pub mod questionnaire;
pub mod ranking;
pub mod recommendations;
pub mod trail;

use axum::Json;
use chrono::Local;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Standalone page, no header or sidebar.
    Bare,
    /// Rendered inside the shared header/sidebar chrome.
    Chrome,
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub layout: Layout,
    pub page: T,
}

pub fn bare<T: Serialize>(page: T) -> Json<Page<T>> {
    Json(Page {
        layout: Layout::Bare,
        page,
    })
}

pub fn chrome<T: Serialize>(page: T) -> Json<Page<T>> {
    Json(Page {
        layout: Layout::Chrome,
        page,
    })
}

/// Ranking reference month, `YYYY-MM`.
pub fn current_month() -> String {
    Local::now().format("%Y-%m").to_string()
}
