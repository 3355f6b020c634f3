//! Asynchronous resource state shared by every page.

use std::fmt::Display;
use std::future::Future;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Resource<T> {
    Idle,
    Loading,
    Success { data: T },
    Error { error: String },
}

impl<T> Resource<T> {
    /// Awaits `fut` and captures the outcome. Errors are kept as their
    /// display string.
    pub async fn load<F, E>(fut: F) -> Self
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        Self::from_result(fut.await)
    }

    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Resource::Success { data },
            Err(e) => Resource::Error {
                error: e.to_string(),
            },
        }
    }

    pub fn success(data: T) -> Self {
        Resource::Success { data }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Resource::Error {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Resource::Success { .. })
    }

    #[cfg(test)]
    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Success { data } => Some(data),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resource<U> {
        match self {
            Resource::Idle => Resource::Idle,
            Resource::Loading => Resource::Loading,
            Resource::Success { data } => Resource::Success { data: f(data) },
            Resource::Error { error } => Resource::Error { error },
        }
    }
}

/// A value that may have been substituted by a fallback. `degraded` is true
/// whenever the value did not come from the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub value: T,
    pub degraded: bool,
}

impl<T> Sourced<T> {
    pub fn live(value: T) -> Self {
        Self {
            value,
            degraded: false,
        }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            value,
            degraded: true,
        }
    }

    /// Takes the fetched value, or `fallback()` on error (logged at `warn`).
    pub fn or_fallback<E: Display>(
        result: Result<T, E>,
        what: &str,
        fallback: impl FnOnce() -> T,
    ) -> Self {
        match result {
            Ok(value) => Self::live(value),
            Err(e) => {
                tracing::warn!("Falling back to placeholder {what}: {e}");
                Self::fallback(fallback())
            }
        }
    }
}
