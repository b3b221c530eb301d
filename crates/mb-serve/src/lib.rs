pub mod extract;
pub mod middleware;
pub mod openapi;
pub mod routes;

use axum::Router;
use mb_chat::Chatbot;
use mb_core::{Calendar, MonBondhu, MonBondhuError};
use mb_db::DbStore;
use mb_db::schema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Deployment flavour. Development responses carry internal error detail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Self::Development
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEnvironment(pub String);

impl fmt::Display for UnknownEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown environment '{}', expected development or production",
            self.0
        )
    }
}

impl std::error::Error for UnknownEnvironment {}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(UnknownEnvironment(s.to_string())),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_path: PathBuf,
    pub environment: Environment,
    pub calendar: Calendar,
    pub chatbot: Arc<Chatbot>,
}

/// Opens the database for one request. Migrations are idempotent, so a
/// fresh file is usable on first touch.
pub fn build_core(state: &AppState) -> Result<MonBondhu<DbStore>, MonBondhuError> {
    let conn = schema::open_and_migrate(&state.db_path).map_err(|err| MonBondhuError::Internal {
        message: err.to_string(),
    })?;
    Ok(MonBondhu::with_calendar(DbStore::new(conn), state.calendar))
}

pub fn app(state: AppState) -> Router {
    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve<F>(
    state: AppState,
    addr: std::net::SocketAddr,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = %state.environment, "listening");
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_common_spellings() {
        assert_eq!("development".parse(), Ok(Environment::Development));
        assert_eq!(" Production ".parse(), Ok(Environment::Production));
        assert_eq!("dev".parse(), Ok(Environment::Development));
        assert!("staging".parse::<Environment>().is_err());
    }
}
