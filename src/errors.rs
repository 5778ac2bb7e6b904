use actix_web::HttpResponse;
use serde_json::json;

use crate::store::StoreError;

/// Domain failures of the league services. Handlers translate these into
/// HTTP responses; the store layer's errors fold in via `From`.
#[derive(Debug, thiserror::Error)]
pub enum LeagueError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    InvalidState(String),

    #[error("need at least 2 teams to generate a schedule, have {0}")]
    InsufficientTeams(usize),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl LeagueError {
    /// Map a domain failure onto the HTTP surface with the standard response
    /// envelope.
    pub fn to_response(&self) -> HttpResponse {
        let body = json!({
            "success": false,
            "message": self.to_string(),
        });
        match self {
            LeagueError::NotFound(_) => HttpResponse::NotFound().json(body),
            LeagueError::Unauthorized(_) => HttpResponse::Forbidden().json(body),
            LeagueError::InvalidState(_) => HttpResponse::Conflict().json(body),
            LeagueError::InsufficientTeams(_) => HttpResponse::BadRequest().json(body),
            LeagueError::Storage(StoreError::NotFound { .. }) => {
                HttpResponse::NotFound().json(body)
            }
            LeagueError::Storage(e) => {
                tracing::error!("storage failure surfaced to client: {}", e);
                HttpResponse::InternalServerError().json(json!({
                    "success": false,
                    "message": "Internal server error",
                }))
            }
        }
    }
}
