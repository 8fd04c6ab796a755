use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::{error, warn};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation échouée: {message}")]
    Validation {
        message: String,
        details: Option<JsonValue>,
    },

    #[error("Délai de prévenance insuffisant: {message}")]
    LeadTimeViolation { message: String },

    #[error("Transition invalide: {message}")]
    InvalidTransition { message: String },

    #[error("Demande déjà clôturée: {message}")]
    AlreadyFinalized { message: String },

    #[error("Cellule introuvable: {message}")]
    CellNotFound { message: String },

    #[error("Ressource introuvable")]
    NotFound,

    #[error("Erreur de sérialisation: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Erreur d'entrée/sortie: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, "validation error");
        AppError::Validation {
            message,
            details: None,
        }
    }

    pub fn validation_with_details(message: impl Into<String>, details: JsonValue) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, details = %details, "validation error with details");
        AppError::Validation {
            message,
            details: Some(details),
        }
    }

    pub fn lead_time(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::absence", %message, "lead time violation");
        AppError::LeadTimeViolation { message }
    }

    pub fn invalid_transition(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::lifecycle", %message, "invalid transition");
        AppError::InvalidTransition { message }
    }

    pub fn already_finalized(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::lifecycle", %message, "entity already finalized");
        AppError::AlreadyFinalized { message }
    }

    pub fn cell_not_found(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::planning", %message, "planning cell not found");
        AppError::CellNotFound { message }
    }

    pub fn not_found() -> Self {
        warn!(target: "app::repository", "resource not found");
        AppError::NotFound
    }

    pub fn other(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "app::other", %message, "other error");
        AppError::Other(message)
    }
}
