use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Time conflict with active task '{existing_name}' ({existing_id})")]
    Conflict {
        existing_id: Uuid,
        existing_name: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Ambiguous short ID. Did you mean one of these?")]
    AmbiguousId(Vec<(String, String)>), // Vec of (ID, Name)

    #[error("Storage error: {0}")]
    Storage(String),
}
