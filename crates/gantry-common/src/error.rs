//! Error taxonomy shared by every gantry crate

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
    /// One or more mandatory parameters are absent
    #[error("{0}")]
    MissingParameterValue(String),

    /// A parameter is present but unusable
    #[error("{0}")]
    InvalidParameterValue(String),

    /// A call to the management controller failed
    #[error("{operation} failed, error: {error}")]
    IloOperation { operation: String, error: String },

    #[error("node {0} not found")]
    NodeNotFound(Uuid),

    #[error("storage error: {0}")]
    Storage(String),

    /// The delegated network-boot step failed
    #[error("deploy failed: {0}")]
    Deploy(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn ilo_operation(operation: impl Into<String>, error: impl ToString) -> Self {
        Error::IloOperation {
            operation: operation.into(),
            error: error.to_string(),
        }
    }
}
