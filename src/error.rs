use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse airline rule JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to read city table: {0}")]
    CsvError(#[from] csv::Error),

    #[error("City table is missing required columns: {0:?}")]
    MissingColumns(Vec<String>),

    #[error("Unknown airline: {0}")]
    UnknownAirline(String),

    #[error("City not found in catalog: {0}")]
    UnknownCity(String),

    #[error("Hub '{hub}' of airline '{airline}' is not in the city catalog")]
    HubNotFound { airline: String, hub: String },

    #[error("At least one airline must be selected")]
    NoAirlineSelected,

    #[error("Invalid airline rule set: {0}")]
    InvalidRuleSet(String),
}

pub type Result<T> = std::result::Result<T, Error>;
