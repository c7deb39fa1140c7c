use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaturityError {
    #[error("region {region}: missing required field `{field}`")]
    MissingField { region: String, field: String },

    #[error("region {region}: field `{field}` out of range: {value}")]
    OutOfRangeInput {
        region: String,
        field: String,
        value: f64,
    },

    #[error("region {region}: {component} score is undefined ({reason})")]
    UndefinedScore {
        region: String,
        component: String,
        reason: String,
    },

    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    #[error("unknown region: {0}")]
    UnknownRegion(String),

    #[error("duplicate region in input: {0}")]
    DuplicateRegion(String),

    #[error("input table contains no regions")]
    EmptyInput,

    #[error("unknown weighting scheme: {0}")]
    UnknownScheme(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("input parse error: {0}")]
    InputParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MaturityError>;
