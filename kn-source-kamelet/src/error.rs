use crate::client::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The sink expression does not follow `[apiVersion:]kind:[namespace/]name`
    #[error("unsupported sink expression {0:?} - please use format <kind>:<name>")]
    UnsupportedSinkExpression(String),
    /// The sink kind is not one of the known short names
    #[error("unsupported sink type {0:?}")]
    UnsupportedSinkType(String),
    #[error("missing sink for binding - please use one of --sink, --broker, --channel, --service")]
    MissingSink,
    #[error("binding is missing required property {property:?} for Kamelet {kamelet:?}")]
    MissingRequiredProperty { property: String, kamelet: String },
    #[error("Kamelet {0} is not an event source")]
    NotEventSource(String),
    #[error("invalid endpoint properties: {0}")]
    Properties(#[from] kamelet::error::Error),
    /// Failures talking to the cluster, passed through as reported
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("unable to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unable to serialize output: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unable to build url: {0}")]
    Url(#[from] url::ParseError),
    #[error("unable to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error stems from the arguments given on the command line.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedSinkExpression(_) | Error::UnsupportedSinkType(_) | Error::MissingSink
        )
    }

    /// Whether the error stems from checking the binding against its Kamelet.
    pub fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            Error::MissingRequiredProperty { .. } | Error::NotEventSource(_)
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
