use thiserror::Error;

#[derive(Error, Debug)]
pub enum SoapError {
    #[error("Definitions are missing, cannot build the SOAP envelope")]
    MissingDefinitions,
    #[error("Method or namespace is empty")]
    MissingMethodOrNamespace,
    #[error("XML write error: {0}")]
    Write(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SoapError {
    pub fn unsupported_value(description: &str) -> Self {
        SoapError::UnsupportedValue(description.to_string())
    }
}

impl From<serde_yaml::Error> for SoapError {
    fn from(err: serde_yaml::Error) -> Self {
        SoapError::Config(format!("YAML parse error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, SoapError>;
