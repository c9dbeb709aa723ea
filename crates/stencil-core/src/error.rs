use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StencilError {
    // Template errors
    #[error("TEMPLATE_NOT_FOUND: template '{0}' not found")]
    TemplateNotFound(String),

    #[error("TEMPLATE_DIR_UNREADABLE: failed to read template directory {path}: {source}")]
    TemplateDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TEMPLATE_EXISTS: descriptor '{}' already exists", .0.display())]
    TemplateExists(PathBuf),

    #[error("DESCRIPTOR_INVALID: {0}")]
    DescriptorInvalid(String),

    // Name errors
    #[error("NAME_INVALID: {0}")]
    NameInvalid(String),

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl From<serde_json::Error> for StencilError {
    fn from(err: serde_json::Error) -> Self {
        StencilError::Generic(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for StencilError {
    fn from(err: toml::de::Error) -> Self {
        StencilError::ConfigParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StencilError>;
