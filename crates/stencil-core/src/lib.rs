// Core modules
pub mod config;
pub mod error;
pub mod materialize;
pub mod path;
pub mod template;
pub mod token;

// Re-export commonly used types
pub use error::{Result, StencilError};
pub use materialize::{
    CollisionPolicy, FileReady, MaterializeError, MaterializeReport, Materializer, Source,
};
pub use template::{TemplateDefinition, TemplateKind, TemplateOrigin, TemplateRepository};
pub use token::{Params, NAME_TOKEN};
