//! Template definitions and the repository that lists them
//!
//! A template is declared by a descriptor file `<name>.template` (JSON). The
//! descriptor either carries the whole template inline (single-file) or
//! nothing but display strings, in which case the payload is every sibling
//! named `<name>` or `<name>.<suffix>` (directory-family).
//!
//! ```text
//! templates/
//! ├── readme.template        {"label": "..", "description": "..", "template": "# __NAME__\n", "extension": ".md"}
//! ├── component.template     {"label": "..", "description": ".."}
//! ├── component.tsx          -> <name>.tsx
//! ├── component.test.tsx     -> <name>.test.tsx
//! └── component/             -> <name>/
//!     └── __NAME__.css       -> <name>/<name>.css
//! ```

mod builtin;
pub mod definition;
pub mod descriptor;
pub mod repository;

pub use definition::{TemplateDefinition, TemplateDefinitionBuilder, TemplateKind, TemplateOrigin};
pub use descriptor::{Descriptor, DescriptorError};
pub use repository::{TemplateListing, TemplateRepository};
