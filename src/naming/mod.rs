//! Output file naming: template expansion and path resolution.

pub mod path;
pub mod template;

pub use path::resolve_output_path;
pub use template::TemplateContext;
