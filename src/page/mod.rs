//! Page types: route rules, template discovery, and bindings.

mod binding;
pub mod route;
mod scan;

pub use binding::{Materializer, PageBinding, Registrar, emit};
pub use route::output_file_for_url;
pub use scan::scan_templates;

#[cfg(test)]
pub(crate) use scan::write_tree;
