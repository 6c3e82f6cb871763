//! Utility modules.
//!
//! | Module | Purpose                           |
//! |--------|-----------------------------------|
//! | `html` | Escaping for server-made pages    |
//! | `mime` | Content-Type detection            |
//! | `path` | Path normalization                |

pub mod html;
pub mod mime;
pub mod path;
