//! Command-line interface module.
//!
//! | Command  | Module   | Purpose                                   |
//! |----------|----------|-------------------------------------------|
//! | `serve`  | `serve`  | Answer every page binding from memory     |
//! | `build`  | `build`  | Render every page binding to static files |
//! | `routes` | `routes` | List page bindings without rendering      |

mod args;
pub mod build;
pub mod common;
pub mod routes;
pub mod serve;

pub use args::{Cli, Commands, RoutesArgs};
