//! Configuration section definitions.
//!
//! Each module corresponds to a section in `polyglot.toml`:
//!
//! | Module   | TOML Section | Purpose                                   |
//! |----------|--------------|-------------------------------------------|
//! | `site`   | `[site]`     | Templates, languages, translations        |
//! | `build`  | `[build]`    | Static publishing output                  |
//! | `serve`  | `[serve]`    | Live server                               |
//! | `assets` | `[assets]`   | Static asset directory and URL prefix     |

mod assets;
mod build;
mod serve;
mod site;

pub use assets::AssetsConfig;
pub use build::BuildSectionConfig;
pub use serve::ServeConfig;
pub use site::SiteSectionConfig;
