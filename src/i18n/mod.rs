//! URL path translation.
//!
//! - [`table`]: immutable per-language segment trees (`TranslationTable`)
//! - [`translate`]: canonical route -> localized route (`Translator`)
//!
//! Only URL path segments are translated; template content is not.

pub mod table;
pub mod translate;

pub use table::TranslationTable;
pub use translate::Translator;
