//! Page data model: languages, classification, discovered pages and pairs.

mod kind;
mod language;
mod meta;
mod pair;
pub mod route;

pub use kind::{ClassifyRule, PageType, classify, default_rules};
pub use language::Language;
pub use meta::{ChangeFreq, DiscoveredPage};
pub use pair::{Alternate, LanguagePair, X_DEFAULT};
