//! Small shared helpers: dates, hashing, MIME types, XML characters,
//! pluralisation.

pub mod date;
pub mod hash;
pub mod mime;
mod plural;
pub mod xml;

pub use plural::{plural_count, plural_s};
