pub mod json;
pub mod language;
