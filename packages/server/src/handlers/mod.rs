pub mod content;
pub mod language;
pub mod user;
