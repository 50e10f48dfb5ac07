pub mod content;
pub mod language;
pub mod shared;
pub mod user;
