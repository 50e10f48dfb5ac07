mod common;

mod content;
mod details;
mod language;
mod resume;
mod user;
