pub mod category;
pub mod config;
pub mod format;
pub mod language;
pub mod resolve;

pub use category::{IdeaStatus, Priority, PublicationKind, UpdateKind};
pub use language::{LanguageCode, LanguagePreference};
pub use resolve::{FinalFallback, Localized, Resolution, ResolvedFrom, resolve, resolve_for};
