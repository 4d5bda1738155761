//! In-process reference engine answering from a JSON word list.
//!
//! The embedded list covers a handful of German, English, French and
//! Swedish words and ships its own self-test suite, so the whole query
//! pipeline can be exercised offline.

pub mod dictionary;
pub mod engine;
pub mod error;
pub mod loader;
pub mod provider;

pub use dictionary::StaticDictionary;
pub use engine::StaticEngine;
pub use error::StaticDictionaryError;
pub use loader::StaticDictionaryLoader;
pub use provider::StaticEngineProvider;
