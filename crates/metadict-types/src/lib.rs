//! Value types shared by every metadict crate: languages, dictionary objects,
//! engine result payloads and the aggregated query response.

pub mod entry;
pub mod error;
pub mod language;
pub mod object;
pub mod response;
pub mod result;
pub mod target;

pub use entry::{BilingualEntry, ExternalContent, MonolingualEntry, SynonymEntry, SynonymGroup};
pub use error::TypeError;
pub use language::{BilingualDictionary, GrammaticalForm, GrammaticalGender, Language};
pub use object::{DictionaryObject, DictionaryObjectBuilder, EntryType};
pub use response::{QueryResponse, ResponseContent, ResultGroup, StepDiagnostic, StepStatus};
pub use result::{BilingualQueryResult, EngineQueryResult, MonolingualQueryResult};
pub use target::{DictionarySpec, QueryTarget};
