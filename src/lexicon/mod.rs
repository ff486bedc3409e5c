//! Lexicon file I/O: the input word list and the JSON result files.

pub mod sink;
pub mod source;

pub use sink::{PersistenceError, ResultSink};
pub use source::{SourceError, WordSource};
