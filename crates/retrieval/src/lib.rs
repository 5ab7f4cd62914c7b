//! Question answering over local documents.
//!
//! The pipeline turns a question into search keywords, finds candidate files
//! with the OS search index, loads the leading PDFs, and asks a model to answer
//! from those documents alone:
//!
//! ```text
//! query -> keywords -> "a OR b" -> search hits -> top-K documents -> context -> answer
//! ```
//!
//! Each stage sits behind a trait so it can be swapped or stubbed.

pub mod answer;
pub mod context;
pub mod keywords;
pub mod loader;
pub mod parse;
pub mod pipeline;
pub mod search;
pub mod types;

pub use answer::{AnswerGenerator, LlmAnswerGenerator};
pub use context::{build_context, DEFAULT_LABEL};
pub use docseek_core::LoadPolicy;
pub use keywords::{KeywordExtractor, LlmKeywordExtractor};
pub use loader::{DocumentLoader, PdfLoader};
pub use parse::{BracketArrayParser, ResponseParser};
pub use pipeline::Pipeline;
pub use search::{build_expression, SearchDelegate, SpotlightSearch};
pub use types::{Document, QaRun};
