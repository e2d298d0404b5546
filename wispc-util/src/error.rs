//! Error types owned by `wispc-util` itself. `wispc-lex` and `wispc-par`
//! define their own error enums for the lex/parse taxonomy in spec.md §7;
//! this module only covers failures internal to span/source-map bookkeeping.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceMapError {
    #[error("no source file registered for file id {0:?}")]
    UnknownFile(u32),
}
