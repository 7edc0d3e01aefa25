//! The parsing core: raw export text to sealed messages.
//!
//! Data flows strictly forward:
//!
//! ```text
//! raw line ─► LineClassifier ─► MessageAssembler ─► MessageClassifier ─► Message
//!                                   │
//!                                   └─► TimestampNormalizer
//! ```
//!
//! - [`grammar`]: header grammars and the [`LineClassifier`]
//! - [`timestamp`]: the [`TimestampNormalizer`]
//! - [`assembler`]: the [`MessageAssembler`] state machine
//! - [`classifier`]: the [`MessageClassifier`] heuristics
//!
//! Most callers want [`ChatParser`](crate::parser::ChatParser) instead of
//! wiring these together by hand.

pub mod assembler;
pub mod classifier;
pub mod grammar;
pub mod timestamp;

pub use assembler::{MessageAssembler, ParseStats};
pub use classifier::{
    Classification, DEFAULT_MEDIA_INDICATORS, DEFAULT_SYSTEM_AUTHORS, DEFAULT_SYSTEM_INDICATORS,
    IndicatorSet, MessageClassifier,
};
pub use grammar::{GrammarSpec, HeaderMatch, LineClassifier, default_grammars};
pub use timestamp::{TimestampNormalizer, canonicalize, default_formats};
