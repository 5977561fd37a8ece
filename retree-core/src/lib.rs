//! retree-core: SWC syntax tree to typescript-estree translation
//!
//! This library provides:
//! - A read-only view over SWC JSON trees (`source`) and its closed kind set (`kinds`)
//! - The typescript-estree node model with per-field presence policy (`estree`)
//! - The offset reconciler between the two position conventions (`span`)
//! - The translator itself (`convert`)
//! - Differential comparison, invariant checks and kind census for corpora
//! - Parallel file processing for the command line host

pub mod error;
pub mod config;
pub mod span;
pub mod kinds;
pub mod source;
pub mod estree;
pub mod convert;
pub mod canonical;
pub mod validate;
pub mod census;
#[cfg(feature = "native")]
pub mod parallel;

pub use error::{ProcessError, Result, Stage, TranslateError};
pub use config::TranslateConfig;
pub use span::{Range, Reconciler, Span};
pub use kinds::SourceKind;
pub use source::{parse_tree, SourceNode};
pub use estree::Node;
pub use convert::{translate, Translator};
pub use canonical::{canonicalize, diff, Difference};
pub use validate::{check_presence, check_ranges, Violation};
pub use census::KindCensus;
#[cfg(feature = "native")]
pub use parallel::{
    expand_globs, process_file, process_files_parallel, process_source, FileReport,
    ProcessOptions, ReferenceSource,
};
