//! Translator configuration

use crate::span::Reconciler;

/// Position of the first byte as reported by the upstream parser
pub const DEFAULT_SPAN_BASE: u32 = 1;

/// Nesting limit before translation gives up with `TooDeep`
pub const DEFAULT_MAX_DEPTH: usize = 4096;

/// Options the translator itself honours.
///
/// Dialect options (JSX, module vs script) belong to the parser; the
/// translator assumes module source with JSX enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslateConfig {
    /// Offset of the first source byte in incoming spans. SWC starts at 1
    /// and keeps counting across `parseSync` calls in the same process, so
    /// hosts that reuse a parser pass the accumulated base here.
    pub span_base: u32,

    /// Maximum source tree depth
    pub max_depth: usize,

    /// Length of the parsed source text, when the host has it. The program
    /// then extends over trailing whitespace and comments up to the end of
    /// the file, which SWC's module span leaves out.
    pub source_len: Option<u32>,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            span_base: DEFAULT_SPAN_BASE,
            max_depth: DEFAULT_MAX_DEPTH,
            source_len: None,
        }
    }
}

impl TranslateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_span_base(mut self, span_base: u32) -> Self {
        self.span_base = span_base;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_source_len(mut self, source_len: u32) -> Self {
        self.source_len = Some(source_len);
        self
    }

    /// The offset reconciler matching this configuration
    pub fn reconciler(&self) -> Reconciler {
        Reconciler::new(self.span_base)
    }
}
