//! Source spans, target ranges and the offset reconciler
//!
//! SWC reports `span.start`/`span.end` counted from a base offset (1 for a
//! fresh parser) with an exclusive end. typescript-estree reports a 0-based
//! half-open `range`. Most nodes convert with the default rule; a handful of
//! synthesized or delimiter-sensitive nodes need their own arithmetic, and
//! each of those is a separate method here.

use serde::Serialize;
use serde_json::Value;

/// A source position pair, exclusive end, relative to the parser base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Read a `{"start": .., "end": ..}` object; `None` for anything else
    pub fn from_value(value: &Value) -> Option<Self> {
        let start = value.get("start")?.as_u64()?;
        let end = value.get("end")?.as_u64()?;
        Some(Self {
            start: u32::try_from(start).ok()?,
            end: u32::try_from(end).ok()?,
        })
    }

    /// SWC marks synthesized tokens with an empty span
    pub fn is_dummy(&self) -> bool {
        self.start == 0 && self.end == 0
    }
}

/// A target position pair: 0-based, half-open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Range(pub [u32; 2]);

impl Range {
    pub fn new(start: u32, end: u32) -> Self {
        Range([start, end])
    }

    pub fn start(&self) -> u32 {
        self.0[0]
    }

    pub fn end(&self) -> u32 {
        self.0[1]
    }

    pub fn contains(&self, other: Range) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }

    /// Smallest range covering both
    pub fn cover(&self, other: Range) -> Range {
        Range::new(self.start().min(other.start()), self.end().max(other.end()))
    }
}

/// Converts source spans to target ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciler {
    base: u32,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self { base: 1 }
    }
}

impl Reconciler {
    pub fn new(base: u32) -> Self {
        Self { base }
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    /// Source position to 0-based offset
    pub fn offset(&self, position: u32) -> u32 {
        position.saturating_sub(self.base)
    }

    /// Default rule: `[start - base, end - base]`
    pub fn range(&self, span: Span) -> Range {
        Range::new(self.offset(span.start), self.offset(span.end))
    }

    /// Range of a bare spread marker: `[start - base, end - base + 1]`
    pub fn spread_marker(&self, marker: Span) -> Range {
        Range::new(
            self.offset(marker.start),
            self.offset(marker.end).saturating_add(1),
        )
    }

    /// Spread element: the marker range stretched over its argument
    pub fn spread_element(&self, marker: Span, argument: Range) -> Range {
        let marker = self.spread_marker(marker);
        Range::new(marker.start(), marker.end().max(argument.end()))
    }

    /// Synthesized key/value pair: from the key's start to the value's end
    pub fn key_value(&self, key: Span, value: Span) -> Range {
        Range::new(self.offset(key.start), self.offset(value.end))
    }

    /// Template chunk widened over its delimiters: the opening backtick or
    /// `}` before it, and `${` after it. The tail chunk closes with a single
    /// backtick.
    pub fn template_chunk(&self, span: Span, tail: bool) -> Range {
        let start = self.offset(span.start).saturating_sub(1);
        let end = self.offset(span.end).saturating_add(if tail { 1 } else { 2 });
        Range::new(start, end)
    }

    /// Function value of a method shorthand: `[start - base + 1, end - base]`
    pub fn method_value(&self, span: Span) -> Range {
        Range::new(
            self.offset(span.start).saturating_add(1),
            self.offset(span.end),
        )
    }

    /// Function value of a method starting at its parameter list (or type
    /// parameter list) at 0-based `open`, never before the method span
    pub fn method_value_from(&self, span: Span, open: u32) -> Range {
        Range::new(self.offset(span.start).max(open), self.offset(span.end))
    }

    /// Binding range extended over its type annotation
    pub fn annotated(&self, binding: Range, annotation: Option<Range>) -> Range {
        match annotation {
            Some(annotation) => Range::new(binding.start(), binding.end().max(annotation.end())),
            None => binding,
        }
    }

    /// Class body: from the opening brace to the end of the class.
    ///
    /// `header_end` is the end of the last header piece (name, type
    /// parameters, heritage). The brace sits one separator after it, but
    /// never after the first member, nor after `{` of an empty `{}`.
    ///
    /// SWC records no brace position, so this assumes exactly one space
    /// before `{`. `class C{ x }` starts one late and `class C  { x }` one
    /// early.
    pub fn class_body(&self, header_end: u32, first_member: Option<u32>, class: Range) -> Range {
        let limit = match first_member {
            Some(member) => member.saturating_sub(1),
            None => class.end().saturating_sub(2),
        };
        let start = header_end.saturating_add(1).min(limit).max(header_end);
        Range::new(start, class.end())
    }

    /// `{...expr}` attribute in a JSX opening element
    pub fn jsx_spread_attribute(&self, marker: Span, argument: Range) -> Range {
        Range::new(
            self.offset(marker.start).saturating_sub(1),
            argument.end().saturating_add(1),
        )
    }

    /// `{}` or `{/* comment */}`: everything between the braces
    pub fn jsx_empty_expression(&self, container: Span) -> Range {
        let start = self.offset(container.start).saturating_add(1);
        let end = self.offset(container.end).saturating_sub(1).max(start);
        Range::new(start, end)
    }

    /// The first `len` bytes of a span (`new` of `new.target`)
    pub fn leading(&self, span: Span, len: u32) -> Range {
        let start = self.offset(span.start);
        Range::new(start, start.saturating_add(len).min(self.offset(span.end)))
    }

    /// The last `len` bytes of a span (`meta` of `import.meta`, `const` of `as const`)
    pub fn trailing(&self, span: Span, len: u32) -> Range {
        let end = self.offset(span.end);
        Range::new(end.saturating_sub(len).max(self.offset(span.start)), end)
    }
}
