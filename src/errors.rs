//! Defines errors used in the SMILES parser.

use std::ops::Range;

use elements_rs::Element;
use thiserror::Error;

use crate::{atom::atom_symbol::AtomSymbol, bond::Bond};

/// The errors that could occur during SMILES tokenizing, parsing, and
/// enrichment.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum SmilesError {
    /// Bond token found inside a bracket atom.
    #[error("bond in bracket: {0}")]
    BondInBracket(Bond),
    /// A charge is over the allowed maximum (15).
    #[error("charge overflow: {0}")]
    ChargeOverflow(i8),
    /// A charge is below the allowed minimum (-15).
    #[error("charge underflow: {0}")]
    ChargeUnderflow(i8),
    /// A non-organic-subset element was found outside of brackets.
    #[error("element requires brackets")]
    ElementRequiresBrackets,
    /// Wrapper for `elements_rs` errors.
    #[error("error parsing element: {0}")]
    ElementsRs(elements_rs::errors::Error),
    /// Element forbidden to be written as aromatic here.
    #[error("invalid aromatic element: {0}")]
    InvalidAromaticElement(Element),
    /// Specified chirality is not a valid form.
    #[error("invalid chirality")]
    InvalidChirality,
    /// The atom class is not valid.
    #[error("invalid class")]
    InvalidClass,
    /// Invalid element name.
    #[error("invalid element name: {0}")]
    InvalidElementName(char),
    /// Invalid isotope value.
    #[error("invalid isotope")]
    InvalidIsotope,
    /// An invalid number was encountered.
    #[error("invalid number")]
    InvalidNumber,
    /// Integer overflow while parsing a number.
    #[error("integer overflow")]
    IntegerOverflow,
    /// Non-organic-subset element found outside of brackets.
    #[error("invalid unbracketed atom: {0:?}")]
    InvalidUnbracketedAtom(AtomSymbol),
    /// An invalid ring-closure number.
    #[error("invalid ring number")]
    InvalidRingNumber,
    /// A bracket atom `[...]` with no element.
    #[error("missing element inside brackets")]
    MissingBracketElement,
    /// A component ended with a dangling bond (bond with no following atom).
    #[error("missing atom after bond")]
    MissingAtomAfterBond,
    /// Non-bond `.` found inside a bracket.
    #[error("non-bond '.' in bracket")]
    NonBondInBracket,
    /// Ring number over 99.
    #[error("ring number overflow: {0}")]
    RingNumberOverflow(u8),
    /// A ring-closure digit was opened but never closed.
    #[error("unmatched ring closure {0}")]
    UnmatchedRingClosure(u8),
    /// Two sightings of the same ring closure disagree on bond type.
    #[error("ring closure bond mismatch")]
    RingClosureBondMismatch,
    /// A `)` with no matching `(`.
    #[error("unbalanced parenthesis")]
    UnbalancedParenthesis,
    /// Unexpectedly inside of brackets.
    #[error("unexpected bracketed state")]
    UnexpectedBracketedState,
    /// Unexpected end of string.
    #[error("unexpected end of string")]
    UnexpectedEndOfString,
    /// An unexpected character was encountered.
    #[error("unexpected character: {0}")]
    UnexpectedCharacter(char),
    /// An unexpected `%` was found.
    #[error("unexpected '%'")]
    UnexpectedPercent,
    /// An unexpected left bracket `[` was found (nested brackets).
    #[error("unexpected '['")]
    UnexpectedLeftBracket,
    /// An unexpected right bracket `]` was found.
    #[error("unexpected ']'")]
    UnexpectedRightBracket,
    /// A closing `]` bracket was never found.
    #[error("unclosed '['")]
    UnclosedBracket,
}

impl From<elements_rs::errors::Error> for SmilesError {
    fn from(e: elements_rs::errors::Error) -> Self {
        SmilesError::ElementsRs(e)
    }
}

impl From<std::num::TryFromIntError> for SmilesError {
    fn from(_: std::num::TryFromIntError) -> Self {
        SmilesError::InvalidNumber
    }
}

/// Wraps a [`SmilesError`], adding the byte-offset span of the input where it
/// was found.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{smiles_error} at {}..{}", span.start, span.end)]
pub struct SmilesErrorWithSpan {
    /// The underlying [`SmilesError`].
    smiles_error: SmilesError,
    /// The span, in bytes, of the offending token.
    span: Range<usize>,
}

impl SmilesErrorWithSpan {
    /// Creates a new error from the [`SmilesError`] and the `span`.
    #[must_use]
    pub fn new(smiles_error: SmilesError, start: usize, end: usize) -> Self {
        Self { smiles_error, span: Range { start, end } }
    }

    /// Returns the [`SmilesError`].
    #[must_use]
    pub fn smiles_error(&self) -> SmilesError {
        self.smiles_error
    }

    /// Returns the start of the span.
    #[must_use]
    pub fn start(&self) -> usize {
        self.span.start
    }

    /// Returns the end of the span.
    #[must_use]
    pub fn end(&self) -> usize {
        self.span.end
    }

    /// Returns the full span for the error.
    #[must_use]
    pub fn span(&self) -> &Range<usize> {
        &self.span
    }

    /// Renders the error with a caret underline pointing back at the
    /// offending slice of `input`.
    #[must_use]
    pub fn render(&self, input: &str) -> String {
        let start = self.start().min(input.len());
        let end = self.end().min(input.len()).max(start + 1).min(input.len());

        let mut underline = String::new();
        underline.push_str(&" ".repeat(start));
        underline.push_str(&"^".repeat(end - start));

        format!("{input}\n{underline}\n{}", self.smiles_error)
    }
}

/// The severity of a [`Diagnostic`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A fatal condition; the component that produced it could not be fully
    /// processed (e.g. the current dot-separated molecule component).
    Error,
    /// A recoverable condition: the pipeline continued, possibly with
    /// degraded output (cleared stereo, a ring left non-aromatic, ...).
    Warning,
}

/// A single diagnostic message accumulated by the pipeline, carrying the
/// byte offset in the original input it refers to. Diagnostics never
/// interrupt the pipeline; they are collected on [`crate::smiles::ParseResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// How serious the diagnostic is.
    severity: Severity,
    /// Human-readable description.
    message: String,
    /// Byte offset in the source string this diagnostic refers to.
    offset: usize,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>, offset: usize) -> Self {
        Self { severity, message: message.into(), offset }
    }

    /// Creates an error-severity diagnostic from a [`SmilesErrorWithSpan`].
    #[must_use]
    pub fn from_error(err: &SmilesErrorWithSpan) -> Self {
        Self::new(Severity::Error, err.smiles_error().to_string(), err.start())
    }

    /// Creates a warning-severity diagnostic.
    #[must_use]
    pub fn warning(message: impl Into<String>, offset: usize) -> Self {
        Self::new(Severity::Warning, message, offset)
    }

    /// Returns the severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the byte offset.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}
