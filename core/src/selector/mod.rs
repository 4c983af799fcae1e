//! CSS selector lists used by the ignore and offset rules
//!
//! Lists are parsed once with `cssparser` + `selectors` and matched against
//! any [`Document`] through its structural accessors (tag, id, classes,
//! attributes, parent and sibling links). Hosts with a native matcher can
//! use the original text instead, see [`SelectorList::source`].

mod element;
mod parser;

#[cfg(test)]
mod match_tests;

use std::fmt;

use cssparser::{BasicParseErrorKind, ParseError, ParseErrorKind, ParserInput};
use selectors::context::{QuirksMode, SelectorCaches};
use selectors::matching::{
    MatchingContext, MatchingForInvalidation, MatchingMode, NeedsSelectorFlags, matches_selector,
};
use selectors::parser::{ParseRelative, Selector, SelectorParseErrorKind};
use thiserror::Error;

use crate::document::Document;

pub use parser::{CssIdent, HighlightSelectors, PseudoClass, PseudoElement};

use element::{DocElement, NodeScope};
use parser::RuleParser;

/// A selector list that failed to parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} at line {line}, column {column}")]
pub struct SelectorError {
    pub line: u32,
    pub column: u32,
    pub reason: String,
}

impl<'i> From<ParseError<'i, SelectorParseErrorKind<'i>>> for SelectorError {
    fn from(err: ParseError<'i, SelectorParseErrorKind<'i>>) -> Self {
        let reason = match err.kind {
            ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
                format!("unexpected {:?}", token)
            }
            ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
                "unexpected end of input".to_string()
            }
            ParseErrorKind::Basic(other) => format!("{:?}", other),
            ParseErrorKind::Custom(kind) => format!("{:?}", kind),
        };
        Self {
            line: err.location.line + 1,
            column: err.location.column,
            reason,
        }
    }
}

/// A parsed, comma-separated selector list
#[derive(Clone)]
pub struct SelectorList {
    source: String,
    selectors: Vec<Selector<HighlightSelectors>>,
}

impl SelectorList {
    /// Parse a selector list. Blank text gives an empty list that matches
    /// nothing.
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let source = source.trim();
        if source.is_empty() {
            return Ok(Self {
                source: String::new(),
                selectors: Vec::new(),
            });
        }

        let mut input = ParserInput::new(source);
        let mut parser = cssparser::Parser::new(&mut input);
        let list =
            selectors::parser::SelectorList::parse(&RuleParser, &mut parser, ParseRelative::No)?;

        Ok(Self {
            source: source.to_string(),
            selectors: list.slice().to_vec(),
        })
    }

    /// Trimmed text of the list, usable with a native `Element.matches()`
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn matches<D: Document + ?Sized>(&self, doc: &D, node: &D::Node) -> bool {
        if self.selectors.is_empty() {
            return false;
        }

        let scope = NodeScope::new();
        let element = DocElement::new(doc, &scope, node.clone());
        let mut caches = SelectorCaches::default();
        let mut context = MatchingContext::new(
            MatchingMode::Normal,
            None,
            &mut caches,
            QuirksMode::NoQuirks,
            NeedsSelectorFlags::No,
            MatchingForInvalidation::No,
        );

        self.selectors
            .iter()
            .filter(|selector| selector.pseudo_element().is_none())
            .any(|selector| matches_selector(selector, 0, None, &element, &mut context))
    }
}

impl fmt::Debug for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectorList")
            .field("source", &self.source)
            .field("len", &self.selectors.len())
            .finish()
    }
}
