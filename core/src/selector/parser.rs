//! `selectors` crate glue: the selector implementation and its pseudo-class
//! parser.
//!
//! Tree-structural pseudo-classes (`:first-child`, `:nth-child()`, `:not()`,
//! `:is()`, `:empty`, `:root`, ...) are handled by the crate itself. Only the
//! state pseudo-classes below need help, and on a static page the only one
//! that can match is a link.

use std::fmt;

use cssparser::{CowRcStr, ParseError, SourceLocation, ToCss, Token};
use selectors::parser::{SelectorImpl, SelectorParseErrorKind};

/// Identifier, attribute value and namespace type for parsed selectors
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CssIdent(pub String);

impl CssIdent {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CssIdent {
    fn from(s: &str) -> Self {
        CssIdent(s.to_string())
    }
}

impl From<String> for CssIdent {
    fn from(s: String) -> Self {
        CssIdent(s)
    }
}

impl std::ops::Deref for CssIdent {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::borrow::Borrow<str> for CssIdent {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl ToCss for CssIdent {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        cssparser::serialize_identifier(&self.0, dest)
    }
}

impl precomputed_hash::PrecomputedHash for CssIdent {
    fn precomputed_hash(&self) -> u32 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        self.0.hash(&mut hasher);
        hasher.finish() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSelectors;

impl SelectorImpl for HighlightSelectors {
    type ExtraMatchingData<'a> = ();
    type AttrValue = CssIdent;
    type Identifier = CssIdent;
    type LocalName = CssIdent;
    type NamespacePrefix = CssIdent;
    type NamespaceUrl = CssIdent;
    type BorrowedLocalName = str;
    type BorrowedNamespaceUrl = str;

    type NonTSPseudoClass = PseudoClass;
    type PseudoElement = PseudoElement;
}

/// State pseudo-classes accepted in rule selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoClass {
    Link,
    AnyLink,
    Visited,
    Hover,
    Active,
    Focus,
}

impl selectors::parser::NonTSPseudoClass for PseudoClass {
    type Impl = HighlightSelectors;

    fn is_active_or_hover(&self) -> bool {
        matches!(self, PseudoClass::Active | PseudoClass::Hover)
    }

    fn is_user_action_state(&self) -> bool {
        matches!(
            self,
            PseudoClass::Hover | PseudoClass::Active | PseudoClass::Focus
        )
    }
}

impl ToCss for PseudoClass {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        dest.write_str(match self {
            PseudoClass::Link => ":link",
            PseudoClass::AnyLink => ":any-link",
            PseudoClass::Visited => ":visited",
            PseudoClass::Hover => ":hover",
            PseudoClass::Active => ":active",
            PseudoClass::Focus => ":focus",
        })
    }
}

/// Pseudo-elements parse so that rule lists stay valid CSS, but overlays
/// only ever target elements, so a selector ending in one matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoElement {
    Before,
    After,
    Marker,
}

impl selectors::parser::PseudoElement for PseudoElement {
    type Impl = HighlightSelectors;
}

impl ToCss for PseudoElement {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        dest.write_str(match self {
            PseudoElement::Before => "::before",
            PseudoElement::After => "::after",
            PseudoElement::Marker => "::marker",
        })
    }
}

fn unexpected_ident<'i, E>(location: SourceLocation, name: CowRcStr<'i>) -> ParseError<'i, E> {
    location.new_unexpected_token_error(Token::Ident(name))
}

pub(crate) struct RuleParser;

impl<'i> selectors::parser::Parser<'i> for RuleParser {
    type Impl = HighlightSelectors;
    type Error = SelectorParseErrorKind<'i>;

    fn parse_non_ts_pseudo_class(
        &self,
        location: SourceLocation,
        name: CowRcStr<'i>,
    ) -> Result<PseudoClass, ParseError<'i, Self::Error>> {
        match name.to_ascii_lowercase().as_str() {
            "link" => Ok(PseudoClass::Link),
            "any-link" => Ok(PseudoClass::AnyLink),
            "visited" => Ok(PseudoClass::Visited),
            "hover" => Ok(PseudoClass::Hover),
            "active" => Ok(PseudoClass::Active),
            "focus" => Ok(PseudoClass::Focus),
            _ => Err(unexpected_ident(location, name)),
        }
    }

    fn parse_pseudo_element(
        &self,
        location: SourceLocation,
        name: CowRcStr<'i>,
    ) -> Result<PseudoElement, ParseError<'i, Self::Error>> {
        match name.to_ascii_lowercase().as_str() {
            "before" => Ok(PseudoElement::Before),
            "after" => Ok(PseudoElement::After),
            "marker" => Ok(PseudoElement::Marker),
            _ => Err(unexpected_ident(location, name)),
        }
    }

    fn parse_is_and_where(&self) -> bool {
        true
    }
}
