//!
//! Grammar lexer for AARC-G002 entitlements.
//!
//! Splits a raw string on the structural delimiters of
//! `urn:geant:<namespace-id>:group:<group>(:<subgroup>)*(:role=<role>)?(#<group-authority>)?`
//! without judging the content of any segment. Emptiness, marker spelling and the like are
//! left to the parser.

use crate::error::LexError;

/// Scheme and authority every entitlement starts with.
pub const PREFIX: &str = "urn:geant:";

/// Literal segment separating the namespace from the group path.
pub const GROUP_MARKER: &str = "group";

/// Marker opening the role clause.
pub const ROLE_MARKER: &str = "role=";

/// Separates the group authority from the rest of the entitlement.
pub const FRAGMENT_SEPARATOR: char = '#';

pub const SEGMENT_SEPARATOR: char = ':';

/// Segments of a raw entitlement, borrowed from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream<'a> {
    /// `:`-separated segments between the prefix and the role clause (or fragment).
    pub segments: Vec<&'a str>,
    /// Everything after `role=` up to the fragment, verbatim.
    pub role: Option<&'a str>,
    /// Everything after the first `#`, verbatim.
    pub fragment: Option<&'a str>,
}

/// Splits `raw` into a [`TokenStream`].
///
/// Fails with [`LexError::MissingPrefix`] if `raw` does not start with [`PREFIX`], and with
/// [`LexError::MalformedRoleClause`] if `role=` is the very end of the input.
pub fn tokenize(raw: &str) -> Result<TokenStream<'_>, LexError> {
    let tokens = scan(raw)?;
    if tokens.role == Some("") && tokens.fragment.is_none() {
        return Err(LexError::MalformedRoleClause);
    }
    Ok(tokens)
}

/// Like [`tokenize`], but a dangling `role=` yields an empty role instead of an error.
pub(crate) fn scan(raw: &str) -> Result<TokenStream<'_>, LexError> {
    let body = raw.strip_prefix(PREFIX).ok_or(LexError::MissingPrefix)?;

    let (body, fragment) = match body.split_once(FRAGMENT_SEPARATOR) {
        Some((body, fragment)) => (body, Some(fragment)),
        None => (body, None),
    };

    let mut segments = Vec::new();
    let mut role = None;
    let mut offset = 0;
    for segment in body.split(SEGMENT_SEPARATOR) {
        if segment.starts_with(ROLE_MARKER) {
            // The role runs to the fragment; any further colons belong to it.
            role = Some(&body[offset + ROLE_MARKER.len()..]);
            break;
        }
        segments.push(segment);
        offset += segment.len() + SEGMENT_SEPARATOR.len_utf8();
    }

    Ok(TokenStream { segments, role, fragment })
}
