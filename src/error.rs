//!
//! Defines error types for lexing and parsing entitlements.

/// Errors raised while splitting a raw entitlement into segments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// The string does not start with the `urn:geant:` scheme/authority prefix.
    #[error("Entitlement does not start with the expected prefix")]
    MissingPrefix,
    /// A `role=` marker ends the string without any value.
    #[error("Role clause has no value")]
    MalformedRoleClause,
}

/// The structural rule a raw entitlement broke.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarViolation {
    /// No segment precedes the `group` marker.
    #[error("namespace is empty")]
    EmptyNamespace,
    #[error("namespace contains an empty segment")]
    EmptyNamespaceSegment,
    /// The `group` marker is not followed by a group name.
    #[error("group name is missing or empty")]
    MissingGroup,
    #[error("subgroup path contains an empty segment")]
    EmptySubgroup,
    /// A segment that reads like the `group` marker but is spelled differently.
    #[error("unrecognized marker {0:?} where `group` was expected")]
    MisspelledGroupMarker(String),
    /// The role clause is followed by further `:`-separated content.
    #[error("role clause must be the last segment")]
    RoleNotFinal,
    #[error("group authority after `#` is empty")]
    EmptyGroupAuthority,
    #[error("group authority is required but missing")]
    MissingGroupAuthority,
    /// A field handed to the builder contains a delimiter of the grammar.
    #[error("segment {0:?} contains a reserved character")]
    ReservedCharacter(String),
}

/// Represents every way turning a raw string into an `Entitlement` can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Lexing failed: {0}")]
    Lex(#[from] LexError),
    /// No `group` marker segment was found.
    #[error("Entitlement has no `group` marker")]
    MissingGroupMarker,
    /// The string breaks the AARC-G002 grammar.
    #[error("Entitlement violates the AARC-G002 grammar: {0}")]
    InvalidGrammar(GrammarViolation),
    /// `role=` is present but carries an empty value.
    #[error("Role value is empty")]
    EmptyRole,
    /// Percent-decoding produced bytes that are not valid UTF-8.
    #[error("Entitlement is not valid percent-encoded UTF-8: {0}")]
    InvalidEncoding(String),
}

impl From<GrammarViolation> for ParseError {
    fn from(violation: GrammarViolation) -> Self {
        ParseError::InvalidGrammar(violation)
    }
}
