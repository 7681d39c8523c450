//! Parser and comparator settings.
//!
//! All settings are plain values that can be embedded in a host application's own
//! configuration through `serde`.

/// How strictly the parser applies the AARC-G002 grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Any deviation from the grammar is an error.
    #[default]
    Strict,
    /// Cosmetic deviations are skipped or preserved. Only a missing namespace marker or
    /// group name is an error.
    Lenient,
}

/// Options for [`crate::parser::parse_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub mode: ParseMode,
    /// Reject entitlements without a `#<group-authority>` fragment. Only applies in
    /// [`ParseMode::Strict`].
    pub require_group_authority: bool,
    /// Decode `%xx` escapes before lexing.
    pub percent_decode: bool,
}

impl ParserConfig {
    pub fn strict() -> Self {
        Self::from(ParseMode::Strict)
    }

    pub fn lenient() -> Self {
        Self::from(ParseMode::Lenient)
    }

    pub fn with_require_group_authority(mut self, require: bool) -> Self {
        self.require_group_authority = require;
        self
    }

    pub fn with_percent_decode(mut self, decode: bool) -> Self {
        self.percent_decode = decode;
        self
    }
}

impl From<ParseMode> for ParserConfig {
    fn from(mode: ParseMode) -> Self {
        ParserConfig { mode, ..Default::default() }
    }
}

/// Whether the group authority takes part in containment decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityPolicy {
    /// The authority is provenance only and never examined.
    #[default]
    Ignore,
    /// A required entitlement that names an authority is only satisfied by an actual
    /// entitlement asserted by the same authority.
    RequireSame,
}
