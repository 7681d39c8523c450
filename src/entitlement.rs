//!
//! The `Entitlement` value object and its canonical serialization.

use std::fmt;
use std::str::FromStr;

use crate::config::ParseMode;
use crate::containment;
use crate::error::{GrammarViolation, ParseError};
use crate::lexer::{FRAGMENT_SEPARATOR, GROUP_MARKER, PREFIX, ROLE_MARKER, SEGMENT_SEPARATOR};
use crate::parser;

/// A parsed AARC-G002 entitlement.
///
/// Immutable once constructed. Two values are equal when every field is equal, including
/// the order of `subgroups` and the `group_authority`. Equality is not containment; see
/// [`Entitlement::is_contained_in`].
///
/// Serializes through `serde` as its canonical string and deserializes through a strict
/// parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Entitlement {
    namespace_id: Vec<String>,
    group: String,
    subgroups: Vec<String>,
    role: Option<String>,
    group_authority: Option<String>,
}

impl Entitlement {
    /// Assembles an entitlement from fields the parser has already validated.
    pub(crate) fn from_parts(
        namespace_id: Vec<String>,
        group: String,
        subgroups: Vec<String>,
        role: Option<String>,
        group_authority: Option<String>,
    ) -> Self {
        Entitlement { namespace_id, group, subgroups, role, group_authority }
    }

    /// Starts building an entitlement from fields rather than from a string.
    pub fn builder<N, S>(namespace_id: N, group: impl Into<String>) -> EntitlementBuilder
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EntitlementBuilder {
            namespace_id: namespace_id.into_iter().map(Into::into).collect(),
            group: group.into(),
            subgroups: Vec::new(),
            role: None,
            group_authority: None,
        }
    }

    /// Parses `raw` in [`ParseMode::Strict`].
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        parser::parse(raw, ParseMode::Strict)
    }

    /// Namespace segments between the `urn:geant:` prefix and the `group` marker.
    pub fn namespace_id(&self) -> &[String] {
        &self.namespace_id
    }

    /// The delegated URN namespace, i.e. the first namespace segment.
    pub fn delegated_namespace(&self) -> Option<&str> {
        self.namespace_id.first().map(String::as_str)
    }

    /// Namespace segments below the delegated namespace.
    pub fn subnamespaces(&self) -> &[String] {
        self.namespace_id.get(1..).unwrap_or_default()
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Subgroups from the outermost (index 0) to the innermost.
    pub fn subgroups(&self) -> &[String] {
        &self.subgroups
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn group_authority(&self) -> Option<&str> {
        self.group_authority.as_deref()
    }

    /// Whether holding `actual` satisfies the requirement expressed by `self`.
    pub fn is_contained_in(&self, actual: &Entitlement) -> bool {
        containment::is_contained_in(self, actual)
    }

    /// Reassembles the entitlement in its canonical AARC-G002 form.
    ///
    /// For any value produced by a strict parse, parsing the result yields an equal value.
    pub fn to_canonical_string(&self) -> String {
        let mut out = String::from(PREFIX);
        for segment in &self.namespace_id {
            out.push_str(segment);
            out.push(SEGMENT_SEPARATOR);
        }
        out.push_str(GROUP_MARKER);
        out.push(SEGMENT_SEPARATOR);
        out.push_str(&self.group);
        for subgroup in &self.subgroups {
            out.push(SEGMENT_SEPARATOR);
            out.push_str(subgroup);
        }
        if let Some(role) = &self.role {
            out.push(SEGMENT_SEPARATOR);
            out.push_str(ROLE_MARKER);
            out.push_str(role);
        }
        if let Some(authority) = &self.group_authority {
            out.push(FRAGMENT_SEPARATOR);
            out.push_str(authority);
        }
        out
    }

    /// Human-readable one-line description, for diagnostics.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "<Entitlement namespace={} group={}",
            self.namespace_id.join(","),
            self.group
        );
        for subgroup in &self.subgroups {
            out.push(',');
            out.push_str(subgroup);
        }
        if let Some(role) = &self.role {
            out.push_str(" role=");
            out.push_str(role);
        }
        out.push_str(" auth=");
        out.push_str(self.group_authority.as_deref().unwrap_or("-"));
        out.push('>');
        out
    }
}

impl fmt::Display for Entitlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl FromStr for Entitlement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Entitlement::parse(s)
    }
}

impl TryFrom<&str> for Entitlement {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Entitlement::parse(value)
    }
}

impl TryFrom<String> for Entitlement {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Entitlement::parse(&value)
    }
}

impl From<Entitlement> for String {
    fn from(entitlement: Entitlement) -> Self {
        entitlement.to_canonical_string()
    }
}

/// Builds an [`Entitlement`] from fields, checking that the result would survive a strict
/// parse of its canonical string.
#[derive(Debug, Clone)]
pub struct EntitlementBuilder {
    namespace_id: Vec<String>,
    group: String,
    subgroups: Vec<String>,
    role: Option<String>,
    group_authority: Option<String>,
}

impl EntitlementBuilder {
    pub fn subgroup(mut self, subgroup: impl Into<String>) -> Self {
        self.subgroups.push(subgroup.into());
        self
    }

    pub fn subgroups<I, S>(mut self, subgroups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subgroups.extend(subgroups.into_iter().map(Into::into));
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn group_authority(mut self, authority: impl Into<String>) -> Self {
        self.group_authority = Some(authority.into());
        self
    }

    pub fn build(self) -> Result<Entitlement, ParseError> {
        if self.namespace_id.is_empty() {
            return Err(GrammarViolation::EmptyNamespace.into());
        }
        for segment in &self.namespace_id {
            if segment.is_empty() {
                return Err(GrammarViolation::EmptyNamespaceSegment.into());
            }
            // A literal marker in the namespace would move the group boundary.
            if segment.as_str() == GROUP_MARKER {
                return Err(GrammarViolation::ReservedCharacter(segment.clone()).into());
            }
            check_path_segment(segment)?;
        }
        if self.group.is_empty() {
            return Err(GrammarViolation::MissingGroup.into());
        }
        check_path_segment(&self.group)?;
        for subgroup in &self.subgroups {
            if subgroup.is_empty() {
                return Err(GrammarViolation::EmptySubgroup.into());
            }
            check_path_segment(subgroup)?;
        }
        if let Some(role) = &self.role {
            if role.is_empty() {
                return Err(ParseError::EmptyRole);
            }
            if role.contains([SEGMENT_SEPARATOR, FRAGMENT_SEPARATOR]) {
                return Err(GrammarViolation::ReservedCharacter(role.clone()).into());
            }
        }
        if self.group_authority.as_deref() == Some("") {
            return Err(GrammarViolation::EmptyGroupAuthority.into());
        }

        Ok(Entitlement::from_parts(
            self.namespace_id,
            self.group,
            self.subgroups,
            self.role,
            self.group_authority,
        ))
    }
}

fn check_path_segment(segment: &str) -> Result<(), ParseError> {
    if segment.contains([SEGMENT_SEPARATOR, FRAGMENT_SEPARATOR])
        || segment.starts_with(ROLE_MARKER)
    {
        return Err(GrammarViolation::ReservedCharacter(segment.to_string()).into());
    }
    Ok(())
}
