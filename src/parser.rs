//!
//! Entitlement parser.
//!
//! Consumes the [`TokenStream`] produced by the lexer and applies the AARC-G002 rules in
//! either [`ParseMode::Strict`] or [`ParseMode::Lenient`]. The parser is pure; it only logs.

use std::borrow::Cow;

use crate::config::{ParseMode, ParserConfig};
use crate::entitlement::Entitlement;
use crate::error::{GrammarViolation, ParseError};
use crate::lexer::{self, TokenStream, GROUP_MARKER, SEGMENT_SEPARATOR};

/// Parses `raw` with default options for `mode`.
pub fn parse(raw: &str, mode: ParseMode) -> Result<Entitlement, ParseError> {
    parse_with(raw, &ParserConfig::from(mode))
}

/// Parses `raw` according to `config`.
pub fn parse_with(raw: &str, config: &ParserConfig) -> Result<Entitlement, ParseError> {
    tracing::trace!(raw, mode = ?config.mode, "parsing entitlement");

    let result = decode(raw, config).and_then(|text| Parser { config }.run(&text));
    match &result {
        Ok(entitlement) => tracing::debug!(
            namespace_id = ?entitlement.namespace_id(),
            group = entitlement.group(),
            subgroups = ?entitlement.subgroups(),
            role = ?entitlement.role(),
            group_authority = ?entitlement.group_authority(),
            "parsed entitlement"
        ),
        Err(error) => tracing::debug!(raw, mode = ?config.mode, %error, "entitlement rejected"),
    }
    result
}

fn decode<'a>(raw: &'a str, config: &ParserConfig) -> Result<Cow<'a, str>, ParseError> {
    if !config.percent_decode {
        return Ok(Cow::Borrowed(raw));
    }
    if config.mode == ParseMode::Lenient {
        let bytes = urlencoding::decode_binary(raw.as_bytes());
        return Ok(Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()));
    }
    urlencoding::decode(raw).map_err(|e| ParseError::InvalidEncoding(e.to_string()))
}

struct Parser<'c> {
    config: &'c ParserConfig,
}

impl Parser<'_> {
    fn strict(&self) -> bool {
        self.config.mode == ParseMode::Strict
    }

    fn run(&self, text: &str) -> Result<Entitlement, ParseError> {
        // Lenient mode treats a dangling `role=` like any other empty role.
        let tokens = if self.strict() { lexer::tokenize(text)? } else { lexer::scan(text)? };
        let marker = self.locate_group_marker(&tokens.segments)?;

        let namespace_id = self.namespace(&tokens.segments[..marker])?;
        let (group, subgroups) = self.group_path(&tokens.segments[marker + 1..])?;
        let role = self.role(&tokens)?;
        let group_authority = self.group_authority(&tokens)?;

        Ok(Entitlement::from_parts(namespace_id, group, subgroups, role, group_authority))
    }

    /// Index of the `group` marker among the segments.
    ///
    /// The first exact `group` wins. A differently cased spelling is only considered when no
    /// exact marker exists.
    fn locate_group_marker(&self, segments: &[&str]) -> Result<usize, ParseError> {
        if let Some(index) = segments.iter().position(|segment| *segment == GROUP_MARKER) {
            return Ok(index);
        }
        let index = segments
            .iter()
            .position(|segment| segment.eq_ignore_ascii_case(GROUP_MARKER))
            .ok_or(ParseError::MissingGroupMarker)?;

        let marker = segments[index];
        if self.strict() {
            return Err(GrammarViolation::MisspelledGroupMarker(marker.to_string()).into());
        }
        tracing::debug!(marker, "accepting misspelled group marker");
        Ok(index)
    }

    fn namespace(&self, segments: &[&str]) -> Result<Vec<String>, ParseError> {
        if self.strict() {
            if segments.is_empty() {
                return Err(GrammarViolation::EmptyNamespace.into());
            }
            if segments.iter().any(|segment| segment.is_empty()) {
                return Err(GrammarViolation::EmptyNamespaceSegment.into());
            }
        } else if segments.is_empty() {
            tracing::debug!("accepting entitlement with empty namespace");
        }
        Ok(self.non_empty(segments, "namespace"))
    }

    fn group_path(&self, segments: &[&str]) -> Result<(String, Vec<String>), ParseError> {
        if self.strict() {
            let group = match segments.first() {
                Some(group) if !group.is_empty() => group.to_string(),
                _ => return Err(GrammarViolation::MissingGroup.into()),
            };
            let subgroups = &segments[1..];
            if subgroups.iter().any(|segment| segment.is_empty()) {
                return Err(GrammarViolation::EmptySubgroup.into());
            }
            return Ok((group, subgroups.iter().map(|s| s.to_string()).collect()));
        }

        let mut path = self.non_empty(segments, "group path").into_iter();
        let group = path.next().ok_or(GrammarViolation::MissingGroup)?;
        Ok((group, path.collect()))
    }

    fn role(&self, tokens: &TokenStream<'_>) -> Result<Option<String>, ParseError> {
        match tokens.role {
            None => Ok(None),
            Some("") if self.strict() => Err(ParseError::EmptyRole),
            Some("") => {
                tracing::debug!("dropping empty role");
                Ok(None)
            }
            Some(role) if self.strict() && role.contains(SEGMENT_SEPARATOR) => {
                Err(GrammarViolation::RoleNotFinal.into())
            }
            Some(role) => Ok(Some(role.to_string())),
        }
    }

    fn group_authority(&self, tokens: &TokenStream<'_>) -> Result<Option<String>, ParseError> {
        match tokens.fragment {
            None if self.strict() && self.config.require_group_authority => {
                Err(GrammarViolation::MissingGroupAuthority.into())
            }
            None => Ok(None),
            Some("") if self.strict() => Err(GrammarViolation::EmptyGroupAuthority.into()),
            Some("") => {
                tracing::debug!("dropping empty group authority");
                Ok(None)
            }
            Some(authority) => Ok(Some(authority.to_string())),
        }
    }

    /// Copies the non-empty segments, logging any that are skipped.
    fn non_empty(&self, segments: &[&str], part: &'static str) -> Vec<String> {
        let kept: Vec<String> = segments
            .iter()
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.to_string())
            .collect();
        if kept.len() != segments.len() {
            tracing::debug!(part, skipped = segments.len() - kept.len(), "skipping empty segments");
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexError;

    const ADMIN: &str = "urn:geant:h-df.de:group:aai-admin";

    fn strict(raw: &str) -> Result<Entitlement, ParseError> {
        parse(raw, ParseMode::Strict)
    }

    fn lenient(raw: &str) -> Result<Entitlement, ParseError> {
        parse(raw, ParseMode::Lenient)
    }

    #[test]
    fn test_parse_minimal() {
        let e = strict(ADMIN).unwrap();
        assert_eq!(e.namespace_id(), ["h-df.de".to_string()]);
        assert_eq!(e.group(), "aai-admin");
        assert!(e.subgroups().is_empty());
        assert_eq!(e.role(), None);
        assert_eq!(e.group_authority(), None);
    }

    #[test]
    fn test_parse_full() {
        let e = strict(
            "urn:geant:h-df.de:sub:group:aai-admin:a:b:role=member#backupserver.used.for.developmt.de",
        )
        .unwrap();
        assert_eq!(e.namespace_id(), ["h-df.de".to_string(), "sub".to_string()]);
        assert_eq!(e.group(), "aai-admin");
        assert_eq!(e.subgroups(), ["a".to_string(), "b".to_string()]);
        assert_eq!(e.role(), Some("member"));
        assert_eq!(e.group_authority(), Some("backupserver.used.for.developmt.de"));
    }

    #[test]
    fn test_lex_errors_propagate() {
        assert_eq!(strict("urn:mace:x:group:g"), Err(ParseError::Lex(LexError::MissingPrefix)));
        assert_eq!(lenient("urn:mace:x:group:g"), Err(ParseError::Lex(LexError::MissingPrefix)));
        assert_eq!(
            strict("urn:geant:x:group:g:role="),
            Err(ParseError::Lex(LexError::MalformedRoleClause))
        );
    }

    #[test]
    fn test_lenient_drops_dangling_role_marker() {
        let e = lenient("urn:geant:ns:group:g:sub:role=").unwrap();
        assert_eq!(e.group(), "g");
        assert_eq!(e.subgroups(), ["sub".to_string()]);
        assert_eq!(e.role(), None);
        assert_eq!(e.group_authority(), None);
    }

    #[test]
    fn test_missing_group_marker() {
        assert_eq!(
            strict("urn:geant:h-df.de:groups:aai-admin"),
            Err(ParseError::MissingGroupMarker)
        );
        assert_eq!(lenient("urn:geant:h-df.de:aai-admin"), Err(ParseError::MissingGroupMarker));
    }

    #[test]
    fn test_empty_group_is_invalid_grammar() {
        assert_eq!(
            strict("urn:geant:h-df.de:group:"),
            Err(ParseError::InvalidGrammar(GrammarViolation::MissingGroup))
        );
        assert_eq!(
            strict("urn:geant:h-df.de:group"),
            Err(ParseError::InvalidGrammar(GrammarViolation::MissingGroup))
        );
        // Lenient cannot identify a group either.
        assert_eq!(
            lenient("urn:geant:h-df.de:group::"),
            Err(ParseError::InvalidGrammar(GrammarViolation::MissingGroup))
        );
    }

    #[test]
    fn test_strict_rejects_empty_segments() {
        assert_eq!(
            strict("urn:geant:group:g"),
            Err(ParseError::InvalidGrammar(GrammarViolation::EmptyNamespace))
        );
        assert_eq!(
            strict("urn:geant:a::b:group:g"),
            Err(ParseError::InvalidGrammar(GrammarViolation::EmptyNamespaceSegment))
        );
        assert_eq!(
            strict("urn:geant:ns:group:g::s"),
            Err(ParseError::InvalidGrammar(GrammarViolation::EmptySubgroup))
        );
        assert_eq!(
            strict("urn:geant:ns:group:g:"),
            Err(ParseError::InvalidGrammar(GrammarViolation::EmptySubgroup))
        );
    }

    #[test]
    fn test_lenient_skips_empty_segments() {
        let e = lenient("urn:geant:a::b:group::g::s:").unwrap();
        assert_eq!(e.namespace_id(), ["a".to_string(), "b".to_string()]);
        assert_eq!(e.group(), "g");
        assert_eq!(e.subgroups(), ["s".to_string()]);

        let e = lenient("urn:geant:group:g").unwrap();
        assert!(e.namespace_id().is_empty());
        assert_eq!(e.to_canonical_string(), "urn:geant:group:g");
    }

    #[test]
    fn test_misspelled_marker() {
        assert_eq!(
            strict("urn:geant:ns:Group:g"),
            Err(ParseError::InvalidGrammar(GrammarViolation::MisspelledGroupMarker("Group".into())))
        );
        let e = lenient("urn:geant:ns:GROUP:g").unwrap();
        assert_eq!(e.group(), "g");
        assert_eq!(e.to_canonical_string(), "urn:geant:ns:group:g");
    }

    #[test]
    fn test_exact_group_marker_preferred_over_other_spellings() {
        let raw = "urn:geant:ns:Group:x:group:g";
        for e in [strict(raw).unwrap(), lenient(raw).unwrap()] {
            assert_eq!(e.namespace_id(), ["ns".to_string(), "Group".to_string(), "x".to_string()]);
            assert_eq!(e.group(), "g");
            assert!(e.subgroups().is_empty());
        }

        // A later misspelling is just a subgroup.
        let e = lenient("urn:geant:ns:group:g:GROUP").unwrap();
        assert_eq!(e.group(), "g");
        assert_eq!(e.subgroups(), ["GROUP".to_string()]);
    }

    #[test]
    fn test_empty_role() {
        assert_eq!(strict("urn:geant:ns:group:g:role=#auth"), Err(ParseError::EmptyRole));
        let e = lenient("urn:geant:ns:group:g:role=#auth").unwrap();
        assert_eq!(e.role(), None);
        assert_eq!(e.group_authority(), Some("auth"));
    }

    #[test]
    fn test_role_must_be_final_in_strict_mode() {
        assert_eq!(
            strict("urn:geant:ns:group:g:role=member:extra"),
            Err(ParseError::InvalidGrammar(GrammarViolation::RoleNotFinal))
        );
        let e = lenient("urn:geant:ns:group:g:role=member:extra").unwrap();
        assert_eq!(e.role(), Some("member:extra"));
    }

    #[test]
    fn test_group_authority_edge_cases() {
        assert_eq!(
            strict("urn:geant:ns:group:g#"),
            Err(ParseError::InvalidGrammar(GrammarViolation::EmptyGroupAuthority))
        );
        assert_eq!(lenient("urn:geant:ns:group:g#").unwrap().group_authority(), None);

        let e = strict("urn:geant:ns:group:g#urn:geant:h-df.de:aai#x").unwrap();
        assert_eq!(e.group_authority(), Some("urn:geant:h-df.de:aai#x"));
    }

    #[test]
    fn test_require_group_authority() {
        let config = ParserConfig::strict().with_require_group_authority(true);
        assert_eq!(
            parse_with(ADMIN, &config),
            Err(ParseError::InvalidGrammar(GrammarViolation::MissingGroupAuthority))
        );
        assert!(parse_with(&format!("{ADMIN}#auth"), &config).is_ok());

        let config = ParserConfig::lenient().with_require_group_authority(true);
        assert!(parse_with(ADMIN, &config).is_ok());
    }

    #[test]
    fn test_percent_decoding() {
        let raw = "urn%3Ageant%3Ah-df.de%3Agroup%3Aaai-admin%3Arole%3Dmember%23auth";
        assert!(strict(raw).is_err());

        let config = ParserConfig::strict().with_percent_decode(true);
        let e = parse_with(raw, &config).unwrap();
        assert_eq!(e, strict("urn:geant:h-df.de:group:aai-admin:role=member#auth").unwrap());

        assert!(matches!(
            parse_with("urn:geant:ns:group:%FF", &config),
            Err(ParseError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_lenient_percent_decoding_replaces_invalid_utf8() {
        let config = ParserConfig::lenient().with_percent_decode(true);
        let e = parse_with("urn:geant:ns:group:a%FFb", &config).unwrap();
        assert_eq!(e.group(), "a\u{FFFD}b");
    }

    #[test]
    fn test_first_group_marker_wins() {
        let e = strict("urn:geant:ns:group:g:group:s").unwrap();
        assert_eq!(e.namespace_id(), ["ns".to_string()]);
        assert_eq!(e.group(), "g");
        assert_eq!(e.subgroups(), ["group".to_string(), "s".to_string()]);
    }
}
