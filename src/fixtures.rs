//! Sample entitlements for tests and benchmarks.
//!
//! Compiled for this crate's unit tests and, for downstream crates, behind the `test-utils`
//! feature.

use crate::entitlement::Entitlement;

pub const ADMIN: &str = "urn:geant:h-df.de:group:aai-admin";
pub const ADMIN_MEMBER: &str =
    "urn:geant:h-df.de:group:aai-admin:role=member#backupserver.used.for.developmt.de";
pub const ADMIN_ROLE_ADMIN: &str = "urn:geant:h-df.de:group:aai-admin:role=admin";
pub const ADMIN_ROLE_MEMBER: &str = "urn:geant:h-df.de:group:aai-admin:role=member";
pub const ADMIN_SUB_A: &str = "urn:geant:h-df.de:group:aai-admin:subA";
pub const EMPTY_GROUP: &str = "urn:geant:h-df.de:group:";
pub const DEEP: &str =
    "urn:geant:egi.eu:res:group:eosc-synergy:sub:subsub:role=owner#aai.egi.eu";

/// Strict-valid raw strings covering every optional part of the grammar.
pub const VALID: &[&str] =
    &[ADMIN, ADMIN_MEMBER, ADMIN_ROLE_ADMIN, ADMIN_ROLE_MEMBER, ADMIN_SUB_A, DEEP];

/// `urn:geant:h-df.de:group:aai-admin`, built without the parser.
pub fn admin() -> Entitlement {
    Entitlement::from_parts(vec!["h-df.de".into()], "aai-admin".into(), Vec::new(), None, None)
}

/// An entitlement in `h-df.de`/`group` with the given subgroups and role.
pub fn scoped(group: &str, subgroups: &[&str], role: Option<&str>) -> Entitlement {
    Entitlement::from_parts(
        vec!["h-df.de".into()],
        group.into(),
        subgroups.iter().map(|s| s.to_string()).collect(),
        role.map(Into::into),
        None,
    )
}
