//!
//! Containment comparator.
//!
//! Decides whether an entitlement a subject holds (`actual`) satisfies a required one. This
//! is a partial order, not equality: a membership in a narrower subgroup path satisfies a
//! requirement for a broader one, and a requirement without a role accepts any role.
//!
//! Rules are checked in order and the first failing one is reported:
//! 1. namespace segments are equal,
//! 2. groups are equal,
//! 3. the required subgroups are a prefix of the actual subgroups,
//! 4. if a role is required, the actual role is equal to it.
//!
//! The group authority is ignored unless [`AuthorityPolicy::RequireSame`] is selected.

use crate::config::AuthorityPolicy;
use crate::entitlement::Entitlement;

/// The first containment rule that did not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Mismatch {
    #[error("namespaces differ")]
    Namespace,
    #[error("groups differ")]
    Group,
    /// The required subgroup path is not a prefix of the actual one.
    #[error("actual subgroups do not extend the required subgroups")]
    Subgroups,
    #[error("required role is not held")]
    Role,
    #[error("group authorities differ")]
    GroupAuthority,
}

/// Containment check with a configurable authority policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Comparator {
    authority_policy: AuthorityPolicy,
}

impl Comparator {
    pub fn new(authority_policy: AuthorityPolicy) -> Self {
        Comparator { authority_policy }
    }

    pub fn authority_policy(&self) -> AuthorityPolicy {
        self.authority_policy
    }

    /// Returns `Ok(())` if holding `actual` satisfies `required`, otherwise the first rule
    /// that failed.
    pub fn check(&self, required: &Entitlement, actual: &Entitlement) -> Result<(), Mismatch> {
        let result = self.first_mismatch(required, actual);
        if let Err(mismatch) = result {
            tracing::debug!(
                required = %required,
                actual = %actual,
                %mismatch,
                "entitlement not contained"
            );
        }
        result
    }

    pub fn is_contained_in(&self, required: &Entitlement, actual: &Entitlement) -> bool {
        self.check(required, actual).is_ok()
    }

    fn first_mismatch(&self, required: &Entitlement, actual: &Entitlement) -> Result<(), Mismatch> {
        tracing::trace!("checking namespace");
        if required.namespace_id() != actual.namespace_id() {
            return Err(Mismatch::Namespace);
        }

        tracing::trace!("checking group");
        if required.group() != actual.group() {
            return Err(Mismatch::Group);
        }

        tracing::trace!("checking subgroups");
        if !actual.subgroups().starts_with(required.subgroups()) {
            return Err(Mismatch::Subgroups);
        }

        if let Some(role) = required.role() {
            tracing::trace!(role, "checking role");
            if actual.role() != Some(role) {
                return Err(Mismatch::Role);
            }
        }

        if self.authority_policy == AuthorityPolicy::RequireSame {
            if let Some(authority) = required.group_authority() {
                tracing::trace!(authority, "checking group authority");
                if actual.group_authority() != Some(authority) {
                    return Err(Mismatch::GroupAuthority);
                }
            }
        }

        Ok(())
    }
}

/// Like [`is_contained_in`], but reports the first rule that failed.
pub fn check_containment(required: &Entitlement, actual: &Entitlement) -> Result<(), Mismatch> {
    Comparator::default().check(required, actual)
}

/// Whether holding `actual` satisfies the requirement expressed by `required`.
///
/// The group authority is not examined.
pub fn is_contained_in(required: &Entitlement, actual: &Entitlement) -> bool {
    check_containment(required, actual).is_ok()
}
