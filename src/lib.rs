#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! Parsing and comparison of AARC-G002 entitlements.
//!
//! An entitlement is a URN asserting group or role membership, issued by an
//! Authentication-and-Authorization-Infrastructure:
//!
//! ```text
//! urn:geant:<namespace-id>:group:<group>(:<subgroup>)*(:role=<role>)?(#<group-authority>)?
//! ```
//!
//! This crate turns such strings into [`Entitlement`] values and answers whether an
//! entitlement a subject holds satisfies a required one:
//!
//! ```
//! use aarc_g002_entitlement::{is_contained_in, parse, ParseMode};
//!
//! let required = parse("urn:geant:h-df.de:group:aai-admin", ParseMode::Strict)?;
//! let actual = parse(
//!     "urn:geant:h-df.de:group:aai-admin:role=member#backupserver.used.for.developmt.de",
//!     ParseMode::Strict,
//! )?;
//! assert!(is_contained_in(&required, &actual));
//! assert_ne!(required, actual);
//! # Ok::<(), aarc_g002_entitlement::ParseError>(())
//! ```
//!
//! Every operation is pure and every value immutable, so values can be shared freely across
//! threads.

// Splitting raw strings into segments.
pub mod lexer;

// Strict and lenient parsing.
pub mod parser;

// The value object and its canonical form.
pub mod entitlement;

// Containment decisions.
pub mod containment;

pub mod config;

pub mod error;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;

pub use config::{AuthorityPolicy, ParseMode, ParserConfig};
pub use containment::{check_containment, is_contained_in, Comparator, Mismatch};
pub use entitlement::{Entitlement, EntitlementBuilder};
pub use error::{GrammarViolation, LexError, ParseError};
pub use lexer::{tokenize, TokenStream};
pub use parser::{parse, parse_with};
