//! # Three-dot revision ranges for CI change detection
//!
//! This library turns a range expression such as `master...feature` into an
//! explicit `(base, head)` pair of revisions. Either side may be omitted, in
//! which case it defaults to the commit the running build checked out, and
//! failing that to the literal `HEAD`.
//!
//! The commit of the running build is read through a [`CurrentRevision`]
//! provider. By default this is the `SEMAPHORE_GIT_SHA` environment variable,
//! but any provider can be injected into a [`Resolver`].
//!
//! ## Resolving a range
//!
//! ```
//! use revrange::{FixedRevision, Resolver};
//!
//! let resolver = Resolver::new(FixedRevision::new("deadbeef"));
//!
//! let range = resolver.resolve("master...");
//! assert_eq!(range.base(), "master");
//! assert_eq!(range.head(), "deadbeef");
//!
//! let range = resolver.resolve("...");
//! assert_eq!(range.to_string(), "deadbeef...deadbeef");
//! ```
//!
//! Resolution never fails. Every input, including the empty string, maps to a
//! pair of non-empty revisions, `("HEAD", "HEAD")` in the worst case.
//!
//! ## Working with a `Repository`
//!
//! With the `repository` feature enabled, a resolved range can be peeled to
//! the commits it names in a local repository, see `ResolvedRange::peel`.

#![doc(html_root_url = "https://docs.rs/revrange/0.1")]
#![deny(missing_docs)]
#![warn(rust_2018_idioms)]
#![cfg_attr(test, deny(warnings))]

use bitflags::bitflags;

pub use crate::error::Error;
pub use crate::range::{resolve, split, ResolvedRange, Resolver, Segments, SEPARATOR};
#[cfg(feature = "repository")]
pub use crate::repo::PeeledRange;
pub use crate::revision::{
    fallback, CurrentRevision, EnvRevision, FixedRevision, DEFAULT_ENV_VAR, HEAD,
};

// Generates a predicate on a bitflag struct for one flag
macro_rules! is_bit_set {
    ($name:ident, $flag:expr) => {
        #[allow(missing_docs)]
        pub fn $name(&self) -> bool {
            self.intersects($flag)
        }
    };
}

/// An enumeration of possible errors that can happen when working with
/// revision ranges.
#[derive(PartialEq, Eq, Clone, Debug, Copy)]
pub enum ErrorCode {
    /// Generic error
    GenericError,
    /// Range or revision was not in a valid format
    InvalidSpec,
    /// Requested revision could not be found
    NotFound,
    /// More than one object matches a revision
    Ambiguous,
    /// HEAD refers to branch with no commits
    UnbornBranch,
}

bitflags! {
    /// Sides of a range that were filled in by the fallback chain instead of
    /// being taken verbatim from the expression.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Defaulted: u32 {
        /// The base side was defaulted
        const BASE = 1 << 0;
        /// The head side was defaulted
        const HEAD = 1 << 1;
    }
}

impl Defaulted {
    is_bit_set!(is_base, Defaulted::BASE);
    is_bit_set!(is_head, Defaulted::HEAD);
}


mod error;
mod range;
#[cfg(feature = "repository")]
mod repo;
mod revision;

#[cfg(test)]
mod tests {
    use super::Defaulted;

    #[test]
    fn defaulted_flags() {
        assert!(!Defaulted::empty().is_base());
        assert!(Defaulted::BASE.is_base());
        assert!(!Defaulted::BASE.is_head());
        assert!((Defaulted::BASE | Defaulted::HEAD).is_head());
        assert_eq!(Defaulted::default(), Defaulted::empty());
    }
}
