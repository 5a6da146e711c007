//! Three-dot range expressions and their resolution.

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};

use crate::revision::{self, CurrentRevision, EnvRevision};
use crate::{Defaulted, Error};

/// The separator between the two sides of a range expression.
pub const SEPARATOR: &str = "...";

/// The raw sides of a range expression, before any defaults are applied.
///
/// Created by [`split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    base: &'a str,
    head: &'a str,
    range: bool,
}

impl<'a> Segments<'a> {
    /// Text on the left of the separator, empty if there is none.
    pub fn base(&self) -> &'a str {
        self.base
    }

    /// Text on the right of the separator, or the whole expression when it
    /// contains no separator.
    pub fn head(&self) -> &'a str {
        self.head
    }

    /// Whether the expression contained a separator.
    pub fn is_range(&self) -> bool {
        self.range
    }
}

/// Splits a range expression at the first `...`.
///
/// Anything after the first separator, further separators included, belongs
/// to the head: `a...b...c` splits into `a` and `b...c`. An expression with no
/// separator is all head.
pub fn split(expr: &str) -> Segments<'_> {
    match expr.split_once(SEPARATOR) {
        Some((base, head)) => Segments {
            base,
            head,
            range: true,
        },
        None => Segments {
            base: "",
            head: expr,
            range: false,
        },
    }
}

/// A range with both sides filled in.
///
/// Neither side is ever empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedRange {
    base: String,
    head: String,
    defaulted: Defaulted,
}

impl ResolvedRange {
    /// The revision the range starts from.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The revision the range ends at.
    pub fn head(&self) -> &str {
        &self.head
    }

    /// Which sides were not given in the expression and were defaulted.
    pub fn defaulted(&self) -> Defaulted {
        self.defaulted
    }

    /// Consumes the range, returning `(base, head)`.
    pub fn into_pair(self) -> (String, String) {
        (self.base, self.head)
    }
}

impl fmt::Display for ResolvedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.base, SEPARATOR, self.head)
    }
}

/// Parses a fully specified `base...head` range.
///
/// Unlike [`Resolver::resolve`] no defaults are applied, so both sides must be
/// present.
impl FromStr for ResolvedRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<ResolvedRange, Error> {
        let segments = split(s);
        if !segments.is_range() {
            return Err(Error::invalid_spec(s, "expected 'base...head'"));
        }
        if segments.base().is_empty() {
            return Err(Error::invalid_spec(s, "missing base"));
        }
        if segments.head().is_empty() {
            return Err(Error::invalid_spec(s, "missing head"));
        }
        Ok(ResolvedRange {
            base: segments.base().to_string(),
            head: segments.head().to_string(),
            defaulted: Defaulted::empty(),
        })
    }
}

/// Resolves range expressions, defaulting omitted sides through a
/// [`CurrentRevision`] provider.
#[derive(Debug, Clone, Default)]
pub struct Resolver<P = EnvRevision> {
    provider: P,
}

impl Resolver<EnvRevision> {
    /// A resolver defaulting to the revision in `SEMAPHORE_GIT_SHA`.
    pub fn from_env() -> Resolver<EnvRevision> {
        Resolver::new(EnvRevision::default())
    }
}

impl<P: CurrentRevision> Resolver<P> {
    /// A resolver defaulting omitted sides to the revision `provider` reports.
    pub fn new(provider: P) -> Resolver<P> {
        Resolver { provider }
    }

    /// The provider consulted for omitted sides.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolves `expr` into a base and a head revision.
    ///
    /// * `base...head` resolves to both sides verbatim.
    /// * `base...` and `...head` default the missing side.
    /// * `...`, the empty string, and an expression with no `...` at all
    ///   default both sides. A lone revision such as `feature` is not taken
    ///   as the head.
    ///
    /// A defaulted side is the current revision reported by the provider, or
    /// `HEAD` if there is none. The provider is consulted at most once.
    pub fn resolve(&self, expr: &str) -> ResolvedRange {
        let segments = split(expr);
        trace!(
            "split '{}' into base '{}' head '{}' (range: {})",
            expr,
            segments.base(),
            segments.head(),
            segments.is_range()
        );

        let (base, head) = if segments.is_range() {
            (segments.base(), segments.head())
        } else {
            if !expr.is_empty() {
                debug!("'{}' is not a range; defaulting both sides", expr);
            }
            ("", "")
        };

        let mut defaulted = Defaulted::empty();
        let mut current = None;
        let mut side = |segment: &str, flag: Defaulted| {
            if segment.is_empty() {
                defaulted |= flag;
                current.get_or_insert_with(|| self.fallback()).clone()
            } else {
                segment.to_string()
            }
        };
        let base = side(base, Defaulted::BASE);
        let head = side(head, Defaulted::HEAD);

        ResolvedRange {
            base,
            head,
            defaulted,
        }
    }

    fn fallback(&self) -> String {
        let rev = revision::fallback(&self.provider);
        debug!("defaulting omitted side of range to '{}'", rev);
        rev
    }
}

/// Resolves `expr`, defaulting omitted sides to the revision in
/// `SEMAPHORE_GIT_SHA`, or `HEAD` if it is unset or empty.
///
/// See [`Resolver::resolve`] for the exact rules.
pub fn resolve(expr: &str) -> ResolvedRange {
    Resolver::from_env().resolve(expr)
}
