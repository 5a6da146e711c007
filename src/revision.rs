//! Sources of the revision the current build checked out.

use std::env;
use std::ffi::{OsStr, OsString};

use log::debug;

/// The symbolic revision used when no current revision is known.
pub const HEAD: &str = "HEAD";

/// The environment variable `EnvRevision::default()` reads.
pub const DEFAULT_ENV_VAR: &str = "SEMAPHORE_GIT_SHA";

/// A provider of the revision the running build checked out.
///
/// An empty string is treated the same as `None` by the resolver.
pub trait CurrentRevision {
    /// Returns the current revision, if one is known.
    fn current_revision(&self) -> Option<String>;
}

impl<F> CurrentRevision for F
where
    F: Fn() -> Option<String>,
{
    fn current_revision(&self) -> Option<String> {
        self()
    }
}

/// Reads the current revision from an environment variable.
///
/// The variable is read each time a revision is requested, never cached.
/// Unset, empty and non-unicode values are all reported as absent.
#[derive(Debug, Clone)]
pub struct EnvRevision {
    var: OsString,
}

impl EnvRevision {
    /// Reads the current revision from the variable `var`.
    pub fn new<K: AsRef<OsStr>>(var: K) -> EnvRevision {
        EnvRevision {
            var: var.as_ref().to_os_string(),
        }
    }

    /// The name of the variable this provider reads.
    pub fn var(&self) -> &OsStr {
        &self.var
    }
}

impl Default for EnvRevision {
    fn default() -> EnvRevision {
        EnvRevision::new(DEFAULT_ENV_VAR)
    }
}

impl CurrentRevision for EnvRevision {
    fn current_revision(&self) -> Option<String> {
        match env::var(&self.var) {
            Ok(value) if !value.is_empty() => Some(value),
            Ok(_) => None,
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                debug!("ignoring non-unicode value of {:?}", self.var);
                None
            }
        }
    }
}

/// A current revision known up front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedRevision {
    rev: Option<String>,
}

impl FixedRevision {
    /// Always reports `rev` as the current revision.
    pub fn new<S: Into<String>>(rev: S) -> FixedRevision {
        FixedRevision {
            rev: Some(rev.into()),
        }
    }

    /// Never reports a current revision, so omitted sides become `HEAD`.
    pub fn none() -> FixedRevision {
        FixedRevision { rev: None }
    }
}

impl CurrentRevision for FixedRevision {
    fn current_revision(&self) -> Option<String> {
        self.rev.clone()
    }
}

/// Returns the revision an omitted side of a range defaults to.
///
/// This is the current revision reported by `provider`, or `HEAD` when it
/// reports none (or an empty string). The result is never empty.
pub fn fallback<P: CurrentRevision + ?Sized>(provider: &P) -> String {
    match provider.current_revision() {
        Some(rev) if !rev.is_empty() => rev,
        _ => HEAD.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{fallback, CurrentRevision, EnvRevision, FixedRevision, DEFAULT_ENV_VAR, HEAD};

    #[test]
    fn fixed() {
        assert_eq!(
            FixedRevision::new("deadbeef").current_revision(),
            Some("deadbeef".to_string())
        );
        assert_eq!(FixedRevision::none().current_revision(), None);
        assert_eq!(FixedRevision::default(), FixedRevision::none());
    }

    #[test]
    fn fallback_chain() {
        assert_eq!(fallback(&FixedRevision::new("deadbeef")), "deadbeef");
        assert_eq!(fallback(&FixedRevision::none()), HEAD);
        assert_eq!(fallback(&FixedRevision::new("")), HEAD);
    }

    #[test]
    fn closures_are_providers() {
        let provider = || Some("cafebabe".to_string());
        assert_eq!(fallback(&provider), "cafebabe");
        let provider = || -> Option<String> { None };
        assert_eq!(fallback(&provider), HEAD);

        let dynamic: &dyn CurrentRevision = &FixedRevision::new("abc");
        assert_eq!(fallback(dynamic), "abc");
    }

    #[test]
    fn env_default_var() {
        assert_eq!(EnvRevision::default().var(), DEFAULT_ENV_VAR);
        assert_eq!(EnvRevision::new("OTHER_SHA").var(), "OTHER_SHA");
    }

    // Each test reading the environment uses its own variable so tests running
    // in parallel threads cannot observe each other.
    #[test]
    fn env_reads_at_call_time() {
        let var = "REVRANGE_UNIT_ENV_READS_AT_CALL_TIME";
        let provider = EnvRevision::new(var);

        std::env::remove_var(var);
        assert_eq!(provider.current_revision(), None);
        assert_eq!(fallback(&provider), HEAD);

        std::env::set_var(var, "");
        assert_eq!(provider.current_revision(), None);

        std::env::set_var(var, "0123abcd");
        assert_eq!(provider.current_revision(), Some("0123abcd".to_string()));
        assert_eq!(fallback(&provider), "0123abcd");

        std::env::remove_var(var);
    }
}
