use std::fmt;

use git2::{Oid, Repository};
use log::debug;

use crate::{Error, ResolvedRange, SEPARATOR};

/// A resolved range whose sides have been looked up as commits of a
/// repository.
///
/// Created by `ResolvedRange::peel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeeledRange {
    base: Oid,
    head: Oid,
}

impl PeeledRange {
    /// The commit the base revision names.
    pub fn base(&self) -> Oid {
        self.base
    }

    /// The commit the head revision names.
    pub fn head(&self) -> Oid {
        self.head
    }

    /// Find the best common ancestor of base and head.
    ///
    /// A three-dot diff compares head against this commit rather than
    /// against base itself.
    pub fn merge_base(&self, repo: &Repository) -> Result<Oid, Error> {
        let oid = repo.merge_base(self.base, self.head)?;
        debug!("merge base of {} is {}", self, oid);
        Ok(oid)
    }
}

impl fmt::Display for PeeledRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.base, SEPARATOR, self.head)
    }
}

impl ResolvedRange {
    /// Look up both sides of this range in `repo`, peeling each to a commit.
    ///
    /// Any revision `git rev-parse` understands is accepted for either side.
    /// Tags are peeled to the commit they point at.
    pub fn peel(&self, repo: &Repository) -> Result<PeeledRange, Error> {
        Ok(PeeledRange {
            base: peel_commit(repo, self.base())?,
            head: peel_commit(repo, self.head())?,
        })
    }
}

fn peel_commit(repo: &Repository, spec: &str) -> Result<Oid, Error> {
    let commit = repo.revparse_single(spec)?.peel_to_commit()?;
    debug!("peeled '{}' to {}", spec, commit.id());
    Ok(commit.id())
}
