//! "resolve-range" demo - shows how omitted sides of a three-dot range are
//! defaulted, and optionally peels the result in a local repository.

#![deny(warnings)]

use clap::Parser;
use revrange::{EnvRevision, Error, FixedRevision, ResolvedRange, Resolver, DEFAULT_ENV_VAR};

#[derive(Parser)]
struct Args {
    #[arg(value_name = "SPEC")]
    /// range to resolve, e.g. `master...` or `base...head`
    arg_spec: Option<String>,
    #[arg(long = "env-var", value_name = "NAME", default_value = DEFAULT_ENV_VAR)]
    /// environment variable holding the current revision
    flag_env_var: String,
    #[arg(long = "current", value_name = "SHA")]
    /// current revision, overriding the environment
    flag_current: Option<String>,
    #[arg(long = "git-dir", value_name = "DIR")]
    /// directory of a git repository to peel the range in
    flag_git_dir: Option<String>,
}

fn run(args: &Args) -> Result<(), Error> {
    let spec = args.arg_spec.as_deref().unwrap_or("");
    let range = match args.flag_current {
        Some(ref rev) => Resolver::new(FixedRevision::new(rev.as_str())).resolve(spec),
        None => Resolver::new(EnvRevision::new(&args.flag_env_var)).resolve(spec),
    };
    println!("{}", range.base());
    println!("{}", range.head());

    match args.flag_git_dir {
        Some(ref path) => peel(&range, path),
        None => Ok(()),
    }
}

#[cfg(feature = "repository")]
fn peel(range: &ResolvedRange, path: &str) -> Result<(), Error> {
    let repo = git2::Repository::open(path)?;
    let peeled = range.peel(&repo)?;
    println!("{}", peeled.base());
    println!("{}", peeled.head());
    println!("{}", peeled.merge_base(&repo)?);
    Ok(())
}

#[cfg(not(feature = "repository"))]
fn peel(_range: &ResolvedRange, _path: &str) -> Result<(), Error> {
    Err(Error::from_str("--git-dir requires the `repository` feature"))
}

fn main() {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => {}
        Err(e) => println!("error: {}", e),
    }
}
