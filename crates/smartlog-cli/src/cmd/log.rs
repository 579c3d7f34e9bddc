//! `git sl` — render the sparse smartlog.
//!
//! Seeds the tree with every local branch tip plus the checked-out
//! commit, then prints the ASCII graph. Seeds without a unique merge
//! base against the main line are reported and skipped; everything else
//! fatal aborts the run.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::warn;

use smartlog_core::render::{NodePrinter, RefList, TreePrinter};
use smartlog_core::repo::git::GitRepo;
use smartlog_core::repo::CommitGraph;
use smartlog_core::tree::Smartlog;

use crate::config::Config;

/// Arguments for the smartlog command.
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Display all commits, regardless of age.
    #[arg(short, long)]
    pub all: bool,

    /// Main reference to compare against (default from config,
    /// falling back to origin/master).
    #[arg(long, value_name = "REF")]
    pub main: Option<String>,

    /// When to emit ANSI colors.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn enabled(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::stdout().is_terminal(),
        }
    }
}

pub fn run_log(args: &LogArgs, config: &Config, cwd: &Path) -> Result<()> {
    let repo = GitRepo::discover(cwd)?;
    let main_ref = args
        .main
        .clone()
        .unwrap_or_else(|| config.main_ref.clone());

    let mut log = Smartlog::new(&repo, &main_ref, config.max_age_secs(args.all))
        .with_context(|| format!("unable to resolve main reference '{main_ref}'"))?;

    // Seed with every local branch tip, then the checkout itself.
    for (branch, commit) in repo.local_branches()? {
        if let Err(err) = log.add_commit(&commit) {
            if err.is_per_commit() {
                warn!(branch, %err, "skipping branch");
            } else {
                return Err(err.into());
            }
        }
    }
    let head = repo.head()?;
    if let Err(err) = log.add_commit(head.commit()) {
        if err.is_per_commit() {
            warn!(%err, "skipping checked-out commit");
        } else {
            return Err(err.into());
        }
    }

    let main_commit = log.main_commit().clone();
    let refs = RefList::new(&repo, &[(main_ref, main_commit)])?;
    let head_id = head.commit().id.clone();
    let printer = NodePrinter::new(&refs, head_id.clone(), unix_now(), args.color.enabled());
    let tree = TreePrinter::new(log.store(), &printer, head_id);
    print!("{}", tree.print_tree());
    Ok(())
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}
