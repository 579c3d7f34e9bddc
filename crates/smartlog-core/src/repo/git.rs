//! Subprocess adapter over the `git` binary.
//!
//! Every query shells out to `git` and parses its stdout. Commit records
//! are fetched with `git log -1` using unit-separator (`0x1f`) delimited
//! fields so free-text values (author, message) cannot collide with the
//! delimiter. Parsing is pure and tested without a git binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, trace};

use crate::commit::{Commit, CommitId};
use crate::error::Error;
use crate::repo::{CommitGraph, Head};

/// Field delimiter for `git log` records. Never appears in hashes,
/// emails, or (sanely encoded) commit messages.
const FIELD_SEP: char = '\x1f';

/// `git log` format producing one parseable record per commit:
/// full hash, parent hashes, author email, commit time, full message.
const LOG_FORMAT: &str = "%H\x1f%P\x1f%ae\x1f%ct\x1f%B";

/// A git repository reached through the `git` CLI.
#[derive(Debug, Clone)]
pub struct GitRepo {
    workdir: PathBuf,
}

impl GitRepo {
    /// Locate the repository containing `dir`.
    ///
    /// # Errors
    ///
    /// [`Error::RepositoryNotFound`] if `dir` is not inside a work tree.
    pub fn discover(dir: &Path) -> Result<Self, Error> {
        let output = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(["rev-parse", "--show-toplevel"])
            .output()?;
        if !output.status.success() {
            return Err(Error::RepositoryNotFound(dir.to_path_buf()));
        }
        let workdir = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        debug!(workdir = %workdir.display(), "discovered git repository");
        Ok(Self { workdir })
    }

    /// The repository work-tree root.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run `git <args>` in the work tree and return the raw output.
    fn run(&self, args: &[&str]) -> Result<Output, Error> {
        trace!(?args, "running git");
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.workdir)
            .args(args)
            .output()?;
        Ok(output)
    }

    /// Run `git <args>`, treating any failure status as fatal.
    fn run_ok(&self, args: &[&str]) -> Result<String, Error> {
        let output = self.run(args)?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(Error::Git {
                command: format!("git {}", args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// Parse one `LOG_FORMAT` record into a commit.
fn parse_commit_record(record: &str) -> Option<Commit> {
    let mut fields = record.splitn(5, FIELD_SEP);
    let id = fields.next()?.trim();
    if id.is_empty() {
        return None;
    }
    let parents = fields
        .next()?
        .split_whitespace()
        .map(CommitId::from)
        .collect();
    let author = fields.next()?.to_string();
    let timestamp = fields.next()?.trim().parse::<i64>().ok()?;
    let message = fields.next()?.trim_end_matches('\n').to_string();
    Some(Commit {
        id: CommitId::new(id),
        parents,
        author,
        timestamp,
        message,
    })
}

impl CommitGraph for GitRepo {
    fn resolve(&self, rev: &str) -> Result<Commit, Error> {
        let output = self.run(&["log", "-1", &format!("--format={LOG_FORMAT}"), rev, "--"])?;
        if !output.status.success() {
            return Err(Error::NotFound(rev.to_string()));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_commit_record(&stdout).ok_or_else(|| Error::NotFound(rev.to_string()))
    }

    fn merge_base(&self, a: &Commit, b: &Commit) -> Result<Vec<Commit>, Error> {
        let output = self.run(&["merge-base", "--all", a.id.as_str(), b.id.as_str()])?;
        // git merge-base exits 1 with empty output when there is no base.
        if !output.status.success() {
            if output.stdout.is_empty() {
                return Ok(vec![]);
            }
            return Err(Error::Git {
                command: "git merge-base --all".into(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| self.resolve(line.trim()))
            .collect()
    }

    fn local_branches(&self) -> Result<Vec<(String, Commit)>, Error> {
        let stdout = self.run_ok(&[
            "for-each-ref",
            "refs/heads",
            "--format=%(objectname) %(refname:short)",
        ])?;
        let mut branches = Vec::new();
        for line in stdout.lines() {
            // Branch names cannot contain spaces, so one split suffices.
            if let Some((oid, name)) = line.split_once(' ') {
                branches.push((name.to_string(), self.resolve(oid)?));
            }
        }
        Ok(branches)
    }

    fn head(&self) -> Result<Head, Error> {
        let commit = self.resolve("HEAD")?;
        let output = self.run(&["symbolic-ref", "--quiet", "--short", "HEAD"])?;
        if output.status.success() {
            let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
            Ok(Head::Attached { branch, commit })
        } else {
            Ok(Head::Detached { commit })
        }
    }
}
