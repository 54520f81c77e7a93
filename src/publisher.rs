use anyhow::{bail, Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

/// Pushes generated data files to a remote repository as a crude
/// deployment step for the static dashboard.
///
/// Every git operation is an explicit subprocess call and every failure
/// surfaces as an error. Conflicts are resolved by rebasing onto the
/// remote before committing; if the push still fails the local history
/// is left untouched. There is deliberately no reset or force-push
/// path: a conflicting remote loses nothing.
pub struct Publisher {
    repo_path: PathBuf,
    branch: String,
}

impl Publisher {
    pub fn new(repo_path: impl Into<PathBuf>, branch: impl Into<String>) -> Self {
        Self {
            repo_path: repo_path.into(),
            branch: branch.into(),
        }
    }

    /// Commit and push the given files. Returns false when there was
    /// nothing new to publish.
    pub fn publish(&self, files: &[&Path]) -> Result<bool> {
        // Incorporate remote changes first so the push is fast-forward
        self.git(&["pull", "origin", &self.branch, "--rebase"])
            .context("Failed to rebase onto remote")?;

        for file in files {
            let rel = file.to_str().context("Non-UTF8 publish path")?;
            self.git(&["add", rel])
                .with_context(|| format!("Failed to stage {}", rel))?;
        }

        if !self.has_staged_changes()? {
            info!("no new data to publish");
            return Ok(false);
        }

        let message = format!(
            "Auto-update alerts data - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        self.git(&["commit", "-m", &message])
            .context("Failed to commit")?;

        self.git(&["push", "origin", &self.branch])
            .context("Failed to push to remote")?;

        info!(branch = %self.branch, "published dashboard data");
        Ok(true)
    }

    /// `git diff --cached --quiet` exits non-zero when staged changes exist.
    fn has_staged_changes(&self) -> Result<bool> {
        let status = Command::new("git")
            .args(["diff", "--cached", "--quiet"])
            .current_dir(&self.repo_path)
            .status()
            .context("Failed to run git diff")?;
        Ok(!status.success())
    }

    fn git(&self, args: &[&str]) -> Result<()> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("git {} failed: {}", args.join(" "), stderr.trim());
        }
        Ok(())
    }
}
