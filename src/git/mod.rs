//! Inspection of the freshly cloned repository
//!
//! Cloning itself goes through `git clone` in the process runner so it uses
//! git's own credential handling. This module only reads the result.

use std::path::Path;

use git2::{ErrorCode, Repository};

use crate::error::{NoinError, Result};

/// The commit a clone ended up on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadCommit {
    pub id: String,
    /// Branch name, `None` when HEAD is detached
    pub branch: Option<String>,
    pub summary: String,
}

impl HeadCommit {
    /// First seven characters of the commit id
    pub fn short_id(&self) -> &str {
        self.id.get(..7).unwrap_or(&self.id)
    }
}

/// HEAD of the repository at `dir`
///
/// Returns `None` for a repository without commits.
pub fn head_commit(dir: &Path) -> Result<Option<HeadCommit>> {
    let repo = Repository::open(dir).map_err(|e| NoinError::GitOperationFailed {
        message: format!("cannot open repository at {}: {}", dir.display(), e.message()),
    })?;

    let head = match repo.head() {
        Ok(head) => head,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let branch = if head.is_branch() {
        head.shorthand().map(str::to_string)
    } else {
        None
    };
    let commit = head.peel_to_commit()?;

    Ok(Some(HeadCommit {
        id: commit.id().to_string(),
        branch,
        summary: commit.summary().unwrap_or_default().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{create_temp_dir, write_file};
    use git2::Signature;

    #[test]
    fn test_head_commit_of_empty_repository() {
        let temp = create_temp_dir();
        Repository::init(temp.path()).unwrap();

        assert_eq!(head_commit(temp.path()).unwrap(), None);
    }

    #[test]
    fn test_head_commit_reads_branch_and_summary() {
        let temp = create_temp_dir();
        let repo = Repository::init(temp.path()).unwrap();
        write_file(temp.path(), "package.json", "{}");

        let mut index = repo.index().unwrap();
        index.add_path(Path::new("package.json")).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let signature = Signature::now("Test", "test@example.com").unwrap();
        let oid = repo
            .commit(Some("HEAD"), &signature, &signature, "Initial commit", &tree, &[])
            .unwrap();

        let head = head_commit(temp.path()).unwrap().unwrap();

        assert_eq!(head.id, oid.to_string());
        assert_eq!(head.short_id().len(), 7);
        assert_eq!(head.summary, "Initial commit");
        assert!(head.branch.is_some());
    }

    #[test]
    fn test_head_commit_outside_repository() {
        let temp = create_temp_dir();

        let err = head_commit(temp.path()).unwrap_err();

        assert!(matches!(err, NoinError::GitOperationFailed { .. }));
    }
}
