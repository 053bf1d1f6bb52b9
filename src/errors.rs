//! Error types for projectdump.

use std::path::PathBuf;

use crate::detect::PatternError;
use crate::report::OutputError;
use crate::walker::WalkError;

/// Top-level error type for projectdump operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectDumpError {
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error: {0}")]
    Walk(#[from] WalkError),

    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("output error: {0}")]
    Output(#[from] OutputError),
}

/// Map an error to its exit code.
pub fn exit_code(error: &ProjectDumpError) -> i32 {
    match error {
        ProjectDumpError::PathNotFound(_) => 3,
        ProjectDumpError::Walk(WalkError::NotFound { .. }) => 3,
        ProjectDumpError::Walk(WalkError::PermissionDenied { .. }) => 4,
        ProjectDumpError::Walk(_) => 2,
        ProjectDumpError::Io(_) => 1,
        ProjectDumpError::Pattern(_) => 1,
        ProjectDumpError::Output(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let not_found = ProjectDumpError::Walk(WalkError::NotFound {
            path: PathBuf::from("x"),
        });
        assert_eq!(exit_code(&not_found), 3);

        let denied = ProjectDumpError::Walk(WalkError::PermissionDenied {
            path: PathBuf::from("x"),
        });
        assert_eq!(exit_code(&denied), 4);

        let not_dir = ProjectDumpError::Walk(WalkError::NotADirectory {
            path: PathBuf::from("x"),
        });
        assert_eq!(exit_code(&not_dir), 2);

        let io = ProjectDumpError::Io(std::io::Error::other("boom"));
        assert_eq!(exit_code(&io), 1);
    }
}
