//! Error helper functions for creating actionable error messages

use std::io;
use std::path::Path;

/// Check if an IO error is a permission denied error
pub fn is_permission_denied(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::PermissionDenied
}

/// Check if an IO error is a "not found" error
pub fn is_not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}

/// Create an enhanced error message for file permission issues
pub fn permission_error(path: &Path, operation: &str) -> String {
    format!(
        "Permission denied when {} '{}'\n\n\
         Possible fixes:\n\
         1. Check file permissions: ls -l '{}'\n\
         2. Grant read access with: chmod u+r '{}'\n\
         3. Pipe the file through stdin instead: cat '{}' | dynstr ...",
        operation,
        path.display(),
        path.display(),
        path.display(),
        path.display()
    )
}

/// Create an enhanced error message for file not found issues
pub fn not_found_error(path: &Path, context: &str) -> String {
    format!(
        "File not found: '{}'\n\n\
         Context: {}\n\n\
         Possible fixes:\n\
         1. Check the file path is correct\n\
         2. Use an absolute path if the relative path is ambiguous\n\
         3. Omit --input to read from stdin",
        path.display(),
        context
    )
}

/// Pick the most helpful message for a failure to open an input file
pub fn open_input_error(path: &Path, underlying_err: &io::Error) -> String {
    if is_permission_denied(underlying_err) {
        permission_error(path, "opening input")
    } else if is_not_found(underlying_err) {
        not_found_error(path, "opening input file given with --input")
    } else {
        format!(
            "Failed to open input: '{}'\n\n\
             Underlying error: {}",
            path.display(),
            underlying_err
        )
    }
}

/// Create an enhanced error message for directory creation failures
pub fn dir_create_error(path: &Path, underlying_err: &io::Error) -> String {
    let base = format!("Failed to create directory: '{}'", path.display());
    let parent = path
        .parent()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ".".to_string());

    if is_permission_denied(underlying_err) {
        format!(
            "{}\n\n\
             Cause: Permission denied\n\n\
             Possible fixes:\n\
             1. Check write permissions on the parent directory: ls -ld '{}'\n\
             2. Try creating it manually: mkdir -p '{}'",
            base,
            parent,
            path.display()
        )
    } else if is_not_found(underlying_err) {
        format!(
            "{}\n\n\
             Cause: Parent directory does not exist\n\n\
             Possible fixes:\n\
             1. Create the parent directory first: mkdir -p '{}'\n\
             2. Check that $HOME points at an existing directory",
            base, parent
        )
    } else {
        format!(
            "{}\n\n\
             Underlying error: {}",
            base, underlying_err
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn test_is_permission_denied() {
        let perm_err = io::Error::new(ErrorKind::PermissionDenied, "access denied");
        assert!(is_permission_denied(&perm_err));

        let not_found_err = io::Error::new(ErrorKind::NotFound, "not found");
        assert!(!is_permission_denied(&not_found_err));
    }

    #[test]
    fn test_is_not_found() {
        let not_found_err = io::Error::new(ErrorKind::NotFound, "not found");
        assert!(is_not_found(&not_found_err));

        let perm_err = io::Error::new(ErrorKind::PermissionDenied, "access denied");
        assert!(!is_not_found(&perm_err));
    }

    #[test]
    fn test_open_input_error_dispatch() {
        let path = Path::new("/tmp/lines.txt");

        let msg = open_input_error(path, &io::Error::new(ErrorKind::NotFound, "gone"));
        assert!(msg.contains("File not found"));
        assert!(msg.contains("--input"));

        let msg = open_input_error(path, &io::Error::new(ErrorKind::PermissionDenied, "no"));
        assert!(msg.contains("Permission denied"));
        assert!(msg.contains("opening input"));

        let msg = open_input_error(path, &io::Error::other("disk on fire"));
        assert!(msg.contains("disk on fire"));
    }

    #[test]
    fn test_dir_create_error_formatting() {
        let path = Path::new("/home/user/.dynstr");
        let msg = dir_create_error(path, &io::Error::new(ErrorKind::PermissionDenied, "no"));
        assert!(msg.contains("Failed to create directory"));
        assert!(msg.contains("Permission denied"));
        assert!(msg.contains("/home/user"));

        let msg = dir_create_error(path, &io::Error::new(ErrorKind::NotFound, "missing"));
        assert!(msg.contains("Parent directory does not exist"));
    }
}
