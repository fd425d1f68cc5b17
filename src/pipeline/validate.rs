//! Pre-flight checks for file targets: exists, is a regular file, can be opened for reading.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::{ErrorKind, ValidationOutcome};

/// Check `path` in order (existence, file type, read permission) and stop at the first failure.
/// Symlinks are followed, so a link to a regular file is valid.
pub fn validate_target(path: &Path) -> ValidationOutcome {
    match check(path) {
        Ok(()) => ValidationOutcome::Valid(path.to_path_buf()),
        Err(kind) => ValidationOutcome::Rejected(path.to_path_buf(), kind),
    }
}

fn check(path: &Path) -> Result<(), ErrorKind> {
    let meta = std::fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
        _ => ErrorKind::NotFound,
    })?;
    if !meta.is_file() {
        return Err(ErrorKind::NotRegularFile);
    }
    File::open(path).map(drop).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ErrorKind::NotFound,
        _ => ErrorKind::PermissionDenied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("nope.bin");
        assert_eq!(
            validate_target(&p),
            ValidationOutcome::Rejected(p.clone(), ErrorKind::NotFound)
        );
    }

    #[test]
    fn directory_is_not_regular() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            validate_target(dir.path()),
            ValidationOutcome::Rejected(dir.path().to_path_buf(), ErrorKind::NotRegularFile)
        );
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("locked.txt");
        std::fs::write(&p, "secret").unwrap();
        std::fs::set_permissions(&p, std::fs::Permissions::from_mode(0o000)).unwrap();
        if File::open(&p).is_ok() {
            // Running as root: mode bits are not enforced.
            return;
        }
        assert_eq!(
            validate_target(&p),
            ValidationOutcome::Rejected(p.clone(), ErrorKind::PermissionDenied)
        );
    }

    #[cfg(unix)]
    #[test]
    fn file_in_unsearchable_dir_is_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sealed");
        std::fs::create_dir(&sub).unwrap();
        let p = sub.join("a.txt");
        std::fs::write(&p, "x").unwrap();
        std::fs::set_permissions(&sub, std::fs::Permissions::from_mode(0o000)).unwrap();
        let readable_as_root = std::fs::metadata(&p).is_ok();
        let outcome = validate_target(&p);
        std::fs::set_permissions(&sub, std::fs::Permissions::from_mode(0o755)).unwrap();
        if readable_as_root {
            return;
        }
        assert_eq!(
            outcome,
            ValidationOutcome::Rejected(p.clone(), ErrorKind::PermissionDenied)
        );
    }

    #[test]
    fn readable_file_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("a.txt");
        std::fs::write(&p, "hello").unwrap();
        assert_eq!(validate_target(&p), ValidationOutcome::Valid(p.clone()));
    }
}
