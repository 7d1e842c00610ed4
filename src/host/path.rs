use std::path::{Component, Path, PathBuf};

/// Whether `path` names a full path rather than one relative to a directory.
///
/// A leading slash or backslash counts on every platform, as does a drive
/// letter followed by a separator.
pub fn is_full_path(path: &str) -> bool {
    let bytes = path.as_bytes();
    match bytes {
        [b'/' | b'\\', ..] => true,
        [drive, b':', b'/' | b'\\', ..] => drive.is_ascii_alphabetic(),
        _ => false,
    }
}

/// Join `path` onto `base` (unless already full) and remove `.` and `..`
/// components lexically. Symbolic links are not resolved.
pub fn collapse_full_path(path: &str, base: &Path) -> PathBuf {
    let joined = if is_full_path(path) {
        PathBuf::from(path)
    } else {
        base.join(path)
    };

    let mut collapsed = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // ".." at the root stays at the root
                let at_root = matches!(
                    collapsed.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                );
                if !at_root {
                    collapsed.pop();
                }
            }
            other => collapsed.push(other.as_os_str()),
        }
    }
    collapsed
}
