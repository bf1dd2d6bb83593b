//! Lexical path helpers.
//!
//! The report records its own output path relative to the working directory
//! so that a report produced on one machine can be verified on another with
//! a different root. These helpers never touch the filesystem.

use std::path::{Component, Path, PathBuf};

/// Collapse `.` and `..` components without resolving symlinks.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Make `path` absolute against `cwd` and normalize it.
pub fn absolute(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&cwd.join(path))
    }
}

/// Express `path` relative to `base`.
///
/// Both paths are made absolute against `base` first. When they share no
/// root (different Windows drives) the absolute path is returned unchanged.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use python_info::paths::relative_to;
///
/// let rel = relative_to(Path::new("/work/repo/out/info.txt"), Path::new("/work/repo"));
/// assert_eq!(rel, Path::new("out/info.txt"));
///
/// let up = relative_to(Path::new("/work/other.txt"), Path::new("/work/repo"));
/// assert_eq!(up, Path::new("../other.txt"));
/// ```
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let base = normalize(base);
    let path = absolute(path, &base);

    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    if path_parts.first() != base_parts.first() {
        return path;
    }

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        relative
    }
}

/// Render `path` relative to `cwd` as a display string.
pub fn display_relative(path: &Path, cwd: &Path) -> String {
    relative_to(path, cwd).to_string_lossy().into_owned()
}
