//! Hidden-entry detection.
//!
//! Unix-like systems mark hidden entries by naming convention, Windows by a
//! filesystem attribute. Both policies implement [`HiddenPredicate`] and the
//! walker picks one at startup through [`for_current_platform`].

use std::fs::Metadata;
use std::io;
use std::path::{Component, Path};

/// `FILE_ATTRIBUTE_HIDDEN` from the Win32 API.
pub const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

/// Decides whether a file or directory should be treated as hidden.
pub trait HiddenPredicate: Send + Sync {
    fn is_hidden(&self, path: &Path, metadata: &Metadata) -> io::Result<bool>;

    /// A short label used in log output.
    fn name(&self) -> &'static str;
}

/// Hidden iff the base name starts with `.`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DotPrefix;

/// Hidden iff the filesystem's hidden attribute is set.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeAttribute;

impl HiddenPredicate for DotPrefix {
    fn is_hidden(&self, path: &Path, _metadata: &Metadata) -> io::Result<bool> {
        if is_self_or_parent(path) {
            return Ok(false);
        }
        Ok(path
            .file_name()
            .is_some_and(|name| name.as_encoded_bytes().first() == Some(&b'.')))
    }

    fn name(&self) -> &'static str {
        "dot-prefix"
    }
}

impl HiddenPredicate for NativeAttribute {
    fn is_hidden(&self, path: &Path, metadata: &Metadata) -> io::Result<bool> {
        if is_self_or_parent(path) {
            return Ok(false);
        }
        Ok(file_attributes(metadata)? & FILE_ATTRIBUTE_HIDDEN != 0)
    }

    fn name(&self) -> &'static str {
        "native-attribute"
    }
}

/// Selects the policy for the platform the binary is running on.
pub fn for_current_platform() -> Box<dyn HiddenPredicate> {
    for_family(std::env::consts::FAMILY)
}

/// Selects the policy for an OS family as reported by `std::env::consts::FAMILY`.
pub fn for_family(family: &str) -> Box<dyn HiddenPredicate> {
    match family {
        "windows" => Box::new(NativeAttribute),
        _ => Box::new(DotPrefix),
    }
}

fn is_self_or_parent(path: &Path) -> bool {
    matches!(
        path.components().next_back(),
        Some(Component::CurDir | Component::ParentDir)
    )
}

#[cfg(windows)]
fn file_attributes(metadata: &Metadata) -> io::Result<u32> {
    use std::os::windows::fs::MetadataExt;
    Ok(metadata.file_attributes())
}

#[cfg(not(windows))]
fn file_attributes(_metadata: &Metadata) -> io::Result<u32> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "file attributes are not available on this platform",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn metadata_of(path: &Path) -> Metadata {
        fs::symlink_metadata(path).unwrap()
    }

    #[test]
    fn test_dot_prefix_policy() {
        let dir = TempDir::new().unwrap();
        let visible = dir.path().join("visible.txt");
        let hidden = dir.path().join(".hidden");
        fs::write(&visible, "x").unwrap();
        fs::create_dir(&hidden).unwrap();

        assert!(!DotPrefix.is_hidden(&visible, &metadata_of(&visible)).unwrap());
        assert!(DotPrefix.is_hidden(&hidden, &metadata_of(&hidden)).unwrap());
    }

    #[test]
    fn test_self_and_parent_markers_are_never_hidden() {
        let dir = TempDir::new().unwrap();
        let meta = metadata_of(dir.path());

        assert!(!DotPrefix.is_hidden(Path::new("."), &meta).unwrap());
        assert!(!DotPrefix.is_hidden(Path::new(".."), &meta).unwrap());
        assert!(!DotPrefix.is_hidden(&dir.path().join(".."), &meta).unwrap());
        assert!(!NativeAttribute.is_hidden(Path::new(".."), &meta).unwrap());
    }

    #[test]
    fn test_for_family_selects_policy() {
        assert_eq!(for_family("unix").name(), "dot-prefix");
        assert_eq!(for_family("windows").name(), "native-attribute");
        assert_eq!(for_family("wasm").name(), "dot-prefix");
    }

    #[cfg(unix)]
    #[test]
    fn test_native_attribute_is_unsupported_on_unix() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.txt");
        fs::write(&path, "x").unwrap();

        let err = NativeAttribute
            .is_hidden(&path, &metadata_of(&path))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[cfg(unix)]
    #[test]
    fn test_current_platform_is_dot_prefix_on_unix() {
        assert_eq!(for_current_platform().name(), "dot-prefix");
    }
}
