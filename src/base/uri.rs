//! File identifiers.
//!
//! A [`FileUri`] is either a plain path or a `file://` URI. The path part is
//! normalized lexically (`.` and `..` segments folded, separators unified) so
//! two spellings of the same file compare equal.

use std::fmt;
use std::path::{Path, PathBuf};

use smol_str::SmolStr;

const FILE_SCHEME: &str = "file://";

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileUri(SmolStr);

impl FileUri {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref().replace('\\', "/");
        match raw.strip_prefix(FILE_SCHEME) {
            Some(path) => Self(SmolStr::new(format!("{FILE_SCHEME}{}", normalize(path)))),
            None => Self(SmolStr::new(normalize(&raw))),
        }
    }

    pub fn from_path(path: &Path) -> Self {
        Self::new(path.to_string_lossy())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn has_scheme(&self) -> bool {
        self.0.starts_with(FILE_SCHEME)
    }

    /// The path part, without any `file://` scheme.
    pub fn path(&self) -> &str {
        self.0.strip_prefix(FILE_SCHEME).unwrap_or(&self.0)
    }

    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(self.path())
    }

    /// Directory containing this file, without a trailing separator.
    pub fn directory(&self) -> &str {
        let path = self.path();
        match path.rfind('/') {
            Some(0) => "/",
            Some(idx) => &path[..idx],
            None => "",
        }
    }

    pub fn file_name(&self) -> &str {
        let path = self.path();
        path.rsplit('/').next().unwrap_or(path)
    }

    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        let dot = name.rfind('.')?;
        (dot > 0).then(|| &name[dot + 1..])
    }

    /// A URI with the same scheme as `self` but another path.
    pub fn with_path(&self, path: &str) -> FileUri {
        if self.has_scheme() {
            FileUri::new(format!("{FILE_SCHEME}{path}"))
        } else {
            FileUri::new(path)
        }
    }

    /// Resolves `relative` against the directory of this file.
    pub fn join_relative(&self, relative: &str) -> FileUri {
        let dir = self.directory();
        if dir.is_empty() {
            self.with_path(relative)
        } else {
            self.with_path(&format!("{dir}/{relative}"))
        }
    }

    /// Whether this file lies under `dir` (compared on normalized paths).
    pub fn is_under(&self, dir: &Path) -> bool {
        let dir = normalize(&dir.to_string_lossy().replace('\\', "/"));
        let dir = dir.trim_end_matches('/');
        let path = self.path();
        path.len() > dir.len() && path.starts_with(dir) && path[dir.len()..].starts_with('/')
    }

    /// Import string that addresses `target` from this file: `./x`, `../lib/x`, …
    /// The `.tact` extension is dropped.
    pub fn relative_import_path(&self, target: &FileUri) -> String {
        let from: Vec<&str> = segments(self.directory());
        let to_path = target.path();
        let to_path = to_path
            .strip_suffix(&format!(".{}", super::constants::TACT_EXT))
            .unwrap_or(to_path);
        let to: Vec<&str> = segments(to_path);

        let common = from
            .iter()
            .zip(to.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut parts: Vec<&str> = Vec::new();
        for _ in common..from.len() {
            parts.push("..");
        }
        parts.extend(&to[common..]);

        let joined = parts.join("/");
        if joined.starts_with("..") {
            joined
        } else {
            format!("./{joined}")
        }
    }
}

impl fmt::Debug for FileUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileUri({})", self.0)
    }
}

impl fmt::Display for FileUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileUri {
    fn from(value: &str) -> Self {
        FileUri::new(value)
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut out: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match out.last() {
                Some(&last) if last != ".." => {
                    out.pop();
                }
                _ if absolute => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    let joined = out.join("/");
    if absolute { format!("/{joined}") } else { joined }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_dot_segments() {
        assert_eq!(FileUri::new("/p/./src/../a.tact").as_str(), "/p/a.tact");
        assert_eq!(
            FileUri::new("file:///p//x/../a.tact").as_str(),
            "file:///p/a.tact"
        );
        assert_eq!(FileUri::new("../a.tact").as_str(), "../a.tact");
    }

    #[test]
    fn directory_and_extension() {
        let uri = FileUri::new("file:///proj/src/main.tact");
        assert_eq!(uri.directory(), "/proj/src");
        assert_eq!(uri.file_name(), "main.tact");
        assert_eq!(uri.extension(), Some("tact"));
        assert_eq!(FileUri::new("/.hidden").extension(), None);
    }

    #[test]
    fn relative_import_paths() {
        let b = FileUri::new("/p/b.tact");
        assert_eq!(b.relative_import_path(&FileUri::new("/p/a2.tact")), "./a2");
        assert_eq!(
            b.relative_import_path(&FileUri::new("/p/lib/x.tact")),
            "./lib/x"
        );
        let nested = FileUri::new("/p/sub/c.tact");
        assert_eq!(
            nested.relative_import_path(&FileUri::new("/p/a.tact")),
            "../a"
        );
    }

    #[test]
    fn join_keeps_scheme() {
        let uri = FileUri::new("file:///p/sub/c.tact");
        assert_eq!(
            uri.join_relative("../a.tact").as_str(),
            "file:///p/a.tact"
        );
    }

    #[test]
    fn under_directory() {
        let uri = FileUri::new("/std/libs/deploy.tact");
        assert!(uri.is_under(Path::new("/std")));
        assert!(uri.is_under(Path::new("/std/")));
        assert!(!uri.is_under(Path::new("/st")));
    }
}
