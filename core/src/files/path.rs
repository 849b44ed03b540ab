//! Remote directory cursor as an explicit value object.
//!
//! The navigator session itself keeps no path state (the backend owns the
//! "current directory"), but the backend's cursor is first-class and
//! testable rather than a bare string.

use std::fmt;

/// Absolute remote path, stored as its components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemotePath {
    components: Vec<String>,
}

impl RemotePath {
    /// The remote root, `/`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a slash-separated absolute path. Empty and `.` segments are
    /// dropped, `..` segments resolve against the components so far.
    pub fn parse(path: &str) -> Self {
        let mut out = Self::root();
        for segment in path.split('/') {
            out.push(segment);
        }
        out
    }

    /// Descend into `name`. `..` ascends one level, `.` and empty names
    /// are no-ops.
    pub fn push(&mut self, name: &str) {
        match name {
            "" | "." => {}
            ".." => {
                self.pop();
            }
            other => self.components.push(other.to_string()),
        }
    }

    /// Ascend one level. Returns `false` when already at the root.
    pub fn pop(&mut self) -> bool {
        self.components.pop().is_some()
    }

    /// The path one level up, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.components.is_empty() {
            return None;
        }
        let mut parent = self.clone();
        parent.pop();
        Some(parent)
    }

    /// The path of `name` inside this directory.
    pub fn child(&self, name: &str) -> Self {
        let mut child = self.clone();
        child.push(name);
        child
    }

    pub fn is_root(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.components.is_empty() {
            return f.write_str("/");
        }
        for component in &self.components {
            write!(f, "/{component}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_displays_as_slash() {
        assert_eq!(RemotePath::root().to_string(), "/");
        assert!(RemotePath::root().is_root());
    }

    #[test]
    fn parse_and_display_round_trip() {
        let path = RemotePath::parse("/home/user/docs");
        assert_eq!(path.to_string(), "/home/user/docs");
        assert!(!path.is_root());
    }

    #[test]
    fn parse_collapses_dot_and_empty_segments() {
        let path = RemotePath::parse("/home//./user/");
        assert_eq!(path.to_string(), "/home/user");
    }

    #[test]
    fn push_dotdot_ascends() {
        let mut path = RemotePath::parse("/home/user");
        path.push("..");
        assert_eq!(path.to_string(), "/home");
    }

    #[test]
    fn pop_at_root_is_noop() {
        let mut path = RemotePath::root();
        assert!(!path.pop());
        assert_eq!(path.to_string(), "/");
    }

    #[test]
    fn child_and_parent() {
        let path = RemotePath::parse("/home");
        let child = path.child("docs");
        assert_eq!(child.to_string(), "/home/docs");
        assert_eq!(child.parent(), Some(path));
        assert_eq!(RemotePath::root().parent(), None);
    }
}
