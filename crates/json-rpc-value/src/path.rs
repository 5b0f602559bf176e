//! Location of a node inside the input being decoded.
//!
//! Paths render as JSON Pointers (RFC 6901): the root is the empty string,
//! every step is prefixed with `/`, and `~` / `/` inside keys are escaped as
//! `~0` / `~1`.

use std::fmt;

/// A single step from a container to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Field of a keyed container.
    Key(String),
    /// Element of a sequential container.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(&escape_component(key)),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Sequence of steps from the root of the input to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DecodePath(Vec<PathSegment>);

impl DecodePath {
    /// The root path.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl From<Vec<PathSegment>> for DecodePath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for DecodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // `~` first, otherwise the `~` introduced by `~1` would be escaped again.
    component.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_renders_empty() {
        assert_eq!(DecodePath::root().to_string(), "");
        assert!(DecodePath::root().is_root());
    }

    #[test]
    fn nested_path_renders_as_pointer() {
        let path = DecodePath::from(vec![
            PathSegment::Key("a".into()),
            PathSegment::Index(3),
            PathSegment::Key("b".into()),
        ]);
        assert_eq!(path.to_string(), "/a/3/b");
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn keys_are_escaped() {
        let path = DecodePath::from(vec![
            PathSegment::Key("a/b".into()),
            PathSegment::Key("c~d".into()),
            PathSegment::Key("~/".into()),
        ]);
        assert_eq!(path.to_string(), "/a~1b/c~0d/~0~1");
    }

    #[test]
    fn push_and_pop() {
        let mut path = DecodePath::root();
        path.push(PathSegment::Index(0));
        path.push(PathSegment::Key(String::new()));
        assert_eq!(path.to_string(), "/0/");
        path.pop();
        path.pop();
        assert!(path.is_root());
    }
}
