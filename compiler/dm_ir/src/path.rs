//! Class paths.
//!
//! A `DreamPath` addresses a node in the object tree: `/obj/item/sword`.
//! Paths are immutable; every structural operation returns a new path.
//!
//! # Kinds
//! - Absolute paths start with `/` and are the only valid key into the
//!   object tree. `/` alone is the root.
//! - Relative paths (`item/sword`) appear inside declarations and are
//!   resolved against an enclosing path by the compiler.

use std::fmt;

use smallvec::SmallVec;

/// Whether a path is rooted.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PathKind {
    /// Rooted at `/`.
    Absolute,
    /// Interpreted relative to an enclosing path.
    Relative,
}

/// Slash-delimited class path.
///
/// Equality and hashing are structural: two paths are equal when their
/// kinds and elements are equal.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct DreamPath {
    kind: PathKind,
    elements: SmallVec<[String; 4]>,
}

impl DreamPath {
    /// Parse a path from source text.
    ///
    /// A leading `/` makes the path absolute. Empty segments are skipped,
    /// so `/obj//item/` is the same path as `/obj/item`.
    pub fn new(text: &str) -> Self {
        let kind = if text.starts_with('/') {
            PathKind::Absolute
        } else {
            PathKind::Relative
        };
        DreamPath {
            kind,
            elements: text
                .split('/')
                .filter(|element| !element.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Build a path from already split elements.
    pub fn from_parts<I, S>(kind: PathKind, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DreamPath {
            kind,
            elements: elements.into_iter().map(Into::into).collect(),
        }
    }

    /// The root path `/`.
    pub fn root() -> Self {
        DreamPath {
            kind: PathKind::Absolute,
            elements: SmallVec::new(),
        }
    }

    /// The built-in list type `/list`.
    pub fn list() -> Self {
        DreamPath::new("/list")
    }

    #[inline]
    pub fn kind(&self) -> PathKind {
        self.kind
    }

    #[inline]
    pub fn is_absolute(&self) -> bool {
        self.kind == PathKind::Absolute
    }

    /// Returns true for `/`.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.is_absolute() && self.elements.is_empty()
    }

    #[inline]
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn last_element(&self) -> Option<&str> {
        self.elements.last().map(String::as_str)
    }

    /// Index of the first element equal to `name`.
    pub fn find_element(&self, name: &str) -> Option<usize> {
        self.elements.iter().position(|element| element == name)
    }

    /// Copy of this path without the element at `index`.
    ///
    /// An out-of-range index leaves the path unchanged.
    pub fn remove_element(&self, index: usize) -> Self {
        let mut path = self.clone();
        if index < path.elements.len() {
            path.elements.remove(index);
        }
        path
    }

    /// Elements `start..end` as a new path.
    ///
    /// Bounds are clamped to the path length. The kind is kept only when the
    /// slice starts at the first element; any other slice is relative.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.elements.len());
        let start = start.min(end);
        DreamPath {
            kind: if start == 0 {
                self.kind
            } else {
                PathKind::Relative
            },
            elements: self.elements[start..end].iter().cloned().collect(),
        }
    }

    /// Like `slice`, but a negative `end` counts from the end: `-1` runs
    /// through the last element, `-2` stops before it.
    pub fn from_elements(&self, start: usize, end: isize) -> Self {
        let len = self.elements.len();
        let end = match usize::try_from(end) {
            Ok(end) => end,
            Err(_) => len.saturating_sub(end.unsigned_abs() - 1),
        };
        self.slice(start, end)
    }

    /// Append `path` to this path.
    ///
    /// `path` may hold several elements. `.` is ignored, `..` drops the last
    /// element, and a leading `/` restarts from the root.
    pub fn add_to_path(&self, path: &str) -> Self {
        let mut result = if path.starts_with('/') {
            DreamPath::root()
        } else {
            self.clone()
        };
        for element in path.split('/').filter(|element| !element.is_empty()) {
            match element {
                "." => {}
                ".." => {
                    result.elements.pop();
                }
                _ => result.elements.push(element.to_owned()),
            }
        }
        result
    }

    /// The enclosing path, or `None` for the root and empty relative paths.
    pub fn parent(&self) -> Option<Self> {
        if self.elements.is_empty() {
            return None;
        }
        Some(self.slice(0, self.elements.len() - 1))
    }

    /// Returns true if `self` lies at or below `ancestor` by path.
    ///
    /// This is path topology only. Inheritance may differ when a type
    /// declares an explicit parent.
    pub fn is_descendant_of(&self, ancestor: &DreamPath) -> bool {
        self.kind == ancestor.kind
            && self.elements.len() >= ancestor.elements.len()
            && self.elements[..ancestor.elements.len()] == ancestor.elements[..]
    }
}

impl From<&str> for DreamPath {
    fn from(text: &str) -> Self {
        DreamPath::new(text)
    }
}

impl fmt::Display for DreamPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == PathKind::Absolute {
            f.write_str("/")?;
        }
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            f.write_str(element)?;
        }
        Ok(())
    }
}

impl fmt::Debug for DreamPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DreamPath({self})")
    }
}
