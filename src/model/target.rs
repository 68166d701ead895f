//! Classified input paths and the single-vs-batch shape that flows through the pipeline.

use std::path::{Path, PathBuf};

/// A validated input path.
///
/// Produced once per run by [`crate::input::validate::classify`]; every later
/// stage branches on it instead of re-inspecting the file system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputTarget {
    /// A single `.eml` file.
    SingleFile(PathBuf),
    /// A directory holding at least one `.eml` entry.
    Directory(PathBuf),
}

impl InputTarget {
    /// The path this target was classified from.
    pub fn path(&self) -> &Path {
        match self {
            Self::SingleFile(p) | Self::Directory(p) => p,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }
}

/// One item or an ordered batch of items.
///
/// The loader, parser and aggregator all preserve this shape: a single file
/// stays `Single` end to end, a directory stays `Batch` in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSet<T> {
    Single(T),
    Batch(Vec<T>),
}

impl<T> MessageSet<T> {
    /// View the items as a slice, in order.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::Single(item) => std::slice::from_ref(item),
            Self::Batch(items) => items,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Apply a fallible conversion to every item, keeping shape and order.
    ///
    /// Stops at the first error.
    pub fn try_map<U, E>(
        self,
        mut f: impl FnMut(T) -> Result<U, E>,
    ) -> Result<MessageSet<U>, E> {
        match self {
            Self::Single(item) => Ok(MessageSet::Single(f(item)?)),
            Self::Batch(items) => items
                .into_iter()
                .map(f)
                .collect::<Result<Vec<_>, E>>()
                .map(MessageSet::Batch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_behaves_like_one_element_slice() {
        let set = MessageSet::Single(7);
        assert_eq!(set.len(), 1);
        assert_eq!(set.as_slice(), &[7]);
    }

    #[test]
    fn test_try_map_preserves_shape_and_order() {
        let set = MessageSet::Batch(vec![1, 2, 3]);
        let mapped: Result<MessageSet<String>, ()> = set.try_map(|n| Ok(format!("n{n}")));
        assert_eq!(
            mapped.unwrap(),
            MessageSet::Batch(vec!["n1".into(), "n2".into(), "n3".into()])
        );

        let single: Result<MessageSet<u8>, ()> = MessageSet::Single(4).try_map(|n| Ok(n * 2));
        assert_eq!(single.unwrap(), MessageSet::Single(8));
    }

    #[test]
    fn test_try_map_stops_at_first_error() {
        let mut seen = Vec::new();
        let result: Result<MessageSet<i32>, String> =
            MessageSet::Batch(vec![1, 2, 3]).try_map(|n| {
                seen.push(n);
                if n == 2 {
                    Err(format!("bad {n}"))
                } else {
                    Ok(n)
                }
            });
        assert_eq!(result.unwrap_err(), "bad 2");
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_target_path() {
        let target = InputTarget::Directory(PathBuf::from("/mail"));
        assert!(target.is_directory());
        assert_eq!(target.path(), Path::new("/mail"));
    }
}
