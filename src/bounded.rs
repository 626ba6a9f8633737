//! Tagged results for searches that may stop at a cap.

use serde::Serialize;

/// Result of a capped search.
///
/// `Capped` values are partial: counts derived from them are lower bounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Bounded<T> {
    /// The search ran to completion.
    Complete(T),
    /// The search stopped at its cap before completing.
    Capped(T),
}

impl<T> Bounded<T> {
    /// Wraps `value` as complete or capped.
    #[inline]
    pub fn new(value: T, capped: bool) -> Self {
        if capped {
            Bounded::Capped(value)
        } else {
            Bounded::Complete(value)
        }
    }

    /// Returns `true` if the search ran to completion.
    #[inline]
    pub fn is_complete(&self) -> bool {
        matches!(self, Bounded::Complete(_))
    }

    /// Returns `true` if the search stopped at its cap.
    #[inline]
    pub fn is_capped(&self) -> bool {
        !self.is_complete()
    }

    /// Borrows the carried value, complete or not.
    #[inline]
    pub fn value(&self) -> &T {
        match self {
            Bounded::Complete(v) | Bounded::Capped(v) => v,
        }
    }

    /// Unwraps the carried value, complete or not.
    #[inline]
    pub fn into_value(self) -> T {
        match self {
            Bounded::Complete(v) | Bounded::Capped(v) => v,
        }
    }

    /// Returns the value only if the search completed.
    #[inline]
    pub fn exact(self) -> Option<T> {
        match self {
            Bounded::Complete(v) => Some(v),
            Bounded::Capped(_) => None,
        }
    }

    /// Maps the carried value, keeping the tag.
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Bounded<U> {
        match self {
            Bounded::Complete(v) => Bounded::Complete(f(v)),
            Bounded::Capped(v) => Bounded::Capped(f(v)),
        }
    }

    /// Borrowing variant of [`Bounded::map`].
    #[inline]
    pub fn as_ref(&self) -> Bounded<&T> {
        match self {
            Bounded::Complete(v) => Bounded::Complete(v),
            Bounded::Capped(v) => Bounded::Capped(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capped_value_is_not_exact() {
        let b = Bounded::new(5usize, true);
        assert!(b.is_capped());
        assert_eq!(*b.value(), 5);
        assert_eq!(b.exact(), None);
    }

    #[test]
    fn map_keeps_the_tag() {
        let b = Bounded::Complete(vec![1, 2, 3]).map(|v| v.len());
        assert_eq!(b, Bounded::Complete(3));
        let c = Bounded::Capped(vec![1]).map(|v| v.len());
        assert_eq!(c, Bounded::Capped(1));
    }
}
