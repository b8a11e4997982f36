//! Lazy traversal of multi-page collection resources.
//!
//! A [`PageEnumerator`] presents every page of a collection (`/products`, `/categories`,
//! ...) as one sequence of items. Pages are fetched strictly on demand and in ascending
//! order: page 1, then the middle pages `2..N-1`, then the last page `N`. The first and last
//! pages are memoized per enumerator; middle pages are refetched on every traversal.

pub mod enumerator;
pub mod items;

pub use enumerator::*;
pub use items::*;
