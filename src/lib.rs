//! Allocation-free, in-place [sorting] driven entirely through index-based comparison and swap
//! capabilities, together with the segment addressing scheme for "big arrays" whose length exceeds
//! the 32-bit index domain.
//!
//! The engines never touch element values. Everything they learn about the sequence flows through
//! an [`IndexOps`] capability: a three-way [`compare`](IndexOps::compare) between two indices and a
//! [`swap`](IndexOps::swap) of two indices. This makes one generic implementation sort flat
//! slices, non-contiguous views, and segmented stores spanning more than 2^31 elements alike; the
//! caller resolves logical indices into physical locations behind the capability, optionally via
//! [`SegmentLayout`].
//!
//! # Example
//!
//! ```
//! use index_sort::sort_merge_by;
//!
//! let mut v = [2, 1, 5, 2, 1, 0, 9, 1];
//!
//! // Stable, in-place, and allocation-free.
//! sort_merge_by(&mut v, |a, b| a.cmp(b));
//!
//! assert_eq!(v, [0, 1, 1, 1, 2, 2, 5, 9]);
//! ```
//!
//! # Current Implementation
//!
//! Complexities where *n* is the length of the index range.
//!
//! | Resource | Complexity | [`sort_merge`] (stable) | [`sort_quick`] (unstable) |
//! |----------|------------|-------------------------|---------------------------|
//! | Time     | Best       | *O*(*n*)                | *O*(*n* log *n*)          |
//! | Time     | Average    | *O*(*n* (log *n*)²)     | *O*(*n* log *n*)          |
//! | Time     | Worst      | *O*(*n* (log *n*)²)     | *O*(*n*²)                 |
//! | Space    | Worst      | *O*(log *n*)            | *O*(log *n*)              |
//!
//! Both engines recurse into the shorter sub-range and iterate on the longer one, bounding stack
//! usage logarithmically. The quicksort worst case is kept improbable via pseudomedian-of-nine
//! pivot selection rather than a depth cap.
//!
//! [sorting]: https://en.wikipedia.org/wiki/Sorting_algorithm
//!
//! # Features
//!
//!   * `std` for tests and examples. Enabled by `default`.
//!   * `stacker` to grow the stack on deep recursion. Enabled by `default`.
//!   * `ndarray` for `ViewOps`, sorting non-contiguous 1-dimensional array views.

#![deny(
	missing_docs,
	rustdoc::broken_intra_doc_links,
	rustdoc::missing_crate_level_docs
)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod check;
mod insertion_sort;
mod merge_sort;
mod quick_sort;
mod segment;

pub use crate::{
	check::{RangeError, check_offset_length, check_range},
	merge_sort::sort_merge,
	quick_sort::sort_quick,
	segment::{SEGMENT_MASK, SEGMENT_SHIFT, SEGMENT_SIZE, SegmentLayout},
};

use core::cmp::Ordering;

#[cfg(feature = "ndarray")]
pub use ndarray;

/// Index type an engine is instantiated at, collapsing the 32-bit and 64-bit renditions of each
/// algorithm into one generic implementation.
///
/// Implemented for [`u32`], [`u64`], and [`usize`]. The arithmetic required of an index is
/// deliberately small: ordering, addition, subtraction, and right shift, plus conversions for the
/// engines' small tuning constants.
pub trait SortIndex:
	Copy
	+ Ord
	+ core::ops::Add<Output = Self>
	+ core::ops::Sub<Output = Self>
	+ core::ops::Shr<u32, Output = Self>
{
	/// The additive identity.
	const ZERO: Self;
	/// The index increment.
	const ONE: Self;

	/// Converts `value` into this index type.
	///
	/// Only invoked with small tuning constants, all of which fit every implementing type.
	fn from_usize(value: usize) -> Self;
	/// Converts this index into a [`usize`], e.g., to address a slice.
	fn as_usize(self) -> usize;
	/// Checked addition, [`None`] on overflow.
	fn checked_add(self, rhs: Self) -> Option<Self>;
}

macro_rules! sort_index {
	($($index:ty),* $(,)?) => {$(
		impl SortIndex for $index {
			const ZERO: Self = 0;
			const ONE: Self = 1;

			#[inline]
			fn from_usize(value: usize) -> Self {
				value as Self
			}
			#[inline]
			fn as_usize(self) -> usize {
				self as usize
			}
			#[inline]
			fn checked_add(self, rhs: Self) -> Option<Self> {
				<$index>::checked_add(self, rhs)
			}
		}
	)*};
}

sort_index!(u32, u64, usize);

/// Capability pair the engines are parameterized over: a three-way comparison between two indices
/// and a swap of two indices.
///
/// The backing storage stays opaque to the engines. [`compare`](Self::compare) must be a
/// consistent total preorder for the duration of a sort, [`swap`](Self::swap) must be its own
/// inverse and must not disturb indices other than the two given. Neither is ever called with an
/// index outside the `[from, to)` range passed to the engine.
///
/// Implementations are provided for [`SliceOps`], for mutable references, and for `(compare,
/// swap)` closure pairs. The closure pair form suits capabilities that do not share mutable state,
/// e.g., storage with interior mutability:
///
/// ```
/// use core::cell::Cell;
/// use index_sort::sort_quick;
///
/// let mut v = [2, 1, 0, 4];
/// let cells = Cell::from_mut(&mut v[..]).as_slice_of_cells();
/// let mut ops = (
/// 	|a: usize, b: usize| cells[a].get().cmp(&cells[b].get()),
/// 	|a: usize, b: usize| cells[a].swap(&cells[b]),
/// );
///
/// sort_quick(0, 4, &mut ops);
///
/// assert_eq!(v, [0, 1, 2, 4]);
/// ```
pub trait IndexOps<I> {
	/// Compares the elements at indices `a` and `b`.
	fn compare(&mut self, a: I, b: I) -> Ordering;
	/// Exchanges the elements at indices `a` and `b`.
	fn swap(&mut self, a: I, b: I);
}

impl<I, T> IndexOps<I> for &mut T
where
	T: IndexOps<I> + ?Sized,
{
	#[inline]
	fn compare(&mut self, a: I, b: I) -> Ordering {
		(**self).compare(a, b)
	}
	#[inline]
	fn swap(&mut self, a: I, b: I) {
		(**self).swap(a, b)
	}
}

impl<I, C, S> IndexOps<I> for (C, S)
where
	C: FnMut(I, I) -> Ordering,
	S: FnMut(I, I),
{
	#[inline]
	fn compare(&mut self, a: I, b: I) -> Ordering {
		(self.0)(a, b)
	}
	#[inline]
	fn swap(&mut self, a: I, b: I) {
		(self.1)(a, b)
	}
}

/// Capability over a mutable slice with a comparator function.
///
/// # Examples
///
/// ```
/// use index_sort::{SliceOps, sort_quick};
///
/// let mut v = [-5, 4, 1, -3, 2];
///
/// sort_quick(0usize, 5, &mut SliceOps::new(&mut v, i32::cmp));
///
/// assert_eq!(v, [-5, -3, 1, 2, 4]);
/// ```
pub struct SliceOps<'a, T, F> {
	data: &'a mut [T],
	compare: F,
}

impl<'a, T, F> SliceOps<'a, T, F>
where
	F: FnMut(&T, &T) -> Ordering,
{
	/// Wraps `data` with the comparator function `compare`.
	pub fn new(data: &'a mut [T], compare: F) -> Self {
		Self { data, compare }
	}
}

impl<I, T, F> IndexOps<I> for SliceOps<'_, T, F>
where
	I: SortIndex,
	F: FnMut(&T, &T) -> Ordering,
{
	#[inline]
	fn compare(&mut self, a: I, b: I) -> Ordering {
		(self.compare)(&self.data[a.as_usize()], &self.data[b.as_usize()])
	}
	#[inline]
	fn swap(&mut self, a: I, b: I) {
		self.data.swap(a.as_usize(), b.as_usize());
	}
}

/// Capability over a mutable 1-dimensional [`ndarray`] view with a comparator function.
///
/// Views with arbitrary memory layout (e.g., non-contiguous columns of a row-major array) sort
/// through the same engines as everything else.
///
/// # Examples
///
/// ```
/// use index_sort::{ViewOps, ndarray::arr2, sort_merge};
///
/// let mut v = arr2(&[[-5, 4], [8, 3], [38, 0], [4, 9]]);
/// let column = v.column_mut(1);
/// let len = column.len();
///
/// sort_merge(0, len, &mut ViewOps::new(column, i32::cmp));
///
/// assert_eq!(v, arr2(&[[-5, 0], [8, 3], [38, 4], [4, 9]]));
/// ```
#[cfg(feature = "ndarray")]
pub struct ViewOps<'a, T, F> {
	data: ndarray::ArrayViewMut1<'a, T>,
	compare: F,
}

#[cfg(feature = "ndarray")]
impl<'a, T, F> ViewOps<'a, T, F>
where
	F: FnMut(&T, &T) -> Ordering,
{
	/// Wraps the view `data` with the comparator function `compare`.
	pub fn new(data: ndarray::ArrayViewMut1<'a, T>, compare: F) -> Self {
		Self { data, compare }
	}
}

#[cfg(feature = "ndarray")]
impl<I, T, F> IndexOps<I> for ViewOps<'_, T, F>
where
	I: SortIndex,
	F: FnMut(&T, &T) -> Ordering,
{
	#[inline]
	fn compare(&mut self, a: I, b: I) -> Ordering {
		(self.compare)(&self.data[a.as_usize()], &self.data[b.as_usize()])
	}
	#[inline]
	fn swap(&mut self, a: I, b: I) {
		self.data.swap(a.as_usize(), b.as_usize());
	}
}

/// Sorts `data` with a comparator function via [`sort_quick`].
///
/// This sort is unstable (i.e., may reorder equal elements), in-place (i.e., does not allocate),
/// and *O*(*n* log *n*) on average.
///
/// # Examples
///
/// ```
/// use index_sort::sort_quick_by;
///
/// let mut v = [2, 1, 0, 4];
/// sort_quick_by(&mut v, i32::cmp);
/// assert_eq!(v, [0, 1, 2, 4]);
/// ```
pub fn sort_quick_by<T, F>(data: &mut [T], compare: F)
where
	F: FnMut(&T, &T) -> Ordering,
{
	let to = data.len();
	sort_quick(0, to, &mut SliceOps::new(data, compare));
}

/// Sorts `data[from..to]` with a comparator function via [`sort_quick`].
///
/// # Panics
///
/// Panics if `(data.len(), from, to)` violates [`check_range`].
pub fn sort_quick_range_by<T, F>(data: &mut [T], from: usize, to: usize, compare: F)
where
	F: FnMut(&T, &T) -> Ordering,
{
	if let Err(range) = check_range(data.len(), from, to) {
		panic!("{range}");
	}
	sort_quick(from, to, &mut SliceOps::new(data, compare));
}

/// Sorts `data` with a comparator function via [`sort_merge`].
///
/// This sort is stable (i.e., does not reorder equal elements), in-place (i.e., does not
/// allocate), and *O*(*n* (log *n*)²) worst-case.
///
/// # Examples
///
/// ```
/// use index_sort::sort_merge_by;
///
/// let mut v = [(2, 'a'), (1, 'b'), (1, 'c')];
/// sort_merge_by(&mut v, |a, b| a.0.cmp(&b.0));
/// assert_eq!(v, [(1, 'b'), (1, 'c'), (2, 'a')]);
/// ```
pub fn sort_merge_by<T, F>(data: &mut [T], compare: F)
where
	F: FnMut(&T, &T) -> Ordering,
{
	let to = data.len();
	sort_merge(0, to, &mut SliceOps::new(data, compare));
}

/// Sorts `data[from..to]` with a comparator function via [`sort_merge`].
///
/// # Panics
///
/// Panics if `(data.len(), from, to)` violates [`check_range`].
pub fn sort_merge_range_by<T, F>(data: &mut [T], from: usize, to: usize, compare: F)
where
	F: FnMut(&T, &T) -> Ordering,
{
	if let Err(range) = check_range(data.len(), from, to) {
		panic!("{range}");
	}
	sort_merge(from, to, &mut SliceOps::new(data, compare));
}

/// Grows the stack by a mebibyte before `callback` if less than 32 KiB are left on it.
#[cfg(feature = "stacker")]
#[inline]
pub(crate) fn maybe_grow<R>(callback: impl FnOnce() -> R) -> R {
	stacker::maybe_grow(32 * 1024, 1024 * 1024, callback)
}

#[cfg(not(feature = "stacker"))]
#[inline]
pub(crate) fn maybe_grow<R>(callback: impl FnOnce() -> R) -> R {
	callback()
}
