//! Stable engine: an in-place mergesort over an opaque index range.
//!
//! Stability without a scratch buffer has an explicit price: merging happens by rotation, driven
//! by binary searches for the cut points, for *O*(*n* (log *n*)²) worst-case time instead of the
//! *O*(*n* log *n*) of a buffered merge.

use crate::{IndexOps, SortIndex, insertion_sort::insertion_sort, maybe_grow};
use core::cmp::Ordering::{Greater, Less};

/// Sorts `[from, to)` using in-place mergesort, which is *O*(*n* (log *n*)²) worst-case.
///
/// This sort is stable (i.e., does not reorder equal elements) and allocates no auxiliary
/// storage beyond the recursion stack: the only accesses to the sequence are through the
/// [`compare`](IndexOps::compare) and [`swap`](IndexOps::swap) capabilities of `ops`. Halves that
/// are already ordered end-to-end skip their merge step entirely, collapsing the cost toward
/// *O*(*n*) on nearly sorted input.
///
/// The range is trusted, not re-validated: callers are expected to have upheld
/// [`check_range`](crate::check_range) beforehand, as the engine would otherwise drive the
/// capabilities with indices outside the sequence. Ranges of length zero or one are no-ops.
///
/// # Examples
///
/// ```
/// use index_sort::{SliceOps, sort_merge};
///
/// // Equal keys keep their original relative order.
/// let mut v = [(2, 0), (1, 1), (5, 2), (2, 3), (1, 4), (0, 5), (9, 6), (1, 7)];
///
/// sort_merge(0usize, 8, &mut SliceOps::new(&mut v, |a, b| a.0.cmp(&b.0)));
///
/// assert_eq!(v, [(0, 5), (1, 1), (1, 4), (1, 7), (2, 0), (2, 3), (5, 2), (9, 6)]);
/// ```
pub fn sort_merge<I, O>(from: I, to: I, ops: &mut O)
where
	I: SortIndex,
	O: IndexOps<I>,
{
	// Ranges of up to this length get sorted using insertion sort, whose strict adjacent
	// comparison preserves the order of equal elements.
	const MAX_INSERTION: usize = 7;

	if to - from < I::from_usize(MAX_INSERTION) {
		insertion_sort(from, to, ops);
		return;
	}

	// Recursively sort both halves.
	let mid = from + ((to - from) >> 1);
	recurse(from, mid, ops);
	recurse(mid, to, ops);

	// If the halves are already ordered end-to-end, there is nothing left to merge. This makes
	// sorting nearly sorted input approach linear time.
	if ops.compare(mid - I::ONE, mid) != Greater {
		return;
	}

	in_place_merge(from, mid, to, ops);
}

fn recurse<I, O>(from: I, to: I, ops: &mut O)
where
	I: SortIndex,
	O: IndexOps<I>,
{
	maybe_grow(|| sort_merge(from, to, ops))
}

/// Merges the sorted runs `[from, mid)` and `[mid, to)` in place.
///
/// The shorter run is cut in half and the matching cut point in the longer run is found by binary
/// search, so that the smaller amount of elements gets rotated. A three-reversal rotation brings
/// the two middle blocks into order, leaving two strictly smaller sub-merges; the smaller one is
/// recursed into, the larger one iterated on.
fn in_place_merge<I, O>(mut from: I, mut mid: I, mut to: I, ops: &mut O)
where
	I: SortIndex,
	O: IndexOps<I>,
{
	let two = I::ONE + I::ONE;
	loop {
		if from >= mid || mid >= to {
			return;
		}
		if to - from == two {
			if ops.compare(mid, from) == Less {
				ops.swap(from, mid);
			}
			return;
		}

		// Cut the longer run in the middle and search the matching cut in the shorter one. The
		// tie-breaking of both searches keeps elements of the first run ahead of equal elements
		// of the second, which is what makes the overall sort stable.
		let (first_cut, second_cut) = if mid - from > to - mid {
			let first_cut = from + ((mid - from) >> 1);
			(first_cut, lower_bound(mid, to, first_cut, ops))
		} else {
			let second_cut = mid + ((to - mid) >> 1);
			(upper_bound(from, mid, second_cut, ops), second_cut)
		};

		// Rotate `[first_cut, mid)` past `[mid, second_cut)` by three reversals.
		if mid != first_cut && mid != second_cut {
			reverse(ops, first_cut, mid);
			reverse(ops, mid, second_cut);
			reverse(ops, first_cut, second_cut);
		}

		// Recurse into the smaller of the two remaining sub-merges and iterate on the larger.
		let new_mid = first_cut + (second_cut - mid);
		if new_mid - from < to - new_mid {
			merge_recurse(from, first_cut, new_mid, ops);
			from = new_mid;
			mid = second_cut;
		} else {
			merge_recurse(new_mid, second_cut, to, ops);
			to = new_mid;
			mid = first_cut;
		}
	}
}

fn merge_recurse<I, O>(from: I, mid: I, to: I, ops: &mut O)
where
	I: SortIndex,
	O: IndexOps<I>,
{
	maybe_grow(|| in_place_merge(from, mid, to, ops))
}

/// Reverses `[from, to)` by pairwise exchanges.
fn reverse<I, O>(ops: &mut O, mut from: I, mut to: I)
where
	I: SortIndex,
	O: IndexOps<I>,
{
	while from + I::ONE < to {
		to = to - I::ONE;
		ops.swap(from, to);
		from = from + I::ONE;
	}
}

/// Returns the leftmost index in the sorted run `[from, to)` whose element does not compare less
/// than the element at `target`, i.e., where the element at `target` could be inserted while
/// keeping equal elements of the run behind it.
fn lower_bound<I, O>(mut from: I, to: I, target: I, ops: &mut O) -> I
where
	I: SortIndex,
	O: IndexOps<I>,
{
	let mut len = to - from;
	while len > I::ZERO {
		let half = len >> 1;
		let mid = from + half;
		if ops.compare(mid, target) == Less {
			from = mid + I::ONE;
			len = len - half - I::ONE;
		} else {
			len = half;
		}
	}
	from
}

/// Returns the leftmost index in the sorted run `[from, to)` whose element compares greater than
/// the element at `target`, i.e., where the element at `target` could be inserted while keeping
/// equal elements of the run ahead of it.
fn upper_bound<I, O>(mut from: I, to: I, target: I, ops: &mut O) -> I
where
	I: SortIndex,
	O: IndexOps<I>,
{
	let mut len = to - from;
	while len > I::ZERO {
		let half = len >> 1;
		let mid = from + half;
		if ops.compare(target, mid) == Less {
			len = half;
		} else {
			from = mid + I::ONE;
			len = len - half - I::ONE;
		}
	}
	from
}
