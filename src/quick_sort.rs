//! Unstable engine: a tuned quicksort over an opaque index range.

use crate::{IndexOps, SortIndex, insertion_sort::insertion_sort, maybe_grow};
use core::cmp::Ordering::{Equal, Greater, Less};

/// Sorts `[from, to)` using quicksort, which is *O*(*n* log *n*) on average.
///
/// This sort is unstable (i.e., may reorder equal elements) and in-place: the only accesses to
/// the sequence are through the [`compare`](IndexOps::compare) and [`swap`](IndexOps::swap)
/// capabilities of `ops`. Adversarial inputs are degraded gracefully via pseudomedian-of-nine
/// pivot selection rather than a recursion depth cap, and equal elements collapse into the
/// pivot's partition zone without being re-compared pairwise.
///
/// The range is trusted, not re-validated: callers are expected to have upheld
/// [`check_range`](crate::check_range) beforehand, as the engine would otherwise drive the
/// capabilities with indices outside the sequence. Ranges of length zero or one are no-ops.
///
/// # Examples
///
/// ```
/// use index_sort::{SliceOps, sort_quick};
///
/// let mut v = [2, 1, 0, 4];
///
/// sort_quick(0usize, 4, &mut SliceOps::new(&mut v, i32::cmp));
///
/// assert_eq!(v, [0, 1, 2, 4]);
/// ```
pub fn sort_quick<I, O>(mut from: I, mut to: I, ops: &mut O)
where
	I: SortIndex,
	O: IndexOps<I>,
{
	// Ranges of up to this length get sorted using insertion sort.
	const MAX_INSERTION: usize = 7;
	// Ranges longer than this pick the pivot as a pseudomedian of nine sampled positions
	// instead of a median of three, resisting presorted and organ-pipe patterns.
	const PSEUDOMEDIAN_OF_9: usize = 40;

	loop {
		let len = to - from;

		// Very short ranges get sorted using insertion sort, which also is the no-op exit for
		// empty and singleton ranges.
		if len < I::from_usize(MAX_INSERTION) {
			insertion_sort(from, to, ops);
			return;
		}

		// Choose a pivot index: the middle refined by a median of three for mid-sized ranges,
		// medians of three sampled eighths for large ones.
		let mut lo = from;
		let mut mid = from + (len >> 1);
		let mut hi = to - I::ONE;
		if len > I::from_usize(PSEUDOMEDIAN_OF_9) {
			let s = len >> 3;
			lo = median3(ops, lo, lo + s, lo + s + s);
			mid = median3(ops, mid - s, mid, mid + s);
			hi = median3(ops, hi - s - s, hi - s, hi);
		}
		let mut m = median3(ops, lo, mid, hi);

		// Single-pass four-way partition into `[from, a)` equal, `[a, b)` less, `[b, c)`
		// unexamined, `[c, d)` greater, and `[d, to)` equal, with `b` scanning forward and `c`
		// scanning backward (both exclusive on the backward side).
		//
		// The pivot is known only by its index `m`: there is no way to cache its value since
		// elements are observable solely through `compare`. Every exchange that touches the
		// slot currently holding the pivot therefore re-points `m` before the next comparison
		// against it. Omitting this silently corrupts the partition.
		let mut a = from;
		let mut b = from;
		let mut c = to;
		let mut d = to;
		loop {
			while b < c {
				match ops.compare(b, m) {
					Greater => break,
					Equal => {
						// moving target
						if m == a {
							m = b;
						} else if m == b {
							m = a;
						}
						ops.swap(a, b);
						a = a + I::ONE;
						b = b + I::ONE;
					}
					Less => b = b + I::ONE,
				}
			}
			while c > b {
				match ops.compare(c - I::ONE, m) {
					Less => break,
					Equal => {
						let last = d - I::ONE;
						// moving target
						if m == c - I::ONE {
							m = last;
						} else if m == last {
							m = c - I::ONE;
						}
						ops.swap(c - I::ONE, last);
						d = last;
						c = c - I::ONE;
					}
					Greater => c = c - I::ONE,
				}
			}
			if b == c {
				break;
			}
			// The pivot slot is at neither scan position: its comparison would have been
			// `Equal` and consumed by the scans above.
			c = c - I::ONE;
			ops.swap(b, c);
			b = b + I::ONE;
		}

		// Rotate the two equal zones into their final middle position.
		let s = (a - from).min(b - a);
		vec_swap(ops, from, b - s, s);
		let s = (d - b).min(to - d);
		vec_swap(ops, b, to - s, s);

		// Recurse into the shorter of the strictly-less and strictly-greater sub-ranges and
		// iterate on the longer one, bounding the recursion depth logarithmically. Sub-ranges
		// of length one or less are already sorted.
		let lt = b - a;
		let gt = d - b;
		if lt < gt {
			if lt > I::ONE {
				recurse(from, from + lt, ops);
			}
			if gt <= I::ONE {
				return;
			}
			from = to - gt;
		} else {
			if gt > I::ONE {
				recurse(to - gt, to, ops);
			}
			if lt <= I::ONE {
				return;
			}
			to = from + lt;
		}
	}
}

fn recurse<I, O>(from: I, to: I, ops: &mut O)
where
	I: SortIndex,
	O: IndexOps<I>,
{
	maybe_grow(|| sort_quick(from, to, ops))
}

/// Returns the index of the median of the elements at `a`, `b`, and `c`.
fn median3<I, O>(ops: &mut O, a: I, b: I, c: I) -> I
where
	I: SortIndex,
	O: IndexOps<I>,
{
	let ab = ops.compare(a, b);
	let ac = ops.compare(a, c);
	let bc = ops.compare(b, c);
	if ab == Less {
		if bc == Less {
			b
		} else if ac == Less {
			c
		} else {
			a
		}
	} else if bc == Greater {
		b
	} else if ac == Greater {
		c
	} else {
		a
	}
}

/// Exchanges `[a, a + n)` with `[b, b + n)` element by element.
fn vec_swap<I, O>(ops: &mut O, mut a: I, mut b: I, n: I)
where
	I: SortIndex,
	O: IndexOps<I>,
{
	let mut i = I::ZERO;
	while i < n {
		ops.swap(a, b);
		a = a + I::ONE;
		b = b + I::ONE;
		i = i + I::ONE;
	}
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::sort_quick;
	use crate::SliceOps;
	use quickcheck_macros::quickcheck;

	fn assert_sorts(mut xs: Vec<u32>) {
		let mut sorted = xs.clone();
		sorted.sort_unstable();
		let to = xs.len();
		sort_quick(0, to, &mut SliceOps::new(&mut xs, u32::cmp));
		// Equality against the sorted copy also checks the multiset of elements survived.
		assert_eq!(xs, sorted);
	}

	#[quickcheck]
	fn sorted(xs: Vec<u32>) {
		assert_sorts(xs);
	}

	#[quickcheck]
	fn sorted_with_many_duplicates(xs: Vec<u32>) {
		assert_sorts(xs.into_iter().map(|x| x % 8).collect());
	}

	#[quickcheck]
	fn sorted_at_u64_width(xs: Vec<u32>) {
		let mut sorted = xs.clone();
		sorted.sort_unstable();
		let mut xs = xs;
		let to = xs.len() as u64;
		sort_quick(0u64, to, &mut SliceOps::new(&mut xs, u32::cmp));
		assert_eq!(xs, sorted);
	}

	#[test]
	fn sorted_on_pivot_defeating_patterns() {
		assert_sorts((0..500).collect());
		assert_sorts((0..500).rev().collect());
		assert_sorts((0..250).chain((0..250).rev()).collect());
		assert_sorts([3; 500].to_vec());
		assert_sorts((0..500).map(|x| x % 4).collect());
	}

	#[test]
	fn reordered() {
		let mut v = [2, 1, 0, 4];
		sort_quick(0usize, 4, &mut SliceOps::new(&mut v, i32::cmp));
		assert_eq!(v, [0, 1, 2, 4]);
	}

	#[test]
	fn empty_and_singleton_call_no_capability() {
		let mut ops = (
			|_: usize, _: usize| -> core::cmp::Ordering { panic!("compare") },
			|_: usize, _: usize| panic!("swap"),
		);
		sort_quick(0, 0, &mut ops);
		sort_quick(7, 8, &mut ops);
	}

	#[test]
	fn reverse_ordering_comparator() {
		let mut v = vec![1, 5, 3, 2, 4, 2];
		sort_quick(0usize, 6, &mut SliceOps::new(&mut v, |a: &i32, b: &i32| b.cmp(a)));
		assert_eq!(v, [5, 4, 3, 2, 2, 1]);
	}
}
