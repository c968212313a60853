//! Shared base case of the [`quick_sort`](crate::quick_sort) and [`merge_sort`](crate::merge_sort)
//! engines.

use crate::{IndexOps, SortIndex};
use core::cmp::Ordering::Greater;

/// Sorts `[from, to)` using insertion sort with adjacent exchanges, which is *O*(*n*²) worst-case.
///
/// The strict `Greater` condition on the adjacent comparison leaves equal elements untouched,
/// which is what lets [`sort_merge`](crate::sort_merge) stay stable on top of this base case.
pub fn insertion_sort<I, O>(from: I, to: I, ops: &mut O)
where
	I: SortIndex,
	O: IndexOps<I>,
{
	if from == to {
		return;
	}
	let mut i = from + I::ONE;
	while i < to {
		let mut j = i;
		while j > from && ops.compare(j - I::ONE, j) == Greater {
			ops.swap(j - I::ONE, j);
			j = j - I::ONE;
		}
		i = i + I::ONE;
	}
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::insertion_sort;
	use crate::SliceOps;
	use quickcheck_macros::quickcheck;

	#[quickcheck]
	fn sorted(xs: Vec<u32>) {
		let mut xs = xs;
		let to = xs.len();
		insertion_sort(0, to, &mut SliceOps::new(&mut xs, u32::cmp));
		for i in 1..xs.len() {
			assert!(xs[i - 1] <= xs[i]);
		}
	}

	#[quickcheck]
	fn sorted_at_u64_width(xs: Vec<u32>) {
		let mut xs = xs;
		let to = xs.len() as u64;
		insertion_sort(0u64, to, &mut SliceOps::new(&mut xs, u32::cmp));
		for i in 1..xs.len() {
			assert!(xs[i - 1] <= xs[i]);
		}
	}

	#[test]
	fn empty_and_singleton_call_no_capability() {
		let mut ops = (
			|_: usize, _: usize| -> core::cmp::Ordering { panic!("compare") },
			|_: usize, _: usize| panic!("swap"),
		);
		insertion_sort(0, 0, &mut ops);
		insertion_sort(5, 6, &mut ops);
	}
}
