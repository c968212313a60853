//! Sorts a segmented "big array" through its index capability, across segment boundaries.
//!
//! The engines never resolve a logical index themselves; the resolution into a
//! `(segment, displacement)` location happens entirely inside the store's capability.

use core::cmp::Ordering;
use index_sort::{IndexOps, SEGMENT_SIZE, SegmentLayout, check_range, sort_merge, sort_quick};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Array-of-arrays store addressed through a [`SegmentLayout`].
struct SegmentedStore {
	layout: SegmentLayout,
	segments: Vec<Box<[u64]>>,
	len: u64,
}

impl SegmentedStore {
	fn random(layout: SegmentLayout, len: u64, seed: u64) -> Self {
		let mut rng = StdRng::seed_from_u64(seed);
		let size = layout.size();
		let mut segments = Vec::new();
		let mut remaining = len;
		while remaining > 0 {
			let segment_len = remaining.min(size) as usize;
			segments.push((0..segment_len).map(|_| rng.random::<u64>()).collect());
			remaining -= segment_len as u64;
		}
		Self {
			layout,
			segments,
			len,
		}
	}

	fn get(&self, index: u64) -> u64 {
		self.segments[self.layout.segment(index) as usize]
			[self.layout.displacement(index) as usize]
	}

	fn set(&mut self, index: u64, value: u64) {
		self.segments[self.layout.segment(index) as usize]
			[self.layout.displacement(index) as usize] = value;
	}
}

impl IndexOps<u64> for SegmentedStore {
	fn compare(&mut self, a: u64, b: u64) -> Ordering {
		self.get(a).cmp(&self.get(b))
	}
	fn swap(&mut self, a: u64, b: u64) {
		let value = self.get(a);
		self.set(a, self.get(b));
		self.set(b, value);
	}
}

fn assert_sorted(store: &SegmentedStore) {
	for i in 1..store.len {
		assert!(store.get(i - 1) <= store.get(i), "discontinuity at index {i}");
	}
}

#[test]
fn quick_sorts_across_the_segment_boundary() {
	// Two full segments plus a stub, crossing the boundary index S - 1 -> S at a cheap size.
	let layout = SegmentLayout::new(10);
	let len = 2 * layout.size() + 5;
	let mut store = SegmentedStore::random(layout, len, 42);
	check_range(len, 0, len).unwrap();
	sort_quick(0, len, &mut store);
	assert_sorted(&store);
}

#[test]
fn merge_sorts_across_the_segment_boundary() {
	let layout = SegmentLayout::new(10);
	let len = 2 * layout.size() + 5;
	let mut store = SegmentedStore::random(layout, len, 4711);
	sort_merge(0, len, &mut store);
	assert_sorted(&store);
}

#[test]
#[ignore = "allocates a full 2^27-element segment"]
fn quick_sorts_a_full_size_big_array() {
	// 2^27 + 5 elements: exactly two segments under the default layout.
	let len = SEGMENT_SIZE + 5;
	let mut store = SegmentedStore::random(SegmentLayout::DEFAULT, len, 9);
	assert_eq!(store.segments.len(), 2);
	sort_quick(0, len, &mut store);
	assert_sorted(&store);
}
