//! Addressing arithmetic locating a 64-bit logical index within an array-of-arrays ("big array")
//! layout.
//!
//! A big array stores its elements in equally sized power-of-two segments, so a logical index
//! splits into a `(segment, displacement)` coordinate pair by shift and mask. The sort engines
//! never perform this resolution themselves; it lives entirely inside a caller's
//! [`IndexOps`](crate::IndexOps) capability.

/// The default number of displacement bits, making segments of [`SEGMENT_SIZE`] elements.
///
/// Chosen so that one segment of the widest supported element stays comfortably below a single
/// allocation's practical limit. Every component walking the same big array must agree on this
/// value; a store built under one shift is garbage under another.
pub const SEGMENT_SHIFT: u32 = 27;
/// The default number of elements per segment, `2^27`.
pub const SEGMENT_SIZE: u64 = 1 << SEGMENT_SHIFT;
/// The default mask extracting the displacement of an index, [`SEGMENT_SIZE`]` - 1`.
pub const SEGMENT_MASK: u64 = SEGMENT_SIZE - 1;

/// Segment addressing under an explicit shift, avoiding any process-wide ambient constant.
///
/// All arithmetic is `const` and branch-free. The round trip
/// [`index`](Self::index)`(`[`segment`](Self::segment)`(i), `[`displacement`](Self::displacement)`(i)) == i`
/// holds for every index, and every displacement is less than [`size`](Self::size).
///
/// # Examples
///
/// ```
/// use index_sort::SegmentLayout;
///
/// let layout = SegmentLayout::DEFAULT;
/// let index = (3 << 27) + 42;
///
/// assert_eq!(layout.segment(index), 3);
/// assert_eq!(layout.displacement(index), 42);
/// assert_eq!(layout.index(3, 42), index);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SegmentLayout {
	shift: u32,
}

impl SegmentLayout {
	/// The layout under [`SEGMENT_SHIFT`].
	pub const DEFAULT: Self = Self::new(SEGMENT_SHIFT);

	/// Creates a layout with segments of `2^shift` elements.
	///
	/// # Panics
	///
	/// Panics if `shift` is not within `1..=63`.
	pub const fn new(shift: u32) -> Self {
		assert!(shift >= 1 && shift <= 63, "segment shift out of 1..=63");
		Self { shift }
	}

	/// The number of displacement bits.
	pub const fn shift(self) -> u32 {
		self.shift
	}

	/// The number of elements per segment.
	pub const fn size(self) -> u64 {
		1 << self.shift
	}

	/// The mask extracting the displacement of an index.
	pub const fn mask(self) -> u64 {
		self.size() - 1
	}

	/// The segment associated with the given `index`.
	pub const fn segment(self, index: u64) -> u64 {
		index >> self.shift
	}

	/// The displacement within its segment of the given `index`.
	pub const fn displacement(self, index: u64) -> u64 {
		index & self.mask()
	}

	/// The index of the first element of the given `segment`.
	pub const fn start(self, segment: u64) -> u64 {
		segment << self.shift
	}

	/// The index composed of the given `segment` and `displacement`.
	pub const fn index(self, segment: u64, displacement: u64) -> u64 {
		self.start(segment) + displacement
	}
}

impl Default for SegmentLayout {
	fn default() -> Self {
		Self::DEFAULT
	}
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::{SEGMENT_MASK, SEGMENT_SHIFT, SEGMENT_SIZE, SegmentLayout};
	use quickcheck_macros::quickcheck;

	#[test]
	fn default_constants_agree() {
		let layout = SegmentLayout::DEFAULT;
		assert_eq!(layout.shift(), SEGMENT_SHIFT);
		assert_eq!(layout.size(), SEGMENT_SIZE);
		assert_eq!(layout.mask(), SEGMENT_MASK);
		assert_eq!(SegmentLayout::default(), layout);
	}

	#[quickcheck]
	fn round_trip(index: u64) {
		let layout = SegmentLayout::DEFAULT;
		assert_eq!(layout.index(layout.segment(index), layout.displacement(index)), index);
		assert!(layout.displacement(index) < layout.size());
	}

	#[quickcheck]
	fn round_trip_under_any_shift(index: u64, shift: u32) {
		let layout = SegmentLayout::new(shift % 63 + 1);
		assert_eq!(layout.index(layout.segment(index), layout.displacement(index)), index);
		assert!(layout.displacement(index) < layout.size());
	}

	#[test]
	fn boundary_indices() {
		let layout = SegmentLayout::DEFAULT;
		assert_eq!(layout.segment(SEGMENT_SIZE - 1), 0);
		assert_eq!(layout.displacement(SEGMENT_SIZE - 1), SEGMENT_MASK);
		assert_eq!(layout.segment(SEGMENT_SIZE), 1);
		assert_eq!(layout.displacement(SEGMENT_SIZE), 0);
		assert_eq!(layout.start(1), SEGMENT_SIZE);
	}

	#[test]
	#[should_panic]
	fn zero_shift_rejected() {
		SegmentLayout::new(0);
	}
}
