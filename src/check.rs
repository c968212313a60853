//! Range preconditions validated before any mutation.
//!
//! These checks are the caller's entry contract: the sort engines themselves trust `[from, to)`
//! and never re-validate it on recursion.

use crate::SortIndex;
use core::fmt::{self, Debug, Display, Formatter};

/// Violation of a range precondition, raised by [`check_range`] and [`check_offset_length`]
/// before any storage is touched.
///
/// The index types being unsigned, the negative sub-cases of both kinds are unrepresentable and
/// need no variant.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RangeError<I> {
	/// The start index is greater than the end index.
	Decreasing {
		/// The start index.
		from: I,
		/// The end index exceeded by `from`.
		to: I,
	},
	/// The range reaches past the addressed length (or past the index domain).
	OutOfBounds {
		/// The start index of the range.
		offset: I,
		/// The length of the range.
		len: I,
		/// The addressed length.
		length: I,
	},
}

impl<I> Display for RangeError<I>
where
	I: Display,
{
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Self::Decreasing { from, to } => {
				write!(f, "start index {from} greater than end index {to}")
			}
			Self::OutOfBounds {
				offset,
				len,
				length,
			} => {
				write!(
					f,
					"range of length {len} starting at {offset} out of bounds for length {length}"
				)
			}
		}
	}
}

impl<I> core::error::Error for RangeError<I> where I: Debug + Display {}

/// Ensures that `[from, to)` is a valid range over a sequence of length `length`.
///
/// Fails with [`RangeError::Decreasing`] if `from > to` and with [`RangeError::OutOfBounds`] if
/// `to > length`.
///
/// # Examples
///
/// ```
/// use index_sort::{RangeError, check_range};
///
/// assert_eq!(check_range(5u32, 0, 5), Ok(()));
/// assert_eq!(
/// 	check_range(5u32, 3, 2),
/// 	Err(RangeError::Decreasing { from: 3, to: 2 }),
/// );
/// assert_eq!(
/// 	check_range(5u32, 0, 6),
/// 	Err(RangeError::OutOfBounds { offset: 0, len: 6, length: 5 }),
/// );
/// ```
pub fn check_range<I>(length: I, from: I, to: I) -> Result<(), RangeError<I>>
where
	I: SortIndex,
{
	if from > to {
		Err(RangeError::Decreasing { from, to })
	} else if to > length {
		Err(RangeError::OutOfBounds {
			offset: from,
			len: to - from,
			length,
		})
	} else {
		Ok(())
	}
}

/// Ensures that `[offset, offset + len)` is a valid range over a sequence of length `length`.
///
/// Equivalent to [`check_range`] with `to = offset + len`; an `offset + len` overflowing the index
/// domain is out of bounds for every `length`.
///
/// # Examples
///
/// ```
/// use index_sort::{RangeError, check_offset_length};
///
/// assert_eq!(check_offset_length(5u64, 2, 3), Ok(()));
/// assert_eq!(
/// 	check_offset_length(5u64, 2, 4),
/// 	Err(RangeError::OutOfBounds { offset: 2, len: 4, length: 5 }),
/// );
/// ```
pub fn check_offset_length<I>(length: I, offset: I, len: I) -> Result<(), RangeError<I>>
where
	I: SortIndex,
{
	match offset.checked_add(len) {
		Some(to) if to <= length => Ok(()),
		_ => Err(RangeError::OutOfBounds {
			offset,
			len,
			length,
		}),
	}
}
