// This is a part of jconv.
// Copyright (c) 2026, jconv developers.
// See README.md and LICENSE.txt for details.

//! Index tables for the Japanese character encodings decoded by jconv.
//!
//! Both tables are dense 94x94 grids in row-major order, addressed with a
//! zero-based pointer `row_base + column_offset`. The decoders compute the
//! row base from the first byte of a double-byte sequence and the column
//! offset from the second; how the bytes map to rows and columns differs per
//! encoding, but the cell contents do not. Unassigned cells hold U+FFFD so
//! that any in-range lookup can be emitted without a second validity check.

pub mod jis0208;
pub mod jis0212;
