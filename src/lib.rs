// This is a part of jconv.
// Copyright (c) 2026, jconv developers.
// See README.md and LICENSE.txt for details.

/*!

# jconv

Incremental decoders for the legacy Japanese character encodings:
Shift_JIS, EUC-JP and ISO-2022-JP.

## Simple Usage

To decode a whole byte sequence at once:

```
use jconv::Encoding;
use jconv::all::SHIFT_JIS;

assert_eq!(SHIFT_JIS.decode(&[0x82, 0xa0, 0x41]), "\u{3042}A");
```

Malformed input does not fail the decode; it comes out as U+FFFD:

```
use jconv::Encoding;
use jconv::all::EUC_JP;

assert_eq!(EUC_JP.decode(&[0x41, 0xff, 0x42]), "A\u{fffd}B");
```

## Incremental Usage

A `Decoder` persists its state between calls, so the input may be cut
anywhere, and the output buffer is caller-supplied and may be too small;
`convert` then reports `NeedMoreOutput` with exact cursors instead of
allocating:

```
use jconv::{DecodeStatus, Encoding};
use jconv::all::ISO_2022_JP;

let mut decoder = ISO_2022_JP.raw_decoder();
let mut buf = ['\u{fffd}'; 4];

let (read, written, status) = decoder.convert(b"\x1b$B$\"\x1b(BA", &mut buf);
assert_eq!((read, written, status), (9, 2, DecodeStatus::Ok));
assert_eq!(&buf[..written], &['\u{3042}', 'A']);
```

The input slices of consecutive calls need not align with encoded-character
boundaries:

```
use jconv::Encoding;
use jconv::all::SHIFT_JIS;

let mut decoder = SHIFT_JIS.raw_decoder();
let mut buf = ['\u{fffd}'; 4];

let (read, written, _) = decoder.convert(&[0x82], &mut buf);
assert_eq!((read, written), (1, 0)); // lead consumed, nothing to emit yet
let (read, written, _) = decoder.convert(&[0xa0], &mut buf);
assert_eq!((read, written), (1, 1));
assert_eq!(buf[0], '\u{3042}');
```

See the `types` module documentation for the full conversion contract.

*/

pub use crate::types::{DecodeStatus, Decoder, Encoding, EncodingRef, REPLACEMENT};

mod util;
#[cfg(test)]
#[macro_use]
mod testutils;

pub mod types;

/// Indices used for character encoding implementation. Semi-internal.
pub mod index {
    pub use jconv_index_japanese::{jis0208, jis0212};
}

/// Codec implementations.
pub mod codec {
    pub mod japanese;
}

pub mod all;
