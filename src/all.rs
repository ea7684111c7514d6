// This is a part of jconv.
// Copyright (c) 2026, jconv developers.
// See README.md and LICENSE.txt for details.

//! A list of all supported encodings. Useful for encodings fixed in the compile time.

use crate::codec;

macro_rules! unique {
    (var=$var:ident, mod=$module:ident, val=$val:ident) => {
        pub static $var: &codec::$module::$val = &codec::$module::$val;
    };
}

unique!(var=SHIFT_JIS, mod=japanese, val=ShiftJISEncoding);
unique!(var=EUC_JP, mod=japanese, val=EUCJPEncoding);
unique!(var=ISO_2022_JP, mod=japanese, val=ISO2022JPEncoding);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EncodingRef;

    #[test]
    fn test_names_are_unique() {
        let encodings: &[EncodingRef] = &[SHIFT_JIS, EUC_JP, ISO_2022_JP];
        for (i, a) in encodings.iter().enumerate() {
            for b in &encodings[i + 1..] {
                assert!(a.name() != b.name());
            }
        }
    }

    #[test]
    fn test_decode_via_ref() {
        // the statics coerce to a sendable trait object
        let encoding = SHIFT_JIS as EncodingRef;
        assert_eq!(encoding.name(), "shift_jis");
        assert_eq!(encoding.whatwg_name(), Some("shift_jis"));
        assert_eq!(encoding.decode(&[0x82, 0xa0]), "\u{3042}");
    }
}
