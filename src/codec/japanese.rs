// This is a part of jconv.
// Copyright (c) 2026, jconv developers.
// See README.md and LICENSE.txt for details.

//! Legacy Japanese encodings based on JIS X 0208 and JIS X 0212.
//!
//! All three decoders are table driven. A first byte either produces a code
//! point on its own or selects a row base; the following byte is classified
//! into a column offset and `row_base + column_offset` indexes one of the big
//! code tables in `jconv-index-japanese`. The classification tables below
//! encode "row base", "bare code point" and "invalid" in one `u16` per lead,
//! with the value ranges documented per table.

use crate::index::{jis0208, jis0212};
use crate::types::*;
use crate::util::as_char;

/// Classification cell for a lead that cannot open anything: one U+FFFD.
const SUBSTITUTE: u16 = 0xFFFD;
/// Classification cell for a lead that opens an undefined double byte:
/// the trail is still consumed and the pair substitutes as one unit.
/// (0xFFFE is a noncharacter, so it can never collide with a table cell.)
const UNDEFINED_LEAD: u16 = 0xFFFE;

const ESC: u8 = 0x1b;

/// Writes one code point to the output, or suspends the conversion with
/// `NeedMoreOutput` before the current byte counts as consumed.
macro_rules! emit {
    ($output:expr, $read:ident, $written:ident, $ch:expr) => {{
        if $written >= $output.len() {
            return ($read, $written, DecodeStatus::NeedMoreOutput);
        }
        $output[$written] = $ch;
        $written += 1;
    }};
}

/// Writes a whole burst of code points, or suspends before any of them,
/// so that a resumed call re-emits the burst from its start.
macro_rules! emit_burst {
    ($output:expr, $read:ident, $written:ident, [$($ch:expr),+]) => {{
        let burst = [$($ch),+];
        if $output.len() - $written < burst.len() {
            return ($read, $written, DecodeStatus::NeedMoreOutput);
        }
        for &c in burst.iter() {
            $output[$written] = c;
            $written += 1;
        }
    }};
}

/// First-byte classification for the Shift_JIS family, indexed by
/// `lead & 0x7F` for leads `0x80` and above. A cell is one of:
///
/// - a 188-wide row base below 0xE000: the lead opens a JIS X 0208 double byte;
/// - `0xE000 + 188 * n`: the lead opens an end-user-defined double byte mapped
///   linearly into the private use area;
/// - `0xFF61..=0xFF9F`: the lead is a bare halfwidth katakana;
/// - `SUBSTITUTE` or `UNDEFINED_LEAD` as documented on the constants.
static SHIFT_JIS_LEAD: [u16; 128] = [
              0xFFFD,                0,          188 * 1,          188 * 2, // 0x80
             188 * 3,          188 * 4,          188 * 5,          188 * 6, // 0x84
             188 * 7,          188 * 8,          188 * 9,         188 * 10, // 0x88
            188 * 11,         188 * 12,         188 * 13,         188 * 14, // 0x8C
            188 * 15,         188 * 16,         188 * 17,         188 * 18, // 0x90
            188 * 19,         188 * 20,         188 * 21,         188 * 22, // 0x94
            188 * 23,         188 * 24,         188 * 25,         188 * 26, // 0x98
            188 * 27,         188 * 28,         188 * 29,         188 * 30, // 0x9C
              0xFFFD,           0xFF61,           0xFF62,           0xFF63, // 0xA0
              0xFF64,           0xFF65,           0xFF66,           0xFF67, // 0xA4
              0xFF68,           0xFF69,           0xFF6A,           0xFF6B, // 0xA8
              0xFF6C,           0xFF6D,           0xFF6E,           0xFF6F, // 0xAC
              0xFF70,           0xFF71,           0xFF72,           0xFF73, // 0xB0
              0xFF74,           0xFF75,           0xFF76,           0xFF77, // 0xB4
              0xFF78,           0xFF79,           0xFF7A,           0xFF7B, // 0xB8
              0xFF7C,           0xFF7D,           0xFF7E,           0xFF7F, // 0xBC
              0xFF80,           0xFF81,           0xFF82,           0xFF83, // 0xC0
              0xFF84,           0xFF85,           0xFF86,           0xFF87, // 0xC4
              0xFF88,           0xFF89,           0xFF8A,           0xFF8B, // 0xC8
              0xFF8C,           0xFF8D,           0xFF8E,           0xFF8F, // 0xCC
              0xFF90,           0xFF91,           0xFF92,           0xFF93, // 0xD0
              0xFF94,           0xFF95,           0xFF96,           0xFF97, // 0xD4
              0xFF98,           0xFF99,           0xFF9A,           0xFF9B, // 0xD8
              0xFF9C,           0xFF9D,           0xFF9E,           0xFF9F, // 0xDC
            188 * 31,         188 * 32,         188 * 33,         188 * 34, // 0xE0
            188 * 35,         188 * 36,         188 * 37,         188 * 38, // 0xE4
            188 * 39,         188 * 40,         188 * 41,         188 * 42, // 0xE8
            188 * 43,         188 * 44,         188 * 45,         188 * 46, // 0xEC
              0xE000, 0xE000 + 188 * 1, 0xE000 + 188 * 2, 0xE000 + 188 * 3, // 0xF0
    0xE000 + 188 * 4, 0xE000 + 188 * 5, 0xE000 + 188 * 6, 0xE000 + 188 * 7, // 0xF4
    0xE000 + 188 * 8, 0xE000 + 188 * 9,           0xFFFE,           0xFFFE, // 0xF8
              0xFFFE,           0xFFFD,           0xFFFD,           0xFFFD, // 0xFC
];

/// Second-byte classification for Shift_JIS: maps a trail byte in
/// `0x40..=0x7E` or `0x80..=0xFC` to a column offset `0..=187`, and
/// everything else to 0xFF (invalid).
static SHIFT_JIS_TRAIL: [u8; 256] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x00
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x08
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x10
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x18
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x20
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x28
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x30
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x38
       0,    1,    2,    3,    4,    5,    6,    7, // 0x40
       8,    9,   10,   11,   12,   13,   14,   15, // 0x48
      16,   17,   18,   19,   20,   21,   22,   23, // 0x50
      24,   25,   26,   27,   28,   29,   30,   31, // 0x58
      32,   33,   34,   35,   36,   37,   38,   39, // 0x60
      40,   41,   42,   43,   44,   45,   46,   47, // 0x68
      48,   49,   50,   51,   52,   53,   54,   55, // 0x70
      56,   57,   58,   59,   60,   61,   62, 0xFF, // 0x78
      63,   64,   65,   66,   67,   68,   69,   70, // 0x80
      71,   72,   73,   74,   75,   76,   77,   78, // 0x88
      79,   80,   81,   82,   83,   84,   85,   86, // 0x90
      87,   88,   89,   90,   91,   92,   93,   94, // 0x98
      95,   96,   97,   98,   99,  100,  101,  102, // 0xA0
     103,  104,  105,  106,  107,  108,  109,  110, // 0xA8
     111,  112,  113,  114,  115,  116,  117,  118, // 0xB0
     119,  120,  121,  122,  123,  124,  125,  126, // 0xB8
     127,  128,  129,  130,  131,  132,  133,  134, // 0xC0
     135,  136,  137,  138,  139,  140,  141,  142, // 0xC8
     143,  144,  145,  146,  147,  148,  149,  150, // 0xD0
     151,  152,  153,  154,  155,  156,  157,  158, // 0xD8
     159,  160,  161,  162,  163,  164,  165,  166, // 0xE0
     167,  168,  169,  170,  171,  172,  173,  174, // 0xE8
     175,  176,  177,  178,  179,  180,  181,  182, // 0xF0
     183,  184,  185,  186,  187, 0xFF, 0xFF, 0xFF, // 0xF8
];

/// First-byte classification for the 94x94 family shared by EUC-JP and
/// ISO-2022-JP, indexed by the low seven bits of the lead (EUC-JP leads have
/// the high bit set, ISO-2022-JP leads do not; both land on the same row).
/// A cell is a 94-wide row base, or `SUBSTITUTE` for a lead outside
/// `0x21..=0x7E` modulo the high bit.
static ROW94_LEAD: [u16; 128] = [
      0xFFFD,   0xFFFD,   0xFFFD,   0xFFFD, // 0x00
      0xFFFD,   0xFFFD,   0xFFFD,   0xFFFD, // 0x04
      0xFFFD,   0xFFFD,   0xFFFD,   0xFFFD, // 0x08
      0xFFFD,   0xFFFD,   0xFFFD,   0xFFFD, // 0x0C
      0xFFFD,   0xFFFD,   0xFFFD,   0xFFFD, // 0x10
      0xFFFD,   0xFFFD,   0xFFFD,   0xFFFD, // 0x14
      0xFFFD,   0xFFFD,   0xFFFD,   0xFFFD, // 0x18
      0xFFFD,   0xFFFD,   0xFFFD,   0xFFFD, // 0x1C
      0xFFFD,        0,   94 * 1,   94 * 2, // 0x20
      94 * 3,   94 * 4,   94 * 5,   94 * 6, // 0x24
      94 * 7,   94 * 8,   94 * 9,  94 * 10, // 0x28
     94 * 11,  94 * 12,  94 * 13,  94 * 14, // 0x2C
     94 * 15,  94 * 16,  94 * 17,  94 * 18, // 0x30
     94 * 19,  94 * 20,  94 * 21,  94 * 22, // 0x34
     94 * 23,  94 * 24,  94 * 25,  94 * 26, // 0x38
     94 * 27,  94 * 28,  94 * 29,  94 * 30, // 0x3C
     94 * 31,  94 * 32,  94 * 33,  94 * 34, // 0x40
     94 * 35,  94 * 36,  94 * 37,  94 * 38, // 0x44
     94 * 39,  94 * 40,  94 * 41,  94 * 42, // 0x48
     94 * 43,  94 * 44,  94 * 45,  94 * 46, // 0x4C
     94 * 47,  94 * 48,  94 * 49,  94 * 50, // 0x50
     94 * 51,  94 * 52,  94 * 53,  94 * 54, // 0x54
     94 * 55,  94 * 56,  94 * 57,  94 * 58, // 0x58
     94 * 59,  94 * 60,  94 * 61,  94 * 62, // 0x5C
     94 * 63,  94 * 64,  94 * 65,  94 * 66, // 0x60
     94 * 67,  94 * 68,  94 * 69,  94 * 70, // 0x64
     94 * 71,  94 * 72,  94 * 73,  94 * 74, // 0x68
     94 * 75,  94 * 76,  94 * 77,  94 * 78, // 0x6C
     94 * 79,  94 * 80,  94 * 81,  94 * 82, // 0x70
     94 * 83,  94 * 84,  94 * 85,  94 * 86, // 0x74
     94 * 87,  94 * 88,  94 * 89,  94 * 90, // 0x78
     94 * 91,  94 * 92,  94 * 93,   0xFFFD, // 0x7C
];

/// Second-byte classification for the 94x94 family: maps a trail byte in
/// `0xA1..=0xFE` to a column offset `0..=93`, and everything else to 0xFF
/// (invalid). ISO-2022-JP probes this table with the high bit ORed in after
/// rejecting bytes `0x80` and above.
static ROW94_TRAIL: [u8; 256] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x00
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x08
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x10
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x18
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x20
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x28
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x30
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x38
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x40
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x48
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x50
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x58
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x60
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x68
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x70
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x78
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x80
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x88
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x90
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x98
    0xFF,    0,    1,    2,    3,    4,    5,    6, // 0xA0
       7,    8,    9,   10,   11,   12,   13,   14, // 0xA8
      15,   16,   17,   18,   19,   20,   21,   22, // 0xB0
      23,   24,   25,   26,   27,   28,   29,   30, // 0xB8
      31,   32,   33,   34,   35,   36,   37,   38, // 0xC0
      39,   40,   41,   42,   43,   44,   45,   46, // 0xC8
      47,   48,   49,   50,   51,   52,   53,   54, // 0xD0
      55,   56,   57,   58,   59,   60,   61,   62, // 0xD8
      63,   64,   65,   66,   67,   68,   69,   70, // 0xE0
      71,   72,   73,   74,   75,   76,   77,   78, // 0xE8
      79,   80,   81,   82,   83,   84,   85,   86, // 0xF0
      87,   88,   89,   90,   91,   92,   93, 0xFF, // 0xF8
];

/**
 * Shift_JIS, with the Windows code page 932 table layout.
 *
 * The 94 by 94 region of JIS X 0208 is "shifted" so that two adjacent rows
 * share one lead byte (`[81-9F E0-EF]`) and the trail distinguishes them
 * (`[40-7E 80-FC]`, 188 columns). The remaining single-byte area carries
 * ASCII (`[00-7F]`) and the upper half of JIS X 0201, i.e. bare halfwidth
 * katakana (`[A1-DF]`). Leads `F0-F9` open the end-user-defined region,
 * mapped linearly to the private use area from U+E000 on.
 */
#[derive(Clone, Copy)]
pub struct ShiftJISEncoding;

impl Encoding for ShiftJISEncoding {
    fn name(&self) -> &'static str {
        "shift_jis"
    }
    fn whatwg_name(&self) -> Option<&'static str> {
        Some("shift_jis")
    }
    fn raw_decoder(&self) -> Box<dyn Decoder> {
        ShiftJISDecoder::new()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ShiftJISState {
    Initial,
    /// Waiting for the trail of a JIS X 0208 double byte; the payload is the
    /// 188-wide row base.
    Jis0208Trail(u16),
    /// Waiting for the trail of an end-user-defined double byte; the payload
    /// is the first private-use code point of the row.
    EudcTrail(u16),
    /// Waiting for the trail of an undefined double byte, which substitutes
    /// as one unit.
    BadTrail,
}

/// A decoder for Shift_JIS.
#[derive(Clone)]
pub struct ShiftJISDecoder {
    st: ShiftJISState,
}

impl ShiftJISDecoder {
    pub fn new() -> Box<dyn Decoder> {
        Box::new(ShiftJISDecoder { st: ShiftJISState::Initial })
    }
}

impl Decoder for ShiftJISDecoder {
    fn from_self(&self) -> Box<dyn Decoder> {
        ShiftJISDecoder::new()
    }

    fn convert(&mut self, input: &[u8], output: &mut [char]) -> (usize, usize, DecodeStatus) {
        let mut read = 0;
        let mut written = 0;
        while read < input.len() {
            let b = input[read];
            match self.st {
                ShiftJISState::Initial => {
                    if b < 0x80 {
                        emit!(output, read, written, b as char);
                    } else {
                        match SHIFT_JIS_LEAD[(b & 0x7f) as usize] {
                            SUBSTITUTE => emit!(output, read, written, REPLACEMENT),
                            UNDEFINED_LEAD => self.st = ShiftJISState::BadTrail,
                            cell @ 0xff61..=0xff9f => {
                                emit!(output, read, written, as_char(cell))
                            }
                            base @ 0xe000.. => self.st = ShiftJISState::EudcTrail(base),
                            base => self.st = ShiftJISState::Jis0208Trail(base),
                        }
                    }
                }
                ShiftJISState::Jis0208Trail(base) => {
                    let ch = match SHIFT_JIS_TRAIL[b as usize] {
                        0xff => REPLACEMENT,
                        off => as_char(jis0208::forward(base + off as u16)),
                    };
                    emit!(output, read, written, ch);
                    self.st = ShiftJISState::Initial;
                }
                ShiftJISState::EudcTrail(base) => {
                    let ch = match SHIFT_JIS_TRAIL[b as usize] {
                        0xff => REPLACEMENT,
                        off => as_char(base + off as u16),
                    };
                    emit!(output, read, written, ch);
                    self.st = ShiftJISState::Initial;
                }
                ShiftJISState::BadTrail => {
                    emit!(output, read, written, REPLACEMENT);
                    self.st = ShiftJISState::Initial;
                }
            }
            read += 1;
        }
        (read, written, DecodeStatus::Ok)
    }

    fn reset(&mut self) {
        self.st = ShiftJISState::Initial;
    }
}

/**
 * EUC-JP.
 *
 * This is a Japanese encoding created from three JIS character sets:
 * ASCII in `[00-7F]`, JIS X 0208 in `[A1-FE] [A1-FE]`, the upper half of
 * JIS X 0201 (halfwidth katakana) behind the single shift `8E [A1-DF]`, and
 * JIS X 0212 behind the single shift `8F [A1-FE] [A1-FE]`.
 */
#[derive(Clone, Copy)]
pub struct EUCJPEncoding;

impl Encoding for EUCJPEncoding {
    fn name(&self) -> &'static str {
        "euc-jp"
    }
    fn whatwg_name(&self) -> Option<&'static str> {
        Some("euc-jp")
    }
    fn raw_decoder(&self) -> Box<dyn Decoder> {
        EUCJPDecoder::new()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum EUCJPState {
    Initial,
    /// Waiting for the trail of a JIS X 0208 double byte; the payload is the
    /// 94-wide row base.
    Jis0208Trail(u16),
    /// After the single shift 0x8E: waiting for one JIS X 0201 katakana byte.
    Jis0201Kana,
    /// After the single shift 0x8F: waiting for a JIS X 0212 lead.
    Jis0212Lead,
    /// Waiting for the trail of a JIS X 0212 double byte.
    Jis0212Trail(u16),
    /// A single shift with an unrecognized follower swallows one more byte
    /// and substitutes as one unit; the follower is not retried as a fresh
    /// character.
    BadTrail,
}

/// A decoder for EUC-JP with JIS X 0212 behind the 0x8F single shift.
#[derive(Clone)]
pub struct EUCJPDecoder {
    st: EUCJPState,
}

impl EUCJPDecoder {
    pub fn new() -> Box<dyn Decoder> {
        Box::new(EUCJPDecoder { st: EUCJPState::Initial })
    }
}

impl Decoder for EUCJPDecoder {
    fn from_self(&self) -> Box<dyn Decoder> {
        EUCJPDecoder::new()
    }

    fn convert(&mut self, input: &[u8], output: &mut [char]) -> (usize, usize, DecodeStatus) {
        let mut read = 0;
        let mut written = 0;
        while read < input.len() {
            let b = input[read];
            match self.st {
                EUCJPState::Initial => {
                    if b < 0x80 {
                        emit!(output, read, written, b as char);
                    } else {
                        match ROW94_LEAD[(b & 0x7f) as usize] {
                            SUBSTITUTE if b == 0x8e => self.st = EUCJPState::Jis0201Kana,
                            SUBSTITUTE if b == 0x8f => self.st = EUCJPState::Jis0212Lead,
                            SUBSTITUTE => emit!(output, read, written, REPLACEMENT),
                            base => self.st = EUCJPState::Jis0208Trail(base),
                        }
                    }
                }
                EUCJPState::Jis0208Trail(base) => {
                    let ch = match ROW94_TRAIL[b as usize] {
                        0xff => REPLACEMENT,
                        off => as_char(jis0208::forward(base + off as u16)),
                    };
                    emit!(output, read, written, ch);
                    self.st = EUCJPState::Initial;
                }
                EUCJPState::Jis0201Kana => {
                    let ch = match b {
                        0xa1..=0xdf => as_char(0xff61 + (b - 0xa1) as u16),
                        _ => REPLACEMENT,
                    };
                    emit!(output, read, written, ch);
                    self.st = EUCJPState::Initial;
                }
                EUCJPState::Jis0212Lead => {
                    if b >= 0x80 {
                        match ROW94_LEAD[(b & 0x7f) as usize] {
                            SUBSTITUTE => self.st = EUCJPState::BadTrail,
                            base => self.st = EUCJPState::Jis0212Trail(base),
                        }
                    } else {
                        self.st = EUCJPState::BadTrail;
                    }
                }
                EUCJPState::Jis0212Trail(base) => {
                    let ch = match ROW94_TRAIL[b as usize] {
                        0xff => REPLACEMENT,
                        off => as_char(jis0212::forward(base + off as u16)),
                    };
                    emit!(output, read, written, ch);
                    self.st = EUCJPState::Initial;
                }
                EUCJPState::BadTrail => {
                    emit!(output, read, written, REPLACEMENT);
                    self.st = EUCJPState::Initial;
                }
            }
            read += 1;
        }
        (read, written, DecodeStatus::Ok)
    }

    fn reset(&mut self) {
        self.st = EUCJPState::Initial;
    }
}

/**
 * ISO-2022-JP.
 *
 * Unlike the other two encodings the active character set is not inferred
 * from the high bit (every byte is expected below 0x80) but switched by
 * escape sequences:
 *
 * - `ESC ( B` for ASCII and `ESC ( J` for JIS X 0201 Roman;
 * - `ESC ( I` for the upper half of JIS X 0201, i.e. halfwidth katakana;
 * - `ESC $ @` and `ESC $ B` for the 1978 and 1983 editions of JIS X 0208;
 * - `ESC $ ( D` for JIS X 0212.
 *
 * An unrecognized escape sequence is not dropped: its bytes reappear in the
 * output as literal code points, which keeps malformed streams visually
 * inspectable, and the character set from before the escape stays active.
 */
#[derive(Clone, Copy)]
pub struct ISO2022JPEncoding;

impl Encoding for ISO2022JPEncoding {
    fn name(&self) -> &'static str {
        "iso-2022-jp"
    }
    fn whatwg_name(&self) -> Option<&'static str> {
        Some("iso-2022-jp")
    }
    fn raw_decoder(&self) -> Box<dyn Decoder> {
        ISO2022JPDecoder::new()
    }
}

/// A stable ISO-2022-JP character set, designated by a complete escape
/// sequence and active until the next one.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Iso2022Mode {
    Ascii,
    /// JIS X 0201 Roman. Decoded as ASCII: the 0x5C/0x7E reassignment to
    /// the yen sign and overline is not applied.
    Roman,
    /// The upper half of JIS X 0201, offset into halfwidth katakana.
    Katakana,
    Jis0208_1978,
    Jis0208_1983,
    Jis0212,
}

/// The decoder state. Transient states carry the mode to fall back to, so a
/// stale fallback cannot exist by construction; `Trail` carries the active
/// two-byte mode together with the row base selected by the lead.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ISO2022JPState {
    Stable(Iso2022Mode),
    /// Seen ESC.
    Escape(Iso2022Mode),
    /// Seen ESC (.
    EscapeParen(Iso2022Mode),
    /// Seen ESC $.
    EscapeDollar(Iso2022Mode),
    /// Seen ESC $ (.
    EscapeDollarParen(Iso2022Mode),
    /// Waiting for the trail of a double byte in the given two-byte mode.
    Trail(Iso2022Mode, u16),
    /// An illegal first byte in a two-byte mode swallows one more byte and
    /// substitutes as one fixed two-byte unit.
    BadTrail(Iso2022Mode),
}

/// A decoder for ISO-2022-JP with JIS X 0212 support.
#[derive(Clone)]
pub struct ISO2022JPDecoder {
    st: ISO2022JPState,
}

impl ISO2022JPDecoder {
    pub fn new() -> Box<dyn Decoder> {
        Box::new(ISO2022JPDecoder { st: ISO2022JPState::Stable(Iso2022Mode::Ascii) })
    }
}

/// An escape-prefix byte re-emitted as a literal code point; a byte with the
/// high bit set substitutes instead.
#[inline]
fn literal(b: u8) -> char {
    if b & 0x80 != 0 {
        REPLACEMENT
    } else {
        b as char
    }
}

impl Decoder for ISO2022JPDecoder {
    fn from_self(&self) -> Box<dyn Decoder> {
        ISO2022JPDecoder::new()
    }

    fn convert(&mut self, input: &[u8], output: &mut [char]) -> (usize, usize, DecodeStatus) {
        use self::ISO2022JPState as State;

        let mut read = 0;
        let mut written = 0;
        while read < input.len() {
            let b = input[read];
            match self.st {
                State::Stable(mode) => match mode {
                    Iso2022Mode::Ascii | Iso2022Mode::Roman => {
                        if b == ESC {
                            self.st = State::Escape(mode);
                        } else if b >= 0x80 {
                            emit!(output, read, written, REPLACEMENT);
                        } else {
                            emit!(output, read, written, b as char);
                        }
                    }
                    Iso2022Mode::Katakana => {
                        if b == ESC {
                            self.st = State::Escape(mode);
                        } else {
                            let ch = match b {
                                0x21..=0x5f => as_char(0xff61 + (b - 0x21) as u16),
                                _ => REPLACEMENT,
                            };
                            emit!(output, read, written, ch);
                        }
                    }
                    Iso2022Mode::Jis0208_1978
                    | Iso2022Mode::Jis0208_1983
                    | Iso2022Mode::Jis0212 => {
                        if b == ESC {
                            self.st = State::Escape(mode);
                        } else if b >= 0x80 {
                            self.st = State::BadTrail(mode);
                        } else {
                            match ROW94_LEAD[b as usize] {
                                SUBSTITUTE => self.st = State::BadTrail(mode),
                                base => self.st = State::Trail(mode, base),
                            }
                        }
                    }
                },
                State::Escape(prev) => match b {
                    b'(' => self.st = State::EscapeParen(prev),
                    b'$' => self.st = State::EscapeDollar(prev),
                    _ => {
                        emit_burst!(output, read, written, ['\u{1b}', literal(b)]);
                        self.st = State::Stable(prev);
                    }
                },
                State::EscapeParen(prev) => match b {
                    b'B' => self.st = State::Stable(Iso2022Mode::Ascii),
                    b'J' => self.st = State::Stable(Iso2022Mode::Roman),
                    b'I' => self.st = State::Stable(Iso2022Mode::Katakana),
                    _ => {
                        emit_burst!(output, read, written, ['\u{1b}', '(', literal(b)]);
                        self.st = State::Stable(prev);
                    }
                },
                State::EscapeDollar(prev) => match b {
                    b'@' => self.st = State::Stable(Iso2022Mode::Jis0208_1978),
                    b'B' => self.st = State::Stable(Iso2022Mode::Jis0208_1983),
                    b'(' => self.st = State::EscapeDollarParen(prev),
                    _ => {
                        emit_burst!(output, read, written, ['\u{1b}', '$', literal(b)]);
                        self.st = State::Stable(prev);
                    }
                },
                State::EscapeDollarParen(prev) => match b {
                    b'D' => self.st = State::Stable(Iso2022Mode::Jis0212),
                    _ => {
                        emit_burst!(output, read, written, ['\u{1b}', '$', '(', literal(b)]);
                        self.st = State::Stable(prev);
                    }
                },
                State::Trail(mode, base) => {
                    let off = if b >= 0x80 { 0xff } else { ROW94_TRAIL[(b | 0x80) as usize] };
                    let ch = match off {
                        0xff => REPLACEMENT,
                        off => {
                            let pointer = base + off as u16;
                            match mode {
                                Iso2022Mode::Jis0212 => as_char(jis0212::forward(pointer)),
                                _ => as_char(jis0208::forward(pointer)),
                            }
                        }
                    };
                    emit!(output, read, written, ch);
                    self.st = State::Stable(mode);
                }
                State::BadTrail(prev) => {
                    emit!(output, read, written, REPLACEMENT);
                    self.st = State::Stable(prev);
                }
            }
            read += 1;
        }
        (read, written, DecodeStatus::Ok)
    }

    fn reset(&mut self) {
        self.st = ISO2022JPState::Stable(Iso2022Mode::Ascii);
    }

    fn max_output_for(&self, input_len: usize) -> usize {
        // a pending escape prefix of up to three bytes from earlier calls can
        // be re-emitted literally in front of this call's own output
        input_len + 3
    }
}

#[cfg(test)]
mod shiftjis_tests {
    use super::ShiftJISEncoding;
    use crate::testutils::{check_capacity_schedule, check_split_invariance};
    use crate::types::*;

    #[test]
    fn test_decoder_valid() {
        let mut d = ShiftJISEncoding.raw_decoder();
        assert_convert_ok!(d, [0x41], "A");
        assert_convert_ok!(d, [0x42, 0x43], "BC");
        assert_convert_ok!(d, [], "");
        assert_convert_ok!(d, [0x5c], "\\");
        assert_convert_ok!(d, [0x7e], "~");
        assert_convert_ok!(d, [0x82, 0xa0], "\u{3042}");
        assert_convert_ok!(d, [0x82, 0xc9, 0x82, 0xd9, 0x82, 0xf1], "\u{306b}\u{307b}\u{3093}");
        assert_convert_ok!(d, [0xc6, 0xce, 0xdd], "\u{ff86}\u{ff8e}\u{ff9d}");
        assert_convert_ok!(d, [0x93, 0xfa, 0x96, 0x7b], "\u{65e5}\u{672c}");
    }

    #[test]
    fn test_decoder_eudc() {
        let mut d = ShiftJISEncoding.raw_decoder();
        // the end-user-defined rows map linearly into the private use area
        assert_convert_ok!(d, [0xf0, 0x40], "\u{e000}");
        assert_convert_ok!(d, [0xf0, 0xfc], "\u{e0bb}");
        assert_convert_ok!(d, [0xf9, 0xfc], "\u{e757}");
        // an invalid trail after an end-user-defined lead substitutes
        assert_convert_ok!(d, [0xf0, 0x3f, 0x41], "\u{fffd}A");
    }

    #[test]
    fn test_decoder_invalid() {
        let mut d = ShiftJISEncoding.raw_decoder();
        // reserved leads substitute immediately
        assert_convert_ok!(d, [0x80, 0x41], "\u{fffd}A");
        assert_convert_ok!(d, [0xa0, 0x41], "\u{fffd}A");
        assert_convert_ok!(d, [0xfd, 0xfe, 0xff], "\u{fffd}\u{fffd}\u{fffd}");
        // undefined double-byte leads consume exactly one trail
        assert_convert_ok!(d, [0xfa, 0x41, 0x42], "\u{fffd}B");
        // a valid lead with an invalid trail substitutes the pair
        assert_convert_ok!(d, [0x82, 0x20, 0x41], "\u{fffd}A");
        assert_convert_ok!(d, [0x82, 0x7f, 0x41], "\u{fffd}A");
        // an unassigned cell substitutes without derailing the stream
        assert_convert_ok!(d, [0x88, 0x40, 0x41], "\u{fffd}A");
    }

    #[test]
    fn test_substitution_totality() {
        // every lead byte class recovers with exactly one substitute
        for b in [0x80, 0xa0, 0xfd, 0xfe, 0xff] {
            let mut d = ShiftJISEncoding.raw_decoder();
            assert_convert_ok!(d, [b, 0x41], "\u{fffd}A");
        }
        for b in 0xfa..=0xfc_u8 {
            let mut d = ShiftJISEncoding.raw_decoder();
            assert_convert_ok!(d, [b, 0x41, 0x42], "\u{fffd}B");
        }
        for b in (0x81..=0x9f_u8).chain(0xe0..=0xef_u8) {
            let mut d = ShiftJISEncoding.raw_decoder();
            assert_convert_ok!(d, [b, 0x3f, 0x41], "\u{fffd}A");
        }
        for b in 0xf0..=0xf9_u8 {
            let mut d = ShiftJISEncoding.raw_decoder();
            let decoded = d.test_feed(&[b, 0x40]);
            let ch = decoded.chars().next().unwrap();
            assert!(('\u{e000}'..='\u{e757}').contains(&ch), "lead {:02x}: {:?}", b, ch);
        }
        for b in 0xa1..=0xdf_u8 {
            let mut d = ShiftJISEncoding.raw_decoder();
            let expected = char::from_u32(0xff61 + (b as u32 - 0xa1)).unwrap();
            let decoded = d.test_feed(&[b]);
            assert_eq!(decoded.chars().next(), Some(expected));
        }
    }

    #[test]
    fn test_ascii_passthrough() {
        let mut d = ShiftJISEncoding.raw_decoder();
        for b in 0x00..=0x7f_u8 {
            let decoded = d.test_feed(&[b]);
            assert_eq!(decoded.chars().next(), Some(b as char));
        }
    }

    #[test]
    fn test_capacity() {
        let mut d = ShiftJISEncoding.raw_decoder();
        assert_need_more!(d, [0x41, 0x42], 1, 1, 1);
        assert_convert_ok!(d, [0x42], "B");

        // a lead is consumed even with no room: its effect is pure state
        let mut d = ShiftJISEncoding.raw_decoder();
        assert_need_more!(d, [0x82, 0xa0], 0, 1, 0);
        assert_convert_ok!(d, [0xa0], "\u{3042}");

        let mut d = ShiftJISEncoding.raw_decoder();
        assert_need_more!(d, [0x41], 0, 0, 0);
    }

    #[test]
    fn test_split_invariance() {
        let input = b"A\x82\xa0\xb1\x93\xfa\x80\xfa\x41\x82\x20\xf0\x40Z";
        check_split_invariance(&ShiftJISEncoding, input);
    }

    #[test]
    fn test_capacity_schedules() {
        let input = b"A\x82\xa0\xb1\x93\xfa\x80\xfa\x41\x82\x20\xf0\x40Z";
        for schedule in [&[0, 1, 4, 2][..], &[1][..], &[2, 0, 5][..]] {
            check_capacity_schedule(&ShiftJISEncoding, input, schedule);
        }
    }

    #[test]
    fn test_reset() {
        // a truncated double byte is discarded without a substitute
        let mut d = ShiftJISEncoding.raw_decoder();
        let (read, written, status) = d.convert(&[0x82], &mut []);
        assert_eq!((read, written, status), (1, 0, DecodeStatus::Ok));
        d.reset();
        assert_convert_ok!(d, [0x41], "A");

        // a reset instance behaves like a fresh one
        let mut fresh = ShiftJISEncoding.raw_decoder();
        assert_eq!(d.test_feed(b"\x82\xa0"), fresh.test_feed(b"\x82\xa0"));
    }

    #[test]
    fn test_max_output_for() {
        let d = ShiftJISEncoding.raw_decoder();
        assert_eq!(d.max_output_for(0), 0);
        assert_eq!(d.max_output_for(17), 17);
    }

    #[test]
    fn test_from_self() {
        let mut d = ShiftJISEncoding.raw_decoder();
        let (read, written, status) = d.convert(&[0x82], &mut []);
        assert_eq!((read, written, status), (1, 0, DecodeStatus::Ok));
        // the new instance starts fresh, the original keeps its pending lead
        let mut fresh = d.from_self();
        assert_convert_ok!(fresh, [0x41], "A");
        assert_convert_ok!(d, [0xa0], "\u{3042}");
    }
}
