// This is a part of jconv.
// Copyright (c) 2026, jconv developers.
// See README.md and LICENSE.txt for details.

/*!
 * Interface to the character decoding.
 *
 * # Incremental interface
 *
 * `Decoder::convert` is the lowest-available API for decoders.
 * A single byte stream is decoded through any number of `convert` calls
 * against the same decoder instance; the input slices need not align with
 * encoded-character boundaries, since any partially seen sequence is carried
 * in the decoder state until the following call supplies the rest.
 *
 * Unlike a growable sink, the output buffer is supplied by the caller and may
 * be too small for the decoded form of the input, or even empty. `convert`
 * then stops right before the code point that would not fit and returns
 * `NeedMoreOutput` together with both cursors, so the caller can drain or
 * enlarge the buffer and call again with the unconsumed remainder:
 *
 * ````text
 * 1st convert      :2nd convert        :3rd convert
 * -----------+-----:------------+-----:-------------
 *  consumed  |     :  consumed  |     :  consumed
 * -----------+-----:------------+-----:-------------
 *            remaining          remaining
 * ````
 *
 * A byte is only reported as consumed once its whole effect has been applied:
 * a byte that merely shifts the decoder state (the lead of a double-byte
 * sequence, a byte inside an escape sequence) is consumed immediately, while
 * a byte that obligates output is consumed together with that output. It
 * follows that a suspended call can always be resumed by feeding the bytes
 * past `bytes_consumed` again, with no other bookkeeping.
 *
 * Decoding never fails: malformed input is substituted with U+FFFD and the
 * decoder resynchronizes by itself (see the codec documentation for the exact
 * recovery mode per encoding). `NeedMoreOutput` is likewise not an error but
 * an ordinary, resumable condition.
 *
 * A decoder instance is exclusively owned by whichever reader drives its
 * stream; it is `Send` but performs no internal synchronization, so sharing
 * a live instance across threads requires an external lock. The index tables
 * behind the decoders are immutable statics and freely shared.
 */

/// The Unicode replacement character, substituted for any unmappable input.
pub const REPLACEMENT: char = '\u{fffd}';

/// Status of a single `convert` call.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DecodeStatus {
    /// Every input byte has been consumed.
    Ok,
    /// The output buffer filled up before the input was exhausted.
    /// The cursors returned alongside report the exact progress;
    /// feeding the unconsumed remainder of the input continues the stream.
    NeedMoreOutput,
}

/// Decoder converting a byte sequence into Unicode code points.
/// This is a lower level interface, and normally `Encoding::decode` should be used instead.
pub trait Decoder: 'static {
    /// Creates a fresh `Decoder` instance which parameters are same as `self`.
    fn from_self(&self) -> Box<dyn Decoder>;

    /// Feeds given portion of byte sequence to the decoder and writes decoded
    /// code points to the front of `output`, stopping early when `output` is
    /// full. Returns the number of bytes consumed, the number of code points
    /// produced, and the call status.
    ///
    /// Postconditions: `bytes_consumed <= input.len()`;
    /// `code_points_produced <= output.len()`; on `DecodeStatus::Ok` the
    /// whole input was consumed. No code point is ever partially written,
    /// and a multi-code-point burst (see the ISO-2022-JP escape recovery)
    /// is written wholly or not at all.
    fn convert(&mut self, input: &[u8], output: &mut [char]) -> (usize, usize, DecodeStatus);

    /// Returns the decoder to the initial state of its encoding,
    /// discarding any partially seen sequence without substituting it.
    fn reset(&mut self);

    /// A fast upper bound on the number of code points `convert` can produce
    /// for `input_len` further input bytes, independent of the current state.
    /// Useful for sizing the output buffer so that a single call suffices.
    fn max_output_for(&self, input_len: usize) -> usize {
        input_len
    }

    /// A test-friendly interface to `convert`: feeds the whole input through
    /// a deliberately small output buffer, resuming on `NeedMoreOutput`, so
    /// that every ordinary test also exercises suspension. Internal use only.
    #[cfg(test)]
    fn test_feed(&mut self, input: &[u8]) -> String {
        // the largest single burst is four code points, so this can never stall
        self.test_feed_sized(input, 4)
    }

    /// Like `test_feed` with an explicit buffer size. Internal use only.
    #[cfg(test)]
    fn test_feed_sized(&mut self, input: &[u8], bufsize: usize) -> String {
        assert!(bufsize >= 4, "a smaller buffer can stall on an escape burst");
        let mut buf = vec![REPLACEMENT; bufsize];
        let mut decoded = String::new();
        let mut remaining = input;
        loop {
            let (read, written, status) = self.convert(remaining, &mut buf);
            decoded.extend(&buf[..written]);
            remaining = &remaining[read..];
            match status {
                DecodeStatus::Ok => {
                    assert!(remaining.is_empty());
                    return decoded;
                }
                DecodeStatus::NeedMoreOutput => {}
            }
        }
    }
}

/// A trait object using dynamic dispatch which is a sendable reference to the encoding,
/// for code where the encoding is not known at compile-time.
pub type EncodingRef = &'static (dyn Encoding + Send + Sync);

/// Character encoding.
pub trait Encoding {
    /// Returns the canonical name of given encoding.
    /// This name is guaranteed to be unique across built-in encodings,
    /// but it is not normative and would be at most arbitrary.
    fn name(&self) -> &'static str;

    /// Returns a name of given encoding defined in the WHATWG Encoding standard, if any.
    /// This name often differs from `name` due to the compatibility reason.
    fn whatwg_name(&self) -> Option<&'static str> {
        None
    }

    /// Creates a new decoder.
    fn raw_decoder(&self) -> Box<dyn Decoder>;

    /// An easy-to-use interface to `Decoder`: decodes the whole byte sequence
    /// at once. Malformed input comes out as U+FFFD, so this cannot fail.
    fn decode(&self, input: &[u8]) -> String {
        let mut decoder = self.raw_decoder();
        let mut buf = [REPLACEMENT; 64];
        let mut decoded = String::new();
        let mut remaining = input;
        loop {
            let (read, written, status) = decoder.convert(remaining, &mut buf);
            decoded.extend(&buf[..written]);
            remaining = &remaining[read..];
            match status {
                DecodeStatus::Ok => return decoded,
                DecodeStatus::NeedMoreOutput => {}
            }
        }
    }
}
