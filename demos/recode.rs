// This is a part of jconv.
// Copyright (c) 2026, jconv developers.
// See README.md and LICENSE.txt for details.

//! Converts legacy Japanese text to UTF-8 with the incremental interface.

use std::fs::File;
use std::io::{self, Read, Write};
use std::process;

use getopts::Options;

use jconv::all;
use jconv::{DecodeStatus, Decoder, EncodingRef, REPLACEMENT};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut opts = Options::new();
    opts.optopt("f", "from-code", "set input encoding", "NAME");
    opts.optopt("o", "output", "output file", "FILE");
    opts.optflag("h", "help", "print this help menu");

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };
    if matches.opt_present("h") {
        print!("{}", opts.usage("Converts legacy Japanese text to UTF-8 using jconv."));
        return;
    }

    let inenc = match matches.opt_str("f").as_deref() {
        Some("shift_jis") | None => all::SHIFT_JIS as EncodingRef,
        Some("euc-jp") => all::EUC_JP as EncodingRef,
        Some("iso-2022-jp") => all::ISO_2022_JP as EncodingRef,
        Some(name) => {
            eprintln!("invalid input encoding name {}", name);
            process::exit(2);
        }
    };

    let mut input: Box<dyn Read> = match matches.free.first().map(|s| &s[..]) {
        Some("-") | None => Box::new(io::stdin()),
        Some(f) => match File::open(f) {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!("cannot open {}: {}", f, e);
                process::exit(1);
            }
        },
    };
    let mut output: Box<dyn Write> = match matches.opt_str("o").as_deref() {
        Some("-") | None => Box::new(io::stdout()),
        Some(f) => match File::create(f) {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!("cannot create {}: {}", f, e);
                process::exit(1);
            }
        },
    };

    let mut decoder = inenc.raw_decoder();
    if let Err(e) = recode(&mut *decoder, &mut *input, &mut *output) {
        eprintln!("recode error: {}", e);
        process::exit(1);
    }
}

/// The conversion loop: reads arbitrary chunks, decodes them through a
/// bounded buffer, and flushes the decoded part whenever the decoder asks
/// for more output space.
fn recode(
    decoder: &mut dyn Decoder,
    input: &mut dyn Read,
    output: &mut dyn Write,
) -> io::Result<()> {
    let mut inbuf = [0u8; 4096];
    // deliberately smaller than a whole chunk can decode to, so that the
    // NeedMoreOutput path is ordinary rather than exceptional
    let mut outbuf = vec![REPLACEMENT; decoder.max_output_for(64)];
    let mut decoded = String::new();

    loop {
        let n = input.read(&mut inbuf)?;
        if n == 0 {
            break;
        }
        let mut chunk = &inbuf[..n];
        loop {
            let (read, written, status) = decoder.convert(chunk, &mut outbuf);
            decoded.clear();
            decoded.extend(&outbuf[..written]);
            output.write_all(decoded.as_bytes())?;
            chunk = &chunk[read..];
            match status {
                DecodeStatus::Ok => break,
                DecodeStatus::NeedMoreOutput => {}
            }
        }
    }
    // the stream ends here; drop any truncated sequence and leave the
    // decoder ready for another stream
    decoder.reset();
    output.flush()
}
