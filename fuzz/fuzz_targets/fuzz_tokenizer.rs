#![no_main]
use std::io::{self, Read};

use arbitrary::Arbitrary;
use bytescan::{ByteSet, Escaper, Stop, Tokenizer};
use libfuzzer_sys::fuzz_target;

/// One fuzz case: the input bytes, a chunking seed for the reader, and the
/// scanning configuration to drive.
#[derive(Debug, Arbitrary)]
struct Plan {
    data: Vec<u8>,
    chunk_seed: u64,
    skipping: bool,
    delimiters: Vec<u8>,
    escapable: Vec<u8>,
}

/// Reader that delivers `data` in deterministic, seed-derived chunk sizes,
/// as small as one byte per call.
struct ChunkedReader {
    data: Vec<u8>,
    pos: usize,
    seed: u64,
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos == self.data.len() {
            return Ok(0);
        }
        self.seed = self.seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let n = (self.seed % 9 + 1) as usize;
        let n = n.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Runs a fixed scan program and materializes every run as owned bytes.
fn scan<R: Read>(mut tok: Tokenizer<R>, plan: &Plan) -> Vec<(Vec<u8>, Stop)> {
    tok.set_skipping(plan.skipping);
    let delim = ByteSet::new(&plan.delimiters);
    let field = delim.complement();
    let esc = Escaper::new(&plan.escapable);

    let mut out = Vec::new();
    let mut spans = Vec::new();
    loop {
        let run = tok.take_esc(&field, &esc);
        spans.push(run.span);
        out.push((tok[run.span].to_vec(), run.stop));
        let sep = tok.take(&delim);
        spans.push(sep.span);
        out.push((tok[sep.span].to_vec(), sep.stop));
        if tok.complete() || tok.err().is_some() {
            break;
        }
    }
    // Every span must still resolve to the same bytes it was minted with.
    for (span, (bytes, _)) in spans.iter().zip(&out) {
        assert_eq!(&tok[*span], bytes.as_slice());
    }
    assert!(tok.err().is_none());
    out
}

fuzz_target!(|plan: Plan| {
    let whole = scan(Tokenizer::from_bytes(plan.data.clone()), &plan);
    let chunked = scan(
        Tokenizer::new(ChunkedReader {
            data: plan.data.clone(),
            pos: 0,
            seed: plan.chunk_seed,
        }),
        &plan,
    );
    assert_eq!(whole, chunked);
});
