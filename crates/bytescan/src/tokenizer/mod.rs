//! Tokenizer: growable buffer, cursor machinery, and the scanning loop.
//!
//! Buffering model
//! - `buf` holds every byte pulled from the source since the last
//!   compaction; `filled` marks how much of it is real data and `pos` is
//!   the scan position, with `pos <= filled` at all times. The commit
//!   point established by [`Tokenizer::reset`] is always index zero,
//!   because reset compacts before handing the buffer back.
//! - Refills only ever append at `filled` or reallocate-and-copy the whole
//!   buffer, so bytes in `buf[..pos]` are never rewritten between resets,
//!   except inside the span a single in-progress [`Tokenizer::take_esc`]
//!   call is itself producing.
//! - [`Tokenizer::reset`] compacts: the unread suffix moves down to index
//!   zero and both cursors rewind, which bounds memory for reset-delimited
//!   record loops.
//!
//! Spans instead of borrows
//! - Scans return [`Span`] index pairs rather than `&[u8]`, because the
//!   borrow checker cannot keep several scan results alive across further
//!   `&mut self` calls. Spans resolve through [`Tokenizer::bytes`] (or
//!   indexing) by shared borrow, so any number of resolved views coexist.
//! - Each span is stamped with the generation current when it was minted;
//!   `reset` bumps the generation, and resolving a stale span is a contract
//!   violation caught by a debug assertion.

use core::fmt;
use core::ops::Index;
use std::io::{self, Read};

use bstr::ByteSlice;

use crate::{ByteSet, ESCAPE_MARKER, Escaper, ScanError};


/// Refill unit: each pull from the source asks for at least this many bytes
/// of headroom (the `std::io::BufReader` default chunk).
pub const MIN_READ: usize = 8192;

/// A token's location inside a tokenizer's buffer.
///
/// Spans are minted by [`Tokenizer::take`] and [`Tokenizer::take_esc`] and
/// stay resolvable until the next [`Tokenizer::reset`]. They are plain
/// copyable values; holding one allocates nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    start: usize,
    end: usize,
    generation: u32,
}

impl Span {
    /// Length of the token in bytes (after escape decoding, if any).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Reports whether the token is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Why a scan stopped consuming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// The next byte is not permitted by the requested set; it remains
    /// unconsumed for the caller to inspect.
    Excluded,
    /// The source reached end-of-data.
    End,
    /// The source reported a hard error; see [`Tokenizer::err`].
    Error,
}

/// The result of one scanning call: the consumed token plus the reason the
/// run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Where the token's bytes live; possibly empty.
    pub span: Span,
    /// Why consumption stopped.
    pub stop: Stop,
}

/// A tokenizer over an incrementally read byte source.
///
/// See the [crate docs](crate) for the scanning model and the span lifetime
/// contract. A tokenizer is single-threaded and non-reentrant; only the
/// refill path blocks, and only for as long as the underlying reader does.
pub struct Tokenizer<R> {
    src: R,
    buf: Vec<u8>,
    /// Bytes of `buf` that hold real data; the rest is reusable headroom.
    filled: usize,
    /// Scan position (end of data consumed since the last reset); the
    /// uncommitted region is `buf[..pos]`.
    pos: usize,
    /// The source signaled end-of-data; sticky.
    eof: bool,
    err: Option<ScanError>,
    complete: bool,
    skipping: bool,
    generation: u32,
}

impl<R: Read> Tokenizer<R> {
    /// Creates a tokenizer that pulls bytes from `src` on demand.
    ///
    /// The source may deliver as little as one byte per read; short reads
    /// are looped over, `ErrorKind::Interrupted` is retried, and the first
    /// hard error is latched (see [`err`](Self::err)).
    pub fn new(src: R) -> Self {
        Tokenizer {
            src,
            buf: Vec::new(),
            filled: 0,
            pos: 0,
            eof: false,
            err: None,
            complete: false,
            skipping: false,
            generation: 0,
        }
    }

    /// Guarantees that at least `n` unconsumed bytes are buffered at the
    /// scan position, pulling from the source as needed.
    ///
    /// Returns `false` when the source can never supply `n` bytes because
    /// it ended or failed; in that case [`complete`](Self::complete) is set
    /// if nothing unconsumed remains.
    pub fn ensure(&mut self, n: usize) -> bool {
        loop {
            let have = self.filled - self.pos;
            if have >= n {
                return true;
            }
            if !self.fill(n - have) {
                if self.pos == self.filled {
                    self.complete = true;
                }
                return false;
            }
        }
    }

    /// Pulls one read's worth of bytes, growing the buffer so at least
    /// `need` bytes of headroom exist. Returns `false` once the source is
    /// exhausted or broken.
    fn fill(&mut self, need: usize) -> bool {
        if self.eof || self.err.is_some() {
            return false;
        }
        let want = need.max(MIN_READ);
        if self.buf.len() - self.filled < want {
            // Vec growth reallocates and copies, so outstanding spans keep
            // pointing at live, unchanged bytes.
            self.buf.resize(self.filled + want, 0);
        }
        loop {
            match self.src.read(&mut self.buf[self.filled..]) {
                Ok(0) => {
                    self.eof = true;
                    return false;
                }
                Ok(n) => {
                    self.filled += n;
                    return true;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.err = Some(ScanError::Read(e));
                    return false;
                }
            }
        }
    }

    /// Peeks the byte `i` positions ahead of the scan position without
    /// consuming it, buffering as needed.
    ///
    /// Returns `None` when fewer than `i + 1` bytes can ever be supplied
    /// (end-of-data or a latched error).
    pub fn at(&mut self, i: usize) -> Option<u8> {
        if !self.ensure(i + 1) {
            return None;
        }
        Some(self.buf[self.pos + i])
    }

    /// Consumes the maximal run of bytes in `set` starting at the scan
    /// position.
    ///
    /// Stops at the first byte outside the set (left unconsumed) or when
    /// the source ends. At end-of-data the run is empty and repeated calls
    /// stay empty; successive calls without a reset return disjoint,
    /// adjacent spans that all remain resolvable.
    pub fn take(&mut self, set: &ByteSet) -> Run {
        let start = self.pos;
        let stop = loop {
            if !self.ensure(1) {
                break self.stop_reason();
            }
            let mut i = self.pos;
            while i < self.filled && set.contains(self.buf[i]) {
                i += 1;
            }
            let drained = i == self.filled;
            self.pos = i;
            if !drained {
                break Stop::Excluded;
            }
        };
        Run {
            span: self.span_from(start),
            stop,
        }
    }

    /// Like [`take`](Self::take), but decodes backslash escapes.
    ///
    /// For a marker byte followed by `c`: if `c` is a target in `esc`, the
    /// decoded literal is emitted and both bytes are consumed; otherwise if
    /// `c` is in `set`, both bytes pass through unchanged; otherwise the
    /// marker passes through alone and the run stops with `c` unconsumed.
    /// A marker as the very last byte of input is emitted literally.
    ///
    /// Decoding compacts in place with a write cursor trailing the read
    /// cursor, confined to the span this call produces, so the returned
    /// span may be shorter than the raw bytes consumed. With
    /// [`skipping`](Self::skipping) set, the same consume/stop decisions
    /// are made but nothing is decoded: the span covers the raw bytes,
    /// markers intact.
    pub fn take_esc(&mut self, set: &ByteSet, esc: &Escaper) -> Run {
        let start = self.pos;
        let mut w = self.pos;
        let stop = loop {
            if !self.ensure(1) {
                break self.stop_reason();
            }
            let b = self.buf[self.pos];
            if b != ESCAPE_MARKER {
                if !set.contains(b) {
                    break Stop::Excluded;
                }
                if !self.skipping && w < self.pos {
                    self.buf[w] = b;
                }
                w += 1;
                self.pos += 1;
                continue;
            }
            if !self.ensure(2) {
                // Lone trailing marker: taken as a literal.
                if !self.skipping && w < self.pos {
                    self.buf[w] = b;
                }
                w += 1;
                self.pos += 1;
                self.complete = true;
                break self.stop_reason();
            }
            let c = self.buf[self.pos + 1];
            if let Some(literal) = esc.decode(c) {
                if !self.skipping {
                    self.buf[w] = literal;
                }
                w += 1;
                self.pos += 2;
            } else if set.contains(c) {
                // Unrecognized escape: both bytes pass through untouched.
                if !self.skipping && w < self.pos {
                    self.buf[w] = b;
                    self.buf[w + 1] = c;
                }
                w += 2;
                self.pos += 2;
            } else {
                // The marker precedes a byte we can neither decode nor
                // accept: keep the marker, leave `c` for the next call.
                if !self.skipping && w < self.pos {
                    self.buf[w] = b;
                }
                w += 1;
                self.pos += 1;
                break Stop::Excluded;
            }
        };
        let end = if self.skipping { self.pos } else { w };
        Run {
            span: Span {
                start,
                end,
                generation: self.generation,
            },
            stop,
        }
    }

    fn stop_reason(&self) -> Stop {
        if self.err.is_some() {
            Stop::Error
        } else {
            Stop::End
        }
    }
}

impl Tokenizer<io::Empty> {
    /// Creates a tokenizer over bytes that are already fully available; the
    /// source is never consulted.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let buf = bytes.into();
        let filled = buf.len();
        Tokenizer {
            src: io::empty(),
            buf,
            filled,
            pos: 0,
            eof: true,
            err: None,
            complete: false,
            skipping: false,
            generation: 0,
        }
    }
}

impl<R> Tokenizer<R> {
    /// Moves the scan position forward by `n` bytes.
    ///
    /// `n` must not exceed the buffered, unconsumed length; going past it
    /// is a contract violation (debug-asserted), not a recoverable state.
    /// Typically used right after [`at`](Self::at) to skip one delimiter.
    pub fn advance(&mut self, n: usize) {
        debug_assert!(
            n <= self.filled - self.pos,
            "advance past buffered data ({n} > {})",
            self.filled - self.pos
        );
        self.pos += n;
    }

    /// Commits the current position and releases everything scanned since
    /// the previous reset.
    ///
    /// The unread suffix is compacted down to the start of the buffer and
    /// both cursors rewind to zero. Spans minted before the reset must not
    /// be resolved afterwards; debug builds assert this.
    pub fn reset(&mut self) {
        if self.pos > 0 {
            self.buf.copy_within(self.pos..self.filled, 0);
            self.filled -= self.pos;
            self.pos = 0;
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Resolves a span to the bytes it covers.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `span` was minted before the last
    /// [`reset`](Self::reset).
    #[must_use]
    pub fn bytes(&self, span: Span) -> &[u8] {
        debug_assert_eq!(
            span.generation, self.generation,
            "span resolved after reset"
        );
        &self.buf[span.start..span.end]
    }

    /// True once the source is exhausted and every buffered byte has been
    /// consumed; sticky. A latched hard error counts as exhaustion.
    #[must_use]
    pub fn complete(&self) -> bool {
        self.complete
    }

    /// The first hard error reported by the source, if any; sticky.
    #[must_use]
    pub fn err(&self) -> Option<&ScanError> {
        self.err.as_ref()
    }

    /// Whether [`take_esc`](Self::take_esc) skips the decode transform.
    #[must_use]
    pub fn skipping(&self) -> bool {
        self.skipping
    }

    /// Turns the decode fast path on or off: when skipping,
    /// [`take_esc`](Self::take_esc) returns raw, still-escaped bytes.
    pub fn set_skipping(&mut self, skipping: bool) {
        self.skipping = skipping;
    }

    fn span_from(&self, start: usize) -> Span {
        Span {
            start,
            end: self.pos,
            generation: self.generation,
        }
    }
}

impl<R> Index<Span> for Tokenizer<R> {
    type Output = [u8];

    fn index(&self, span: Span) -> &[u8] {
        self.bytes(span)
    }
}

impl<R> fmt::Debug for Tokenizer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("pos", &self.pos)
            .field("pending", &self.buf[self.pos..self.filled].as_bstr())
            .field("complete", &self.complete)
            .field("err", &self.err)
            .field("skipping", &self.skipping)
            .finish_non_exhaustive()
    }
}
