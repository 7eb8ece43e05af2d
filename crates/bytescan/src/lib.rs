//! Low-level lexical scanner for escaped, delimiter-structured byte records.
//!
//! The crate provides the tokenizing kernel beneath a line-oriented record
//! parser: a caller repeatedly asks for "the next run of bytes belonging to
//! set *S*, with backslash escapes decoded" and interprets the returned bytes
//! as protocol fields. Three pieces cooperate:
//!
//! - [`ByteSet`]: an immutable 256-value membership predicate.
//! - [`Escaper`]: an immutable table mapping escape-target bytes back to the
//!   literal bytes they stand for.
//! - [`Tokenizer`]: a growable buffer plus cursor over any [`std::io::Read`]
//!   source, exposing [`take`](Tokenizer::take) and
//!   [`take_esc`](Tokenizer::take_esc).
//!
//! Tokens are never copied out: a scan returns a [`Span`] indexing into the
//! tokenizer's internal buffer, resolved on demand with
//! [`Tokenizer::bytes`] or plain indexing. Every span minted since the last
//! [`reset`](Tokenizer::reset) stays valid and byte-for-byte unchanged, no
//! matter how much more input is pulled in the meantime; `reset` commits the
//! current position and lets the tokenizer reclaim the memory behind earlier
//! spans.
//!
//! ```
//! use bytescan::{ByteSet, Escaper, Tokenizer};
//!
//! let mut tok = Tokenizer::from_bytes(&br"weather,site=hall\ 5 temp=21.5"[..]);
//!
//! let delim = ByteSet::new(b", ");
//! let measurement = tok.take(&delim.complement());
//! assert_eq!(&tok[measurement.span], b"weather");
//!
//! assert_eq!(tok.at(0), Some(b','));
//! tok.advance(1);
//!
//! let esc = Escaper::new(b" ,=");
//! let bare = ByteSet::new(b" ,=").complement();
//! let key = tok.take_esc(&bare, &esc);
//! assert_eq!(&tok[key.span], b"site");
//! tok.advance(1); // '='
//!
//! // The escaped space decodes in place; the span covers the decoded bytes.
//! let value = tok.take_esc(&bare, &esc);
//! assert_eq!(&tok[value.span], b"hall 5");
//!
//! // Commit the record; spans taken above must not be resolved after this.
//! tok.reset();
//! ```

mod byte_set;
mod error;
mod escape;
mod tokenizer;

pub use byte_set::ByteSet;
pub use error::ScanError;
pub use escape::{ESCAPE_MARKER, Escaper};
pub use tokenizer::{MIN_READ, Run, Span, Stop, Tokenizer};
