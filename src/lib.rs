//! QJSON to JSON decoder.
//!
//! QJSON is a permissive superset of JSON meant to be written by hand:
//! braces around the root object are optional, identifiers may be
//! unquoted, strings may use single quotes or backtick multiline
//! blocks, comments are allowed, and values may be arithmetic or
//! temporal expressions (`3*1024`, `1h 30m`, `2021-06-01T10:00`),
//! boolean synonyms (`yes`, `off`) or null.
//!
//! [`decode`] converts a QJSON byte buffer into a strict JSON byte
//! buffer in one pass, or reports the first error with its exact line
//! and column.
//!
//! # Architecture
//!
//! - UTF-8 helpers validate input bytes through a class table; every
//!   scanner position is tracked in code points for error reporting.
//! - The tokenizer yields delimiters and string tokens borrowed from
//!   the input.
//! - Quoteless values that look numeric are re-tokenized and folded by
//!   a precedence-climbing evaluator.
//! - The document builder drives the tokenizer, bounds the nesting
//!   depth, and writes escaped JSON into the only owned buffer.
//!
//! # Example
//!
//! ```
//! let json = qjson::decode(b"server: {host: localhost, retry: 3, timeout: 2m 30s}").unwrap();
//! assert_eq!(
//!     std::str::from_utf8(&json).unwrap(),
//!     r#"{"server":{"host":"localhost","retry":3,"timeout":150}}"#
//! );
//! ```

// Library code propagates every failure as a value; panicking paths are
// reserved for tests.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

mod engine;
mod error;
mod number;
mod token;
mod tokenizer;
mod utf8;

pub use engine::{decode, decode_with_max_depth, MAX_DEPTH};
pub use error::{DecodeError, ErrorKind};

/// The crate version, fixed at build time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
