//! Target-independent wire operations produced by the emitter.
//!
//! All encodings are little-endian. Length prefixes are `uint32`.

use crate::defaults::Constructor;

/// Little-endian struct pattern with run-length compression (`iii` becomes `3i`).
///
/// The encoded size is tracked as runs are added; additions that would
/// overflow it are refused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructFormat {
    runs: Vec<(char, usize)>,
    size: usize,
}

impl StructFormat {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single value of `code`.
    pub fn single(code: char) -> Self {
        Self {
            runs: vec![(code, 1)],
            size: code_size(code),
        }
    }

    /// `count` consecutive values of `code`, or `None` if the size overflows.
    pub fn repeated(code: char, count: usize) -> Option<Self> {
        let mut format = Self::new();
        format.push_n(code, count)?;
        Some(format)
    }

    /// A byte string of `len` bytes (`{len}s`).
    pub fn bytes(len: usize) -> Self {
        Self {
            runs: vec![('s', len)],
            size: len,
        }
    }

    pub fn push(&mut self, code: char) -> Option<()> {
        self.push_n(code, 1)
    }

    /// Append `count` values of `code`. Returns `None`, leaving the format
    /// unchanged, if the encoded size would overflow.
    pub fn push_n(&mut self, code: char, count: usize) -> Option<()> {
        let size = code_size(code)
            .checked_mul(count)
            .and_then(|added| self.size.checked_add(added))?;
        match self.runs.last_mut() {
            Some((last, n)) if *last == code && code != 's' => *n = n.checked_add(count)?,
            _ => self.runs.push((code, count)),
        }
        self.size = size;
        Some(())
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Pattern without the byte-order prefix, e.g. `2Ii`.
    pub fn pattern(&self) -> String {
        self.runs
            .iter()
            .map(|&(code, n)| {
                if n == 1 {
                    code.to_string()
                } else {
                    format!("{n}{code}")
                }
            })
            .collect()
    }

    /// Encoded size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }
}

fn code_size(code: char) -> usize {
    match code {
        'h' | 'H' => 2,
        'i' | 'I' | 'f' => 4,
        'q' | 'Q' | 'd' => 8,
        _ => 1,
    }
}

/// How a length-prefixed payload is taken from its variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Text, encoded before writing.
    Utf8,
    /// A byte string written as is.
    Bytes,
    /// A list of integers written as unsigned bytes.
    ByteList,
}

/// Destination of a fixed-width read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unpack {
    /// One variable per value, in order.
    Fields(Vec<String>),
    /// The whole tuple into one variable.
    Whole(String),
}

/// Iteration count of a [`WireOp::Collect`] loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    /// The most recently read length prefix.
    Length,
    Fixed(usize),
}

/// A single serialization or deserialization step.
///
/// Deserialization steps advance a `start`/`end` cursor pair through the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireOp {
    Comment(String),
    /// Store the runtime length of `var` as the current length.
    MeasureLength { var: String },
    WriteFixed { format: StructFormat, args: Vec<String> },
    /// Write the current length followed by the payload of `var`.
    WriteLengthPrefixed { var: String, payload: Payload },
    /// Write `length` elements of `var` with the given struct code.
    WritePacked { var: String, code: char },
    ReadFixed { format: StructFormat, into: Unpack },
    /// Read `length` elements with the given struct code into `var`.
    ReadPacked { var: String, code: char },
    /// Read `length` raw bytes into `var`.
    ReadLengthPrefixed { var: String },
    /// Read exactly `len` raw bytes into `var`.
    ReadBytes { var: String, len: usize },
    /// Pick a branch at runtime depending on whether `var` is a list/tuple.
    BranchOnContainerKind {
        var: String,
        sequence: Vec<WireOp>,
        otherwise: Vec<WireOp>,
    },
    /// Initialize `var` when it has no value yet.
    Construct { var: String, constructor: Constructor },
    /// Evaluate a post-deserialize expression.
    Normalize { expr: String },
    CoerceBool { var: String, elementwise: bool },
    /// Reject a fixed-size array of the wrong length before writing it.
    CheckLength { var: String, len: usize },
    ForEach {
        var: String,
        item: String,
        body: Vec<WireOp>,
    },
    /// Build `var` as a list of `count` items, each produced by `body`.
    Collect {
        var: String,
        item: String,
        count: Count,
        constructor: Option<Constructor>,
        body: Vec<WireOp>,
    },
}
