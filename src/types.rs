//! Fundamental data types used throughout brainscan

use std::{
    fmt::Display,
    num::Wrapping,
    ops::{AddAssign, SubAssign},
};
use thiserror::Error;

/// Error type for tape accesses
#[derive(Debug, Clone, Copy, Error, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum TapeAddrError {
    /// The cursor is left of the first cell.
    #[error("Tape pointer moved too far left (before start of tape)")]
    TapeAddrIsNegative,
    /// The cursor is right of the last cell.
    #[error("Tape pointer moved too far to the right (past end of tape)")]
    TapeAddrTooLarge,
}

/// Newtype for the tape cursor.
///
/// Moving the cursor is never checked, it behaves like pointer arithmetic.
/// Only dereferencing it through a [`crate::tape::Tape`] is.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct TapeAddr(pub i64);

impl TapeAddr {
    pub fn new(val: i64) -> Self {
        Self(val)
    }
}

impl From<i32> for TapeAddr {
    fn from(value: i32) -> Self {
        Self(value as i64)
    }
}

impl From<TapeAddr> for i64 {
    fn from(value: TapeAddr) -> Self {
        value.0
    }
}

impl TryFrom<TapeAddr> for usize {
    type Error = TapeAddrError;

    fn try_from(value: TapeAddr) -> Result<Self, Self::Error> {
        if value.0 < 0 {
            Err(TapeAddrError::TapeAddrIsNegative)
        } else {
            Ok(value.0 as Self)
        }
    }
}

impl AddAssign for TapeAddr {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.wrapping_add(rhs.0);
    }
}

impl SubAssign for TapeAddr {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.wrapping_sub(rhs.0);
    }
}

impl Display for TapeAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tape cell: a signed byte with wrapping semantics, like a C `char`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct BfNum(Wrapping<i8>);

impl BfNum {
    pub const ZERO: BfNum = BfNum(Wrapping(0));
    pub const ONE: BfNum = BfNum(Wrapping(1));

    pub fn is_zero(&self) -> bool {
        self.0 .0 == 0
    }

    /// The raw byte, as written to an output stream.
    pub fn as_byte(&self) -> u8 {
        self.0 .0 as u8
    }
}

impl AddAssign for BfNum {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl From<i8> for BfNum {
    fn from(value: i8) -> Self {
        Self(Wrapping(value))
    }
}

impl From<u8> for BfNum {
    fn from(value: u8) -> Self {
        Self(Wrapping(value as i8))
    }
}

impl From<BfNum> for i8 {
    fn from(value: BfNum) -> Self {
        value.0 .0
    }
}

impl Display for BfNum {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
