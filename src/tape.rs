//! Implementations of the BF tape

use crate::{settings::TapePolicy, BfNum, TapeAddr, TapeAddrError};

/// Number of cells on the tape.
pub const TAPE_SIZE: usize = 30000;

/// A trait implementing a tape for the BF program memory
pub trait Tape {
    fn try_get(&self, offset: TapeAddr) -> Result<BfNum, TapeAddrError>;
    fn try_set(&mut self, offset: TapeAddr, value: BfNum) -> Result<(), TapeAddrError>;
    fn try_modify(&mut self, offset: TapeAddr, diff: BfNum) -> Result<(), TapeAddrError>;

    /// All cells, in address order.
    fn cells(&self) -> &[BfNum];
}

/// A fixed size tape of [`TAPE_SIZE`] zero initialised cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTape {
    data: Box<[BfNum]>,
    policy: TapePolicy,
}

impl FixedTape {
    pub fn new() -> Self {
        Self::with_policy(TapePolicy::default())
    }

    pub fn with_policy(policy: TapePolicy) -> Self {
        Self {
            data: vec![BfNum::ZERO; TAPE_SIZE].into_boxed_slice(),
            policy,
        }
    }

    /// Zero every cell.
    pub fn reset(&mut self) {
        self.data.fill(BfNum::ZERO);
    }

    fn index(&self, offset: TapeAddr) -> Result<usize, TapeAddrError> {
        match self.policy {
            TapePolicy::Fail => {
                let idx: usize = offset.try_into()?;
                if idx >= self.data.len() {
                    return Err(TapeAddrError::TapeAddrTooLarge);
                }
                Ok(idx)
            }
            TapePolicy::Wrap => {
                Ok(i64::from(offset).rem_euclid(self.data.len() as i64) as usize)
            }
        }
    }
}

impl Default for FixedTape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape for FixedTape {
    fn try_get(&self, offset: TapeAddr) -> Result<BfNum, TapeAddrError> {
        let idx = self.index(offset)?;
        Ok(self.data[idx])
    }

    fn try_set(&mut self, offset: TapeAddr, value: BfNum) -> Result<(), TapeAddrError> {
        let idx = self.index(offset)?;
        self.data[idx] = value;
        Ok(())
    }

    fn try_modify(&mut self, offset: TapeAddr, diff: BfNum) -> Result<(), TapeAddrError> {
        let idx = self.index(offset)?;
        self.data[idx] += diff;
        Ok(())
    }

    fn cells(&self) -> &[BfNum] {
        &self.data
    }
}
