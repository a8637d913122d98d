//! Mock I2C implementation for testing

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::{I2cConfig, I2cInterface},
    Result,
};
use core::cell::{Cell, RefCell};
use heapless::Vec;

/// Maximum payload bytes recorded per transaction
pub const MAX_TXN_DATA: usize = 32;

/// Maximum transactions recorded per test
pub const MAX_TRANSACTIONS: usize = 64;

/// Maximum bytes of pre-programmed read data
pub const MAX_READ_DATA: usize = 128;

/// I2C transaction record for test verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cTransaction {
    /// Write transaction
    Write {
        addr: u8,
        data: Vec<u8, MAX_TXN_DATA>,
    },
    /// Read transaction
    Read { addr: u8, len: usize },
    /// Write-read transaction
    WriteRead {
        addr: u8,
        write_data: Vec<u8, MAX_TXN_DATA>,
        read_len: usize,
    },
}

/// Mock I2C implementation
///
/// Records all transactions and serves pre-programmed read bytes in FIFO
/// order. Writes can be made to fail to exercise error paths; failed writes
/// are still recorded, since tests care about attempted traffic.
#[derive(Debug)]
pub struct MockI2c {
    config: I2cConfig,
    transactions: RefCell<Vec<I2cTransaction, MAX_TRANSACTIONS>>,
    read_data: RefCell<Vec<u8, MAX_READ_DATA>>,
    fail_writes: Cell<bool>,
}

impl MockI2c {
    /// Create a new mock I2C bus
    pub fn new(config: I2cConfig) -> Self {
        Self {
            config,
            transactions: RefCell::new(Vec::new()),
            read_data: RefCell::new(Vec::new()),
            fail_writes: Cell::new(false),
        }
    }

    /// Get the transaction log
    pub fn transactions(&self) -> Vec<I2cTransaction, MAX_TRANSACTIONS> {
        self.transactions.borrow().clone()
    }

    /// Number of recorded transactions
    pub fn transaction_count(&self) -> usize {
        self.transactions.borrow().len()
    }

    /// Clear the transaction log
    pub fn clear_transactions(&self) {
        self.transactions.borrow_mut().clear();
    }

    /// Append bytes to be returned by subsequent read operations
    pub fn queue_read_data(&self, data: &[u8]) {
        let mut queued = self.read_data.borrow_mut();
        for &byte in data {
            if queued.push(byte).is_err() {
                break;
            }
        }
    }

    /// Make every write transaction fail with a NACK
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Get the configured bus frequency
    pub fn frequency(&self) -> u32 {
        self.config.frequency
    }

    fn record(&self, txn: I2cTransaction) {
        // Dropping beyond capacity would hide traffic from the assertions
        assert!(
            self.transactions.borrow_mut().push(txn).is_ok(),
            "mock i2c transaction log full"
        );
    }

    fn serve_read(&self, buffer: &mut [u8]) {
        let mut queued = self.read_data.borrow_mut();
        let n = core::cmp::min(buffer.len(), queued.len());
        buffer[..n].copy_from_slice(&queued[..n]);
        // Drain the served bytes from the front
        let remaining: Vec<u8, MAX_READ_DATA> = queued[n..].iter().copied().collect();
        *queued = remaining;
    }
}

impl I2cInterface for MockI2c {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.record(I2cTransaction::Write {
            addr,
            data: data.iter().copied().collect(),
        });
        if self.fail_writes.get() {
            return Err(PlatformError::I2c(I2cError::Nack));
        }
        Ok(())
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()> {
        self.record(I2cTransaction::Read {
            addr,
            len: buffer.len(),
        });
        self.serve_read(buffer);
        Ok(())
    }

    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        self.record(I2cTransaction::WriteRead {
            addr,
            write_data: write_data.iter().copied().collect(),
            read_len: read_buffer.len(),
        });
        if self.fail_writes.get() {
            return Err(PlatformError::I2c(I2cError::Nack));
        }
        self.serve_read(read_buffer);
        Ok(())
    }
}
