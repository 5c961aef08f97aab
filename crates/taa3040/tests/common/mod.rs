//! Register-file bus shared by the integration tests.
//!
//! Behaves like the TAA3040's register interface: the first written byte sets
//! the register pointer, further bytes are stored with auto-increment, reads
//! continue from the pointer, and a write to register 0 switches the page.
//!
//! `src/mock.rs` carries the same bus as `MockI2c` for the unit tests.
//! Change both together.

#![allow(
    dead_code,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation
)]

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

pub const PAGES: usize = 5;
pub const PAGE_LEN: usize = 128;

/// One register byte written through the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Write {
    pub page: u8,
    pub reg: u8,
    pub value: u8,
}

#[derive(Debug)]
pub struct RegisterFile {
    pub regs: [[u8; PAGE_LEN]; PAGES],
    pub page: u8,
    pub address: Option<u8>,
    pub writes: Vec<Write>,
    /// Transactions issued so far, including the failed one.
    pub transactions: usize,
    /// Fail the transaction with this zero-based index.
    pub fail_at: Option<usize>,
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self {
            regs: [[0; PAGE_LEN]; PAGES],
            page: 0,
            address: None,
            writes: Vec::new(),
            transactions: 0,
            fail_at: None,
        }
    }
}

impl RegisterFile {
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }

    pub fn reg(&self, page: u8, reg: u8) -> u8 {
        self.regs[usize::from(page)][usize::from(reg)]
    }

    pub fn set_reg(&mut self, page: u8, reg: u8, value: u8) {
        self.regs[usize::from(page)][usize::from(reg)] = value;
    }

    /// Page-select writes, in order.
    pub fn page_selects(&self) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|w| w.reg == 0)
            .map(|w| w.value)
            .collect()
    }

    /// Writes other than page selects.
    pub fn data_writes(&self) -> Vec<Write> {
        self.writes.iter().copied().filter(|w| w.reg != 0).collect()
    }
}

impl ErrorType for RegisterFile {
    type Error = ErrorKind;
}

impl I2c for RegisterFile {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let index = self.transactions;
        self.transactions += 1;
        if self.fail_at == Some(index) {
            return Err(ErrorKind::Other);
        }
        self.address = Some(address);

        let mut pointer = 0usize;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(data) => {
                    let Some((&reg, payload)) = data.split_first() else {
                        continue;
                    };
                    pointer = usize::from(reg);
                    for &value in payload {
                        let reg = (pointer % PAGE_LEN) as u8;
                        self.writes.push(Write {
                            page: self.page,
                            reg,
                            value,
                        });
                        if reg == 0 {
                            self.page = value;
                        } else {
                            self.regs[usize::from(self.page) % PAGES][usize::from(reg)] = value;
                        }
                        pointer += 1;
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        let reg = pointer % PAGE_LEN;
                        *byte = if reg == 0 {
                            self.page
                        } else {
                            self.regs[usize::from(self.page) % PAGES][reg]
                        };
                        pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}
