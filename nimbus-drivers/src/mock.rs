//! Register-mapped I2C bus and no-op delay for driver tests

use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

/// One simulated device per 7-bit address, each with a 256-byte register file
///
/// The first byte of every write selects the register (the auto-increment
/// bit 0x80 is ignored); following bytes are stored from there on. Reads
/// continue from the selected register.
pub struct MockI2c {
    registers: Vec<(u8, [u8; 256])>,
    pointer: u8,
    pub writes: Vec<(u8, Vec<u8>)>,
    pub fail: bool,
}

impl MockI2c {
    pub fn new(addresses: &[u8]) -> Self {
        Self {
            registers: addresses.iter().map(|&a| (a, [0u8; 256])).collect(),
            pointer: 0,
            writes: Vec::new(),
            fail: false,
        }
    }

    pub fn set(&mut self, address: u8, register: u8, bytes: &[u8]) {
        if let Some(regs) = self.device(address) {
            let start = usize::from(register);
            regs[start..start + bytes.len()].copy_from_slice(bytes);
        }
    }

    /// Writes sent to `address`, in order
    pub fn writes_to(&self, address: u8) -> Vec<Vec<u8>> {
        self.writes
            .iter()
            .filter(|(a, _)| *a == address)
            .map(|(_, bytes)| bytes.clone())
            .collect()
    }

    fn device(&mut self, address: u8) -> Option<&mut [u8; 256]> {
        self.registers
            .iter_mut()
            .find(|(a, _)| *a == address)
            .map(|(_, regs)| regs)
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail || self.device(address).is_none() {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    self.writes.push((address, bytes.to_vec()));
                    if let Some((&first, rest)) = bytes.split_first() {
                        let mut reg = first & 0x7F;
                        if let Some(regs) = self.device(address) {
                            for &b in rest {
                                regs[usize::from(reg)] = b;
                                reg = reg.wrapping_add(1);
                            }
                        }
                        self.pointer = first & 0x7F;
                    }
                }
                Operation::Read(buf) => {
                    let mut reg = self.pointer;
                    if let Some(regs) = self.device(address) {
                        for slot in buf.iter_mut() {
                            *slot = regs[usize::from(reg)];
                            reg = reg.wrapping_add(1);
                        }
                    }
                    self.pointer = reg;
                }
            }
        }
        Ok(())
    }
}

pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
