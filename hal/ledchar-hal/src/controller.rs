//! Register controller
//!
//! The only code allowed to change GPIO control words. Function-select
//! updates are read-modify-write on a whole word and leave the other nine
//! fields of that word untouched; level changes are single-bit writes to
//! the set or clear bank, addressed through [`Pin::level_addr`] for both.

use crate::pin::{Function, Pin};
use crate::registers::{Bank, RegisterBlock};

/// Translates pin operations into masked register writes
#[derive(Debug)]
pub struct RegisterController<B> {
    block: B,
}

impl<B: RegisterBlock> RegisterController<B> {
    /// Take ownership of a mapped register block
    pub const fn new(block: B) -> Self {
        Self { block }
    }

    /// Set the operating mode of a pin
    pub fn set_pin_function(&mut self, pin: Pin, function: Function) {
        let slot = pin.function_slot();
        let mask = slot.mask();
        let old = self.block.read_word(Bank::FunctionSelect, slot.word);
        let new = (old & !mask) | ((function.code() << slot.shift) & mask);
        self.block.write_word(Bank::FunctionSelect, slot.word, new);
    }

    /// Drive a pin high or low
    pub fn set_pin_output(&mut self, pin: Pin, high: bool) {
        let addr = pin.level_addr();
        let bank = if high { Bank::Set } else { Bank::Clear };
        self.block.write_word(bank, addr.word, addr.mask());
    }

    /// Read back the current mode of a pin
    pub fn pin_function(&self, pin: Pin) -> Function {
        let slot = pin.function_slot();
        let word = self.block.read_word(Bank::FunctionSelect, slot.word);
        Function::from_code(word >> slot.shift)
    }

    /// Borrow the underlying block
    pub fn block(&self) -> &B {
        &self.block
    }

    /// Give the block back, e.g. for unmapping
    pub fn into_inner(self) -> B {
        self.block
    }
}
