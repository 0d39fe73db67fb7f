//! Virtual GPIO status channel.
//!
//! A single 32-bit register shared between the firmware and whoever is watching
//! the chip (a cocotb testbench in simulation). The firmware posts progress codes
//! into the upper half and polls the same half for values driven from outside.
//! The lower half belongs to the other side and is never clobbered.

use {
    crate::status::Status,
    core::{cell::Cell, fmt},
    tock_registers::{
        interfaces::{Readable, Writeable},
        register_bitfields,
        registers::ReadWrite,
        LocalRegisterCopy,
    },
};

/// Address of the virtual GPIO register on the management SoC bus.
pub const HW_VGPIO_BASE: usize = 0x30FF_FFFC;

register_bitfields![u32,
    pub VGPIO [
        /// Status code posted by the firmware.
        OUTPUT OFFSET(16) NUMBITS(16) [],
        /// Value polled by the firmware. Shares bits with `OUTPUT`.
        INPUT OFFSET(16) NUMBITS(16) [],
        /// Driven by the observer, preserved on every write.
        EXTERNAL OFFSET(0) NUMBITS(16) []
    ]
];

pub type VgpioRegister = ReadWrite<u32, VGPIO::Register>;

/// Raw 32-bit access to the status register.
///
/// Implemented for the memory-mapped register itself and for anything that can
/// stand in for it, so the channel can run against a simulated register.
pub trait StatusRegister {
    fn read(&self) -> u32;
    fn write(&self, value: u32);
}

impl StatusRegister for VgpioRegister {
    fn read(&self) -> u32 {
        Readable::get(self)
    }

    fn write(&self, value: u32) {
        Writeable::set(self, value)
    }
}

impl StatusRegister for Cell<u32> {
    fn read(&self) -> u32 {
        self.get()
    }

    fn write(&self, value: u32) {
        self.set(value)
    }
}

impl<T: StatusRegister + ?Sized> StatusRegister for &T {
    fn read(&self) -> u32 {
        (**self).read()
    }

    fn write(&self, value: u32) {
        (**self).write(value)
    }
}

/// The poll budget of a bounded wait ran out.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Timeout {
    /// Last value seen in the polled half.
    pub last: u16,
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timed out, input stuck at {}", self.last)
    }
}

pub struct VirtualGpio<R> {
    reg: R,
}

impl VirtualGpio<&'static VgpioRegister> {
    /// Binds the channel to a register at `base_addr`.
    ///
    /// # Safety
    ///
    /// `base_addr` must be the address of a readable and writable 32-bit
    /// register that stays mapped for the rest of the program.
    pub unsafe fn with_alt_base_addr(base_addr: usize) -> Self {
        Self {
            reg: &*(base_addr as *const VgpioRegister),
        }
    }
}

#[cfg(feature = "firmware")]
impl Default for VirtualGpio<&'static VgpioRegister> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "firmware")]
impl VirtualGpio<&'static VgpioRegister> {
    pub fn new() -> Self {
        // SAFETY: the register is part of the fixed SoC memory map.
        unsafe { Self::with_alt_base_addr(HW_VGPIO_BASE) }
    }
}

impl<R: StatusRegister> VirtualGpio<R> {
    pub fn with_register(reg: R) -> Self {
        Self { reg }
    }

    pub fn register(&self) -> &R {
        &self.reg
    }

    /// Posts `value` in the output half, leaving the lower half untouched.
    ///
    /// This is a read-modify-write and is not atomic against the observer; the
    /// observer only ever drives `EXTERNAL`.
    pub fn write_output(&mut self, value: u16) {
        let mut reg = LocalRegisterCopy::<u32, VGPIO::Register>::new(self.reg.read());
        reg.modify(VGPIO::OUTPUT.val(u32::from(value)));
        self.reg.write(reg.get());
    }

    pub fn read_input(&self) -> u16 {
        let reg = LocalRegisterCopy::<u32, VGPIO::Register>::new(self.reg.read());
        reg.read(VGPIO::INPUT) as u16
    }

    /// Spins until the input half reads `value`. Never gives up.
    pub fn wait_val(&self, value: u16) {
        while self.read_input() != value {
            core::hint::spin_loop();
        }
    }

    /// Like [`wait_val`](Self::wait_val) but polls at most `max_polls` times.
    ///
    /// With a zero budget the register is still read once so the timeout
    /// carries the real value, but it is never matched.
    pub fn wait_val_timeout(&self, value: u16, max_polls: u32) -> Result<(), Timeout> {
        if max_polls == 0 {
            return Err(Timeout {
                last: self.read_input(),
            });
        }

        let mut last = 0;
        for _ in 0..max_polls {
            last = self.read_input();
            if last == value {
                return Ok(());
            }
            core::hint::spin_loop();
        }

        Err(Timeout { last })
    }

    pub fn report(&mut self, status: Status) {
        log::debug!("vgpio <- {} ({:?})", status as u16, status);
        self.write_output(status as u16);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_output_keeps_external_half() {
        for external in [0x0000u32, 0x0001, 0xa5a5, 0xffff] {
            for value in [0x0000u16, 0x0007, 0x1234, 0xffff] {
                let mut vgpio = VirtualGpio::with_register(Cell::new(0xdead_0000 | external));
                vgpio.write_output(value);

                let raw = vgpio.register().get();
                assert_eq!(raw & 0xffff, external);
                assert_eq!(raw >> 16, u32::from(value));
            }
        }
    }

    #[test]
    fn read_input_ignores_external_half() {
        let reg = Cell::new(0x0006_0000u32);
        let vgpio = VirtualGpio::with_register(&reg);

        for external in [0x0000u32, 0x0006, 0x8000, 0xffff] {
            reg.set(0x0006_0000 | external);
            assert_eq!(vgpio.read_input(), 6);
        }
    }

    #[test]
    fn output_loops_back_to_input() {
        let mut vgpio = VirtualGpio::with_register(Cell::new(0x0000_00ffu32));
        vgpio.report(Status::OutputRead);

        assert_eq!(vgpio.read_input(), 5);
        vgpio.wait_val(5);
    }

    #[test]
    fn bounded_wait_reports_last_value() {
        let vgpio = VirtualGpio::with_register(Cell::new(0x0003_0000u32));

        assert_eq!(vgpio.wait_val_timeout(3, 1), Ok(()));
        assert_eq!(vgpio.wait_val_timeout(6, 10), Err(Timeout { last: 3 }));
    }

    #[test]
    fn zero_budget_still_reads_the_register() {
        let vgpio = VirtualGpio::with_register(Cell::new(0x0003_00ffu32));

        assert_eq!(vgpio.wait_val_timeout(6, 0), Err(Timeout { last: 3 }));
        assert_eq!(vgpio.wait_val_timeout(3, 0), Err(Timeout { last: 3 }));
    }
}
