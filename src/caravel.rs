//! Bindings to the Caravel vendor firmware library and the EF_AES driver.
//!
//! Both are C libraries linked into the firmware image; this module only
//! declares the entry points the test needs and wraps them in the crate's
//! traits.

use {
    crate::{
        aes::{AesEngine, AesError, Block, Key, Mode, AES_BLOCK_WORDS},
        firmware::Firmware,
    },
    core::ffi::{c_char, c_int},
};

/// `AES_OK` in the driver's status enum.
const AES_OK: c_int = 0;

#[allow(non_snake_case)]
extern "C" {
    fn enableHkSpi(is_enable: bool);
    fn GPIOs_loadConfigs();
    fn User_enableIF();
    fn UART_enableTX(is_enable: bool);
    fn UART_sendChar(c: c_char);

    fn AES_setBaseAddress(base: u32);
    fn AES_enableGCLK();
    fn AES_encrypt128(
        key: *const u32,
        plaintext: *const u32,
        ciphertext: *mut u32,
        mode: u32,
    ) -> c_int;
}

#[derive(Default)]
pub struct CaravelFirmware {
    _private: (),
}

impl CaravelFirmware {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Firmware for CaravelFirmware {
    fn enable_hk_spi(&mut self, enable: bool) {
        unsafe { enableHkSpi(enable) }
    }

    fn load_gpio_configs(&mut self) {
        unsafe { GPIOs_loadConfigs() }
    }

    fn enable_user_interface(&mut self) {
        unsafe { User_enableIF() }
    }
}

#[derive(Default)]
pub struct EfAes {
    _private: (),
}

impl EfAes {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AesEngine for EfAes {
    fn set_base_address(&mut self, addr: u32) {
        unsafe { AES_setBaseAddress(addr) }
    }

    fn enable_gclk(&mut self) {
        unsafe { AES_enableGCLK() }
    }

    fn encrypt128(&mut self, key: &Key, plaintext: &Block, mode: Mode) -> Result<Block, AesError> {
        let mut ciphertext = [0u32; AES_BLOCK_WORDS];

        // SAFETY: the driver reads four words from `key` and `plaintext` and
        // writes four words to `ciphertext`.
        let status = unsafe {
            AES_encrypt128(
                key.0.as_ptr(),
                plaintext.0.as_ptr(),
                ciphertext.as_mut_ptr(),
                mode.0,
            )
        };

        if status != AES_OK {
            return Err(AesError { status });
        }

        Ok(Block(ciphertext))
    }
}

/// Transmit side of the management SoC UART.
pub struct Uart {
    _private: (),
}

impl Uart {
    pub fn new() -> Self {
        unsafe { UART_enableTX(true) };
        Self { _private: () }
    }
}

impl Default for Uart {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Write for Uart {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                unsafe { UART_sendChar(b'\r' as c_char) };
            }
            unsafe { UART_sendChar(byte as c_char) };
        }
        Ok(())
    }
}
