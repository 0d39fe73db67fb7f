//! The AES bring-up test itself.
//!
//! Straight-line: set up the SoC, enable the peripheral, encrypt one block,
//! compare. Every step is announced on the virtual GPIO channel so the
//! testbench can follow along, and every failure ends in `Status::Fail`.

use crate::{
    aes::{AesEngine, Block, Mode, TestVector, AES_BLOCK_WORDS, HW_AES_BASE},
    error::TestError,
    firmware::Firmware,
    status::Status,
    vgpio::{StatusRegister, VirtualGpio},
};

/// Runs the test for `vector` and posts its progress on `vgpio`.
///
/// Emits 1, 2, 3, 4, then either 7 (driver error), or 5 followed by 6 or 7
/// depending on the comparison.
pub fn run<F, A, R>(
    firmware: &mut F,
    aes: &mut A,
    vgpio: &mut VirtualGpio<R>,
    vector: &TestVector,
) -> Result<(), TestError>
where
    F: Firmware,
    A: AesEngine,
    R: StatusRegister,
{
    // Keep the housekeeping SPI off the bus while we use it.
    firmware.enable_hk_spi(false);
    firmware.load_gpio_configs();
    firmware.enable_user_interface();
    vgpio.report(Status::Ready);

    aes.set_base_address(HW_AES_BASE);
    aes.enable_gclk();
    vgpio.report(Status::PeripheralEnabled);

    // Posted before the driver consumes the inputs so the testbench sees a
    // hang inside the encrypt call as "stuck at 3".
    vgpio.report(Status::InputsReady);

    let result = aes.encrypt128(&vector.key, &vector.plaintext, Mode::DEFAULT);
    vgpio.report(Status::EncryptIssued);

    let ciphertext = match result {
        Ok(ciphertext) => ciphertext,
        Err(err) => {
            log::error!("{}", err);
            vgpio.report(Status::Fail);
            return Err(err.into());
        }
    };
    vgpio.report(Status::OutputRead);

    match compare(&ciphertext, &vector.expected) {
        Ok(()) => {
            log::info!("ciphertext {} matches", ciphertext.hex());
            vgpio.report(Status::Pass);
            Ok(())
        }
        Err(err) => {
            log::error!("{}", err);
            log::error!("expected {}", vector.expected.hex());
            log::error!("actual   {}", ciphertext.hex());
            vgpio.report(Status::Fail);
            Err(err)
        }
    }
}

/// Word-by-word comparison that stops at the first difference.
pub fn compare(actual: &Block, expected: &Block) -> Result<(), TestError> {
    for word in 0..AES_BLOCK_WORDS {
        if actual.0[word] != expected.0[word] {
            return Err(TestError::Mismatch {
                word,
                expected: expected.0[word],
                actual: actual.0[word],
            });
        }
    }

    Ok(())
}
