//! AES-128 peripheral interface.
//!
//! The peripheral sits on the user-project Wishbone bus and is driven by the
//! vendor driver; the firmware only sees it through [`AesEngine`].

use core::fmt;

/// Base address of user-project peripheral 0.
pub const HW_AES_BASE: u32 = 0x3000_0000;

pub const AES_BLOCK_WORDS: usize = 4;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Key(pub [u32; AES_BLOCK_WORDS]);

/// One 128-bit block as four big-endian words.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Block(pub [u32; AES_BLOCK_WORDS]);

impl Key {
    pub fn to_be_bytes(&self) -> [u8; 16] {
        words_to_bytes(&self.0)
    }
}

impl Block {
    pub fn to_be_bytes(&self) -> [u8; 16] {
        words_to_bytes(&self.0)
    }

    pub fn from_be_bytes(bytes: &[u8; 16]) -> Self {
        let mut words = [0; AES_BLOCK_WORDS];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self(words)
    }

    /// Formats the block as 32 lowercase hex digits.
    pub fn hex(&self) -> HexBlock {
        HexBlock(self.to_be_bytes())
    }
}

fn words_to_bytes(words: &[u32; AES_BLOCK_WORDS]) -> [u8; 16] {
    let mut bytes = [0; 16];
    for (chunk, word) in bytes.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    bytes
}

pub struct HexBlock([u8; 16]);

impl fmt::Display for HexBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; 32];
        hex::encode_to_slice(self.0, &mut buf).map_err(|_| fmt::Error)?;
        let s = core::str::from_utf8(&buf).map_err(|_| fmt::Error)?;
        f.write_str(s)
    }
}

/// Variant selector passed through to the driver's encrypt call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Mode(pub u32);

impl Mode {
    pub const DEFAULT: Mode = Mode(0);
}

impl Default for Mode {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Non-success status returned by the driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AesError {
    pub status: i32,
}

impl fmt::Display for AesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AES driver returned status {}", self.status)
    }
}

pub trait AesEngine {
    fn set_base_address(&mut self, addr: u32);

    /// Ungates the peripheral clock.
    fn enable_gclk(&mut self);

    fn encrypt128(&mut self, key: &Key, plaintext: &Block, mode: Mode) -> Result<Block, AesError>;
}

/// A single-block known-answer test.
#[derive(Debug, Copy, Clone)]
pub struct TestVector {
    pub key: Key,
    pub plaintext: Block,
    pub expected: Block,
}

/// FIPS-197 appendix B.
pub const FIPS197_AES128: TestVector = TestVector {
    key: Key([0x2b7e1516, 0x28aed2a6, 0xabf71588, 0x09cf4f3c]),
    plaintext: Block([0x3243f6a8, 0x885a308d, 0x313198a2, 0xe0370734]),
    expected: Block([0x3925841d, 0x02dc09fb, 0xdc118597, 0x196a0b32]),
};
