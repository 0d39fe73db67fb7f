use {crate::aes::AesError, core::fmt};

/// Why a run ended in `Fail`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TestError {
    /// The driver did not report success; nothing was compared.
    Peripheral(AesError),
    /// The peripheral produced a different ciphertext.
    Mismatch {
        /// Index of the first differing word.
        word: usize,
        expected: u32,
        actual: u32,
    },
}

impl From<AesError> for TestError {
    fn from(err: AesError) -> Self {
        TestError::Peripheral(err)
    }
}

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestError::Peripheral(err) => write!(f, "peripheral error: {}", err),
            TestError::Mismatch {
                word,
                expected,
                actual,
            } => write!(
                f,
                "ciphertext mismatch at word {}: expected {:08x}, got {:08x}",
                word, expected, actual
            ),
        }
    }
}
