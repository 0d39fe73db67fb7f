use core::fmt;

/// Progress codes posted on the virtual GPIO channel, in the order a run
/// emits them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u16)]
pub enum Status {
    /// Firmware is up and the user interface is enabled.
    Ready = 1,
    /// AES peripheral has its base address and clock.
    PeripheralEnabled = 2,
    /// Key and plaintext are committed.
    InputsReady = 3,
    /// The encryption call has returned.
    EncryptIssued = 4,
    /// Ciphertext has been read back.
    OutputRead = 5,
    Pass = 6,
    Fail = 7,
}

impl Status {
    /// `Pass` and `Fail` end a run; nothing is posted after them.
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Pass | Status::Fail)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub u16);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status code {}", self.0)
    }
}

impl TryFrom<u16> for Status {
    type Error = UnknownStatus;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Status::Ready,
            2 => Status::PeripheralEnabled,
            3 => Status::InputsReady,
            4 => Status::EncryptIssued,
            5 => Status::OutputRead,
            6 => Status::Pass,
            7 => Status::Fail,
            _ => return Err(UnknownStatus(value)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_the_wire_values() {
        for code in 1..=7u16 {
            let status = Status::try_from(code).unwrap();
            assert_eq!(status as u16, code);
        }
    }

    #[test]
    fn rejects_codes_outside_the_run() {
        assert_eq!(Status::try_from(0), Err(UnknownStatus(0)));
        assert_eq!(Status::try_from(8), Err(UnknownStatus(8)));
        assert_eq!(Status::try_from(0xffff), Err(UnknownStatus(0xffff)));
    }

    #[test]
    fn only_pass_and_fail_are_terminal() {
        let terminal: [bool; 7] = core::array::from_fn(|i| {
            Status::try_from(i as u16 + 1).unwrap().is_terminal()
        });
        assert_eq!(terminal, [false, false, false, false, false, true, true]);
    }
}
