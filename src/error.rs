use crate::sequencer::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A catalog lookup fell outside `[0, len)`.
    #[error("index {index} out of range for catalog of {len}")]
    IndexOutOfRange { index: i64, len: usize },
    /// A forced transition the phase machine does not allow.
    #[error("illegal phase transition {from:?} -> {to:?}")]
    IllegalTransition { from: Phase, to: Phase },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = CoreError::IndexOutOfRange { index: -1, len: 13 };
        assert_eq!(e.to_string(), "index -1 out of range for catalog of 13");
        let e = CoreError::IllegalTransition { from: Phase::Idle, to: Phase::Running };
        assert_eq!(e.to_string(), "illegal phase transition Idle -> Running");
    }
}
