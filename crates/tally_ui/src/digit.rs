//! The repeating 0..=9 sequence labelling spinner slides.

/// Yields `0, 1, ..., 9, 0, 1, ...` forever.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigitCycle {
    next: u8,
}

impl DigitCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the cycle at `digit` (taken modulo 10).
    pub fn starting_at(digit: u8) -> Self {
        Self { next: digit % 10 }
    }

    /// The digit the next call to [`DigitCycle::advance`] returns.
    pub fn peek(&self) -> u8 {
        self.next
    }

    /// Consume and return the next digit.
    pub fn advance(&mut self) -> u8 {
        let digit = self.next;
        self.next = if digit == 9 { 0 } else { digit + 1 };
        digit
    }
}

impl Iterator for DigitCycle {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        Some(self.advance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps_without_skipping() {
        let digits: Vec<u8> = DigitCycle::new().take(25).collect();
        for (i, digit) in digits.iter().enumerate() {
            assert_eq!(*digit as usize, i % 10);
        }
    }

    #[test]
    fn test_starting_at_wraps_input() {
        let mut cycle = DigitCycle::starting_at(19);
        assert_eq!(cycle.peek(), 9);
        assert_eq!(cycle.advance(), 9);
        assert_eq!(cycle.advance(), 0);
    }
}
