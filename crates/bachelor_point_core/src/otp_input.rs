//! crates/bachelor_point_core/src/otp_input.rs
//!
//! Discrete code-entry boxes: typing advances focus, backspace on an empty box moves
//! back, and filling the last empty box yields the assembled code.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtpBoxes {
    digits: Vec<Option<char>>,
    focus: usize,
}

impl OtpBoxes {
    pub fn new(length: usize) -> Self {
        Self {
            digits: vec![None; length.max(1)],
            focus: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.iter().all(Option::is_none)
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn digits(&self) -> &[Option<char>] {
        &self.digits
    }

    /// Types `ch` into box `index`. Non-digits and out-of-range boxes are ignored.
    /// Returns the full code once every box holds a digit.
    pub fn input(&mut self, index: usize, ch: char) -> Option<String> {
        if !ch.is_ascii_digit() || index >= self.digits.len() {
            return None;
        }
        self.digits[index] = Some(ch);
        self.focus = (index + 1).min(self.digits.len() - 1);
        self.code()
    }

    /// Clears box `index`, or moves focus back when it is already empty.
    pub fn backspace(&mut self, index: usize) {
        if index >= self.digits.len() {
            return;
        }
        if self.digits[index].take().is_none() && index > 0 {
            self.focus = index - 1;
        } else {
            self.focus = index;
        }
    }

    pub fn clear(&mut self) {
        self.digits.iter_mut().for_each(|d| *d = None);
        self.focus = 0;
    }

    /// The assembled code, if complete.
    pub fn code(&self) -> Option<String> {
        self.digits.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_advances_and_completes() {
        let mut boxes = OtpBoxes::new(6);
        for (i, ch) in "12345".chars().enumerate() {
            assert_eq!(boxes.input(i, ch), None);
            assert_eq!(boxes.focus(), i + 1);
        }
        assert_eq!(boxes.input(5, '6').as_deref(), Some("123456"));
        assert_eq!(boxes.focus(), 5);
    }

    #[test]
    fn non_digits_are_ignored() {
        let mut boxes = OtpBoxes::new(6);
        assert_eq!(boxes.input(0, 'x'), None);
        assert!(boxes.is_empty());
        assert_eq!(boxes.focus(), 0);
    }

    #[test]
    fn backspace_on_empty_moves_back() {
        let mut boxes = OtpBoxes::new(6);
        boxes.input(0, '4');
        boxes.input(1, '2');
        assert_eq!(boxes.focus(), 2);

        boxes.backspace(2);
        assert_eq!(boxes.focus(), 1);

        boxes.backspace(1);
        assert_eq!(boxes.digits()[1], None);
        assert_eq!(boxes.focus(), 1);

        boxes.backspace(0);
        assert_eq!(boxes.focus(), 0);
        assert!(boxes.is_empty());

        boxes.backspace(0);
        assert_eq!(boxes.focus(), 0);
    }

    #[test]
    fn out_of_order_entry_completes_when_last_gap_fills() {
        let mut boxes = OtpBoxes::new(3);
        assert_eq!(boxes.input(2, '9'), None);
        assert_eq!(boxes.input(0, '1'), None);
        assert_eq!(boxes.input(1, '5').as_deref(), Some("159"));
    }

    #[test]
    fn clear_resets() {
        let mut boxes = OtpBoxes::new(2);
        boxes.input(0, '1');
        boxes.clear();
        assert!(boxes.is_empty());
        assert_eq!(boxes.code(), None);
    }
}
