use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0} is not a decimal digit")]
pub struct InvalidDigit(pub u8);

/// A single dialed digit, always in `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub struct Digit(u8);

impl Digit {
    pub const ALL: [Digit; 10] = [
        Digit(0),
        Digit(1),
        Digit(2),
        Digit(3),
        Digit(4),
        Digit(5),
        Digit(6),
        Digit(7),
        Digit(8),
        Digit(9),
    ];

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<u8> for Digit {
    type Error = InvalidDigit;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(InvalidDigit(value))
    }
}

/// A completed code as a string of digits.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Code(String);

crate::impl_string_newtype!(Code);

impl FromIterator<Digit> for Code {
    fn from_iter<I: IntoIterator<Item = Digit>>(iter: I) -> Self {
        Self(iter.into_iter().map(Digit::as_char).collect())
    }
}

/// Digits collected so far, flushed as a [`Code`] once `capacity` is reached.
#[derive(Debug, Clone)]
pub struct CodeBuffer {
    digits: Vec<Digit>,
    capacity: usize,
}

impl CodeBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            digits: Vec::new(),
            capacity,
        }
    }

    /// Appends a digit. When this fills the buffer the code is returned and
    /// the buffer starts over empty.
    pub fn push(&mut self, digit: Digit) -> Option<Code> {
        self.digits.push(digit);
        (self.digits.len() >= self.capacity).then(|| self.digits.drain(..).collect())
    }

    pub fn digits(&self) -> &[Digit] {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the target length. Pending digits are dropped if they no
    /// longer fit below the new length.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        if self.digits.len() >= capacity {
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(d: u8) -> Digit {
        Digit::try_from(d).unwrap()
    }

    #[test]
    fn test_digit_range() {
        assert_eq!(digit(7).value(), 7);
        assert_eq!(digit(0).as_char(), '0');
        assert_eq!(Digit::try_from(10), Err(InvalidDigit(10)));
    }

    #[test]
    fn test_buffer_flushes_when_full() {
        let mut buffer = CodeBuffer::new(4);
        assert_eq!(buffer.push(digit(2)), None);
        assert_eq!(buffer.push(digit(2)), None);
        assert_eq!(buffer.push(digit(1)), None);
        assert_eq!(buffer.len(), 3);

        let code = buffer.push(digit(2));
        assert_eq!(code, Some(Code::new("2212")));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_single_digit_codes() {
        let mut buffer = CodeBuffer::new(1);
        assert_eq!(buffer.push(digit(9)), Some(Code::new("9")));
        assert_eq!(buffer.push(digit(0)), Some(Code::new("0")));
    }

    #[test]
    fn test_shrinking_capacity_drops_overflowing_digits() {
        let mut buffer = CodeBuffer::new(6);
        buffer.push(digit(1));
        buffer.push(digit(2));
        buffer.set_capacity(8);
        assert_eq!(buffer.digits(), &[digit(1), digit(2)]);
        buffer.set_capacity(2);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        let mut buffer = CodeBuffer::new(usize::MAX / 2);
        assert_eq!(buffer.capacity(), usize::MAX / 2);
        assert_eq!(buffer.push(digit(3)), None);
        assert_eq!(buffer.digits(), &[digit(3)]);
    }

    #[test]
    fn test_code_serializes_as_plain_string() {
        let code: Code = serde_json::from_str("\"0451\"").unwrap();
        assert_eq!(code.as_str(), "0451");
        assert_eq!(code.to_string(), "0451");
    }
}
