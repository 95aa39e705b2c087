//! Message object numbering. The controller counts message boxes from 1;
//! the new-data bitmap stores box `n` at bit `(n - 1) % 32` of word `(n - 1) / 32`.
use crate::core::MAX_MESSAGE_BOXES;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Validated message box number in `1..=MAX_MESSAGE_BOXES`.
pub struct MessageBox(u8);

impl MessageBox {
    /// Returns `None` for 0 or numbers past the message RAM.
    pub const fn new(number: u8) -> Option<Self> {
        if number == 0 || number > MAX_MESSAGE_BOXES {
            None
        } else {
            Some(Self(number))
        }
    }

    /// Number written to IFxNO.
    #[inline]
    pub const fn number(&self) -> u8 {
        self.0
    }

    /// `(word, mask)` locating this box in the new-data bitmap.
    #[inline]
    pub const fn new_data_bit(&self) -> (usize, u32) {
        let index = (self.0 - 1) as u32;
        ((index / 32) as usize, 1 << (index % 32))
    }
}

impl TryFrom<u8> for MessageBox {
    type Error = u8;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        MessageBox::new(number).ok_or(number)
    }
}
