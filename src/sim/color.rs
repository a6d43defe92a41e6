//! Block color palette

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One of the six block colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColorId {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl ColorId {
    pub const ALL: [Self; 6] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Purple,
    ];

    /// Palette index 0..6
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Uniformly random color
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Display color as 8-bit RGB
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Self::Red => [0xab, 0x46, 0x42],
            Self::Orange => [0xdc, 0x96, 0x56],
            Self::Yellow => [0xf7, 0xca, 0x88],
            Self::Green => [0xa1, 0xb5, 0x6c],
            Self::Blue => [0x7c, 0xaf, 0xc2],
            Self::Purple => [0xba, 0x8b, 0xaf],
        }
    }

    /// Single-letter tag for text views
    pub fn glyph(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Orange => 'O',
            Self::Yellow => 'Y',
            Self::Green => 'G',
            Self::Blue => 'B',
            Self::Purple => 'P',
        }
    }
}
