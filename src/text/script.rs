//! Script range filtering over UTF-16 code units

/// Inclusive range of UTF-16 code units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptRange {
    /// Lowest code unit in the range
    pub min: u16,
    /// Highest code unit in the range
    pub max: u16,
}

impl ScriptRange {
    /// Create a new inclusive range
    #[must_use]
    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    #[inline]
    #[must_use]
    pub const fn contains(&self, unit: u16) -> bool {
        unit >= self.min && unit <= self.max
    }
}

/// Code unit ranges treated as Japanese text
pub const JAPANESE_RANGES: &[ScriptRange] = &[
    // Hiragana
    ScriptRange::new(0x3040, 0x309F),
    // Katakana
    ScriptRange::new(0x30A0, 0x30FF),
    // CJK Unified Ideographs
    ScriptRange::new(0x4E00, 0x9FBF),
    // CJK Symbols and Punctuation
    ScriptRange::new(0x3000, 0x303F),
    // Halfwidth and Fullwidth Forms
    ScriptRange::new(0xFF00, 0xFFEF),
];

/// Keep the code units that fall inside any of `ranges`, in their original order
#[must_use]
pub fn filter_script(input: &[u16], ranges: &[ScriptRange]) -> Vec<u16> {
    input
        .iter()
        .copied()
        .filter(|unit| ranges.iter().any(|range| range.contains(*unit)))
        .collect()
}

/// Keep only the code units inside [`JAPANESE_RANGES`]
#[must_use]
pub fn retain_japanese(input: &[u16]) -> Vec<u16> {
    filter_script(input, JAPANESE_RANGES)
}
