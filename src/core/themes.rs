//! Static glyph palettes the composer draws symbols from.

use std::fmt;
use std::sync::OnceLock;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::warn;

const GEOMETRIC_GLYPHS: &[&str] = &[
    "◇", "◆", "◈", "◉", "○", "●", "⊕", "⊖", "⊗", "⊘", "⊙", "△", "▲", "▷", "▽", "▼", "◁", "□",
    "■", "▢", "▣", "☆", "★", "✶", "✷", "✸", "✹", "✺", "✡", "✨", "🌀", "⌘", "♾",
];

const ASTROLOGY_GLYPHS: &[&str] = &[
    // planets
    "☉", "☽", "☿", "♀", "♂", "♃", "♄", "♅", "♆", "♇",
    // zodiac
    "♈", "♉", "♊", "♋", "♌", "♍", "♎", "♏", "♐", "♑", "♒", "♓",
    // aspects and lunar nodes
    "☌", "☍", "⚹", "□", "△", "☊", "☋",
];

const ALCHEMY_GLYPHS: &[&str] = &[
    "🜁", "🜂", "🜃", "🜄", "🜀", "🜇", "🜍", "🜔", "🜚", "🜛", "☽", "♀", "♂", "♃", "♄", "☿",
];

const RUNE_GLYPHS: &[&str] = &[
    "ᚠ", "ᚢ", "ᚦ", "ᚨ", "ᚱ", "ᚲ", "ᚷ", "ᚹ", "ᚺ", "ᚾ", "ᛁ", "ᛃ", "ᛇ", "ᛈ", "ᛉ", "ᛊ", "ᛏ", "ᛒ",
    "ᛖ", "ᛗ", "ᛚ", "ᛜ", "ᛟ", "ᛞ",
];

/// Named glyph palette. `All` is the ordered union of the other themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolTheme {
    #[default]
    Geometric,
    Astrology,
    Alchemy,
    Runes,
    All,
}

impl SymbolTheme {
    pub const VARIANTS: [Self; 5] = [
        Self::Geometric,
        Self::Astrology,
        Self::Alchemy,
        Self::Runes,
        Self::All,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Geometric => "geometric",
            Self::Astrology => "astrology",
            Self::Alchemy => "alchemy",
            Self::Runes => "runes",
            Self::All => "all",
        }
    }

    /// Exact key lookup; `None` for unknown keys.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::VARIANTS
            .into_iter()
            .find(|theme| theme.key().eq_ignore_ascii_case(key))
    }

    /// Key lookup that falls back to the default theme for unknown keys.
    #[must_use]
    pub fn resolve(key: &str) -> Self {
        Self::from_key(key).unwrap_or_else(|| {
            let fallback = Self::default();
            warn!(
                requested = key,
                fallback = fallback.key(),
                "unknown symbol theme, using fallback"
            );
            fallback
        })
    }

    /// Candidate glyphs in table order. Never empty.
    #[must_use]
    pub fn glyphs(self) -> &'static [&'static str] {
        match self {
            Self::Geometric => GEOMETRIC_GLYPHS,
            Self::Astrology => ASTROLOGY_GLYPHS,
            Self::Alchemy => ALCHEMY_GLYPHS,
            Self::Runes => RUNE_GLYPHS,
            Self::All => union_glyphs(),
        }
    }

    #[must_use]
    pub fn contains(self, glyph: &str) -> bool {
        self.glyphs().contains(&glyph)
    }
}

impl fmt::Display for SymbolTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn union_glyphs() -> &'static [&'static str] {
    static UNION: OnceLock<Vec<&'static str>> = OnceLock::new();
    UNION.get_or_init(|| {
        let set: IndexSet<&'static str> = [
            GEOMETRIC_GLYPHS,
            ASTROLOGY_GLYPHS,
            ALCHEMY_GLYPHS,
            RUNE_GLYPHS,
        ]
        .into_iter()
        .flatten()
        .copied()
        .collect();
        set.into_iter().collect()
    })
}
