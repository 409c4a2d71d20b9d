//! Character ranges used to build the rule patterns.
//!
//! Each constant is a fragment meant to be placed inside a regex character
//! class, e.g. `format!("[{LATIN_LETTERS}{HEBREW_LETTERS}]+")`.

/// Basic Latin letters, both cases.
pub const LATIN_LETTERS: &str = "a-zA-Z";

/// Arabic letters from HAMZA (U+0621) to YEH (U+064A).
pub const ARABIC_LETTERS: &str = "\u{0621}-\u{064A}";

/// Hebrew letters from ALEF (U+05D0) to TAV (U+05EA).
pub const HEBREW_LETTERS: &str = "\u{05D0}-\u{05EA}";

/// ASCII digits.
pub const DIGITS: &str = "0-9";

/// ASCII word characters. Stands in for `\w`, which is Unicode-aware in `regex`.
pub const WORD: &str = "A-Za-z0-9_";

/// Arabic comma (U+060C), accepted next to the ASCII comma in free text.
pub const ARABIC_COMMA: char = '\u{060C}';

/// New shekel sign (U+20AA).
pub const SHEKEL_SIGN: char = '\u{20AA}';

/// Letters of all three scripts the portal accepts in free text.
pub fn all_letters() -> String {
    format!("{LATIN_LETTERS}{ARABIC_LETTERS}{HEBREW_LETTERS}")
}

/// Letters of the non-Latin scripts only.
pub fn non_latin_letters() -> String {
    format!("{ARABIC_LETTERS}{HEBREW_LETTERS}")
}
