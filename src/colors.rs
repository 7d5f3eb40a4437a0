//! Residue color classification.
//!
//! Every residue symbol maps to a background color chosen by its chemical
//! class, and every background maps to a readable text color:
//!
//! | Class                | Residues                  | Background |
//! |----------------------|---------------------------|------------|
//! | Cysteine             | C                         | `#FFEA00`  |
//! | Hydrophobic          | A I L M F W Y V P         | `#67E4A6`  |
//! | Glycine              | G                         | `#C4C4C4`  |
//! | Negatively charged   | D E                       | `#FC9CAC`  |
//! | Positively charged   | K R                       | `#BB99FF`  |
//! | Polar uncharged      | S T H Q N                 | `#80BFFF`  |
//! | Gap                  | -                         | `#FFFFFF`  |
//!
//! Lookup is case-insensitive. Anything else (digits, punctuation, letters
//! outside the alphabet) gets the unclassified white background.

use std::fmt;

use ratatui::style::Color;

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);

    /// Converts to a ratatui color for terminal rendering.
    pub fn to_color(self) -> Color {
        Color::Rgb(self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Chemical class of a residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueClass {
    Cysteine,
    Hydrophobic,
    Glycine,
    NegativelyCharged,
    PositivelyCharged,
    PolarUncharged,
    Gap,
}

impl ResidueClass {
    /// All classes, in legend order.
    pub const ALL: [ResidueClass; 7] = [
        ResidueClass::Cysteine,
        ResidueClass::Hydrophobic,
        ResidueClass::Glycine,
        ResidueClass::NegativelyCharged,
        ResidueClass::PositivelyCharged,
        ResidueClass::PolarUncharged,
        ResidueClass::Gap,
    ];

    /// Returns the class of a residue symbol, ignoring case.
    pub fn of(residue: char) -> Option<Self> {
        match residue.to_ascii_uppercase() {
            'C' => Some(ResidueClass::Cysteine),
            'A' | 'I' | 'L' | 'M' | 'F' | 'W' | 'Y' | 'V' | 'P' => Some(ResidueClass::Hydrophobic),
            'G' => Some(ResidueClass::Glycine),
            'D' | 'E' => Some(ResidueClass::NegativelyCharged),
            'K' | 'R' => Some(ResidueClass::PositivelyCharged),
            'S' | 'T' | 'H' | 'Q' | 'N' => Some(ResidueClass::PolarUncharged),
            '-' => Some(ResidueClass::Gap),
            _ => None,
        }
    }

    /// Background color shared by every member of the class.
    pub fn background(self) -> Rgb {
        match self {
            ResidueClass::Cysteine => Rgb(0xFF, 0xEA, 0x00),
            ResidueClass::Hydrophobic => Rgb(0x67, 0xE4, 0xA6),
            ResidueClass::Glycine => Rgb(0xC4, 0xC4, 0xC4),
            ResidueClass::NegativelyCharged => Rgb(0xFC, 0x9C, 0xAC),
            ResidueClass::PositivelyCharged => Rgb(0xBB, 0x99, 0xFF),
            ResidueClass::PolarUncharged => Rgb(0x80, 0xBF, 0xFF),
            ResidueClass::Gap => Rgb::WHITE,
        }
    }

    /// Residues belonging to the class.
    pub fn members(self) -> &'static [char] {
        match self {
            ResidueClass::Cysteine => &['C'],
            ResidueClass::Hydrophobic => &['A', 'I', 'L', 'M', 'F', 'W', 'Y', 'V', 'P'],
            ResidueClass::Glycine => &['G'],
            ResidueClass::NegativelyCharged => &['D', 'E'],
            ResidueClass::PositivelyCharged => &['K', 'R'],
            ResidueClass::PolarUncharged => &['S', 'T', 'H', 'Q', 'N'],
            ResidueClass::Gap => &['-'],
        }
    }

    /// Human-readable class name for the legend.
    pub fn name(self) -> &'static str {
        match self {
            ResidueClass::Cysteine => "Cysteine",
            ResidueClass::Hydrophobic => "Hydrophobic",
            ResidueClass::Glycine => "Glycine",
            ResidueClass::NegativelyCharged => "Negatively charged",
            ResidueClass::PositivelyCharged => "Positively charged",
            ResidueClass::PolarUncharged => "Polar uncharged",
            ResidueClass::Gap => "Gap",
        }
    }
}

/// Background of a rendered residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Background {
    /// Filled with a class color (or the unclassified default).
    Filled(Rgb),
    /// No fill: the residue is unchanged relative to the reference row.
    Transparent,
}

/// Background and text color for one residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResidueColor {
    pub background: Background,
    pub text: Rgb,
}

impl ResidueColor {
    /// The neutral marker used for unchanged residues.
    pub fn transparent() -> Self {
        Self {
            background: Background::Transparent,
            text: text_color(Background::Transparent),
        }
    }
}

/// Background used for symbols outside the residue alphabet.
pub const UNCLASSIFIED: Rgb = Rgb::WHITE;

/// Returns the background color of a residue symbol.
pub fn background_color(residue: char) -> Rgb {
    ResidueClass::of(residue)
        .map(ResidueClass::background)
        .unwrap_or(UNCLASSIFIED)
}

/// Returns the text color that stays readable on `background`.
///
/// Every background currently in the table takes black text; the match is
/// kept explicit so a darker class color can pick white without touching
/// any caller.
pub fn text_color(background: Background) -> Rgb {
    match background {
        Background::Transparent => Rgb::BLACK,
        Background::Filled(rgb) => match rgb {
            Rgb(0xFF, 0xEA, 0x00)
            | Rgb(0x67, 0xE4, 0xA6)
            | Rgb(0xC4, 0xC4, 0xC4)
            | Rgb(0xFC, 0x9C, 0xAC)
            | Rgb(0x80, 0xBF, 0xFF)
            | Rgb(0xFF, 0xFF, 0xFF)
            | Rgb(0xBB, 0x99, 0xFF) => Rgb::BLACK,
            _ => Rgb::BLACK,
        },
    }
}

/// Classifies a residue into its display colors.
pub fn classify(residue: char) -> ResidueColor {
    let background = Background::Filled(background_color(residue));
    ResidueColor {
        background,
        text: text_color(background),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHABET: &str = "ARNDCEQGHILKMFPSTWYV-";

    #[test]
    fn test_class_colors() {
        assert_eq!(background_color('C'), Rgb(0xFF, 0xEA, 0x00));
        assert_eq!(background_color('W'), Rgb(0x67, 0xE4, 0xA6));
        assert_eq!(background_color('G'), Rgb(0xC4, 0xC4, 0xC4));
        assert_eq!(background_color('E'), Rgb(0xFC, 0x9C, 0xAC));
        assert_eq!(background_color('R'), Rgb(0xBB, 0x99, 0xFF));
        assert_eq!(background_color('H'), Rgb(0x80, 0xBF, 0xFF));
        assert_eq!(background_color('-'), Rgb::WHITE);
    }

    #[test]
    fn test_case_insensitive() {
        for c in ALPHABET.chars() {
            assert_eq!(classify(c), classify(c.to_ascii_lowercase()));
        }
        assert_eq!(classify('a'), classify('A'));
    }

    #[test]
    fn test_unclassified_symbols() {
        for c in ['X', 'b', '1', '*', '.', ' '] {
            assert_eq!(classify(c).background, Background::Filled(UNCLASSIFIED));
            assert_eq!(classify(c).text, Rgb::BLACK);
        }
    }

    #[test]
    fn test_table_covers_alphabet() {
        let members: usize = ResidueClass::ALL.iter().map(|c| c.members().len()).sum();
        assert_eq!(members, 21);
        for c in ALPHABET.chars() {
            let class = ResidueClass::of(c).unwrap();
            assert!(class.members().contains(&c));
        }
    }

    #[test]
    fn test_text_color_always_black() {
        for class in ResidueClass::ALL {
            assert_eq!(text_color(Background::Filled(class.background())), Rgb::BLACK);
        }
        assert_eq!(ResidueColor::transparent().text, Rgb::BLACK);
    }

    #[test]
    fn test_hex_display() {
        assert_eq!(Rgb(0x67, 0xE4, 0xA6).to_string(), "#67E4A6");
        assert_eq!(UNCLASSIFIED.to_string(), "#FFFFFF");
    }
}
