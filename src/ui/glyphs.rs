#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyphs {
    /// Fills the gap between the start and end position labels
    pub ruler: &'static str,
    /// Separates consecutive chunks
    pub chunk_separator: &'static str,
    /// Legend color sample
    pub swatch: &'static str,
    /// Marks an unchanged residue in plain-text output
    pub unchanged: char,
    pub arrow_up: &'static str,
    pub arrow_down: &'static str,
}

pub fn select(fancy_requested: bool) -> Glyphs {
    if fancy_requested {
        fancy()
    } else {
        ascii()
    }
}

fn ascii() -> Glyphs {
    Glyphs {
        ruler: "-",
        chunk_separator: " ",
        swatch: "  ",
        unchanged: '.',
        arrow_up: "^",
        arrow_down: "v",
    }
}

fn fancy() -> Glyphs {
    Glyphs {
        ruler: "─",
        chunk_separator: "┄",
        swatch: "██",
        unchanged: '·',
        arrow_up: "↑",
        arrow_down: "↓",
    }
}
