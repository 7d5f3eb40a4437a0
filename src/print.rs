//! Non-interactive output.
//!
//! Writes the chunk views of a session to any writer, either with ANSI
//! colors (true-color backgrounds, underlined unchanged residues) or as
//! plain text where unchanged residues of the second row become a marker.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
};

use crate::colors::{Background, Rgb};
use crate::model::Session;
use crate::render::{ChunkView, RenderedResidue};
use crate::ui::{glyphs::Glyphs, ruler};

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

fn write_row<W: Write>(
    out: &mut W,
    row: &[RenderedResidue],
    glyphs: &Glyphs,
    color: bool,
) -> io::Result<()> {
    for residue in row {
        match (color, residue.color.background) {
            (true, Background::Filled(bg)) => queue!(
                out,
                SetBackgroundColor(term_color(bg)),
                SetForegroundColor(term_color(residue.color.text)),
                Print(residue.symbol),
                ResetColor
            )?,
            (true, Background::Transparent) => queue!(
                out,
                SetAttribute(Attribute::Underlined),
                Print(residue.symbol),
                SetAttribute(Attribute::Reset)
            )?,
            (false, Background::Filled(_)) => queue!(out, Print(residue.symbol))?,
            (false, Background::Transparent) => queue!(out, Print(glyphs.unchanged))?,
        }
    }
    writeln!(out)
}

/// Writes one chunk: both rows, the position ruler and a blank line.
pub fn write_chunk<W: Write>(
    out: &mut W,
    view: &ChunkView,
    glyphs: &Glyphs,
    color: bool,
) -> io::Result<()> {
    write_row(out, &view.reference, glyphs, color)?;
    write_row(out, &view.comparison, glyphs, color)?;
    writeln!(
        out,
        "{}",
        ruler(view.positions.start, view.positions.end, view.reference.len(), glyphs)
    )?;
    writeln!(out)
}

/// Writes every chunk of the session followed by a summary line.
pub fn write_session<W: Write>(
    out: &mut W,
    session: &Session,
    glyphs: &Glyphs,
    color: bool,
) -> io::Result<()> {
    let pair = session.pair();
    writeln!(out, "{} / {}", pair.first().id, pair.second().id)?;
    writeln!(out)?;
    for view in session.views() {
        write_chunk(out, view, glyphs, color)?;
    }
    writeln!(
        out,
        "Length: {} residues | Differences: {} | Chunk size: {}",
        session.total_length(),
        session.difference_count(),
        session.chunk_size()
    )?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::ChunkSize;
    use crate::model::SequencePair;
    use crate::ui::glyphs;

    fn session(a: &str, b: &str, size: usize) -> Session {
        let pair = SequencePair::from_raw(a, b).unwrap();
        Session::with_chunk_size(pair, ChunkSize::new(size).unwrap())
    }

    #[test]
    fn test_plain_output() {
        let mut out = Vec::new();
        let glyphs = glyphs::select(false);
        write_session(&mut out, &session("ARNDCEQG", "ARNDCEHG", 4), &glyphs, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        let expected = "\
seq1 / seq2

ARND
....
1 4

CEQG
..H.
5 8

Length: 8 residues | Differences: 1 | Chunk size: 4
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_colored_output() {
        // crossterm drops color codes when NO_COLOR is set
        if std::env::var_os("NO_COLOR").is_some() {
            return;
        }
        let mut out = Vec::new();
        let glyphs = glyphs::select(false);
        write_session(&mut out, &session("AC", "AD", 10), &glyphs, true).unwrap();

        let text = String::from_utf8(out).unwrap();
        // Hydrophobic background for the reference 'A'
        assert!(text.contains("48;2;103;228;166"));
        // Negatively charged background for the changed 'D'
        assert!(text.contains("48;2;252;156;172"));
        // Unchanged 'A' is underlined, not filled
        assert!(text.contains("\x1b[4mA"));
        assert!(!text.contains('.'));
    }
}
