//! Differential rendering of a sequence pair.
//!
//! Both sequences are cut into aligned chunks of `chunk_size` residues. For
//! each chunk two rows are produced:
//! - the reference row, where every residue takes its class color;
//! - the comparison row, where a residue takes its class color only when it
//!   differs from the residue above it, and is otherwise left transparent.
//!
//! The renderer does not check that the two sequences have equal length. If
//! they do not, the shorter one simply runs out and its trailing row segments
//! are empty; chunk boundaries always follow the first sequence.

use crate::chunking::ChunkSize;
use crate::colors::{classify, ResidueColor};

/// One residue as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedResidue {
    pub symbol: char,
    pub color: ResidueColor,
}

impl RenderedResidue {
    /// True if the residue is drawn with the neutral "unchanged" marker.
    pub fn is_unchanged(&self) -> bool {
        self.color == ResidueColor::transparent()
    }
}

/// 1-based, inclusive residue positions covered by a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionRange {
    pub start: usize,
    pub end: usize,
}

/// The display record of one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkView {
    /// Zero-based chunk index.
    pub index: usize,
    pub reference: Vec<RenderedResidue>,
    pub comparison: Vec<RenderedResidue>,
    pub positions: PositionRange,
}

impl ChunkView {
    /// Number of differing positions in this chunk.
    pub fn difference_count(&self) -> usize {
        self.comparison.iter().filter(|r| !r.is_unchanged()).count()
    }
}

/// Number of chunks needed to cover `length` residues.
pub fn chunk_count(length: usize, chunk_size: ChunkSize) -> usize {
    length.div_ceil(chunk_size.get())
}

/// Position range of the chunk at `index` for a sequence of `length` residues.
pub fn position_range(index: usize, chunk_size: ChunkSize, length: usize) -> PositionRange {
    let size = chunk_size.get();
    PositionRange {
        start: index * size + 1,
        end: ((index + 1) * size).min(length),
    }
}

/// Renders two aligned sequences into chunk views.
pub fn render_alignment(sequence1: &str, sequence2: &str, chunk_size: ChunkSize) -> Vec<ChunkView> {
    let seq1: Vec<char> = sequence1.chars().collect();
    let seq2: Vec<char> = sequence2.chars().collect();
    let size = chunk_size.get();

    seq1.chunks(size)
        .enumerate()
        .map(|(index, reference)| {
            let offset = index * size;
            let comparison = slice(&seq2, offset, offset + size);
            ChunkView {
                index,
                reference: render_reference(reference),
                comparison: render_comparison(comparison, reference),
                positions: position_range(index, chunk_size, seq1.len()),
            }
        })
        .collect()
}

fn slice(seq: &[char], start: usize, end: usize) -> &[char] {
    let start = start.min(seq.len());
    let end = end.min(seq.len());
    &seq[start..end]
}

fn render_reference(residues: &[char]) -> Vec<RenderedResidue> {
    residues
        .iter()
        .map(|&symbol| RenderedResidue {
            symbol,
            color: classify(symbol),
        })
        .collect()
}

fn render_comparison(residues: &[char], reference: &[char]) -> Vec<RenderedResidue> {
    residues
        .iter()
        .enumerate()
        .map(|(i, &symbol)| {
            let color = if reference.get(i) == Some(&symbol) {
                ResidueColor::transparent()
            } else {
                classify(symbol)
            };
            RenderedResidue { symbol, color }
        })
        .collect()
}
