//! Chunk planning.
//!
//! Decides how many residues fit on one displayed row for a given container
//! width. The width falls into one of four breakpoint tiers; each tier fixes
//! an estimated character width, a layout padding and a `[min, max]` range
//! for the resulting chunk size:
//!
//! | Width (px) | Char width | Padding | Chunk size |
//! |------------|------------|---------|------------|
//! | <= 320     | 12         | 16      | 8..=30     |
//! | <= 480     | 14         | 16      | 10..=40    |
//! | <= 768     | 16         | 32      | 15..=60    |
//! | otherwise  | 20         | 32      | 10..=80    |

use std::fmt;
use std::num::NonZeroUsize;

/// Number of residues displayed per row. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkSize(NonZeroUsize);

impl ChunkSize {
    /// Chunk size used before any container width is known.
    pub const INITIAL: ChunkSize = match NonZeroUsize::new(60) {
        Some(n) => ChunkSize(n),
        None => unreachable!(),
    };

    /// Creates a chunk size, rejecting zero.
    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(ChunkSize)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for ChunkSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Layout breakpoint tier of a container width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Up to 320px.
    Narrow,
    /// Up to 480px.
    Small,
    /// Up to 768px.
    Medium,
    /// Anything wider.
    Wide,
}

impl Tier {
    /// Returns the tier of a container width.
    ///
    /// NaN is treated as zero width; negative widths land in `Narrow`.
    pub fn for_width(width_px: f64) -> Self {
        let width_px = sanitize(width_px);
        if width_px <= 320.0 {
            Tier::Narrow
        } else if width_px <= 480.0 {
            Tier::Small
        } else if width_px <= 768.0 {
            Tier::Medium
        } else {
            Tier::Wide
        }
    }

    /// Estimated pixel width of one residue cell.
    pub fn char_width(self) -> f64 {
        match self {
            Tier::Narrow => 12.0,
            Tier::Small => 14.0,
            Tier::Medium => 16.0,
            Tier::Wide => 20.0,
        }
    }

    /// Horizontal padding subtracted from the container width.
    pub fn padding(self) -> f64 {
        match self {
            Tier::Narrow | Tier::Small => 16.0,
            Tier::Medium | Tier::Wide => 32.0,
        }
    }

    /// Smallest chunk size allowed in this tier.
    pub fn min_chunk(self) -> usize {
        match self {
            Tier::Narrow => 8,
            Tier::Small => 10,
            Tier::Medium => 15,
            Tier::Wide => 10,
        }
    }

    /// Largest chunk size allowed in this tier.
    pub fn max_chunk(self) -> usize {
        match self {
            Tier::Narrow => 30,
            Tier::Small => 40,
            Tier::Medium => 60,
            Tier::Wide => 80,
        }
    }
}

fn sanitize(width_px: f64) -> f64 {
    if width_px.is_nan() {
        0.0
    } else {
        width_px
    }
}

/// Computes the chunk size for a container width in pixels.
///
/// Total over all inputs: zero, negative, NaN and infinite widths all yield
/// a value inside the bounds of the width's tier.
pub fn compute_chunk_size(container_width_px: f64) -> ChunkSize {
    let width = sanitize(container_width_px);
    let tier = Tier::for_width(width);

    let available = width - tier.padding();
    let optimal = (available / tier.char_width()).floor();

    // Clamp in floating point first so huge or negative estimates never
    // reach the integer cast.
    let clamped = optimal.clamp(tier.min_chunk() as f64, tier.max_chunk() as f64) as usize;

    log::debug!(
        "chunk plan: width={}px tier={:?} optimal={} chunk={}",
        width,
        tier,
        optimal,
        clamped
    );

    // Every tier minimum is positive.
    ChunkSize::new(clamped).unwrap_or(ChunkSize::INITIAL)
}

/// Converts a width in terminal cells to an approximate pixel width.
pub fn cells_to_px(cells: u16, cell_width_px: u16) -> f64 {
    f64::from(cells) * f64::from(cell_width_px)
}

/// Number of screen lines one row of `chunk_size` residues needs when
/// wrapped at `columns`. A zero-width panel counts as one column.
pub fn row_segments(chunk_size: ChunkSize, columns: usize) -> usize {
    chunk_size.get().div_ceil(columns.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(width: f64) -> usize {
        compute_chunk_size(width).get()
    }

    #[test]
    fn test_tier_parameters() {
        let t = Tier::for_width(300.0);
        assert_eq!(t, Tier::Narrow);
        assert_eq!((t.char_width(), t.padding()), (12.0, 16.0));
        assert_eq!((t.min_chunk(), t.max_chunk()), (8, 30));

        let t = Tier::for_width(1000.0);
        assert_eq!(t, Tier::Wide);
        assert_eq!((t.char_width(), t.padding()), (20.0, 32.0));
        assert_eq!((t.min_chunk(), t.max_chunk()), (10, 80));
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::for_width(320.0), Tier::Narrow);
        assert_eq!(Tier::for_width(320.5), Tier::Small);
        assert_eq!(Tier::for_width(480.0), Tier::Small);
        assert_eq!(Tier::for_width(481.0), Tier::Medium);
        assert_eq!(Tier::for_width(768.0), Tier::Medium);
        assert_eq!(Tier::for_width(769.0), Tier::Wide);
    }

    #[test]
    fn test_optimal_sizes() {
        // (300 - 16) / 12 = 23.67
        assert_eq!(size(300.0), 23);
        // (400 - 16) / 14 = 27.43
        assert_eq!(size(400.0), 27);
        // (700 - 32) / 16 = 41.75
        assert_eq!(size(700.0), 41);
        // (1000 - 32) / 20 = 48.4
        assert_eq!(size(1000.0), 48);
    }

    #[test]
    fn test_clamped_to_tier_max() {
        assert_eq!(size(5000.0), 80);
        assert_eq!(size(768.0), 46);
        assert_eq!(size(f64::INFINITY), 80);
    }

    #[test]
    fn test_degenerate_widths() {
        assert_eq!(size(0.0), 8);
        assert_eq!(size(-250.0), 8);
        assert_eq!(size(f64::NAN), 8);
        assert_eq!(size(f64::NEG_INFINITY), 8);
        // (770 - 32) / 20 = 36.9, above the wide minimum
        assert_eq!(size(770.0), 36);
        // (481 - 32) / 16 = 28.06, above the medium minimum
        assert_eq!(size(481.0), 28);
    }

    #[test]
    fn test_always_within_tier_bounds() {
        let mut width = -100.0;
        while width < 3000.0 {
            let tier = Tier::for_width(width);
            let chunk = size(width);
            assert!(chunk >= tier.min_chunk(), "width {width} gave {chunk}");
            assert!(chunk <= tier.max_chunk(), "width {width} gave {chunk}");
            width += 7.5;
        }
    }

    #[test]
    fn test_chunk_size_new() {
        assert!(ChunkSize::new(0).is_none());
        assert_eq!(ChunkSize::new(3).map(ChunkSize::get), Some(3));
        assert_eq!(ChunkSize::default().get(), 60);
    }

    #[test]
    fn test_row_segments() {
        let chunk = ChunkSize::new(80).unwrap();
        assert_eq!(row_segments(chunk, 100), 1);
        assert_eq!(row_segments(chunk, 80), 1);
        assert_eq!(row_segments(chunk, 48), 2);
        assert_eq!(row_segments(chunk, 0), 80);
    }

    #[test]
    fn test_cells_to_px() {
        assert_eq!(cells_to_px(100, 8), 800.0);
        assert_eq!(cells_to_px(0, 8), 0.0);
    }
}
