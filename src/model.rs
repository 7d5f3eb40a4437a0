//! Data model for the pair viewer.
//!
//! This module contains all data structures for representing:
//! - The two validated input sequences
//! - The rendering session (chunk size and derived chunk views)
//! - Application state (scrolling, mode, messages)

use thiserror::Error;

use crate::chunking::{compute_chunk_size, row_segments, ChunkSize};
use crate::render::{render_alignment, ChunkView};

/// Residue symbols accepted as input (gap included).
pub const ALPHABET: &str = "ARNDCEQGHILKMFPSTWYV-";

/// Represents a single sequence with its identifier and data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The sequence identifier (from FASTA header, without '>')
    pub id: String,
    /// The residues
    pub data: String,
}

impl Sequence {
    /// Creates a new sequence.
    pub fn new(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
        }
    }

    /// Returns the length of the sequence.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Which of the two inputs an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Which {
    First,
    Second,
}

impl std::fmt::Display for Which {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Which::First => write!(f, "first"),
            Which::Second => write!(f, "second"),
        }
    }
}

/// Errors raised while validating the input pair.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("The {which} sequence is empty")]
    Empty { which: Which },

    #[error(
        "Invalid residue '{symbol}' at position {position} of the {which} sequence \
         (allowed: A, R, N, D, C, E, Q, G, H, I, L, K, M, F, P, S, T, W, Y, V and -)"
    )]
    InvalidResidue {
        which: Which,
        position: usize,
        symbol: char,
    },

    #[error("Sequences must have the same length (first: {first}, second: {second})")]
    LengthMismatch { first: usize, second: usize },
}

/// Strips all whitespace from raw sequence text and uppercases it.
pub fn clean_sequence(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Two sequences of equal length, uppercased and drawn from [`ALPHABET`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePair {
    first: Sequence,
    second: Sequence,
}

impl SequencePair {
    /// Validates and normalizes two sequences.
    pub fn new(first: Sequence, second: Sequence) -> Result<Self, InputError> {
        let first = normalize(first, Which::First)?;
        let second = normalize(second, Which::Second)?;

        if first.len() != second.len() {
            return Err(InputError::LengthMismatch {
                first: first.len(),
                second: second.len(),
            });
        }

        Ok(Self { first, second })
    }

    /// Validates two raw sequence strings with default identifiers.
    pub fn from_raw(first: &str, second: &str) -> Result<Self, InputError> {
        Self::new(
            Sequence::new("seq1", clean_sequence(first)),
            Sequence::new("seq2", clean_sequence(second)),
        )
    }

    pub fn first(&self) -> &Sequence {
        &self.first
    }

    pub fn second(&self) -> &Sequence {
        &self.second
    }

    /// Shared length of both sequences.
    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }
}

fn normalize(seq: Sequence, which: Which) -> Result<Sequence, InputError> {
    if seq.is_empty() {
        return Err(InputError::Empty { which });
    }

    let data = seq.data.to_ascii_uppercase();
    if let Some((i, symbol)) = data.chars().enumerate().find(|(_, c)| !ALPHABET.contains(*c)) {
        return Err(InputError::InvalidResidue {
            which,
            position: i + 1,
            symbol,
        });
    }

    Ok(Sequence { id: seq.id, data })
}

/// The currently displayed pair, its chunk size and the derived views.
///
/// Views are rebuilt from scratch whenever the pair or the chunk size
/// changes; a resize that lands on the same chunk size keeps them.
#[derive(Debug, Clone)]
pub struct Session {
    pair: SequencePair,
    chunk_size: ChunkSize,
    views: Vec<ChunkView>,
}

impl Session {
    /// Creates a session at the initial chunk size.
    pub fn new(pair: SequencePair) -> Self {
        Self::with_chunk_size(pair, ChunkSize::INITIAL)
    }

    /// Creates a session at a fixed chunk size.
    pub fn with_chunk_size(pair: SequencePair, chunk_size: ChunkSize) -> Self {
        let views = render_alignment(&pair.first().data, &pair.second().data, chunk_size);
        Self {
            pair,
            chunk_size,
            views,
        }
    }

    /// Re-plans the chunk size for a container width.
    ///
    /// Returns true if the views were recomputed.
    pub fn resize(&mut self, container_width_px: f64) -> bool {
        let chunk_size = compute_chunk_size(container_width_px);
        if chunk_size == self.chunk_size {
            return false;
        }
        log::debug!("chunk size {} -> {}", self.chunk_size, chunk_size);
        *self = Self::with_chunk_size(self.pair.clone(), chunk_size);
        true
    }

    /// Replaces the displayed pair, keeping the chunk size.
    pub fn replace_sequences(&mut self, pair: SequencePair) {
        log::debug!("replacing sequences (length {})", pair.len());
        *self = Self::with_chunk_size(pair, self.chunk_size);
    }

    pub fn pair(&self) -> &SequencePair {
        &self.pair
    }

    pub fn chunk_size(&self) -> ChunkSize {
        self.chunk_size
    }

    pub fn views(&self) -> &[ChunkView] {
        &self.views
    }

    /// Total sequence length, for the summary label.
    pub fn total_length(&self) -> usize {
        self.pair.len()
    }

    /// Number of positions where the two sequences differ.
    pub fn difference_count(&self) -> usize {
        self.views.iter().map(ChunkView::difference_count).sum()
    }
}

/// Application mode for handling different input states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Command input mode (after pressing ':')
    Command(String),
    /// Forward search input (after pressing '/')
    Search(String),
    /// Backward search input (after pressing '?')
    SearchBackward(String),
}

/// Screen lines taken by one chunk whose rows are wrapped at `panel_columns`:
/// both rows for every segment, then the ruler and a separator.
pub fn chunk_height(chunk_size: ChunkSize, panel_columns: usize) -> usize {
    2 * row_segments(chunk_size, panel_columns) + 2
}

/// Start offsets (0-based) of every occurrence of `motif` in either row,
/// overlapping matches included.
pub fn match_positions(pair: &SequencePair, motif: &str) -> Vec<usize> {
    let motif = motif.as_bytes();
    if motif.is_empty() {
        return Vec::new();
    }
    let mut positions: Vec<usize> = [pair.first(), pair.second()]
        .iter()
        .flat_map(|seq| {
            seq.data
                .as_bytes()
                .windows(motif.len())
                .enumerate()
                .filter(|(_, window)| *window == motif)
                .map(|(i, _)| i)
        })
        .collect();
    positions.sort_unstable();
    positions.dedup();
    positions
}

/// The last search, repeated by `n` and `N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub motif: String,
    pub backward: bool,
    /// Start offset of the last match jumped to
    pub anchor: Option<usize>,
}

/// The complete application state.
#[derive(Debug)]
pub struct AppState {
    /// Rendering session
    pub session: Session,
    /// Index of the first chunk shown
    pub first_chunk: usize,
    /// Number of chunks that fit on screen
    pub visible_chunks: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Whether the help overlay is shown
    pub show_help: bool,
    /// Whether the color legend panel is shown
    pub show_legend: bool,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Status message to display
    pub status_message: Option<String>,
    /// Last executed search
    pub last_search: Option<SearchState>,
}

impl AppState {
    /// Creates a new application state for a sequence pair.
    pub fn new(pair: SequencePair) -> Self {
        Self {
            session: Session::new(pair),
            first_chunk: 0,
            visible_chunks: 1,
            mode: AppMode::Normal,
            show_help: false,
            show_legend: true,
            should_quit: false,
            status_message: None,
            last_search: None,
        }
    }

    /// Number of chunk views in the session.
    pub fn chunk_count(&self) -> usize {
        self.session.views().len()
    }

    /// Applies a new container width and alignment panel size.
    ///
    /// Rows longer than `panel_columns` wrap, so the number of visible chunks
    /// follows the wrapped chunk height. The first visible residue stays on
    /// screen when the chunk size changes.
    pub fn resize(&mut self, container_width_px: f64, panel_columns: usize, content_rows: usize) {
        let first_residue = self.first_residue();
        if self.session.resize(container_width_px) {
            self.first_chunk = first_residue / self.session.chunk_size().get();
        }

        let chunk_size = self.session.chunk_size();
        if chunk_size.get() > panel_columns {
            log::debug!(
                "chunk size {} exceeds {} panel columns, wrapping rows",
                chunk_size,
                panel_columns
            );
        }
        self.visible_chunks = (content_rows / chunk_height(chunk_size, panel_columns)).max(1);
        self.clamp_scroll();
    }

    /// 0-based offset of the first residue on screen.
    fn first_residue(&self) -> usize {
        self.first_chunk * self.session.chunk_size().get()
    }

    /// Scrolls down by `n` chunks.
    pub fn scroll_down(&mut self, n: usize) {
        self.first_chunk = self.first_chunk.saturating_add(n);
        self.clamp_scroll();
    }

    /// Scrolls up by `n` chunks.
    pub fn scroll_up(&mut self, n: usize) {
        self.first_chunk = self.first_chunk.saturating_sub(n);
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down((self.visible_chunks / 2).max(1));
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up((self.visible_chunks / 2).max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.visible_chunks);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.visible_chunks);
    }

    pub fn goto_top(&mut self) {
        self.first_chunk = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.first_chunk = self.max_first_chunk();
    }

    /// Scrolls so that the chunk holding 1-based residue `position` is on top.
    pub fn goto_residue(&mut self, position: usize) {
        if position == 0 || position > self.session.total_length() {
            self.status_message = Some(format!("Invalid position: {}", position));
            return;
        }
        self.first_chunk = (position - 1) / self.session.chunk_size().get();
        self.clamp_scroll();
    }

    fn max_first_chunk(&self) -> usize {
        self.chunk_count().saturating_sub(self.visible_chunks)
    }

    fn clamp_scroll(&mut self) {
        self.first_chunk = self.first_chunk.min(self.max_first_chunk());
    }

    /// Toggles the legend panel.
    pub fn toggle_legend(&mut self) {
        self.show_legend = !self.show_legend;
    }

    pub fn dismiss_help(&mut self) {
        self.show_help = false;
    }

    /// Enters command mode.
    pub fn enter_command_mode(&mut self) {
        self.mode = AppMode::Command(String::new());
        self.status_message = None;
    }

    /// Handles a character input in command mode.
    pub fn command_input(&mut self, c: char) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.push(c);
        }
    }

    /// Handles backspace in command mode.
    pub fn command_backspace(&mut self) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            if cmd.pop().is_none() {
                self.mode = AppMode::Normal;
            }
        }
    }

    /// Executes the current command.
    pub fn execute_command(&mut self) {
        if let AppMode::Command(cmd) = std::mem::take(&mut self.mode) {
            match cmd.trim() {
                "q" | "quit" => self.should_quit = true,
                "h" | "help" => self.show_help = true,
                "legend" => self.toggle_legend(),
                other => match other.parse::<usize>() {
                    Ok(position) => self.goto_residue(position),
                    Err(_) => self.status_message = Some(format!("Unknown command: {}", other)),
                },
            }
        }
    }

    /// Cancels command mode and returns to normal mode.
    pub fn cancel_command(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Enters search mode, forward (`/`) or backward (`?`).
    pub fn enter_search_mode(&mut self, backward: bool) {
        self.mode = if backward {
            AppMode::SearchBackward(String::new())
        } else {
            AppMode::Search(String::new())
        };
        self.status_message = None;
    }

    /// Handles a character input in search mode.
    pub fn search_input(&mut self, c: char) {
        if let AppMode::Search(motif) | AppMode::SearchBackward(motif) = &mut self.mode {
            motif.push(c);
        }
    }

    /// Handles backspace in search mode.
    pub fn search_backspace(&mut self) {
        if let AppMode::Search(motif) | AppMode::SearchBackward(motif) = &mut self.mode {
            if motif.pop().is_none() {
                self.mode = AppMode::Normal;
            }
        }
    }

    /// Cancels search mode and returns to normal mode.
    pub fn cancel_search(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Runs the typed search from the top of the screen.
    ///
    /// Motifs are matched case-insensitively against both rows.
    pub fn execute_search(&mut self) {
        let (motif, backward) = match std::mem::take(&mut self.mode) {
            AppMode::Search(motif) => (motif, false),
            AppMode::SearchBackward(motif) => (motif, true),
            other => {
                self.mode = other;
                return;
            }
        };

        let motif = clean_sequence(&motif);
        if motif.is_empty() {
            return;
        }
        self.last_search = Some(SearchState {
            motif,
            backward,
            anchor: None,
        });
        self.search(backward);
    }

    /// Repeats the last search in its direction.
    pub fn find_next(&mut self) {
        match &self.last_search {
            Some(search) => {
                let backward = search.backward;
                self.search(backward);
            }
            None => self.status_message = Some("No previous search".to_string()),
        }
    }

    /// Repeats the last search in the opposite direction.
    pub fn find_previous(&mut self) {
        match &self.last_search {
            Some(search) => {
                let backward = !search.backward;
                self.search(backward);
            }
            None => self.status_message = Some("No previous search".to_string()),
        }
    }

    fn search(&mut self, backward: bool) {
        let Some(search) = &self.last_search else {
            return;
        };
        let positions = match_positions(self.session.pair(), &search.motif);
        if positions.is_empty() {
            self.status_message = Some(format!("Pattern not found: {}", search.motif));
            return;
        }

        // Without a previous match, the top residue itself may match going forward
        let found = if backward {
            let before = search.anchor.unwrap_or_else(|| self.first_residue());
            positions.iter().rev().find(|&&p| p < before)
        } else {
            match search.anchor {
                Some(anchor) => positions.iter().find(|&&p| p > anchor),
                None => positions.iter().find(|&&p| p >= self.first_residue()),
            }
        };
        let (position, wrapped) = match found {
            Some(&p) => (p, false),
            None if backward => (positions[positions.len() - 1], true),
            None => (positions[0], true),
        };

        if let Some(search) = self.last_search.as_mut() {
            search.anchor = Some(position);
        }
        self.goto_residue(position + 1);
        self.status_message = Some(if wrapped {
            format!("Search wrapped, match at residue {}", position + 1)
        } else {
            format!("Match at residue {}", position + 1)
        });
    }
}
