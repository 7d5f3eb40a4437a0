//! # pairview - Terminal Pair Alignment Viewer
//!
//! Shows two aligned protein sequences one above the other, cut into rows
//! that fit the available width. The first sequence is colored by residue
//! class; the second is colored only where it differs from the first.
//!
//! ## Architecture
//!
//! - `colors`: residue class table and text-color mapping
//! - `chunking`: chunk size planning from the container width
//! - `render`: chunk views with differential coloring
//! - `model`: input validation, rendering session, application state
//! - `fasta`: reading the pair from a FASTA file
//! - `config`: TOML configuration
//! - `logging`: file-backed logger
//! - `event`: keyboard event handling
//! - `ui`: TUI rendering with ratatui
//! - `controller`: terminal setup and the event loop
//! - `print`: non-interactive output
//!
//! ## Example
//!
//! ```
//! use pairview::chunking::compute_chunk_size;
//! use pairview::render::render_alignment;
//!
//! let chunk_size = compute_chunk_size(300.0);
//! assert_eq!(chunk_size.get(), 23);
//!
//! let chunks = render_alignment("ARNDCE", "ARNDCQ", chunk_size);
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].difference_count(), 1);
//! ```

pub mod chunking;
pub mod colors;
pub mod config;
pub mod controller;
pub mod event;
pub mod fasta;
pub mod logging;
pub mod model;
pub mod print;
pub mod render;
pub mod ui;
