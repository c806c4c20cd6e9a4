//! Reads typing practice results that were posted into a chat as
//! `{layout=colemak_DH,wpm=87.5,accuracy=96%}` tags, pulls them out of the chat's html export
//! and turns them into trend charts.
//!

pub mod analysis;
pub mod charts;
pub mod cli;
pub mod extract;
pub mod utils;
