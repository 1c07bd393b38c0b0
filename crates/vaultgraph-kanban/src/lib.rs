//! # Kanban Boards
//!
//! Parse, edit, and re-serialize boards written by the Obsidian Kanban
//! plugin: `##` headings are columns, checkbox list items are cards, and
//! indentation nests cards as subtasks.
//!
//! ```
//! use vaultgraph_kanban::{CardPosition, move_card, parse_board, serialize_board};
//!
//! let text = "## To Do\n\n- [ ] Main\n  - [ ] Sub\n\n## Done\n\n";
//! let mut board = parse_board(text, "Board.md").unwrap();
//! assert_eq!(board.total_cards(), 2);
//!
//! move_card(&mut board, "Main", "To Do", "Done", CardPosition::End).unwrap();
//! assert_eq!(
//!     serialize_board(&board),
//!     "## To Do\n\n\n## Done\n\n- [ ] Main\n  - [ ] Sub\n"
//! );
//! ```
//!
//! Boards are edited as owned trees. A card is addressed by a
//! [`CardLocation`](vaultgraph_core::CardLocation): a column index plus the
//! index chain from the column's root list down to the card.

pub mod lookup;
pub mod mutations;
pub mod parser;
pub mod serializer;
pub mod stats;

pub use lookup::{CardMatch, find_card, locate_card};
pub use mutations::{CardPosition, MoveOutcome, NewCard, add_card, move_card, toggle_card};
pub use parser::{KANBAN_PLUGIN_KEY, parse_board};
pub use serializer::{format_card, serialize_board};
pub use stats::{BoardStatistics, ColumnStatistics, board_statistics};

pub mod prelude {
    pub use crate::lookup::{CardMatch, find_card, locate_card};
    pub use crate::mutations::{CardPosition, MoveOutcome, NewCard, add_card, move_card, toggle_card};
    pub use crate::parser::parse_board;
    pub use crate::serializer::serialize_board;
    pub use crate::stats::{BoardStatistics, ColumnStatistics, board_statistics};
    pub use vaultgraph_core::prelude::*;
}
