//! Core data models for vault links and Kanban boards.
//!
//! Link types describe what the extractor pulls out of a note and what the
//! graph stores per node. Kanban types form an owned tree: columns own their
//! root cards, cards own their subtasks, and [`CardLocation`] addresses a card
//! by index chain instead of by reference.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Links extracted from one note, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedLinks {
    pub wikilinks: Vec<String>,
    pub markdown_links: Vec<String>,
    pub embeds: Vec<String>,
    /// Union of the three lists, first-seen order, no duplicates
    pub all_links: Vec<String>,
}

impl ExtractedLinks {
    /// Raw per-kind counts (before resolution and dedup)
    pub fn counts(&self) -> LinkTypeCounts {
        LinkTypeCounts {
            wikilinks: self.wikilinks.len(),
            markdown_links: self.markdown_links.len(),
            embeds: self.embeds.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.all_links.is_empty()
    }
}

/// Per-kind link counters on a graph node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTypeCounts {
    pub wikilinks: usize,
    pub markdown_links: usize,
    pub embeds: usize,
}

impl LinkTypeCounts {
    pub fn total(&self) -> usize {
        self.wikilinks + self.markdown_links + self.embeds
    }
}

/// A note in the link graph, keyed by its vault-relative POSIX path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub path: String,
    /// Resolved link targets, insertion order, no duplicates
    pub outlinks: Vec<String>,
    /// Notes linking here, insertion order, no duplicates
    pub inlinks: Vec<String>,
    pub link_type_counts: LinkTypeCounts,
}

impl GraphNode {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Append an outlink if not already present. Returns true when added.
    pub fn add_outlink(&mut self, target: &str) -> bool {
        push_unique(&mut self.outlinks, target)
    }

    /// Append an inlink if not already present. Returns true when added.
    pub fn add_inlink(&mut self, source: &str) -> bool {
        push_unique(&mut self.inlinks, source)
    }

    pub fn outlink_count(&self) -> usize {
        self.outlinks.len()
    }

    pub fn inlink_count(&self) -> usize {
        self.inlinks.len()
    }

    /// No edges in either direction
    pub fn is_orphan(&self) -> bool {
        self.outlinks.is_empty() && self.inlinks.is_empty()
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) -> bool {
    if list.iter().any(|v| v == value) {
        return false;
    }
    list.push(value.to_string());
    true
}

/// A readable markdown file: vault-relative path plus content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: String,
    pub content: String,
}

impl Document {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// A wikilink occurrence pointing at a given note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backlink {
    pub source_path: String,
    /// Raw link target as written (heading anchor kept)
    pub link_target: String,
    pub line_number: usize,
    /// The trimmed line the link appears on
    pub context: String,
}

/// Checkbox state of a Kanban card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    #[default]
    Incomplete,
    Completed,
}

impl CardStatus {
    /// Character inside the checkbox brackets
    pub fn marker(self) -> char {
        match self {
            Self::Incomplete => ' ',
            Self::Completed => 'x',
        }
    }

    /// Status for a checkbox marker (`x` or `X` means completed)
    pub fn from_marker(marker: char) -> Self {
        if marker.eq_ignore_ascii_case(&'x') {
            Self::Completed
        } else {
            Self::Incomplete
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Incomplete => Self::Completed,
            Self::Completed => Self::Incomplete,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Incomplete => "incomplete",
            Self::Completed => "completed",
        }
    }
}

impl std::str::FromStr for CardStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "incomplete" | "todo" | "open" => Ok(Self::Incomplete),
            "completed" | "complete" | "done" => Ok(Self::Completed),
            other => Err(Error::validation_error(format!(
                "Unknown card status '{}': expected 'incomplete' or 'completed'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for CardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A checkbox card on a Kanban board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanCard {
    /// Card text with the due-date token removed
    pub text: String,
    pub status: CardStatus,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub wikilinks: Vec<String>,
    pub subtasks: Vec<KanbanCard>,
    pub indent_level: usize,
    /// 1-based source line; 0 for cards created in memory
    pub line_number: usize,
}

impl KanbanCard {
    /// Create a root-level card, rejecting empty text
    pub fn new(text: impl Into<String>, status: CardStatus) -> Result<Self> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(Error::validation_error("Card text cannot be empty"));
        }

        Ok(Self {
            text,
            status,
            due_date: None,
            tags: Vec::new(),
            wikilinks: Vec::new(),
            subtasks: Vec::new(),
            indent_level: 0,
            line_number: 0,
        })
    }

    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == CardStatus::Completed
    }

    /// This card plus every descendant
    pub fn tree_size(&self) -> usize {
        1 + self.subtasks.iter().map(KanbanCard::tree_size).sum::<usize>()
    }

    /// Completed cards in this subtree, this card included
    pub fn completed_in_tree(&self) -> usize {
        usize::from(self.is_completed())
            + self
                .subtasks
                .iter()
                .map(KanbanCard::completed_in_tree)
                .sum::<usize>()
    }
}

/// A level-2 heading column and the cards under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanColumn {
    pub name: String,
    pub cards: Vec<KanbanCard>,
    pub line_number: usize,
}

impl KanbanColumn {
    /// Create an empty column, rejecting blank names
    pub fn new(name: impl Into<String>, line_number: usize) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(Error::validation_error("Column name cannot be empty"));
        }

        Ok(Self {
            name,
            cards: Vec::new(),
            line_number,
        })
    }

    /// Root-level cards only
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Cards at every nesting level
    pub fn total_cards(&self) -> usize {
        self.cards.iter().map(KanbanCard::tree_size).sum()
    }

    pub fn completed_cards(&self) -> usize {
        self.cards.iter().map(KanbanCard::completed_in_tree).sum()
    }
}

/// Address of a card: column index plus index chain from the column's root list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardLocation {
    pub column: usize,
    pub path: Vec<usize>,
}

impl CardLocation {
    pub fn new(column: usize, path: Vec<usize>) -> Self {
        Self { column, path }
    }

    /// Location of the parent card, `None` for root cards
    pub fn parent(&self) -> Option<CardLocation> {
        if self.path.len() < 2 {
            return None;
        }
        Some(CardLocation {
            column: self.column,
            path: self.path[..self.path.len() - 1].to_vec(),
        })
    }

    /// Nesting depth, 0 for root cards
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// A parsed Kanban board
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KanbanBoard {
    pub file_path: String,
    pub columns: Vec<KanbanColumn>,
    /// Frontmatter keys, in source order
    pub settings: serde_yaml::Mapping,
}

impl KanbanBoard {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    /// Cards at every nesting level across all columns
    pub fn total_cards(&self) -> usize {
        self.columns.iter().map(KanbanColumn::total_cards).sum()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&KanbanColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut KanbanColumn> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Card at a location, if the location is valid
    pub fn card_at(&self, location: &CardLocation) -> Option<&KanbanCard> {
        let column = self.columns.get(location.column)?;
        let (first, rest) = location.path.split_first()?;
        let mut card = column.cards.get(*first)?;
        for index in rest {
            card = card.subtasks.get(*index)?;
        }
        Some(card)
    }

    /// Mutable card at a location, if the location is valid
    pub fn card_at_mut(&mut self, location: &CardLocation) -> Option<&mut KanbanCard> {
        let column = self.columns.get_mut(location.column)?;
        let (first, rest) = location.path.split_first()?;
        let mut card = column.cards.get_mut(*first)?;
        for index in rest {
            card = card.subtasks.get_mut(*index)?;
        }
        Some(card)
    }

    /// Detach a card (with its subtasks) from the tree
    pub fn remove_card(&mut self, location: &CardLocation) -> Option<KanbanCard> {
        let (last, _) = location.path.split_last()?;
        let siblings = match location.parent() {
            Some(parent) => &mut self.card_at_mut(&parent)?.subtasks,
            None => &mut self.columns.get_mut(location.column)?.cards,
        };
        if *last >= siblings.len() {
            return None;
        }
        Some(siblings.remove(*last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(text: &str) -> KanbanCard {
        KanbanCard::new(text, CardStatus::Incomplete).unwrap()
    }

    fn sample_board() -> KanbanBoard {
        let mut main = card("Main");
        main.subtasks.push(card("Sub1"));
        main.subtasks.push(card("Sub2"));

        let mut todo = KanbanColumn::new("To Do", 1).unwrap();
        todo.cards.push(main);
        todo.cards.push(card("Other"));

        let mut board = KanbanBoard::new("board.md");
        board.columns.push(todo);
        board
    }

    #[test]
    fn test_graph_node_dedup() {
        let mut node = GraphNode::new("a.md");
        assert!(node.add_outlink("b.md"));
        assert!(!node.add_outlink("b.md"));
        assert!(node.add_inlink("c.md"));
        assert_eq!(node.outlink_count(), 1);
        assert_eq!(node.inlink_count(), 1);
        assert!(!node.is_orphan());
    }

    #[test]
    fn test_extracted_links_counts() {
        let links = ExtractedLinks {
            wikilinks: vec!["A".into(), "A".into()],
            markdown_links: vec!["B".into()],
            embeds: vec![],
            all_links: vec!["A".into(), "B".into()],
        };
        let counts = links.counts();
        assert_eq!(counts.wikilinks, 2);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_card_rejects_empty_text() {
        assert!(KanbanCard::new("   ", CardStatus::Incomplete).is_err());
        assert_eq!(card("  padded ").text, "padded");
    }

    #[test]
    fn test_column_rejects_empty_name() {
        assert!(KanbanColumn::new("", 1).is_err());
        assert_eq!(KanbanColumn::new(" Done ", 3).unwrap().name, "Done");
    }

    #[test]
    fn test_status_markers() {
        assert_eq!(CardStatus::from_marker('X'), CardStatus::Completed);
        assert_eq!(CardStatus::from_marker(' '), CardStatus::Incomplete);
        assert_eq!(CardStatus::Completed.marker(), 'x');
        assert_eq!(CardStatus::Completed.toggled(), CardStatus::Incomplete);
        assert_eq!("done".parse::<CardStatus>().unwrap(), CardStatus::Completed);
        assert!("maybe".parse::<CardStatus>().is_err());
    }

    #[test]
    fn test_board_counts() {
        let board = sample_board();
        assert_eq!(board.columns[0].card_count(), 2);
        assert_eq!(board.columns[0].total_cards(), 4);
        assert_eq!(board.total_cards(), 4);
    }

    #[test]
    fn test_card_at_and_remove() {
        let mut board = sample_board();
        let loc = CardLocation::new(0, vec![0, 1]);
        assert_eq!(board.card_at(&loc).unwrap().text, "Sub2");
        assert_eq!(loc.parent(), Some(CardLocation::new(0, vec![0])));
        assert_eq!(loc.depth(), 1);

        let removed = board.remove_card(&loc).unwrap();
        assert_eq!(removed.text, "Sub2");
        assert_eq!(board.total_cards(), 3);
        assert!(board.card_at(&loc).is_none());
    }

    #[test]
    fn test_remove_root_card_keeps_subtasks() {
        let mut board = sample_board();
        let removed = board.remove_card(&CardLocation::new(0, vec![0])).unwrap();
        assert_eq!(removed.subtasks.len(), 2);
        assert_eq!(board.columns[0].cards[0].text, "Other");
    }
}
