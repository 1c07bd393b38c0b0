//! Board parser: frontmatter, level-2 heading columns, and nested checkbox cards

use lazy_static::lazy_static;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use vaultgraph_core::prelude::*;
use vaultgraph_parser::{parse_card_metadata, split_frontmatter};

lazy_static! {
    /// `## Column` (a third `#` makes it a subheading, not a column)
    static ref COLUMN_PATTERN: Regex = Regex::new(r"^##\s+(.+)$").unwrap();
    /// `- [ ] text` / `- [x] text` with leading indentation
    static ref CARD_PATTERN: Regex = Regex::new(r"^([\s]*)-\s*\[([ xX])\]\s+(.+)$").unwrap();
}

/// Settings key written by the Obsidian Kanban plugin
pub const KANBAN_PLUGIN_KEY: &str = "kanban-plugin";

/// Parse a board file.
///
/// Lines before the first column and lines that are neither columns nor
/// cards are ignored. Line numbers in the result are 1-based source lines,
/// frontmatter included.
///
/// A leading `---` block is skipped only when it parses as a YAML mapping;
/// otherwise its lines are scanned for columns and cards like the rest.
pub fn parse_board(text: &str, file_path: &str) -> Result<KanbanBoard> {
    let mut board = KanbanBoard::new(file_path);

    let mut skip_lines = 0;
    if let Some(frontmatter) = split_frontmatter(text) {
        match parse_settings(frontmatter.yaml) {
            Some(mapping) => {
                board.settings = mapping;
                skip_lines = frontmatter.line_count;
            }
            None => board.settings = fallback_settings(frontmatter.yaml),
        }
    }

    // (indent level, index path) of each open ancestor card
    let mut stack: Vec<(usize, Vec<usize>)> = Vec::new();

    for (idx, line) in text.lines().enumerate().skip(skip_lines) {
        let line_number = idx + 1;

        if let Some(caps) = COLUMN_PATTERN.captures(line) {
            let name = caps.get(1).map_or("", |m| m.as_str());
            let column = KanbanColumn::new(name, line_number).map_err(|_| {
                Error::validation_error(format!("Empty column name on line {}", line_number))
            })?;
            board.columns.push(column);
            stack.clear();
            continue;
        }

        let Some(caps) = CARD_PATTERN.captures(line) else {
            continue;
        };
        let Some(column_idx) = board.columns.len().checked_sub(1) else {
            log::debug!("Ignoring card outside any column on line {}", line_number);
            continue;
        };

        let indent_level = caps.get(1).map_or(0, |m| m.as_str().len()) / 2;
        let status = caps
            .get(2)
            .and_then(|m| m.as_str().chars().next())
            .map_or(CardStatus::Incomplete, CardStatus::from_marker);
        let card = build_card(caps.get(3).map_or("", |m| m.as_str()), status, line_number)?;
        let card = KanbanCard {
            indent_level,
            ..card
        };

        if indent_level > 0 {
            while stack.last().is_some_and(|(level, _)| *level >= indent_level) {
                stack.pop();
            }
        } else {
            stack.clear();
        }

        let path = match stack.last() {
            Some((_, parent_path)) => {
                let parent_path = parent_path.clone();
                let parent = board
                    .card_at_mut(&CardLocation::new(column_idx, parent_path.clone()))
                    .ok_or_else(|| {
                        Error::other(format!("Lost parent card on line {}", line_number))
                    })?;
                parent.subtasks.push(card);
                let mut path = parent_path;
                path.push(parent.subtasks.len() - 1);
                path
            }
            None => {
                let cards = &mut board.columns[column_idx].cards;
                cards.push(card);
                vec![cards.len() - 1]
            }
        };
        stack.push((indent_level, path));
    }

    log::debug!(
        "Parsed board {}: {} columns, {} cards",
        file_path,
        board.columns.len(),
        board.total_cards()
    );

    Ok(board)
}

fn build_card(raw: &str, status: CardStatus, line_number: usize) -> Result<KanbanCard> {
    let meta = parse_card_metadata(raw);
    let mut card = KanbanCard::new(meta.text, status).map_err(|_| {
        Error::validation_error(format!("Empty card text on line {}", line_number))
    })?;
    card.due_date = meta.due_date;
    card.tags = meta.tags;
    card.wikilinks = meta.wikilinks;
    card.line_number = line_number;
    Ok(card)
}

/// Frontmatter YAML as a settings map, `None` unless it is a mapping
fn parse_settings(yaml: &str) -> Option<Mapping> {
    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(mapping)) => Some(mapping),
        Ok(_) => None,
        Err(e) => {
            log::debug!("Board frontmatter is not valid YAML: {}", e);
            None
        }
    }
}

/// A block that is not a YAML mapping still marks the board as a Kanban
/// plugin board when it mentions the plugin key
fn fallback_settings(yaml: &str) -> Mapping {
    let mut mapping = Mapping::new();
    if yaml.contains("kanban-plugin:") {
        mapping.insert(
            Value::String(KANBAN_PLUGIN_KEY.to_string()),
            Value::String("basic".to_string()),
        );
    }
    mapping
}
