//! Board serializer: the inverse of [`parse_board`](crate::parse_board)

use crate::parser::KANBAN_PLUGIN_KEY;
use serde_yaml::Value;
use vaultgraph_core::{KanbanBoard, KanbanCard};
use vaultgraph_parser::card_metadata::format_due_date;

/// Render one card line at the given nesting depth
pub fn format_card(card: &KanbanCard, depth: usize) -> String {
    let mut line = format!(
        "{}- [{}] {}",
        "  ".repeat(depth),
        card.status.marker(),
        card.text
    );
    if let Some(due) = card.due_date {
        line.push(' ');
        line.push_str(&format_due_date(due));
    }
    line
}

/// Render a board as Kanban plugin markdown.
///
/// Card indentation follows tree depth, not the stored `indent_level`, so a
/// moved card is written at the root of its new column.
pub fn serialize_board(board: &KanbanBoard) -> String {
    let mut lines: Vec<String> = Vec::new();

    if !board.settings.is_empty() {
        lines.push("---".to_string());
        lines.extend(settings_lines(board));
        lines.push("---".to_string());
        lines.push(String::new());
    }

    for column in &board.columns {
        lines.push(format!("## {}", column.name));
        lines.push(String::new());
        write_cards(&column.cards, 0, &mut lines);
        lines.push(String::new());
    }

    lines.join("\n")
}

fn write_cards(cards: &[KanbanCard], depth: usize, lines: &mut Vec<String>) {
    for card in cards {
        lines.push(format_card(card, depth));
        write_cards(&card.subtasks, depth + 1, lines);
    }
}

fn settings_lines(board: &KanbanBoard) -> Vec<String> {
    match serde_yaml::to_string(&board.settings) {
        Ok(yaml) => yaml.trim_end().lines().map(str::to_string).collect(),
        Err(e) => {
            log::warn!(
                "Cannot serialize settings of {}, keeping plugin key only: {}",
                board.file_path,
                e
            );
            match board.settings.get(KANBAN_PLUGIN_KEY) {
                Some(Value::String(value)) => vec![format!("{}: {}", KANBAN_PLUGIN_KEY, value)],
                _ => Vec::new(),
            }
        }
    }
}
