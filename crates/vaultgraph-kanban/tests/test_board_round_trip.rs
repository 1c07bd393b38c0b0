//! Full board workflows: parse, edit, serialize, parse again

use vaultgraph_kanban::prelude::*;

const PROJECT_BOARD: &str = "---
kanban-plugin: basic
---

## Backlog

- [ ] Research storage engines #infra
  - [ ] Compare [[RocksDB]] and [[SQLite]]
  - [x] Read benchmark paper
- [ ] Write design doc @{2025-11-03}

## In Progress

- [ ] Prototype parser
    - [ ] Tokenizer

## Done

- [x] Project kickoff
";

#[test]
fn test_parse_project_board() {
    let board = parse_board(PROJECT_BOARD, "Projects/Board.md").unwrap();

    assert_eq!(board.columns.len(), 3);
    assert_eq!(board.total_cards(), 7);

    let research = &board.columns[0].cards[0];
    assert_eq!(research.tags, vec!["infra"]);
    assert_eq!(research.subtasks.len(), 2);
    assert_eq!(research.subtasks[0].wikilinks, vec!["RocksDB", "SQLite"]);

    let prototype = &board.columns[1].cards[0];
    assert_eq!(prototype.subtasks.len(), 1);
    assert_eq!(prototype.subtasks[0].indent_level, 2);
}

#[test]
fn test_unedited_board_round_trips() {
    let board = parse_board(PROJECT_BOARD, "Board.md").unwrap();
    let output = serialize_board(&board);
    let reparsed = parse_board(&output, "Board.md").unwrap();

    assert_eq!(reparsed.total_cards(), board.total_cards());
    assert_eq!(reparsed.settings, board.settings);
    for (before, after) in board.columns.iter().zip(&reparsed.columns) {
        assert_eq!(before.name, after.name);
        assert_eq!(before.total_cards(), after.total_cards());
        assert_eq!(before.completed_cards(), after.completed_cards());
    }
}

#[test]
fn test_edit_session() {
    let mut board = parse_board(PROJECT_BOARD, "Board.md").unwrap();

    add_card(
        &mut board,
        "Backlog",
        NewCard::new("Plan launch").due_date("2025-12-01"),
    )
    .unwrap();
    let outcome = move_card(
        &mut board,
        "Research storage engines #infra",
        "Backlog",
        "In Progress",
        CardPosition::Start,
    )
    .unwrap();
    assert!(outcome.had_subtasks);
    toggle_card(&mut board, "Tokenizer", Some("In Progress")).unwrap();

    let reparsed = parse_board(&serialize_board(&board), "Board.md").unwrap();
    let in_progress = reparsed.column("In Progress").unwrap();
    assert_eq!(in_progress.cards[0].text, "Research storage engines #infra");
    assert_eq!(in_progress.cards[0].subtasks.len(), 2);
    assert!(in_progress.cards[1].subtasks[0].is_completed());

    let backlog = reparsed.column("Backlog").unwrap();
    assert_eq!(backlog.cards.len(), 2);
    assert_eq!(backlog.cards[1].text, "Plan launch");

    let found = find_card(&reparsed, "Plan launch", None).unwrap();
    assert_eq!(found.column.name, "Backlog");
    assert!(found.card.due_date.is_some());

    let stats = board_statistics(&reparsed);
    assert_eq!(stats.total_cards, 8);
    assert_eq!(stats.total_completed, 3);
}
