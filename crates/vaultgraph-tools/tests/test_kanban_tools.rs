//! Unit tests for KanbanTools

use std::sync::Arc;
use tempfile::TempDir;
use vaultgraph_core::{CardStatus, ConfigProfile, Error, VaultConfig};
use vaultgraph_tools::{CardPosition, KanbanTools, NewCard};
use vaultgraph_vault::VaultManager;

const BOARD: &str = "---
kanban-plugin: basic
---

## To Do

- [ ] Write tests #dev
  - [ ] Unit
  - [x] Integration
- [ ] Release @{2025-10-30}

## Done

- [x] Design
";

async fn setup_board(profile: ConfigProfile) -> (TempDir, KanbanTools) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    tokio::fs::create_dir_all(temp_dir.path().join("boards"))
        .await
        .unwrap();
    tokio::fs::write(temp_dir.path().join("boards/Sprint.md"), BOARD)
        .await
        .unwrap();

    let mut config = profile.create_config();
    let vault_config = VaultConfig::builder("test", temp_dir.path())
        .build()
        .unwrap();
    config.vaults.push(vault_config);

    let manager = VaultManager::new(config).unwrap();
    (temp_dir, KanbanTools::new(Arc::new(manager)))
}

async fn read_board(temp_dir: &TempDir) -> String {
    tokio::fs::read_to_string(temp_dir.path().join("boards/Sprint.md"))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_parse_kanban_board() {
    let (_temp_dir, tools) = setup_board(ConfigProfile::Development).await;

    let info = tools.parse_kanban_board("boards/Sprint.md").await.unwrap();
    assert_eq!(info.file_path, "boards/Sprint.md");
    assert_eq!(info.total_cards, 5);
    assert_eq!(info.columns.len(), 2);
    assert_eq!(info.columns[0].card_count, 2);
    assert_eq!(info.columns[0].cards[0].subtasks.len(), 2);
    assert_eq!(info.settings["kanban-plugin"], "basic");

    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["columns"][0]["cards"][1]["due_date"], "2025-10-30");
    assert_eq!(json["columns"][1]["cards"][0]["status"], "completed");
}

#[tokio::test]
async fn test_parse_missing_board() {
    let (_temp_dir, tools) = setup_board(ConfigProfile::Development).await;
    let err = tools.parse_kanban_board("boards/Nope.md").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_add_kanban_card_writes_board() {
    let (temp_dir, tools) = setup_board(ConfigProfile::Development).await;

    let result = tools
        .add_kanban_card(
            "boards/Sprint.md",
            "Done",
            NewCard::new("Retro").position(CardPosition::Start),
        )
        .await
        .unwrap();
    assert!(result.success);
    assert_eq!(result.total_cards, 6);

    let content = read_board(&temp_dir).await;
    assert!(content.starts_with("---\nkanban-plugin: basic\n---\n"));
    assert!(content.contains("## Done\n\n- [ ] Retro\n- [x] Design\n"));
}

#[tokio::test]
async fn test_add_card_to_missing_column() {
    let (temp_dir, tools) = setup_board(ConfigProfile::Development).await;

    let err = tools
        .add_kanban_card("boards/Sprint.md", "Backlog", NewCard::new("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ColumnNotFound { .. }));
    assert_eq!(read_board(&temp_dir).await, BOARD);
}

#[tokio::test]
async fn test_move_kanban_card_with_subtasks() {
    let (temp_dir, tools) = setup_board(ConfigProfile::Development).await;

    let result = tools
        .move_kanban_card(
            "boards/Sprint.md",
            "Write tests #dev",
            "To Do",
            "Done",
            CardPosition::End,
        )
        .await
        .unwrap();
    assert!(result.success);
    assert!(result.had_subtasks);

    let content = read_board(&temp_dir).await;
    assert!(content.contains(
        "## Done\n\n- [x] Design\n- [ ] Write tests #dev\n  - [ ] Unit\n  - [x] Integration\n"
    ));
}

#[tokio::test]
async fn test_toggle_kanban_card() {
    let (temp_dir, tools) = setup_board(ConfigProfile::Development).await;

    let result = tools
        .toggle_kanban_card("boards/Sprint.md", "Unit", None)
        .await
        .unwrap();
    assert!(result.success);
    assert_eq!(result.new_status, CardStatus::Completed);
    assert!(read_board(&temp_dir).await.contains("  - [x] Unit\n"));

    let missing = tools
        .toggle_kanban_card("boards/Sprint.md", "Ghost", None)
        .await;
    assert!(missing.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_get_kanban_statistics() {
    let (_temp_dir, tools) = setup_board(ConfigProfile::Development).await;

    let stats = tools
        .get_kanban_statistics("boards/Sprint.md")
        .await
        .unwrap();
    assert_eq!(stats.total_cards, 5);
    assert_eq!(stats.total_completed, 2);
    assert_eq!(stats.overall_completion_rate, 40.0);
    assert_eq!(stats.columns[0].completion_rate, 25.0);
    assert_eq!(stats.columns[1].completion_rate, 100.0);
}

#[tokio::test]
async fn test_read_only_profile_refuses_edits() {
    let (temp_dir, tools) = setup_board(ConfigProfile::ReadOnly).await;

    let err = tools
        .toggle_kanban_card("boards/Sprint.md", "Unit", None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ConfigError { .. }));
    assert_eq!(read_board(&temp_dir).await, BOARD);

    assert!(tools.parse_kanban_board("boards/Sprint.md").await.is_ok());
}
