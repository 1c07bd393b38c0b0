//! Integration tests for the VaultGraph server

use tempfile::TempDir;
use tokio::fs;
use vaultgraph::VaultGraphMcpServer;
use vaultgraph_core::{ConfigProfile, ServerConfig, VaultConfig};
use vaultgraph_tools::{CardPosition, GraphTools, KanbanTools};

async fn create_test_vault() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let vault_path = temp_dir.path();

    fs::write(vault_path.join("index.md"), "# Index\n\n[[note1]], [[note2]]")
        .await
        .expect("Failed to write index.md");
    fs::write(vault_path.join("note1.md"), "# Note 1\n\nThis links to [[note2]]")
        .await
        .expect("Failed to write note1.md");
    fs::write(
        vault_path.join("note2.md"),
        "# Note 2\n\nThis links back to [[note1]] and [[index]]",
    )
    .await
    .expect("Failed to write note2.md");
    fs::write(
        vault_path.join("Board.md"),
        "---\nkanban-plugin: basic\n---\n\n## To Do\n\n- [ ] Ship [[note1]]\n\n## Done\n\n",
    )
    .await
    .expect("Failed to write Board.md");

    temp_dir
}

fn config_for(temp_dir: &TempDir) -> ServerConfig {
    let mut config = ConfigProfile::Development.create_config();
    let vault_config = VaultConfig::builder("default", temp_dir.path())
        .build()
        .expect("Failed to create vault config");
    config.vaults.push(vault_config);
    config
}

#[tokio::test]
async fn test_server_without_vault() {
    let server = VaultGraphMcpServer::new(ServerConfig::default()).unwrap();
    assert!(server.default_manager().is_none());

    let err = server.vault_for(None).unwrap_err();
    assert!(err.to_string().contains("No vault configured"));
}

#[tokio::test]
async fn test_server_with_configured_vault() {
    let temp_dir = create_test_vault().await;
    let server = VaultGraphMcpServer::new(config_for(&temp_dir)).unwrap();

    let (name, manager) = server.vault_for(None).unwrap();
    assert_eq!(name, "default");
    assert_eq!(manager.vault_path(), temp_dir.path());
}

#[tokio::test]
async fn test_vault_path_override() {
    let configured = create_test_vault().await;
    let other = TempDir::new().unwrap();
    fs::write(other.path().join("Solo.md"), "alone").await.unwrap();

    let server = VaultGraphMcpServer::new(config_for(&configured)).unwrap();
    let (_, manager) = server
        .vault_for(Some(other.path().to_str().unwrap()))
        .unwrap();
    assert_eq!(manager.scan_vault().unwrap(), vec!["Solo.md"]);

    let bare = VaultGraphMcpServer::new(ServerConfig::default()).unwrap();
    let (_, manager) = bare.vault_for(Some(other.path().to_str().unwrap())).unwrap();
    assert_eq!(manager.scan_vault().unwrap(), vec!["Solo.md"]);
}

#[tokio::test]
async fn test_invalid_server_config_rejected() {
    let temp_dir = create_test_vault().await;
    let mut config = config_for(&temp_dir);
    config.markdown_extension = ".md".to_string();
    assert!(VaultGraphMcpServer::new(config).is_err());

    let mut config = config_for(&temp_dir);
    config.default_hub_threshold = 0;
    assert!(VaultGraphMcpServer::new(config).is_ok());
}

#[tokio::test]
async fn test_graph_and_board_workflow() {
    let temp_dir = create_test_vault().await;
    let server = VaultGraphMcpServer::new(config_for(&temp_dir)).unwrap();
    let (_, manager) = server.vault_for(None).unwrap();

    let graph = GraphTools::new(manager.clone());
    let health = graph.analyze_link_health().await.unwrap();
    assert_eq!(health.total_notes, 4);
    assert_eq!(health.broken_links_count, 0);

    let info = graph.get_link_graph().await.unwrap();
    assert_eq!(info.graph["note1.md"].inlinks, vec!["Board.md", "index.md", "note2.md"]);

    let kanban = KanbanTools::new(manager);
    let moved = kanban
        .move_kanban_card("Board.md", "Ship [[note1]]", "To Do", "Done", CardPosition::End)
        .await
        .unwrap();
    assert!(moved.success);

    let stats = kanban.get_kanban_statistics("Board.md").await.unwrap();
    assert_eq!(stats.columns[0].total_cards, 0);
    assert_eq!(stats.columns[1].total_cards, 1);
}
