//! MCP tool implementations for link analysis and Kanban boards

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use turbomcp::prelude::*;
use vaultgraph_core::error::Error;
use vaultgraph_core::{CardStatus, ServerConfig, VaultConfig, expand_vault_path};
use vaultgraph_tools::{CardPosition, GraphTools, KanbanTools, NewCard};
use vaultgraph_vault::VaultManager;

/// Helper to convert internal Error to McpError
fn to_mcp_error(e: Error) -> McpError {
    McpError::internal(e.to_string())
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

fn to_value<T: serde::Serialize>(data: &T) -> McpResult<serde_json::Value> {
    serde_json::to_value(data).map_err(|e| McpError::internal(e.to_string()))
}

/// Standardized response envelope for all tools
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct StandardResponse<T: serde::Serialize> {
    /// Which vault this operation was performed on
    pub vault: String,
    /// Operation name, e.g. "find_hub_notes"
    pub operation: String,
    pub success: bool,
    pub data: T,
    /// Count of items in result (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub took_ms: u64,
    /// Non-fatal notes about the result
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Suggested follow-up tools
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub next_steps: Vec<String>,
    /// Tool-specific extras such as the effective threshold or depth
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub meta: serde_json::Map<String, serde_json::Value>,
}

impl<T: serde::Serialize> StandardResponse<T> {
    pub fn new(vault: impl Into<String>, operation: impl Into<String>, data: T) -> Self {
        Self {
            vault: vault.into(),
            operation: operation.into(),
            success: true,
            data,
            count: None,
            took_ms: 0,
            warnings: vec![],
            next_steps: vec![],
            meta: serde_json::Map::new(),
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_duration(mut self, ms: u64) -> Self {
        self.took_ms = ms;
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_next_step(mut self, step: impl Into<String>) -> Self {
        self.next_steps.push(step.into());
        self
    }

    pub fn with_next_steps(mut self, steps: &[&str]) -> Self {
        self.next_steps.extend(steps.iter().map(|s| s.to_string()));
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    pub fn with_success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }

    /// Serialize with consistent error handling
    pub fn to_json(self) -> McpResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| McpError::internal(e.to_string()))
    }
}

/// VaultGraph MCP Server
///
/// Serves one configured vault. Every tool also accepts a `vault_path`
/// argument that points the call at another vault directory.
#[derive(Clone)]
pub struct VaultGraphMcpServer {
    config: ServerConfig,
    manager: Option<Arc<VaultManager>>,
}

impl VaultGraphMcpServer {
    /// Create a server. A configuration without vaults is accepted; tools then
    /// need an explicit `vault_path`.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let manager = if config.vaults.is_empty() {
            None
        } else {
            config.validate()?;
            Some(Arc::new(VaultManager::new(config.clone())?))
        };
        Ok(Self { config, manager })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Manager of the configured vault, if any
    pub fn default_manager(&self) -> Option<Arc<VaultManager>> {
        self.manager.clone()
    }

    /// Vault name and manager for a tool call
    pub fn vault_for(
        &self,
        vault_path: Option<&str>,
    ) -> vaultgraph_core::Result<(String, Arc<VaultManager>)> {
        let manager = match (vault_path, &self.manager) {
            (Some(raw), Some(manager)) => {
                let path = expand_vault_path(Path::new(raw))?;
                Arc::new(manager.for_path(path)?)
            }
            (Some(raw), None) => {
                let path = expand_vault_path(Path::new(raw))?;
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("vault")
                    .to_string();
                let mut config = self.config.clone();
                config.vaults = vec![VaultConfig::builder(name, path).build()?];
                Arc::new(VaultManager::new(config)?)
            }
            (None, Some(manager)) => manager.clone(),
            (None, None) => {
                return Err(Error::config_error(
                    "No vault configured. Start the server with --vault or pass vault_path",
                ));
            }
        };
        log::debug!("Tool call on vault {}", manager.vault_path().display());
        Ok((manager.vault_name().to_string(), manager))
    }

    fn vault_pair(&self, vault_path: Option<String>) -> McpResult<(String, Arc<VaultManager>)> {
        self.vault_for(vault_path.as_deref()).map_err(to_mcp_error)
    }
}

#[turbomcp::server(
    name = "vaultgraph",
    version = "0.3.0",
    transports = ["stdio", "http", "websocket", "tcp", "unix"]
)]
impl VaultGraphMcpServer {
    // ==================== Link Graph ====================

    /// Dump the whole link graph
    #[tool(
        description = "Build the complete link graph of the vault: every note with its outgoing and incoming note links",
        usage = "Use for a full structural overview. For large vaults prefer the targeted analysis tools",
        performance = "Walks and parses every note on each call (no cache)",
        related = ["analyze_link_health", "find_hub_notes", "detect_cycles"],
        examples = []
    )]
    async fn get_link_graph(&self, vault_path: Option<String>) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let (vault_name, manager) = self.vault_pair(vault_path)?;
        let info = GraphTools::new(manager)
            .get_link_graph()
            .await
            .map_err(to_mcp_error)?;

        StandardResponse::new(vault_name, "get_link_graph", to_value(&info)?)
            .with_count(info.total_notes)
            .with_duration(elapsed_ms(start))
            .with_next_steps(&["find_orphaned_notes", "find_hub_notes"])
            .to_json()
    }

    /// Notes with no links in or out
    #[tool(
        description = "Find orphaned notes: notes with neither incoming nor outgoing note links",
        usage = "Identify isolated content that needs linking or cleanup",
        performance = "Full vault scan",
        related = ["get_note_connections", "analyze_link_health"],
        examples = []
    )]
    async fn find_orphaned_notes(&self, vault_path: Option<String>) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let (vault_name, manager) = self.vault_pair(vault_path)?;
        let orphans = GraphTools::new(manager)
            .find_orphaned_notes()
            .await
            .map_err(to_mcp_error)?;

        let count = orphans.len();
        StandardResponse::new(vault_name, "find_orphaned_notes", to_value(&orphans)?)
            .with_count(count)
            .with_duration(elapsed_ms(start))
            .with_next_step("get_note_connections")
            .to_json()
    }

    /// Notes with many outgoing links
    #[tool(
        description = "Find hub notes: notes with at least min_outlinks outgoing note links, most connected first (default threshold 5)",
        usage = "Identify index pages and Maps of Content",
        performance = "Full vault scan",
        related = ["get_note_connections", "get_backlinks"],
        examples = ["min_outlinks: 3"]
    )]
    async fn find_hub_notes(
        &self,
        min_outlinks: Option<usize>,
        vault_path: Option<String>,
    ) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let (vault_name, manager) = self.vault_pair(vault_path)?;
        let threshold = min_outlinks.unwrap_or(manager.config().default_hub_threshold);
        let hubs = GraphTools::new(manager)
            .find_hub_notes(Some(threshold))
            .await
            .map_err(to_mcp_error)?;

        let count = hubs.len();
        StandardResponse::new(vault_name, "find_hub_notes", to_value(&hubs)?)
            .with_count(count)
            .with_duration(elapsed_ms(start))
            .with_meta("min_outlinks", serde_json::json!(threshold))
            .with_next_step("get_note_connections")
            .to_json()
    }

    /// Vault-wide link health
    #[tool(
        description = "Analyze link health: note and link counts, orphans, broken links, link type breakdown, average outlinks per note",
        usage = "Use as the first diagnostic before deeper analysis",
        performance = "Full vault scan",
        related = ["get_broken_links", "find_orphaned_notes", "detect_cycles"],
        examples = []
    )]
    async fn analyze_link_health(&self, vault_path: Option<String>) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let (vault_name, manager) = self.vault_pair(vault_path)?;
        let health = GraphTools::new(manager)
            .analyze_link_health()
            .await
            .map_err(to_mcp_error)?;

        let mut response =
            StandardResponse::new(vault_name, "analyze_link_health", to_value(&health)?)
                .with_duration(elapsed_ms(start));
        if health.broken_links_count > 0 {
            response = response
                .with_warning(format!("{} broken links", health.broken_links_count))
                .with_next_step("get_broken_links");
        }
        if health.orphaned_notes > 0 {
            response = response.with_next_step("find_orphaned_notes");
        }
        response.to_json()
    }

    /// Outlink neighborhood of one note
    #[tool(
        description = "Get a note's connections: direct inlinks and outlinks, plus every note reachable by outgoing links within depth hops (default 1)",
        usage = "Explore the context around a note. The note may be named by path or by file name without extension",
        performance = "Full vault scan, then breadth-first walk",
        related = ["get_backlinks", "find_hub_notes"],
        examples = ["note: Projects/Roadmap, depth: 2"]
    )]
    async fn get_note_connections(
        &self,
        note: String,
        depth: Option<usize>,
        vault_path: Option<String>,
    ) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let (vault_name, manager) = self.vault_pair(vault_path)?;
        let hood = GraphTools::new(manager)
            .get_note_connections(&note, depth)
            .await
            .map_err(to_mcp_error)?;

        StandardResponse::new(vault_name, "get_note_connections", to_value(&hood)?)
            .with_count(hood.total_connections_explored)
            .with_duration(elapsed_ms(start))
            .with_meta("depth", serde_json::json!(hood.connection_depth))
            .with_next_step("get_backlinks")
            .to_json()
    }

    /// Wikilinks pointing at a note, with line context
    #[tool(
        description = "Find every wikilink that points at a note, with source file, line number, and the line's text",
        usage = "See how a note is referenced before renaming or restructuring it",
        performance = "Full vault scan",
        related = ["get_note_connections", "get_broken_links"],
        examples = ["note: Roadmap"]
    )]
    async fn get_backlinks(
        &self,
        note: String,
        vault_path: Option<String>,
    ) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let (vault_name, manager) = self.vault_pair(vault_path)?;
        let backlinks = GraphTools::new(manager)
            .get_backlinks(&note)
            .await
            .map_err(to_mcp_error)?;

        let count = backlinks.len();
        let mut response = StandardResponse::new(vault_name, "get_backlinks", to_value(&backlinks)?)
            .with_count(count)
            .with_duration(elapsed_ms(start))
            .with_next_step("get_note_connections");
        if count == 0 {
            response = response.with_warning("Note has no incoming wikilinks");
        }
        response.to_json()
    }

    /// Wikilinks to notes that do not exist
    #[tool(
        description = "List wikilinks whose targets match no note in the vault, with source file and line number",
        usage = "Find typos and links to notes that were renamed or deleted",
        performance = "Full vault scan",
        related = ["analyze_link_health", "get_backlinks"],
        examples = []
    )]
    async fn get_broken_links(&self, vault_path: Option<String>) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let (vault_name, manager) = self.vault_pair(vault_path)?;
        let broken = GraphTools::new(manager)
            .get_broken_links()
            .await
            .map_err(to_mcp_error)?;

        let count = broken.len();
        StandardResponse::new(vault_name, "get_broken_links", to_value(&broken)?)
            .with_count(count)
            .with_duration(elapsed_ms(start))
            .to_json()
    }

    /// Groups of notes linking each other in a loop
    #[tool(
        description = "Detect link cycles: groups of notes that reach each other through outgoing links",
        usage = "Find circular references and tightly coupled note clusters",
        performance = "Full vault scan, then strongly connected components",
        related = ["get_link_graph", "get_note_connections"],
        examples = []
    )]
    async fn detect_cycles(&self, vault_path: Option<String>) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let (vault_name, manager) = self.vault_pair(vault_path)?;
        let cycles = GraphTools::new(manager)
            .detect_cycles()
            .await
            .map_err(to_mcp_error)?;

        let count = cycles.len();
        StandardResponse::new(vault_name, "detect_cycles", to_value(&cycles)?)
            .with_count(count)
            .with_duration(elapsed_ms(start))
            .to_json()
    }

    // ==================== Kanban ====================

    /// Parse a Kanban board
    #[tool(
        description = "Parse a Kanban board file into columns and nested cards with status, due dates, tags, and wikilinks",
        usage = "Read a board before editing it. Columns are '## ' headings; cards are checkbox list items",
        performance = "Reads a single file",
        related = ["add_kanban_card", "move_kanban_card", "get_kanban_statistics"],
        examples = ["path: Boards/Sprint.md"]
    )]
    async fn parse_kanban_board(
        &self,
        path: String,
        vault_path: Option<String>,
    ) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let (vault_name, manager) = self.vault_pair(vault_path)?;
        let board = KanbanTools::new(manager)
            .parse_kanban_board(&path)
            .await
            .map_err(to_mcp_error)?;

        StandardResponse::new(vault_name, "parse_kanban_board", to_value(&board)?)
            .with_count(board.total_cards)
            .with_duration(elapsed_ms(start))
            .with_next_steps(&["add_kanban_card", "get_kanban_statistics"])
            .to_json()
    }

    /// Add a card to a column
    #[tool(
        description = "Add a card to a Kanban column. Position is 'start' or 'end' (default end); due_date is YYYY-MM-DD",
        usage = "Create tasks on a board. Tags (#tag) and wikilinks in the text are picked up automatically",
        performance = "Reads and rewrites a single file",
        related = ["parse_kanban_board", "move_kanban_card"],
        examples = ["column: To Do, text: Write docs #writing, due_date: 2025-11-01"]
    )]
    async fn add_kanban_card(
        &self,
        path: String,
        column: String,
        text: String,
        completed: Option<bool>,
        due_date: Option<String>,
        position: Option<String>,
        vault_path: Option<String>,
    ) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let (vault_name, manager) = self.vault_pair(vault_path)?;

        let position = match position {
            Some(raw) => raw.parse::<CardPosition>().map_err(to_mcp_error)?,
            None => CardPosition::default(),
        };
        let status = if completed.unwrap_or(false) {
            CardStatus::Completed
        } else {
            CardStatus::Incomplete
        };
        let mut new_card = NewCard::new(text).status(status).position(position);
        if let Some(due) = due_date {
            new_card = new_card.due_date(due);
        }

        let result = KanbanTools::new(manager)
            .add_kanban_card(&path, &column, new_card)
            .await
            .map_err(to_mcp_error)?;

        let mut response = StandardResponse::new(vault_name, "add_kanban_card", to_value(&result)?)
            .with_success(result.success)
            .with_duration(elapsed_ms(start))
            .with_next_step("parse_kanban_board");
        if !result.success {
            response = response.with_warning(format!("Board {} was not written", path));
        }
        response.to_json()
    }

    /// Move a card between columns
    #[tool(
        description = "Move a card, with its subtasks, from one Kanban column to another. The card becomes a top-level card in the target column",
        usage = "Advance work across a board, e.g. from 'To Do' to 'Done'",
        performance = "Reads and rewrites a single file",
        related = ["parse_kanban_board", "toggle_kanban_card"],
        examples = ["card_text: Write docs, from_column: To Do, to_column: Doing"]
    )]
    async fn move_kanban_card(
        &self,
        path: String,
        card_text: String,
        from_column: String,
        to_column: String,
        position: Option<String>,
        vault_path: Option<String>,
    ) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let (vault_name, manager) = self.vault_pair(vault_path)?;

        let position = match position {
            Some(raw) => raw.parse::<CardPosition>().map_err(to_mcp_error)?,
            None => CardPosition::default(),
        };

        let result = KanbanTools::new(manager)
            .move_kanban_card(&path, &card_text, &from_column, &to_column, position)
            .await
            .map_err(to_mcp_error)?;

        let mut response =
            StandardResponse::new(vault_name, "move_kanban_card", to_value(&result)?)
                .with_success(result.success)
                .with_duration(elapsed_ms(start))
                .with_next_step("parse_kanban_board");
        if !result.success {
            response = response.with_warning(format!("Board {} was not written", path));
        }
        response.to_json()
    }

    /// Flip a card between complete and incomplete
    #[tool(
        description = "Toggle a Kanban card's completion status. Optionally restrict the search to one column",
        usage = "Check off or reopen a task",
        performance = "Reads and rewrites a single file",
        related = ["parse_kanban_board", "get_kanban_statistics"],
        examples = ["card_text: Write docs"]
    )]
    async fn toggle_kanban_card(
        &self,
        path: String,
        card_text: String,
        column: Option<String>,
        vault_path: Option<String>,
    ) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let (vault_name, manager) = self.vault_pair(vault_path)?;

        let result = KanbanTools::new(manager)
            .toggle_kanban_card(&path, &card_text, column.as_deref())
            .await
            .map_err(to_mcp_error)?;

        let mut response =
            StandardResponse::new(vault_name, "toggle_kanban_card", to_value(&result)?)
                .with_success(result.success)
                .with_duration(elapsed_ms(start))
                .with_next_step("get_kanban_statistics");
        if !result.success {
            response = response.with_warning(format!("Board {} was not written", path));
        }
        response.to_json()
    }

    /// Completion statistics of a board
    #[tool(
        description = "Card counts and completion rates per column and for the whole board. Subtasks are counted",
        usage = "Track progress on a board",
        performance = "Reads a single file",
        related = ["parse_kanban_board", "toggle_kanban_card"],
        examples = ["path: Boards/Sprint.md"]
    )]
    async fn get_kanban_statistics(
        &self,
        path: String,
        vault_path: Option<String>,
    ) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let (vault_name, manager) = self.vault_pair(vault_path)?;
        let stats = KanbanTools::new(manager)
            .get_kanban_statistics(&path)
            .await
            .map_err(to_mcp_error)?;

        StandardResponse::new(vault_name, "get_kanban_statistics", to_value(&stats)?)
            .with_count(stats.total_cards)
            .with_duration(elapsed_ms(start))
            .to_json()
    }
}
