//! Whole-vault link analysis against real directories

use std::fs;
use tempfile::TempDir;
use vaultgraph_vault::prelude::*;

fn create_vault(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (path, content) in files {
        let full = temp_dir.path().join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
    temp_dir
}

#[test]
fn test_graph_edges_are_symmetric() {
    let vault = create_vault(&[
        ("Home.md", "[[Projects]] [[Areas]] [Daily](daily/today.md)"),
        ("Projects.md", "[[Home]] ![[diagram]]"),
        ("Areas.md", "[[Projects#Active|active]]"),
        ("daily/today.md", "[[Home]] [[Missing]]"),
    ]);
    let graph = build_link_graph(vault.path()).unwrap();

    assert_eq!(graph.node_count(), 4);
    for node in graph.nodes() {
        for target in &node.outlinks {
            let other = graph.node(target).unwrap();
            assert!(other.inlinks.contains(&node.path), "{} -> {}", node.path, target);
        }
        for source in &node.inlinks {
            assert!(graph.node(source).unwrap().outlinks.contains(&node.path));
        }
    }

    let home = graph.node("Home.md").unwrap();
    assert_eq!(home.outlinks, vec!["Projects.md", "Areas.md", "daily/today.md"]);
    assert_eq!(home.link_type_counts.markdown_links, 1);
}

#[test]
fn test_node_with_only_inlinks_is_not_orphan() {
    let vault = create_vault(&[("A.md", "[[B]]"), ("B.md", "")]);
    assert!(find_orphans(vault.path()).unwrap().is_empty());
}

#[test]
fn test_orphans_listed_in_path_order() {
    let vault = create_vault(&[("z.md", ""), ("a.md", ""), ("m.md", "[[a]]")]);
    assert_eq!(find_orphans(vault.path()).unwrap(), vec!["z.md"]);
}

#[test]
fn test_hub_threshold_and_ranking() {
    let mut files: Vec<(String, String)> = (1..=7)
        .map(|i| (format!("n{}.md", i), String::new()))
        .collect();
    files.push((
        "six.md".to_string(),
        (1..=6).map(|i| format!("[[n{}]]", i)).collect::<Vec<_>>().join(" "),
    ));
    let refs: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect();
    let vault = create_vault(&refs);

    let hubs = find_hubs(vault.path(), 5).unwrap();
    assert_eq!(hubs.len(), 1);
    assert_eq!(hubs[0].path, "six.md");
    assert_eq!(hubs[0].outlink_count, 6);

    fs::write(
        vault.path().join("seven.md"),
        (1..=7).map(|i| format!("[[n{}]]", i)).collect::<Vec<_>>().join("\n"),
    )
    .unwrap();
    let hubs = find_hubs(vault.path(), 5).unwrap();
    assert_eq!(hubs.len(), 2);
    assert_eq!(hubs[0].path, "seven.md");
    assert_eq!(hubs[0].outlink_count, 7);
    assert_eq!(hubs[1].path, "six.md");
}

#[test]
fn test_broken_link_counted_without_edge() {
    let vault = create_vault(&[("A.md", "[[Nowhere]] [[B]]"), ("B.md", "")]);
    let health = analyze_health(vault.path()).unwrap();

    assert_eq!(health.total_links, 1);
    assert_eq!(health.broken_links_count, 1);
    assert_eq!(health.broken_links[0].target, "Nowhere");
    assert_eq!(health.broken_links[0].source_file, "A.md");
}

#[test]
fn test_empty_vault_yields_empty_results() {
    let vault = create_vault(&[]);
    assert_eq!(build_link_graph(vault.path()).unwrap().node_count(), 0);
    assert!(find_orphans(vault.path()).unwrap().is_empty());
    assert!(find_hubs(vault.path(), 1).unwrap().is_empty());
    let health = analyze_health(vault.path()).unwrap();
    assert_eq!(health.total_notes, 0);
    assert_eq!(health.link_density_score, 0.0);
}

#[test]
fn test_neighborhood_depth_bound_on_chain() {
    let vault = create_vault(&[
        ("A.md", "[[B]]"),
        ("B.md", "[[C]]"),
        ("C.md", "[[D]]"),
        ("D.md", ""),
    ]);
    let hood = get_neighborhood(vault.path(), "A", 2).unwrap();

    assert_eq!(hood.note, "A.md");
    assert_eq!(hood.connections["B.md"].depth, 1);
    assert_eq!(hood.connections["C.md"].depth, 2);
    assert!(!hood.connections.contains_key("D.md"));
    assert!(!hood.connections.contains_key("A.md"));
}

#[test]
fn test_neighborhood_missing_note() {
    let vault = create_vault(&[("A.md", "")]);
    let err = get_neighborhood(vault.path(), "Ghost", 1).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_excluded_directories_never_walked() {
    let vault = create_vault(&[
        ("Note.md", "[[Hidden]]"),
        (".obsidian/Hidden.md", "[[Note]]"),
        (".trash/Old.md", "[[Note]]"),
    ]);
    let graph = build_link_graph(vault.path()).unwrap();
    assert_eq!(graph.node_count(), 1);
    assert_eq!(resolve_note(vault.path(), "Hidden"), None);
}

#[test]
fn test_resolution_is_first_in_path_order() {
    let vault = create_vault(&[("b/Topic.md", ""), ("a/Topic.md", ""), ("Index.md", "[[Topic]]")]);
    assert_eq!(resolve_note(vault.path(), "Topic").as_deref(), Some("a/Topic.md"));

    let graph = build_link_graph(vault.path()).unwrap();
    assert_eq!(graph.node("Index.md").unwrap().outlinks, vec!["a/Topic.md"]);
}

#[test]
fn test_backlinks_and_broken_wikilinks() {
    let vault = create_vault(&[
        ("Target.md", ""),
        ("a.md", "intro\n  see [[Target|the target]]  "),
        ("b.md", "[[Gone]]"),
    ]);

    let backlinks = find_backlinks(vault.path(), "Target").unwrap();
    assert_eq!(backlinks.len(), 1);
    assert_eq!(backlinks[0].line_number, 2);
    assert_eq!(backlinks[0].context, "see [[Target|the target]]");

    let broken = find_broken_wikilinks(vault.path()).unwrap();
    assert_eq!(broken.len(), 1);
    assert_eq!(broken[0].source_path, "b.md");
    assert_eq!(broken[0].link_target, "Gone");
}

#[test]
fn test_extract_links_reexported() {
    let links = extract_links("[[A]] [b](b.md) ![[c.png]]");
    assert_eq!(links.wikilinks, vec!["A", "c.png"]);
    assert_eq!(links.all_links, vec!["A", "c.png", "b"]);
    assert_eq!(links.embeds, vec!["c.png"]);
}
