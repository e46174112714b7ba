use std::fs;
use std::path::Path;

use anyhow::Result;
use tempfile::tempdir;

use svgscout::app::catalog::{CatalogBuilder, CatalogSink};
use svgscout::domain::errors::ScanError;
use svgscout::domain::model::CatalogRecord;
use svgscout::infra::config::Config;

#[derive(Default)]
struct RecordingSink {
    names: Vec<String>,
    indices: Vec<usize>,
    progress: Vec<u8>,
}

impl CatalogSink for RecordingSink {
    fn record_added(&mut self, record: &CatalogRecord, index: usize) {
        self.names.push(record.name.clone());
        self.indices.push(index);
    }

    fn progress(&mut self, percent: u8) {
        self.progress.push(percent);
    }
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[test]
fn scans_a_realistic_tree_end_to_end() -> Result<()> {
    let temp = tempdir()?;
    let root = temp.path();

    write(root, ".gitignore", "# generated output\nbuild\n\n");
    write(
        root,
        "icons/arrow-left.svg",
        r#"<svg width="24" height="24"><path d="M20 12H4"/></svg>"#,
    );
    write(
        root,
        "src/Button.tsx",
        r#"
        export const Button = () => (
            <button>
                <svg width={16} height={16} {...props}><path d="a"/></svg>
                {/* decorative */}
                <svg viewBox="0 0 8 8"><path d="b"/></svg>
            </button>
        );
        <!-- <svg id="dead"><path d="c"/></svg> -->
        "#,
    );
    write(
        root,
        "build/Generated.tsx",
        r#"<svg viewBox="0 0 1 1"><path d="x"/></svg>"#,
    );
    write(
        root,
        "build.js",
        r#"const icon = '<svg viewBox="0 0 2 2"><path d="y"/></svg>';"#,
    );
    write(
        root,
        "node_modules/pkg/Icon.tsx",
        r#"<svg viewBox="0 0 3 3"/></svg>"#,
    );
    write(root, "README.md", "no markup here");

    let config = Config::default();
    let mut sink = RecordingSink::default();
    let catalog = CatalogBuilder::new(&config).scan_with(Some(root), &mut sink)?;

    // Standalone SVG first, then host fragments in path order.
    assert_eq!(
        sink.names,
        vec!["Arrow Left", "Build", "Button", "Button"]
    );
    assert_eq!(sink.indices, vec![0, 1, 2, 3]);
    assert_eq!(catalog.len(), 4);

    let arrow = &catalog.records[0];
    assert!(arrow.fragment.contains(r#"viewBox="0 0 24 24""#));
    assert_eq!(arrow.source_path, root.join("icons/arrow-left.svg"));

    let first_button = &catalog.records[2];
    assert!(first_button.fragment.contains(r#"viewBox="0 0 16 16""#));
    assert!(!first_button.fragment.contains("{...props}"));

    // The ignored build/ tree and node_modules never contribute, and the
    // commented-out fragment is gone; build.js survives the `build` rule.
    assert!(catalog.records.iter().all(|r| !r.fragment.contains("dead")));
    assert!(
        catalog
            .records
            .iter()
            .all(|r| !r.source_path.starts_with(root.join("build")))
    );
    assert!(
        catalog
            .records
            .iter()
            .any(|r| r.source_path == root.join("build.js"))
    );

    assert_eq!(sink.progress.last(), Some(&100));
    assert!(sink.progress.windows(2).all(|pair| pair[0] < pair[1]));
    Ok(())
}

#[test]
fn missing_root_surfaces_as_inaccessible() {
    let config = Config::default();
    let err = CatalogBuilder::new(&config)
        .scan(Some(Path::new("/definitely/not/a/real/root")))
        .unwrap_err();
    assert!(matches!(err, ScanError::RootInaccessible(_)));
    assert!(err.to_string().contains("project root inaccessible"));
}

#[test]
fn empty_tree_produces_an_empty_catalog() -> Result<()> {
    let temp = tempdir()?;
    let config = Config::default();
    let mut sink = RecordingSink::default();
    let catalog = CatalogBuilder::new(&config).scan_with(Some(temp.path()), &mut sink)?;

    assert!(catalog.is_empty());
    assert_eq!(sink.progress, vec![100]);
    Ok(())
}
