//! End-to-end integration test for the extraction pipeline
//!
//! This test exercises the complete flow over real files: config loading ->
//! document scanning -> partial materialization -> inventory persistence.

use partial_blocks::{
    DirectorySink, Document, ExtractOptions, InventoryBuilder, UnterminatedPolicy,
};
use partial_fs::{FormatStore, NormalizedPath, io};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const HOME: &str = r#"<!doctype html>
<html>
	<body>
		<!-- extract:teaser/content-teaser--small.html brand:acme wrap:<section>:</section> -->
		<div class="teaser">
			<h2>Title</h2>
		</div>
		<!-- endextract -->
		<!-- extract:footer.html name:Footer -->
		<footer>(c)</footer>
		<!-- endextract -->
	</body>
</html>
"#;

const ABOUT: &str = r#"<html>
  <body>
    <!-- extract:footer.html name:Footer -->
    <footer>(c)</footer>
    <!-- endextract -->
    <!-- extract:missing-end.html -->
    <p>open</p>
  </body>
</html>
"#;

/// Set up a site with two pages and a YAML config
fn setup_site() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("pages")).unwrap();
    fs::write(temp.path().join("pages/home.html"), HOME).unwrap();
    fs::write(temp.path().join("pages/about.html"), ABOUT).unwrap();
    fs::write(
        temp.path().join("extract.yaml"),
        "indent: \"  \"\nflatten: false\ndefaults:\n  group: marketing\n",
    )
    .unwrap();
    temp
}

#[test]
fn test_pipeline_over_real_files() {
    let temp = setup_site();
    let root = NormalizedPath::new(temp.path());
    let store = FormatStore::new();

    let options: ExtractOptions = store.load(&root.join("extract.yaml")).unwrap();
    assert_eq!(options.indent, "  ");
    assert_eq!(options.unterminated, UnterminatedPolicy::Discard);

    let sink = DirectorySink::new(root.join("partials"));
    let mut builder = InventoryBuilder::new(&options).unwrap().with_sink(&sink);

    let mut reports = Vec::new();
    for page in ["pages/home.html", "pages/about.html"] {
        let text = io::read_text(&root.join(page)).unwrap();
        reports.push(builder.add_document(&Document::new(page, text)).unwrap());
    }

    assert_eq!(reports[0].added, 2);
    assert_eq!(reports[1].added, 0);
    assert_eq!(reports[1].duplicates, 1);
    assert_eq!(reports[1].annotations, 2);

    let inventory = builder.finish();
    assert_eq!(inventory.total_count, 3);
    assert_eq!(inventory.unique_count, 2);

    let teaser = &inventory.items[0];
    assert_eq!(teaser.name, "Content Teaser Small");
    assert_eq!(teaser.group, "marketing");
    assert_eq!(teaser.content, "<div class=\"teaser\">\n  <h2>Title</h2>\n</div>");
    assert_eq!(
        teaser.view,
        "<section>\n\n  <div class=\"teaser\">\n    <h2>Title</h2>\n  </div>\n\n</section>"
    );

    let footer = &inventory.items[1];
    assert_eq!(footer.name, "Footer");
    assert_eq!(footer.category, None);
    assert_eq!(footer.origin, "pages/home.html");

    let written = fs::read_to_string(temp.path().join("partials/teaser/content-teaser--small.html"))
        .unwrap();
    assert_eq!(written, teaser.template);
    assert!(temp.path().join("partials/footer.html").exists());
    assert!(!temp.path().join("partials/missing-end.html").exists());

    let record_path = root.join("inventory.yaml");
    store.save(&record_path, &inventory).unwrap();
    let record: serde_yaml::Value = store.load(&record_path).unwrap();
    assert_eq!(record["uniqueCount"].as_u64(), Some(2));
    assert_eq!(record["items"][1]["category"].as_bool(), Some(false));
    assert_eq!(record["options"]["defaults"]["group"].as_str(), Some("marketing"));
}

#[test]
fn test_repeated_runs_produce_identical_records() {
    let temp = setup_site();
    let root = NormalizedPath::new(temp.path());
    let options = ExtractOptions::default();

    let run = || {
        let mut builder = InventoryBuilder::new(&options).unwrap();
        for page in ["pages/home.html", "pages/about.html"] {
            let text = io::read_text(&root.join(page)).unwrap();
            builder.add_document(&Document::new(page, text)).unwrap();
        }
        serde_json::to_string_pretty(&builder.finish()).unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_closing_unterminated_blocks_at_end() {
    let temp = setup_site();
    let root = NormalizedPath::new(temp.path());
    let options = ExtractOptions {
        unterminated: UnterminatedPolicy::CloseAtEnd,
        ..ExtractOptions::default()
    };

    let mut builder = InventoryBuilder::new(&options).unwrap();
    let text = io::read_text(&root.join("pages/about.html")).unwrap();
    let report = builder
        .add_document(&Document::new("pages/about.html", text))
        .unwrap();

    assert_eq!(report.added, 2);
    let open = &builder.items()[1];
    assert_eq!(open.destination, "missing-end.html");
    assert!(open.content.contains("<p>open</p>"));
}
