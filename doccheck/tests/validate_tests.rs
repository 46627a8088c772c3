#![allow(clippy::unwrap_used)]
//! Integration tests for `doccheck::validate`.

use std::fs;
use std::path::{Path, PathBuf};

use doccheck::{
    CheckKind, ContentRule, ErrorKind, FrontmatterRule, FsSourceConfig, Ruleset, validate,
    validate_with,
};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn doc(id: &str, title: &str, body: &str) -> String {
    format!("---\nid: {id}\ntitle: {title}\n---\n\n{body}\n")
}

fn required_only(paths: &[&str]) -> Ruleset {
    let mut ruleset = Ruleset::default();
    ruleset.required_files = paths.iter().map(|p| (*p).to_owned()).collect();
    ruleset
}

fn frontmatter_only(root: &str) -> Ruleset {
    let mut ruleset = Ruleset::default();
    ruleset.frontmatter = Some(FrontmatterRule::new([root]));
    ruleset
}

#[test]
fn test_nonexistent_root_errors() {
    let tmp = TempDir::new().unwrap();
    let result = validate(&tmp.path().join("missing"), &required_only(&["a.md"]));
    let msg = result.unwrap_err().to_string();
    assert!(msg.contains("does not exist"), "got: {msg}");
}

#[test]
fn test_root_that_is_a_file_errors() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "file.md", "x");
    let result = validate(&tmp.path().join("file.md"), &required_only(&["a.md"]));
    let msg = result.unwrap_err().to_string();
    assert!(msg.contains("not a directory"), "got: {msg}");
}

#[test]
fn test_empty_ruleset_errors() {
    let tmp = TempDir::new().unwrap();
    let result = validate(tmp.path(), &Ruleset::default());
    let msg = result.unwrap_err().to_string();
    assert!(msg.contains("Ruleset is empty"), "got: {msg}");
}

#[test]
fn test_missing_required_file_reported_once() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "docs/api/introduction.md", &doc("intro", "Intro", ""));

    let ruleset = required_only(&["docs/api/introduction.md", "docs/api/errors.md"]);
    let report = validate(tmp.path(), &ruleset).unwrap();

    assert!(!report.ok);
    assert_eq!(report.rules_checked(), 2);
    assert_eq!(report.errors_count(), 1);
    let err = report.errors().next().unwrap();
    assert_eq!(err.kind, ErrorKind::MissingFile);
    assert_eq!(err.file, PathBuf::from("docs/api/errors.md"));
    assert!(report.outcomes[0].passed);
    assert!(!report.outcomes[1].passed);
}

#[test]
fn test_required_path_that_is_a_directory_is_missing() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("docs/api/errors.md")).unwrap();

    let report = validate(tmp.path(), &required_only(&["docs/api/errors.md"])).unwrap();
    assert_eq!(report.count_of(ErrorKind::MissingFile), 1);
}

#[test]
fn test_each_missing_substring_reported() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "docs/api/collection/status.md",
        &doc(
            "status",
            "Transaction Status",
            "GET /status/{transactionId}\n\nStates: COMPLETED, PENDING",
        ),
    );

    let mut ruleset = Ruleset::default();
    ruleset.content_rules = vec![ContentRule::new(
        "docs/api/collection/status.md",
        ["GET", "/status/", "COMPLETED", "PENDING", "FAILED"],
    )];
    let report = validate(tmp.path(), &ruleset).unwrap();

    assert!(!report.ok);
    assert_eq!(report.rules_failed(), 1);
    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::MissingContent);
    assert_eq!(errors[0].expected.as_deref(), Some("FAILED"));
}

#[test]
fn test_missing_content_count_matches_absent_substrings() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "page.md", "alpha gamma");

    let mut ruleset = Ruleset::default();
    ruleset.content_rules = vec![ContentRule::new(
        "page.md",
        ["alpha", "beta", "gamma", "delta", "Alpha"],
    )];
    let report = validate(tmp.path(), &ruleset).unwrap();

    let missing: Vec<_> = report
        .errors()
        .filter_map(|e| e.expected.as_deref())
        .collect();
    assert_eq!(missing, vec!["beta", "delta", "Alpha"]);
}

#[test]
fn test_content_rule_on_missing_file_yields_single_missing_file() {
    let tmp = TempDir::new().unwrap();
    let mut ruleset = Ruleset::default();
    ruleset.content_rules = vec![ContentRule::new("docs/absent.md", ["a", "b", "c"])];

    let report = validate(tmp.path(), &ruleset).unwrap();
    assert_eq!(report.errors_count(), 1);
    assert_eq!(report.count_of(ErrorKind::MissingFile), 1);
    assert_eq!(report.count_of(ErrorKind::MissingContent), 0);
}

#[test]
fn test_frontmatter_without_leading_delimiter() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "docs/page.md", "id: x\ntitle: y\nBody text");

    let report = validate(tmp.path(), &frontmatter_only("docs")).unwrap();
    assert!(!report.ok);
    assert_eq!(report.scanned_files, 1);
    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::MalformedFrontmatter);
    assert_eq!(errors[0].file, PathBuf::from("docs/page.md"));
}

#[test]
fn test_frontmatter_missing_title() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "docs/page.md", "---\nid: page\n---\n# Page\n");

    let report = validate(tmp.path(), &frontmatter_only("docs")).unwrap();
    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].expected.as_deref(), Some("title"));
}

#[test]
fn test_empty_file_fails_frontmatter_and_content() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "docs/empty.md", "");

    let mut ruleset = frontmatter_only("docs");
    ruleset.content_rules = vec![ContentRule::new("docs/empty.md", ["Base URL", "Request"])];
    let report = validate(tmp.path(), &ruleset).unwrap();

    assert_eq!(report.count_of(ErrorKind::MalformedFrontmatter), 1);
    assert_eq!(report.count_of(ErrorKind::MissingContent), 2);
}

#[test]
fn test_deeply_nested_document_is_discovered() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "docs/top.md", &doc("top", "Top", ""));
    write(tmp.path(), "docs/a/b/c/deep.md", "no frontmatter here");

    let report = validate(tmp.path(), &frontmatter_only("docs")).unwrap();
    assert_eq!(report.scanned_files, 2);
    let failing: Vec<_> = report.outcomes.iter().filter(|o| !o.passed).collect();
    assert_eq!(failing.len(), 1);
    assert_eq!(failing[0].target, PathBuf::from("docs/a/b/c/deep.md"));
    assert_eq!(failing[0].check, CheckKind::Frontmatter);
}

#[test]
fn test_documents_under_build_named_directories_are_checked() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "docs/guides/build/deploy.md", "no frontmatter");

    let report = validate(tmp.path(), &frontmatter_only("docs")).unwrap();
    assert!(!report.ok);
    assert_eq!(report.scanned_files, 1);
    assert_eq!(report.count_of(ErrorKind::MalformedFrontmatter), 1);
    assert_eq!(
        report.outcomes[0].target,
        PathBuf::from("docs/guides/build/deploy.md")
    );
}

#[test]
fn test_documents_below_max_depth_fail_the_run() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "docs/a/page.md", &doc("page", "Page", ""));
    write(tmp.path(), "docs/a/b/c/deep.md", &doc("deep", "Deep", ""));

    let mut fs_config = FsSourceConfig::default();
    fs_config.max_depth = 2;
    let report = validate_with(tmp.path(), &frontmatter_only("docs"), &fs_config).unwrap();
    assert!(!report.ok);
    assert_eq!(report.scanned_files, 1);
    assert_eq!(report.count_of(ErrorKind::IoError), 1);
    let cut = report.errors().find(|e| e.kind == ErrorKind::IoError).unwrap();
    assert_eq!(cut.file, PathBuf::from("docs/a/b"));
}

#[test]
fn test_byte_order_mark_before_frontmatter_is_accepted() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "docs/bom.md", "\u{FEFF}---\nid: a\ntitle: A\n---\nbody");

    let report = validate(tmp.path(), &frontmatter_only("docs")).unwrap();
    assert!(report.ok, "got: {:?}", report.outcomes);
    assert_eq!(report.scanned_files, 1);
}

#[test]
fn test_non_markdown_files_are_not_scanned() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "docs/page.md", &doc("page", "Page", ""));
    write(tmp.path(), "docs/diagram.svg", "<svg/>");
    write(tmp.path(), "docs/notes.txt", "no frontmatter");

    let report = validate(tmp.path(), &frontmatter_only("docs")).unwrap();
    assert!(report.ok, "got: {:?}", report.outcomes);
    assert_eq!(report.scanned_files, 1);
}

#[cfg(unix)]
#[test]
fn test_symlinked_documents_are_not_scanned() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "outside/bad.md", "no frontmatter");
    fs::create_dir_all(tmp.path().join("docs")).unwrap();
    std::os::unix::fs::symlink(
        tmp.path().join("outside/bad.md"),
        tmp.path().join("docs/bad.md"),
    )
    .unwrap();
    write(tmp.path(), "docs/good.md", &doc("good", "Good", ""));

    let report = validate(tmp.path(), &frontmatter_only("docs")).unwrap();
    assert!(report.ok, "got: {:?}", report.outcomes);
    assert_eq!(report.scanned_files, 1);
}

#[test]
fn test_missing_frontmatter_root_reported() {
    let tmp = TempDir::new().unwrap();
    let report = validate(tmp.path(), &frontmatter_only("docs")).unwrap();
    assert!(!report.ok);
    assert_eq!(report.count_of(ErrorKind::MissingFile), 1);
    assert_eq!(report.scanned_files, 0);
}

#[test]
fn test_overlapping_roots_check_each_document_once() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "docs/api/page.md", &doc("page", "Page", ""));

    let mut ruleset = Ruleset::default();
    ruleset.frontmatter = Some(FrontmatterRule::new(["docs", "docs/api"]));
    let report = validate(tmp.path(), &ruleset).unwrap();
    assert_eq!(report.scanned_files, 1);
    assert_eq!(report.rules_checked(), 1);
}

#[test]
fn test_exclude_pattern_skips_documents() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "docs/page.md", &doc("page", "Page", ""));
    write(tmp.path(), "docs/drafts/wip.md", "unfinished");

    let mut fs_config = FsSourceConfig::default();
    fs_config.exclude = vec!["docs/drafts/*".to_owned()];
    let report = validate_with(tmp.path(), &frontmatter_only("docs"), &fs_config).unwrap();
    assert!(report.ok);
    assert_eq!(report.scanned_files, 1);
}

#[test]
fn test_oversized_file_is_io_error_and_run_continues() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "big.md", &"x".repeat(64));
    write(tmp.path(), "small.md", "ok");

    let mut ruleset = Ruleset::default();
    ruleset.content_rules = vec![
        ContentRule::new("big.md", ["x"]),
        ContentRule::new("small.md", ["ok"]),
    ];
    let mut fs_config = FsSourceConfig::default();
    fs_config.max_file_size = 16;

    let report = validate_with(tmp.path(), &ruleset, &fs_config).unwrap();
    assert_eq!(report.count_of(ErrorKind::IoError), 1);
    assert!(!report.outcomes[0].passed);
    assert!(report.outcomes[1].passed);
}

#[test]
fn test_sidebar_sections_present() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "sidebars.js",
        "const sidebars = { apiSidebar: [\n\
         { label: 'Getting Started' }, { label: 'Disbursement API' },\n\
         { label: 'Collection API' }, { label: 'Cash Pickup API' },\n\
         { label: 'Code Samples' }, { label: 'Reference' } ] };\n",
    );

    let mut ruleset = Ruleset::default();
    ruleset.content_rules = vec![ContentRule::new(
        "sidebars.js",
        [
            "Getting Started",
            "Disbursement API",
            "Collection API",
            "Cash Pickup API",
            "Code Samples",
            "Reference",
        ],
    )];
    let report = validate(tmp.path(), &ruleset).unwrap();
    assert!(report.ok, "got: {:?}", report.outcomes);
}

#[test]
fn test_validation_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "docs/a.md", &doc("a", "A", "alpha"));
    write(tmp.path(), "docs/b/c.md", "broken");

    let mut ruleset = frontmatter_only("docs");
    ruleset.required_files = vec!["docs/a.md".to_owned(), "docs/missing.md".to_owned()];
    ruleset.content_rules = vec![ContentRule::new("docs/a.md", ["alpha", "omega"])];

    let first = validate(tmp.path(), &ruleset).unwrap();
    let second = validate(tmp.path(), &ruleset).unwrap();
    assert_eq!(first.outcomes, second.outcomes);
    assert_eq!(first.ok, second.ok);
    assert_eq!(first.scanned_files, second.scanned_files);
}

#[test]
fn test_json_output_contract() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "docs/a.md", &doc("a", "A", ""));

    let report = validate(tmp.path(), &frontmatter_only("docs")).unwrap();
    let mut buf = Vec::new();
    doccheck::output::write_json(&report, &mut buf).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();

    assert!(json.get("root").is_some());
    assert!(json.get("scanned_files").is_some());
    assert!(json["ok"].as_bool().unwrap());
    let outcomes = json["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0]["check"], "frontmatter");
    assert_eq!(outcomes[0]["passed"], true);
}

#[test]
fn test_write_human_success_output() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "docs/a.md", &doc("a", "A", ""));

    let report = validate(tmp.path(), &frontmatter_only("docs")).unwrap();
    let mut buf = Vec::new();
    doccheck::output::write_human(&report, &mut buf).unwrap();
    let output = String::from_utf8(buf).unwrap();

    assert!(output.contains("DOCUMENTATION CONTENT VALIDATOR"));
    assert!(output.contains("Documents scanned: 1"));
    assert!(output.contains("All 1 rules passed"));
    assert!(!output.contains("FAILED RULES"));
}

#[test]
fn test_write_human_failure_output() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "docs/api/collection/status.md", &doc("s", "S", "GET"));

    let mut ruleset = Ruleset::default();
    ruleset.required_files = vec!["docs/api/errors.md".to_owned()];
    ruleset.content_rules = vec![
        ContentRule::new("docs/api/collection/status.md", ["GET", "FAILED"])
            .named("Status endpoint documentation"),
    ];
    let report = validate(tmp.path(), &ruleset).unwrap();

    let mut buf = Vec::new();
    doccheck::output::write_human(&report, &mut buf).unwrap();
    let output = String::from_utf8(buf).unwrap();

    assert!(output.contains("FAILED RULES"), "got: {output}");
    assert!(output.contains("(Status endpoint documentation)"));
    assert!(output.contains("[missing content] Required text not found [FAILED]"));
    assert!(output.contains("docs/api/errors.md: [missing file]"));
    assert!(output.contains("2 of 2 rules failed with 2 error(s)"));
    assert!(output.contains("Create the missing files"));
}
