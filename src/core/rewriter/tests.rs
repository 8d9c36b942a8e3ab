//! Tests for HTML rewriting

use super::{BundleRewriter, RemotePageRewriter, RewriteContext, RewriteHtml};
use crate::config::models::{BundleConfig, WidgetConfig};
use crate::core::url_guard::normalize_target;

fn remote_rewriter(target: &str) -> RemotePageRewriter {
    RemotePageRewriter::new(
        RewriteContext {
            target: normalize_target(target).unwrap(),
            hosting_origin: "https://embed.example.com".to_string(),
        },
        WidgetConfig::default(),
    )
}

fn widget_script_count(html: &str) -> usize {
    html.matches("src=\"https://embed.example.com/widget.js\"").count()
}

fn bootstrap_count(html: &str) -> usize {
    html.matches("window.__embedgate").count()
}

#[test]
fn test_root_relative_reference_resolves_against_target_origin() {
    let rewriter = remote_rewriter("https://example.com/articles/x");
    let output = rewriter
        .rewrite(r#"<html><body><img src="/logo.png"></body></html>"#)
        .unwrap();

    assert!(
        output.contains(r#"src="https://example.com/logo.png""#),
        "got: {}",
        output
    );
}

#[test]
fn test_document_relative_reference_resolves_against_document_directory() {
    let rewriter = remote_rewriter("https://example.com/articles/x");
    let output = rewriter
        .rewrite(r#"<html><body><img src="pic.png"></body></html>"#)
        .unwrap();

    assert!(output.contains(r#"src="https://example.com/articles/pic.png""#));
}

#[test]
fn test_absolute_references_are_untouched() {
    let rewriter = remote_rewriter("https://example.com/");
    let output = rewriter
        .rewrite(r#"<html><body><script src="https://cdn.example.net/lib.js"></script></body></html>"#)
        .unwrap();

    assert!(output.contains(r#"src="https://cdn.example.net/lib.js""#));
}

#[test]
fn test_fragment_and_javascript_links_are_untouched() {
    let rewriter = remote_rewriter("https://example.com/page");
    let output = rewriter
        .rewrite(r##"<html><body><a href="#section">x</a><a href="javascript:void(0)">y</a></body></html>"##)
        .unwrap();

    assert!(output.contains(r##"href="#section""##));
    assert!(output.contains(r#"href="javascript:void(0)""#));
}

#[test]
fn test_stylesheet_and_nav_links_resolve() {
    let rewriter = remote_rewriter("https://example.com/docs/guide");
    let output = rewriter
        .rewrite(
            r#"<html><head><link rel="stylesheet" href="/main.css"></head><body><a href="next">next</a></body></html>"#,
        )
        .unwrap();

    assert!(output.contains(r#"href="https://example.com/main.css""#));
    assert!(output.contains(r#"href="https://example.com/docs/next""#));
}

#[test]
fn test_srcset_entries_resolve() {
    let rewriter = remote_rewriter("https://example.com/a/b");
    let output = rewriter
        .rewrite(r#"<html><body><img srcset="/one.png 1x, two.png 2x"></body></html>"#)
        .unwrap();

    assert!(output.contains("https://example.com/one.png 1x"));
    assert!(output.contains("https://example.com/a/two.png 2x"));
}

#[test]
fn test_base_tag_injected_when_missing() {
    let rewriter = remote_rewriter("https://example.com/articles/x");
    let output = rewriter
        .rewrite("<html><head><title>t</title></head><body></body></html>")
        .unwrap();

    assert!(output.contains(r#"<base href="https://example.com/articles/">"#));
}

#[test]
fn test_existing_base_tag_is_respected() {
    let rewriter = remote_rewriter("https://example.com/articles/x");
    let input = r#"<html><head><base href="https://other.example.org/"></head><body></body></html>"#;
    let output = rewriter.rewrite(input).unwrap();

    assert_eq!(output.matches("<base").count(), 1);
    assert!(output.contains("https://other.example.org/"));
}

#[test]
fn test_widget_injected_exactly_once() {
    let rewriter = remote_rewriter("https://example.com/");
    let output = rewriter
        .rewrite("<html><head></head><body><p>hi</p></body></html>")
        .unwrap();

    assert_eq!(widget_script_count(&output), 1);
    assert_eq!(bootstrap_count(&output), 1);
}

#[test]
fn test_widget_injection_is_idempotent() {
    let rewriter = remote_rewriter("https://example.com/");
    let once = rewriter
        .rewrite("<html><head></head><body><p>hi</p></body></html>")
        .unwrap();
    let twice = rewriter.rewrite(&once).unwrap();

    assert_eq!(widget_script_count(&twice), 1);
    assert_eq!(bootstrap_count(&twice), 1);
}

#[test]
fn test_pathological_duplicate_widget_tags_collapse_to_one() {
    let rewriter = remote_rewriter("https://example.com/");
    let input = r#"<html><body>
        <script data-embedgate-widget src="https://embed.example.com/widget.js"></script>
        <script data-embedgate-widget src="https://embed.example.com/widget.js"></script>
    </body></html>"#;
    let output = rewriter.rewrite(input).unwrap();

    assert_eq!(widget_script_count(&output), 1);
    assert_eq!(bootstrap_count(&output), 1);
}

#[test]
fn test_widget_injected_even_without_body_element() {
    let rewriter = remote_rewriter("https://example.com/");
    let output = rewriter.rewrite("<p>bare fragment</p>").unwrap();

    assert_eq!(bootstrap_count(&output), 1);
}

#[test]
fn test_widget_backend_defaults_to_hosting_origin() {
    let rewriter = remote_rewriter("https://example.com/");
    let output = rewriter
        .rewrite("<html><body></body></html>")
        .unwrap();

    assert!(output.contains(r#"backend: "https://embed.example.com""#));
}

#[test]
fn test_widget_backend_override() {
    let rewriter = RemotePageRewriter::new(
        RewriteContext {
            target: normalize_target("https://example.com/").unwrap(),
            hosting_origin: "https://embed.example.com".to_string(),
        },
        WidgetConfig {
            backend_origin: Some("https://api.example.com".to_string()),
            ..Default::default()
        },
    );
    let output = rewriter.rewrite("<html><body></body></html>").unwrap();

    assert!(output.contains(r#"backend: "https://api.example.com""#));
}

#[test]
fn test_bundle_rewriter_remaps_known_assets() {
    let rewriter = BundleRewriter::new(&BundleConfig::default());
    let input = r#"<html><head><link rel="stylesheet" href="styles.css"></head><body><script src="./script.js"></script><img src="logo.png"></body></html>"#;
    let output = rewriter.rewrite(input).unwrap();

    assert!(output.contains(r#"href="/mounted/styles.css""#));
    assert!(output.contains(r#"src="/mounted/script.js""#));
    assert!(output.contains(r#"src="/mounted/logo.png""#));
}

#[test]
fn test_bundle_rewriter_leaves_unknown_references_alone() {
    let rewriter = BundleRewriter::new(&BundleConfig::default());
    let input = r#"<html><body><img src="unlisted.png"><script src="https://cdn.example.net/x.js"></script></body></html>"#;
    let output = rewriter.rewrite(input).unwrap();

    assert!(output.contains(r#"src="unlisted.png""#));
    assert!(output.contains(r#"src="https://cdn.example.net/x.js""#));
}
