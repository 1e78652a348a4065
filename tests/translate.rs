//! End-to-end translation from configuration to filesystem path.

use vhost_mapper::config::{parse_config, ConfigError};
use vhost_mapper::fallback::{FallbackOutcome, FsProbe};
use vhost_mapper::routing::{Decline, Handler, RequestContext, Translator};

mod common;

use common::SrvTree;

fn translator_for(tree: &SrvTree, extra: &str) -> Translator {
    let text = format!(
        r#"
        set_document_root = true

        [document_root]
        map = "{root}/%0/public/htdocs"

        [script_alias]
        map = "{root}/%0/public/cgi-bin"

        [fallback]
        prefix = "{prefix}"
        {extra}
        "#,
        root = tree.root().display(),
        prefix = tree.prefix(),
        extra = extra,
    );
    let config = parse_config(&text).unwrap();
    Translator::from_config(&config).unwrap()
}

#[test]
fn test_www_and_bare_domain_share_a_tree() {
    let tree = SrvTree::with_domains(&["example.com"]);
    tree.touch("example.com/public/htdocs/index.html");
    let translator = translator_for(&tree, "");

    for host in ["www.example.com", "example.com", "WWW.EXAMPLE.COM"] {
        let t = translator
            .translate(&RequestContext::new(host, "/index.html"), &FsProbe)
            .unwrap();
        assert_eq!(
            t.filename.to_string(),
            tree.path("example.com/public/htdocs/index.html"),
            "host {}",
            host
        );
        assert_eq!(
            t.document_root,
            Some(tree.path("example.com/public/htdocs/").into_bytes())
        );
    }
}

#[test]
fn test_cgi_request() {
    let tree = SrvTree::with_domains(&["example.com"]);
    let translator = translator_for(&tree, "");

    let t = translator
        .translate(&RequestContext::new("www.example.com", "/cgi-bin/formail.cgi"), &FsProbe)
        .unwrap();
    assert_eq!(t.filename.to_string(), tree.path("example.com/public/cgi-bin/formail.cgi"));
    assert_eq!(t.handler, Some(Handler::CgiScript));
    assert_eq!(t.document_root, None);
}

#[test]
fn test_fallback_can_be_disabled() {
    let tree = SrvTree::with_domains(&["example.com"]);
    let translator = translator_for(&tree, "enabled = false");

    let t = translator
        .translate(&RequestContext::new("www.example.com", "/"), &FsProbe)
        .unwrap();
    assert_eq!(t.filename.to_string(), tree.path("www.example.com/public/htdocs/"));
    assert_eq!(t.fallback, FallbackOutcome::Disabled);
}

#[test]
fn test_unknown_host_keeps_mapped_path() {
    let tree = SrvTree::with_domains(&["example.com"]);
    let translator = translator_for(&tree, "");

    let t = translator
        .translate(&RequestContext::new("nomatch.invalid", "/index.html"), &FsProbe)
        .unwrap();
    assert_eq!(t.filename.to_string(), tree.path("nomatch.invalid/public/htdocs/index.html"));
}

#[test]
fn test_declines_relative_uri() {
    let tree = SrvTree::with_domains(&["example.com"]);
    let translator = translator_for(&tree, "");
    assert_eq!(
        translator.translate(&RequestContext::new("example.com", "index.html"), &FsProbe),
        Err(Decline::UriNotAbsolute)
    );
}

#[test]
fn test_bad_format_rejected_at_load() {
    let err = parse_config("[document_root]\nmap = \"/srv/%0/%y\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
}
