//! The full marker-comment flow: find the comment in a host line, read
//! its options, then parse the adjacent string literal at its host offset
//! so every span and diagnostic lands in host coordinates.

use trellis::comment::{match_comment, try_get_options};
use trellis::diagnostics::render;
use trellis::route::{parse_route_pattern, RouteOptions};
use trellis::text::VirtualCharSequence;

#[test]
fn test_marker_gates_an_embedded_parse() {
    let host = r#"let order_route = "orders/{id:int}"; // language=route,casesensitive"#;

    let comment_start = host.find("//").unwrap();
    let marker = match_comment(&host[comment_start..]).expect("marker comment recognized");
    assert!(marker.is_language("route"));

    let options: RouteOptions =
        try_get_options(&marker.options).expect("every option name is known");
    assert!(options.case_sensitive);

    let literal = "orders/{id:int}";
    let offset = host.find(literal).unwrap();
    let tree = parse_route_pattern(VirtualCharSequence::from_source(offset, literal));

    assert!(tree.diagnostics().is_empty());
    assert_eq!(tree.parameters().len(), 1);
    assert_eq!(tree.parameters()[0].name, "id");

    // The tree addresses the host document, not the bare literal.
    let root_span = tree.root().span().unwrap();
    assert_eq!(&host[root_span.start..root_span.end], literal);
}

#[test]
fn test_unknown_option_fails_strict_parse_but_not_the_match() {
    let marker = match_comment("// lang=route,fastpath").expect("language still recognized");
    assert!(marker.is_language("route"));
    assert_eq!(marker.options, vec!["fastpath"]);

    let options: Option<RouteOptions> = try_get_options(&marker.options);
    assert_eq!(options, None, "strict option parsing rejects unknown names");
}

#[test]
fn test_ordinary_comments_do_not_gate() {
    assert_eq!(match_comment("// maps the order routes"), None);
    assert_eq!(match_comment("// language route"), None);

    // A different embedded language is a match, just not ours.
    let marker = match_comment("/* language=regex */").unwrap();
    assert!(!marker.is_language("route"));
}

#[test]
fn test_diagnostics_render_against_the_host_line() {
    let host = r#"app.get("files/{path}/{path}", serve) // language=route"#;
    let literal = "files/{path}/{path}";
    let offset = host.find(literal).unwrap();

    let marker = match_comment(&host[host.find("//").unwrap()..]).unwrap();
    assert!(marker.is_language("route"));

    let tree = parse_route_pattern(VirtualCharSequence::from_source(offset, literal));
    assert_eq!(tree.diagnostics().len(), 1);

    let diagnostic = &tree.diagnostics()[0];
    assert_eq!(diagnostic.span.start, offset + "files/{path}/".len());
    assert_eq!(&host[diagnostic.span.start..diagnostic.span.end], "{path}");

    let rendered = render(host, diagnostic);
    assert!(rendered.contains("appears more than one time"));
}
