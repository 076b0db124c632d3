//! End-to-end route pattern parsing: realistic templates through the public
//! surface, from source text to tree shape, parameter summaries, and
//! diagnostics.

use insta::assert_snapshot;
use trellis::diagnostics::render;
use trellis::route::{parse_route_pattern, Parameter, Pattern, RoutePatternTree};
use trellis::text::VirtualCharSequence;

fn parse(source: &str) -> RoutePatternTree {
    parse_route_pattern(VirtualCharSequence::from_source(0, source))
}

// ===== well-formed templates =====

#[test]
fn test_conventional_default_route() {
    let tree = parse("{controller=Home}/{action=Index}/{id?}");
    assert!(
        tree.diagnostics().is_empty(),
        "conventional route should parse clean, got {:?}",
        tree.diagnostics()
    );

    let names: Vec<&str> = tree.parameters().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["controller", "action", "id"]);
    assert_eq!(tree.parameters()[0].default_value.as_deref(), Some("Home"));
    assert_eq!(tree.parameters()[1].default_value.as_deref(), Some("Index"));
    assert!(tree.parameters()[2].is_optional);

    assert_snapshot!(tree.root().dump(), @r#"
Pattern
  Segment
    Parameter
      OpenBraceToken "{"
      ParameterName
        ParameterNameToken "controller"
      DefaultValue
        EqualsToken "="
        DefaultValueToken "Home"
      CloseBraceToken "}"
  Separator
    SlashToken "/"
  Segment
    Parameter
      OpenBraceToken "{"
      ParameterName
        ParameterNameToken "action"
      DefaultValue
        EqualsToken "="
        DefaultValueToken "Index"
      CloseBraceToken "}"
  Separator
    SlashToken "/"
  Segment
    Parameter
      OpenBraceToken "{"
      ParameterName
        ParameterNameToken "id"
      Optional
        QuestionMarkToken "?"
      CloseBraceToken "}"
  EndOfPatternToken (missing)
"#);
}

#[test]
fn test_catch_all_parameter_summary_serializes() {
    let tree = parse("files/{**path}");
    assert!(tree.diagnostics().is_empty());

    let json = serde_json::to_string_pretty(tree.parameters()).unwrap();
    assert_snapshot!(json, @r#"
[
  {
    "name": "path",
    "is_catch_all": true,
    "is_optional": false,
    "encode_slashes": false,
    "default_value": null,
    "policies": []
  }
]
"#);
}

#[test]
fn test_typed_views_over_constrained_route() {
    let tree = parse("api/orders/{id:int:min(1)}");
    assert!(tree.diagnostics().is_empty());

    let pattern = Pattern::cast(tree.root()).expect("root casts to a pattern view");
    let segments: Vec<_> = pattern.segments().collect();
    assert_eq!(segments.len(), 3);

    let parameter = segments[2]
        .parameters()
        .next()
        .expect("last segment holds the parameter");
    assert_eq!(parameter.name(), "id");
    assert!(!parameter.is_catch_all());
    assert!(!parameter.is_optional());

    let policies: Vec<String> = parameter.policies().map(|p| p.text()).collect();
    assert_eq!(policies, vec![":int", ":min(1)"]);
}

#[test]
fn test_parameters_come_back_in_source_order() {
    let tree = parse("{y}/{x}/{z}");
    let names: Vec<&str> = tree.parameters().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["y", "x", "z"]);
}

// ===== malformed templates =====

#[test]
fn test_unterminated_parameter_keeps_tree_shape() {
    let tree = parse("api/{id");

    // The text survives untouched even though the close brace never came.
    assert_eq!(tree.root().text(), "api/{id");
    assert_snapshot!(tree.root().dump(), @r#"
Pattern
  Segment
    Literal
      LiteralToken "api"
  Separator
    SlashToken "/"
  Segment
    Parameter
      OpenBraceToken "{"
      ParameterName
        ParameterNameToken "id"
      CloseBraceToken (missing)
  EndOfPatternToken (missing)
"#);

    assert_eq!(tree.diagnostics().len(), 1);
    assert_snapshot!(
        tree.diagnostics()[0].to_string(),
        @"error: There is an incomplete parameter in the route template. Check that each '{' character has a matching '}' character. at [7..7)"
    );

    // Parameter summaries are still collected for recovered parameters.
    assert_eq!(tree.parameters().len(), 1);
    assert_eq!(tree.parameters()[0].name, "id");
}

#[test]
fn test_optional_must_follow_period_literal() {
    let tree = parse("{first?}/rest");
    assert!(tree.diagnostics().is_empty(), "optional ordering is legal here");

    let tree = parse("x{first?}");
    let messages: Vec<&str> = tree
        .diagnostics()
        .iter()
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("preceded by an invalid segment 'x'"));
}

// ===== embedding in a host document =====

#[test]
fn test_spans_follow_host_offset() {
    let host = r#"app.map("{region}/{region}", handler)"#;
    let literal = "{region}/{region}";
    let offset = host.find(literal).unwrap();

    let tree = parse_route_pattern(VirtualCharSequence::from_source(offset, literal));

    // The duplicate name diagnostic points at the second occurrence, in
    // host coordinates.
    assert_eq!(tree.diagnostics().len(), 1);
    let diagnostic = &tree.diagnostics()[0];
    assert_eq!(&host[diagnostic.span.start..diagnostic.span.end], "{region}");
    assert_eq!(diagnostic.span.start, offset + "{region}/".len());

    let rendered = render(host, diagnostic);
    assert!(rendered.contains("appears more than one time"));

    // Only the first occurrence makes it into the summaries.
    assert_eq!(tree.parameters().len(), 1);

    let root_span = tree.root().span().unwrap();
    assert_eq!(&host[root_span.start..root_span.end], literal);
}

// ===== parameter views =====

#[test]
fn test_parameter_view_exposes_catch_all_flavors() {
    let tree = parse("{*single}");
    let pattern = Pattern::cast(tree.root()).unwrap();
    let parameter: Parameter<'_> = pattern
        .segments()
        .next()
        .and_then(|segment| segment.parameters().next())
        .unwrap();
    assert!(parameter.is_catch_all());
    assert!(parameter.encode_slashes());

    let tree = parse("{**double}");
    let pattern = Pattern::cast(tree.root()).unwrap();
    let parameter = pattern
        .segments()
        .next()
        .and_then(|segment| segment.parameters().next())
        .unwrap();
    assert!(parameter.is_catch_all());
    assert!(!parameter.encode_slashes());
}
