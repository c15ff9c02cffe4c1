mod common;

use phpantom_stubgen::docblock::{ParamTag, parse_param_list};
use phpantom_stubgen::types::{DefaultValue, ParameterInfo};
use phpantom_stubgen::Parameter;

fn param(spec: &str) -> Parameter {
    let infos = parse_param_list(spec);
    assert_eq!(infos.len(), 1, "expected one parameter in {spec:?}");
    Parameter::new(&infos[0], "App\\Owner", None)
}

fn info(name: &str, default: Option<DefaultValue>) -> ParameterInfo {
    ParameterInfo {
        name: name.to_string(),
        type_hint: None,
        is_variadic: false,
        is_reference: false,
        default,
    }
}

// ─── Rendering ──────────────────────────────────────────────────────────────

#[test]
fn test_string_default_renders_verbatim() {
    let p = param("$first = 'Barry'");
    assert_eq!(p.render(true), "$first = 'Barry'");
    assert_eq!(p.render(false), "$first");
}

#[test]
fn test_no_default_renders_the_same_either_way() {
    for spec in ["$last", "string $last", "&$out", "...$rest", "?int $count"] {
        let p = param(spec);
        assert_eq!(p.render(true), p.render(false), "for {spec:?}");
    }
}

#[test]
fn test_literal_defaults_round_trip() {
    let cases = [
        ("$a = 1", "$a = 1"),
        ("$b = -1.5", "$b = -1.5"),
        ("$c = true", "$c = true"),
        ("$d = null", "$d = null"),
        ("$e = []", "$e = []"),
        ("$f = ['a' => 1, 'b']", "$f = ['a' => 1, 'b']"),
        ("$g = PHP_EOL", "$g = PHP_EOL"),
        ("$h = \\App\\Status::Active", "$h = \\App\\Status::Active"),
        ("$i = \"x, y\"", "$i = \"x, y\""),
    ];
    for (spec, expected) in cases {
        assert_eq!(param(spec).render(true), expected);
    }
}

#[test]
fn test_reference_and_variadic_markers() {
    assert_eq!(param("array &$out").render(true), "&$out");
    assert_eq!(param("&$out = []").render(true), "&$out = []");
    assert_eq!(param("string ...$parts").render(true), "...$parts");
    assert_eq!(param("mixed &...$args").render(true), "&...$args");
    assert_eq!(param("&...$args").render(false), "&...$args");
}

#[test]
fn test_opaque_default_falls_back_to_null() {
    let untyped = Parameter::new(&info("$clock", Some(DefaultValue::Opaque)), "App\\Owner", None);
    assert_eq!(untyped.render(true), "$clock = null");
    assert_eq!(untyped.render(false), "$clock");
    assert!(untyped.is_optional());

    let mut typed_info = info("$items", Some(DefaultValue::Opaque));
    typed_info.type_hint = Some("array".to_string());
    let typed = Parameter::new(&typed_info, "App\\Owner", None);
    assert_eq!(typed.render(true), "$items = null");
}

// ─── Flags and types ────────────────────────────────────────────────────────

#[test]
fn test_optional_and_nullable_flags() {
    assert!(!param("$a").is_optional());
    assert!(param("$a = 1").is_optional());
    assert!(param("...$a").is_optional());

    assert!(param("?string $a").is_nullable());
    assert!(param("string|null $a").is_nullable());
    assert!(param("$a = null").is_nullable());
    assert!(!param("string $a").is_nullable());
}

#[test]
fn test_self_hint_resolves_to_owner() {
    let p = param("?self $other");
    assert_eq!(p.type_hint(), Some("?\\App\\Owner"));
    assert_eq!(p.doc_type(), "?\\App\\Owner");
}

#[test]
fn test_doc_type_prefers_tag_over_hint() {
    let infos = parse_param_list("array $items");
    let tag = ParamTag {
        name: "$items".to_string(),
        type_str: "list<string>".to_string(),
        description: "The items".to_string(),
    };
    let p = Parameter::new(&infos[0], "App\\Owner", Some(&tag));
    assert_eq!(p.doc_type(), "list<string>");
    assert_eq!(p.description(), "The items");

    let bare = Parameter::new(&parse_param_list("$x")[0], "App\\Owner", None);
    assert_eq!(bare.doc_type(), "");
    assert_eq!(bare.name(), "x");
}
