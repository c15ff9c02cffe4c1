mod common;

use common::{BARE_EXAMPLE_CLASS, EXAMPLE_CLASS, alias_for, registry_from};
use phpantom_stubgen::render::{self, Format, RenderOptions};

const NAMESPACED: &str = concat!(
    "<?php\n",
    "namespace X;\n",
    "class Foo { public function foo() { } }\n",
    "class Baz { public function baz(): void { } }\n",
    "namespace Y;\n",
    "class Bar { public function bar($a = 1) { } }\n",
);

// ─── Grouping ───────────────────────────────────────────────────────────────

#[test]
fn test_group_preserves_discovery_order() {
    let registry = registry_from(&[NAMESPACED]);
    let aliases = vec![
        alias_for("A", "X\\Foo", &registry),
        alias_for("B", "Y\\Bar", &registry),
        alias_for("C", "X\\Baz", &registry),
    ];

    for _ in 0..3 {
        let groups = render::group(&aliases);
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["X", "Y"]);
        let x: Vec<&str> = groups["X"].iter().map(|a| a.name()).collect();
        assert_eq!(x, vec!["A", "C"]);
        let y: Vec<&str> = groups["Y"].iter().map(|a| a.name()).collect();
        assert_eq!(y, vec!["B"]);
    }
}

#[test]
fn test_group_drops_invalid_aliases() {
    let registry = registry_from(&[NAMESPACED]);
    let aliases = vec![
        alias_for("A", "X\\Foo", &registry),
        alias_for("Missing", "Z\\Nothing", &registry),
    ];

    let groups = render::group(&aliases);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups["X"].len(), 1);
}

#[test]
fn test_format_parsing() {
    assert_eq!("php".parse::<Format>().unwrap(), Format::Php);
    assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
    assert!("yaml".parse::<Format>().is_err());
    assert_eq!(Format::Json.extension(), "json");
}

// ─── php ────────────────────────────────────────────────────────────────────

#[test]
fn test_php_output_for_example() {
    let registry = registry_from(&[BARE_EXAMPLE_CLASS]);
    let aliases = vec![alias_for("Example", "ExampleClass", &registry)];
    let output = render::render(Format::Php, &render::group(&aliases), &RenderOptions::default());

    let expected_body = concat!(
        "namespace {\n",
        "\n",
        "    class Example\n",
        "    {\n",
        "        /**\n",
        "         * \n",
        "         *\n",
        "         * @param  $last \n",
        "         * @param  $first \n",
        "         */\n",
        "        public static function setName($last, $first = 'Barry')\n",
        "        {\n",
        "            return \\ExampleClass::setName($last, $first);\n",
        "        }\n",
        "    }\n",
        "}\n",
    );
    assert!(output.starts_with("<?php\n"));
    assert!(output.ends_with(expected_body), "got:\n{output}");
}

#[test]
fn test_php_output_namespaces_and_inheritance() {
    let source = concat!(
        "<?php\n",
        "namespace Illuminate\\Database;\n",
        "class Base {\n",
        "    public function flush(): void { }\n",
        "}\n",
        "class Manager extends Base {\n",
        "    public function connection($name = null) { }\n",
        "}\n",
    );
    let registry = registry_from(&[source]);
    let aliases = vec![alias_for("DB", "Illuminate\\Database\\Manager", &registry)];
    let output = render::render(Format::Php, &render::group(&aliases), &RenderOptions::default());

    assert!(output.contains("namespace Illuminate\\Database {\n"));
    assert!(output.contains("    class DB\n"));
    assert!(output.contains("        public static function flush()\n"));
    assert!(output.contains(concat!(
        "            //Method inherited from \\Illuminate\\Database\\Base\n",
        "            \\Illuminate\\Database\\Manager::flush();\n",
    )));
    assert!(output.contains("            return \\Illuminate\\Database\\Manager::connection($name);\n"));
}

#[test]
fn test_php_output_appends_helpers() {
    let registry = registry_from(&[EXAMPLE_CLASS]);
    let aliases = vec![alias_for("Example", "ExampleClass", &registry)];
    let options = RenderOptions {
        helpers: Some("\nfunction helper() { }\n".to_string()),
    };
    let output = render::render(Format::Php, &render::group(&aliases), &options);

    assert!(output.ends_with("\nnamespace {\nfunction helper() { }\n}\n"), "got:\n{output}");
}

#[test]
fn test_php_output_is_deterministic() {
    let registry = registry_from(&[NAMESPACED]);
    let aliases = vec![
        alias_for("A", "X\\Foo", &registry),
        alias_for("B", "Y\\Bar", &registry),
        alias_for("C", "X\\Baz", &registry),
    ];
    let first = render::render(Format::Php, &render::group(&aliases), &RenderOptions::default());
    let second = render::render(Format::Php, &render::group(&aliases), &RenderOptions::default());
    assert_eq!(first, second);

    let a = first.find("class A\n").unwrap();
    let c = first.find("class C\n").unwrap();
    let b = first.find("class B\n").unwrap();
    assert!(a < c && c < b, "X group (A, C) renders before Y group (B)");
}

// ─── json ───────────────────────────────────────────────────────────────────

#[test]
fn test_json_output_for_example() {
    let registry = registry_from(&[EXAMPLE_CLASS]);
    let aliases = vec![alias_for("Example", "ExampleClass", &registry)];
    let output = render::render(Format::Json, &render::group(&aliases), &RenderOptions::default());

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "Example": { "functions": { "setName": "($last, $first = 'Barry')" } }
        })
    );
    assert!(output.contains('\n'), "output is pretty-printed");
    assert!(!output.contains("@param"), "doc comments are omitted");
}

#[test]
fn test_json_output_order_and_invalid_aliases() {
    let registry = registry_from(&[NAMESPACED]);
    let aliases = vec![
        alias_for("B", "Y\\Bar", &registry),
        alias_for("Gone", "Nope", &registry),
        alias_for("A", "X\\Foo", &registry),
    ];
    let output = render::render(Format::Json, &render::group(&aliases), &RenderOptions::default());

    assert!(!output.contains("Gone"));
    let b = output.find("\"B\"").unwrap();
    let a = output.find("\"A\"").unwrap();
    assert!(b < a, "groups keep discovery order");

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["B"]["functions"]["bar"], "($a = 1)");
    assert_eq!(value["A"]["functions"]["foo"], "()");
}

#[test]
fn test_json_empty_alias_has_empty_object() {
    let registry = registry_from(&["<?php\nclass Nothing { }\n"]);
    let aliases = vec![alias_for("Empty", "Nothing", &registry)];
    let output = render::render(Format::Json, &render::group(&aliases), &RenderOptions::default());

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value, serde_json::json!({ "Empty": { "functions": {} } }));
}
