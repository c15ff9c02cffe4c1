mod common;

use common::{BARE_EXAMPLE_CLASS, EXAMPLE_CLASS, registry_from};
use phpantom_stubgen::registry::TypeRegistry;
use phpantom_stubgen::types::{MethodInfo, Visibility};
use phpantom_stubgen::{InterfaceMap, Method, Origin};

fn reflect(source: &str, class: &str, method: &str) -> Method {
    let registry = registry_from(&[source]);
    let info = registry.find_class(class).expect("class should be indexed");
    let m = info
        .methods
        .iter()
        .find(|m| m.name == method)
        .expect("method should exist");
    Method::reflected(m, &info.fqn(), &info.fqn(), &InterfaceMap::new())
}

fn bare_method(name: &str, return_type: Option<&str>) -> MethodInfo {
    MethodInfo {
        name: name.to_string(),
        parameters: vec![],
        return_type: return_type.map(str::to_string),
        is_static: false,
        visibility: Visibility::Public,
        docblock: None,
    }
}

// ─── The example class ──────────────────────────────────────────────────────

#[test]
fn test_example_class_doc_comment() {
    let method = reflect(EXAMPLE_CLASS, "ExampleClass", "setName");

    let expected = concat!(
        "/**\n",
        " * \n",
        " *\n",
        " * @param string $last \n",
        " * @param string $first \n",
        " */",
    );
    assert_eq!(method.doc_comment(""), expected);
    assert_eq!(method.name(), "setName");
    assert_eq!(method.declaring_class(), "\\ExampleClass");
    assert_eq!(method.root_class(), "\\ExampleClass");
    assert_eq!(method.origin(), Origin::Reflected);
}

#[test]
fn test_example_class_params() {
    let method = reflect(EXAMPLE_CLASS, "ExampleClass", "setName");

    assert_eq!(method.params(false), vec!["$last", "$first"]);
    assert_eq!(method.params(true), vec!["$last", "$first = 'Barry'"]);
    assert_eq!(method.params_joined(false), "$last, $first");
    assert_eq!(method.params_joined(true), "$last, $first = 'Barry'");
    assert!(method.should_return());
}

#[test]
fn test_untyped_params_keep_double_space() {
    let method = reflect(BARE_EXAMPLE_CLASS, "ExampleClass", "setName");

    let doc = method.doc_comment("");
    assert!(doc.contains(" * @param  $last \n"), "got:\n{doc}");
    assert!(doc.contains(" * @param  $first \n"), "got:\n{doc}");
    assert!(!doc.contains("@return"), "unknown return type has no @return line");
}

#[test]
fn test_doc_comment_is_byte_stable() {
    let method = reflect(EXAMPLE_CLASS, "ExampleClass", "setName");
    assert_eq!(method.doc_comment("    "), method.doc_comment("    "));
}

// ─── Text, return and indentation ───────────────────────────────────────────

#[test]
fn test_summary_description_and_return() {
    let source = concat!(
        "<?php\n",
        "namespace App;\n",
        "class Person {\n",
        "    /**\n",
        "     * Set the name.\n",
        "     *\n",
        "     * Replaces both parts.\n",
        "     *\n",
        "     * @param string $last The last name\n",
        "     * @return static The person\n",
        "     */\n",
        "    public function setName(string $last): static { return $this; }\n",
        "}\n",
    );
    let method = reflect(source, "App\\Person", "setName");

    let expected = concat!(
        "    /**\n",
        "     * Set the name.\n",
        "     * \n",
        "     * Replaces both parts.\n",
        "     *\n",
        "     * @param string $last The last name\n",
        "     * @return \\App\\Person The person\n",
        "     */",
    );
    assert_eq!(method.doc_comment("    "), expected);
    assert_eq!(method.summary(), "Set the name.");
    assert_eq!(method.description(), "Replaces both parts.");
    assert_eq!(method.return_description(), "The person");
}

#[test]
fn test_native_return_type_used_without_tag() {
    let source = concat!(
        "<?php\n",
        "namespace App;\n",
        "use Illuminate\\Support\\Collection;\n",
        "class Repo {\n",
        "    public function all(): Collection { }\n",
        "}\n",
    );
    let method = reflect(source, "App\\Repo", "all");

    assert_eq!(method.return_type(), Some("\\Illuminate\\Support\\Collection"));
    assert!(
        method
            .doc_comment("")
            .contains(" * @return \\Illuminate\\Support\\Collection \n")
    );
}

#[test]
fn test_should_return_false_only_for_void() {
    let interfaces = InterfaceMap::new();
    let void = Method::reflected(&bare_method("flush", Some("void")), "A", "A", &interfaces);
    let unknown = Method::reflected(&bare_method("get", None), "A", "A", &interfaces);
    let never = Method::reflected(&bare_method("fail", Some("never")), "A", "A", &interfaces);

    assert!(!void.should_return());
    assert!(!void.doc_comment("").contains("@return"));
    assert!(unknown.should_return());
    assert!(never.should_return());
}

#[test]
fn test_inherited_member_keeps_both_classes() {
    let interfaces = InterfaceMap::new();
    let method = Method::reflected(
        &bare_method("get", None),
        "Illuminate\\Cache\\Repository",
        "\\Illuminate\\Cache\\RedisStore",
        &interfaces,
    );
    assert_eq!(method.declaring_class(), "\\Illuminate\\Cache\\Repository");
    assert_eq!(method.root_class(), "\\Illuminate\\Cache\\RedisStore");
    assert!(method.is_inherited());
}

#[test]
fn test_interface_types_are_substituted_in_docs() {
    let source = concat!(
        "<?php\n",
        "namespace App;\n",
        "use Contracts\\Store;\n",
        "class Cache {\n",
        "    /**\n",
        "     * @param Store|null $store\n",
        "     */\n",
        "    public function using(?Store $store): Store { }\n",
        "}\n",
    );
    let registry = registry_from(&[source]);
    let info = registry.find_class("App\\Cache").unwrap();
    let mut interfaces = InterfaceMap::new();
    interfaces.insert("\\Contracts\\Store".to_string(), "Stores\\Redis".to_string());

    let method = Method::reflected(&info.methods[0], "App\\Cache", "App\\Cache", &interfaces);
    let doc = method.doc_comment("");
    assert!(doc.contains(" * @param \\Stores\\Redis|null $store \n"), "got:\n{doc}");
    assert!(doc.contains(" * @return \\Stores\\Redis \n"), "got:\n{doc}");
}
