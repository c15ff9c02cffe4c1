//! The `php` format: one stub class per alias, inside a `namespace`
//! block per group.
//!
//! The stub class is declared in the target's namespace under the
//! alias's short name.  A facade named after its target (`DB` for
//! `Illuminate\Support\Facades\DB`) redeclares the facade class itself,
//! so its forwarded members show up wherever the facade is imported.  An
//! alias named differently from its target, such as
//! `Example` for `App\ExampleClass`, declares `\App\Example`; a global
//! `Example::` call finds no declaration in this file.  The generator
//! skips a second alias that would declare the same class in a group.
//!
//! ```php
//! namespace Illuminate\Support\Facades {
//!
//!     class DB
//!     {
//!         /**
//!          * Get a database connection instance.
//!          *
//!          * @param string|null $name
//!          * @return \Illuminate\Database\Connection
//!          */
//!         public static function connection($name = null)
//!         {
//!             //Method inherited from \Illuminate\Database\DatabaseManager
//!             return \Illuminate\Database\DatabaseManager::connection($name);
//!         }
//!     }
//! }
//! ```

use std::collections::HashSet;
use std::fmt::Write;

use crate::alias::Alias;
use crate::method::Method;

use super::{NamespaceGroups, RenderOptions};

const HEADER: &str = "<?php
// @formatter:off
/**
 * A helper file for your aliases, to provide autocomplete information to your IDE.
 * Generated by phpantom-stubgen.
 *
 * This file should not be included in your code, only analyzed by your IDE!
 */
";

const CLASS_INDENT: &str = "    ";
const MEMBER_INDENT: &str = "        ";
const BODY_INDENT: &str = "            ";

pub(super) fn render(groups: &NamespaceGroups<'_>, options: &RenderOptions) -> String {
    let mut out = String::from(HEADER);

    for (namespace, aliases) in groups {
        out.push('\n');
        if namespace.is_empty() {
            out.push_str("namespace {\n");
        } else {
            let _ = writeln!(out, "namespace {namespace} {{");
        }
        for alias in aliases {
            out.push('\n');
            render_alias(&mut out, alias);
        }
        out.push_str("}\n");
    }

    if let Some(helpers) = options.helpers.as_deref().filter(|h| !h.trim().is_empty()) {
        out.push_str("\nnamespace {\n");
        out.push_str(helpers.trim_matches('\n'));
        out.push_str("\n}\n");
    }

    out
}

fn render_alias(out: &mut String, alias: &Alias) {
    let _ = writeln!(out, "{CLASS_INDENT}class {}", alias.short_name());
    let _ = writeln!(out, "{CLASS_INDENT}{{");
    // PHP allows one method per name; overloads beyond the first are
    // dropped here.
    let mut seen = HashSet::new();
    for method in alias.members() {
        if !seen.insert(method.name().to_ascii_lowercase()) {
            continue;
        }
        if seen.len() > 1 {
            out.push('\n');
        }
        render_method(out, method);
    }
    let _ = writeln!(out, "{CLASS_INDENT}}}");
}

fn render_method(out: &mut String, method: &Method) {
    out.push_str(&method.doc_comment(MEMBER_INDENT));
    out.push('\n');
    let _ = writeln!(
        out,
        "{MEMBER_INDENT}public static function {}({})",
        method.name(),
        method.params_joined(true)
    );
    let _ = writeln!(out, "{MEMBER_INDENT}{{");
    if method.is_inherited() {
        let _ = writeln!(
            out,
            "{BODY_INDENT}//Method inherited from {}",
            method.declaring_class()
        );
    }
    let _ = writeln!(
        out,
        "{BODY_INDENT}{}{}::{}({});",
        if method.should_return() { "return " } else { "" },
        method.root_class(),
        method.real_name(),
        method.params_joined(false)
    );
    let _ = writeln!(out, "{MEMBER_INDENT}}}");
}
