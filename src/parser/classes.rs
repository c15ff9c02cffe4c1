/// Class, interface, trait, and enum extraction.
///
/// Each class-like declaration is tagged with a [`ClassLikeKind`] and
/// records its namespace, its parent/interfaces/traits, its class-level
/// docblock (which carries `@method` tags), and its methods with
/// parameters, default values and docblocks.
///
/// Names are resolved per namespace scope, since `use` imports only apply
/// within the namespace block that declares them.
use std::collections::HashMap;

use mago_span::HasSpan;
use mago_syntax::ast::*;

use crate::docblock;
use crate::types::*;

use super::names::resolve_class_names;
use super::use_statements::extract_use_items;
use super::{DocblockCtx, extract_hint_string, extract_parameters, extract_visibility};

/// Walk the top-level statements of a program, extracting every class-like
/// declaration with its namespace and resolved names.
pub(crate) fn extract_from_program<'a>(
    statements: impl Iterator<Item = &'a Statement<'a>>,
    classes: &mut Vec<ClassInfo>,
    doc_ctx: &DocblockCtx<'a>,
) {
    // Statements outside any namespace block share the global scope.
    let mut global_uses = HashMap::new();
    let mut global_classes = Vec::new();

    for statement in statements {
        match statement {
            Statement::Namespace(namespace) => {
                let name = namespace
                    .name
                    .as_ref()
                    .map(|ident| ident.value().to_string())
                    .filter(|n| !n.is_empty());

                let mut use_map = HashMap::new();
                let mut scoped = Vec::new();
                extract_scope(
                    namespace.statements().iter(),
                    &mut use_map,
                    &mut scoped,
                    name.as_deref(),
                    doc_ctx,
                );
                resolve_class_names(&mut scoped, &use_map, name.as_deref());
                classes.append(&mut scoped);
            }
            other => extract_scope(
                std::iter::once(other),
                &mut global_uses,
                &mut global_classes,
                None,
                doc_ctx,
            ),
        }
    }

    resolve_class_names(&mut global_classes, &global_uses, None);
    classes.append(&mut global_classes);
}

/// Extract `use` imports and class-likes from the statements of a single
/// namespace scope.
fn extract_scope<'a>(
    statements: impl Iterator<Item = &'a Statement<'a>>,
    use_map: &mut HashMap<String, String>,
    classes: &mut Vec<ClassInfo>,
    namespace: Option<&str>,
    doc_ctx: &DocblockCtx<'a>,
) {
    for statement in statements {
        match statement {
            Statement::Use(use_stmt) => extract_use_items(&use_stmt.items, use_map),
            Statement::Class(_)
            | Statement::Interface(_)
            | Statement::Trait(_)
            | Statement::Enum(_) => {
                if let Some(mut class) = extract_class_like(statement, doc_ctx) {
                    class.namespace = namespace.map(str::to_string);
                    classes.push(class);
                }
            }
            Statement::Block(block) => {
                extract_scope(block.statements.iter(), use_map, classes, namespace, doc_ctx)
            }
            _ => {}
        }
    }
}

/// Build a `ClassInfo` from a single class-like statement.  Names are left
/// as written; the caller resolves them once the scope's imports are known.
fn extract_class_like<'a>(
    statement: &'a Statement<'a>,
    doc_ctx: &DocblockCtx<'a>,
) -> Option<ClassInfo> {
    match statement {
        Statement::Class(class) => {
            let parent_class = class
                .extends
                .as_ref()
                .and_then(|ext| ext.types.first().map(|ident| ident.value().to_string()));
            let interfaces = class
                .implements
                .as_ref()
                .map(|imp| {
                    imp.types
                        .iter()
                        .map(|ident| ident.value().to_string())
                        .collect()
                })
                .unwrap_or_default();
            let (methods, used_traits) = extract_class_like_members(class.members.iter(), doc_ctx);

            Some(ClassInfo {
                kind: ClassLikeKind::Class,
                name: class.name.value.to_string(),
                namespace: None,
                methods,
                parent_class,
                interfaces,
                used_traits,
                docblock: doc_for(class, doc_ctx),
            })
        }
        Statement::Interface(iface) => {
            // Interfaces use `extends` for parent interfaces; all of them
            // count as implemented capabilities.
            let interfaces = iface
                .extends
                .as_ref()
                .map(|ext| {
                    ext.types
                        .iter()
                        .map(|ident| ident.value().to_string())
                        .collect()
                })
                .unwrap_or_default();
            let (methods, used_traits) = extract_class_like_members(iface.members.iter(), doc_ctx);

            Some(ClassInfo {
                kind: ClassLikeKind::Interface,
                name: iface.name.value.to_string(),
                namespace: None,
                methods,
                parent_class: None,
                interfaces,
                used_traits,
                docblock: doc_for(iface, doc_ctx),
            })
        }
        Statement::Trait(trait_def) => {
            let (methods, used_traits) =
                extract_class_like_members(trait_def.members.iter(), doc_ctx);

            Some(ClassInfo {
                kind: ClassLikeKind::Trait,
                name: trait_def.name.value.to_string(),
                namespace: None,
                methods,
                parent_class: None,
                interfaces: vec![],
                used_traits,
                docblock: doc_for(trait_def, doc_ctx),
            })
        }
        Statement::Enum(enum_def) => {
            let interfaces = enum_def
                .implements
                .as_ref()
                .map(|imp| {
                    imp.types
                        .iter()
                        .map(|ident| ident.value().to_string())
                        .collect()
                })
                .unwrap_or_default();
            let (methods, used_traits) =
                extract_class_like_members(enum_def.members.iter(), doc_ctx);

            Some(ClassInfo {
                kind: ClassLikeKind::Enum,
                name: enum_def.name.value.to_string(),
                namespace: None,
                methods,
                parent_class: None,
                interfaces,
                used_traits,
                docblock: doc_for(enum_def, doc_ctx),
            })
        }
        _ => None,
    }
}

/// The owned docblock text preceding a node, if any.
fn doc_for(node: &impl HasSpan, doc_ctx: &DocblockCtx<'_>) -> Option<String> {
    docblock::get_docblock_text_for_node(doc_ctx.trivias, doc_ctx.content, node)
        .map(str::to_string)
}

/// Extract methods and used trait names from class-like members.
///
/// This is shared between classes, interfaces, traits and enums since all
/// use the same `ClassLikeMember` representation.  Properties and
/// constants are not part of a stub's callable surface and are skipped.
fn extract_class_like_members<'a>(
    members: impl Iterator<Item = &'a ClassLikeMember<'a>>,
    doc_ctx: &DocblockCtx<'a>,
) -> (Vec<MethodInfo>, Vec<String>) {
    let mut methods = Vec::new();
    let mut used_traits = Vec::new();

    for member in members {
        match member {
            ClassLikeMember::Method(method) => {
                methods.push(MethodInfo {
                    name: method.name.value.to_string(),
                    parameters: extract_parameters(&method.parameter_list, doc_ctx.content),
                    return_type: method
                        .return_type_hint
                        .as_ref()
                        .map(|rth| extract_hint_string(&rth.hint)),
                    is_static: method.modifiers.iter().any(|m| m.is_static()),
                    visibility: extract_visibility(method.modifiers.iter()),
                    docblock: doc_for(method, doc_ctx),
                });
            }
            ClassLikeMember::TraitUse(trait_use) => {
                for trait_name_ident in trait_use.trait_names.iter() {
                    used_traits.push(trait_name_ident.value().to_string());
                }
            }
            _ => {}
        }
    }

    (methods, used_traits)
}
