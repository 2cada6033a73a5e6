//! Java source model on tree-sitter-java.
//!
//! Owners are package-qualified; nested types use `Outer$Inner`. Lambdas
//! and anonymous-class methods become their own declarations, and their
//! invocations are also credited to every enclosing declaration.
//!
//! Receivers that name a field, parameter or local variable with a
//! declared type are rewritten to that type's simple name, so
//! `repository.persist()` on an `OrderRepository` field yields
//! `OrderRepository.persist` and `lines.add()` on a `List<String>`
//! yields `List.add`.

use std::sync::Arc;

use ripple_core::errors::ParseError;
use ripple_core::types::collections::{FxHashMap, SmallVec2};
use tracing::debug;
use tree_sitter::{Language, Node, Parser};

use super::cache::{hash_content, CachedParse, ParseCache};
use super::traits::SourceModel;
use super::types::{DeclKind, MethodDecl, ParsedFile, SourceFile};

/// Recursion guard for pathological nesting.
const MAX_NESTING: usize = 512;

/// Method name used for closures outside any method (field initializers).
const UNKNOWN_METHOD: &str = "unknown";

pub struct JavaSourceModel {
    cache: ParseCache,
}

impl JavaSourceModel {
    pub fn new() -> Self {
        Self {
            cache: ParseCache::default(),
        }
    }

    pub fn with_cache(cache: ParseCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &ParseCache {
        &self.cache
    }

    fn extract(&self, file: &SourceFile) -> Result<CachedParse, ParseError> {
        let ts_language: Language = tree_sitter_java::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| ParseError::GrammarLoad {
                language: "java".to_string(),
                message: e.to_string(),
            })?;

        let tree = parser
            .parse(&file.content, None)
            .ok_or_else(|| ParseError::TreeSitter {
                path: file.path.clone(),
                message: "tree-sitter returned None".to_string(),
            })?;

        let root = tree.root_node();
        let mut extractor = JavaExtractor::new(&file.content);
        extractor.visit(root, &Scope::default(), 0);

        Ok(CachedParse {
            declarations: extractor.declarations,
            syntax_errors: count_errors(root),
        })
    }
}

impl Default for JavaSourceModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceModel for JavaSourceModel {
    fn supports(&self, path: &str) -> bool {
        path.ends_with(".java")
    }

    fn parse_file(&self, file: &SourceFile) -> Result<ParsedFile, ParseError> {
        if !self.supports(&file.path) {
            return Err(ParseError::UnsupportedLanguage {
                path: file.path.clone(),
            });
        }
        if std::str::from_utf8(&file.content).is_err() {
            return Err(ParseError::InvalidEncoding {
                path: file.path.clone(),
            });
        }

        let content_hash = hash_content(&file.content);
        let parse = match self.cache.get(content_hash) {
            Some(hit) => hit,
            None => {
                let fresh = Arc::new(self.extract(file)?);
                self.cache.insert(content_hash, Arc::clone(&fresh));
                fresh
            }
        };

        if parse.syntax_errors > 0 {
            debug!(
                path = %file.path,
                errors = parse.syntax_errors,
                "tolerated syntax errors"
            );
        }

        Ok(ParsedFile {
            path: file.path.clone(),
            declarations: parse.declarations.clone(),
            syntax_errors: parse.syntax_errors,
        })
    }
}

/// Where the walk currently is.
#[derive(Debug, Clone, Default)]
struct Scope {
    /// Qualified name of the innermost named type.
    owner: Option<String>,
    /// Name of the innermost method, used to name closures.
    enclosing_method: Option<String>,
    /// Declarations that receive invocations found at this point.
    active: Vec<usize>,
    /// Variable name → simple name of its declared type.
    variables: FxHashMap<String, String>,
}

struct JavaExtractor<'a> {
    source: &'a [u8],
    package: Option<String>,
    declarations: Vec<MethodDecl>,
    anonymous_bodies: u32,
}

impl<'a> JavaExtractor<'a> {
    fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            package: None,
            declarations: Vec::new(),
            anonymous_bodies: 0,
        }
    }

    fn visit(&mut self, node: Node<'_>, scope: &Scope, depth: usize) {
        if depth > MAX_NESTING {
            return;
        }

        match node.kind() {
            "package_declaration" => {
                self.package = named_children(node)
                    .into_iter()
                    .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"))
                    .map(|c| node_text(c, self.source));
            }
            "class_declaration" | "interface_declaration" | "enum_declaration"
            | "record_declaration" => {
                let Some(name) = node
                    .child_by_field_name("name")
                    .map(|n| node_text(n, self.source))
                else {
                    self.visit_children(node, scope, depth);
                    return;
                };
                let owner = match (&scope.owner, &self.package) {
                    (Some(outer), _) => format!("{outer}${name}"),
                    (None, Some(package)) => format!("{package}.{name}"),
                    (None, None) => name,
                };
                let mut variables = scope.variables.clone();
                self.collect_members(node, &mut variables);
                let inner = Scope {
                    owner: Some(owner),
                    enclosing_method: None,
                    active: Vec::new(),
                    variables,
                };
                self.visit_children(node, &inner, depth);
            }
            "method_declaration" => {
                let (Some(owner), Some(name)) = (
                    scope.owner.clone(),
                    node.child_by_field_name("name")
                        .map(|n| node_text(n, self.source)),
                ) else {
                    self.visit_children(node, scope, depth);
                    return;
                };
                let idx = self.declare(owner, name.clone(), node, DeclKind::Method);
                let mut variables = scope.variables.clone();
                collect_locals(node, self.source, &mut variables, 0);
                let inner = Scope {
                    owner: scope.owner.clone(),
                    enclosing_method: Some(name),
                    active: vec![idx],
                    variables,
                };
                self.visit_children(node, &inner, depth);
            }
            "constructor_declaration" | "compact_constructor_declaration" => {
                // Constructors are not vertices; their calls are not attributed.
                let inner = Scope {
                    owner: scope.owner.clone(),
                    enclosing_method: None,
                    active: Vec::new(),
                    variables: scope.variables.clone(),
                };
                self.visit_children(node, &inner, depth);
            }
            "lambda_expression" => {
                let Some(owner) = scope.owner.clone() else {
                    self.visit_children(node, scope, depth);
                    return;
                };
                let enclosing = scope
                    .enclosing_method
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_METHOD.to_string());
                let idx = self.declare(owner, enclosing, node, DeclKind::Lambda);
                let mut inner = scope.clone();
                inner.active.push(idx);
                self.visit_children(node, &inner, depth);
            }
            "object_creation_expression" => {
                let children = named_children(node);
                let body = children.iter().copied().find(|c| c.kind() == "class_body");
                for child in children {
                    if Some(child) != body {
                        self.visit(child, scope, depth + 1);
                    }
                }
                if let Some(body) = body {
                    self.visit_anonymous_body(body, scope, depth + 1);
                }
            }
            "method_invocation" => {
                if let Some(target) = invocation_target(node, self.source, &scope.variables) {
                    self.record(scope, target);
                }
                self.visit_children(node, scope, depth);
            }
            "method_reference" => {
                if let Some(target) = method_reference_target(node, self.source, &scope.variables) {
                    self.record(scope, target);
                }
            }
            _ => self.visit_children(node, scope, depth),
        }
    }

    fn visit_children(&mut self, node: Node<'_>, scope: &Scope, depth: usize) {
        for child in children(node) {
            self.visit(child, scope, depth + 1);
        }
    }

    fn visit_anonymous_body(&mut self, body: Node<'_>, scope: &Scope, depth: usize) {
        let ordinal = self.anonymous_bodies;
        self.anonymous_bodies += 1;

        for member in children(body) {
            let name = (member.kind() == "method_declaration")
                .then(|| member.child_by_field_name("name"))
                .flatten()
                .map(|n| node_text(n, self.source));
            match (scope.owner.clone(), name) {
                (Some(owner), Some(name)) => {
                    let idx = self.declare(
                        owner,
                        name.clone(),
                        member,
                        DeclKind::AnonymousMethod { body: ordinal },
                    );
                    let mut inner = scope.clone();
                    inner.enclosing_method = Some(name);
                    inner.active.push(idx);
                    collect_locals(member, self.source, &mut inner.variables, 0);
                    self.visit_children(member, &inner, depth);
                }
                _ => self.visit(member, scope, depth + 1),
            }
        }
    }

    /// Fields and record components of a type declaration. Members are
    /// collected before any method is visited, so declaration order does
    /// not matter.
    fn collect_members(&self, node: Node<'_>, variables: &mut FxHashMap<String, String>) {
        if let Some(parameters) = node.child_by_field_name("parameters") {
            collect_locals(parameters, self.source, variables, 0);
        }
        let Some(body) = node.child_by_field_name("body") else {
            return;
        };
        for member in named_children(body) {
            match member.kind() {
                "field_declaration" | "constant_declaration" => {
                    declare_variables(member, self.source, variables);
                }
                "enum_body_declarations" => {
                    for inner in named_children(member) {
                        if inner.kind() == "field_declaration" {
                            declare_variables(inner, self.source, variables);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn declare(&mut self, owner: String, method: String, node: Node<'_>, kind: DeclKind) -> usize {
        let annotations = match kind {
            DeclKind::Lambda => SmallVec2::new(),
            _ => annotations(node, self.source),
        };
        self.declarations.push(MethodDecl {
            owner_name: owner,
            method_name: method,
            start_line: node.start_position().row as u32 + 1,
            end_line: node.end_position().row as u32 + 1,
            kind,
            annotations,
            invocation_targets: Vec::new(),
        });
        self.declarations.len() - 1
    }

    fn record(&mut self, scope: &Scope, target: String) {
        for &idx in &scope.active {
            self.declarations[idx].invocation_targets.push(target.clone());
        }
    }
}

/// `name` or `receiver.name`. `this`/`super` receivers and receivers that
/// are themselves expressions reduce to the bare name.
fn invocation_target(
    node: Node<'_>,
    source: &[u8],
    variables: &FxHashMap<String, String>,
) -> Option<String> {
    let name = node_text(node.child_by_field_name("name")?, source);
    let receiver = node
        .child_by_field_name("object")
        .and_then(|object| receiver_name(object, source, variables));
    Some(qualify(receiver, name))
}

/// `Type::method` → `Type.method`. Constructor references are skipped.
fn method_reference_target(
    node: Node<'_>,
    source: &[u8],
    variables: &FxHashMap<String, String>,
) -> Option<String> {
    let parts = children(node);
    let last = parts.last()?;
    if last.kind() != "identifier" {
        return None;
    }
    let name = node_text(*last, source);
    let receiver = parts
        .first()
        .filter(|first| *first != last)
        .and_then(|first| receiver_name(*first, source, variables));
    Some(qualify(receiver, name))
}

fn receiver_name(
    object: Node<'_>,
    source: &[u8],
    variables: &FxHashMap<String, String>,
) -> Option<String> {
    let typed = |name: String| variables.get(&name).cloned().unwrap_or(name);
    match object.kind() {
        "identifier" => Some(typed(node_text(object, source))),
        "type_identifier" => Some(node_text(object, source)),
        "field_access" => {
            let field = node_text(object.child_by_field_name("field")?, source);
            let on_this = object
                .child_by_field_name("object")
                .is_some_and(|o| o.kind() == "this");
            Some(if on_this { typed(field) } else { field })
        }
        "scoped_identifier" | "scoped_type_identifier" => {
            let text = node_text(object, source);
            text.rsplit('.').next().map(str::to_string)
        }
        _ => None,
    }
}

fn qualify(receiver: Option<String>, name: String) -> String {
    match receiver {
        Some(receiver) => format!("{receiver}.{name}"),
        None => name,
    }
}

/// Parameters, locals, enhanced-for variables and typed lambda parameters
/// anywhere under `node`. Block scoping is not tracked; a later
/// declaration of the same name wins.
fn collect_locals(
    node: Node<'_>,
    source: &[u8],
    variables: &mut FxHashMap<String, String>,
    depth: usize,
) {
    if depth > MAX_NESTING {
        return;
    }
    match node.kind() {
        "local_variable_declaration" => declare_variables(node, source, variables),
        "formal_parameter" | "enhanced_for_statement" | "resource" => {
            if let (Some(ty), Some(name)) = (
                node.child_by_field_name("type").and_then(|t| type_name(t, source)),
                node.child_by_field_name("name"),
            ) {
                variables.insert(node_text(name, source), ty);
            }
        }
        // Members of nested and anonymous types are not locals.
        "class_body" => return,
        _ => {}
    }
    for child in named_children(node) {
        collect_locals(child, source, variables, depth + 1);
    }
}

/// `Type a = ..., b;` in a field or local declaration.
fn declare_variables(node: Node<'_>, source: &[u8], variables: &mut FxHashMap<String, String>) {
    let Some(ty) = node
        .child_by_field_name("type")
        .and_then(|t| type_name(t, source))
    else {
        return;
    };
    for declarator in named_children(node) {
        if declarator.kind() != "variable_declarator" {
            continue;
        }
        if let Some(name) = declarator.child_by_field_name("name") {
            variables.insert(node_text(name, source), ty.clone());
        }
    }
}

/// Simple name of a reference type with generics erased. Primitives,
/// arrays and `var` have no usable owner.
fn type_name(node: Node<'_>, source: &[u8]) -> Option<String> {
    match node.kind() {
        "type_identifier" => {
            let text = node_text(node, source);
            (text != "var").then_some(text)
        }
        "scoped_type_identifier" => {
            let text = node_text(node, source);
            text.rsplit('.').next().map(str::to_string)
        }
        "generic_type" => named_children(node)
            .into_iter()
            .find(|c| matches!(c.kind(), "type_identifier" | "scoped_type_identifier"))
            .and_then(|c| type_name(c, source)),
        _ => None,
    }
}

fn annotations(node: Node<'_>, source: &[u8]) -> SmallVec2<String> {
    let mut found = SmallVec2::new();
    for child in children(node) {
        if child.kind() != "modifiers" {
            continue;
        }
        for modifier in children(child) {
            if matches!(modifier.kind(), "marker_annotation" | "annotation") {
                if let Some(name) = modifier.child_by_field_name("name") {
                    found.push(node_text(name, source));
                }
            }
        }
    }
    found
}

fn count_errors(node: Node<'_>) -> u32 {
    let own = u32::from(node.is_error() || node.is_missing());
    own + children(node).into_iter().map(count_errors).sum::<u32>()
}

fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn node_text(node: Node<'_>, source: &[u8]) -> String {
    node.utf8_text(source).unwrap_or("").to_string()
}
