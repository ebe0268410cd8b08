/*
 * context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template value and scope types.
//!
//! [`TemplateValue`] is the data a template is rendered against. [`Scope`] is
//! one link in the chain of scopes built while rendering: each section opens a
//! child scope whose parent is the enclosing one, and lookups that fail in a
//! child fall through to its parents.

use std::borrow::Cow;
use std::collections::HashMap;

/// A value that can be used in template evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateValue {
    /// A null/missing value.
    Null,

    /// A boolean value.
    Bool(bool),

    /// A numeric value.
    Number(f64),

    /// A string value.
    String(String),

    /// A list of values.
    List(Vec<TemplateValue>),

    /// A map of string keys to values.
    Map(HashMap<String, TemplateValue>),
}

impl TemplateValue {
    /// Parse a JSON document into a template value.
    pub fn from_json_str(json: &str) -> crate::error::TemplateResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Ok(value.into())
    }

    /// Check if this value is "truthy" for section evaluation.
    ///
    /// Falsy values are `Null`, `false`, `0`, `NaN`, the empty string and the
    /// empty list. Every map is truthy, including an empty one.
    pub fn is_truthy(&self) -> bool {
        match self {
            TemplateValue::Null => false,
            TemplateValue::Bool(b) => *b,
            TemplateValue::Number(n) => *n != 0.0 && !n.is_nan(),
            TemplateValue::String(s) => !s.is_empty(),
            TemplateValue::List(items) => !items.is_empty(),
            TemplateValue::Map(_) => true,
        }
    }

    /// Look up a single key.
    ///
    /// Maps are indexed by key, lists by a decimal position (`items.0`).
    pub fn get(&self, key: &str) -> Option<&TemplateValue> {
        match self {
            TemplateValue::Map(m) => m.get(key),
            TemplateValue::List(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Get a nested field by path.
    ///
    /// For example, `get_path(&["apply", "deadline"])` on a Map containing
    /// `{"apply": {"deadline": "30/06"}}` returns the deadline value.
    pub fn get_path(&self, path: &[&str]) -> Option<&TemplateValue> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => self.get(first).and_then(|v| v.get_path(rest)),
        }
    }

    /// Render this value as a string for output.
    ///
    /// - Null: ""
    /// - Bool: "true" or "false"
    /// - Number: integral values without a fraction ("3"), others in
    ///   shortest form ("2.5")
    /// - String: returned as-is
    /// - List: rendered elements joined with ","
    /// - Map: "[object Object]"
    pub fn render(&self) -> String {
        match self {
            TemplateValue::Null => String::new(),
            TemplateValue::Bool(b) => b.to_string(),
            TemplateValue::Number(n) => format_number(*n),
            TemplateValue::String(s) => s.clone(),
            TemplateValue::List(items) => items
                .iter()
                .map(TemplateValue::render)
                .collect::<Vec<_>>()
                .join(","),
            TemplateValue::Map(_) => "[object Object]".to_string(),
        }
    }
}

/// Number to text the way JavaScript's `String(n)` does it.
///
/// Magnitudes from `1e-6` up to (not including) `1e21` print in plain
/// decimal; anything outside that range uses exponent form (`1e+21`, `1e-7`).
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        // Also covers -0.0
        "0".to_string()
    } else if !(1e-6..1e21).contains(&n.abs()) {
        let formatted = format!("{:e}", n);
        match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => formatted,
        }
    } else if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

impl Default for TemplateValue {
    fn default() -> Self {
        TemplateValue::Null
    }
}

impl From<serde_json::Value> for TemplateValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => TemplateValue::Null,
            serde_json::Value::Bool(b) => TemplateValue::Bool(b),
            serde_json::Value::Number(n) => TemplateValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => TemplateValue::String(s),
            serde_json::Value::Array(items) => {
                TemplateValue::List(items.into_iter().map(TemplateValue::from).collect())
            }
            serde_json::Value::Object(map) => TemplateValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, TemplateValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for TemplateValue {
    fn from(s: &str) -> Self {
        TemplateValue::String(s.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(s: String) -> Self {
        TemplateValue::String(s)
    }
}

impl From<bool> for TemplateValue {
    fn from(b: bool) -> Self {
        TemplateValue::Bool(b)
    }
}

impl From<f64> for TemplateValue {
    fn from(n: f64) -> Self {
        TemplateValue::Number(n)
    }
}

impl From<i64> for TemplateValue {
    fn from(n: i64) -> Self {
        TemplateValue::Number(n as f64)
    }
}

impl<T: Into<TemplateValue>> From<Vec<T>> for TemplateValue {
    fn from(items: Vec<T>) -> Self {
        TemplateValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// One link in the scope chain.
///
/// The root scope is bound to the data passed to the renderer. Sections open
/// child scopes bound to the resolved section value; iterating a list opens
/// one child per element, carrying the element's position as `@index`.
/// Scopes are only ever borrowed, so the chain is acyclic and never mutated.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    data: &'a TemplateValue,
    parent: Option<&'a Scope<'a>>,
    index: Option<usize>,
}

impl<'a> Scope<'a> {
    /// Create the root scope for a render.
    pub fn root(data: &'a TemplateValue) -> Self {
        Self {
            data,
            parent: None,
            index: None,
        }
    }

    /// Create a child scope bound to `data`.
    pub fn child(&'a self, data: &'a TemplateValue) -> Scope<'a> {
        Scope {
            data,
            parent: Some(self),
            index: None,
        }
    }

    /// Create a child scope for the list element at `index`.
    pub fn item(&'a self, data: &'a TemplateValue, index: usize) -> Scope<'a> {
        Scope {
            data,
            parent: Some(self),
            index: Some(index),
        }
    }

    /// The value bound at this scope.
    pub fn data(&self) -> &'a TemplateValue {
        self.data
    }

    /// The enclosing scope, if any.
    pub fn parent(&self) -> Option<&'a Scope<'a>> {
        self.parent
    }

    /// The iteration index of this scope, if it is a list element scope.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Resolve a path against this scope.
    ///
    /// Supported forms:
    /// - `""`, `this`, `.`: the data bound at this scope
    /// - `@index`: the iteration index (0 outside of list iteration)
    /// - `../rest`: resolve `rest` starting at the parent scope
    /// - `a.b.c`: keyed lookups; a `..` segment (`a/../b`) moves to the parent
    ///   scope and `this`/`.` segments are no-ops
    ///
    /// When the path is absent here, resolution is retried from the parent
    /// scope, all the way up the chain. An explicit `Null` is a value and does
    /// not fall through.
    pub fn resolve(&'a self, path: &str) -> Option<Cow<'a, TemplateValue>> {
        self.resolve_local(path)
            .or_else(|| self.parent.and_then(|parent| parent.resolve(path)))
    }

    /// Resolve a path at this scope only, without the parent fallback.
    fn resolve_local(&'a self, path: &str) -> Option<Cow<'a, TemplateValue>> {
        match path {
            "" | "this" | "." => return Some(Cow::Borrowed(self.data)),
            "@index" => {
                let index = self.index.unwrap_or(0) as f64;
                return Some(Cow::Owned(TemplateValue::Number(index)));
            }
            _ => {}
        }

        if let Some(rest) = path.strip_prefix("../") {
            return self.parent.and_then(|parent| parent.resolve(rest));
        }

        let mut scope: &'a Scope<'a> = self;
        let mut value = self.data;
        for segment in path_segments(path) {
            match segment {
                ".." => {
                    scope = scope.parent?;
                    value = scope.data;
                }
                "this" | "." => {}
                key => value = value.get(key)?,
            }
        }
        Some(Cow::Borrowed(value))
    }
}

/// Split a path into lookup segments.
///
/// Segments are separated by `.`. A `/` only separates the parent (`..`) and
/// current (`.`) markers from their neighbours (`a/../b`); anywhere else it is
/// part of the key, so `{{a/b}}` reads the key `"a/b"`.
fn path_segments(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    // Start of the pending run of key text, which may itself contain `/`
    let mut run: Option<(usize, usize)> = None;
    let mut offset = 0;

    for piece in path.split('/') {
        let start = offset;
        let end = start + piece.len();
        offset = end + 1;

        if piece == ".." || piece == "." {
            if let Some((run_start, run_end)) = run.take() {
                segments.extend(path[run_start..run_end].split('.'));
            }
            segments.push(piece);
        } else {
            run = Some(match run {
                Some((run_start, _)) => (run_start, end),
                None => (start, end),
            });
        }
    }
    if let Some((run_start, run_end)) = run {
        segments.extend(path[run_start..run_end].split('.'));
    }
    segments
}
