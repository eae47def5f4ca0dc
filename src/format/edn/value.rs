// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::mem;

use smol_str::SmolStr;

/// A keyword or symbol name with an optional namespace (`ns/name`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    namespace: Option<SmolStr>,
    name: SmolStr,
}

impl QualifiedName {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self { namespace: None, name: name.into() }
    }

    pub fn with_namespace(namespace: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        Self { namespace: Some(namespace.into()), name: name.into() }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{namespace}/{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Numeric literal. Integers and floats never compare equal to each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// A generic notation value.
///
/// Sets and maps keep insertion order, but equality ignores it: two sets are
/// equal when they hold the same members with the same multiplicity, two maps
/// when they hold the same entries. Floats compare by value except that `NaN`
/// equals itself, so equality is reflexive.
///
/// Equality, dropping and writing walk the tree with explicit work lists, so
/// nesting depth is bounded by memory, not by the call stack.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(Number),
    Str(String),
    Keyword(QualifiedName),
    Symbol(QualifiedName),
    List(Vec<Value>),
    Vector(Vec<Value>),
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl Value {
    pub fn keyword(name: &str) -> Self {
        Self::Keyword(split_qualified(name))
    }

    pub fn symbol(name: &str) -> Self {
        Self::Symbol(split_qualified(name))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    pub fn int(value: i64) -> Self {
        Self::Number(Number::Int(value))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_keyword(&self) -> Option<&QualifiedName> {
        match self {
            Self::Keyword(name) => Some(name),
            _ => None,
        }
    }

    /// Keyword or symbol name, regardless of which marker was used.
    pub fn as_qualified_name(&self) -> Option<&QualifiedName> {
        match self {
            Self::Keyword(name) | Self::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Elements of a list, vector or set.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) | Self::Vector(items) | Self::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a map entry by structural key equality.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.as_map()?.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Keyword(_) => "keyword",
            Self::Symbol(_) => "symbol",
            Self::List(_) => "list",
            Self::Vector(_) => "vector",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
        }
    }
}

fn split_qualified(text: &str) -> QualifiedName {
    match text.split_once('/') {
        Some((namespace, name)) if !namespace.is_empty() && !name.is_empty() => {
            QualifiedName::with_namespace(namespace, name)
        }
        _ => QualifiedName::new(text),
    }
}

impl Value {
    fn children_len(&self) -> usize {
        match self {
            Self::List(items) | Self::Vector(items) | Self::Set(items) => items.len(),
            Self::Map(entries) => entries.len() * 2,
            _ => 0,
        }
    }

    /// Pushes the children so that popping yields them in source order
    /// (for maps: key, value, key, value, ...).
    fn push_children_rev<'a>(&'a self, stack: &mut Vec<(&'a Value, bool)>) {
        match self {
            Self::List(items) | Self::Vector(items) | Self::Set(items) => {
                stack.extend(items.iter().rev().map(|item| (item, false)));
            }
            Self::Map(entries) => {
                for (key, value) in entries.iter().rev() {
                    stack.push((value, false));
                    stack.push((key, false));
                }
            }
            _ => {}
        }
    }

    fn leaf_shape(&self) -> Option<Shape<'_>> {
        Some(match self {
            Self::Nil => Shape::Nil,
            Self::Bool(value) => Shape::Bool(*value),
            Self::Number(Number::Int(value)) => Shape::Int(*value),
            Self::Number(Number::Float(value)) => Shape::Float(float_key(*value)),
            Self::Str(value) => Shape::Str(value),
            Self::Keyword(name) => Shape::Keyword(name),
            Self::Symbol(name) => Shape::Symbol(name),
            Self::List(_) | Self::Vector(_) | Self::Set(_) | Self::Map(_) => return None,
        })
    }
}

/// `-0.0` folds into `0.0` and every `NaN` into one bit pattern.
fn float_key(value: f64) -> u64 {
    if value == 0.0 {
        0
    } else if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

/// One node with its children already reduced to interned ids. Unordered
/// collections sort their ids, which makes member order irrelevant.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Shape<'a> {
    Nil,
    Bool(bool),
    Int(i64),
    Float(u64),
    Str(&'a str),
    Keyword(&'a QualifiedName),
    Symbol(&'a QualifiedName),
    List(Vec<usize>),
    Vector(Vec<usize>),
    Set(Vec<usize>),
    Map(Vec<(usize, usize)>),
}

/// Assigns equal ids to structurally-equal subtrees.
#[derive(Default)]
struct Interner<'a> {
    ids: BTreeMap<Shape<'a>, usize>,
}

impl<'a> Interner<'a> {
    fn id(&mut self, shape: Shape<'a>) -> usize {
        let next = self.ids.len();
        *self.ids.entry(shape).or_insert(next)
    }

    /// Post-order walk of `root`.
    fn intern(&mut self, root: &'a Value) -> usize {
        let mut stack = vec![(root, false)];
        let mut done = Vec::<usize>::new();
        while let Some((value, expanded)) = stack.pop() {
            let arity = value.children_len();
            if !expanded && arity > 0 {
                stack.push((value, true));
                value.push_children_rev(&mut stack);
                continue;
            }

            let children = done.split_off(done.len() - arity);
            let shape = match value {
                Value::List(_) => Shape::List(children),
                Value::Vector(_) => Shape::Vector(children),
                Value::Set(_) => {
                    let mut members = children;
                    members.sort_unstable();
                    Shape::Set(members)
                }
                Value::Map(_) => {
                    let mut entries = children
                        .chunks_exact(2)
                        .map(|pair| (pair[0], pair[1]))
                        .collect::<Vec<_>>();
                    entries.sort_unstable();
                    Shape::Map(entries)
                }
                leaf => match leaf.leaf_shape() {
                    Some(shape) => shape,
                    None => continue,
                },
            };
            done.push(self.id(shape));
        }
        done.pop().unwrap_or_default()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self.leaf_shape(), other.leaf_shape()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => {
                if mem::discriminant(self) != mem::discriminant(other)
                    || self.children_len() != other.children_len()
                {
                    return false;
                }
                let mut interner = Interner::default();
                interner.intern(self) == interner.intern(other)
            }
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = Vec::<Value>::new();
        take_children(self, &mut pending);
        while let Some(mut value) = pending.pop() {
            // Children are moved out first, so dropping `value` never recurses.
            take_children(&mut value, &mut pending);
        }
    }
}

fn take_children(value: &mut Value, pending: &mut Vec<Value>) {
    match value {
        Value::List(items) | Value::Vector(items) | Value::Set(items) => {
            pending.append(items);
        }
        Value::Map(entries) => {
            for (key, item) in mem::take(entries) {
                pending.push(key);
                pending.push(item);
            }
        }
        _ => {}
    }
}

/// Notation text for diagnostics. Unlike [`super::write_value`] this never
/// fails: names and floats the notation cannot express are written as-is.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::writer::write_lossy(self))
    }
}
