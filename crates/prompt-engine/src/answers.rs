use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A single node in the answer tree.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerNode {
    /// Leaf answer value.
    Value(Value),
    /// Intermediate mapping keyed by path segment.
    Group(BTreeMap<String, AnswerNode>),
}

impl AnswerNode {
    /// Builds a node from JSON, turning every object into a group.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => AnswerNode::Group(
                map.into_iter()
                    .map(|(key, value)| (key, AnswerNode::from_value(value)))
                    .collect(),
            ),
            other => AnswerNode::Value(other),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            AnswerNode::Value(value) => value.clone(),
            AnswerNode::Group(children) => Value::Object(
                children
                    .iter()
                    .map(|(key, node)| (key.clone(), node.to_value()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }

    fn as_group(&self) -> Option<&BTreeMap<String, AnswerNode>> {
        match self {
            AnswerNode::Group(children) => Some(children),
            AnswerNode::Value(_) => None,
        }
    }

    fn as_group_mut(&mut self) -> Option<&mut BTreeMap<String, AnswerNode>> {
        match self {
            AnswerNode::Group(children) => Some(children),
            AnswerNode::Value(_) => None,
        }
    }
}

/// Nested answer tree addressed by dot-separated paths (`features.vuex`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerStore {
    root: BTreeMap<String, AnswerNode>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a JSON object. Non-object input yields an empty store.
    pub fn from_value(value: Value) -> Self {
        match AnswerNode::from_value(value) {
            AnswerNode::Group(root) => Self { root },
            AnswerNode::Value(_) => Self::default(),
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            self.root
                .iter()
                .map(|(key, node)| (key.clone(), node.to_value()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Returns the answer stored at `path`, or `None` when any segment is absent.
    pub fn get(&self, path: &str) -> Option<Value> {
        self.node(path).map(AnswerNode::to_value)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.node(path).is_some()
    }

    /// Borrows the node stored at `path`.
    pub fn node(&self, path: &str) -> Option<&AnswerNode> {
        let (parents, leaf) = split_path(path);
        let mut current = &self.root;
        for segment in parents {
            current = current.get(segment)?.as_group()?;
        }
        current.get(leaf)
    }

    /// Stores `value` at `path`, creating intermediate groups on the way.
    ///
    /// An intermediate segment that currently holds a plain value is replaced
    /// by an empty group.
    pub fn set(&mut self, path: &str, value: Value) {
        let (parents, leaf) = split_path(path);
        let mut current = &mut self.root;
        for segment in parents {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| AnswerNode::Group(BTreeMap::new()));
            if entry.as_group().is_none() {
                *entry = AnswerNode::Group(BTreeMap::new());
            }
            current = match entry.as_group_mut() {
                Some(children) => children,
                None => return,
            };
        }
        current.insert(leaf.to_string(), AnswerNode::from_value(value));
    }

    /// Removes the answer at `path` and prunes every ancestor group on that
    /// path left without keys, even when the leaf itself was already absent.
    /// No-op when an intermediate segment is absent.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let segments: Vec<&str> = path.split('.').collect();
        remove_in(&mut self.root, &segments).map(|node| node.to_value())
    }

    /// Wholesale replacement of the tree.
    pub fn replace(&mut self, other: AnswerStore) {
        self.root = other.root;
    }

    pub fn clear(&mut self) {
        self.root.clear();
    }

    /// Encodes the answer tree as CBOR.
    pub fn to_cbor(&self) -> Result<Vec<u8>, serde_cbor::Error> {
        serde_cbor::to_vec(&self.to_value())
    }
}

fn split_path(path: &str) -> (impl Iterator<Item = &str>, &str) {
    let (parents, leaf) = match path.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, path),
    };
    (parents.into_iter().flat_map(|p| p.split('.')), leaf)
}

fn remove_in(group: &mut BTreeMap<String, AnswerNode>, segments: &[&str]) -> Option<AnswerNode> {
    match segments {
        [] => None,
        [leaf] => group.remove(*leaf),
        [head, rest @ ..] => {
            let child = group.get_mut(*head)?.as_group_mut()?;
            let removed = remove_in(child, rest);
            if child.is_empty() {
                group.remove(*head);
            }
            removed
        }
    }
}

impl From<Value> for AnswerStore {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl Serialize for AnswerStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AnswerStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Object(_) => Ok(Self::from_value(value)),
            other => Err(serde::de::Error::custom(format!(
                "answers must be a JSON object, got {other}"
            ))),
        }
    }
}
