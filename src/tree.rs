use std::collections::{BTreeMap, btree_map};

/// Separator between the segments of a parameter path.
pub const PATH_SEPARATOR: char = '/';

/// One node of the parameter tree.
///
/// A node without children is a leaf and carries the value assigned to its
/// path. A node with children stands for a nested structure. Both may be set
/// at once when the input assigns a path as well as paths below it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub(crate) value: Option<String>,
    pub(crate) children: BTreeMap<String, Node>,
}

impl Node {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// A leaf holding `value`.
    pub fn leaf(value: impl Into<String>) -> Self {
        Node {
            value: Some(value.into()),
            children: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) the child `key`.
    pub fn with_child(mut self, key: impl Into<String>, child: Node) -> Self {
        self.children.insert(key.into(), child);
        self
    }

    /// The value assigned to exactly this path, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Child nodes by path segment.
    pub fn children(&self) -> btree_map::Iter<'_, String, Node> {
        self.children.iter()
    }

    /// Looks up the node at `path`, relative to this one.
    pub fn get(&self, path: &str) -> Option<&Node> {
        path.split(PATH_SEPARATOR)
            .try_fold(self, |node, segment| node.children.get(segment))
    }

    /// A leaf has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of segments in the longest path below this node.
    pub fn depth(&self) -> usize {
        self.children
            .values()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Assigns `value` to `path`, creating intermediate nodes as needed.
    ///
    /// Assigning the same path twice keeps the last value.
    pub fn insert(&mut self, path: &str, value: impl Into<String>) {
        let node = path
            .split(PATH_SEPARATOR)
            .fold(self, |node, segment| {
                node.children.entry(segment.to_owned()).or_default()
            });
        node.value = Some(value.into());
    }

    /// Folds `other` into this tree. Where both assign the same path, the
    /// value from `other` wins.
    pub fn merge(&mut self, other: Node) {
        if other.value.is_some() {
            self.value = other.value;
        }
        for (key, child) in other.children {
            match self.children.entry(key) {
                btree_map::Entry::Occupied(mut existing) => existing.get_mut().merge(child),
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(child);
                }
            }
        }
    }

    /// Whether the discarded-self-value diagnostic applies to this node.
    pub(crate) fn has_self_value(&self) -> bool {
        self.value.as_deref().is_some_and(|value| !value.is_empty())
    }
}

impl<K: AsRef<str>, V: Into<String>> Extend<(K, V)> for Node {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, params: I) {
        for (path, value) in params {
            self.insert(path.as_ref(), value);
        }
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(params: I) -> Self {
        let mut tree = Node::new();
        tree.extend(params);
        tree
    }
}
