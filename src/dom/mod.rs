// SPDX-License-Identifier: MPL-2.0
//! In-memory document tree standing in for the hosting page.
//!
//! The renderer and event binder only need a small slice of what a browser
//! DOM offers: id lookup, attribute queries, class toggles, text replacement,
//! clearing and appending children, and the layout box of an element (for the
//! scroll-spy). This module provides exactly that over an arena of nodes.
//!
//! Node ids are generational indices into the arena. Removing a subtree (via
//! [`Document::clear_children`]) recycles its slots; ids of removed nodes go
//! stale and every operation on a stale id is a no-op.
//!
//! Markup enters through [`parse`] and leaves through [`html`].

pub mod html;
pub mod parse;

pub use parse::parse;

/// Handle to a node of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// Vertical layout box of an element, in page units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutBox {
    pub top: f32,
    pub height: f32,
}

impl LayoutBox {
    #[must_use]
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Whether `y` falls inside `[top, bottom)`.
    #[must_use]
    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// An element: tag name plus ordered attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => {
                existing.clear();
                existing.push_str(value);
            }
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    layout: LayoutBox,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            layout: LayoutBox::default(),
        }
    }
}

/// An arena slot. `generation` is bumped every time the slot is freed, so
/// handles to a removed node stop matching it.
#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// The page: a tree of elements and text rooted at `<html>`.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding only an empty `<html>` root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node::new(NodeKind::Element(Element::new("html")))),
            }],
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Whether `id` still names a node of this document.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let node = Some(Node::new(kind));
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = node;
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                node,
            });
            NodeId {
                index: self.slots.len() - 1,
                generation: 0,
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Vec<NodeId> {
        let Some(slot) = self
            .slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
        else {
            return Vec::new();
        };
        let children = slot.node.take().map(|node| node.children).unwrap_or_default();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        children
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeKind::Element(Element::new(tag)))
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(text.to_string()))
    }

    /// Appends a detached node as the last child of `parent`. Stale handles
    /// are ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) {
            return;
        }
        if let Some(old_parent) = self.parent(child) {
            if let Some(node) = self.node_mut(old_parent) {
                node.children.retain(|c| *c != child);
            }
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    /// Creates an element with a class list and appends it to `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str, class: &str) -> NodeId {
        let id = self.create_element(tag);
        if !class.is_empty() {
            self.set_attribute(id, "class", class);
        }
        self.append_child(parent, id);
        id
    }

    /// Removes every child of `id`. Handles into the removed subtrees go
    /// stale; operations on them do nothing.
    pub fn clear_children(&mut self, id: NodeId) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        let mut pending = std::mem::take(&mut node.children);
        while let Some(child) = pending.pop() {
            pending.extend(self.release(child));
        }
    }

    /// Replaces all children of `id` with a single text node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if !self.contains(id) {
            return;
        }
        self.clear_children(id);
        let text_node = self.create_text(text);
        self.append_child(id, text_node);
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element(_) => {
                for child in &node.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|node| &node.kind)
    }

    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.kind(id)? {
            NodeKind::Element(element) => Some(element),
            NodeKind::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Element(element) => Some(element),
            NodeKind::Text(_) => None,
        }
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Child nodes of `id` that are elements.
    #[must_use]
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.element(*c).is_some())
            .collect()
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(Element::tag)
    }

    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attribute(name))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(id) {
            element.set_attribute(name, value);
        }
    }

    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    /// Adds or removes `class`. With `force` unset the class is flipped.
    /// Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, id: NodeId, class: &str, force: Option<bool>) -> bool {
        if self.element(id).is_none() {
            return false;
        }
        let present = self.has_class(id, class);
        let wanted = force.unwrap_or(!present);
        if wanted != present {
            let current = self.attribute(id, "class").unwrap_or_default();
            let mut list: Vec<&str> = current
                .split_ascii_whitespace()
                .filter(|c| *c != class)
                .collect();
            if wanted {
                list.push(class);
            }
            let joined = list.join(" ");
            self.set_attribute(id, "class", &joined);
        }
        wanted
    }

    #[must_use]
    pub fn layout(&self, id: NodeId) -> LayoutBox {
        self.node(id).map(|node| node.layout).unwrap_or_default()
    }

    /// Records the layout box a host computed for `id`.
    pub fn set_layout(&mut self, id: NodeId, layout: LayoutBox) {
        if let Some(node) = self.node_mut(id) {
            node.layout = layout;
        }
    }

    /// Element descendants of `scope` in document order, `scope` included.
    fn elements_under(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![scope];
        while let Some(id) = stack.pop() {
            if self.element(id).is_none() {
                continue;
            }
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// All elements under `scope` satisfying `pred`, in document order.
    pub fn find_all(&self, scope: NodeId, pred: impl Fn(&Element) -> bool) -> Vec<NodeId> {
        self.elements_under(scope)
            .into_iter()
            .filter(|id| self.element(*id).is_some_and(&pred))
            .collect()
    }

    /// First element in the document satisfying `pred`.
    pub fn find_first(&self, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        self.elements_under(self.root)
            .into_iter()
            .find(|id| self.element(*id).is_some_and(&pred))
    }

    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_first(|e| e.attribute("id") == Some(id))
    }

    #[must_use]
    pub fn first_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.find_first(|e| e.tag() == tag)
    }

    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.first_by_tag("body")
    }

    #[must_use]
    pub fn title(&self) -> String {
        self.first_by_tag("title")
            .map(|id| self.text_content(id))
            .unwrap_or_default()
    }

    /// Sets the document title, creating `<title>` in `<head>` when needed.
    pub fn set_title(&mut self, title: &str) {
        if let Some(id) = self.first_by_tag("title") {
            self.set_text_content(id, title);
        } else if let Some(head) = self.first_by_tag("head") {
            let id = self.append_element(head, "title", "");
            self.set_text_content(id, title);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let body = doc.append_element(root, "body", "");
        let list = doc.append_element(body, "ul", "list");
        doc.set_attribute(list, "id", "items");
        for text in ["a", "b"] {
            let li = doc.append_element(list, "li", "");
            doc.set_text_content(li, text);
        }
        (doc, list)
    }

    #[test]
    fn element_by_id_finds_nested_element() {
        let (doc, list) = sample();
        assert_eq!(doc.element_by_id("items"), Some(list));
        assert_eq!(doc.element_by_id("missing"), None);
    }

    #[test]
    fn clear_children_recycles_slots() {
        let (mut doc, list) = sample();
        let before = doc.slots.len();
        doc.clear_children(list);
        assert!(doc.children(list).is_empty());

        for text in ["c", "d"] {
            let li = doc.append_element(list, "li", "");
            doc.set_text_content(li, text);
        }
        assert_eq!(doc.slots.len(), before);
        assert_eq!(doc.text_content(list), "cd");
    }

    #[test]
    fn removed_handles_go_stale() {
        let (mut doc, list) = sample();
        let first = doc.children(list)[0];
        doc.clear_children(list);
        assert!(!doc.contains(first));

        let li = doc.append_element(list, "li", "");
        doc.set_text_content(li, "fresh");

        // Writes through the old handle land nowhere, even once its slot is reused.
        doc.set_text_content(first, "stale");
        doc.set_attribute(first, "class", "stale");
        assert!(!doc.toggle_class(first, "x", Some(true)));
        assert_eq!(doc.text_content(list), "fresh");
        assert_eq!(doc.attribute(li, "class"), None);
        assert_eq!(doc.tag(first), None);
    }

    #[test]
    fn toggle_class_flips_and_forces() {
        let (mut doc, list) = sample();
        assert!(doc.has_class(list, "list"));
        assert!(doc.toggle_class(list, "open", None));
        assert_eq!(doc.attribute(list, "class"), Some("list open"));
        assert!(!doc.toggle_class(list, "open", None));
        assert!(!doc.has_class(list, "open"));
        assert!(!doc.toggle_class(list, "list", Some(false)));
        assert_eq!(doc.attribute(list, "class"), Some(""));
    }

    #[test]
    fn set_text_content_replaces_children() {
        let (mut doc, list) = sample();
        doc.set_text_content(list, "plain");
        assert_eq!(doc.children(list).len(), 1);
        assert_eq!(doc.text_content(list), "plain");
    }

    #[test]
    fn set_title_creates_title_in_head() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.append_element(root, "head", "");
        doc.set_title("Portfolio");
        assert_eq!(doc.title(), "Portfolio");
        doc.set_title("Again");
        assert_eq!(doc.title(), "Again");
        assert_eq!(doc.find_all(root, |e| e.tag() == "title").len(), 1);
    }

    #[test]
    fn layout_box_contains_is_half_open() {
        let layout = LayoutBox::new(100.0, 50.0);
        assert!(layout.contains(100.0));
        assert!(layout.contains(149.9));
        assert!(!layout.contains(150.0));
        assert!(!layout.contains(99.0));
    }
}
