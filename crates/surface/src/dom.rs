//! Minimal DOM for content-editable regions.
//!
//! Just enough tree to host a rich-text editing surface: elements with
//! attributes and children, text nodes, and range surgery (clone, delete,
//! insert at a point). Positions follow DOM conventions — a byte offset when
//! the container is a text node, a child index when it is an element.

use crate::text::clamp_to_char_boundary;

/// Identifier of a node within one [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

#[derive(Clone, Debug)]
pub enum Node {
    Element {
        id: NodeId,
        name: String,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<Node>,
    },
    Text {
        id: NodeId,
        text: String,
    },
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Node::Element { id, .. } => *id,
            Node::Text { id, .. } => *id,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text { text, .. } => Some(text),
            Node::Element { .. } => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            Node::Text { .. } => &[],
        }
    }

    /// Attribute lookup by case-insensitive name. `Some(None)` means the
    /// attribute is present without a value.
    pub fn attr(&self, name: &str) -> Option<Option<&str>> {
        let Node::Element { attributes, .. } = self else {
            return None;
        };
        attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_deref())
    }
}

/// A point in the tree.
///
/// `offset` is a byte offset into the text when `node` is a text node, and a
/// child index when `node` is an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub node: NodeId,
    pub offset: usize,
}

impl Position {
    pub const fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A selection range between two positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomRange {
    pub start: Position,
    pub end: Position,
}

impl DomRange {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A collapsed range (caret).
    pub const fn caret(at: Position) -> Self {
        Self { start: at, end: at }
    }

    pub fn collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Supported range shapes for tree surgery. Anything else is treated as a
/// DOM-state inconsistency by callers.
enum RangeShape {
    /// Both endpoints in the same text node (byte offsets, ordered).
    SameText {
        node: NodeId,
        start: usize,
        end: usize,
    },
    /// Both endpoints in the same element (child indices, ordered).
    SameElement {
        node: NodeId,
        start: usize,
        end: usize,
    },
    /// Endpoints in two text nodes sharing a parent.
    SiblingTexts {
        parent: NodeId,
        start_idx: usize,
        start_off: usize,
        end_idx: usize,
        end_off: usize,
    },
}

/// A node tree with id allocation.
pub struct Document {
    root: Node,
    next_id: u32,
}

impl Document {
    /// Create a document whose root is an empty element.
    pub fn new(root_name: &str) -> Self {
        Self {
            root: Node::Element {
                id: NodeId(0),
                name: root_name.to_string(),
                attributes: Vec::new(),
                children: Vec::new(),
            },
            next_id: 1,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_id(&self) -> NodeId {
        self.root.id()
    }

    fn alloc_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create a detached text node.
    pub fn new_text(&mut self, text: &str) -> Node {
        Node::Text {
            id: self.alloc_id(),
            text: text.to_string(),
        }
    }

    /// Append a new element under `parent`, returning its id.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        name: &str,
        attributes: &[(&str, Option<&str>)],
    ) -> Option<NodeId> {
        let node = Node::Element {
            id: self.alloc_id(),
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(n, v)| (n.to_string(), v.map(str::to_string)))
                .collect(),
            children: Vec::new(),
        };
        let id = node.id();
        self.append_node(parent, node)?;
        Some(id)
    }

    /// Append a new text node under `parent`, returning its id.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Option<NodeId> {
        let node = self.new_text(text);
        let id = node.id();
        self.append_node(parent, node)?;
        Some(id)
    }

    fn append_node(&mut self, parent: NodeId, node: Node) -> Option<()> {
        match self.find_mut(parent)? {
            Node::Element { children, .. } => {
                children.push(node);
                Some(())
            }
            Node::Text { .. } => None,
        }
    }

    pub fn find(&self, id: NodeId) -> Option<&Node> {
        find_in(&self.root, id)
    }

    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        find_in_mut(&mut self.root, id)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        parent_in(&self.root, id)
    }

    /// Ancestor-or-self containment.
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.find(ancestor)
            .is_some_and(|node| find_in(node, id).is_some())
    }

    pub fn child_index(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.find(parent)?
            .children()
            .iter()
            .position(|n| n.id() == child)
    }

    /// Text of a text node, `None` for elements.
    pub fn text_of(&self, id: NodeId) -> Option<&str> {
        self.find(id)?.as_text()
    }

    /// Concatenated text content of a subtree.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(node) = self.find(id) {
            collect_text(node, &mut out);
        }
        out
    }

    /// Resolve the content-editable root for an event target: the target
    /// itself when editable, else the nearest editable ancestor. An explicit
    /// `contenteditable="false"` on the way up is a non-editable island and
    /// resolves to nothing.
    pub fn resolve_editable_root(&self, target: NodeId) -> Option<NodeId> {
        let mut current = match self.find(target)? {
            Node::Text { .. } => self.parent_of(target)?,
            Node::Element { .. } => target,
        };
        loop {
            let node = self.find(current)?;
            match node.attr("contenteditable") {
                Some(None) | Some(Some("")) => return Some(current),
                Some(Some(v)) if v.eq_ignore_ascii_case("true") => return Some(current),
                Some(Some(v)) if v.eq_ignore_ascii_case("false") => return None,
                // Invalid values inherit from the ancestor.
                _ => {}
            }
            current = self.parent_of(current)?;
        }
    }

    /// Insert a fragment at a position, splitting a text container when the
    /// point falls mid-node. Returns the parent element and the child index
    /// of the first inserted node.
    pub fn insert_at(&mut self, pos: Position, nodes: Vec<Node>) -> Option<(NodeId, usize)> {
        enum Plan {
            Element(usize),
            TextAt { parent: NodeId, idx: usize },
            Split { parent: NodeId, idx: usize, off: usize },
        }

        let plan = match self.find(pos.node)? {
            Node::Element { children, .. } => Plan::Element(pos.offset.min(children.len())),
            Node::Text { text, .. } => {
                let off = clamp_to_char_boundary(text, pos.offset);
                let len = text.len();
                let parent = self.parent_of(pos.node)?;
                let idx = self.child_index(parent, pos.node)?;
                if off == 0 {
                    Plan::TextAt { parent, idx }
                } else if off == len {
                    Plan::TextAt {
                        parent,
                        idx: idx + 1,
                    }
                } else {
                    Plan::Split { parent, idx, off }
                }
            }
        };

        match plan {
            Plan::Element(idx) => {
                self.splice_children(pos.node, idx, nodes)?;
                Some((pos.node, idx))
            }
            Plan::TextAt { parent, idx } => {
                self.splice_children(parent, idx, nodes)?;
                Some((parent, idx))
            }
            Plan::Split { parent, idx, off } => {
                let tail = match self.find_mut(pos.node)? {
                    Node::Text { text, .. } => {
                        let tail = text[off..].to_string();
                        text.truncate(off);
                        tail
                    }
                    Node::Element { .. } => return None,
                };
                let tail_node = self.new_text(&tail);
                let mut fragment = nodes;
                fragment.push(tail_node);
                self.splice_children(parent, idx + 1, fragment)?;
                Some((parent, idx + 1))
            }
        }
    }

    /// Clone the contents covered by a range as detached nodes with fresh
    /// ids. `None` for unsupported range shapes.
    pub fn clone_range(&mut self, range: &DomRange) -> Option<Vec<Node>> {
        match self.classify(range)? {
            RangeShape::SameText { node, start, end } => {
                if start == end {
                    return Some(Vec::new());
                }
                let slice = self.text_of(node)?[start..end].to_string();
                Some(vec![self.new_text(&slice)])
            }
            RangeShape::SameElement { node, start, end } => {
                let mut clones: Vec<Node> = self.find(node)?.children()[start..end].to_vec();
                for clone in &mut clones {
                    self.reassign_ids(clone);
                }
                Some(clones)
            }
            RangeShape::SiblingTexts {
                parent,
                start_idx,
                start_off,
                end_idx,
                end_off,
            } => {
                let children = self.find(parent)?.children();
                let head = children[start_idx].as_text()?[start_off..].to_string();
                let tail = children[end_idx].as_text()?[..end_off].to_string();
                let mut middle: Vec<Node> = children[start_idx + 1..end_idx].to_vec();

                let mut clones = Vec::with_capacity(middle.len() + 2);
                if !head.is_empty() {
                    clones.push(self.new_text(&head));
                }
                for clone in &mut middle {
                    self.reassign_ids(clone);
                }
                clones.append(&mut middle);
                if !tail.is_empty() {
                    let tail_node = self.new_text(&tail);
                    clones.push(tail_node);
                }
                Some(clones)
            }
        }
    }

    /// Delete the contents covered by a range, returning the collapsed
    /// position where the contents were. `None` for unsupported shapes, in
    /// which case nothing is touched.
    pub fn delete_range(&mut self, range: &DomRange) -> Option<Position> {
        match self.classify(range)? {
            RangeShape::SameText { node, start, end } => {
                match self.find_mut(node)? {
                    Node::Text { text, .. } => {
                        text.drain(start..end);
                    }
                    Node::Element { .. } => return None,
                }
                Some(Position::new(node, start))
            }
            RangeShape::SameElement { node, start, end } => {
                match self.find_mut(node)? {
                    Node::Element { children, .. } => {
                        children.drain(start..end);
                    }
                    Node::Text { .. } => return None,
                }
                Some(Position::new(node, start))
            }
            RangeShape::SiblingTexts {
                parent,
                start_idx,
                start_off,
                end_idx,
                end_off,
            } => {
                let Node::Element { children, .. } = self.find_mut(parent)? else {
                    return None;
                };
                let start_node = children[start_idx].id();
                if let Node::Text { text, .. } = &mut children[end_idx] {
                    text.drain(..end_off);
                }
                if let Node::Text { text, .. } = &mut children[start_idx] {
                    text.truncate(start_off);
                }
                children.drain(start_idx + 1..end_idx);
                Some(Position::new(start_node, start_off))
            }
        }
    }

    fn classify(&self, range: &DomRange) -> Option<RangeShape> {
        let (s, e) = (range.start, range.end);

        if s.node == e.node {
            return match self.find(s.node)? {
                Node::Text { text, .. } => {
                    let a = clamp_to_char_boundary(text, s.offset);
                    let b = clamp_to_char_boundary(text, e.offset);
                    Some(RangeShape::SameText {
                        node: s.node,
                        start: a.min(b),
                        end: a.max(b),
                    })
                }
                Node::Element { children, .. } => {
                    let a = s.offset.min(children.len());
                    let b = e.offset.min(children.len());
                    Some(RangeShape::SameElement {
                        node: s.node,
                        start: a.min(b),
                        end: a.max(b),
                    })
                }
            };
        }

        // Different containers: supported when both are text nodes under
        // the same parent.
        let start_text = self.text_of(s.node)?;
        let start_off = clamp_to_char_boundary(start_text, s.offset);
        let end_text = self.text_of(e.node)?;
        let end_off = clamp_to_char_boundary(end_text, e.offset);

        let parent = self.parent_of(s.node)?;
        if self.parent_of(e.node)? != parent {
            return None;
        }
        let start_idx = self.child_index(parent, s.node)?;
        let end_idx = self.child_index(parent, e.node)?;

        let (start_idx, start_off, end_idx, end_off) = if start_idx <= end_idx {
            (start_idx, start_off, end_idx, end_off)
        } else {
            (end_idx, end_off, start_idx, start_off)
        };
        Some(RangeShape::SiblingTexts {
            parent,
            start_idx,
            start_off,
            end_idx,
            end_off,
        })
    }

    fn splice_children(&mut self, parent: NodeId, index: usize, nodes: Vec<Node>) -> Option<()> {
        match self.find_mut(parent)? {
            Node::Element { children, .. } => {
                let index = index.min(children.len());
                children.splice(index..index, nodes);
                Some(())
            }
            Node::Text { .. } => None,
        }
    }

    fn reassign_ids(&mut self, node: &mut Node) {
        match node {
            Node::Element { id, children, .. } => {
                *id = self.alloc_id();
                for child in children {
                    self.reassign_ids(child);
                }
            }
            Node::Text { id, .. } => *id = self.alloc_id(),
        }
    }
}

fn find_in(node: &Node, id: NodeId) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children().iter().find_map(|c| find_in(c, id))
}

fn find_in_mut(node: &mut Node, id: NodeId) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    match node {
        Node::Element { children, .. } => children.iter_mut().find_map(|c| find_in_mut(c, id)),
        Node::Text { .. } => None,
    }
}

fn parent_in(node: &Node, id: NodeId) -> Option<NodeId> {
    for child in node.children() {
        if child.id() == id {
            return Some(node.id());
        }
        if let Some(found) = parent_in(child, id) {
            return Some(found);
        }
    }
    None
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text { text, .. } => out.push_str(text),
        Node::Element { children, .. } => {
            for child in children {
                collect_text(child, out);
            }
        }
    }
}
