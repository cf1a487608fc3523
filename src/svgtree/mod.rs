// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A mutable SVG document.
//!
//! Nodes are stored in an arena and addressed by [`NodeId`].
//! Detached nodes stay in the arena, so IDs are never invalidated.

use std::collections::HashMap;
use std::str::FromStr;

use crate::{Error, Rect};

mod export;
mod names;
mod parse;

pub use names::{AId, EId, INKSCAPE_NS};

pub(crate) const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub(crate) const XMLNS_NS: &str = "http://www.w3.org/2000/xmlns/";


/// An SVG document.
pub struct Document {
    nodes: Vec<NodeData>,
    links: HashMap<String, NodeId>,
    // A prefix that is bound to the SVG namespace on the root element.
    svg_prefix: Option<String>,
}

impl Document {
    /// Parses a `Document` from a string.
    pub fn parse_str(text: &str) -> Result<Document, Error> {
        parse::parse(text)
    }

    /// Parses a `Document` from raw bytes.
    pub fn parse_data(data: &[u8]) -> Result<Document, Error> {
        let text = std::str::from_utf8(data).map_err(|_| Error::NotAnUtf8Str)?;
        Self::parse_str(text)
    }

    /// Writes the document back to a string.
    pub fn to_string(&self, opt: xmlwriter::Options) -> String {
        export::convert(self, opt)
    }

    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> Node {
        self.get(NodeId(0))
    }

    /// Returns the root `svg` element.
    pub fn root_element(&self) -> Node {
        // `unwrap` is safe, because the parser guarantees an `svg` root element.
        self.root().first_element_child().unwrap()
    }

    /// Returns an iterator over document's descendant nodes.
    #[inline]
    pub fn descendants(&self) -> Descendants {
        self.root().descendants()
    }

    /// Returns a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> Node {
        Node { id, d: &self.nodes[id.0], doc: self }
    }

    /// Returns an element by its `id` attribute.
    pub fn element_by_id(&self, id: &str) -> Option<Node> {
        let node_id = self.links.get(id)?;
        Some(self.get(*node_id))
    }

    /// Generates an element ID that is not used yet.
    pub fn gen_unique_id(&self, prefix: &str) -> String {
        let mut idx = 1;
        loop {
            let id = format!("{}{}", prefix, idx);
            if !self.links.contains_key(&id) {
                return id;
            }

            idx += 1;
        }
    }

    /// Returns the page rectangle in the root element user units.
    ///
    /// Uses `viewBox` when present and `width`/`height` otherwise.
    pub fn page_rect(&self, dpi: f64) -> Result<Rect, Error> {
        let svg = self.root_element();

        if let Some(value) = svg.attribute(AId::ViewBox) {
            match svgtypes::ViewBox::from_str(value) {
                Ok(vb) => return Rect::new(vb.x, vb.y, vb.w, vb.h).ok_or(Error::InvalidPageSize),
                Err(_) => log::warn!("Failed to parse viewBox '{}'.", value),
            }
        }

        let width = svg.length_attribute(AId::Width, dpi).ok_or(Error::InvalidPageSize)?;
        let height = svg.length_attribute(AId::Height, dpi).ok_or(Error::InvalidPageSize)?;
        Rect::new(0.0, 0.0, width, height).ok_or(Error::InvalidPageSize)
    }

    /// Creates a new detached SVG element.
    pub fn create_element(&mut self, tag_name: EId) -> NodeId {
        let name = match self.svg_prefix {
            Some(ref prefix) => format!("{}:{}", prefix, tag_name.to_str()),
            None => tag_name.to_str().to_string(),
        };

        self.push_node(NodeKind::Element {
            tag_name: Some(tag_name),
            name,
            attributes: Vec::new(),
        })
    }

    pub(crate) fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            parent: None,
            prev_sibling: None,
            next_sibling: None,
            children: None,
            kind,
        });
        id
    }

    /// Sets an attribute value, replacing the existing one.
    pub fn set_attribute(&mut self, id: NodeId, aid: AId, value: &str) {
        if aid == AId::Id {
            let prev = self.get(id).attribute(AId::Id).map(|s| s.to_string());
            if let Some(prev) = prev {
                if self.links.get(&prev) == Some(&id) {
                    self.links.remove(&prev);
                }
            }

            self.links.insert(value.to_string(), id);
        }

        if let NodeKind::Element { ref mut attributes, .. } = self.nodes[id.0].kind {
            if let Some(attr) = attributes.iter_mut().find(|a| a.is(aid)) {
                attr.value = value.to_string();
            } else {
                attributes.push(Attribute {
                    name: aid.to_str().to_string(),
                    namespace: aid.namespace().map(|s| s.to_string()),
                    value: value.to_string(),
                });
            }
        }
    }

    /// Removes an attribute.
    ///
    /// Returns `true` if the attribute was present.
    pub fn remove_attribute(&mut self, id: NodeId, aid: AId) -> bool {
        if aid == AId::Id {
            let prev = self.get(id).attribute(AId::Id).map(|s| s.to_string());
            if let Some(prev) = prev {
                if self.links.get(&prev) == Some(&id) {
                    self.links.remove(&prev);
                }
            }
        }

        if let NodeKind::Element { ref mut attributes, .. } = self.nodes[id.0].kind {
            let len = attributes.len();
            attributes.retain(|a| !a.is(aid));
            return attributes.len() != len;
        }

        false
    }

    /// Unlinks a node from its parent and siblings.
    ///
    /// The node keeps its own children.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let d = &self.nodes[id.0];
            (d.parent, d.prev_sibling, d.next_sibling)
        };

        if let Some(prev) = prev {
            self.nodes[prev.0].next_sibling = next;
        }

        if let Some(next) = next {
            self.nodes[next.0].prev_sibling = prev;
        }

        if let Some(parent) = parent {
            if let Some((first, last)) = self.nodes[parent.0].children {
                let first = if first == id { next } else { Some(first) };
                let last = if last == id { prev } else { Some(last) };
                self.nodes[parent.0].children = match (first, last) {
                    (Some(first), Some(last)) => Some((first, last)),
                    _ => None,
                };
            }
        }

        let d = &mut self.nodes[id.0];
        d.parent = None;
        d.prev_sibling = None;
        d.next_sibling = None;
    }

    /// Appends a node to the parent's children.
    pub fn append(&mut self, parent: NodeId, id: NodeId) -> Result<(), Error> {
        self.check_link(parent, id)?;
        self.detach(id);

        let last = self.nodes[parent.0].children.map(|(_, last)| last);
        match last {
            Some(last) => self.link_after(last, id),
            None => {
                self.nodes[parent.0].children = Some((id, id));
                self.nodes[id.0].parent = Some(parent);
            }
        }

        Ok(())
    }

    /// Inserts a node before the `sibling`.
    pub fn insert_before(&mut self, sibling: NodeId, id: NodeId) -> Result<(), Error> {
        let parent = self.nodes[sibling.0].parent.ok_or(Error::CycleDetected)?;
        self.check_link(parent, id)?;
        if sibling == id {
            return Ok(());
        }

        self.detach(id);

        let prev = self.nodes[sibling.0].prev_sibling;
        self.nodes[id.0].parent = Some(parent);
        self.nodes[id.0].prev_sibling = prev;
        self.nodes[id.0].next_sibling = Some(sibling);
        self.nodes[sibling.0].prev_sibling = Some(id);
        match prev {
            Some(prev) => self.nodes[prev.0].next_sibling = Some(id),
            None => {
                if let Some((_, last)) = self.nodes[parent.0].children {
                    self.nodes[parent.0].children = Some((id, last));
                }
            }
        }

        Ok(())
    }

    /// Moves a node to the specified position of the parent's children.
    ///
    /// Appends the node when `position` is out of bounds.
    pub fn insert_at(&mut self, parent: NodeId, position: usize, id: NodeId) -> Result<(), Error> {
        self.check_link(parent, id)?;
        self.detach(id);

        let sibling = self.get(parent).children().nth(position).map(|n| n.id());
        match sibling {
            Some(sibling) => self.insert_before(sibling, id),
            None => self.append(parent, id),
        }
    }

    // `id` must be detached.
    fn link_after(&mut self, sibling: NodeId, id: NodeId) {
        let parent = self.nodes[sibling.0].parent;
        let next = self.nodes[sibling.0].next_sibling;

        self.nodes[id.0].parent = parent;
        self.nodes[id.0].prev_sibling = Some(sibling);
        self.nodes[id.0].next_sibling = next;
        self.nodes[sibling.0].next_sibling = Some(id);

        match next {
            Some(next) => self.nodes[next.0].prev_sibling = Some(id),
            None => {
                if let Some(parent) = parent {
                    if let Some((first, _)) = self.nodes[parent.0].children {
                        self.nodes[parent.0].children = Some((first, id));
                    }
                }
            }
        }
    }

    // A node cannot become a child of itself or of its own descendant.
    fn check_link(&self, parent: NodeId, id: NodeId) -> Result<(), Error> {
        if self.get(parent).ancestors().any(|n| n.id() == id) {
            return Err(Error::CycleDetected);
        }

        Ok(())
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "Document {{ nodes: {} }}", self.nodes.len())
    }
}


/// A node ID.
///
/// Nodes are compared by identity, not by content.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);


pub(crate) enum NodeKind {
    Root,
    Element {
        tag_name: Option<EId>,
        name: String,
        attributes: Vec<Attribute>,
    },
    Text(String),
}


struct NodeData {
    parent: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
    children: Option<(NodeId, NodeId)>,
    kind: NodeKind,
}


/// An element attribute.
///
/// Namespace declarations are stored as attributes too.
#[derive(Clone, PartialEq, Debug)]
pub struct Attribute {
    /// A qualified name, like `inkscape:groupmode`.
    pub name: String,
    /// A namespace URI.
    pub namespace: Option<String>,
    /// A raw value.
    pub value: String,
}

impl Attribute {
    fn is(&self, aid: AId) -> bool {
        let local = match self.name.find(':') {
            Some(idx) => &self.name[idx + 1..],
            None => self.name.as_str(),
        };

        local == aid.local_name() && self.namespace.as_deref() == aid.namespace()
    }
}


/// A read-only view of a node.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    id: NodeId,
    doc: &'a Document,
    d: &'a NodeData,
}

impl Eq for Node<'_> {}

impl PartialEq for Node<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
           self.id == other.id
        && std::ptr::eq(self.doc, other.doc)
    }
}

impl<'a> Node<'a> {
    /// Returns the node ID.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Checks that the node is the document root.
    #[inline]
    pub fn is_root(&self) -> bool {
        matches!(self.d.kind, NodeKind::Root)
    }

    /// Checks that the node is an element.
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.d.kind, NodeKind::Element { .. })
    }

    /// Returns the element ID of an SVG element.
    ///
    /// Returns `None` for non-SVG elements and non-element nodes.
    #[inline]
    pub fn tag_name(&self) -> Option<EId> {
        match self.d.kind {
            NodeKind::Element { tag_name, .. } => tag_name,
            _ => None,
        }
    }

    /// Checks that the node is an SVG element with the specified name.
    #[inline]
    pub fn has_tag_name(&self, name: EId) -> bool {
        self.tag_name() == Some(name)
    }

    /// Returns the element's qualified name.
    pub fn name(&self) -> &'a str {
        match self.d.kind {
            NodeKind::Element { ref name, .. } => name,
            _ => "",
        }
    }

    /// Returns the text of a text node.
    pub fn text(&self) -> &'a str {
        match self.d.kind {
            NodeKind::Text(ref text) => text,
            _ => "",
        }
    }

    /// Returns the element's attributes in document order.
    pub fn attributes(&self) -> &'a [Attribute] {
        match self.d.kind {
            NodeKind::Element { ref attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Returns an attribute value.
    pub fn attribute(&self, aid: AId) -> Option<&'a str> {
        self.attributes().iter().find(|a| a.is(aid)).map(|a| a.value.as_str())
    }

    /// Checks that the element has the specified attribute.
    pub fn has_attribute(&self, aid: AId) -> bool {
        self.attributes().iter().any(|a| a.is(aid))
    }

    /// Returns the `id` attribute value or an empty string.
    pub fn element_id(&self) -> &'a str {
        self.attribute(AId::Id).unwrap_or("")
    }

    /// Checks that the element is an Inkscape layer.
    pub fn is_layer(&self) -> bool {
        self.has_tag_name(EId::G) && self.attribute(AId::GroupMode) == Some("layer")
    }

    /// Returns a length attribute in user units.
    ///
    /// Relative units are not supported.
    pub fn length_attribute(&self, aid: AId, dpi: f64) -> Option<f64> {
        let value = self.attribute(aid)?;
        let length = svgtypes::Length::from_str(value).ok()?;
        convert_length(length, dpi)
    }

    #[inline]
    fn gen_node(&self, id: NodeId) -> Node<'a> {
        Node { id, d: &self.doc.nodes[id.0], doc: self.doc }
    }

    /// Returns the parent node.
    pub fn parent(&self) -> Option<Self> {
        self.d.parent.map(|id| self.gen_node(id))
    }

    /// Returns the closest ancestor element.
    pub fn parent_element(&self) -> Option<Self> {
        self.ancestors().skip(1).find(|n| n.is_element())
    }

    /// Returns the previous sibling.
    pub fn prev_sibling(&self) -> Option<Self> {
        self.d.prev_sibling.map(|id| self.gen_node(id))
    }

    /// Returns the next sibling.
    pub fn next_sibling(&self) -> Option<Self> {
        self.d.next_sibling.map(|id| self.gen_node(id))
    }

    /// Returns the first child.
    pub fn first_child(&self) -> Option<Self> {
        self.d.children.map(|(id, _)| self.gen_node(id))
    }

    /// Returns the first child element.
    pub fn first_element_child(&self) -> Option<Self> {
        self.children().find(|n| n.is_element())
    }

    /// Returns the last child.
    pub fn last_child(&self) -> Option<Self> {
        self.d.children.map(|(_, id)| self.gen_node(id))
    }

    /// Returns the node position among its siblings.
    pub fn index(&self) -> Option<usize> {
        let parent = self.parent()?;
        parent.children().position(|n| n == *self)
    }

    /// Returns an iterator over ancestor nodes starting at this node.
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors(Some(*self))
    }

    /// Returns an iterator over children nodes.
    pub fn children(&self) -> Children<'a> {
        Children { front: self.first_child(), back: self.last_child() }
    }

    /// Returns an iterator which traverses the subtree starting at this node.
    pub fn traverse(&self) -> Traverse<'a> {
        Traverse { root: *self, edge: None }
    }

    /// Returns an iterator over this node and its descendants.
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants(self.traverse())
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self.d.kind {
            NodeKind::Root => write!(f, "Root"),
            NodeKind::Element { ref name, .. } => {
                write!(f, "Element {{ name: {:?}, attributes: {:?} }}", name, self.attributes())
            }
            NodeKind::Text(ref text) => write!(f, "Text({:?})", text),
        }
    }
}

fn convert_length(length: svgtypes::Length, dpi: f64) -> Option<f64> {
    use svgtypes::LengthUnit as Unit;

    let n = length.number;
    let value = match length.unit {
        Unit::None | Unit::Px => n,
        Unit::In => n * dpi,
        Unit::Cm => n * dpi / 2.54,
        Unit::Mm => n * dpi / 25.4,
        Unit::Pt => n * dpi / 72.0,
        Unit::Pc => n * dpi / 6.0,
        Unit::Em | Unit::Ex | Unit::Percent => return None,
    };

    Some(value)
}


macro_rules! axis_iterators {
    ($($(#[$attr:meta])* $i:ident($f:path);)*) => {
        $(
            $(#[$attr])*
            #[derive(Clone)]
            pub struct $i<'a>(Option<Node<'a>>);

            impl<'a> Iterator for $i<'a> {
                type Item = Node<'a>;

                #[inline]
                fn next(&mut self) -> Option<Self::Item> {
                    let node = self.0.take();
                    self.0 = node.as_ref().and_then($f);
                    node
                }
            }
        )*
    };
}

axis_iterators! {
    /// An iterator over a node and its ancestors.
    Ancestors(Node::parent);
}


/// A double-ended iterator over a node's children.
#[derive(Clone)]
pub struct Children<'a> {
    front: Option<Node<'a>>,
    back: Option<Node<'a>>,
}

impl<'a> Iterator for Children<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            let node = self.front.take();
            self.back = None;
            node
        } else {
            let node = self.front.take();
            self.front = node.as_ref().and_then(Node::next_sibling);
            node
        }
    }
}

impl<'a> DoubleEndedIterator for Children<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.back == self.front {
            let node = self.back.take();
            self.front = None;
            node
        } else {
            let node = self.back.take();
            self.back = node.as_ref().and_then(Node::prev_sibling);
            node
        }
    }
}


/// A [`Traverse`] step.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Edge<'a> {
    /// The node is entered.
    Open(Node<'a>),
    /// The node and its subtree are done.
    Close(Node<'a>),
}


/// An iterator over open and close edges of a subtree in document order.
#[derive(Clone)]
pub struct Traverse<'a> {
    root: Node<'a>,
    edge: Option<Edge<'a>>,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = Edge<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.edge {
            Some(Edge::Open(node)) => {
                self.edge = Some(match node.first_child() {
                    Some(first_child) => Edge::Open(first_child),
                    None => Edge::Close(node),
                });
            }
            Some(Edge::Close(node)) => {
                if node == self.root {
                    self.edge = None;
                } else if let Some(next_sibling) = node.next_sibling() {
                    self.edge = Some(Edge::Open(next_sibling));
                } else {
                    self.edge = node.parent().map(Edge::Close);
                }
            }
            None => {
                self.edge = Some(Edge::Open(self.root));
            }
        }

        self.edge
    }
}


/// An iterator over a node and its descendants in document order.
#[derive(Clone)]
pub struct Descendants<'a>(Traverse<'a>);

impl<'a> Iterator for Descendants<'a> {
    type Item = Node<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for edge in &mut self.0 {
            if let Edge::Open(node) = edge {
                return Some(node);
            }
        }

        None
    }
}
