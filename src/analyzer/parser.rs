//! Document tree built from parsed HTML
//!
//! The HTML parser's own tree is converted into an owned, immutable arena of
//! nodes so it can be shared read-only across concurrent extractors. Doctype
//! and processing-instruction nodes are dropped; doctype detection works on the
//! raw markup instead.
//!
//! Conversion and every traversal use an explicit stack, and the conversion
//! rejects documents nested deeper than a configured limit.

use scraper::{Html, Node};
use thiserror::Error;

/// Index of a node inside its `Document`
pub type NodeId = usize;

/// Errors raised while building a document tree
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("element nesting exceeds the maximum depth of {max_depth}")]
    TooDeep { max_depth: usize },
}

/// An element's tag name and attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
}

impl Element {
    /// Lowercase local tag name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the first attribute named `key`
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in document order
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Payload of a single tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    children: Vec<NodeId>,
}

/// Immutable parsed HTML document
///
/// Node 0 is always the document root.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Returns the document root node
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef { doc: self, id: 0 }
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All element nodes in document order
    pub fn elements(&self) -> impl Iterator<Item = (NodeRef<'_>, &Element)> {
        self.root()
            .descendants()
            .filter_map(|node| node.as_element().map(|el| (node, el)))
    }
}

/// Borrowed handle to one node of a `Document`
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &'a NodeKind {
        &self.doc.nodes[self.id].kind
    }

    pub fn as_element(&self) -> Option<&'a Element> {
        match self.kind() {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Direct children in document order
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        doc.nodes[self.id]
            .children
            .iter()
            .map(move |&id| NodeRef { doc, id })
    }

    /// This node and everything below it, depth-first in document order
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants {
            doc: self.doc,
            stack: vec![self.id],
        }
    }

    /// Concatenated text of every text node below this one
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in self.descendants() {
            if let NodeKind::Text(text) = node.kind() {
                out.push_str(text);
            }
        }
        out
    }
}

/// Pre-order depth-first iterator over a subtree
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.nodes[id].children.iter().rev().copied());
        Some(NodeRef { doc: self.doc, id })
    }
}

/// Parses HTML text into an immutable `Document`
///
/// The underlying parser is error-tolerant: malformed markup is repaired, not
/// rejected. The only failure is nesting deeper than `max_depth`.
///
/// # Example
///
/// ```
/// use web_analyzer::analyzer::parse_document;
///
/// let doc = parse_document("<html><body><h1>Hi</h1></body></html>", 64).unwrap();
/// assert!(doc.elements().any(|(_, el)| el.name() == "h1"));
/// ```
pub fn parse_document(html: &str, max_depth: usize) -> Result<Document, ParseError> {
    let parsed = Html::parse_document(html);
    if !parsed.errors.is_empty() {
        tracing::trace!("Recovered from {} HTML parse errors", parsed.errors.len());
    }

    let mut nodes: Vec<NodeData> = Vec::new();
    let mut stack = vec![(parsed.tree.root(), None::<NodeId>, 0usize)];

    while let Some((node, parent, depth)) = stack.pop() {
        if depth > max_depth {
            return Err(ParseError::TooDeep { max_depth });
        }

        let kind = match node.value() {
            Node::Document | Node::Fragment => NodeKind::Document,
            Node::Element(el) => NodeKind::Element(Element {
                name: el.name().to_string(),
                attrs: el
                    .attrs()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            }),
            Node::Text(text) => NodeKind::Text(String::from(&**text)),
            Node::Comment(comment) => NodeKind::Comment(String::from(&**comment)),
            Node::Doctype(_) | Node::ProcessingInstruction(_) => continue,
        };

        let id = nodes.len();
        nodes.push(NodeData {
            kind,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            nodes[parent].children.push(id);
        }

        let children: Vec<_> = node.children().collect();
        for child in children.into_iter().rev() {
            stack.push((child, Some(id), depth + 1));
        }
    }

    Ok(Document { nodes })
}
