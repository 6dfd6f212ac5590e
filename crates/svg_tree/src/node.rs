//! Mutable element tree
//!
//! Every node is owned by exactly one parent's child list, so a subtree can
//! never be shared between two parents. Cloning an [`Element`] produces a fully
//! independent deep copy.

/// SVG namespace URI
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Strip a namespace prefix (`svg:rect`) or Clark notation
/// (`{http://www.w3.org/2000/svg}rect`) from a qualified name.
pub fn local_name(qualified: &str) -> &str {
    if let Some(rest) = qualified.strip_prefix('{') {
        if let Some(pos) = rest.find('}') {
            return &rest[pos + 1..];
        }
    }
    match qualified.rfind(':') {
        Some(pos) => &qualified[pos + 1..],
        None => qualified,
    }
}

/// The prefix part of a qualified name, if any (`svg:rect` -> `svg`)
pub fn name_prefix(qualified: &str) -> Option<&str> {
    if qualified.starts_with('{') {
        return None;
    }
    qualified.rfind(':').map(|pos| &qualified[..pos])
}

/// A node in the tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// A single attribute, name as written in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// An element with attributes and ordered children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element with the given qualified name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Copy of this element's name and attributes, without children
    pub fn shallow_clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            attributes: self.attributes.clone(),
            children: Vec::new(),
        }
    }

    /// Qualified name as written in the source
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local name with any namespace prefix removed
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Namespace-agnostic tag test
    pub fn is(&self, local: &str) -> bool {
        self.local_name() == local
    }

    /// Qualified name for a new element of kind `local`, reusing this
    /// element's namespace prefix so generated siblings match the source.
    pub fn sibling_name(&self, local: &str) -> String {
        match name_prefix(&self.name) {
            Some(prefix) => format!("{}:{}", prefix, local),
            None => local.to_string(),
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Look up an attribute by exact name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Look up an attribute by local name, ignoring any namespace prefix
    pub fn attr_local(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| local_name(&a.name) == local)
            .map(|a| a.value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    /// Remove an attribute, returning its value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attributes.iter().position(|a| a.name == name)?;
        Some(self.attributes.remove(pos).value)
    }

    /// Mutable access to all attribute values
    pub fn attributes_mut(&mut self) -> impl Iterator<Item = &mut Attribute> {
        self.attributes.iter_mut()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn append(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn insert(&mut self, index: usize, child: impl Into<Node>) {
        self.children.insert(index, child.into());
    }

    pub fn remove_child(&mut self, index: usize) -> Option<Node> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    /// Detach and return all children
    pub fn take_children(&mut self) -> Vec<Node> {
        std::mem::take(&mut self.children)
    }

    /// Direct child elements
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of this element and its descendants
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Replace all children with a single text node
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.children.push(Node::Text(text.into()));
    }

    /// Pre-order iterator over this element and all descendant elements
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// First element (self included) with the given local name
    pub fn find(&self, local: &str) -> Option<&Element> {
        self.descendants().find(|e| e.is(local))
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(t) | Node::CData(t) => out.push_str(t),
            Node::Element(e) => collect_text(&e.children, out),
            Node::Comment(_) => {}
        }
    }
}

/// Document-order traversal over elements
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.stack
            .extend(current.children.iter().rev().filter_map(Node::as_element));
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("svg:svg")
            .with_attr("width", "10mm")
            .with_child(
                Element::new("svg:g")
                    .with_attr("id", "group")
                    .with_child(Element::new("svg:text").with_child(Node::text("Hello"))),
            )
            .with_child(Element::new("svg:rect").with_attr("id", "box"))
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name("svg:rect"), "rect");
        assert_eq!(local_name("{http://www.w3.org/2000/svg}rect"), "rect");
        assert_eq!(local_name("rect"), "rect");
        assert_eq!(local_name("xlink:href"), "href");
    }

    #[test]
    fn test_name_prefix_and_sibling_name() {
        assert_eq!(name_prefix("svg:rect"), Some("svg"));
        assert_eq!(name_prefix("rect"), None);
        assert_eq!(name_prefix("{urn:x}rect"), None);

        assert_eq!(Element::new("svg:rect").sibling_name("g"), "svg:g");
        assert_eq!(Element::new("rect").sibling_name("g"), "g");
    }

    #[test]
    fn test_attributes() {
        let mut e = Element::new("rect").with_attr("x", "1");
        e.set_attr("x", "2");
        e.set_attr("y", "3");
        assert_eq!(e.attr("x"), Some("2"));
        assert_eq!(e.attributes().len(), 2);
        assert_eq!(e.remove_attr("x"), Some("2".to_string()));
        assert!(!e.has_attr("x"));
        assert_eq!(e.remove_attr("x"), None);

        let e = Element::new("image").with_attr("xlink:href", "a.png");
        assert_eq!(e.attr_local("href"), Some("a.png"));
        assert_eq!(e.attr("href"), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let base = sample();
        let mut copy = base.clone();
        copy.children_mut()[0]
            .as_element_mut()
            .unwrap()
            .set_attr("id", "changed");
        copy.remove_child(1);

        assert_eq!(base.children().len(), 2);
        assert_eq!(base.find("g").unwrap().attr("id"), Some("group"));
        assert_eq!(copy.find("g").unwrap().attr("id"), Some("changed"));
    }

    #[test]
    fn test_text() {
        let mut root = sample();
        assert_eq!(root.text(), "Hello");

        let group = root.children_mut()[0].as_element_mut().unwrap();
        group.set_text("Bye");
        assert_eq!(group.children().len(), 1);
        assert_eq!(root.text(), "Bye");
    }

    #[test]
    fn test_descendants_in_document_order() {
        let root = sample();
        let names: Vec<&str> = root.descendants().map(|e| e.local_name()).collect();
        assert_eq!(names, vec!["svg", "g", "text", "rect"]);
        assert!(root.find("rect").is_some());
        assert!(root.find("circle").is_none());
    }

    #[test]
    fn test_shallow_clone() {
        let root = sample();
        let shell = root.shallow_clone();
        assert_eq!(shell.name(), "svg:svg");
        assert_eq!(shell.attr("width"), Some("10mm"));
        assert!(shell.children().is_empty());
    }

    #[test]
    fn test_take_children() {
        let mut root = sample();
        let children = root.take_children();
        assert_eq!(children.len(), 2);
        assert!(root.children().is_empty());
        assert_eq!(root.attr("width"), Some("10mm"));
    }
}
