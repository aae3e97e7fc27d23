//! In-memory document used by tests and the native demo.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::class_list::ClassList;
use crate::dom::Dom;
use crate::error::{Result, WidgetError};

/// Handle to a node inside a [`MemoryDom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct NodeData {
    tag: String,
    id: Option<String>,
    classes: ClassList,
    text: String,
    value: String,
    input_type: Option<String>,
    style: BTreeMap<String, String>,
    selection: Option<(usize, usize)>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    fn is_input(&self) -> bool {
        self.tag == "input"
    }
}

/// A compound selector such as `div#main.logo.dark`
#[derive(Debug, Default)]
struct Selector<'a> {
    tag: Option<&'a str>,
    id: Option<&'a str>,
    classes: Vec<&'a str>,
}

impl<'a> Selector<'a> {
    fn parse(selector: &'a str) -> Result<Self> {
        let invalid = || WidgetError::Dom(format!("Unsupported selector '{}'", selector));
        let selector = selector.trim();
        if selector.is_empty() {
            return Err(invalid());
        }

        let mut parsed = Selector::default();
        let mut rest = selector;

        let tag_end = rest.find(['#', '.']).unwrap_or(rest.len());
        if tag_end > 0 {
            parsed.tag = Some(&rest[..tag_end]);
        }
        rest = &rest[tag_end..];

        while !rest.is_empty() {
            let marker = rest.as_bytes()[0];
            let body = &rest[1..];
            let end = body.find(['#', '.']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return Err(invalid());
            }
            match marker {
                b'#' => parsed.id = Some(name),
                _ => parsed.classes.push(name),
            }
            rest = &body[end..];
        }

        let valid_name = |name: &str| {
            name.chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        };
        let names_ok = parsed.tag.is_none_or(valid_name)
            && parsed.id.is_none_or(valid_name)
            && parsed.classes.iter().all(|c| valid_name(c));
        if !names_ok {
            return Err(invalid());
        }
        Ok(parsed)
    }

    fn matches(&self, node: &NodeData) -> bool {
        self.tag.is_none_or(|tag| node.tag.eq_ignore_ascii_case(tag))
            && self.id.is_none_or(|id| node.id.as_deref() == Some(id))
            && self.classes.iter().all(|c| node.classes.contains(c))
    }
}

/// Arena-backed document tree rooted at a `body` element.
///
/// Removed nodes stay in the arena (their handles remain valid) but are no longer
/// reachable from the body.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<NodeData>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::new("body")],
        }
    }

    /// The document body
    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Create an element and append it to `parent` in one step.
    ///
    /// Used to build page skeletons before widgets are mounted.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        id: Option<&str>,
        classes: &str,
    ) -> Result<NodeId> {
        let node = self.create_element(tag)?;
        {
            let data = self.data_mut(node)?;
            data.id = id.map(str::to_string);
            data.classes = ClassList::parse(classes);
        }
        self.append_child(&parent, &node)?;
        Ok(node)
    }

    /// Append an element that `selector` will match (a `div` unless a tag is given).
    pub fn append_matching(&mut self, parent: NodeId, selector: &str) -> Result<NodeId> {
        let selector = Selector::parse(selector)?;
        let classes = selector.classes.join(" ");
        self.append_element(parent, selector.tag.unwrap_or("div"), selector.id, &classes)
    }

    /// Simulate the user typing into an input, replacing its text.
    pub fn type_text(&mut self, input: NodeId, text: &str) -> Result<()> {
        self.set_input_value(&input, text)
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).map(|n| n.tag.as_str())
    }

    pub fn classes(&self, node: NodeId) -> Option<&ClassList> {
        self.nodes.get(node.0).map(|n| &n.classes)
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).map(|n| n.text.as_str())
    }

    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).map(|n| n.value.as_str())
    }

    pub fn input_type(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).and_then(|n| n.input_type.as_deref())
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes
            .get(node.0)
            .and_then(|n| n.style.get(property))
            .map(String::as_str)
    }

    /// Selected character range of an input, if any
    pub fn selection(&self, node: NodeId) -> Option<(usize, usize)> {
        self.nodes.get(node.0).and_then(|n| n.selection)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    /// Whether `node` is reachable from the body
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.body() {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Serialize a subtree as HTML-like markup.
    pub fn render(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.render_into(node, &mut out);
        out
    }

    fn render_into(&self, node: NodeId, out: &mut String) {
        let Some(data) = self.nodes.get(node.0) else {
            return;
        };

        let _ = write!(out, "<{}", data.tag);
        if let Some(id) = &data.id {
            let _ = write!(out, " id=\"{}\"", id);
        }
        if let Some(kind) = &data.input_type {
            let _ = write!(out, " type=\"{}\"", kind);
        }
        if !data.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", data.classes);
        }
        if !data.style.is_empty() {
            let style = data
                .style
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect::<Vec<_>>()
                .join("; ");
            let _ = write!(out, " style=\"{}\"", style);
        }
        if data.is_input() {
            let _ = write!(out, " value=\"{}\">", data.value);
            return;
        }
        out.push('>');
        out.push_str(&data.text);
        for child in &data.children {
            self.render_into(*child, out);
        }
        let _ = write!(out, "</{}>", data.tag);
    }

    fn data(&self, node: NodeId) -> Result<&NodeData> {
        self.nodes
            .get(node.0)
            .ok_or_else(|| WidgetError::Dom(format!("Unknown node {:?}", node)))
    }

    fn data_mut(&mut self, node: NodeId) -> Result<&mut NodeData> {
        self.nodes
            .get_mut(node.0)
            .ok_or_else(|| WidgetError::Dom(format!("Unknown node {:?}", node)))
    }

    fn input_mut(&mut self, node: NodeId) -> Result<&mut NodeData> {
        let data = self.data_mut(node)?;
        if !data.is_input() {
            return Err(WidgetError::Dom(format!(
                "<{}> is not an input element",
                data.tag
            )));
        }
        Ok(data)
    }

    fn detach(&mut self, node: NodeId) -> Result<()> {
        if let Some(parent) = self.data(node)?.parent {
            self.data_mut(parent)?.children.retain(|c| *c != node);
            self.data_mut(node)?.parent = None;
        }
        Ok(())
    }

    fn find_first(&self, start: NodeId, selector: &Selector<'_>) -> Option<NodeId> {
        let data = self.nodes.get(start.0)?;
        if selector.matches(data) {
            return Some(start);
        }
        data.children
            .iter()
            .find_map(|child| self.find_first(*child, selector))
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.find_first(self.body(), &selector))
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(WidgetError::Dom(format!("Invalid tag name '{}'", tag)));
        }
        self.nodes.push(NodeData::new(tag));
        Ok(NodeId(self.nodes.len() - 1))
    }

    fn add_classes(&mut self, node: &NodeId, classes: &ClassList) -> Result<()> {
        let data = self.data_mut(*node)?;
        for class in classes.iter() {
            data.classes.insert(class);
        }
        Ok(())
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<()> {
        self.data(*parent)?;
        // An element cannot be appended inside itself.
        let mut ancestor = Some(*parent);
        while let Some(id) = ancestor {
            if id == *child {
                return Err(WidgetError::Dom(
                    "Cannot append an element to its own subtree".to_string(),
                ));
            }
            ancestor = self.parent(id);
        }

        self.detach(*child)?;
        self.data_mut(*parent)?.children.push(*child);
        self.data_mut(*child)?.parent = Some(*parent);
        Ok(())
    }

    fn remove(&mut self, node: &NodeId) -> Result<()> {
        self.detach(*node)
    }

    fn set_text(&mut self, node: &NodeId, text: &str) -> Result<()> {
        let data = self.data_mut(*node)?;
        data.text = text.to_string();
        let children = std::mem::take(&mut data.children);
        for child in children {
            self.data_mut(child)?.parent = None;
        }
        Ok(())
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) -> Result<()> {
        self.data_mut(*node)?
            .style
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn set_input_type(&mut self, input: &NodeId, kind: &str) -> Result<()> {
        self.input_mut(*input)?.input_type = Some(kind.to_string());
        Ok(())
    }

    fn input_value(&self, input: &NodeId) -> Result<String> {
        let data = self.data(*input)?;
        if !data.is_input() {
            return Err(WidgetError::Dom(format!(
                "<{}> is not an input element",
                data.tag
            )));
        }
        Ok(data.value.clone())
    }

    fn set_input_value(&mut self, input: &NodeId, value: &str) -> Result<()> {
        let data = self.input_mut(*input)?;
        data.value = value.to_string();
        data.selection = None;
        Ok(())
    }

    fn select_all(&mut self, input: &NodeId) -> Result<()> {
        let data = self.input_mut(*input)?;
        data.selection = Some((0, data.value.chars().count()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (MemoryDom, NodeId) {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let section = dom
            .append_element(body, "section", Some("main"), "page dark")
            .unwrap();
        (dom, section)
    }

    #[test]
    fn test_query_selector_forms() {
        let (dom, section) = page();
        assert_eq!(dom.query_selector("#main").unwrap(), Some(section));
        assert_eq!(dom.query_selector(".page").unwrap(), Some(section));
        assert_eq!(dom.query_selector("section.dark").unwrap(), Some(section));
        assert_eq!(dom.query_selector("section#main.page").unwrap(), Some(section));
        assert_eq!(dom.query_selector("#other").unwrap(), None);
        assert_eq!(dom.query_selector(".page.light").unwrap(), None);
    }

    #[test]
    fn test_query_selector_rejects_unsupported_syntax() {
        let (dom, _) = page();
        assert!(dom.query_selector("").is_err());
        assert!(dom.query_selector("div > span").is_err());
        assert!(dom.query_selector("#").is_err());
    }

    #[test]
    fn test_append_matching_builds_selector_target() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let logo = dom.append_matching(body, ".logo").unwrap();
        let counter = dom.append_matching(body, "section#counter-1.box").unwrap();
        assert_eq!(dom.tag(logo), Some("div"));
        assert_eq!(dom.query_selector(".logo").unwrap(), Some(logo));
        assert_eq!(dom.query_selector("#counter-1").unwrap(), Some(counter));
        assert_eq!(dom.tag(counter), Some("section"));
    }

    #[test]
    fn test_removed_nodes_are_not_found() {
        let (mut dom, section) = page();
        dom.remove(&section).unwrap();
        assert!(!dom.is_attached(section));
        assert_eq!(dom.query_selector("#main").unwrap(), None);
        // Removing twice is harmless
        dom.remove(&section).unwrap();
    }

    #[test]
    fn test_append_moves_existing_child() {
        let (mut dom, section) = page();
        let body = dom.body();
        let other = dom.append_element(body, "div", None, "").unwrap();
        dom.append_child(&other, &section).unwrap();
        assert_eq!(dom.children(body), &[other]);
        assert_eq!(dom.parent(section), Some(other));
        assert!(dom.append_child(&section, &other).is_err());
    }

    #[test]
    fn test_input_operations_require_input() {
        let (mut dom, section) = page();
        assert!(dom.set_input_value(&section, "1").is_err());

        let input = dom.create_element("input").unwrap();
        dom.set_input_type(&input, "text").unwrap();
        dom.set_input_value(&input, "42").unwrap();
        dom.select_all(&input).unwrap();
        assert_eq!(dom.selection(input), Some((0, 2)));
        dom.type_text(input, "7").unwrap();
        assert_eq!(dom.selection(input), None);
        assert_eq!(dom.input_value(&input).unwrap(), "7");
    }

    #[test]
    fn test_render_markup() {
        let (mut dom, section) = page();
        let slide = dom.create_element("div").unwrap();
        dom.set_text(&slide, "3").unwrap();
        dom.set_style(&slide, "top", "0px").unwrap();
        dom.append_child(&section, &slide).unwrap();
        assert_eq!(
            dom.render(section),
            "<section id=\"main\" class=\"page dark\"><div style=\"top: 0px\">3</div></section>"
        );
    }
}
