//! Mock DOM for testing the front end without a browser
//!
//! An in-memory element tree implementing [`Page`]. Every handler runs
//! against it natively; the browser build swaps in the `web-sys` page.

use std::collections::{BTreeMap, HashMap};

use crate::core::Platform;
use crate::error::{WebError, WebResult};
use crate::page::{NodeId, Page, ScrollBlock, Selector, ShareRequest};

/// Element description used to build a [`MockDom`] tree
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Current value (form controls only)
    pub value: String,
    /// Element attributes other than `id` and `class`
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Inline style properties
    pub style: BTreeMap<String, String>,
    /// Child elements; moved into the tree on [`MockDom::append`]
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_ascii_lowercase(),
            text_content: String::new(),
            value: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            style: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// A text `<input>` with a name
    #[must_use]
    pub fn input(name: &str) -> Self {
        Self::new("input")
            .with_attr("type", "text")
            .with_attr("name", name)
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Sets the value
    #[must_use]
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Marks the element as required
    #[must_use]
    pub fn required(self) -> Self {
        self.with_attr("required", "")
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value, including `id` and `class`
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<String> {
        match key {
            "id" if !self.id.is_empty() => Some(self.id.clone()),
            "class" if !self.classes.is_empty() => Some(self.classes.join(" ")),
            _ => self.attributes.get(key).cloned(),
        }
    }

    /// Gets an inline style property
    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// Whether this is a form control carrying a value
    #[must_use]
    pub fn is_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "select" | "textarea")
    }

    /// Whether the element matches a selector
    #[must_use]
    pub fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Id(id) => self.id == *id,
            Selector::Class(class) => self.has_class(class),
            Selector::Tag(tag) => self.tag.eq_ignore_ascii_case(tag),
            Selector::Name(name) => self.get_attr("name").as_deref() == Some(name),
            Selector::HasAttr(attr) => self.get_attr(attr).is_some(),
            Selector::AttrEquals(attr, value) => self.get_attr(attr).as_deref() == Some(value),
            Selector::AttrPrefix(attr, prefix) => self
                .get_attr(attr)
                .is_some_and(|value| value.starts_with(prefix.as_str())),
            Selector::AnyOf(selectors) => selectors.iter().any(|s| self.matches(s)),
        }
    }
}

/// How the mock page answers share requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShareSupport {
    /// The share sheet opens
    #[default]
    Supported,
    /// No share API in this browser
    Unavailable,
    /// The share API rejects every request
    Failing,
}

#[derive(Debug, Clone)]
struct MockNode {
    element: DomElement,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Mock DOM for testing the front end without a browser
#[derive(Debug)]
pub struct MockDom {
    nodes: HashMap<NodeId, MockNode>,
    next_id: u32,
    body: NodeId,
    path: String,
    focused: Option<NodeId>,
    scrolls: Vec<(NodeId, ScrollBlock)>,
    submitted: Vec<NodeId>,
    shared: Vec<ShareRequest>,
    share_support: ShareSupport,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Creates an empty page at `/`
    #[must_use]
    pub fn new() -> Self {
        Self::at_path("/")
    }

    /// Creates an empty page at the given path
    #[must_use]
    pub fn at_path(path: &str) -> Self {
        let body = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(
            body,
            MockNode {
                element: DomElement::new("body"),
                parent: None,
                children: Vec::new(),
            },
        );
        Self {
            nodes,
            next_id: 1,
            body,
            path: path.to_string(),
            focused: None,
            scrolls: Vec::new(),
            submitted: Vec::new(),
            shared: Vec::new(),
            share_support: ShareSupport::default(),
        }
    }

    /// A social-profile page as the server renders it for `platform`
    ///
    /// Contains `form#social-form` with a required `profile_url` input and
    /// a required `display_name` input.
    #[must_use]
    pub fn social_form(platform: Platform) -> Self {
        let mut dom = Self::at_path(&format!("/social/{platform}"));
        let form = DomElement::new("form")
            .with_id("social-form")
            .with_class("social-form")
            .with_attr("method", "post")
            .with_child(
                DomElement::new("div").with_class("form-group").with_child(
                    DomElement::input("profile_url")
                        .with_id("profile_url")
                        .required(),
                ),
            )
            .with_child(
                DomElement::new("div").with_class("form-group").with_child(
                    DomElement::input("display_name")
                        .with_id("display_name")
                        .required(),
                ),
            )
            .with_child(
                DomElement::new("button")
                    .with_id("generate")
                    .with_attr("type", "submit"),
            );
        let body = dom.body;
        dom.append(body, form);
        dom
    }

    /// The plain-text generator page served at `/`
    ///
    /// Contains an anonymous `form.qr-form` with the `qr_data` textarea, the
    /// style select, two example buttons and an anchor link to the form.
    #[must_use]
    pub fn generator_page() -> Self {
        let mut dom = Self::new();
        let body = dom.body;
        dom.append(
            body,
            DomElement::new("a")
                .with_id("nav-generator")
                .with_attr("href", "#generator")
                .with_text("Генерирай"),
        );
        dom.append(
            body,
            DomElement::new("button")
                .with_id("example-url")
                .with_class("example-btn")
                .with_attr("data-example", "https://example.com"),
        );
        dom.append(
            body,
            DomElement::new("button")
                .with_id("example-wifi")
                .with_class("example-btn")
                .with_attr("data-example", "WIFI:T:WPA;S:MyNetwork;P:password;;"),
        );
        dom.append(
            body,
            DomElement::new("section").with_id("generator").with_child(
                DomElement::new("form")
                    .with_class("qr-form")
                    .with_child(
                        DomElement::new("textarea")
                            .with_id("qr_data")
                            .with_attr("name", "qr_data")
                            .required(),
                    )
                    .with_child(
                        DomElement::new("select")
                            .with_id("style")
                            .with_attr("name", "style")
                            .with_value("modern"),
                    )
                    .with_child(DomElement::new("button").with_attr("type", "submit")),
            ),
        );
        dom
    }

    /// Adds a server-rendered flash message to the body
    #[must_use]
    pub fn with_flash(mut self, category: &str, message: &str) -> Self {
        let body = self.body;
        self.append(
            body,
            DomElement::new("div")
                .with_class("flash-message")
                .with_class(category)
                .with_text(message),
        );
        self
    }

    /// Adds the result section shown after a QR code was generated
    #[must_use]
    pub fn with_result(mut self, shortlink: &str) -> Self {
        let body = self.body;
        self.append(
            body,
            DomElement::new("div")
                .with_id("result")
                .with_child(DomElement::new("img").with_id("qr-image"))
                .with_child(DomElement::new("span").with_class("shortlink").with_text(shortlink))
                .with_child(
                    DomElement::new("form")
                        .with_id("download-form")
                        .with_attr("action", "/download"),
                ),
        );
        self
    }

    /// Sets how share requests are answered
    pub fn set_share_support(&mut self, support: ShareSupport) {
        self.share_support = support;
    }

    /// Id of the body element
    #[must_use]
    pub fn body_id(&self) -> NodeId {
        self.body
    }

    /// Inserts an element tree under `parent`, returning the new root's id
    pub fn append(&mut self, parent: NodeId, mut element: DomElement) -> NodeId {
        let children = std::mem::take(&mut element.children);
        let id = self.allocate(element);
        self.attach(parent, id);
        for child in children {
            self.append(id, child);
        }
        id
    }

    /// Gets an element by node id
    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<&DomElement> {
        self.nodes.get(&node).map(|n| &n.element)
    }

    /// Gets an element by node id, mutably
    pub fn element_mut(&mut self, node: NodeId) -> Option<&mut DomElement> {
        self.nodes.get_mut(&node).map(|n| &mut n.element)
    }

    /// Child node ids in order
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Inline style property of a node
    #[must_use]
    pub fn style_of(&self, node: NodeId, property: &str) -> Option<&str> {
        self.element(node).and_then(|e| e.style(property))
    }

    /// Number of attached elements matching a selector
    #[must_use]
    pub fn count(&self, selector: &Selector) -> usize {
        self.descendants(self.body)
            .into_iter()
            .filter(|id| self.element(*id).is_some_and(|e| e.matches(selector)))
            .count()
    }

    /// Currently focused node
    #[must_use]
    pub fn focused_element(&self) -> Option<NodeId> {
        self.focused
    }

    /// Every scroll request, oldest first
    #[must_use]
    pub fn scroll_history(&self) -> &[(NodeId, ScrollBlock)] {
        &self.scrolls
    }

    /// Forms submitted programmatically, oldest first
    #[must_use]
    pub fn submitted_forms(&self) -> &[NodeId] {
        &self.submitted
    }

    /// Share requests that reached the share sheet
    #[must_use]
    pub fn shared(&self) -> &[ShareRequest] {
        &self.shared
    }

    fn allocate(&mut self, element: DomElement) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            MockNode {
                element,
                parent: None,
                children: Vec::new(),
            },
        );
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if !self.nodes.contains_key(&parent) {
            return;
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.nodes.get_mut(&child).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.retain(|c| *c != child);
        }
    }

    /// Descendants of `root` in document order, excluding `root`
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }
}

impl Page for MockDom {
    fn body(&mut self) -> NodeId {
        self.body
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn element_by_id(&mut self, id: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .find(|node| self.element(*node).is_some_and(|e| e.id == id))
    }

    fn query_all(&mut self, scope: Option<NodeId>, selector: &Selector) -> Vec<NodeId> {
        let root = scope.unwrap_or(self.body);
        self.descendants(root)
            .into_iter()
            .filter(|node| self.element(*node).is_some_and(|e| e.matches(selector)))
            .collect()
    }

    fn parent(&mut self, node: NodeId) -> Option<NodeId> {
        if node == self.body {
            return None;
        }
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    fn tag_name(&self, node: NodeId) -> Option<String> {
        self.element(node).map(|e| e.tag.clone())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node).and_then(|e| e.get_attr(name))
    }

    fn value(&self, node: NodeId) -> Option<String> {
        self.element(node)
            .filter(|e| e.is_control())
            .map(|e| e.value.clone())
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element.value = value.to_string();
        }
    }

    fn text(&self, node: NodeId) -> Option<String> {
        self.element(node).map(|e| e.text_content.clone())
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.element_mut(node) {
            element.text_content = text.to_string();
        }
    }

    fn set_class_name(&mut self, node: NodeId, class_name: &str) {
        if let Some(element) = self.element_mut(node) {
            element.classes = class_name.split_whitespace().map(String::from).collect();
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            if value.is_empty() {
                element.style.remove(property);
            } else {
                element.style.insert(property.to_string(), value.to_string());
            }
        }
    }

    fn create_element(&mut self, tag: &str) -> WebResult<NodeId> {
        Ok(self.allocate(DomElement::new(tag)))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.attach(parent, child);
    }

    fn remove(&mut self, node: NodeId) {
        if node != self.body {
            self.detach(node);
        }
    }

    fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.body {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn focus(&mut self, node: NodeId) {
        if self.nodes.contains_key(&node) {
            self.focused = Some(node);
        }
    }

    fn scroll_into_view(&mut self, node: NodeId, block: ScrollBlock) {
        self.scrolls.push((node, block));
    }

    fn submit_form(&mut self, form: NodeId) {
        self.submitted.push(form);
    }

    fn share(&mut self, request: &ShareRequest) -> WebResult<()> {
        match self.share_support {
            ShareSupport::Supported => {
                self.shared.push(request.clone());
                Ok(())
            }
            ShareSupport::Unavailable => Err(WebError::ShareUnavailable),
            ShareSupport::Failing => Err(WebError::ShareFailed {
                message: "NotAllowedError".to_string(),
            }),
        }
    }
}
