//! Page abstraction
//!
//! Handlers never talk to the DOM directly; they go through [`Page`]. The
//! browser build implements it on top of `web-sys`, tests use
//! [`MockDom`](crate::wasm::MockDom).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::WebResult;

/// Opaque handle to an element of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Element selector
///
/// A closed subset of CSS, enough for the hooks the form markup exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `tag`
    Tag(String),
    /// `[name="..."]`
    Name(String),
    /// `[attr]`
    HasAttr(String),
    /// `[attr="value"]`
    AttrEquals(String, String),
    /// `[attr^="prefix"]`
    AttrPrefix(String, String),
    /// `a, b, c`
    AnyOf(Vec<Selector>),
}

impl Selector {
    /// Form controls that carry a value
    #[must_use]
    pub fn form_controls() -> Self {
        Self::AnyOf(vec![
            Self::Tag("input".into()),
            Self::Tag("select".into()),
            Self::Tag("textarea".into()),
        ])
    }

    /// In-page anchor links
    #[must_use]
    pub fn anchor_links() -> Self {
        Self::AttrPrefix("href".into(), "#".into())
    }

    /// CSS text of the selector
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Id(id) => format!("#{id}"),
            Self::Class(class) => format!(".{class}"),
            Self::Tag(tag) => tag.clone(),
            Self::Name(name) => format!("[name=\"{name}\"]"),
            Self::HasAttr(attr) => format!("[{attr}]"),
            Self::AttrEquals(attr, value) => format!("[{attr}=\"{value}\"]"),
            Self::AttrPrefix(attr, prefix) => format!("[{attr}^=\"{prefix}\"]"),
            Self::AnyOf(selectors) => selectors
                .iter()
                .map(Selector::to_css)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Vertical alignment for [`Page::scroll_into_view`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    /// Align the element's top with the viewport's top
    Start,
    /// Centre the element in the viewport
    Center,
}

/// Payload handed to the platform share sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRequest {
    /// Share sheet title
    pub title: String,
    /// Accompanying text
    pub text: String,
    /// Link being shared
    pub url: String,
}

/// Kinds of DOM events the front end listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Form submission
    Submit,
    /// Value edited
    Input,
    /// Focus lost
    Blur,
    /// Element clicked
    Click,
    /// Selection committed
    Change,
}

impl EventKind {
    /// DOM event type name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Input => "input",
            Self::Blur => "blur",
            Self::Click => "click",
            Self::Change => "change",
        }
    }
}

/// A DOM event delivered to the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomEvent {
    /// Event type
    pub kind: EventKind,
    /// Element the listener is attached to
    pub target: NodeId,
}

impl DomEvent {
    /// Creates a submit event
    #[must_use]
    pub const fn submit(target: NodeId) -> Self {
        Self {
            kind: EventKind::Submit,
            target,
        }
    }

    /// Creates an input event
    #[must_use]
    pub const fn input(target: NodeId) -> Self {
        Self {
            kind: EventKind::Input,
            target,
        }
    }

    /// Creates a blur event
    #[must_use]
    pub const fn blur(target: NodeId) -> Self {
        Self {
            kind: EventKind::Blur,
            target,
        }
    }

    /// Creates a click event
    #[must_use]
    pub const fn click(target: NodeId) -> Self {
        Self {
            kind: EventKind::Click,
            target,
        }
    }

    /// Creates a change event
    #[must_use]
    pub const fn change(target: NodeId) -> Self {
        Self {
            kind: EventKind::Change,
            target,
        }
    }
}

/// DOM operations the front end needs
///
/// Lookups take `&mut self` because a live page hands out [`NodeId`]s
/// lazily as it first meets an element.
pub trait Page {
    /// The `<body>` element
    fn body(&mut self) -> NodeId;

    /// Path component of the current URL
    fn path(&self) -> String;

    /// Element with the given id
    fn element_by_id(&mut self, id: &str) -> Option<NodeId>;

    /// Descendants of `scope` (or of the body) matching `selector`, in
    /// document order
    fn query_all(&mut self, scope: Option<NodeId>, selector: &Selector) -> Vec<NodeId>;

    /// Parent element, `None` for detached nodes and the body
    fn parent(&mut self, node: NodeId) -> Option<NodeId>;

    /// Lowercase tag name
    fn tag_name(&self, node: NodeId) -> Option<String>;

    /// Attribute value
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Current value of a form control
    fn value(&self, node: NodeId) -> Option<String>;

    /// Replaces the value of a form control
    fn set_value(&mut self, node: NodeId, value: &str);

    /// Text content
    fn text(&self, node: NodeId) -> Option<String>;

    /// Replaces the text content
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Replaces the class attribute
    fn set_class_name(&mut self, node: NodeId, class_name: &str);

    /// Sets an inline style property; an empty value clears it
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    /// Creates a detached element
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Browser`](crate::error::WebError::Browser) when the
    /// document rejects the tag name.
    fn create_element(&mut self, tag: &str) -> WebResult<NodeId>;

    /// Appends `child` as the last child of `parent`
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Detaches a node; detaching an already detached node is a no-op
    fn remove(&mut self, node: NodeId);

    /// Whether the node is currently part of the document
    fn is_attached(&self, node: NodeId) -> bool;

    /// Moves keyboard focus to the node
    fn focus(&mut self, node: NodeId);

    /// Smoothly scrolls the node into view
    fn scroll_into_view(&mut self, node: NodeId, block: ScrollBlock);

    /// Submits a form without firing its submit listeners
    fn submit_form(&mut self, form: NodeId);

    /// Opens the platform share sheet
    ///
    /// # Errors
    ///
    /// Returns [`WebError::ShareUnavailable`](crate::error::WebError::ShareUnavailable)
    /// when the browser has no share API, or
    /// [`WebError::ShareFailed`](crate::error::WebError::ShareFailed) when it
    /// refused the request.
    fn share(&mut self, request: &ShareRequest) -> WebResult<()>;

    /// Nearest `<form>` ancestor
    fn closest_form(&mut self, node: NodeId) -> Option<NodeId> {
        let mut current = self.parent(node);
        while let Some(candidate) = current {
            if self.tag_name(candidate).as_deref() == Some("form") {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// First match of [`Page::query_all`]
    fn query_first(&mut self, scope: Option<NodeId>, selector: &Selector) -> Option<NodeId> {
        self.query_all(scope, selector).into_iter().next()
    }
}
