//! Browser bindings
//!
//! Runs [`App`] against the live document: element handles come from a
//! registry, timers from `setTimeout`, autosave from `localStorage` and
//! sharing from `navigator.share`. Every DOM listener the handler table asks
//! for is attached here and kept alive by the returned [`QrWeaver`].

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use js_sys::{Function, Object, Promise, Reflect};
use tracing::{debug, warn, Level};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_wasm::{WASMLayer, WASMLayerConfigBuilder};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    console, Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use super::registry::HandleRegistry;
use super::storage::LocalStorage;
use crate::bootstrap::{App, ShareOutcome};
use crate::error::{WebError, WebResult};
use crate::page::{DomEvent, NodeId, Page, ScrollBlock, Selector, ShareRequest};
use crate::timers::{TimerTask, Timers};
use crate::ui::Severity;

type BrowserApp = App<BrowserPage, BrowserTimers, LocalStorage>;
type SharedApp = Rc<RefCell<BrowserApp>>;

/// Best-effort text of a thrown JS value
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}

fn browser_error(value: &JsValue) -> WebError {
    WebError::Browser {
        message: js_message(value),
    }
}

fn is_abort(value: &JsValue) -> bool {
    value
        .dyn_ref::<web_sys::DomException>()
        .is_some_and(|err| err.name() == "AbortError")
}

/// Runs `f` on the app if it is still alive and not already running
///
/// Synchronous DOM side effects (a `focus()` firing `blur`) re-enter while
/// a handler holds the app; those nested events are dropped.
fn with_app(app: &Weak<RefCell<BrowserApp>>, f: impl FnOnce(&mut BrowserApp)) {
    let Some(app) = app.upgrade() else {
        return;
    };
    match app.try_borrow_mut() {
        Ok(mut app) => f(&mut app),
        Err(_) => debug!("front end busy, dropping nested callback"),
    }
}

fn same_node(known: &Element, candidate: &Element) -> bool {
    let node: &web_sys::Node = candidate;
    known.is_same_node(Some(node))
}

/// [`Page`] over the live document
///
/// Elements are registered the first time a lookup returns them. They keep
/// their [`NodeId`] until [`Page::remove`] takes them off the page, which
/// frees the id for reuse.
pub struct BrowserPage {
    window: Window,
    document: Document,
    elements: HandleRegistry<Element>,
    app: Weak<RefCell<BrowserApp>>,
}

impl BrowserPage {
    fn new(window: Window, document: Document, body: Element, app: Weak<RefCell<BrowserApp>>) -> Self {
        Self {
            window,
            document,
            elements: HandleRegistry::new(body),
            app,
        }
    }

    fn register(&mut self, element: Element) -> NodeId {
        self.elements.register(element, same_node)
    }

    fn get(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node)
    }

    fn html(&self, node: NodeId) -> Option<&HtmlElement> {
        self.get(node)?.dyn_ref::<HtmlElement>()
    }

    /// The element behind a handle
    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<Element> {
        self.get(node).cloned()
    }
}

impl fmt::Debug for BrowserPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserPage")
            .field("elements", &self.elements.live())
            .finish_non_exhaustive()
    }
}

impl Page for BrowserPage {
    fn body(&mut self) -> NodeId {
        NodeId(0)
    }

    fn path(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn element_by_id(&mut self, id: &str) -> Option<NodeId> {
        let element = self.document.get_element_by_id(id)?;
        Some(self.register(element))
    }

    fn query_all(&mut self, scope: Option<NodeId>, selector: &Selector) -> Vec<NodeId> {
        let Some(root) = self.element(scope.unwrap_or(NodeId(0))) else {
            return Vec::new();
        };
        let list = match root.query_selector_all(&selector.to_css()) {
            Ok(list) => list,
            Err(err) => {
                warn!(%selector, err = %js_message(&err), "selector rejected");
                return Vec::new();
            }
        };
        let found: Vec<Element> = (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect();
        found.into_iter().map(|element| self.register(element)).collect()
    }

    fn parent(&mut self, node: NodeId) -> Option<NodeId> {
        if node == NodeId(0) {
            return None;
        }
        let parent = self.get(node)?.parent_element()?;
        Some(self.register(parent))
    }

    fn tag_name(&self, node: NodeId) -> Option<String> {
        Some(self.get(node)?.tag_name().to_lowercase())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.get(node)?.get_attribute(name)
    }

    fn value(&self, node: NodeId) -> Option<String> {
        let element = self.get(node)?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            return Some(area.value());
        }
        element.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        let Some(element) = self.get(node) else {
            return;
        };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    fn text(&self, node: NodeId) -> Option<String> {
        self.get(node)?.text_content()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.get(node) {
            element.set_text_content(Some(text));
        }
    }

    fn set_class_name(&mut self, node: NodeId, class_name: &str) {
        if let Some(element) = self.get(node) {
            element.set_class_name(class_name);
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Some(element) = self.html(node) else {
            return;
        };
        let style = element.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if let Err(err) = result {
            debug!(property, err = %js_message(&err), "style rejected");
        }
    }

    fn create_element(&mut self, tag: &str) -> WebResult<NodeId> {
        let element = self
            .document
            .create_element(tag)
            .map_err(|err| browser_error(&err))?;
        Ok(self.register(element))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let (Some(parent), Some(child)) = (self.get(parent), self.get(child)) else {
            return;
        };
        if let Err(err) = parent.append_child(child) {
            warn!(err = %js_message(&err), "append rejected");
        }
    }

    fn remove(&mut self, node: NodeId) {
        if let Some(element) = self.elements.release(node) {
            element.remove();
        }
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(|element| element.is_connected())
    }

    fn focus(&mut self, node: NodeId) {
        if let Some(element) = self.html(node) {
            if let Err(err) = element.focus() {
                debug!(err = %js_message(&err), "focus rejected");
            }
        }
    }

    fn scroll_into_view(&mut self, node: NodeId, block: ScrollBlock) {
        let Some(element) = self.get(node) else {
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(match block {
            ScrollBlock::Start => ScrollLogicalPosition::Start,
            ScrollBlock::Center => ScrollLogicalPosition::Center,
        });
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn submit_form(&mut self, form: NodeId) {
        let Some(form) = self
            .get(form)
            .and_then(|element| element.dyn_ref::<HtmlFormElement>())
        else {
            return;
        };
        if let Err(err) = form.submit() {
            warn!(err = %js_message(&err), "form submit rejected");
        }
    }

    /// Opens the share sheet
    ///
    /// The sheet answers asynchronously. A later rejection other than the
    /// user dismissing it shows the fallback notification.
    fn share(&mut self, request: &ShareRequest) -> WebResult<()> {
        let navigator = self.window.navigator();
        let share = Reflect::get(&navigator, &JsValue::from_str("share"))
            .map_err(|err| browser_error(&err))?;
        let Some(share) = share.dyn_ref::<Function>() else {
            return Err(WebError::ShareUnavailable);
        };

        let data = Object::new();
        for (key, value) in [
            ("title", &request.title),
            ("text", &request.text),
            ("url", &request.url),
        ] {
            Reflect::set(&data, &JsValue::from_str(key), &JsValue::from_str(value))
                .map_err(|err| browser_error(&err))?;
        }

        let promise: Promise = share
            .call1(&navigator, &data)
            .map_err(|err| WebError::ShareFailed {
                message: js_message(&err),
            })?
            .dyn_into()
            .map_err(|_| WebError::ShareFailed {
                message: "navigator.share did not return a promise".into(),
            })?;

        let app = self.app.clone();
        let url = request.url.clone();
        spawn_local(async move {
            let Err(err) = JsFuture::from(promise).await else {
                return;
            };
            if is_abort(&err) {
                debug!("share sheet dismissed");
                return;
            }
            warn!(err = %js_message(&err), "share rejected, showing the link instead");
            with_app(&app, |app| {
                if let Err(err) = app.share_fallback(&url) {
                    warn!(%err, "could not show share fallback");
                }
            });
        });
        Ok(())
    }
}

/// [`Timers`] on top of `window.setTimeout`
pub struct BrowserTimers {
    window: Window,
    app: Weak<RefCell<BrowserApp>>,
}

impl fmt::Debug for BrowserTimers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserTimers").finish_non_exhaustive()
    }
}

impl Timers for BrowserTimers {
    fn schedule(&mut self, delay_ms: u32, task: TimerTask) {
        let app = self.app.clone();
        let callback = Closure::once_into_js(move || with_app(&app, |app| app.run_timer(task)));
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            warn!(?task, err = %js_message(&err), "could not schedule timer");
        }
    }
}

/// Handle to the booted front end
///
/// Dropping it detaches nothing but frees the listener closures, so keep it
/// alive for the lifetime of the page (e.g. on `window`).
#[wasm_bindgen]
pub struct QrWeaver {
    app: SharedApp,
    _listeners: Vec<Closure<dyn FnMut(Event)>>,
}

impl fmt::Debug for QrWeaver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QrWeaver")
            .field("listeners", &self._listeners.len())
            .finish_non_exhaustive()
    }
}

#[wasm_bindgen]
impl QrWeaver {
    /// Shows a notification; `severity` is `info`, `success`, `warning` or `error`
    pub fn notify(&self, message: &str, severity: &str) -> Result<(), JsError> {
        self.run(|app| app.notify(message, Severity::from_name(severity)).map(|_| ()))
    }

    /// Submits the download form of the generated QR code
    pub fn download(&self) -> Result<(), JsError> {
        self.run(|app| app.download().map(|_| ()))
    }

    /// Shares the shortlink; `false` means the link was shown instead
    pub fn share(&self) -> Result<bool, JsError> {
        self.run(|app| app.share().map(|outcome| outcome == ShareOutcome::Shared))
    }

    /// Validates the field with the given id; `true` when it passes
    #[wasm_bindgen(js_name = validateField)]
    pub fn validate_field(&self, id: &str) -> Result<bool, JsError> {
        self.run(|app| {
            let field = app
                .page_mut()
                .element_by_id(id)
                .ok_or_else(|| WebError::not_found(format!("#{id}")))?;
            Ok(app.validate_field(field).valid)
        })
    }

    /// Platform detected from the URL
    #[wasm_bindgen(getter)]
    pub fn platform(&self) -> String {
        self.app
            .try_borrow()
            .map(|app| app.platform().to_string())
            .unwrap_or_default()
    }

    fn run<R>(&self, f: impl FnOnce(&mut BrowserApp) -> WebResult<R>) -> Result<R, JsError> {
        let mut app = self
            .app
            .try_borrow_mut()
            .map_err(|_| JsError::new("front end is busy"))?;
        f(&mut app).map_err(|err| JsError::new(&err.to_string()))
    }
}

fn attach_listeners(app: &SharedApp) -> Result<Vec<Closure<dyn FnMut(Event)>>, JsError> {
    let targets: Vec<_> = {
        let app = app.borrow();
        app.table()
            .listeners()
            .into_iter()
            .filter_map(|(kind, node)| Some((kind, node, app.page().element(node)?)))
            .collect()
    };

    let mut closures = Vec::with_capacity(targets.len());
    for (kind, node, element) in targets {
        let weak = Rc::downgrade(app);
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            with_app(&weak, |app| {
                if app.dispatch(&DomEvent { kind, target: node }).prevent_default {
                    event.prevent_default();
                }
            });
        });
        element
            .add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())
            .map_err(|err| JsError::new(&js_message(&err)))?;
        closures.push(closure);
    }
    Ok(closures)
}

/// Wires the front end into the current document
///
/// Call once the DOM is parsed (module scripts already run then).
#[wasm_bindgen]
pub fn boot() -> Result<QrWeaver, JsError> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsError::new("window has no document"))?;
    let body: Element = document
        .body()
        .ok_or_else(|| JsError::new("document has no body"))?
        .into();
    let store = LocalStorage::open(&window);
    if !store.is_available() {
        warn!("localStorage unavailable, autosave disabled");
    }

    let app: SharedApp = Rc::new_cyclic(|weak| {
        let page = BrowserPage::new(window.clone(), document, body, weak.clone());
        let timers = BrowserTimers {
            window,
            app: weak.clone(),
        };
        RefCell::new(App::boot(page, timers, store))
    });
    let listeners = attach_listeners(&app)?;

    console::log_1(
        &format!(
            "qrweaver ready on {} ({} listeners)",
            app.borrow().platform(),
            listeners.len()
        )
        .into(),
    );
    Ok(QrWeaver {
        app,
        _listeners: listeners,
    })
}

/// Installs the panic hook and routes `tracing` events to the console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    init_logging();
}

fn init_logging() {
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let config = WASMLayerConfigBuilder::new()
        .set_max_level(level)
        .set_report_logs_in_timings(false)
        .build();
    if let Err(err) = tracing_subscriber::registry()
        .with(WASMLayer::new(config))
        .try_init()
    {
        console::warn_1(&format!("qrweaver logging not installed: {err}").into());
    }
}
