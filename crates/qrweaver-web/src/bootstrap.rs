//! Page bootstrapper
//!
//! [`App::boot`] inspects the page once and records every listener it needs
//! in a [`HandlerTable`]. Afterwards all work is event driven: the host
//! (the browser glue or a test) feeds [`DomEvent`]s to [`App::dispatch`] and
//! due timers to [`App::run_timer`].

use tracing::{debug, info, warn};

use crate::config::UiConfig;
use crate::core::autofill::autofill;
use crate::core::autosave::{autosave_key, KeyValueStore};
use crate::core::style::StylePreset;
use crate::core::validator::{FieldValidator, Validation};
use crate::core::Platform;
use crate::error::{WebError, WebResult};
use crate::page::{DomEvent, EventKind, NodeId, Page, ScrollBlock, Selector, ShareRequest};
use crate::timers::{SimulatedClock, TimerTask, Timers};
use crate::ui::{decorate, error_message, NotificationCenter, Severity};
use crate::wasm::MockDom;

/// What a listener does when its event fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handler {
    /// Block the submit while required fields are blank
    RequireFields,
    /// Rewrite the profile field for a platform
    Autofill(Platform),
    /// Validate the field and show or clear its error
    ValidateField,
    /// Persist the field's value under a key
    Autosave {
        /// Autosave key of the field
        key: String,
    },
    /// Smooth-scroll to an in-page target instead of jumping
    SmoothScroll {
        /// Id of the target element
        target: String,
    },
    /// Copy the button's example text into the QR data field
    FillExample,
    /// Log the chosen style preset
    StylePreview,
}

/// One listener: an event kind on an element and what it does
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Event type
    pub kind: EventKind,
    /// Element the listener is attached to
    pub target: NodeId,
    /// Work to run
    pub handler: Handler,
}

/// Event-to-handler registration table
///
/// Handlers for the same element and event run in registration order.
#[derive(Debug, Clone, Default)]
pub struct HandlerTable {
    bindings: Vec<Binding>,
}

impl HandlerTable {
    /// Creates an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding
    pub fn register(&mut self, kind: EventKind, target: NodeId, handler: Handler) {
        self.bindings.push(Binding {
            kind,
            target,
            handler,
        });
    }

    /// Handlers bound to an event on an element
    pub fn handlers(&self, kind: EventKind, target: NodeId) -> impl Iterator<Item = &Handler> {
        self.bindings
            .iter()
            .filter(move |b| b.kind == kind && b.target == target)
            .map(|b| &b.handler)
    }

    /// Distinct `(event, element)` pairs that need a DOM listener
    #[must_use]
    pub fn listeners(&self) -> Vec<(EventKind, NodeId)> {
        let mut out: Vec<(EventKind, NodeId)> = Vec::new();
        for binding in &self.bindings {
            let pair = (binding.kind, binding.target);
            if !out.contains(&pair) {
                out.push(pair);
            }
        }
        out
    }

    /// All bindings in registration order
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Number of bindings
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Result of dispatching an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// Whether the browser's default action must be cancelled
    pub prevent_default: bool,
}

/// How a share request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The share sheet accepted the link
    Shared,
    /// Sharing was not possible; the link was shown in a notification
    FellBack,
}

/// The wired-up front end of one page
#[derive(Debug)]
pub struct App<P, T, S> {
    page: P,
    timers: T,
    store: S,
    config: UiConfig,
    platform: Platform,
    table: HandlerTable,
    notifications: NotificationCenter,
    validator: FieldValidator,
    selected_style: Option<StylePreset>,
}

impl<P: Page, T: Timers, S: KeyValueStore> App<P, T, S> {
    /// Boots with configuration read from the page
    pub fn boot(mut page: P, timers: T, store: S) -> Self {
        let config = UiConfig::from_page(&mut page);
        Self::boot_with_config(page, timers, store, config)
    }

    /// Boots with an explicit configuration
    pub fn boot_with_config(mut page: P, timers: T, store: S, config: UiConfig) -> Self {
        let platform = Platform::from_path(&page.path());
        let mut app = Self {
            notifications: NotificationCenter::new(config.notification, &config.flash_class),
            validator: FieldValidator::with_messages(config.messages.clone()),
            page,
            timers,
            store,
            config,
            platform,
            table: HandlerTable::new(),
            selected_style: None,
        };

        app.wire_examples();
        app.wire_style_preview();
        app.wire_submit_validation();
        app.wire_autofill();
        app.wire_field_validation();
        app.dismiss_flash_messages();
        app.wire_anchor_links();
        app.restore_and_wire_autosave();

        info!(
            platform = %app.platform,
            bindings = app.table.len(),
            "form front end ready"
        );
        app
    }

    /// Runs every handler bound to the event
    pub fn dispatch(&mut self, event: &DomEvent) -> EventOutcome {
        let handlers: Vec<Handler> = self
            .table
            .handlers(event.kind, event.target)
            .cloned()
            .collect();

        let mut outcome = EventOutcome::default();
        for handler in handlers {
            outcome.prevent_default |= self.run_handler(&handler, event.target);
        }
        outcome
    }

    /// Runs a due timer task
    pub fn run_timer(&mut self, task: TimerTask) {
        self.notifications
            .run(&mut self.page, &mut self.timers, task);
    }

    /// Shows a transient notification
    ///
    /// # Errors
    ///
    /// Fails only if the page cannot create the overlay element.
    pub fn notify(&mut self, message: &str, severity: Severity) -> WebResult<NodeId> {
        self.notifications
            .notify(&mut self.page, &mut self.timers, message, severity)
    }

    fn notify_or_log(&mut self, message: &str, severity: Severity) {
        if let Err(err) = self.notify(message, severity) {
            warn!(%err, text = message, "could not show notification");
        }
    }

    /// Validates one field against the platform and updates its error state
    pub fn validate_field(&mut self, field: NodeId) -> Validation {
        let value = self.page.value(field).unwrap_or_default();
        let result = self.validator.validate(&value, self.platform);
        decorate(&mut self.page, field, &result);
        result
    }

    /// Submits the download form of the generated QR code
    ///
    /// # Errors
    ///
    /// Returns [`WebError::ElementNotFound`] (after notifying the user) when
    /// the page has no download form.
    pub fn download(&mut self) -> WebResult<NodeId> {
        let id = self.config.download_form_id.clone();
        let Some(form) = self.page.element_by_id(&id) else {
            let message = self.config.messages.download_missing.clone();
            self.notify_or_log(&message, Severity::Error);
            return Err(WebError::not_found(format!("#{id}")));
        };
        self.page.submit_form(form);
        Ok(form)
    }

    /// Shares the generated shortlink
    ///
    /// Falls back to a notification with the link when the share sheet is
    /// unavailable or fails. There is no retry.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::ElementNotFound`] (after notifying the user) when
    /// the page has no shortlink, or the overlay error if even the fallback
    /// notification could not be shown.
    pub fn share(&mut self) -> WebResult<ShareOutcome> {
        let selector = Selector::Class(self.config.shortlink_class.clone());
        let url = self
            .page
            .query_first(None, &selector)
            .and_then(|node| self.page.text(node))
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        let Some(url) = url else {
            let message = self.config.messages.share_missing.clone();
            self.notify_or_log(&message, Severity::Error);
            return Err(WebError::not_found(selector.to_css()));
        };

        let request = ShareRequest {
            title: self.config.messages.share_title.clone(),
            text: self.config.messages.share_text.clone(),
            url,
        };
        match self.page.share(&request) {
            Ok(()) => Ok(ShareOutcome::Shared),
            Err(err) => {
                warn!(%err, "share sheet unavailable, showing the link instead");
                self.share_fallback(&request.url)?;
                Ok(ShareOutcome::FellBack)
            }
        }
    }

    /// Shows the link in a notification when sharing did not work
    ///
    /// # Errors
    ///
    /// Fails only if the page cannot create the overlay element.
    pub fn share_fallback(&mut self, url: &str) -> WebResult<NodeId> {
        let message = self.config.messages.share_fallback_for(url);
        self.notify(&message, Severity::Info)
    }

    /// The page
    pub fn page(&self) -> &P {
        &self.page
    }

    /// The page, mutably
    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// The timer backend
    pub fn timers(&self) -> &T {
        &self.timers
    }

    /// The autosave store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Configuration in use
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Platform detected at boot
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Listener registrations
    pub fn table(&self) -> &HandlerTable {
        &self.table
    }

    /// Style preset last chosen in the style select
    pub fn selected_style(&self) -> Option<StylePreset> {
        self.selected_style
    }

    fn wire_examples(&mut self) {
        let selector = Selector::Class(self.config.example_button_class.clone());
        for button in self.page.query_all(None, &selector) {
            self.table
                .register(EventKind::Click, button, Handler::FillExample);
        }
    }

    fn wire_style_preview(&mut self) {
        if let Some(select) = self.page.element_by_id(&self.config.style_select_id) {
            self.table
                .register(EventKind::Change, select, Handler::StylePreview);
        }
    }

    fn wire_submit_validation(&mut self) {
        for form in self.page.query_all(None, &Selector::Tag("form".into())) {
            self.table
                .register(EventKind::Submit, form, Handler::RequireFields);
        }
    }

    fn wire_autofill(&mut self) {
        if !self.platform.has_autofill() {
            return;
        }
        let selector = Selector::Name(self.config.profile_field.clone());
        if let Some(field) = self.page.query_first(None, &selector) {
            self.table
                .register(EventKind::Input, field, Handler::Autofill(self.platform));
        }
    }

    fn wire_field_validation(&mut self) {
        let selector = Selector::AnyOf(vec![
            Selector::AttrEquals("type".into(), "url".into()),
            Selector::Name(self.config.profile_field.clone()),
        ]);
        for field in self.page.query_all(None, &selector) {
            self.table
                .register(EventKind::Blur, field, Handler::ValidateField);
        }
    }

    fn dismiss_flash_messages(&mut self) {
        let selector = Selector::Class(self.config.flash_class.clone());
        for message in self.page.query_all(None, &selector) {
            self.notifications.dismiss_later(&mut self.timers, message);
        }
    }

    fn wire_anchor_links(&mut self) {
        for link in self.page.query_all(None, &Selector::anchor_links()) {
            let Some(href) = self.page.attribute(link, "href") else {
                continue;
            };
            let target = href.trim_start_matches('#');
            if target.is_empty() {
                continue;
            }
            self.table.register(
                EventKind::Click,
                link,
                Handler::SmoothScroll {
                    target: target.to_string(),
                },
            );
        }
    }

    fn restore_and_wire_autosave(&mut self) {
        for form in self.page.query_all(None, &Selector::Tag("form".into())) {
            let form_id = self.page.attribute(form, "id");
            for field in self.page.query_all(Some(form), &Selector::form_controls()) {
                let Some(name) = self.page.attribute(field, "name").filter(|n| !n.is_empty())
                else {
                    continue;
                };
                // Browsers refuse scripted values on file inputs.
                if self.page.attribute(field, "type").as_deref() == Some("file") {
                    continue;
                }

                let key = autosave_key(form_id.as_deref(), &self.config.default_form_id, &name);
                match self.store.get(&key) {
                    Ok(Some(saved)) if !saved.is_empty() => self.page.set_value(field, &saved),
                    Ok(_) => {}
                    Err(err) => warn!(%err, %key, "could not restore field"),
                }
                self.table
                    .register(EventKind::Input, field, Handler::Autosave { key });
            }
        }
    }

    fn run_handler(&mut self, handler: &Handler, target: NodeId) -> bool {
        match handler {
            Handler::RequireFields => self.check_required(target),
            Handler::Autofill(platform) => {
                self.apply_autofill(*platform, target);
                false
            }
            Handler::ValidateField => {
                self.validate_field(target);
                false
            }
            Handler::Autosave { key } => {
                let value = self.page.value(target).unwrap_or_default();
                if let Err(err) = self.store.set(key, &value) {
                    warn!(%err, %key, "autosave failed");
                }
                false
            }
            Handler::SmoothScroll { target: id } => match self.page.element_by_id(id) {
                Some(node) => {
                    self.page.scroll_into_view(node, ScrollBlock::Start);
                    true
                }
                None => false,
            },
            Handler::FillExample => {
                self.fill_example(target);
                false
            }
            Handler::StylePreview => {
                let value = self.page.value(target).unwrap_or_default();
                if let Some(preset) = StylePreset::from_value(&value) {
                    info!(
                        style = preset.display_name(),
                        color = preset.primary(),
                        "style selected"
                    );
                    self.selected_style = Some(preset);
                }
                false
            }
        }
    }

    fn check_required(&mut self, form: NodeId) -> bool {
        let required = self
            .page
            .query_all(Some(form), &Selector::HasAttr("required".into()));

        let mut first_missing: Option<(NodeId, Option<String>)> = None;
        for field in required {
            let value = self.page.value(field).unwrap_or_default();
            let result = self.validator.require(&value);
            if result.valid {
                // Filled fields only lose the error this check put there
                let shown = error_message(&mut self.page, field);
                if shown.as_deref() == Some(self.config.messages.required_field.as_str()) {
                    decorate(&mut self.page, field, &result);
                }
                continue;
            }
            decorate(&mut self.page, field, &result);
            if first_missing.is_none() {
                first_missing = Some((field, self.page.attribute(field, "name")));
            }
        }

        let Some((field, name)) = first_missing else {
            return false;
        };
        let message = if name.as_deref() == Some(self.config.qr_data_field.as_str()) {
            self.config.messages.qr_data_required.clone()
        } else {
            self.config.messages.required_summary.clone()
        };
        debug!(%form, "submit blocked by blank required fields");
        self.notify_or_log(&message, Severity::Error);
        self.page.focus(field);
        true
    }

    fn apply_autofill(&mut self, platform: Platform, field: NodeId) {
        let value = self.page.value(field).unwrap_or_default();
        let scope = self.page.closest_form(field);
        let display_selector = Selector::Name(self.config.display_name_field.clone());
        let display = self.page.query_first(scope, &display_selector);
        let display_value = display.map(|node| self.page.value(node).unwrap_or_default());

        let result = autofill(platform, &value, display_value.as_deref());
        if let (Some(node), Some(name)) = (display, result.display_name) {
            self.page.set_value(node, &name);
        }
        if let Some(url) = result.profile_url {
            self.page.set_value(field, &url);
        }
    }

    fn fill_example(&mut self, button: NodeId) {
        let Some(example) = self.page.attribute(button, "data-example") else {
            return;
        };
        let Some(target) = self.page.element_by_id(&self.config.qr_data_field) else {
            return;
        };
        self.page.set_value(target, &example);
        self.page.scroll_into_view(target, ScrollBlock::Center);
        self.page.focus(target);
    }
}

impl<P: Page, S: KeyValueStore> App<P, SimulatedClock, S> {
    /// Advances simulated time, running every timer that falls due
    pub fn fast_forward_ms(&mut self, ms: u64) {
        let until = self.timers.now_ms() + ms;
        while let Some(task) = self.timers.pop_due(until) {
            self.run_timer(task);
        }
        self.timers.set_now_ms(until);
    }
}

impl<T: Timers, S: KeyValueStore> App<MockDom, T, S> {
    /// Types a full value into a field and fires `input`
    pub fn type_into(&mut self, field: NodeId, value: &str) -> EventOutcome {
        self.page.set_value(field, value);
        self.dispatch(&DomEvent::input(field))
    }

    /// Moves focus away from a field
    pub fn blur(&mut self, field: NodeId) -> EventOutcome {
        self.dispatch(&DomEvent::blur(field))
    }

    /// Clicks an element
    pub fn click(&mut self, target: NodeId) -> EventOutcome {
        self.dispatch(&DomEvent::click(target))
    }

    /// Submits a form through its listeners
    pub fn submit(&mut self, form: NodeId) -> EventOutcome {
        self.dispatch(&DomEvent::submit(form))
    }

    /// Picks an option in a select, firing `input` then `change` like a browser
    pub fn select(&mut self, select: NodeId, value: &str) -> EventOutcome {
        self.page.set_value(select, value);
        let input = self.dispatch(&DomEvent::input(select));
        let change = self.dispatch(&DomEvent::change(select));
        EventOutcome {
            prevent_default: input.prevent_default || change.prevent_default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::autosave::MemoryStore;
    use crate::ui::FIELD_ERROR_CLASS;
    use crate::wasm::{DomElement, ShareSupport};

    type TestApp = App<MockDom, SimulatedClock, MemoryStore>;

    fn boot(dom: MockDom) -> TestApp {
        App::boot(dom, SimulatedClock::new(), MemoryStore::new())
    }

    fn id(app: &mut TestApp, id: &str) -> NodeId {
        app.page_mut().element_by_id(id).unwrap()
    }

    fn value(app: &TestApp, node: NodeId) -> String {
        app.page().value(node).unwrap_or_default()
    }

    // ===== HandlerTable =====

    #[test]
    fn test_table_handlers_in_order() {
        let mut table = HandlerTable::new();
        let node = NodeId(1);
        table.register(EventKind::Input, node, Handler::Autofill(Platform::Facebook));
        table.register(EventKind::Input, node, Handler::Autosave { key: "k".into() });
        table.register(EventKind::Blur, node, Handler::ValidateField);

        let input: Vec<&Handler> = table.handlers(EventKind::Input, node).collect();
        assert_eq!(input.len(), 2);
        assert_eq!(input[0], &Handler::Autofill(Platform::Facebook));
        assert_eq!(table.listeners(), vec![(EventKind::Input, node), (EventKind::Blur, node)]);
        assert_eq!(table.handlers(EventKind::Click, node).count(), 0);
    }

    #[test]
    fn test_table_empty() {
        let table = HandlerTable::new();
        assert!(table.is_empty());
        assert!(table.listeners().is_empty());
    }

    // ===== Boot =====

    #[test]
    fn test_boot_detects_platform() {
        assert_eq!(boot(MockDom::social_form(Platform::Instagram)).platform(), Platform::Instagram);
        assert_eq!(boot(MockDom::generator_page()).platform(), Platform::Home);
    }

    #[test]
    fn test_boot_social_bindings() {
        let mut app = boot(MockDom::social_form(Platform::Facebook));
        let form = id(&mut app, "social-form");
        let profile = id(&mut app, "profile_url");
        let table = app.table();

        assert_eq!(
            table.handlers(EventKind::Submit, form).collect::<Vec<_>>(),
            vec![&Handler::RequireFields]
        );
        assert_eq!(
            table.handlers(EventKind::Input, profile).collect::<Vec<_>>(),
            vec![
                &Handler::Autofill(Platform::Facebook),
                &Handler::Autosave {
                    key: "social-form-profile_url".into()
                }
            ]
        );
        assert_eq!(
            table.handlers(EventKind::Blur, profile).collect::<Vec<_>>(),
            vec![&Handler::ValidateField]
        );
    }

    #[test]
    fn test_boot_home_has_no_autofill() {
        let app = boot(MockDom::generator_page());
        assert!(!app
            .table()
            .bindings()
            .iter()
            .any(|b| matches!(b.handler, Handler::Autofill(_))));
    }

    #[test]
    fn test_boot_uses_page_config() {
        let mut dom = MockDom::social_form(Platform::Facebook);
        let body = dom.body_id();
        dom.append(
            body,
            DomElement::new("script")
                .with_id("qrweaver-config")
                .with_text(r#"{"default_form_id": "anon"}"#),
        );
        let app = boot(dom);
        assert_eq!(app.config().default_form_id, "anon");
    }

    // ===== Submit validation =====

    #[test]
    fn test_submit_blocked_when_required_blank() {
        let mut app = boot(MockDom::social_form(Platform::Facebook));
        let form = id(&mut app, "social-form");
        let profile = id(&mut app, "profile_url");

        let outcome = app.submit(form);
        assert!(outcome.prevent_default);
        assert_eq!(app.page().focused_element(), Some(profile));
        assert_eq!(app.page().count(&Selector::Class(FIELD_ERROR_CLASS.into())), 2);

        let notes = app.page().count(&Selector::Class("error".into()));
        assert_eq!(notes, 1);
    }

    #[test]
    fn test_submit_clears_required_error_once_filled() {
        let mut app = boot(MockDom::social_form(Platform::Facebook));
        let form = id(&mut app, "social-form");
        let name = id(&mut app, "display_name");

        assert!(app.submit(form).prevent_default);
        assert_eq!(app.page().count(&Selector::Class(FIELD_ERROR_CLASS.into())), 2);

        app.type_into(name, "Jane");
        assert!(app.submit(form).prevent_default);
        assert_eq!(app.page().count(&Selector::Class(FIELD_ERROR_CLASS.into())), 1);
        assert_eq!(app.page().style_of(name, "border-color"), None);
        assert_eq!(error_message(app.page_mut(), name), None);
    }

    #[test]
    fn test_submit_keeps_blur_error_on_filled_field() {
        let mut app = boot(MockDom::social_form(Platform::LinkedIn));
        let form = id(&mut app, "social-form");
        let profile = id(&mut app, "profile_url");
        app.page_mut().set_value(profile, "linkedin.com/company/acme");
        app.blur(profile);
        let blur_message = error_message(app.page_mut(), profile);
        assert!(blur_message.is_some());

        assert!(app.submit(form).prevent_default);
        assert_eq!(error_message(app.page_mut(), profile), blur_message);
        assert_eq!(app.page().count(&Selector::Class(FIELD_ERROR_CLASS.into())), 2);
    }

    #[test]
    fn test_submit_passes_when_filled() {
        let mut app = boot(MockDom::social_form(Platform::Facebook));
        let form = id(&mut app, "social-form");
        let profile = id(&mut app, "profile_url");
        let name = id(&mut app, "display_name");
        app.page_mut().set_value(profile, "https://facebook.com/jane");
        app.page_mut().set_value(name, "Jane");
        assert!(!app.submit(form).prevent_default);
        assert_eq!(app.page().count(&Selector::Class("flash-message".into())), 0);
    }

    #[test]
    fn test_submit_qr_data_message() {
        let mut app = boot(MockDom::generator_page());
        let form = app
            .page_mut()
            .query_first(None, &Selector::Class("qr-form".into()))
            .unwrap();
        assert!(app.submit(form).prevent_default);
        let note = app
            .page_mut()
            .query_first(None, &Selector::Class("flash-message".into()))
            .unwrap();
        assert_eq!(
            app.page().text(note).as_deref(),
            Some("Моля, въведете данни за QR кода!")
        );
    }

    #[test]
    fn test_url_mismatch_does_not_block_submit() {
        let mut app = boot(MockDom::social_form(Platform::Facebook));
        let form = id(&mut app, "social-form");
        let profile = id(&mut app, "profile_url");
        let name = id(&mut app, "display_name");
        app.page_mut().set_value(profile, "https://example.org");
        app.page_mut().set_value(name, "Jane");
        app.blur(profile);
        assert_eq!(app.page().count(&Selector::Class(FIELD_ERROR_CLASS.into())), 1);
        assert!(!app.submit(form).prevent_default);
    }

    // ===== Autofill =====

    #[test]
    fn test_facebook_autofill_on_input() {
        let mut app = boot(MockDom::social_form(Platform::Facebook));
        let profile = id(&mut app, "profile_url");
        app.type_into(profile, "@jane");
        assert_eq!(value(&app, profile), "https://facebook.com/jane");
    }

    #[test]
    fn test_instagram_autofill_fills_display_name() {
        let mut app = boot(MockDom::social_form(Platform::Instagram));
        let profile = id(&mut app, "profile_url");
        let name = id(&mut app, "display_name");
        app.type_into(profile, "myhandle");
        assert_eq!(value(&app, name), "@myhandle");
        assert_eq!(value(&app, profile), "https://instagram.com/myhandle");
    }

    #[test]
    fn test_instagram_autofill_respects_display_name() {
        let mut app = boot(MockDom::social_form(Platform::Instagram));
        let profile = id(&mut app, "profile_url");
        let name = id(&mut app, "display_name");
        app.page_mut().set_value(name, "Jane");
        app.type_into(profile, "myhandle");
        assert_eq!(value(&app, name), "Jane");
    }

    #[test]
    fn test_linkedin_autofill() {
        let mut app = boot(MockDom::social_form(Platform::LinkedIn));
        let profile = id(&mut app, "profile_url");
        app.type_into(profile, "jane-doe");
        assert_eq!(value(&app, profile), "https://linkedin.com/in/jane-doe");
    }

    // ===== Blur validation / entry points =====

    #[test]
    fn test_blur_validation_round_trip() {
        let mut app = boot(MockDom::social_form(Platform::LinkedIn));
        let profile = id(&mut app, "profile_url");
        app.page_mut().set_value(profile, "linkedin.com/company/acme");
        app.blur(profile);
        assert_eq!(app.page().count(&Selector::Class(FIELD_ERROR_CLASS.into())), 1);

        app.page_mut().set_value(profile, "linkedin.com/in/jane");
        app.blur(profile);
        assert_eq!(app.page().count(&Selector::Class(FIELD_ERROR_CLASS.into())), 0);
    }

    #[test]
    fn test_validate_field_entry_point() {
        let mut app = boot(MockDom::social_form(Platform::Facebook));
        let profile = id(&mut app, "profile_url");
        app.page_mut().set_value(profile, "example.org");
        assert!(!app.validate_field(profile).valid);
        app.page_mut().set_value(profile, "myuser");
        assert!(app.validate_field(profile).valid);
    }

    #[test]
    fn test_download_submits_form() {
        let mut app = boot(MockDom::social_form(Platform::Facebook).with_result("https://s.io/a"));
        let form = app.download().unwrap();
        assert_eq!(app.page().submitted_forms(), &[form]);
    }

    #[test]
    fn test_download_without_result_notifies() {
        let mut app = boot(MockDom::social_form(Platform::Facebook));
        let err = app.download().unwrap_err();
        assert_eq!(err, WebError::not_found("#download-form"));
        assert_eq!(app.page().count(&Selector::Class("error".into())), 1);
    }

    #[test]
    fn test_share_supported() {
        let mut app = boot(MockDom::social_form(Platform::Facebook).with_result(" https://s.io/a "));
        assert_eq!(app.share(), Ok(ShareOutcome::Shared));
        assert_eq!(app.page().shared()[0].url, "https://s.io/a");
    }

    #[test]
    fn test_share_unavailable_falls_back() {
        let mut dom = MockDom::social_form(Platform::Facebook).with_result("https://s.io/a");
        dom.set_share_support(ShareSupport::Unavailable);
        let mut app = boot(dom);
        assert_eq!(app.share(), Ok(ShareOutcome::FellBack));
        let note = app
            .page_mut()
            .query_first(None, &Selector::Class("info".into()))
            .unwrap();
        assert!(app.page().text(note).unwrap().contains("https://s.io/a"));
    }

    #[test]
    fn test_share_failing_falls_back_without_retry() {
        let mut dom = MockDom::social_form(Platform::Facebook).with_result("https://s.io/a");
        dom.set_share_support(ShareSupport::Failing);
        let mut app = boot(dom);
        assert_eq!(app.share(), Ok(ShareOutcome::FellBack));
        assert!(app.page().shared().is_empty());
    }

    #[test]
    fn test_share_without_link() {
        let mut app = boot(MockDom::social_form(Platform::Facebook));
        assert!(matches!(app.share(), Err(WebError::ElementNotFound { .. })));
    }

    // ===== Generator page extras =====

    #[test]
    fn test_example_button_fills_textarea() {
        let mut app = boot(MockDom::generator_page());
        let button = id(&mut app, "example-wifi");
        let textarea = id(&mut app, "qr_data");
        app.click(button);
        assert_eq!(value(&app, textarea), "WIFI:T:WPA;S:MyNetwork;P:password;;");
        assert_eq!(app.page().focused_element(), Some(textarea));
        assert_eq!(app.page().scroll_history(), &[(textarea, ScrollBlock::Center)]);
    }

    #[test]
    fn test_anchor_link_smooth_scrolls() {
        let mut app = boot(MockDom::generator_page());
        let link = id(&mut app, "nav-generator");
        let section = id(&mut app, "generator");
        assert!(app.click(link).prevent_default);
        assert_eq!(app.page().scroll_history(), &[(section, ScrollBlock::Start)]);
    }

    #[test]
    fn test_anchor_link_without_target_is_left_alone() {
        let mut dom = MockDom::new();
        let body = dom.body_id();
        let link = dom.append(body, DomElement::new("a").with_attr("href", "#missing"));
        let mut app = boot(dom);
        assert!(!app.click(link).prevent_default);
    }

    #[test]
    fn test_style_preview() {
        let mut app = boot(MockDom::generator_page());
        let select = id(&mut app, "style");
        app.select(select, "vibrant");
        assert_eq!(app.selected_style(), Some(StylePreset::Vibrant));
        app.select(select, "unknown");
        assert_eq!(app.selected_style(), Some(StylePreset::Vibrant));
    }

    // ===== Timers =====

    #[test]
    fn test_flash_messages_dismissed() {
        let mut app = boot(MockDom::generator_page().with_flash("error", "Грешка"));
        let flash = app
            .page_mut()
            .query_first(None, &Selector::Class("flash-message".into()))
            .unwrap();
        app.fast_forward_ms(5000);
        assert_eq!(app.page().style_of(flash, "opacity"), Some("0"));
        app.fast_forward_ms(500);
        assert!(!app.page().is_attached(flash));
    }

    #[test]
    fn test_unbound_event_is_noop() {
        let mut app = boot(MockDom::generator_page());
        let outcome = app.dispatch(&DomEvent::click(NodeId(9999)));
        assert_eq!(outcome, EventOutcome::default());
    }
}
