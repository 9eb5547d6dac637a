//! Property-based tests for validation, autofill, decoration and timing

use proptest::prelude::*;
use qrweaver_web::prelude::*;
use qrweaver_web::ui::FIELD_ERROR_CLASS;

// ===== Strategy definitions =====

fn platform_strategy() -> impl Strategy<Value = Platform> {
    prop_oneof![
        Just(Platform::Facebook),
        Just(Platform::Instagram),
        Just(Platform::LinkedIn),
        Just(Platform::Home),
    ]
}

fn social_platform_strategy() -> impl Strategy<Value = Platform> {
    prop_oneof![
        Just(Platform::Facebook),
        Just(Platform::Instagram),
        Just(Platform::LinkedIn),
    ]
}

/// Bare usernames: no dots, no scheme, no '@'
fn username_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,24}"
}

/// Arbitrary text without any '.'
fn dot_free_strategy() -> impl Strategy<Value = String> {
    "[^.]{0,40}"
}

fn validation_strategy() -> impl Strategy<Value = Validation> {
    prop_oneof![
        Just(Validation::valid()),
        "[a-zA-Z ]{1,20}".prop_map(Validation::invalid),
    ]
}

// ===== Field Validator =====

proptest! {
    /// Blank values never fail platform validation
    #[test]
    fn prop_blank_is_valid(platform in platform_strategy(), spaces in " {0,8}") {
        prop_assert!(FieldValidator::new().validate(&spaces, platform).valid);
    }

    /// Anything without a '.' passes on every platform
    #[test]
    fn prop_dot_free_is_valid(platform in platform_strategy(), value in dot_free_strategy()) {
        prop_assert!(FieldValidator::new().validate(&value, platform).valid);
    }

    /// The home page never validates
    #[test]
    fn prop_home_accepts_everything(value in ".{0,60}") {
        prop_assert!(FieldValidator::new().validate(&value, Platform::Home).valid);
    }

    /// Invalid results always carry the platform's message
    #[test]
    fn prop_invalid_has_message(platform in social_platform_strategy(), host in "[a-z]{3,10}\\.org") {
        let result = FieldValidator::new().validate(&host, platform);
        prop_assert!(!result.valid);
        prop_assert!(!result.message().is_empty());
    }

    /// Required-ness is exactly "not blank after trimming"
    #[test]
    fn prop_require_matches_trim(value in ".{0,30}") {
        let result = FieldValidator::new().require(&value);
        prop_assert_eq!(result.valid, !value.trim().is_empty());
    }
}

// ===== Autofill Formatter =====

proptest! {
    /// Canonical URLs are left alone on the next keystroke
    #[test]
    fn prop_canonicalize_is_idempotent(platform in social_platform_strategy(), name in username_strategy()) {
        let url = canonicalize(platform, &name).unwrap();
        prop_assert_eq!(canonicalize(platform, &url), None);
    }

    /// A canonicalized username always validates
    #[test]
    fn prop_canonical_url_validates(platform in social_platform_strategy(), name in username_strategy()) {
        let url = canonicalize(platform, &name).unwrap();
        prop_assert!(FieldValidator::new().validate(&url, platform).valid);
    }

    /// Leading '@' never survives into a Facebook or Instagram URL
    #[test]
    fn prop_at_sign_stripped(name in username_strategy()) {
        for platform in [Platform::Facebook, Platform::Instagram] {
            let url = canonicalize(platform, &format!("@{name}")).unwrap();
            prop_assert!(!url.contains('@'));
            prop_assert!(url.ends_with(&name));
        }
    }

    /// Instagram fills an empty display name with the handle
    #[test]
    fn prop_instagram_display_name(name in username_strategy()) {
        let filled = autofill(Platform::Instagram, &name, Some(""));
        prop_assert_eq!(filled.display_name, Some(format!("@{name}")));

        let kept = autofill(Platform::Instagram, &name, Some("Someone"));
        prop_assert_eq!(kept.display_name, None);
    }

    /// The home page has no autofill
    #[test]
    fn prop_home_autofill_is_noop(value in ".{0,40}") {
        prop_assert!(autofill(Platform::Home, &value, Some("")).is_noop());
    }
}

// ===== Autosave keys =====

proptest! {
    /// Keys are `<form>-<field>`, falling back to the default prefix
    #[test]
    fn prop_autosave_key_shape(form in "[a-z-]{0,12}", field in "[a-z_]{1,12}") {
        let key = autosave_key(Some(&form), "default-form", &field);
        let expected_prefix = if form.is_empty() { "default-form" } else { form.as_str() };
        prop_assert_eq!(key, format!("{expected_prefix}-{field}"));
    }
}

// ===== Field Decorator =====

proptest! {
    /// Any sequence of decorations leaves at most one error node
    #[test]
    fn prop_decorator_never_duplicates(steps in prop::collection::vec(validation_strategy(), 1..12)) {
        let mut dom = MockDom::social_form(Platform::Facebook);
        let field = dom.element_by_id("profile_url").unwrap();
        for step in &steps {
            decorate(&mut dom, field, step);
        }
        let errors = dom.count(&Selector::Class(FIELD_ERROR_CLASS.into()));
        let last_invalid = steps.last().is_some_and(|v| !v.valid);
        prop_assert_eq!(errors, usize::from(last_invalid));
    }
}

// ===== Notification Center =====

proptest! {
    /// Nodes stay up for `visible + fade` ms and not a millisecond longer
    #[test]
    fn prop_notification_lifetime(visible in 1u32..10_000, fade in 1u32..2_000) {
        let timing = NotificationTiming { visible_ms: visible, fade_ms: fade };
        let config = UiConfig { notification: timing, ..UiConfig::default() };
        let mut app = App::boot_with_config(
            MockDom::new(),
            SimulatedClock::new(),
            MemoryStore::new(),
            config,
        );
        let node = app.notify("hi", Severity::Info).unwrap();

        app.fast_forward_ms(u64::from(timing.total_ms()) - 1);
        prop_assert!(app.page().is_attached(node));
        prop_assert_eq!(app.page().style_of(node, "opacity"), Some("0"));

        app.fast_forward_ms(1);
        prop_assert!(!app.page().is_attached(node));
    }
}
