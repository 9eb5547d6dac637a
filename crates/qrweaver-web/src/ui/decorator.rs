//! Inline field errors: red border plus one message node under the parent

use crate::core::validator::Validation;
use crate::page::{NodeId, Page, Selector};

/// Class of the inline error node inserted next to an invalid field
pub const FIELD_ERROR_CLASS: &str = "field-error";

const ERROR_COLOR: &str = "#e53e3e";
const ERROR_SHADOW: &str = "0 0 0 3px rgba(229, 62, 62, 0.1)";

/// Shows or clears a field's error state
///
/// At most one error node exists under the field's parent afterwards, no
/// matter how often this runs. Returns the error node for invalid results.
pub fn decorate<P: Page + ?Sized>(
    page: &mut P,
    field: NodeId,
    validation: &Validation,
) -> Option<NodeId> {
    let parent = page.parent(field);
    if let Some(parent) = parent {
        for stale in page.query_all(Some(parent), &Selector::Class(FIELD_ERROR_CLASS.into())) {
            page.remove(stale);
        }
    }

    if validation.valid {
        page.set_style(field, "border-color", "");
        page.set_style(field, "box-shadow", "");
        return None;
    }

    page.set_style(field, "border-color", ERROR_COLOR);
    page.set_style(field, "box-shadow", ERROR_SHADOW);

    let parent = parent?;
    let error = page.create_element("div").ok()?;
    page.set_class_name(error, FIELD_ERROR_CLASS);
    page.set_text(error, validation.message());
    page.set_style(error, "color", ERROR_COLOR);
    page.set_style(error, "font-size", "0.875rem");
    page.set_style(error, "margin-top", "0.25rem");
    page.append_child(parent, error);
    Some(error)
}

/// Text of the error node currently shown for `field`, if any
pub fn error_message<P: Page + ?Sized>(page: &mut P, field: NodeId) -> Option<String> {
    let parent = page.parent(field)?;
    let error = page.query_first(Some(parent), &Selector::Class(FIELD_ERROR_CLASS.into()))?;
    page.text(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Platform;
    use crate::wasm::MockDom;

    fn error_count(dom: &MockDom) -> usize {
        dom.count(&Selector::Class(FIELD_ERROR_CLASS.into()))
    }

    #[test]
    fn test_invalid_inserts_error_node() {
        let mut dom = MockDom::social_form(Platform::Facebook);
        let field = dom.element_by_id("profile_url").unwrap();
        let error = decorate(&mut dom, field, &Validation::invalid("bad")).unwrap();
        assert_eq!(dom.text(error).as_deref(), Some("bad"));
        assert_eq!(dom.parent(error), dom.parent(field));
        assert_eq!(dom.style_of(field, "border-color"), Some(ERROR_COLOR));
        assert_eq!(dom.style_of(field, "box-shadow"), Some(ERROR_SHADOW));
    }

    #[test]
    fn test_invalid_twice_keeps_one_node() {
        let mut dom = MockDom::social_form(Platform::Facebook);
        let field = dom.element_by_id("profile_url").unwrap();
        decorate(&mut dom, field, &Validation::invalid("first"));
        let second = decorate(&mut dom, field, &Validation::invalid("second")).unwrap();
        assert_eq!(error_count(&dom), 1);
        assert_eq!(dom.text(second).as_deref(), Some("second"));
    }

    #[test]
    fn test_valid_clears_error() {
        let mut dom = MockDom::social_form(Platform::Facebook);
        let field = dom.element_by_id("profile_url").unwrap();
        decorate(&mut dom, field, &Validation::invalid("bad"));
        assert_eq!(decorate(&mut dom, field, &Validation::valid()), None);
        assert_eq!(error_count(&dom), 0);
        assert_eq!(dom.style_of(field, "border-color"), None);
        assert_eq!(dom.style_of(field, "box-shadow"), None);
    }

    #[test]
    fn test_valid_on_clean_field_is_noop() {
        let mut dom = MockDom::social_form(Platform::Facebook);
        let field = dom.element_by_id("display_name").unwrap();
        decorate(&mut dom, field, &Validation::valid());
        decorate(&mut dom, field, &Validation::valid());
        assert_eq!(error_count(&dom), 0);
    }

    #[test]
    fn test_fields_in_separate_groups_are_independent() {
        let mut dom = MockDom::social_form(Platform::Facebook);
        let profile = dom.element_by_id("profile_url").unwrap();
        let name = dom.element_by_id("display_name").unwrap();
        decorate(&mut dom, profile, &Validation::invalid("a"));
        decorate(&mut dom, name, &Validation::invalid("b"));
        decorate(&mut dom, profile, &Validation::valid());
        assert_eq!(error_count(&dom), 1);
    }

    #[test]
    fn test_detached_field_only_gets_styles() {
        let mut dom = MockDom::new();
        let field = dom.create_element("input").unwrap();
        assert_eq!(decorate(&mut dom, field, &Validation::invalid("bad")), None);
        assert_eq!(dom.style_of(field, "border-color"), Some(ERROR_COLOR));
    }

    #[test]
    fn test_error_message_reads_current_node() {
        let mut dom = MockDom::social_form(Platform::Facebook);
        let field = dom.element_by_id("display_name").unwrap();
        assert_eq!(error_message(&mut dom, field), None);
        decorate(&mut dom, field, &Validation::invalid("bad"));
        assert_eq!(error_message(&mut dom, field).as_deref(), Some("bad"));
        decorate(&mut dom, field, &Validation::valid());
        assert_eq!(error_message(&mut dom, field), None);
    }
}
