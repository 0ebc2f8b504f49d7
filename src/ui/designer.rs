use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::item::refresh_children;
use super::view::set_all_disabled;
use super::{Item, ItemKey, Nestable, ViewHooks, ViewItem, ViewSettings};
use crate::error::ComponentError;
use crate::types::{Component, ComponentType, MessageFlags, MessagePayload};

/// Most components a designer message holds, nested ones included.
pub const MAX_DESIGNER_COMPONENTS: usize = 40;

/// Components-v2 surface. Children render top to bottom in the order they
/// were added; there is no row packing.
///
/// Buttons and selects must come wrapped in an [`ActionRow`](super::ActionRow),
/// directly or inside a [`Container`](super::Container) or as a
/// [`Section`](super::Section) accessory.
#[derive(Clone, Default)]
pub struct DesignerView {
    children: Vec<Item>,
    settings: ViewSettings,
}

impl DesignerView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a message's components. Unknown component types are
    /// kept as opaque placeholders.
    pub fn from_components(components: Vec<Component>) -> Self {
        Self {
            children: components.into_iter().map(Item::from_component).collect(),
            settings: ViewSettings::default(),
        }
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.settings.timeout = timeout;
        self
    }

    pub fn disable_on_timeout(mut self, disable: bool) -> Self {
        self.settings.disable_on_timeout = disable;
        self
    }

    pub fn hooks(mut self, hooks: impl ViewHooks + 'static) -> Self {
        self.settings.hooks = Arc::new(hooks);
        self
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn add_item(&mut self, item: impl Into<Item>) -> Result<&mut Self, ComponentError> {
        let item = item.into();
        match &item {
            Item::ActionRow(row) => {
                if row.items().iter().any(|child| matches!(child, Item::InputText(_))) {
                    return Err(ComponentError::WrongItemType {
                        container: "DesignerView",
                        item: ComponentType::TextInput,
                    });
                }
            }
            Item::Container(_)
            | Item::Section(_)
            | Item::TextDisplay(_)
            | Item::MediaGallery(_)
            | Item::File(_)
            | Item::Separator(_) => {}
            other => {
                return Err(ComponentError::WrongItemType {
                    container: "DesignerView",
                    item: other.component_type(),
                })
            }
        }
        item.validate()?;
        if self.component_count() + item.component_count() > MAX_DESIGNER_COMPONENTS {
            return Err(ComponentError::CapacityExceeded {
                container: "DesignerView",
                max: MAX_DESIGNER_COMPONENTS,
            });
        }
        self.children.push(item);
        Ok(self)
    }

    /// Remove a top-level child by id or custom id.
    pub fn remove_item(&mut self, key: impl Into<ItemKey>) -> Option<Item> {
        let key = key.into();
        let index = self.children.iter().position(|item| item.matches(&key))?;
        Some(self.children.remove(index))
    }

    pub fn clear_items(&mut self) {
        self.children.clear();
    }

    pub fn children(&self) -> &[Item] {
        &self.children
    }

    /// Components the view serializes to, nested ones included.
    pub fn component_count(&self) -> usize {
        self.children.iter().map(Item::component_count).sum()
    }

    pub fn disable_all_items(&mut self) {
        set_all_disabled(self, true);
    }

    pub fn enable_all_items(&mut self) {
        set_all_disabled(self, false);
    }

    pub fn is_dispatchable(&self) -> bool {
        self.children.iter().any(ViewItem::is_dispatchable)
    }

    pub fn is_persistent(&self) -> bool {
        self.settings.timeout.is_none() && self.children.iter().all(ViewItem::is_persistent)
    }

    pub fn to_components(&self) -> Vec<Component> {
        self.children.iter().map(ViewItem::to_component).collect()
    }

    pub fn message_flags(&self) -> MessageFlags {
        MessageFlags::IS_COMPONENTS_V2
    }

    pub fn to_message(&self) -> MessagePayload {
        MessagePayload::new(self.to_components()).flags(self.message_flags())
    }

    pub fn refresh(&mut self, components: &[Component]) {
        refresh_children(self.children.iter_mut(), components.to_vec());
    }
}

impl Nestable for DesignerView {
    fn items(&self) -> Vec<&Item> {
        self.children.iter().collect()
    }

    fn items_mut(&mut self) -> Vec<&mut Item> {
        self.children.iter_mut().collect()
    }
}

impl fmt::Debug for DesignerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesignerView")
            .field("children", &self.children)
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{ActionRow, Button, Container, Disableable, InputText, Section, Select, Thumbnail};
    use serde_json::json;

    #[test]
    fn bare_interactive_items_are_rejected() {
        let mut view = DesignerView::new();
        assert!(matches!(
            view.add_item(Button::new("x")),
            Err(ComponentError::WrongItemType { container: "DesignerView", item: ComponentType::Button })
        ));
        assert!(view.add_item(Select::string()).is_err());
        assert!(view.add_item(Thumbnail::new("https://cdn.example/a.png")).is_err());
        let modal_row = ActionRow::with_items([InputText::new().label("x")]).unwrap();
        assert!(view.add_item(modal_row).is_err());
        assert!(view.children().is_empty());
    }

    #[test]
    fn serializes_in_order_with_v2_flag() {
        let mut view = DesignerView::new();
        let mut container = Container::new().accent_color(0x3498DB);
        container.add_text("Pick a colour").unwrap();
        container
            .add_row([Item::from(Button::new("Red").custom_id("red"))])
            .unwrap();
        view.add_item(container).unwrap();

        let body = serde_json::to_value(view.to_message()).unwrap();
        assert_eq!(body["flags"], json!(1 << 15));
        assert_eq!(body["components"][0]["type"], json!(17));
        assert_eq!(body["components"][0]["components"][1]["components"][0]["custom_id"], json!("red"));
        assert_eq!(view.component_count(), 4);
    }

    #[test]
    fn forty_components_at_most() {
        let mut view = DesignerView::new();
        for n in 0..40 {
            view.add_item(crate::ui::TextDisplay::new(n.to_string())).unwrap();
        }
        assert!(matches!(
            view.add_item(crate::ui::TextDisplay::new("late")),
            Err(ComponentError::CapacityExceeded { container: "DesignerView", max: 40 })
        ));
        assert_eq!(view.children().len(), 40);
    }

    #[test]
    fn nested_buttons_are_found_and_disabled() {
        let mut section = Section::new();
        section.add_text("Settings").unwrap();
        section.set_accessory(Button::new("Edit").custom_id("edit")).unwrap();
        let mut view = DesignerView::new().timeout(None);
        view.add_item(section).unwrap();

        assert!(view.is_dispatchable());
        assert!(view.is_persistent());
        view.disable_all_items();
        let button = view.get_item("edit").and_then(Item::as_disableable).map(|b| b.is_disabled());
        assert_eq!(button, Some(true));
    }

    #[test]
    fn refresh_assigns_ids_by_position() {
        let mut view = DesignerView::new();
        view.add_item(crate::ui::TextDisplay::new("a")).unwrap();
        view.add_item(ActionRow::with_items([Button::new("Go").custom_id("go")]).unwrap())
            .unwrap();
        let echoed: Vec<Component> = serde_json::from_value(json!([
            { "type": 10, "id": 1, "content": "a" },
            { "type": 1, "id": 2, "components": [
                { "type": 2, "id": 3, "style": 2, "label": "Go", "custom_id": "go" },
            ]},
        ]))
        .unwrap();
        view.refresh(&echoed);
        assert_eq!(view.children()[0].id(), Some(1));
        assert_eq!(view.get_item("go").and_then(|i| i.id()), Some(3));
    }

    #[test]
    fn unknown_components_survive_a_rebuild() {
        let components: Vec<Component> = serde_json::from_value(json!([
            { "type": 99, "id": 5, "whatever": true },
            { "type": 10, "id": 6, "content": "hi" },
        ]))
        .unwrap();
        let view = DesignerView::from_components(components);
        assert_eq!(view.get_item(5).map(|i| i.component_type()), Some(ComponentType::Unknown(99)));
        assert_eq!(view.to_components()[0].to_value(), json!({ "type": 99, "id": 5 }));
    }
}
