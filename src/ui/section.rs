use super::item::{mismatch, refresh_children};
use super::{Item, Nestable, TextDisplay, ViewItem};
use crate::error::ComponentError;
use crate::types::component;
use crate::types::{Component, ComponentType};

/// Most body items a section holds.
pub const MAX_SECTION_ITEMS: usize = 3;

/// Up to three text blocks with one accessory (a button or thumbnail) beside
/// them.
#[derive(Clone, Debug, Default)]
pub struct Section {
    id: Option<u32>,
    body: Vec<Item>,
    accessory: Option<Box<Item>>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_component(section: component::Section) -> Self {
        Self {
            id: section.id,
            body: section.components.into_iter().map(Item::from_component).collect(),
            accessory: section
                .accessory
                .map(|accessory| Box::new(Item::from_component(*accessory))),
        }
    }

    /// Append a body item. Only text is accepted, and at most three.
    pub fn add_item(&mut self, item: impl Into<Item>) -> Result<&mut Self, ComponentError> {
        let item = item.into();
        if !matches!(item, Item::TextDisplay(_)) {
            return Err(ComponentError::WrongItemType {
                container: "Section",
                item: item.component_type(),
            });
        }
        if self.body.len() >= MAX_SECTION_ITEMS {
            return Err(ComponentError::CapacityExceeded {
                container: "Section",
                max: MAX_SECTION_ITEMS,
            });
        }
        item.validate()?;
        self.body.push(item);
        Ok(self)
    }

    pub fn add_text(&mut self, content: impl Into<String>) -> Result<&mut Self, ComponentError> {
        self.add_item(TextDisplay::new(content))
    }

    /// Replace the accessory.
    pub fn set_accessory(&mut self, item: impl Into<Item>) -> Result<&mut Self, ComponentError> {
        let item = item.into();
        if !matches!(item, Item::Button(_) | Item::Thumbnail(_)) {
            return Err(ComponentError::WrongItemType {
                container: "Section accessory",
                item: item.component_type(),
            });
        }
        item.validate()?;
        self.accessory = Some(Box::new(item));
        Ok(self)
    }

    pub fn accessory(&self) -> Option<&Item> {
        self.accessory.as_deref()
    }

    pub fn body(&self) -> &[Item] {
        &self.body
    }
}

impl Nestable for Section {
    fn items(&self) -> Vec<&Item> {
        self.body.iter().chain(self.accessory.as_deref()).collect()
    }

    fn items_mut(&mut self) -> Vec<&mut Item> {
        self.body
            .iter_mut()
            .chain(self.accessory.as_deref_mut())
            .collect()
    }
}

impl ViewItem for Section {
    fn component_type(&self) -> ComponentType {
        ComponentType::Section
    }

    fn id(&self) -> Option<u32> {
        self.id
    }

    fn set_id(&mut self, id: Option<u32>) {
        self.id = id;
    }

    fn is_dispatchable(&self) -> bool {
        self.items().into_iter().any(ViewItem::is_dispatchable)
    }

    fn is_persistent(&self) -> bool {
        self.items().into_iter().all(ViewItem::is_persistent)
    }

    fn validate(&self) -> Result<(), ComponentError> {
        if self.body.is_empty() {
            return Err(ComponentError::invalid("section", "needs at least one text item"));
        }
        self.items().into_iter().try_for_each(ViewItem::validate)
    }

    fn to_component(&self) -> Component {
        Component::Section(component::Section {
            id: self.id,
            components: self.body.iter().map(ViewItem::to_component).collect(),
            accessory: self
                .accessory
                .as_ref()
                .map(|accessory| Box::new(accessory.to_component())),
        })
    }

    fn refresh_component(&mut self, component: Component) {
        match component {
            Component::Section(section) => {
                self.id = section.id;
                refresh_children(self.body.iter_mut(), section.components);
                if let (Some(local), Some(echoed)) = (self.accessory.as_deref_mut(), section.accessory) {
                    refresh_children([local], vec![*echoed]);
                }
            }
            other => mismatch(ComponentType::Section, &other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{Button, Select, Thumbnail};
    use serde_json::json;

    #[test]
    fn fourth_body_item_fails_and_keeps_three() {
        let mut section = Section::new();
        for n in 0..3 {
            section.add_text(format!("line {n}")).unwrap();
        }
        let err = section.add_text("line 3").unwrap_err();
        assert!(matches!(
            err,
            ComponentError::CapacityExceeded { container: "Section", max: 3 }
        ));
        assert_eq!(section.body().len(), 3);

        // and again, the check doesn't drift
        assert!(section.add_text("line 4").is_err());
        assert_eq!(section.body().len(), 3);
    }

    #[test]
    fn accessory_is_replaced_not_appended() {
        let mut section = Section::new();
        section.add_text("hello").unwrap();
        section.set_accessory(Thumbnail::new("https://cdn.example/a.png")).unwrap();
        section.set_accessory(Button::new("Go").custom_id("go")).unwrap();
        assert_eq!(
            section.accessory().map(|a| a.component_type()),
            Some(ComponentType::Button)
        );
        assert_eq!(section.items().len(), 2);
        assert!(section.is_dispatchable());
        assert!(section.is_persistent());
    }

    #[test]
    fn accessory_rejects_selects() {
        let mut section = Section::new();
        assert!(section.set_accessory(Select::string()).is_err());
        assert!(section.add_item(Button::new("x")).is_err());
        assert!(section.accessory().is_none());
    }

    #[test]
    fn serializes_body_then_accessory() {
        let mut section = Section::new();
        section.add_text("Pick a colour").unwrap();
        section
            .set_accessory(Thumbnail::new("attachment://swatch.png").description("swatch"))
            .unwrap();
        assert_eq!(
            section.to_component_dict(),
            json!({
                "type": 9,
                "components": [{ "type": 10, "content": "Pick a colour" }],
                "accessory": {
                    "type": 11,
                    "media": { "url": "attachment://swatch.png" },
                    "description": "swatch",
                },
            })
        );
    }

    #[test]
    fn refresh_reaches_accessory() {
        let mut section = Section::new();
        section.add_text("body").unwrap();
        section.set_accessory(Button::new("Go").custom_id("go")).unwrap();

        let mut echoed = section.to_component();
        if let Component::Section(inner) = &mut echoed {
            inner.id = Some(1);
            if let Some(Component::TextDisplay(text)) = inner.components.first_mut() {
                text.id = Some(2);
            }
            if let Some(accessory) = inner.accessory.as_deref_mut() {
                if let Component::Button(button) = accessory {
                    button.id = Some(3);
                }
            }
        }
        section.refresh_component(echoed);
        assert_eq!(section.id(), Some(1));
        assert_eq!(section.body()[0].id(), Some(2));
        assert_eq!(section.accessory().and_then(|a| a.id()), Some(3));
    }
}
