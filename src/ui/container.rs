use super::item::{mismatch, refresh_children};
use super::{ActionRow, File, Item, MediaGallery, Nestable, Section, Separator, TextDisplay, ViewItem};
use crate::error::ComponentError;
use crate::types::component;
use crate::types::{Component, ComponentType};

/// A boxed group of layout items with an optional accent colour bar.
///
/// Buttons and selects can't go in directly; wrap them with
/// [`add_row`](Self::add_row).
#[derive(Clone, Debug, Default)]
pub struct Container {
    id: Option<u32>,
    children: Vec<Item>,
    accent_color: Option<Option<u32>>,
    spoiler: bool,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_component(container: component::Container) -> Self {
        Self {
            id: container.id,
            children: container
                .components
                .into_iter()
                .map(Item::from_component)
                .collect(),
            accent_color: container.accent_color,
            spoiler: container.spoiler,
        }
    }

    /// RGB accent colour, e.g. `0x3498DB`.
    pub fn accent_color(mut self, color: u32) -> Self {
        self.accent_color = Some(Some(color));
        self
    }

    pub fn spoiler(mut self, spoiler: bool) -> Self {
        self.spoiler = spoiler;
        self
    }

    pub fn set_accent_color(&mut self, color: Option<u32>) {
        self.accent_color = Some(color);
    }

    /// Remove the accent colour. Serializes as an explicit `null` so an edit
    /// clears a colour the message already has.
    pub fn clear_accent_color(&mut self) {
        self.accent_color = Some(None);
    }

    pub fn get_accent_color(&self) -> Option<u32> {
        self.accent_color.flatten()
    }

    pub fn is_spoiler(&self) -> bool {
        self.spoiler
    }

    pub fn add_item(&mut self, item: impl Into<Item>) -> Result<&mut Self, ComponentError> {
        let item = item.into();
        match &item {
            Item::ActionRow(row) => {
                if row.items().iter().any(|child| matches!(child, Item::InputText(_))) {
                    return Err(ComponentError::WrongItemType {
                        container: "Container",
                        item: ComponentType::TextInput,
                    });
                }
            }
            Item::TextDisplay(_)
            | Item::Section(_)
            | Item::MediaGallery(_)
            | Item::File(_)
            | Item::Separator(_) => {}
            other => {
                return Err(ComponentError::WrongItemType {
                    container: "Container",
                    item: other.component_type(),
                })
            }
        }
        item.validate()?;
        self.children.push(item);
        Ok(self)
    }

    /// Wrap buttons or a select in an action row and append it.
    pub fn add_row<I>(&mut self, items: I) -> Result<&mut Self, ComponentError>
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        let row = ActionRow::with_items(items)?;
        self.add_item(row)
    }

    pub fn add_text(&mut self, content: impl Into<String>) -> Result<&mut Self, ComponentError> {
        self.add_item(TextDisplay::new(content))
    }

    pub fn add_section(&mut self, section: Section) -> Result<&mut Self, ComponentError> {
        self.add_item(section)
    }

    pub fn add_gallery(&mut self, gallery: MediaGallery) -> Result<&mut Self, ComponentError> {
        self.add_item(gallery)
    }

    pub fn add_file(&mut self, url: impl Into<String>) -> Result<&mut Self, ComponentError> {
        self.add_item(File::new(url))
    }

    pub fn add_separator(&mut self) -> Result<&mut Self, ComponentError> {
        self.add_item(Separator::new())
    }

    pub fn remove_item(&mut self, index: usize) -> Option<Item> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Nestable for Container {
    fn items(&self) -> Vec<&Item> {
        self.children.iter().collect()
    }

    fn items_mut(&mut self) -> Vec<&mut Item> {
        self.children.iter_mut().collect()
    }
}

impl ViewItem for Container {
    fn component_type(&self) -> ComponentType {
        ComponentType::Container
    }

    fn id(&self) -> Option<u32> {
        self.id
    }

    fn set_id(&mut self, id: Option<u32>) {
        self.id = id;
    }

    fn is_dispatchable(&self) -> bool {
        self.children.iter().any(ViewItem::is_dispatchable)
    }

    fn is_persistent(&self) -> bool {
        self.children.iter().all(ViewItem::is_persistent)
    }

    fn validate(&self) -> Result<(), ComponentError> {
        self.children.iter().try_for_each(ViewItem::validate)
    }

    fn to_component(&self) -> Component {
        Component::Container(component::Container {
            id: self.id,
            components: self.children.iter().map(ViewItem::to_component).collect(),
            accent_color: self.accent_color,
            spoiler: self.spoiler,
        })
    }

    fn refresh_component(&mut self, component: Component) {
        match component {
            Component::Container(container) => {
                self.id = container.id;
                refresh_children(self.children.iter_mut(), container.components);
            }
            other => mismatch(ComponentType::Container, &other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{Button, Select, Thumbnail};
    use serde_json::json;

    #[test]
    fn bare_buttons_and_selects_are_rejected() {
        let mut container = Container::new();
        let err = container.add_item(Button::new("x")).unwrap_err();
        assert!(matches!(
            err,
            ComponentError::WrongItemType { container: "Container", item: ComponentType::Button }
        ));
        assert!(container.add_item(Select::string()).is_err());
        assert!(container.add_item(Thumbnail::new("https://cdn.example/a.png")).is_err());
        assert!(container.add_item(Container::new()).is_err());
        assert!(container.is_empty());
    }

    #[test]
    fn add_row_wraps_in_action_row() {
        let mut container = Container::new();
        container
            .add_row([
                Item::from(Button::new("A").custom_id("a")),
                Item::from(Button::new("B").custom_id("b")),
            ])
            .unwrap();
        assert_eq!(container.len(), 1);
        assert_eq!(
            container.items()[0].component_type(),
            ComponentType::ActionRow
        );
        assert!(container.is_dispatchable());
        assert!(container.is_persistent());
    }

    #[test]
    fn serializes_like_the_wire_example() {
        let mut container = Container::new().accent_color(3_447_003);
        container.add_text("markdown text").unwrap();
        assert_eq!(
            container.to_component_dict(),
            json!({
                "type": 17,
                "accent_color": 3447003,
                "components": [{ "type": 10, "content": "markdown text" }],
            })
        );
    }

    #[test]
    fn clearing_accent_color_sends_null() {
        let mut container = Container::new().accent_color(0xFF0000);
        container.clear_accent_color();
        assert_eq!(container.get_accent_color(), None);
        assert_eq!(container.to_component_dict()["accent_color"], json!(null));
    }

    #[test]
    fn from_component_rebuilds_nested_tree() {
        let component = Component::from_value(json!({
            "type": 17,
            "id": 1,
            "spoiler": true,
            "components": [
                { "type": 10, "id": 2, "content": "hi" },
                { "type": 14, "id": 3 },
                { "type": 1, "id": 4, "components": [
                    { "type": 3, "id": 5, "custom_id": "pick", "options": [
                        { "label": "A", "value": "a" },
                    ]},
                ]},
            ],
        }))
        .unwrap();
        let Component::Container(inner) = component.clone() else {
            panic!("expected Container");
        };
        let container = Container::from_component(inner);
        assert!(container.is_spoiler());
        assert_eq!(container.to_component(), component);
        assert_eq!(
            container.get_item("pick").map(|i| i.component_type()),
            Some(ComponentType::StringSelect)
        );
        assert_eq!(container.get_item(4).map(|i| i.component_type()), Some(ComponentType::ActionRow));
    }
}
