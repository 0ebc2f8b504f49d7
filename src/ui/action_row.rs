use super::item::{mismatch, refresh_children};
use super::{Item, ItemKey, Nestable, ViewItem, ROW_WIDTH};
use crate::error::ComponentError;
use crate::types::component;
use crate::types::{Component, ComponentType};

/// A horizontal row of up to five buttons, or one select, or (in a modal)
/// one text input.
#[derive(Clone, Debug, Default)]
pub struct ActionRow {
    id: Option<u32>,
    children: Vec<Item>,
}

impl ActionRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from several items, failing on the first that doesn't fit.
    pub fn with_items<I>(items: I) -> Result<Self, ComponentError>
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        let mut row = Self::new();
        for item in items {
            row.add_item(item)?;
        }
        Ok(row)
    }

    pub fn from_component(row: component::ActionRow) -> Self {
        Self {
            id: row.id,
            children: row.components.into_iter().map(Item::from_component).collect(),
        }
    }

    /// Append an item. Fails without touching the row if the item isn't a
    /// button, select or text input, or if it would push the row past five
    /// width units.
    pub fn add_item(&mut self, item: impl Into<Item>) -> Result<&mut Self, ComponentError> {
        let item = item.into();
        if !matches!(item, Item::Button(_) | Item::Select(_) | Item::InputText(_)) {
            return Err(ComponentError::WrongItemType {
                container: "ActionRow",
                item: item.component_type(),
            });
        }
        if self.width() + item.width() > ROW_WIDTH {
            return Err(ComponentError::CapacityExceeded {
                container: "ActionRow",
                max: usize::from(ROW_WIDTH),
            });
        }
        item.validate()?;
        self.children.push(item);
        Ok(self)
    }

    pub fn remove_item(&mut self, key: impl Into<ItemKey>) -> Option<Item> {
        let key = key.into();
        let index = self.children.iter().position(|item| item.matches(&key))?;
        Some(self.children.remove(index))
    }

    /// Width units in use.
    pub fn width(&self) -> u8 {
        self.children.iter().map(ViewItem::width).sum()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn into_items(self) -> Vec<Item> {
        self.children
    }
}

impl Nestable for ActionRow {
    fn items(&self) -> Vec<&Item> {
        self.children.iter().collect()
    }

    fn items_mut(&mut self) -> Vec<&mut Item> {
        self.children.iter_mut().collect()
    }
}

impl ViewItem for ActionRow {
    fn component_type(&self) -> ComponentType {
        ComponentType::ActionRow
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
        if self.children.is_empty() {
            return Err(ComponentError::invalid("action row", "needs at least one item"));
        }
        self.children.iter().try_for_each(ViewItem::validate)
    }

    fn to_component(&self) -> Component {
        Component::ActionRow(component::ActionRow {
            id: self.id,
            components: self.children.iter().map(ViewItem::to_component).collect(),
        })
    }

    fn refresh_component(&mut self, component: Component) {
        match component {
            Component::ActionRow(row) => {
                self.id = row.id;
                refresh_children(self.children.iter_mut(), row.components);
            }
            other => mismatch(ComponentType::ActionRow, &other),
        }
    }
}
