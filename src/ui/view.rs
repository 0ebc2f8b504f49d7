//! Top-level surfaces.
//!
//! A [`View`] is the legacy surface: a flat list of buttons and selects that
//! the row packer lays out into at most five action rows. A
//! [`DesignerView`] holds layout components in the order given and sets the
//! components-v2 message flag. [`AnyView`] is what a store and a
//! [`ViewHandle`](super::ViewHandle) hold.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::item::refresh_children;
use super::{
    DesignerView, Item, ItemKey, Nestable, ViewHooks, ViewItem, ViewSettings, ViewWeights,
    ROW_COUNT,
};
use crate::error::ComponentError;
use crate::types::component;
use crate::types::{Component, MessageFlags, MessagePayload};

/// Most items a legacy view holds (five rows of five buttons).
pub const MAX_VIEW_CHILDREN: usize = 25;

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// Legacy component surface.
///
/// ```ignore
/// let mut view = View::new().timeout(Some(Duration::from_secs(60)));
/// view.add_item(Button::new("Reroll").custom_id("dice:reroll"))?;
/// view.add_item(Select::string().custom_id("dice:sides").options(sides))?;
/// let body = view.to_message();
/// ```
#[derive(Clone, Default)]
pub struct View {
    children: Vec<Item>,
    weights: ViewWeights,
    settings: ViewSettings,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a view from many items at once. Items that asked for a row are
    /// placed before the rest.
    pub fn from_items<I>(items: I) -> Result<Self, ComponentError>
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        let mut children = Vec::new();
        for item in items {
            for item in unnest(item.into()) {
                check_legacy(&item)?;
                item.validate()?;
                children.push(item);
            }
        }
        if children.len() > MAX_VIEW_CHILDREN {
            return Err(ComponentError::CapacityExceeded {
                container: "View",
                max: MAX_VIEW_CHILDREN,
            });
        }
        let mut weights = ViewWeights::new();
        weights.pack(&mut children)?;
        Ok(Self {
            children,
            weights,
            settings: ViewSettings::default(),
        })
    }

    /// Rebuild a view from a message's components. Each action row's
    /// children are pinned to that row.
    pub fn from_components(components: Vec<Component>) -> Result<Self, ComponentError> {
        let mut view = Self::new();
        for (index, component) in components.into_iter().enumerate() {
            let row = u8::try_from(index).unwrap_or(u8::MAX);
            match Item::from_component(component) {
                Item::ActionRow(action_row) => {
                    for mut child in action_row.into_items() {
                        child.set_row(Some(row));
                        view.add_item(child)?;
                    }
                }
                other => {
                    view.add_item(other)?;
                }
            }
        }
        Ok(view)
    }

    /// Idle time before the view stops. `None` keeps it alive until stopped.
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

    /// Add a button or select. An action row is un-nested and its children
    /// added one by one; the view packs its own rows. Nothing changes if any
    /// of them fails.
    pub fn add_item(&mut self, item: impl Into<Item>) -> Result<&mut Self, ComponentError> {
        let mut items = unnest(item.into());
        if self.children.len() + items.len() > MAX_VIEW_CHILDREN {
            return Err(ComponentError::CapacityExceeded {
                container: "View",
                max: MAX_VIEW_CHILDREN,
            });
        }
        let mut weights = self.weights.clone();
        for item in &mut items {
            check_legacy(item)?;
            item.validate()?;
            weights.add_item(item)?;
        }
        self.weights = weights;
        self.children.extend(items);
        Ok(self)
    }

    pub fn remove_item(&mut self, key: impl Into<ItemKey>) -> Option<Item> {
        let key = key.into();
        let index = self.children.iter().position(|item| item.matches(&key))?;
        let mut item = self.children.remove(index);
        self.weights.remove_item(&mut item);
        Some(item)
    }

    pub fn clear_items(&mut self) {
        self.children.clear();
        self.weights.clear();
    }

    pub fn children(&self) -> &[Item] {
        &self.children
    }

    pub fn weights(&self) -> &ViewWeights {
        &self.weights
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

    /// Routing survives a restart: no timeout, and every item's custom id
    /// was chosen by the caller.
    pub fn is_persistent(&self) -> bool {
        self.settings.timeout.is_none() && self.children.iter().all(ViewItem::is_persistent)
    }

    /// One action row per used row, in row order.
    pub fn to_components(&self) -> Vec<Component> {
        let mut rows: [Vec<Component>; ROW_COUNT] = Default::default();
        for child in &self.children {
            if let Some(row) = child.rendered_row() {
                rows[usize::from(row).min(ROW_COUNT - 1)].push(child.to_component());
            }
        }
        rows.into_iter()
            .filter(|row| !row.is_empty())
            .map(|components| Component::ActionRow(component::ActionRow { id: None, components }))
            .collect()
    }

    pub fn message_flags(&self) -> MessageFlags {
        MessageFlags::empty()
    }

    pub fn to_message(&self) -> MessagePayload {
        MessagePayload::new(self.to_components()).flags(self.message_flags())
    }

    /// Absorb the components the server echoed for this view. The echo is
    /// in rendered order; `children` keeps the order items were added in.
    pub fn refresh(&mut self, components: &[Component]) {
        let echoed = components
            .iter()
            .flat_map(|component| match component {
                Component::ActionRow(row) => row.components.clone(),
                other => vec![other.clone()],
            })
            .collect();
        let mut rendered: Vec<&mut Item> = self
            .children
            .iter_mut()
            .filter(|child| child.rendered_row().is_some())
            .collect();
        rendered.sort_by_key(|child| child.rendered_row());
        refresh_children(rendered, echoed);
    }
}

impl Nestable for View {
    fn items(&self) -> Vec<&Item> {
        self.children.iter().collect()
    }

    fn items_mut(&mut self) -> Vec<&mut Item> {
        self.children.iter_mut().collect()
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("children", &self.children)
            .field("weights", &self.weights)
            .field("settings", &self.settings)
            .finish()
    }
}

fn unnest(item: Item) -> Vec<Item> {
    match item {
        Item::ActionRow(row) => row.into_items(),
        other => vec![other],
    }
}

fn check_legacy(item: &Item) -> Result<(), ComponentError> {
    match item {
        Item::Button(_) | Item::Select(_) => Ok(()),
        other => Err(ComponentError::WrongItemType {
            container: "View",
            item: other.component_type(),
        }),
    }
}

pub(crate) fn set_all_disabled(surface: &mut impl Nestable, disabled: bool) {
    for item in surface.walk_items_mut() {
        if let Some(item) = item.as_disableable_mut() {
            item.set_disabled(disabled);
        }
    }
}

// ---------------------------------------------------------------------------
// AnyView
// ---------------------------------------------------------------------------

/// Either surface kind.
#[derive(Clone, Debug)]
pub enum AnyView {
    Legacy(View),
    Designer(DesignerView),
}

impl AnyView {
    pub fn settings(&self) -> &ViewSettings {
        match self {
            Self::Legacy(view) => view.settings(),
            Self::Designer(view) => view.settings(),
        }
    }

    pub fn as_legacy_mut(&mut self) -> Option<&mut View> {
        match self {
            Self::Legacy(view) => Some(view),
            Self::Designer(_) => None,
        }
    }

    pub fn as_designer_mut(&mut self) -> Option<&mut DesignerView> {
        match self {
            Self::Designer(view) => Some(view),
            Self::Legacy(_) => None,
        }
    }

    pub fn is_dispatchable(&self) -> bool {
        match self {
            Self::Legacy(view) => view.is_dispatchable(),
            Self::Designer(view) => view.is_dispatchable(),
        }
    }

    pub fn is_persistent(&self) -> bool {
        match self {
            Self::Legacy(view) => view.is_persistent(),
            Self::Designer(view) => view.is_persistent(),
        }
    }

    pub fn disable_all_items(&mut self) {
        set_all_disabled(self, true);
    }

    pub fn enable_all_items(&mut self) {
        set_all_disabled(self, false);
    }

    pub fn to_components(&self) -> Vec<Component> {
        match self {
            Self::Legacy(view) => view.to_components(),
            Self::Designer(view) => view.to_components(),
        }
    }

    pub fn message_flags(&self) -> MessageFlags {
        match self {
            Self::Legacy(view) => view.message_flags(),
            Self::Designer(view) => view.message_flags(),
        }
    }

    pub fn to_message(&self) -> MessagePayload {
        match self {
            Self::Legacy(view) => view.to_message(),
            Self::Designer(view) => view.to_message(),
        }
    }

    pub fn refresh(&mut self, components: &[Component]) {
        match self {
            Self::Legacy(view) => view.refresh(components),
            Self::Designer(view) => view.refresh(components),
        }
    }
}

impl Nestable for AnyView {
    fn items(&self) -> Vec<&Item> {
        match self {
            Self::Legacy(view) => view.items(),
            Self::Designer(view) => view.items(),
        }
    }

    fn items_mut(&mut self) -> Vec<&mut Item> {
        match self {
            Self::Legacy(view) => view.items_mut(),
            Self::Designer(view) => view.items_mut(),
        }
    }
}

impl From<View> for AnyView {
    fn from(view: View) -> Self {
        Self::Legacy(view)
    }
}

impl From<DesignerView> for AnyView {
    fn from(view: DesignerView) -> Self {
        Self::Designer(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ComponentType, SelectMenuOption};
    use crate::ui::{ActionRow, Button, Container, Select, TextDisplay};
    use serde_json::json;

    fn buttons(n: usize) -> Vec<Button> {
        (0..n).map(|i| Button::new(i.to_string()).custom_id(format!("b{i}"))).collect()
    }

    #[test]
    fn packs_buttons_then_select_into_rows() {
        let mut view = View::new();
        for button in buttons(5) {
            view.add_item(button).unwrap();
        }
        view.add_item(Select::string().custom_id("pick")).unwrap();

        let rows = view.to_components();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].children().len(), 5);
        assert_eq!(rows[1].children()[0].kind(), ComponentType::StringSelect);
        assert_eq!(view.weights().weights(), &[5, 5, 0, 0, 0]);
    }

    #[test]
    fn rejects_layout_items() {
        let mut view = View::new();
        let err = view.add_item(TextDisplay::new("hi")).unwrap_err();
        assert!(matches!(
            err,
            ComponentError::WrongItemType { container: "View", item: ComponentType::TextDisplay }
        ));
        assert!(view.add_item(Container::new()).is_err());
        assert!(view.children().is_empty());
    }

    #[test]
    fn action_rows_are_unnested() {
        let mut view = View::new();
        let row = ActionRow::with_items(buttons(2)).unwrap();
        view.add_item(row).unwrap();
        assert_eq!(view.children().len(), 2);
        assert!(view.children().iter().all(|c| c.component_type() == ComponentType::Button));
    }

    #[test]
    fn failed_add_leaves_view_unchanged() {
        let mut view = View::new();
        view.add_item(Button::new("a").custom_id("a").row(0)).unwrap();
        let row = ActionRow::with_items([
            Item::from(Button::new("b").custom_id("b").row(1)),
            Item::from(Button::new("c").custom_id("c").row(7)),
        ])
        .unwrap();
        assert!(matches!(
            view.add_item(row),
            Err(ComponentError::RowOutOfRange { row: 7, max: 5 })
        ));
        assert_eq!(view.children().len(), 1);
        assert_eq!(view.weights().weights(), &[1, 0, 0, 0, 0]);
    }

    #[test]
    fn capacity_is_twenty_five() {
        let mut view = View::new();
        for button in buttons(25) {
            view.add_item(button).unwrap();
        }
        assert!(matches!(
            view.add_item(Button::new("late")),
            Err(ComponentError::CapacityExceeded { container: "View", max: 25 })
        ));
    }

    #[test]
    fn from_items_places_pinned_first() {
        let view = View::from_items([
            Item::from(Button::new("auto").custom_id("auto")),
            Item::from(Select::string().custom_id("pinned").row(0)),
        ])
        .unwrap();
        let rows = view.to_components();
        assert_eq!(rows[0].children()[0].custom_id(), Some("pinned"));
        assert_eq!(rows[1].children()[0].custom_id(), Some("auto"));
    }

    #[test]
    fn persistence_needs_no_timeout_and_chosen_ids() {
        let mut view = View::new();
        view.add_item(Button::new("a").custom_id("a")).unwrap();
        assert!(!view.is_persistent());

        let mut view = view.timeout(None);
        assert!(view.is_persistent());
        view.add_item(Button::new("generated")).unwrap();
        assert!(!view.is_persistent());
    }

    #[test]
    fn from_components_and_refresh() {
        let payload = json!([
            { "type": 1, "id": 1, "components": [
                { "type": 2, "id": 2, "style": 1, "label": "Go", "custom_id": "go" },
            ]},
            { "type": 1, "id": 3, "components": [
                { "type": 3, "id": 4, "custom_id": "pick", "options": [
                    { "label": "A", "value": "a" },
                ]},
            ]},
        ]);
        let components: Vec<Component> = serde_json::from_value(payload).unwrap();
        let view = View::from_components(components).unwrap();
        assert_eq!(view.get_item("go").and_then(|i| i.rendered_row()), Some(0));
        assert_eq!(view.get_item("pick").and_then(|i| i.rendered_row()), Some(1));
        assert_eq!(view.get_item(4).map(|i| i.component_type()), Some(ComponentType::StringSelect));
        assert!(!view.is_persistent());

        let mut fresh = View::new();
        fresh.add_item(Button::new("Go").custom_id("go")).unwrap();
        let mut select = Select::string().custom_id("pick");
        select.add_option("A", "a").unwrap();
        fresh.add_item(select).unwrap();
        let echoed: Vec<Component> = serde_json::from_value(json!([
            { "type": 1, "id": 1, "components": [
                { "type": 2, "id": 2, "style": 2, "label": "Go", "custom_id": "go" },
            ]},
            { "type": 1, "id": 3, "components": [
                { "type": 3, "id": 4, "custom_id": "pick", "options": [
                    { "label": "A", "value": "a" },
                ]},
            ]},
        ]))
        .unwrap();
        fresh.refresh(&echoed);
        assert_eq!(fresh.get_item("go").and_then(|i| i.id()), Some(2));
        assert_eq!(fresh.get_item("pick").and_then(|i| i.id()), Some(4));
        // custom ids were chosen locally, so the echo doesn't change that
        assert!(fresh.timeout(None).is_persistent());
    }

    #[test]
    fn refresh_keeps_insertion_order() {
        let mut view = View::new();
        view.add_item(Button::new("Late").custom_id("late").row(2)).unwrap();
        view.add_item(Button::new("Auto").custom_id("auto")).unwrap();
        assert_eq!(view.get_item("auto").and_then(|i| i.rendered_row()), Some(0));

        let echoed: Vec<Component> = serde_json::from_value(json!([
            { "type": 1, "id": 1, "components": [
                { "type": 2, "id": 2, "style": 1, "label": "Auto", "custom_id": "auto" },
            ]},
            { "type": 1, "id": 3, "components": [
                { "type": 2, "id": 4, "style": 1, "label": "Late", "custom_id": "late" },
            ]},
        ]))
        .unwrap();
        view.refresh(&echoed);

        let order: Vec<(Option<&str>, Option<u32>)> = view
            .children()
            .iter()
            .map(|child| (child.custom_id(), child.id()))
            .collect();
        assert_eq!(order, vec![(Some("late"), Some(4)), (Some("auto"), Some(2))]);
    }

    #[test]
    fn disable_and_enable_everything() {
        let mut view = View::new();
        view.add_item(Button::new("a").custom_id("a")).unwrap();
        view.add_item(
            Select::string()
                .custom_id("s")
                .options(vec![SelectMenuOption::new("A", "a")]),
        )
        .unwrap();
        view.disable_all_items();
        assert!(view
            .walk_items()
            .iter()
            .all(|i| i.as_disableable().is_some_and(|d| d.is_disabled())));
        view.enable_all_items();
        assert!(view.to_components().iter().all(|row| row
            .children()
            .iter()
            .all(|c| !c.to_value()["disabled"].as_bool().unwrap_or(false))));
    }

    #[test]
    fn remove_item_frees_width() {
        let mut view = View::new();
        view.add_item(Select::string().custom_id("s")).unwrap();
        let removed = view.remove_item("s").unwrap();
        assert_eq!(removed.rendered_row(), None);
        assert_eq!(view.weights().weights(), &[0; ROW_COUNT]);
        view.add_item(Button::new("x")).unwrap();
        view.clear_items();
        assert!(view.children().is_empty());
        assert_eq!(view.weights(), &ViewWeights::new());
    }

    #[test]
    fn legacy_message_has_no_flags() {
        let mut view = View::new();
        view.add_item(Button::new("a")).unwrap();
        let body = view.to_message();
        assert!(body.flags.is_empty());
        assert_eq!(AnyView::from(view).message_flags(), MessageFlags::empty());
    }
}
