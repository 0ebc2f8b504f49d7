//! The item capability interface and the closed set of item kinds.
//!
//! An item is the local, mutable counterpart of one wire [`Component`]. It
//! owns its component payload and adds what only matters on this side of
//! the wire: layout hints for the row packer, the interaction callback, and
//! state absorbed from interactions (selected values, typed text).
//!
//! Items never point back at their parent or view. Lookup goes top-down
//! through [`Nestable`], and callbacks receive the owning
//! [`ViewHandle`](super::ViewHandle) as an argument.

use serde_json::Value;
use tracing::warn;

use super::{
    ActionRow, Button, Checkbox, CheckboxGroup, Container, File, FileUpload, InputText,
    ItemCallback, Label, MediaGallery, RadioGroup, Section, Select, Separator, TextDisplay,
    Thumbnail, ROW_WIDTH,
};
use crate::error::ComponentError;
use crate::types::component::UnknownComponent;
use crate::types::{Component, ComponentState, ComponentType};

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Behaviour shared by every item.
pub trait ViewItem {
    fn component_type(&self) -> ComponentType;

    /// Numeric identifier unique within the message. Assigned by the server
    /// when left unset.
    fn id(&self) -> Option<u32>;

    fn set_id(&mut self, id: Option<u32>);

    fn custom_id(&self) -> Option<&str> {
        None
    }

    /// Width units the item takes in an action row.
    fn width(&self) -> u8 {
        ROW_WIDTH
    }

    /// Row the item asked for, if any.
    fn row(&self) -> Option<u8> {
        None
    }

    fn set_row(&mut self, _row: Option<u8>) {}

    /// Row the packer placed the item in.
    fn rendered_row(&self) -> Option<u8> {
        None
    }

    fn set_rendered_row(&mut self, _row: Option<u8>) {}

    fn is_v2(&self) -> bool {
        self.component_type().is_v2()
    }

    /// Whether the item can raise an interaction that needs routing.
    fn is_dispatchable(&self) -> bool {
        false
    }

    /// Whether routing to this item survives a restart. Auto-generated
    /// custom ids don't, and neither do ids read back from a message.
    fn is_persistent(&self) -> bool {
        !self.is_dispatchable()
    }

    /// Check platform limits on the item's fields.
    fn validate(&self) -> Result<(), ComponentError> {
        Ok(())
    }

    fn to_component(&self) -> Component;

    fn to_component_dict(&self) -> Value {
        self.to_component().to_value()
    }

    /// Overwrite the underlying payload with what the server echoed back.
    fn refresh_component(&mut self, component: Component);

    /// Absorb the values a user submitted. Leaves the payload untouched.
    fn refresh_state(&mut self, _state: &ComponentState) {}
}

/// Items that hold other items.
pub trait Nestable {
    /// Direct children.
    fn items(&self) -> Vec<&Item>;

    fn items_mut(&mut self) -> Vec<&mut Item>;

    /// Depth-first search by `id` or `custom_id`.
    fn find_item(&self, key: &ItemKey) -> Option<&Item> {
        for item in self.items() {
            if item.matches(key) {
                return Some(item);
            }
            if let Some(found) = item.as_nestable().and_then(|nested| nested.find_item(key)) {
                return Some(found);
            }
        }
        None
    }

    fn find_item_mut(&mut self, key: &ItemKey) -> Option<&mut Item> {
        for item in self.items_mut() {
            if item.matches(key) {
                return Some(item);
            }
            if let Some(nested) = item.as_nestable_mut() {
                if let Some(found) = nested.find_item_mut(key) {
                    return Some(found);
                }
            }
        }
        None
    }

    fn get_item(&self, key: impl Into<ItemKey>) -> Option<&Item>
    where
        Self: Sized,
    {
        self.find_item(&key.into())
    }

    fn get_item_mut(&mut self, key: impl Into<ItemKey>) -> Option<&mut Item>
    where
        Self: Sized,
    {
        self.find_item_mut(&key.into())
    }

    /// Every non-nesting descendant, depth first.
    fn walk_items(&self) -> Vec<&Item> {
        let mut out = Vec::new();
        for item in self.items() {
            match item.as_nestable() {
                Some(nested) => out.extend(nested.walk_items()),
                None => out.push(item),
            }
        }
        out
    }

    fn walk_items_mut(&mut self) -> Vec<&mut Item> {
        let mut out = Vec::new();
        for item in self.items_mut() {
            if item.is_nestable() {
                if let Some(nested) = item.as_nestable_mut() {
                    out.extend(nested.walk_items_mut());
                }
            } else {
                out.push(item);
            }
        }
        out
    }
}

/// Items with a `disabled` flag.
pub trait Disableable {
    fn is_disabled(&self) -> bool;
    fn set_disabled(&mut self, disabled: bool);
}

// ---------------------------------------------------------------------------
// Lookup key
// ---------------------------------------------------------------------------

/// Key for [`Nestable::get_item`]: an integer matches `id`, a string matches
/// `custom_id`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ItemKey {
    Id(u32),
    CustomId(String),
}

impl From<u32> for ItemKey {
    fn from(id: u32) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ItemKey {
    fn from(custom_id: &str) -> Self {
        Self::CustomId(custom_id.to_owned())
    }
}

impl From<String> for ItemKey {
    fn from(custom_id: String) -> Self {
        Self::CustomId(custom_id)
    }
}

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// Any item a view, container or modal can hold.
#[derive(Clone, Debug)]
pub enum Item {
    ActionRow(ActionRow),
    Button(Button),
    Select(Select),
    InputText(InputText),
    TextDisplay(TextDisplay),
    Thumbnail(Thumbnail),
    MediaGallery(MediaGallery),
    File(File),
    Separator(Separator),
    Section(Section),
    Container(Container),
    Label(Label),
    FileUpload(FileUpload),
    RadioGroup(RadioGroup),
    CheckboxGroup(CheckboxGroup),
    Checkbox(Checkbox),
    Unknown(UnknownItem),
}

macro_rules! each_item {
    ($item:expr, $inner:ident => $body:expr) => {
        match $item {
            Item::ActionRow($inner) => $body,
            Item::Button($inner) => $body,
            Item::Select($inner) => $body,
            Item::InputText($inner) => $body,
            Item::TextDisplay($inner) => $body,
            Item::Thumbnail($inner) => $body,
            Item::MediaGallery($inner) => $body,
            Item::File($inner) => $body,
            Item::Separator($inner) => $body,
            Item::Section($inner) => $body,
            Item::Container($inner) => $body,
            Item::Label($inner) => $body,
            Item::FileUpload($inner) => $body,
            Item::RadioGroup($inner) => $body,
            Item::CheckboxGroup($inner) => $body,
            Item::Checkbox($inner) => $body,
            Item::Unknown($inner) => $body,
        }
    };
}

impl ViewItem for Item {
    fn component_type(&self) -> ComponentType {
        each_item!(self, i => i.component_type())
    }

    fn id(&self) -> Option<u32> {
        each_item!(self, i => i.id())
    }

    fn set_id(&mut self, id: Option<u32>) {
        each_item!(self, i => i.set_id(id))
    }

    fn custom_id(&self) -> Option<&str> {
        each_item!(self, i => i.custom_id())
    }

    fn width(&self) -> u8 {
        each_item!(self, i => i.width())
    }

    fn row(&self) -> Option<u8> {
        each_item!(self, i => i.row())
    }

    fn set_row(&mut self, row: Option<u8>) {
        each_item!(self, i => i.set_row(row))
    }

    fn rendered_row(&self) -> Option<u8> {
        each_item!(self, i => i.rendered_row())
    }

    fn set_rendered_row(&mut self, row: Option<u8>) {
        each_item!(self, i => i.set_rendered_row(row))
    }

    fn is_v2(&self) -> bool {
        each_item!(self, i => i.is_v2())
    }

    fn is_dispatchable(&self) -> bool {
        each_item!(self, i => i.is_dispatchable())
    }

    fn is_persistent(&self) -> bool {
        each_item!(self, i => i.is_persistent())
    }

    fn validate(&self) -> Result<(), ComponentError> {
        each_item!(self, i => i.validate())
    }

    fn to_component(&self) -> Component {
        each_item!(self, i => i.to_component())
    }

    fn refresh_component(&mut self, component: Component) {
        each_item!(self, i => i.refresh_component(component))
    }

    fn refresh_state(&mut self, state: &ComponentState) {
        each_item!(self, i => i.refresh_state(state))
    }
}

impl Item {
    /// Rebuild an item from a wire component.
    ///
    /// Custom ids read this way never count as caller-provided, so the item
    /// is not persistent even when the id looks stable.
    pub fn from_component(component: Component) -> Self {
        match component {
            Component::ActionRow(c) => Self::ActionRow(ActionRow::from_component(c)),
            Component::Button(c) => Self::Button(Button::from_component(c)),
            Component::SelectMenu(c) => Self::Select(Select::from_component(c)),
            Component::TextInput(c) => Self::InputText(InputText::from_component(c)),
            Component::Section(c) => Self::Section(Section::from_component(c)),
            Component::TextDisplay(c) => Self::TextDisplay(TextDisplay::from_component(c)),
            Component::Thumbnail(c) => Self::Thumbnail(Thumbnail::from_component(c)),
            Component::MediaGallery(c) => Self::MediaGallery(MediaGallery::from_component(c)),
            Component::File(c) => Self::File(File::from_component(c)),
            Component::Separator(c) => Self::Separator(Separator::from_component(c)),
            Component::Container(c) => Self::Container(Container::from_component(c)),
            Component::Label(c) => Self::Label(Label::from_component(c)),
            Component::FileUpload(c) => Self::FileUpload(FileUpload::from_component(c)),
            Component::RadioGroup(c) => Self::RadioGroup(RadioGroup::from_component(c)),
            Component::CheckboxGroup(c) => Self::CheckboxGroup(CheckboxGroup::from_component(c)),
            Component::Checkbox(c) => Self::Checkbox(Checkbox::from_component(c)),
            Component::Unknown(c) => Self::Unknown(UnknownItem::from_component(c)),
        }
    }

    pub fn matches(&self, key: &ItemKey) -> bool {
        match key {
            ItemKey::Id(id) => self.id() == Some(*id),
            ItemKey::CustomId(custom_id) => self.custom_id() == Some(custom_id.as_str()),
        }
    }

    pub fn is_nestable(&self) -> bool {
        self.as_nestable().is_some()
    }

    pub fn as_nestable(&self) -> Option<&dyn Nestable> {
        match self {
            Self::ActionRow(row) => Some(row),
            Self::Section(section) => Some(section),
            Self::Container(container) => Some(container),
            Self::Label(label) => Some(label),
            _ => None,
        }
    }

    pub fn as_nestable_mut(&mut self) -> Option<&mut dyn Nestable> {
        match self {
            Self::ActionRow(row) => Some(row),
            Self::Section(section) => Some(section),
            Self::Container(container) => Some(container),
            Self::Label(label) => Some(label),
            _ => None,
        }
    }

    pub fn as_disableable(&self) -> Option<&dyn Disableable> {
        match self {
            Self::Button(button) => Some(button),
            Self::Select(select) => Some(select),
            _ => None,
        }
    }

    pub fn as_disableable_mut(&mut self) -> Option<&mut dyn Disableable> {
        match self {
            Self::Button(button) => Some(button),
            Self::Select(select) => Some(select),
            _ => None,
        }
    }

    /// Callback to run when this item raises an interaction.
    pub fn callback(&self) -> Option<&ItemCallback> {
        match self {
            Self::Button(button) => button.callback(),
            Self::Select(select) => select.callback(),
            _ => None,
        }
    }

    /// Number of components this item serializes to, itself included.
    pub fn component_count(&self) -> usize {
        1 + self.as_nestable().map_or(0, |nested| {
            nested.items().iter().map(|item| item.component_count()).sum()
        })
    }

    pub fn as_button(&self) -> Option<&Button> {
        match self {
            Self::Button(button) => Some(button),
            _ => None,
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        match self {
            Self::Button(button) => Some(button),
            _ => None,
        }
    }

    pub fn as_select(&self) -> Option<&Select> {
        match self {
            Self::Select(select) => Some(select),
            _ => None,
        }
    }

    pub fn as_select_mut(&mut self) -> Option<&mut Select> {
        match self {
            Self::Select(select) => Some(select),
            _ => None,
        }
    }

    pub fn as_input_text(&self) -> Option<&InputText> {
        match self {
            Self::InputText(input) => Some(input),
            _ => None,
        }
    }

    pub fn as_text_display_mut(&mut self) -> Option<&mut TextDisplay> {
        match self {
            Self::TextDisplay(text) => Some(text),
            _ => None,
        }
    }
}

macro_rules! impl_from_item {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Item {
                fn from(item: $variant) -> Self {
                    Self::$variant(item)
                }
            }
        )*
    };
}

impl_from_item!(
    ActionRow,
    Button,
    Select,
    InputText,
    TextDisplay,
    Thumbnail,
    MediaGallery,
    File,
    Separator,
    Section,
    Container,
    Label,
    FileUpload,
    RadioGroup,
    CheckboxGroup,
    Checkbox,
);

impl From<UnknownItem> for Item {
    fn from(item: UnknownItem) -> Self {
        Self::Unknown(item)
    }
}

// ---------------------------------------------------------------------------
// Unknown
// ---------------------------------------------------------------------------

/// Placeholder for a component type this crate doesn't model. Can be located
/// by id and re-sent as-is, nothing else.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UnknownItem {
    kind: u64,
    id: Option<u32>,
}

impl UnknownItem {
    pub fn from_component(component: UnknownComponent) -> Self {
        Self {
            kind: component.kind,
            id: component.id,
        }
    }
}

impl ViewItem for UnknownItem {
    fn component_type(&self) -> ComponentType {
        ComponentType::Unknown(self.kind)
    }

    fn id(&self) -> Option<u32> {
        self.id
    }

    fn set_id(&mut self, id: Option<u32>) {
        self.id = id;
    }

    fn to_component(&self) -> Component {
        Component::Unknown(UnknownComponent {
            kind: self.kind,
            id: self.id,
        })
    }

    fn refresh_component(&mut self, component: Component) {
        match component {
            Component::Unknown(c) if c.kind == self.kind => self.id = c.id,
            other => mismatch(self.component_type(), &other),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// 32 hex characters, used for custom ids the caller didn't supply and for
/// view tokens.
pub(crate) fn random_custom_id() -> String {
    let bytes: [u8; 16] = rand::random();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Log an echoed component that doesn't line up with the local item.
pub(crate) fn mismatch(expected: ComponentType, got: &Component) {
    warn!(
        expected = expected.name(),
        got = got.kind().name(),
        "echoed component does not match local item; keeping local payload"
    );
}

/// Zip echoed components onto local items by position.
pub(crate) fn refresh_children<'a>(
    items: impl IntoIterator<Item = &'a mut Item>,
    components: Vec<Component>,
) {
    let mut echoed = components.into_iter();
    for item in items {
        let Some(component) = echoed.next() else {
            warn!("server echoed fewer components than the local tree holds");
            return;
        };
        if item.component_type() == component.kind() {
            item.refresh_component(component);
        } else {
            mismatch(item.component_type(), &component);
        }
    }
}

pub(crate) fn check_len(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ComponentError> {
    match value {
        Some(value) if value.chars().count() > max => Err(ComponentError::invalid(
            field,
            format!("must be {} characters or fewer", max),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{builders, ButtonStyle};
    use serde_json::json;

    #[test]
    fn random_custom_ids_are_hex_and_distinct() {
        let a = random_custom_id();
        let b = random_custom_id();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn from_component_resolves_each_kind() {
        let component = builders::action_row(vec![
            builders::button(ButtonStyle::Primary, "A", "a"),
            builders::button(ButtonStyle::Danger, "B", "b"),
        ]);
        let item = Item::from_component(component.clone());
        assert_eq!(item.component_type(), ComponentType::ActionRow);
        assert_eq!(item.to_component(), component);
        assert_eq!(item.component_count(), 3);

        let unknown = Item::from_component(Component::Unknown(UnknownComponent {
            kind: 99,
            id: Some(4),
        }));
        assert_eq!(unknown.component_type(), ComponentType::Unknown(99));
        assert_eq!(unknown.to_component_dict(), json!({ "type": 99, "id": 4 }));
        assert!(unknown.is_persistent());

        let wide = Item::from_component(Component::from_value(json!({ "type": 300 })).unwrap());
        assert_eq!(wide.component_type(), ComponentType::Unknown(300));
        assert_eq!(wide.to_component_dict(), json!({ "type": 300 }));
    }

    #[test]
    fn lookup_by_id_or_custom_id() {
        let mut row = ActionRow::new();
        row.add_item(Button::new("A").custom_id("a")).unwrap();
        row.add_item(Button::new("B").custom_id("b")).unwrap();
        row.get_item_mut("b").unwrap().set_id(Some(9));

        assert_eq!(row.get_item("a").and_then(|i| i.id()), None);
        assert_eq!(row.get_item(9).and_then(|i| i.custom_id()), Some("b"));
        assert!(row.get_item("missing").is_none());

        row.get_item_mut("a").unwrap().set_id(Some(4));
        assert_eq!(row.get_item(4).and_then(|i| i.custom_id()), Some("a"));
    }

    #[test]
    fn walk_sees_only_leaves() {
        let mut container = Container::new();
        container.add_text("heading").unwrap();
        container
            .add_row([Item::from(Button::new("Go").custom_id("go"))])
            .unwrap();
        let mut section = Section::new();
        section.add_text("body").unwrap();
        section
            .set_accessory(Button::new("More").custom_id("more"))
            .unwrap();
        container.add_item(section).unwrap();

        let kinds: Vec<ComponentType> = container
            .walk_items()
            .iter()
            .map(|i| i.component_type())
            .collect();
        assert_eq!(
            kinds,
            vec![
                ComponentType::TextDisplay,
                ComponentType::Button,
                ComponentType::TextDisplay,
                ComponentType::Button,
            ]
        );
        assert_eq!(container.walk_items_mut().len(), 4);
        assert_eq!(
            container.get_item("more").map(|i| i.component_type()),
            Some(ComponentType::Button)
        );
    }

    #[test]
    fn refresh_children_skips_mismatched_kinds() {
        let mut items = vec![
            Item::from(Button::new("A").custom_id("a")),
            Item::from(TextDisplay::new("hi")),
        ];
        let mut echoed_button = match builders::button(ButtonStyle::Secondary, "A", "a") {
            Component::Button(b) => b,
            _ => unreachable!(),
        };
        echoed_button.id = Some(1);
        refresh_children(
            items.iter_mut(),
            vec![
                Component::Button(echoed_button),
                builders::button(ButtonStyle::Primary, "X", "x"),
            ],
        );
        assert_eq!(items[0].id(), Some(1));
        assert_eq!(items[1].id(), None);
        assert_eq!(items[1].component_type(), ComponentType::TextDisplay);
    }
}
