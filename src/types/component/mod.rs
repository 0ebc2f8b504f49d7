//! Wire-level message and modal components.
//!
//! Every component is a JSON object with an integer `type` tag and an
//! optional server-assigned `id`:
//!
//! ```json
//! {"type": 2, "id": 1, "style": 1, "label": "Click", "custom_id": "abc"}
//! ```
//!
//! [`Component`] decodes by looking at the tag first and then handing the
//! whole object to the matching variant struct. Tags this crate doesn't know
//! decode into [`Component::Unknown`] instead of failing, so a message
//! carrying a component type introduced after this crate was written can
//! still be read, walked, and located by `id`.

mod button;
mod emoji;
mod layout;
mod media;
mod modal_input;
mod select_menu;
mod text_input;

pub use self::{
    button::{Button, ButtonStyle},
    emoji::PartialEmoji,
    layout::{ActionRow, Container, Label, Section},
    media::{
        FileDisplay, MediaGallery, MediaGalleryItem, Separator, SeparatorSpacing, TextDisplay,
        Thumbnail, UnfurledMediaItem,
    },
    modal_input::{Checkbox, CheckboxGroup, FileUpload, GroupOption, RadioGroup},
    select_menu::{
        SelectDefaultValue, SelectDefaultValueType, SelectMenu, SelectMenuOption,
        SelectMenuType,
    },
    text_input::{TextInput, TextInputStyle},
};

use serde::{
    de::{Deserialize, Deserializer, Error as DeError},
    ser::{Serialize, Serializer},
};
use serde_json::Value;

use crate::types::util::ValueExt;

// ---------------------------------------------------------------------------
// Component type tag
// ---------------------------------------------------------------------------

/// The integer `type` tag of a component.
#[derive(Clone, Copy, Debug, serde::Deserialize, Eq, Hash, PartialEq, serde::Serialize)]
#[serde(from = "u64", into = "u64")]
pub enum ComponentType {
    ActionRow,
    Button,
    StringSelect,
    TextInput,
    UserSelect,
    RoleSelect,
    MentionableSelect,
    ChannelSelect,
    Section,
    TextDisplay,
    Thumbnail,
    MediaGallery,
    File,
    Separator,
    Container,
    Label,
    FileUpload,
    RadioGroup,
    CheckboxGroup,
    Checkbox,
    /// A tag this crate doesn't model yet.
    Unknown(u64),
}

impl ComponentType {
    /// Whether this tag belongs to the original flat component set that
    /// legacy messages may carry (rows, buttons, selects, text inputs).
    pub const fn is_v2(self) -> bool {
        !matches!(
            self,
            Self::ActionRow
                | Self::Button
                | Self::StringSelect
                | Self::TextInput
                | Self::UserSelect
                | Self::RoleSelect
                | Self::MentionableSelect
                | Self::ChannelSelect
        )
    }

    /// Whether this is one of the five select flavours.
    pub const fn is_select(self) -> bool {
        matches!(
            self,
            Self::StringSelect
                | Self::UserSelect
                | Self::RoleSelect
                | Self::MentionableSelect
                | Self::ChannelSelect
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::ActionRow => "ActionRow",
            Self::Button => "Button",
            Self::StringSelect => "StringSelect",
            Self::TextInput => "TextInput",
            Self::UserSelect => "UserSelect",
            Self::RoleSelect => "RoleSelect",
            Self::MentionableSelect => "MentionableSelect",
            Self::ChannelSelect => "ChannelSelect",
            Self::Section => "Section",
            Self::TextDisplay => "TextDisplay",
            Self::Thumbnail => "Thumbnail",
            Self::MediaGallery => "MediaGallery",
            Self::File => "File",
            Self::Separator => "Separator",
            Self::Container => "Container",
            Self::Label => "Label",
            Self::FileUpload => "FileUpload",
            Self::RadioGroup => "RadioGroup",
            Self::CheckboxGroup => "CheckboxGroup",
            Self::Checkbox => "Checkbox",
            Self::Unknown(_) => "Unknown",
        }
    }
}

impl From<u64> for ComponentType {
    fn from(value: u64) -> Self {
        match value {
            1 => Self::ActionRow,
            2 => Self::Button,
            3 => Self::StringSelect,
            4 => Self::TextInput,
            5 => Self::UserSelect,
            6 => Self::RoleSelect,
            7 => Self::MentionableSelect,
            8 => Self::ChannelSelect,
            9 => Self::Section,
            10 => Self::TextDisplay,
            11 => Self::Thumbnail,
            12 => Self::MediaGallery,
            13 => Self::File,
            14 => Self::Separator,
            17 => Self::Container,
            18 => Self::Label,
            19 => Self::FileUpload,
            21 => Self::RadioGroup,
            22 => Self::CheckboxGroup,
            23 => Self::Checkbox,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<ComponentType> for u64 {
    fn from(value: ComponentType) -> Self {
        match value {
            ComponentType::ActionRow => 1,
            ComponentType::Button => 2,
            ComponentType::StringSelect => 3,
            ComponentType::TextInput => 4,
            ComponentType::UserSelect => 5,
            ComponentType::RoleSelect => 6,
            ComponentType::MentionableSelect => 7,
            ComponentType::ChannelSelect => 8,
            ComponentType::Section => 9,
            ComponentType::TextDisplay => 10,
            ComponentType::Thumbnail => 11,
            ComponentType::MediaGallery => 12,
            ComponentType::File => 13,
            ComponentType::Separator => 14,
            ComponentType::Container => 17,
            ComponentType::Label => 18,
            ComponentType::FileUpload => 19,
            ComponentType::RadioGroup => 21,
            ComponentType::CheckboxGroup => 22,
            ComponentType::Checkbox => 23,
            ComponentType::Unknown(unknown) => unknown,
        }
    }
}

// ---------------------------------------------------------------------------
// Component tagged union
// ---------------------------------------------------------------------------

/// A single wire-format component.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Component {
    ActionRow(ActionRow),
    Button(Button),
    SelectMenu(SelectMenu),
    TextInput(TextInput),
    Section(Section),
    TextDisplay(TextDisplay),
    Thumbnail(Thumbnail),
    MediaGallery(MediaGallery),
    File(FileDisplay),
    Separator(Separator),
    Container(Container),
    Label(Label),
    FileUpload(FileUpload),
    RadioGroup(RadioGroup),
    CheckboxGroup(CheckboxGroup),
    Checkbox(Checkbox),
    Unknown(UnknownComponent),
}

/// Opaque component with a tag this crate doesn't model. Only the tag and
/// `id` are retained.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UnknownComponent {
    #[serde(skip)]
    pub kind: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
}

impl Component {
    /// The `type` tag this component is sent with.
    pub const fn kind(&self) -> ComponentType {
        match self {
            Self::ActionRow(_) => ComponentType::ActionRow,
            Self::Button(_) => ComponentType::Button,
            Self::SelectMenu(select) => select.kind.component_type(),
            Self::TextInput(_) => ComponentType::TextInput,
            Self::Section(_) => ComponentType::Section,
            Self::TextDisplay(_) => ComponentType::TextDisplay,
            Self::Thumbnail(_) => ComponentType::Thumbnail,
            Self::MediaGallery(_) => ComponentType::MediaGallery,
            Self::File(_) => ComponentType::File,
            Self::Separator(_) => ComponentType::Separator,
            Self::Container(_) => ComponentType::Container,
            Self::Label(_) => ComponentType::Label,
            Self::FileUpload(_) => ComponentType::FileUpload,
            Self::RadioGroup(_) => ComponentType::RadioGroup,
            Self::CheckboxGroup(_) => ComponentType::CheckboxGroup,
            Self::Checkbox(_) => ComponentType::Checkbox,
            Self::Unknown(unknown) => ComponentType::Unknown(unknown.kind),
        }
    }

    /// Numeric identifier unique within the message, if assigned.
    pub const fn id(&self) -> Option<u32> {
        match self {
            Self::ActionRow(c) => c.id,
            Self::Button(c) => c.id,
            Self::SelectMenu(c) => c.id,
            Self::TextInput(c) => c.id,
            Self::Section(c) => c.id,
            Self::TextDisplay(c) => c.id,
            Self::Thumbnail(c) => c.id,
            Self::MediaGallery(c) => c.id,
            Self::File(c) => c.id,
            Self::Separator(c) => c.id,
            Self::Container(c) => c.id,
            Self::Label(c) => c.id,
            Self::FileUpload(c) => c.id,
            Self::RadioGroup(c) => c.id,
            Self::CheckboxGroup(c) => c.id,
            Self::Checkbox(c) => c.id,
            Self::Unknown(c) => c.id,
        }
    }

    /// Developer-defined identifier returned with interactions, if any.
    pub fn custom_id(&self) -> Option<&str> {
        match self {
            Self::Button(c) => c.custom_id.as_deref(),
            Self::SelectMenu(c) => Some(&c.custom_id),
            Self::TextInput(c) => Some(&c.custom_id),
            Self::FileUpload(c) => Some(&c.custom_id),
            Self::RadioGroup(c) => Some(&c.custom_id),
            Self::CheckboxGroup(c) => Some(&c.custom_id),
            Self::Checkbox(c) => Some(&c.custom_id),
            _ => None,
        }
    }

    /// See [`ComponentType::is_v2`].
    pub const fn is_v2(&self) -> bool {
        self.kind().is_v2()
    }

    /// Direct children, in wire order. A section's accessory comes after its
    /// body.
    pub fn children(&self) -> Vec<&Component> {
        match self {
            Self::ActionRow(row) => row.components.iter().collect(),
            Self::Container(container) => container.components.iter().collect(),
            Self::Section(section) => section
                .components
                .iter()
                .chain(section.accessory.as_deref())
                .collect(),
            Self::Label(label) => vec![&*label.component],
            _ => Vec::new(),
        }
    }

    /// Depth-first iteration over this component and all its descendants.
    pub fn walk(&self) -> Vec<&Component> {
        let mut out = vec![self];
        for child in self.children() {
            out.extend(child.walk());
        }
        out
    }

    /// Decode a component from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let tag = value
            .get("type")
            .and_then(Value::as_u64)
            .ok_or_else(|| serde_json::Error::missing_field("type"))?;
        let kind = ComponentType::from(tag);

        Ok(match kind {
            ComponentType::ActionRow => Self::ActionRow(value.deserialize_into()?),
            ComponentType::Button => Self::Button(value.deserialize_into()?),
            ComponentType::StringSelect
            | ComponentType::UserSelect
            | ComponentType::RoleSelect
            | ComponentType::MentionableSelect
            | ComponentType::ChannelSelect => {
                let mut select: SelectMenu = value.deserialize_into()?;
                select.kind = SelectMenuType::from_component_type(kind).unwrap_or_default();
                Self::SelectMenu(select)
            }
            ComponentType::TextInput => Self::TextInput(value.deserialize_into()?),
            ComponentType::Section => Self::Section(value.deserialize_into()?),
            ComponentType::TextDisplay => Self::TextDisplay(value.deserialize_into()?),
            ComponentType::Thumbnail => Self::Thumbnail(value.deserialize_into()?),
            ComponentType::MediaGallery => Self::MediaGallery(value.deserialize_into()?),
            ComponentType::File => Self::File(value.deserialize_into()?),
            ComponentType::Separator => Self::Separator(value.deserialize_into()?),
            ComponentType::Container => Self::Container(value.deserialize_into()?),
            ComponentType::Label => Self::Label(value.deserialize_into()?),
            ComponentType::FileUpload => Self::FileUpload(value.deserialize_into()?),
            ComponentType::RadioGroup => Self::RadioGroup(value.deserialize_into()?),
            ComponentType::CheckboxGroup => Self::CheckboxGroup(value.deserialize_into()?),
            ComponentType::Checkbox => Self::Checkbox(value.deserialize_into()?),
            ComponentType::Unknown(tag) => Self::Unknown(UnknownComponent {
                kind: tag,
                id: value
                    .get("id")
                    .and_then(Value::as_u64)
                    .and_then(|id| u32::try_from(id).ok()),
            }),
        })
    }

    /// Encode this component into a JSON value.
    pub fn to_value(&self) -> Value {
        // Serializing plain structs into a `Value` cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(DeError::custom)
    }
}

/// Prepends the `type` tag to a variant struct's own fields.
#[derive(serde::Serialize)]
struct Tagged<'a, T: Serialize> {
    #[serde(rename = "type")]
    kind: ComponentType,
    #[serde(flatten)]
    inner: &'a T,
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();
        match self {
            Self::ActionRow(c) => Tagged { kind, inner: c }.serialize(serializer),
            Self::Button(c) => Tagged { kind, inner: c }.serialize(serializer),
            Self::SelectMenu(c) => Tagged { kind, inner: c }.serialize(serializer),
            Self::TextInput(c) => Tagged { kind, inner: c }.serialize(serializer),
            Self::Section(c) => Tagged { kind, inner: c }.serialize(serializer),
            Self::TextDisplay(c) => Tagged { kind, inner: c }.serialize(serializer),
            Self::Thumbnail(c) => Tagged { kind, inner: c }.serialize(serializer),
            Self::MediaGallery(c) => Tagged { kind, inner: c }.serialize(serializer),
            Self::File(c) => Tagged { kind, inner: c }.serialize(serializer),
            Self::Separator(c) => Tagged { kind, inner: c }.serialize(serializer),
            Self::Container(c) => Tagged { kind, inner: c }.serialize(serializer),
            Self::Label(c) => Tagged { kind, inner: c }.serialize(serializer),
            Self::FileUpload(c) => Tagged { kind, inner: c }.serialize(serializer),
            Self::RadioGroup(c) => Tagged { kind, inner: c }.serialize(serializer),
            Self::CheckboxGroup(c) => Tagged { kind, inner: c }.serialize(serializer),
            Self::Checkbox(c) => Tagged { kind, inner: c }.serialize(serializer),
            Self::Unknown(c) => Tagged { kind, inner: c }.serialize(serializer),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serde_test::Token;

    fn round_trip(component: &Component) -> Component {
        let json = serde_json::to_string(component).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn component_type_uses_integer_tag() {
        serde_test::assert_tokens(&ComponentType::Container, &[Token::U64(17)]);
        serde_test::assert_tokens(&ComponentType::Unknown(99), &[Token::U64(99)]);
    }

    #[test]
    fn component_type_tags_round_trip() {
        for tag in (0..=300).chain([u64::from(u32::MAX) + 1, u64::MAX]) {
            assert_eq!(u64::from(ComponentType::from(tag)), tag);
        }
    }

    #[test]
    fn decodes_button_from_wire() {
        let component: Component = serde_json::from_value(json!({
            "type": 2,
            "id": 1,
            "style": 1,
            "label": "Click",
            "custom_id": "abc",
            "disabled": false,
        }))
        .unwrap();

        let Component::Button(button) = &component else {
            panic!("expected Button, got {component:?}");
        };
        assert_eq!(button.id, Some(1));
        assert_eq!(button.style, ButtonStyle::Primary);
        assert_eq!(button.custom_id.as_deref(), Some("abc"));
        assert!(!button.disabled);
    }

    #[test]
    fn encode_omits_unset_fields() {
        let button = Component::Button(Button {
            id: None,
            style: ButtonStyle::Secondary,
            label: Some("Go".to_owned()),
            emoji: None,
            custom_id: Some("go".to_owned()),
            url: None,
            sku_id: None,
            disabled: false,
        });
        assert_eq!(
            button.to_value(),
            json!({ "type": 2, "style": 2, "label": "Go", "custom_id": "go" })
        );
    }

    #[test]
    fn select_flavour_comes_from_tag() {
        let component: Component = serde_json::from_value(json!({
            "type": 8,
            "custom_id": "where",
            "channel_types": [0, 5],
        }))
        .unwrap();
        assert_eq!(component.kind(), ComponentType::ChannelSelect);
        assert_eq!(component.to_value()["type"], json!(8));
        assert_eq!(round_trip(&component), component);
    }

    #[test]
    fn unknown_tag_decodes_to_passthrough() {
        let component: Component =
            serde_json::from_value(json!({ "type": 42, "id": 7, "shiny": true })).unwrap();
        assert_eq!(
            component,
            Component::Unknown(UnknownComponent { kind: 42, id: Some(7) })
        );
        assert_eq!(component.kind(), ComponentType::Unknown(42));
        assert!(component.is_v2());
        assert_eq!(component.to_value(), json!({ "type": 42, "id": 7 }));
    }

    #[test]
    fn wide_unknown_tag_is_kept() {
        let component = Component::from_value(json!({ "type": 300, "id": 1 })).unwrap();
        assert_eq!(component.kind(), ComponentType::Unknown(300));
        assert_eq!(component.to_value(), json!({ "type": 300, "id": 1 }));
        assert_ne!(
            component,
            Component::from_value(json!({ "type": 255, "id": 1 })).unwrap()
        );
        assert_eq!(round_trip(&component), component);
    }

    /// Every variant, once with each optional field set and once bare.
    fn wire_fixtures() -> Vec<Value> {
        let media = json!({
            "url": "https://cdn.example/a.png",
            "proxy_url": "https://media.example/a.png",
            "width": 640,
            "height": 480,
            "content_type": "image/png",
        });
        let option = json!({
            "label": "Red",
            "value": "red",
            "description": "warm",
            "emoji": { "id": "41771983429993937", "name": "red", "animated": true },
            "default": true,
        });
        let group_option = json!({
            "value": "a",
            "label": "A",
            "description": "first",
            "default": true,
        });
        vec![
            // buttons
            json!({
                "type": 2, "id": 1, "style": 1, "label": "Go",
                "emoji": { "name": "🎲" }, "custom_id": "go", "disabled": true,
            }),
            json!({ "type": 2, "id": 2, "style": 5, "label": "Docs", "url": "https://example.com" }),
            json!({ "type": 2, "style": 6, "sku_id": "1180218955160375406" }),
            json!({ "type": 2, "style": 2 }),
            // selects
            json!({
                "type": 3, "id": 3, "custom_id": "s", "options": [option],
                "placeholder": "Pick", "min_values": 1, "max_values": 2,
                "disabled": true, "required": true,
            }),
            json!({ "type": 3, "custom_id": "s" }),
            json!({
                "type": 5, "custom_id": "who",
                "default_values": [{ "id": "5", "type": "user" }],
            }),
            json!({ "type": 8, "custom_id": "where", "channel_types": [0, 5] }),
            // text input
            json!({
                "type": 4, "id": 4, "custom_id": "t", "style": 2, "label": "Body",
                "placeholder": "...", "value": "hi", "min_length": 1,
                "max_length": 400, "required": false,
            }),
            json!({ "type": 4, "custom_id": "t", "style": 1 }),
            // display
            json!({ "type": 10, "id": 5, "content": "hello" }),
            json!({ "type": 10, "content": "" }),
            json!({ "type": 11, "id": 6, "media": media, "description": "alt", "spoiler": true }),
            json!({ "type": 11, "media": { "url": "attachment://a.png" } }),
            json!({
                "type": 12, "id": 7,
                "items": [{ "media": media, "description": "one", "spoiler": true }],
            }),
            json!({ "type": 12, "items": [] }),
            json!({
                "type": 13, "id": 8, "file": { "url": "attachment://log.txt" },
                "spoiler": true, "name": "log.txt", "size": 2048,
            }),
            json!({ "type": 13, "file": { "url": "attachment://log.txt" } }),
            json!({ "type": 14, "id": 9, "divider": false, "spacing": 2 }),
            json!({ "type": 14 }),
            // layout
            json!({ "type": 1, "id": 10, "components": [{ "type": 2, "style": 2 }] }),
            json!({ "type": 1, "components": [] }),
            json!({
                "type": 9, "id": 11, "components": [{ "type": 10, "content": "x" }],
                "accessory": { "type": 11, "media": { "url": "attachment://a.png" } },
            }),
            json!({ "type": 9, "components": [] }),
            json!({
                "type": 17, "id": 12, "components": [{ "type": 14 }],
                "accent_color": 3447003, "spoiler": true,
            }),
            json!({ "type": 17, "components": [] }),
            json!({
                "type": 18, "id": 13, "label": "Name", "description": "Who are you",
                "component": { "type": 4, "custom_id": "name", "style": 1 },
            }),
            json!({ "type": 18, "label": "Name", "component": { "type": 4, "custom_id": "n", "style": 1 } }),
            // modal inputs
            json!({
                "type": 19, "id": 14, "custom_id": "up", "min_values": 1,
                "max_values": 3, "required": true,
            }),
            json!({ "type": 19, "custom_id": "up" }),
            json!({ "type": 21, "id": 15, "custom_id": "r", "options": [group_option], "required": true }),
            json!({ "type": 21, "custom_id": "r", "options": [] }),
            json!({
                "type": 22, "id": 16, "custom_id": "c", "options": [group_option],
                "min_values": 0, "max_values": 1, "required": false,
            }),
            json!({ "type": 22, "custom_id": "c", "options": [] }),
            json!({ "type": 23, "id": 17, "custom_id": "ok", "default": true }),
            json!({ "type": 23, "custom_id": "ok" }),
            // unknown
            json!({ "type": 99, "id": 18 }),
            json!({ "type": 99 }),
        ]
    }

    #[test]
    fn every_variant_round_trips() {
        for fixture in wire_fixtures() {
            let component = Component::from_value(fixture.clone())
                .unwrap_or_else(|e| panic!("decoding {fixture}: {e}"));
            assert_eq!(component.to_value(), fixture, "re-encoding {fixture}");
            assert_eq!(round_trip(&component), component, "round trip of {fixture}");
        }
    }

    #[test]
    fn missing_tag_is_an_error() {
        let err = serde_json::from_value::<Component>(json!({ "content": "hi" })).unwrap_err();
        assert!(err.to_string().contains("type"));
    }

    #[test]
    fn container_accent_color_states_round_trip() {
        let nested = vec![
            Component::TextDisplay(TextDisplay {
                id: Some(2),
                content: "markdown text".to_owned(),
            }),
            Component::Separator(Separator {
                id: None,
                divider: false,
                spacing: Some(SeparatorSpacing::Large),
            }),
        ];
        for accent_color in [None, Some(None), Some(Some(3_447_003))] {
            let container = Component::Container(Container {
                id: Some(3),
                components: nested.clone(),
                accent_color,
                spoiler: false,
            });
            assert_eq!(round_trip(&container), container);
        }

        let cleared = Component::Container(Container {
            accent_color: Some(None),
            ..Container::default()
        });
        assert_eq!(
            cleared.to_value(),
            json!({ "type": 17, "components": [], "accent_color": null })
        );
    }

    #[test]
    fn section_with_accessory_round_trips() {
        let section = Component::Section(Section {
            id: None,
            components: vec![Component::TextDisplay(TextDisplay {
                id: None,
                content: "Pick a colour".to_owned(),
            })],
            accessory: Some(Box::new(Component::Thumbnail(Thumbnail {
                id: None,
                media: UnfurledMediaItem::new("attachment://swatch.png"),
                description: Some("swatch".to_owned()),
                spoiler: true,
            }))),
        });
        assert_eq!(round_trip(&section), section);
        assert_eq!(section.children().len(), 2);
    }

    #[test]
    fn label_wraps_modal_input() {
        let label: Component = serde_json::from_value(json!({
            "type": 18,
            "label": "Favourite colour",
            "component": {
                "type": 21,
                "custom_id": "colour",
                "options": [
                    { "value": "red", "label": "Red" },
                    { "value": "blue", "label": "Blue", "default": true },
                ],
            },
        }))
        .unwrap();

        let walked: Vec<ComponentType> = label.walk().iter().map(|c| c.kind()).collect();
        assert_eq!(walked, vec![ComponentType::Label, ComponentType::RadioGroup]);
        assert_eq!(label.walk()[1].custom_id(), Some("colour"));
        assert_eq!(round_trip(&label), label);
    }

    #[test]
    fn walk_is_depth_first() {
        let message: Vec<Component> = serde_json::from_value(json!([
            {
                "type": 17,
                "components": [
                    { "type": 10, "id": 2, "content": "hello" },
                    { "type": 1, "id": 3, "components": [
                        { "type": 2, "id": 4, "style": 5, "url": "https://example.com" },
                    ]},
                ],
            },
            { "type": 13, "id": 5, "file": { "url": "attachment://log.txt" } },
        ]))
        .unwrap();

        let ids: Vec<Option<u32>> = message
            .iter()
            .flat_map(|c| c.walk())
            .map(Component::id)
            .collect();
        assert_eq!(ids, vec![None, Some(2), Some(3), Some(4), Some(5)]);
    }
}
