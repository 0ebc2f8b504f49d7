//! Helper functions for constructing raw [`Component`] values.
//!
//! These build wire components directly, hiding the per-variant struct
//! construction. They are handy for canned payloads (for example a message
//! echoed by a transport) and for rebuilding a view with
//! [`View::from_components`](crate::ui::View::from_components). Interactive
//! code normally builds [`ui`](crate::ui) items instead.

use crate::types::component::{
    ActionRow, Button, ButtonStyle, Component, Container, SelectMenu, SelectMenuOption,
    SelectMenuType, TextDisplay, TextInput, TextInputStyle,
};

/// Build an Action Row wrapping other components.
pub fn action_row(components: Vec<Component>) -> Component {
    Component::ActionRow(ActionRow {
        id: None,
        components,
    })
}

/// Build an interactive button. For link buttons use [`link_button`].
pub fn button(
    style: ButtonStyle,
    label: impl Into<String>,
    custom_id: impl Into<String>,
) -> Component {
    Component::Button(Button {
        id: None,
        style,
        label: Some(label.into()),
        emoji: None,
        custom_id: Some(custom_id.into()),
        url: None,
        sku_id: None,
        disabled: false,
    })
}

/// Build a link button (no custom_id, requires url).
pub fn link_button(label: impl Into<String>, url: impl Into<String>) -> Component {
    Component::Button(Button {
        id: None,
        style: ButtonStyle::Link,
        label: Some(label.into()),
        emoji: None,
        custom_id: None,
        url: Some(url.into()),
        sku_id: None,
        disabled: false,
    })
}

/// Build a string select menu component.
pub fn string_select(
    custom_id: impl Into<String>,
    placeholder: impl Into<String>,
    options: Vec<SelectMenuOption>,
) -> Component {
    Component::SelectMenu(SelectMenu {
        kind: SelectMenuType::Text,
        id: None,
        custom_id: custom_id.into(),
        options,
        placeholder: Some(placeholder.into()),
        min_values: None,
        max_values: None,
        disabled: false,
        channel_types: Vec::new(),
        default_values: Vec::new(),
        required: None,
    })
}

/// Build a text input for use inside a modal.
pub fn text_input(
    custom_id: impl Into<String>,
    label: impl Into<String>,
    style: TextInputStyle,
    required: bool,
) -> Component {
    Component::TextInput(TextInput {
        id: None,
        custom_id: custom_id.into(),
        style,
        label: Some(label.into()),
        placeholder: None,
        value: None,
        min_length: None,
        max_length: None,
        required: Some(required),
    })
}

/// Build a markdown text block.
pub fn text_display(content: impl Into<String>) -> Component {
    Component::TextDisplay(TextDisplay {
        id: None,
        content: content.into(),
    })
}

/// Build a container around other components.
pub fn container(components: Vec<Component>, accent_color: Option<u32>) -> Component {
    Component::Container(Container {
        id: None,
        components,
        accent_color: accent_color.map(Some),
        spoiler: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_row_wraps_components() {
        let row = action_row(vec![button(ButtonStyle::Primary, "Click", "btn_click")]);
        match row {
            Component::ActionRow(ar) => assert_eq!(ar.components.len(), 1),
            _ => panic!("expected ActionRow"),
        }
    }

    #[test]
    fn button_creates_correct_component() {
        let btn = button(ButtonStyle::Success, "OK", "btn_ok");
        match btn {
            Component::Button(b) => {
                assert_eq!(b.label.as_deref(), Some("OK"));
                assert_eq!(b.custom_id.as_deref(), Some("btn_ok"));
                assert!(matches!(b.style, ButtonStyle::Success));
            }
            _ => panic!("expected Button"),
        }
    }

    #[test]
    fn link_button_has_url_and_no_custom_id() {
        let btn = link_button("Visit", "https://example.com");
        match btn {
            Component::Button(b) => {
                assert!(b.custom_id.is_none());
                assert_eq!(b.url.as_deref(), Some("https://example.com"));
                assert!(matches!(b.style, ButtonStyle::Link));
            }
            _ => panic!("expected Button"),
        }
    }

    #[test]
    fn text_input_creates_correct_component() {
        let ti = text_input("my_input", "Enter text", TextInputStyle::Paragraph, true);
        match ti {
            Component::TextInput(t) => {
                assert_eq!(t.custom_id, "my_input");
                assert!(matches!(t.style, TextInputStyle::Paragraph));
                assert_eq!(t.required, Some(true));
            }
            _ => panic!("expected TextInput"),
        }
    }

    #[test]
    fn container_without_colour_omits_field() {
        let value = container(vec![text_display("hi")], None).to_value();
        assert!(value.get("accent_color").is_none());
        let value = container(Vec::new(), Some(0xFF6600)).to_value();
        assert_eq!(value["accent_color"], 0xFF6600);
    }
}
