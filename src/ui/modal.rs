//! Modal dialogs.

use std::future::Future;
use tracing::error;

use super::button::MAX_CUSTOM_ID;
use super::item::{check_len, random_custom_id};
use super::{ActionRow, Item, ItemKey, ModalCallback, Nestable, ViewItem};
use crate::error::{CallbackError, ComponentError};
use crate::types::{
    Component, Interaction, InteractionCallbackData, InteractionCallbackType,
    InteractionResponse, ModalSubmitData,
};

/// Most top-level items a modal holds.
pub const MAX_MODAL_ITEMS: usize = 5;

const MAX_TITLE: usize = 45;

/// A popup form, opened as the response to an interaction.
///
/// ```ignore
/// let mut modal = Modal::new("Report a bug")?.custom_id("bug")?;
/// modal.add_item(Label::new("Summary", InputText::new().custom_id("summary"))?)?;
/// let modal = modal.on_submit(|modal, interaction| async move {
///     let summary = modal.get_item("summary").and_then(Item::as_input_text);
///     Ok(())
/// });
/// store.add_modal(modal.clone(), interaction.user_id).await;
/// respond(modal.to_payload());
/// ```
#[derive(Clone, Debug)]
pub struct Modal {
    title: String,
    custom_id: String,
    provided_custom_id: bool,
    children: Vec<Item>,
    callback: Option<ModalCallback>,
}

impl Modal {
    pub fn new(title: impl Into<String>) -> Result<Self, ComponentError> {
        let title = title.into();
        check_len("modal title", Some(&title), MAX_TITLE)?;
        Ok(Self {
            title,
            custom_id: random_custom_id(),
            provided_custom_id: false,
            children: Vec::new(),
            callback: None,
        })
    }

    pub fn custom_id(mut self, custom_id: impl Into<String>) -> Result<Self, ComponentError> {
        let custom_id = custom_id.into();
        check_len("modal custom_id", Some(&custom_id), MAX_CUSTOM_ID)?;
        self.custom_id = custom_id;
        self.provided_custom_id = true;
        Ok(self)
    }

    pub fn on_submit<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Modal, Interaction) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        self.callback = Some(ModalCallback::new(f));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn get_custom_id(&self) -> &str {
        &self.custom_id
    }

    pub fn is_persistent(&self) -> bool {
        self.provided_custom_id && self.children.iter().all(ViewItem::is_persistent)
    }

    /// Add a label, a text display, or a row holding one text input. A
    /// bare text input is wrapped in its own row.
    pub fn add_item(&mut self, item: impl Into<Item>) -> Result<&mut Self, ComponentError> {
        let item = match item.into() {
            Item::InputText(input) => Item::ActionRow(ActionRow::with_items([input])?),
            other => other,
        };
        match &item {
            Item::Label(_) | Item::TextDisplay(_) => {}
            Item::ActionRow(row)
                if !row.is_empty()
                    && row.items().iter().all(|child| matches!(child, Item::InputText(_))) => {}
            other => {
                return Err(ComponentError::WrongItemType {
                    container: "Modal",
                    item: other.component_type(),
                })
            }
        }
        if self.children.len() >= MAX_MODAL_ITEMS {
            return Err(ComponentError::CapacityExceeded {
                container: "Modal",
                max: MAX_MODAL_ITEMS,
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

    pub fn children(&self) -> &[Item] {
        &self.children
    }

    pub fn to_components(&self) -> Vec<Component> {
        self.children.iter().map(ViewItem::to_component).collect()
    }

    /// The interaction response that opens this modal.
    pub fn to_payload(&self) -> InteractionResponse {
        InteractionResponse {
            kind: InteractionCallbackType::Modal,
            data: Some(InteractionCallbackData {
                title: Some(self.title.clone()),
                custom_id: Some(self.custom_id.clone()),
                components: Some(self.to_components()),
                ..Default::default()
            }),
        }
    }

    /// Absorb submitted values into the matching inputs.
    pub fn refresh(&mut self, data: &ModalSubmitData) {
        for item in self.walk_items_mut() {
            if let Some(state) = item.custom_id().and_then(|custom_id| data.get(custom_id)) {
                item.refresh_state(state);
            }
        }
    }

    /// Run the submit callback. Errors are logged.
    pub(crate) async fn submit(self, interaction: Interaction) {
        let Some(callback) = self.callback.clone() else {
            return;
        };
        let custom_id = self.custom_id.clone();
        if let Err(e) = callback.call(self, interaction).await {
            error!(modal = %custom_id, error = %e, "modal callback failed");
        }
    }
}

impl Nestable for Modal {
    fn items(&self) -> Vec<&Item> {
        self.children.iter().collect()
    }

    fn items_mut(&mut self) -> Vec<&mut Item> {
        self.children.iter_mut().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GroupOption;
    use crate::ui::{Button, InputText, Label, RadioGroup, TextDisplay};
    use serde_json::json;

    fn report_modal() -> Modal {
        let mut modal = Modal::new("Report").unwrap().custom_id("report").unwrap();
        modal
            .add_item(InputText::new().custom_id("subject").label("Subject"))
            .unwrap();
        modal
            .add_item(
                Label::new(
                    "Severity",
                    RadioGroup::new(vec![GroupOption::new("Low", "low"), GroupOption::new("High", "high")])
                        .custom_id("severity"),
                )
                .unwrap(),
            )
            .unwrap();
        modal
    }

    #[test]
    fn bare_input_is_wrapped_in_a_row() {
        let modal = report_modal();
        assert_eq!(modal.children()[0].component_type(), crate::types::ComponentType::ActionRow);
        assert!(modal.is_persistent());
    }

    #[test]
    fn rejects_buttons_and_a_sixth_item() {
        let mut modal = Modal::new("Form").unwrap();
        assert!(modal.add_item(Button::new("x")).is_err());
        for n in 0..5 {
            modal.add_item(TextDisplay::new(n.to_string())).unwrap();
        }
        assert!(matches!(
            modal.add_item(TextDisplay::new("late")),
            Err(ComponentError::CapacityExceeded { container: "Modal", max: 5 })
        ));
        assert!(Modal::new("t".repeat(46)).is_err());
    }

    #[test]
    fn payload_is_a_modal_response() {
        let body = serde_json::to_value(report_modal().to_payload()).unwrap();
        assert_eq!(body["type"], json!(9));
        assert_eq!(body["data"]["title"], json!("Report"));
        assert_eq!(body["data"]["custom_id"], json!("report"));
        assert_eq!(body["data"]["components"][0]["components"][0]["custom_id"], json!("subject"));
        assert_eq!(body["data"]["components"][1]["type"], json!(18));
    }

    #[test]
    fn refresh_absorbs_submitted_values() {
        let mut modal = report_modal();
        let interaction = Interaction::from_value(json!({
            "id": "1",
            "type": 5,
            "token": "t",
            "user": { "id": "7" },
            "data": {
                "custom_id": "report",
                "components": [
                    { "type": 1, "components": [
                        { "type": 4, "custom_id": "subject", "value": "Crash on start" },
                    ]},
                    { "type": 18, "component": {
                        "type": 21, "custom_id": "severity", "value": "high",
                    }},
                ],
            },
        }))
        .unwrap();
        modal.refresh(interaction.modal_data().unwrap());

        let subject = modal.get_item("subject").and_then(Item::as_input_text);
        assert_eq!(subject.and_then(|i| i.submitted()), Some("Crash on start"));
        match modal.get_item("severity") {
            Some(Item::RadioGroup(group)) => assert_eq!(group.value(), Some("high")),
            other => panic!("expected radio group, got {:?}", other),
        }
    }
}
