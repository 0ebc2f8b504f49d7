use super::item::{check_len, mismatch, refresh_children};
use super::{Item, Nestable, ViewItem};
use crate::error::ComponentError;
use crate::types::component;
use crate::types::{Component, ComponentType};

const MAX_LABEL: usize = 45;
const MAX_DESCRIPTION: usize = 100;

/// Wraps exactly one modal input with a title and optional description.
#[derive(Clone, Debug)]
pub struct Label {
    id: Option<u32>,
    label: String,
    description: Option<String>,
    item: Box<Item>,
}

impl Label {
    pub fn new(label: impl Into<String>, item: impl Into<Item>) -> Result<Self, ComponentError> {
        let label = label.into();
        check_len("label", Some(&label), MAX_LABEL)?;
        let item = item.into();
        check_labelled(&item)?;
        Ok(Self {
            id: None,
            label,
            description: None,
            item: Box::new(item),
        })
    }

    pub fn from_component(label: component::Label) -> Self {
        Self {
            id: label.id,
            label: label.label,
            description: label.description,
            item: Box::new(Item::from_component(*label.component)),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Result<Self, ComponentError> {
        self.set_description(Some(description.into()))?;
        Ok(self)
    }

    pub fn set_description(&mut self, description: Option<String>) -> Result<(), ComponentError> {
        check_len("label description", description.as_deref(), MAX_DESCRIPTION)?;
        self.description = description;
        Ok(())
    }

    /// Swap the wrapped input.
    pub fn set_item(&mut self, item: impl Into<Item>) -> Result<&mut Self, ComponentError> {
        let item = item.into();
        check_labelled(&item)?;
        self.item = Box::new(item);
        Ok(self)
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

fn check_labelled(item: &Item) -> Result<(), ComponentError> {
    match item {
        Item::InputText(input) if input.has_label() => Err(ComponentError::AmbiguousLabel),
        Item::InputText(_)
        | Item::Select(_)
        | Item::FileUpload(_)
        | Item::RadioGroup(_)
        | Item::CheckboxGroup(_)
        | Item::Checkbox(_) => item.validate(),
        other => Err(ComponentError::WrongItemType {
            container: "Label",
            item: other.component_type(),
        }),
    }
}

impl Nestable for Label {
    fn items(&self) -> Vec<&Item> {
        vec![&*self.item]
    }

    fn items_mut(&mut self) -> Vec<&mut Item> {
        vec![&mut *self.item]
    }
}

impl ViewItem for Label {
    fn component_type(&self) -> ComponentType {
        ComponentType::Label
    }

    fn id(&self) -> Option<u32> {
        self.id
    }

    fn set_id(&mut self, id: Option<u32>) {
        self.id = id;
    }

    fn is_dispatchable(&self) -> bool {
        self.item.is_dispatchable()
    }

    fn is_persistent(&self) -> bool {
        self.item.is_persistent()
    }

    fn validate(&self) -> Result<(), ComponentError> {
        check_len("label", Some(&self.label), MAX_LABEL)?;
        check_len("label description", self.description.as_deref(), MAX_DESCRIPTION)?;
        check_labelled(&self.item)
    }

    fn to_component(&self) -> Component {
        Component::Label(component::Label {
            id: self.id,
            label: self.label.clone(),
            description: self.description.clone(),
            component: Box::new(self.item.to_component()),
        })
    }

    fn refresh_component(&mut self, component: Component) {
        match component {
            Component::Label(label) => {
                self.id = label.id;
                refresh_children([&mut *self.item], vec![*label.component]);
            }
            other => mismatch(ComponentType::Label, &other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GroupOption;
    use crate::ui::{Button, InputText, RadioGroup, Select};
    use serde_json::json;

    #[test]
    fn input_with_its_own_label_is_ambiguous() {
        let err = Label::new("Subject", InputText::new().label("Subject")).unwrap_err();
        assert!(matches!(err, ComponentError::AmbiguousLabel));

        let mut label = Label::new("Subject", InputText::new().custom_id("subject")).unwrap();
        assert!(matches!(
            label.set_item(InputText::new().label("dup")),
            Err(ComponentError::AmbiguousLabel)
        ));
        assert_eq!(label.item().custom_id(), Some("subject"));
    }

    #[test]
    fn only_inputs_can_be_labelled() {
        assert!(Label::new("Pick", Select::string().custom_id("pick")).is_ok());
        assert!(matches!(
            Label::new("Go", Button::new("Go")),
            Err(ComponentError::WrongItemType { container: "Label", .. })
        ));
    }

    #[test]
    fn text_limits() {
        assert!(Label::new("x".repeat(46), InputText::new()).is_err());
        let label = Label::new("ok", InputText::new()).unwrap();
        assert!(label.clone().description("d".repeat(101)).is_err());
        assert!(label.description("fine").is_ok());
    }

    #[test]
    fn serializes_with_nested_component() {
        let label = Label::new(
            "Favourite colour",
            RadioGroup::new(vec![GroupOption::new("Red", "red")]).custom_id("colour"),
        )
        .unwrap()
        .description("Pick one")
        .unwrap();
        assert_eq!(
            label.to_component_dict(),
            json!({
                "type": 18,
                "label": "Favourite colour",
                "description": "Pick one",
                "component": {
                    "type": 21,
                    "custom_id": "colour",
                    "options": [{ "value": "red", "label": "Red" }],
                },
            })
        );
        assert!(label.is_persistent());
        assert_eq!(label.walk_items().len(), 1);
    }
}
