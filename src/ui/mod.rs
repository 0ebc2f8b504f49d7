//! Interactive component trees: items, layout containers, the two message
//! surfaces, modals, and the store that routes interactions back to them.
//!
//! Items and containers are plain owned data. Registering a surface with a
//! [`ViewStore`] turns it into a live [`ViewHandle`] that receives
//! interactions and times out.

mod action_row;
mod button;
mod callback;
mod container;
mod designer;
mod display;
mod input;
mod item;
mod label;
mod modal;
mod runtime;
mod section;
mod select;
mod store;
mod view;
mod weights;

pub use self::action_row::ActionRow;
pub use self::button::Button;
pub use self::callback::{CallbackFuture, ItemCallback, ModalCallback};
pub use self::container::Container;
pub use self::designer::{DesignerView, MAX_DESIGNER_COMPONENTS};
pub use self::display::{File, MediaGallery, Separator, TextDisplay, Thumbnail};
pub use self::input::{Checkbox, CheckboxGroup, FileUpload, InputText, RadioGroup};
pub use self::item::{Disableable, Item, ItemKey, Nestable, UnknownItem, ViewItem};
pub use self::label::Label;
pub use self::modal::{Modal, MAX_MODAL_ITEMS};
pub use self::runtime::{
    DefaultHooks, StopReason, ViewHandle, ViewHooks, ViewSettings, DEFAULT_TIMEOUT,
};
pub use self::section::{Section, MAX_SECTION_ITEMS};
pub use self::select::Select;
pub use self::store::ViewStore;
pub use self::view::{AnyView, View, MAX_VIEW_CHILDREN};
pub use self::weights::{ViewWeights, ROW_COUNT, ROW_WIDTH};
