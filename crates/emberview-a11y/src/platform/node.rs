use std::collections::BTreeMap;

use crate::descriptor::{CollectionInfo, CollectionItemInfo, RangeInfo};
use crate::platform::Rect;

/// Class name projected for generic content nodes with no engine class.
pub const CLASS_GENERIC_VIEW: &str = "emberview.View";

/// Class name projected for the session root and for shell nodes.
pub const CLASS_CONTENT_VIEW: &str = "emberview.ContentView";

/// Element kinds the engine can navigate between, advertised on the root so
/// assistive technologies know which arguments [`Action::NextElement`] and
/// [`Action::PreviousElement`] accept.
pub const SUPPORTED_ELEMENT_KINDS: &str = "ARTICLE,BUTTON,CHECKBOX,COMBOBOX,CONTROL,\
FOCUSABLE,FRAME,GRAPHIC,H1,H2,H3,H4,H5,H6,HEADING,LANDMARK,LINK,LIST,LIST_ITEM,MAIN,\
MEDIA,RADIO,SECTION,TABLE,TEXT_FIELD,UNVISITED_LINK,VISITED_LINK";

/// Keys of the out-of-band extras attached to projected nodes.
pub mod extras {
    pub const HINT: &str = "hint";
    pub const ROLE: &str = "role";
    pub const ROLE_DESCRIPTION: &str = "roleDescription";
    /// Root-only: comma-separated element kinds navigation understands.
    pub const ELEMENT_KINDS: &str = "supportedElementKinds";
}

/// Text movement granularities, combinable as a bitmask.
pub mod granularity {
    pub const CHARACTER: u32 = 1;
    pub const WORD: u32 = 1 << 1;
    pub const LINE: u32 = 1 << 2;
    pub const PARAGRAPH: u32 = 1 << 3;

    /// Every granularity the content engine can move by.
    pub const ALL: u32 = CHARACTER | WORD | LINE | PARAGRAPH;
}

/// An action an assistive technology can request on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    AccessibilityFocus,
    ClearAccessibilityFocus,
    Click,
    LongClick,
    Select,
    ScrollForward,
    ScrollBackward,
    NextElement,
    PreviousElement,
    NextAtGranularity,
    PreviousAtGranularity,
    SetSelection,
    Cut,
    Copy,
    Paste,
    SetText,
    /// A platform action this layer has no mapping for.
    Other(u32),
}

/// Classified text-input kind of an editable node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputClass {
    Email,
    Number,
    Password,
    Telephone,
    Text,
    Url,
}

impl InputClass {
    /// Classify the engine's raw input-type string, case-insensitively.
    /// Unknown strings are unclassified rather than an error.
    pub fn from_input_type(input_type: &str) -> Option<Self> {
        match input_type.to_ascii_lowercase().as_str() {
            "email" => Some(Self::Email),
            "number" => Some(Self::Number),
            "password" => Some(Self::Password),
            "tel" => Some(Self::Telephone),
            "text" => Some(Self::Text),
            "url" => Some(Self::Url),
            _ => None,
        }
    }
}

/// The platform-facing description of one accessible node.
///
/// Built fresh on every platform query; the platform owns the object this is
/// copied into, so nothing here is retained after the query returns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeInfo {
    /// Package identity of the hosting application.
    pub package: String,
    /// Platform widget class this node impersonates.
    pub class_name: String,
    pub text: String,
    /// Supported actions, in the order they were advertised.
    pub actions: Vec<Action>,
    /// Bitmask of supported text movement granularities.
    pub movement_granularities: u32,
    /// Parent node identifier; `None` on the root.
    pub parent: Option<i32>,
    /// Child identifiers in document order.
    pub children: Vec<i32>,
    pub bounds_in_screen: Option<Rect>,
    pub bounds_in_parent: Option<Rect>,
    /// Out-of-band string extras (role, hint, element kinds).
    pub extras: BTreeMap<String, String>,
    pub range: Option<RangeInfo>,
    pub collection: Option<CollectionInfo>,
    pub collection_item: Option<CollectionItemInfo>,
    pub input_class: Option<InputClass>,

    pub accessibility_focused: bool,
    pub checkable: bool,
    pub checked: bool,
    pub clickable: bool,
    pub content_invalid: bool,
    pub editable: bool,
    pub enabled: bool,
    pub focusable: bool,
    pub focused: bool,
    pub long_clickable: bool,
    pub multi_line: bool,
    pub password: bool,
    pub scrollable: bool,
    pub selected: bool,
    pub visible_to_user: bool,
    pub selectable: bool,
    /// Only projected on platforms whose node model has the property.
    pub context_clickable: Option<bool>,
}

impl NodeInfo {
    /// Advertise an action, keeping the list duplicate free.
    pub fn add_action(&mut self, action: Action) {
        if !self.actions.contains(&action) {
            self.actions.push(action);
        }
    }

    /// Check whether an action is advertised.
    pub fn has_action(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    /// Attach an out-of-band string extra.
    pub fn put_extra(&mut self, key: &str, value: impl Into<String>) {
        self.extras.insert(key.to_string(), value.into());
    }
}
