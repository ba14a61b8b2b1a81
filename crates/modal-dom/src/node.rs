#![forbid(unsafe_code)]

//! Element nodes stored in a [`Document`](crate::Document) arena.

use ahash::AHashMap;

/// Handle to an element in a document arena.
///
/// Ids are only minted by [`Document::create_element`](crate::Document::create_element)
/// and stay valid for the document's lifetime; a removed element keeps its
/// slot but is no longer reachable from the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Raw arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The element vocabulary the host document distinguishes.
///
/// Only the kinds that matter for focus behavior and dialog assembly are
/// modeled; everything else is a [`Container`](Self::Container) or
/// [`Span`](Self::Span).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Generic block container.
    Container,
    /// Generic inline element (used for the focus-trap sentinels).
    Span,
    /// Section heading, level 1 through 6.
    Heading(u8),
    /// Text paragraph.
    Paragraph,
    /// Dialog surface.
    Dialog,
    /// Push button.
    Button,
    /// Hyperlink.
    Link,
    /// Form input.
    Input,
    /// Selection list.
    Select,
    /// Multi-line text field.
    TextArea,
    /// Disclosure summary.
    Summary,
    /// Audio player.
    Audio,
    /// Video player.
    Video,
    /// Nested browsing frame.
    Frame,
    /// Free-form editable region.
    Editable,
}

/// A single element: kind, attributes, classes, tree links, text, and
/// scroll offsets.
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) kind: ElementKind,
    pub(crate) attrs: AHashMap<String, String>,
    pub(crate) classes: Vec<String>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) text: String,
    pub(crate) tab_index: Option<i32>,
    pub(crate) scroll: (u32, u32),
}

impl Element {
    pub(crate) fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attrs: AHashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
            parent: None,
            text: String::new(),
            tab_index: None,
            scroll: (0, 0),
        }
    }

    /// The element's kind.
    #[inline]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Explicit tab index, if one was assigned.
    #[inline]
    pub fn tab_index(&self) -> Option<i32> {
        self.tab_index
    }

    /// Whether the element can receive focus without an explicit tab index.
    ///
    /// Disabled controls, links without a destination, and media without
    /// controls are not natively focusable.
    pub fn is_natively_focusable(&self) -> bool {
        let disabled = self.attrs.contains_key("disabled");
        match self.kind {
            ElementKind::Button | ElementKind::Select | ElementKind::TextArea => !disabled,
            ElementKind::Input => !disabled && self.attrs.get("type").map(String::as_str) != Some("hidden"),
            ElementKind::Link => self.attrs.contains_key("href"),
            ElementKind::Audio | ElementKind::Video => self.attrs.contains_key("controls"),
            ElementKind::Frame | ElementKind::Summary | ElementKind::Editable => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_button_is_not_focusable() {
        let mut el = Element::new(ElementKind::Button);
        assert!(el.is_natively_focusable());
        el.attrs.insert("disabled".into(), String::new());
        assert!(!el.is_natively_focusable());
    }

    #[test]
    fn link_needs_destination() {
        let mut el = Element::new(ElementKind::Link);
        assert!(!el.is_natively_focusable());
        el.attrs.insert("href".into(), "#".into());
        assert!(el.is_natively_focusable());
    }

    #[test]
    fn hidden_input_is_not_focusable() {
        let mut el = Element::new(ElementKind::Input);
        assert!(el.is_natively_focusable());
        el.attrs.insert("type".into(), "hidden".into());
        assert!(!el.is_natively_focusable());
    }

    #[test]
    fn media_needs_controls() {
        let mut el = Element::new(ElementKind::Video);
        assert!(!el.is_natively_focusable());
        el.attrs.insert("controls".into(), String::new());
        assert!(el.is_natively_focusable());
    }

    #[test]
    fn containers_are_inert() {
        assert!(!Element::new(ElementKind::Container).is_natively_focusable());
        assert!(!Element::new(ElementKind::Heading(2)).is_natively_focusable());
        assert!(!Element::new(ElementKind::Dialog).is_natively_focusable());
    }
}
