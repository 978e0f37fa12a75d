//! Item variant enumeration and REST path routing.

use std::fmt;

/// The item variants a board can hold.
///
/// Every variant except `Generic` has a dedicated variant-plural endpoint
/// under `/boards/{id}/`; `Generic` routes to the shared `/items` endpoint
/// used for type-agnostic reads, updates, and deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// A sticky note with text content and a fill colour.
    StickyNote,
    /// A geometric shape; its discriminant lives at `data.shape`.
    Shape,
    /// A connector line between two items.
    Connector,
    /// A frame grouping child items.
    Frame,
    /// A free-standing text element.
    Text,
    /// A card with title and description.
    Card,
    /// An app card managed by an external application.
    AppCard,
    /// An uploaded document.
    Document,
    /// An uploaded image.
    Image,
    /// An embedded external resource.
    Embed,
    /// Type-agnostic item addressing via the shared `/items` endpoint.
    Generic,
}

impl ItemKind {
    /// All variants addressable by name in tool arguments.
    pub const ALL: [Self; 11] = [
        Self::StickyNote,
        Self::Shape,
        Self::Connector,
        Self::Frame,
        Self::Text,
        Self::Card,
        Self::AppCard,
        Self::Document,
        Self::Image,
        Self::Embed,
        Self::Generic,
    ];

    /// Parses a variant name as used in tool arguments and item filters.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "sticky_note" => Some(Self::StickyNote),
            "shape" => Some(Self::Shape),
            "connector" => Some(Self::Connector),
            "frame" => Some(Self::Frame),
            "text" => Some(Self::Text),
            "card" => Some(Self::Card),
            "app_card" => Some(Self::AppCard),
            "document" => Some(Self::Document),
            "image" => Some(Self::Image),
            "embed" => Some(Self::Embed),
            "generic" | "item" => Some(Self::Generic),
            _ => None,
        }
    }

    /// Returns the canonical variant name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StickyNote => "sticky_note",
            Self::Shape => "shape",
            Self::Connector => "connector",
            Self::Frame => "frame",
            Self::Text => "text",
            Self::Card => "card",
            Self::AppCard => "app_card",
            Self::Document => "document",
            Self::Image => "image",
            Self::Embed => "embed",
            Self::Generic => "generic",
        }
    }

    /// Returns the plural REST path segment under `/boards/{id}/`.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::StickyNote => "sticky_notes",
            Self::Shape => "shapes",
            Self::Connector => "connectors",
            Self::Frame => "frames",
            Self::Text => "texts",
            Self::Card => "cards",
            Self::AppCard => "app_cards",
            Self::Document => "documents",
            Self::Image => "images",
            Self::Embed => "embeds",
            Self::Generic => "items",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
