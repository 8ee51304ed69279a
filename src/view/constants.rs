//! Layout dimension constants for terminal rendering.

/// Height of the query summary line.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the page selector line.
pub const PAGINATION_HEIGHT: u16 = 1;

/// Height of one grid card (border + subtitle, size, tags).
pub const CARD_HEIGHT: u16 = 5;

/// Separator between tag badges.
pub const TAG_SEPARATOR: &str = " · ";
