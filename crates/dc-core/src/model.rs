//! Item model for the canvas.
//!
//! An `Item` is a single placed visual object: rectangle, circle, editable
//! text block, image, or raw HTML block. All style is strongly typed
//! (colors, pixel values, opacity) and only takes its CSS string form
//! in the emitter.

use crate::geom::{Point, Size};
use crate::id::ItemId;
use serde::{Deserialize, Serialize};

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGB color. Stored as 3 × u8; the display form is always the lowercase
/// 6-hex-digit string (`#4aa3ff`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// CSS color keywords the inspector resolves. Subset: the 16 basic keywords
/// plus the extended names that show up in pasted markup.
const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0x00, 0x00, 0x00)),
    ("silver", Color::rgb(0xc0, 0xc0, 0xc0)),
    ("gray", Color::rgb(0x80, 0x80, 0x80)),
    ("grey", Color::rgb(0x80, 0x80, 0x80)),
    ("white", Color::rgb(0xff, 0xff, 0xff)),
    ("maroon", Color::rgb(0x80, 0x00, 0x00)),
    ("red", Color::rgb(0xff, 0x00, 0x00)),
    ("purple", Color::rgb(0x80, 0x00, 0x80)),
    ("fuchsia", Color::rgb(0xff, 0x00, 0xff)),
    ("magenta", Color::rgb(0xff, 0x00, 0xff)),
    ("green", Color::rgb(0x00, 0x80, 0x00)),
    ("lime", Color::rgb(0x00, 0xff, 0x00)),
    ("olive", Color::rgb(0x80, 0x80, 0x00)),
    ("yellow", Color::rgb(0xff, 0xff, 0x00)),
    ("navy", Color::rgb(0x00, 0x00, 0x80)),
    ("blue", Color::rgb(0x00, 0x00, 0xff)),
    ("teal", Color::rgb(0x00, 0x80, 0x80)),
    ("aqua", Color::rgb(0x00, 0xff, 0xff)),
    ("cyan", Color::rgb(0x00, 0xff, 0xff)),
    ("orange", Color::rgb(0xff, 0xa5, 0x00)),
    ("pink", Color::rgb(0xff, 0xc0, 0xcb)),
    ("brown", Color::rgb(0xa5, 0x2a, 0x2a)),
    ("gold", Color::rgb(0xff, 0xd7, 0x00)),
    ("transparent", Color::rgb(0x00, 0x00, 0x00)),
];

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string: `#RGB` or `#RRGGBB`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = hex_val(bytes[0])? << 4 | hex_val(bytes[1])?;
                let g = hex_val(bytes[2])? << 4 | hex_val(bytes[3])?;
                let b = hex_val(bytes[4])? << 4 | hex_val(bytes[5])?;
                Some(Self::rgb(r, g, b))
            }
            _ => None,
        }
    }

    /// Parse any accepted CSS color representation: hex, `rgb(r, g, b)`,
    /// or a color keyword.
    pub fn parse_css(css: &str) -> Option<Self> {
        let css = css.trim();
        if css.starts_with('#') {
            return Self::from_hex(css);
        }
        if let Some(args) = css
            .strip_prefix("rgb(")
            .or_else(|| css.strip_prefix("rgba("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let mut parts = args.split(',').map(str::trim);
            let r = parts.next()?.parse::<u8>().ok()?;
            let g = parts.next()?.parse::<u8>().ok()?;
            let b = parts.next()?.parse::<u8>().ok()?;
            return Some(Self::rgb(r, g, b));
        }
        let lower = css.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, color)| *color)
    }

    /// Parse with the inspector's black fallback for unparseable input.
    pub fn parse_css_or_black(css: &str) -> Self {
        Self::parse_css(css).unwrap_or_else(|| {
            log::debug!("unparseable color {css:?}, falling back to #000000");
            Self::BLACK
        })
    }

    /// Emit the normalized display form: lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// ─── Background & border ─────────────────────────────────────────────────

/// An item or canvas background: a flat color or an image reference.
/// Mutual exclusion is by construction: assigning one variant replaces
/// the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Background {
    Color(Color),
    Image { url: String },
}

impl Background {
    /// The CSS value the emitter writes for this background.
    pub fn to_css(&self) -> String {
        match self {
            Background::Color(color) => color.to_hex(),
            Background::Image { url } => {
                format!("url(\"{}\") center center / cover no-repeat", url)
            }
        }
    }
}

/// Inspector fallback for an unset border color.
pub const DEFAULT_BORDER_COLOR: Color = Color::rgb(0x1e, 0x29, 0x3b);

/// Border style. A zero `width` renders as no border, but `radius` applies
/// regardless (rounded rectangles and circles carry a radius with width 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub color: Color,
    pub width: f32,
    pub radius: f32,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            color: DEFAULT_BORDER_COLOR,
            width: 0.0,
            radius: 0.0,
        }
    }
}

impl Border {
    pub fn with_radius(radius: f32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }
}

// ─── Text styling ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontStyle {
    pub size: f32,
    pub color: Color,
    pub family: String,
    pub weight: u16,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            size: 28.0,
            color: Color::rgb(0x11, 0x11, 0x11),
            family: "Arial, Helvetica, sans-serif".into(),
            weight: 400,
        }
    }
}

// ─── Item kinds ──────────────────────────────────────────────────────────

/// The kind of content an item carries. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Rectangle: background/border only.
    Rect,

    /// Circle: a rectangle with a maxed-out corner radius.
    Circle,

    /// Editable text block.
    Text { content: String, font: FontStyle },

    /// Image by source URL, unvalidated. A bad URL renders broken.
    Image { src: String },

    /// Sanitized HTML fragment, carried as an opaque string.
    Html { markup: String },
}

impl ItemKind {
    /// Text block, with the placeholder content when none is given.
    pub fn text(content: Option<String>) -> Self {
        Self::Text {
            content: content.unwrap_or_else(|| "Escribe aquí…".into()),
            font: FontStyle::default(),
        }
    }

    pub fn image(src: impl Into<String>) -> Self {
        Self::Image { src: src.into() }
    }

    /// HTML block, with the placeholder fragment when none is given.
    pub fn html(markup: Option<String>) -> Self {
        Self::Html {
            markup: markup.unwrap_or_else(|| "<div>Bloque HTML</div>".into()),
        }
    }

    /// The `data-kind` attribute value, also used as the ID prefix.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::Html { .. } => "html",
        }
    }
}

// ─── Items ───────────────────────────────────────────────────────────────

/// Recognized creation options; every field optional with stated defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemOptions {
    pub left: Option<f32>,
    pub top: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub text: Option<String>,
    pub url: Option<String>,
    pub html: Option<String>,
}

/// A placed visual object on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub position: Point,
    pub size: Size,
    /// Paint order among overlapping items; assigned on insertion.
    pub stack: u32,
    /// Opacity in [0, 1].
    pub opacity: f32,
    pub background: Option<Background>,
    pub border: Border,
}

impl Item {
    /// Create an item with the creation defaults. The stack value is a
    /// placeholder until `Document::add` assigns a fresh one.
    pub fn create(kind: ItemKind, opts: &ItemOptions) -> Self {
        let width = opts
            .width
            .unwrap_or(if matches!(kind, ItemKind::Image { .. }) {
                260.0
            } else {
                240.0
            });
        let height = opts
            .height
            .unwrap_or(if matches!(kind, ItemKind::Text { .. }) {
                120.0
            } else {
                160.0
            });

        let (background, border) = match kind {
            ItemKind::Rect => (
                Some(Background::Color(Color::rgb(0x4a, 0xa3, 0xff))),
                Border::with_radius(8.0),
            ),
            ItemKind::Circle => (
                Some(Background::Color(Color::rgb(0x7d, 0xd3, 0xfc))),
                Border::with_radius(999.0),
            ),
            _ => (None, Border::default()),
        };

        Self {
            id: ItemId::with_prefix(kind.name()),
            kind,
            position: Point::new(opts.left.unwrap_or(80.0), opts.top.unwrap_or(80.0)),
            size: Size::new(width, height),
            stack: 0,
            opacity: 1.0,
            background,
            border,
        }
    }

    /// Check if a point (in canvas coordinates) is within this item's box.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.position.x
            && x <= self.position.x + self.size.width()
            && y >= self.position.y
            && y <= self.position.y + self.size.height()
    }

    /// Set the flat background color, clearing any background image.
    pub fn set_background_color(&mut self, color: Color) {
        self.background = Some(Background::Color(color));
    }

    /// Set the background image, clearing any flat color. An empty URL
    /// removes an existing image instead.
    pub fn set_background_image(&mut self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            if matches!(self.background, Some(Background::Image { .. })) {
                self.background = None;
            }
        } else {
            self.background = Some(Background::Image { url: url.into() });
        }
    }
}
