//! Inspector panel sync.
//!
//! Two directions, both immediate:
//!
//! - **Model → panel**: `snapshot` projects the selected item into the
//!   flat field set the panel displays. `None` means "no selection";
//!   the host shows the placeholder and hides the property panel.
//! - **Panel → model**: `set_field` writes one edited field straight back
//!   into the selected item. Numeric fields coerce, size fields keep the
//!   10×10 floor, color fields normalize to 6-hex form with the black
//!   fallback.

use crate::session::Session;
use dc_core::geom::coerce_or;
use dc_core::model::{Background, Color, ItemKind};
use serde::Serialize;

/// Text-specific fields, present only for `kind == text`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFields {
    pub font_size: f32,
    pub font_color: String,
    pub font_family: String,
    pub font_weight: u16,
}

/// Everything the property panel shows for the selected item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectorFields {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// 6-hex background color; white fallback when an image is set.
    pub background_color: String,
    /// Background image URL, empty when none.
    pub background_image: String,
    pub border_color: String,
    pub border_width: f32,
    pub border_radius: f32,
    pub opacity: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextFields>,
}

/// Project the selection into panel fields. `None` = placeholder state.
pub fn snapshot(session: &Session) -> Option<InspectorFields> {
    let item = session.selected_item()?;

    let (background_color, background_image) = match &item.background {
        Some(Background::Color(color)) => (color.to_hex(), String::new()),
        Some(Background::Image { url }) => ("#ffffff".to_string(), url.clone()),
        None => ("#ffffff".to_string(), String::new()),
    };

    let text = match &item.kind {
        ItemKind::Text { font, .. } => Some(TextFields {
            font_size: font.size,
            font_color: font.color.to_hex(),
            font_family: font.family.clone(),
            font_weight: font.weight,
        }),
        _ => None,
    };

    Some(InspectorFields {
        x: item.position.x,
        y: item.position.y,
        width: item.size.width(),
        height: item.size.height(),
        background_color,
        background_image,
        border_color: item.border.color.to_hex(),
        border_width: item.border.width,
        border_radius: item.border.radius,
        opacity: item.opacity,
        text,
    })
}

/// A panel field, identified the way the host names its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    PosX,
    PosY,
    Width,
    Height,
    BackgroundColor,
    BackgroundImage,
    BorderColor,
    BorderWidth,
    BorderRadius,
    Opacity,
    FontSize,
    FontColor,
    FontFamily,
    FontWeight,
}

impl Field {
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "posX" => Self::PosX,
            "posY" => Self::PosY,
            "width" => Self::Width,
            "height" => Self::Height,
            "backgroundColor" => Self::BackgroundColor,
            "backgroundImage" => Self::BackgroundImage,
            "borderColor" => Self::BorderColor,
            "borderWidth" => Self::BorderWidth,
            "borderRadius" => Self::BorderRadius,
            "opacity" => Self::Opacity,
            "fontSize" => Self::FontSize,
            "fontColor" => Self::FontColor,
            "fontFamily" => Self::FontFamily,
            "fontWeight" => Self::FontWeight,
            _ => return None,
        })
    }
}

/// Apply one edited field to the selected item. Returns false when
/// nothing is selected, or a font field targets a non-text item.
pub fn set_field(session: &mut Session, field: Field, raw: &str) -> bool {
    let Some(item) = session.selected_item_mut() else {
        return false;
    };

    match field {
        Field::PosX => item.position.x = coerce_or(raw, 0.0),
        Field::PosY => item.position.y = coerce_or(raw, 0.0),
        Field::Width => item.size.set_width(coerce_or(raw, 10.0)),
        Field::Height => item.size.set_height(coerce_or(raw, 10.0)),
        Field::BackgroundColor => item.set_background_color(Color::parse_css_or_black(raw)),
        Field::BackgroundImage => item.set_background_image(raw),
        Field::BorderColor => item.border.color = Color::parse_css_or_black(raw),
        Field::BorderWidth => item.border.width = coerce_or(raw, 0.0),
        Field::BorderRadius => item.border.radius = coerce_or(raw, 0.0),
        Field::Opacity => {
            item.opacity = raw.trim().parse::<f32>().unwrap_or(1.0).clamp(0.0, 1.0);
        }
        Field::FontSize | Field::FontColor | Field::FontFamily | Field::FontWeight => {
            let ItemKind::Text { font, .. } = &mut item.kind else {
                return false;
            };
            match field {
                Field::FontSize => font.size = coerce_or(raw, 12.0),
                Field::FontColor => font.color = Color::parse_css_or_black(raw),
                Field::FontFamily => font.family = raw.to_string(),
                Field::FontWeight => font.weight = raw.trim().parse().unwrap_or(400),
                _ => unreachable!(),
            }
        }
    }
    true
}
