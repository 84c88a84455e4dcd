pub mod doc;
pub mod emitter;
pub mod export;
pub mod geom;
pub mod id;
pub mod model;
pub mod parser;
pub mod sanitize;

pub use doc::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, Document};
pub use emitter::{canvas_markup, emit_item, emit_nodes};
pub use export::{EXPORT_FILE_NAME, export_static};
pub use geom::{MIN_ITEM_SIZE, Point, Size, clamp, coerce_or, px};
pub use id::ItemId;
pub use model::*;
pub use parser::{Attr, HtmlNode, parse_fragment};
pub use sanitize::{sanitize, sanitize_nodes};
