//! Static page export.
//!
//! Produces a fully self-contained document: fixed style block, a
//! `.canvas` wrapper matching the live canvas, and every item's markup
//! verbatim. Drag handles stay in the markup and are hidden by CSS, so
//! the exported page needs no script.

use crate::doc::Document;
use crate::emitter::canvas_markup;
use crate::geom::px;

/// File name the host gives the downloaded document.
pub const EXPORT_FILE_NAME: &str = "proyecto.html";

/// The fixed CSS reset/style block of the exported page.
const EXPORT_STYLE: &str = "\
  body{margin:0;background:#f6f8fb}
  .canvas{position:relative;margin:16px auto;border:1px dashed #cbd5e1}
  .item{position:absolute;overflow:hidden}
  .item .drag-handle{display:none}
  .item .content{position:absolute;left:0;right:0;top:0;bottom:0;padding:.5rem;overflow:auto}
  .item[data-kind=\"image\"] .content{padding:0}
  .item .text{min-width:120px;min-height:60px;line-height:1.3}";

/// Serialize the canvas as a standalone static HTML document.
pub fn export_static(doc: &Document) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"es\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Proyecto</title>\n\
         <style>\n{style}\n</style>\n\
         </head>\n\
         <body>\n\
         <div class=\"canvas\" style=\"width:{width};height:{height};background:{background};\">\n\
         {items}\n\
         </div>\n\
         </body></html>",
        style = EXPORT_STYLE,
        width = px(doc.width),
        height = px(doc.height),
        background = doc.background.to_css(),
        items = canvas_markup(doc),
    )
}
