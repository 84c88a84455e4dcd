//! Toolbar and panel command surface.
//!
//! Every button the host exposes maps to one `EditorCommand`; `execute`
//! runs it against the session. The only failures are the two alert
//! preconditions (`EditorError`), which the host shows as blocking
//! alerts; everything else runs to completion.

use crate::session::{EditorError, Session};
use dc_core::export::EXPORT_FILE_NAME;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    AddRect,
    AddCircle,
    AddText,
    AddImage { url: String },
    ApplyCanvasConfig {
        width: String,
        height: String,
        background: String,
    },
    SetCanvasBackground { value: String },
    ClearCanvas,
    BringToFront,
    SendToBack,
    DeleteSelected,
    /// Serialize the live canvas into the HTML panel.
    RefreshFromCanvas,
    InsertHtml { raw: String },
    ReplaceCanvas { raw: String },
    ExportStatic,
}

/// What a command hands back to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Done,
    /// Text for the HTML panel.
    Markup(String),
    /// A document to download.
    Export {
        file_name: &'static str,
        document: String,
    },
}

pub fn execute(session: &mut Session, command: EditorCommand) -> Result<CommandOutcome, EditorError> {
    match command {
        EditorCommand::AddRect => {
            session.add_rect();
        }
        EditorCommand::AddCircle => {
            session.add_circle();
        }
        EditorCommand::AddText => {
            session.add_text();
        }
        EditorCommand::AddImage { url } => {
            session.add_image(&url)?;
        }
        EditorCommand::ApplyCanvasConfig {
            width,
            height,
            background,
        } => session.apply_canvas_config(&width, &height, &background),
        EditorCommand::SetCanvasBackground { value } => session.set_canvas_background(&value),
        EditorCommand::ClearCanvas => session.clear_canvas(),
        EditorCommand::BringToFront => {
            session.bring_to_front();
        }
        EditorCommand::SendToBack => {
            session.send_to_back();
        }
        EditorCommand::DeleteSelected => {
            session.delete_selected();
        }
        EditorCommand::RefreshFromCanvas => {
            return Ok(CommandOutcome::Markup(session.canvas_markup()));
        }
        EditorCommand::InsertHtml { raw } => {
            session.insert_html(&raw)?;
        }
        EditorCommand::ReplaceCanvas { raw } => {
            return Ok(CommandOutcome::Markup(session.replace_canvas(&raw)?));
        }
        EditorCommand::ExportStatic => {
            return Ok(CommandOutcome::Export {
                file_name: EXPORT_FILE_NAME,
                document: session.export_static(),
            });
        }
    }
    Ok(CommandOutcome::Done)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(900.0, 600.0, 7)
    }

    #[test]
    fn add_commands_create_and_select() {
        let mut s = session();
        execute(&mut s, EditorCommand::AddRect).unwrap();
        execute(&mut s, EditorCommand::AddText).unwrap();
        assert_eq!(s.document().len(), 2);
        assert!(s.selected().is_some());
    }

    #[test]
    fn alert_preconditions_surface_as_errors() {
        let mut s = session();
        assert_eq!(
            execute(&mut s, EditorCommand::AddImage { url: "".into() }),
            Err(EditorError::EmptyImageUrl)
        );
        assert_eq!(
            execute(&mut s, EditorCommand::InsertHtml { raw: " ".into() }),
            Err(EditorError::EmptyHtml)
        );
        assert_eq!(
            EditorError::EmptyImageUrl.to_string(),
            "Coloca una URL de imagen."
        );
    }

    #[test]
    fn refresh_returns_live_markup() {
        let mut s = session();
        execute(&mut s, EditorCommand::AddRect).unwrap();
        let outcome = execute(&mut s, EditorCommand::RefreshFromCanvas).unwrap();
        match outcome {
            CommandOutcome::Markup(markup) => assert!(markup.contains("data-kind=\"rect\"")),
            other => panic!("expected markup, got {other:?}"),
        }
    }

    #[test]
    fn export_names_the_download() {
        let mut s = session();
        let outcome = execute(&mut s, EditorCommand::ExportStatic).unwrap();
        match outcome {
            CommandOutcome::Export {
                file_name,
                document,
            } => {
                assert_eq!(file_name, "proyecto.html");
                assert!(document.starts_with("<!DOCTYPE html>"));
            }
            other => panic!("expected export, got {other:?}"),
        }
    }
}
