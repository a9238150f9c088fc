//! Interaction scripts: a recorded list of user actions replayed against a
//! board.

use crate::error::AppError;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use sketchboard_core::{NoPrompt, ShapeColor, ToolKind, Whiteboard};
use sketchboard_render::PendingImport;
use std::path::{Path, PathBuf};

/// One user action.
///
/// Coordinates are screen positions, exactly as a pointer would report them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Tool { tool: ToolKind },
    /// Pick a palette color (hex). Switches to the pen.
    Color { color: String },
    StrokeWidth { width: f64 },
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Leave,
    /// Press at `from`, move to `to`, release at `to`.
    Drag { from: [f64; 2], to: [f64; 2] },
    /// Select the text tool and click at `(x, y)`, answering the prompt with
    /// `content`. A missing `content` cancels the prompt.
    Text {
        x: f64,
        y: f64,
        #[serde(default)]
        content: Option<String>,
    },
    Undo,
    Redo,
    Clear,
    ZoomIn,
    ZoomOut,
    ResetView,
    /// Import an image file. Relative paths resolve against the script's
    /// directory.
    Image { path: PathBuf },
}

/// A list of steps, stored as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        log::debug!("loading script from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// What a replay did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub steps: usize,
    /// Steps that changed the board and committed a snapshot.
    pub commits: usize,
    pub failed_imports: usize,
}

/// Replay `script` against `board`.
///
/// A bad color aborts the run. A failed image import is logged and skipped,
/// leaving the board as it was.
pub fn run_script(
    script: &Script,
    board: &mut Whiteboard,
    base_dir: &Path,
) -> Result<RunReport, AppError> {
    let mut report = RunReport::default();
    for step in &script.steps {
        log::trace!("step {}: {step:?}", report.steps);
        let committed = match step {
            Step::Tool { tool } => {
                // Changing tools finishes an open gesture.
                let committed = board.pointer_leave();
                board.set_tool(*tool);
                committed
            }
            Step::Color { color } => {
                let color = ShapeColor::from_hex(color)?;
                let committed = board.pointer_leave();
                board.set_color(color);
                committed
            }
            Step::StrokeWidth { width } => {
                board.set_stroke_width(*width);
                false
            }
            Step::Down { x, y } => board.pointer_down(Point::new(*x, *y)),
            Step::Move { x, y } => board.pointer_move(Point::new(*x, *y)),
            Step::Up { x, y } => board.pointer_up(Point::new(*x, *y)),
            Step::Leave => board.pointer_leave(),
            Step::Drag { from, to } => {
                let to = Point::new(to[0], to[1]);
                let pressed = board.pointer_down(Point::new(from[0], from[1]));
                board.pointer_move(to);
                pressed | board.pointer_up(to)
            }
            Step::Text { x, y, content } => {
                let committed = board.pointer_leave();
                committed | place_text(board, Point::new(*x, *y), content.clone())
            }
            Step::Undo => {
                board.undo();
                false
            }
            Step::Redo => {
                board.redo();
                false
            }
            Step::Clear => {
                board.clear();
                true
            }
            Step::ZoomIn => {
                board.zoom_in();
                false
            }
            Step::ZoomOut => {
                board.zoom_out();
                false
            }
            Step::ResetView => {
                board.reset_view();
                false
            }
            Step::Image { path } => {
                let path = base_dir.join(path);
                match PendingImport::from_path(&path).wait(board) {
                    Ok(_) => true,
                    Err(_) => {
                        log::warn!("skipping image {}", path.display());
                        report.failed_imports += 1;
                        false
                    }
                }
            }
        };
        if committed {
            report.commits += 1;
        }
        report.steps += 1;
    }
    log::info!(
        "replayed {} steps, {} commits",
        report.steps,
        report.commits
    );
    Ok(report)
}

fn place_text(board: &mut Whiteboard, at: Point, content: Option<String>) -> bool {
    let mut answer = content;
    board.set_prompt(move |_at: Point| answer.take());
    board.set_tool(ToolKind::Text);
    let committed = board.pointer_down(at);
    board.pointer_up(at);
    board.set_prompt(NoPrompt);
    committed
}
