//! The whiteboard engine: scene, history and interaction session together.

use crate::camera::Camera;
use crate::config::{BoardConfig, ConfigError};
use crate::history::History;
use crate::input::PointerEvent;
use crate::scene::Scene;
use crate::session::{Action, Effect, InteractionSession, handle_event};
use crate::shapes::{Bitmap, Image, Shape, ShapeColor, ShapeId, Text};
use crate::tools::ToolKind;
use kurbo::Point;
use std::fmt;
use std::sync::Arc;

/// Source of text for the text tool.
pub trait TextPrompt {
    /// Ask for the content of a text placed at `at` (logical). `None` cancels.
    fn prompt(&mut self, at: Point) -> Option<String>;
}

impl<F> TextPrompt for F
where
    F: FnMut(Point) -> Option<String>,
{
    fn prompt(&mut self, at: Point) -> Option<String> {
        self(at)
    }
}

/// Prompt that always cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl TextPrompt for NoPrompt {
    fn prompt(&mut self, _at: Point) -> Option<String> {
        None
    }
}

/// A single whiteboard: the committed scene, its undo history and the live
/// interaction session.
///
/// Every user-visible change commits exactly one snapshot. Live drag feedback
/// updates the scene without committing.
pub struct Whiteboard {
    scene: Scene,
    history: History,
    session: InteractionSession,
    config: BoardConfig,
    prompt: Box<dyn TextPrompt>,
}

impl fmt::Debug for Whiteboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Whiteboard")
            .field("scene", &self.scene)
            .field("history", &self.history)
            .field("session", &self.session)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Whiteboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Whiteboard {
    /// Create an empty board with the default configuration.
    pub fn new() -> Self {
        Self::build(BoardConfig::default())
    }

    /// Create an empty board. The config is validated first.
    pub fn with_config(config: BoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: BoardConfig) -> Self {
        let history = match config.history_limit {
            Some(limit) => History::with_limit(limit),
            None => History::new(),
        };
        Self {
            scene: Scene::new(),
            history,
            session: InteractionSession::from_config(&config),
            config,
            prompt: Box::new(NoPrompt),
        }
    }

    /// Replace the text prompt.
    pub fn with_prompt(mut self, prompt: impl TextPrompt + 'static) -> Self {
        self.prompt = Box::new(prompt);
        self
    }

    pub fn set_prompt(&mut self, prompt: impl TextPrompt + 'static) {
        self.prompt = Box::new(prompt);
    }

    /// Feed one pointer event through the state machine. Returns true if it
    /// committed a new snapshot.
    pub fn handle_event(&mut self, event: &PointerEvent) -> bool {
        let session = std::mem::take(&mut self.session);
        let (session, effect) = handle_event(session, &self.scene, event, &self.config);
        self.session = session;
        match effect {
            Some(effect) => self.apply(effect),
            None => false,
        }
    }

    pub fn pointer_down(&mut self, screen: Point) -> bool {
        self.handle_event(&PointerEvent::Down { position: screen })
    }

    pub fn pointer_move(&mut self, screen: Point) -> bool {
        self.handle_event(&PointerEvent::Move { position: screen })
    }

    pub fn pointer_up(&mut self, screen: Point) -> bool {
        self.handle_event(&PointerEvent::Up { position: screen })
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.handle_event(&PointerEvent::Leave)
    }

    fn apply(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::Update(shape) => {
                let id = shape.id();
                self.scene.update_by_id(id, |s| *s = shape);
                false
            }
            Effect::Append(shape) => {
                log::debug!("adding {} {}", shape.kind_name(), shape.id());
                self.scene.append(shape);
                self.commit();
                true
            }
            Effect::Commit => {
                self.commit();
                true
            }
            Effect::PromptText(at) => self.add_text(at),
        }
    }

    fn add_text(&mut self, at: Point) -> bool {
        let Some(content) = self.prompt.prompt(at) else {
            log::debug!("text entry cancelled");
            return false;
        };
        if content.trim().is_empty() {
            log::debug!("ignoring empty text");
            return false;
        }
        let style = self.session.tools.current_style;
        self.scene.append(Shape::Text(Text::new(at, content, style)));
        self.commit();
        true
    }

    fn commit(&mut self) {
        self.history.commit(self.scene.clone());
        log::trace!(
            "committed snapshot {} ({} shapes)",
            self.history.cursor(),
            self.scene.len()
        );
    }

    /// Abandon any gesture in progress without committing it.
    fn cancel_gesture(&mut self) {
        if !self.session.is_idle() {
            log::debug!("cancelling {:?}", self.session.action);
            self.session = std::mem::take(&mut self.session).reset();
        }
    }

    /// Switch tools. A gesture in progress is finished first, as if the
    /// pointer had been released.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.pointer_leave();
        self.session.tools.set_tool(tool);
    }

    /// Pick a drawing color; this also switches to the pen.
    pub fn set_color(&mut self, color: ShapeColor) {
        self.pointer_leave();
        self.session.tools.set_color(color);
    }

    /// Set the stroke width for new shapes (clamped to 1..=50).
    pub fn set_stroke_width(&mut self, width: f64) {
        self.session.tools.set_stroke_width(width);
    }

    /// Step back one snapshot. Returns false at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        match self.history.undo() {
            Some(snapshot) => {
                self.scene.replace_all(snapshot.shapes().to_vec());
                true
            }
            None => {
                // Drop any uncommitted drag feedback.
                self.scene = self.history.current().clone();
                false
            }
        }
    }

    /// Step forward one snapshot. Returns false at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        self.cancel_gesture();
        match self.history.redo() {
            Some(snapshot) => {
                self.scene.replace_all(snapshot.shapes().to_vec());
                true
            }
            None => {
                self.scene = self.history.current().clone();
                false
            }
        }
    }

    /// Remove every shape. Committed, so it can be undone.
    pub fn clear(&mut self) {
        self.cancel_gesture();
        self.scene.replace_all(Vec::new());
        self.commit();
        log::info!("cleared board");
    }

    /// Place a decoded bitmap at the configured position and size and commit.
    pub fn insert_image(&mut self, bitmap: Bitmap) -> ShapeId {
        let placement = self.config.image_placement;
        let image = Image::new(
            placement.origin(),
            placement.width,
            placement.height,
            Arc::new(bitmap),
        );
        let id = image.id;
        self.scene.append(Shape::Image(image));
        self.commit();
        log::info!("inserted image {id}");
        id
    }

    pub fn zoom_in(&mut self) {
        self.session.camera.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.session.camera.zoom_out();
    }

    /// Back to 100% with no pan.
    pub fn reset_view(&mut self) {
        self.session.camera.reset();
    }

    pub fn zoom_percent(&self) -> u32 {
        self.session.camera.zoom_percent()
    }

    /// The live scene, including uncommitted drag feedback.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn session(&self) -> &InteractionSession {
        &self.session
    }

    pub fn camera(&self) -> &Camera {
        &self.session.camera
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Shape being drawn but not yet part of the scene.
    pub fn in_progress(&self) -> Option<&Shape> {
        self.session.in_progress.as_ref()
    }

    pub fn tool(&self) -> ToolKind {
        self.session.tools.current_tool
    }

    pub fn action(&self) -> Action {
        self.session.action
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZoomConfig;

    fn drag(board: &mut Whiteboard, from: (f64, f64), to: (f64, f64)) {
        board.pointer_down(Point::new(from.0, from.1));
        board.pointer_move(Point::new(to.0, to.1));
        board.pointer_up(Point::new(to.0, to.1));
    }

    #[test]
    fn test_drawing_commits_once() {
        let mut board = Whiteboard::new();
        board.set_tool(ToolKind::Ellipse);
        board.pointer_down(Point::new(0.0, 0.0));
        board.pointer_move(Point::new(5.0, 5.0));
        assert!(board.in_progress().is_some());
        assert!(board.scene().is_empty());
        assert_eq!(board.history().len(), 1);

        assert!(board.pointer_up(Point::new(5.0, 5.0)));
        assert_eq!(board.scene().len(), 1);
        assert_eq!(board.history().len(), 2);
        assert!(board.in_progress().is_none());
    }

    #[test]
    fn test_text_prompt() {
        let mut board = Whiteboard::new().with_prompt(|_at: Point| Some("hello".to_string()));
        board.set_tool(ToolKind::Text);
        assert!(board.pointer_down(Point::new(20.0, 40.0)));
        assert_eq!(board.action(), Action::Idle);

        let Some(Shape::Text(text)) = board.scene().shapes().first() else {
            panic!("expected text");
        };
        assert_eq!(text.content, "hello");
        assert_eq!(text.position, Point::new(20.0, 40.0));
        assert_eq!(board.history().len(), 2);
    }

    #[test]
    fn test_cancelled_or_blank_text_is_noop() {
        let mut board = Whiteboard::new();
        board.set_tool(ToolKind::Text);
        assert!(!board.pointer_down(Point::new(0.0, 0.0)));

        board.set_prompt(|_at: Point| Some("   ".to_string()));
        assert!(!board.pointer_down(Point::new(0.0, 0.0)));
        assert!(board.scene().is_empty());
        assert_eq!(board.history().len(), 1);
    }

    #[test]
    fn test_switching_tool_finishes_gesture() {
        let mut board = Whiteboard::new();
        board.set_tool(ToolKind::Pen);
        board.pointer_down(Point::new(0.0, 0.0));
        board.pointer_move(Point::new(3.0, 4.0));
        board.set_tool(ToolKind::Rectangle);
        assert_eq!(board.scene().len(), 1);
        assert_eq!(board.action(), Action::Idle);
        assert_eq!(board.tool(), ToolKind::Rectangle);
    }

    #[test]
    fn test_undo_mid_drag_discards_feedback() {
        let mut board = Whiteboard::new();
        board.set_tool(ToolKind::Rectangle);
        drag(&mut board, (10.0, 10.0), (50.0, 40.0));

        board.set_tool(ToolKind::Selection);
        board.pointer_down(Point::new(30.0, 25.0));
        board.pointer_move(Point::new(60.0, 60.0));
        assert!(board.undo());
        assert!(board.scene().is_empty());
        assert_eq!(board.action(), Action::Idle);
        assert!(board.redo());
        assert_eq!(
            board.scene().shapes()[0].anchor(),
            Point::new(10.0, 10.0)
        );
    }

    #[test]
    fn test_insert_image_uses_placement() {
        let mut board = Whiteboard::new();
        let bitmap = Bitmap::new(1, 1, vec![255, 0, 0, 255]).unwrap();
        let id = board.insert_image(bitmap);
        let shape = board.scene().get(id).unwrap();
        assert_eq!(shape.bounds(), kurbo::Rect::new(50.0, 50.0, 250.0, 250.0));
        assert!(board.can_undo());
        assert!(board.undo());
        assert!(board.scene().is_empty());
    }

    #[test]
    fn test_view_controls() {
        let mut board = Whiteboard::new();
        board.zoom_in();
        board.zoom_in();
        assert_eq!(board.zoom_percent(), 120);
        board.set_tool(ToolKind::Pan);
        drag(&mut board, (0.0, 0.0), (15.0, 5.0));
        assert_eq!(board.camera().offset, kurbo::Vec2::new(15.0, 5.0));
        assert_eq!(board.history().len(), 1);
        board.reset_view();
        assert_eq!(board.zoom_percent(), 100);
        assert_eq!(board.camera().offset, kurbo::Vec2::ZERO);
    }

    #[test]
    fn test_history_limit_from_config() {
        let config = BoardConfig {
            history_limit: Some(2),
            ..BoardConfig::default()
        };
        let mut board = Whiteboard::with_config(config).unwrap();
        board.set_tool(ToolKind::Rectangle);
        for i in 0..4 {
            let x = f64::from(i) * 10.0;
            drag(&mut board, (x, 0.0), (x + 5.0, 5.0));
        }
        assert_eq!(board.history().len(), 2);
        assert!(board.undo());
        assert!(!board.undo());
        assert_eq!(board.scene().len(), 3);
    }

    #[test]
    fn test_inverted_zoom_range_is_rejected() {
        let config = BoardConfig {
            zoom: ZoomConfig {
                step: 0.1,
                min: 2.0,
                max: 1.0,
            },
            ..BoardConfig::default()
        };
        assert!(matches!(
            Whiteboard::with_config(config),
            Err(ConfigError::Invalid(_))
        ));
    }
}
