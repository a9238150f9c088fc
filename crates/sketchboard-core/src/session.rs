//! Pointer-driven interaction state machine.
//!
//! [`handle_event`] is a pure transition function: it takes the current
//! [`InteractionSession`], the committed [`Scene`] and one pointer event, and
//! returns the next session plus at most one [`Effect`] for the owner of the
//! scene to apply. It never touches the scene or history itself.

use crate::camera::Camera;
use crate::config::BoardConfig;
use crate::input::PointerEvent;
use crate::scene::Scene;
use crate::selection::Selection;
use crate::shapes::{Ellipse, Rectangle, Shape, ShapeStyle, Stroke};
use crate::tools::{ToolKind, ToolManager};
use kurbo::Point;

/// What the pointer is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    Idle,
    Drawing,
    Moving,
    Panning,
}

/// Scene change requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Live drag feedback: write this shape back over the one with the same
    /// id. Not committed.
    Update(Shape),
    /// A finished shape: append it and commit.
    Append(Shape),
    /// Commit the scene as it stands.
    Commit,
    /// Ask for text to place at this logical point.
    PromptText(Point),
}

/// Ephemeral interaction state. Tool and camera persist across gestures;
/// everything else is cleared when a gesture ends.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionSession {
    pub tools: ToolManager,
    pub action: Action,
    /// Shape being drawn, held outside the scene until release.
    pub in_progress: Option<Shape>,
    /// Last raw screen position while panning.
    pub anchor: Option<Point>,
    /// Shape being moved.
    pub selection: Option<Selection>,
    pub camera: Camera,
}

impl InteractionSession {
    pub fn new(tools: ToolManager, camera: Camera) -> Self {
        Self {
            tools,
            camera,
            ..Self::default()
        }
    }

    /// Session for a fresh board using the configured style and zoom limits.
    pub fn from_config(config: &BoardConfig) -> Self {
        let style = ShapeStyle::new(config.default_color, config.default_stroke_width);
        Self::new(ToolManager::new(style), Camera::from_config(&config.zoom))
    }

    pub fn is_idle(&self) -> bool {
        self.action == Action::Idle
    }

    /// Drop any gesture state and return to idle.
    pub(crate) fn reset(mut self) -> Self {
        self.action = Action::Idle;
        self.in_progress = None;
        self.anchor = None;
        self.selection = None;
        self
    }
}

/// Advance the session by one pointer event.
pub fn handle_event(
    session: InteractionSession,
    scene: &Scene,
    event: &PointerEvent,
    config: &BoardConfig,
) -> (InteractionSession, Option<Effect>) {
    match *event {
        PointerEvent::Down { position } => pointer_down(session, scene, position, config),
        PointerEvent::Move { position } => pointer_move(session, scene, position),
        PointerEvent::Up { .. } | PointerEvent::Leave => pointer_up(session),
    }
}

fn pointer_down(
    mut session: InteractionSession,
    scene: &Scene,
    screen: Point,
    config: &BoardConfig,
) -> (InteractionSession, Option<Effect>) {
    if !session.is_idle() {
        return (session, None);
    }

    let point = session.camera.screen_to_world(screen);
    let style = session.tools.style_for_tool(config.background);

    match session.tools.current_tool {
        ToolKind::Selection => {
            session.selection = scene
                .topmost_hit(point, config.hit_tolerance)
                .map(|shape| Selection::capture(shape, point));
            if let Some(selection) = &session.selection {
                log::debug!("moving shape {}", selection.shape_id);
                session.action = Action::Moving;
            }
            (session, None)
        }
        ToolKind::Pan => {
            session.anchor = Some(screen);
            session.action = Action::Panning;
            (session, None)
        }
        ToolKind::Text => (session, Some(Effect::PromptText(point))),
        ToolKind::Pen | ToolKind::Eraser => {
            session.in_progress = Some(Shape::Stroke(Stroke::new(point, style)));
            session.action = Action::Drawing;
            log::debug!("drawing stroke at {point:?}");
            (session, None)
        }
        ToolKind::Rectangle => {
            session.in_progress = Some(Shape::Rectangle(Rectangle::new(point, 0.0, 0.0, style)));
            session.action = Action::Drawing;
            log::debug!("drawing rectangle at {point:?}");
            (session, None)
        }
        ToolKind::Ellipse => {
            session.in_progress = Some(Shape::Ellipse(Ellipse::new(point, 0.0, 0.0, style)));
            session.action = Action::Drawing;
            log::debug!("drawing ellipse at {point:?}");
            (session, None)
        }
    }
}

fn pointer_move(
    mut session: InteractionSession,
    scene: &Scene,
    screen: Point,
) -> (InteractionSession, Option<Effect>) {
    match session.action {
        Action::Idle => (session, None),
        Action::Panning => {
            if let Some(last) = session.anchor.replace(screen) {
                session.camera.pan(screen - last);
            }
            (session, None)
        }
        Action::Drawing => {
            let point = session.camera.screen_to_world(screen);
            match session.in_progress.as_mut() {
                Some(Shape::Stroke(stroke)) => stroke.add_point(point),
                Some(Shape::Rectangle(rect)) => rect.drag_to(point),
                Some(Shape::Ellipse(ellipse)) => ellipse.drag_to(point),
                Some(other) => log::warn!("cannot drag a {}", other.kind_name()),
                None => {}
            }
            (session, None)
        }
        Action::Moving => {
            let point = session.camera.screen_to_world(screen);
            let effect = session.selection.as_ref().and_then(|selection| {
                let mut shape = scene.get(selection.shape_id)?.clone();
                selection.offset.apply(&mut shape, point);
                Some(Effect::Update(shape))
            });
            (session, effect)
        }
    }
}

fn pointer_up(session: InteractionSession) -> (InteractionSession, Option<Effect>) {
    let effect = match session.action {
        Action::Idle | Action::Panning => None,
        Action::Moving => Some(Effect::Commit),
        Action::Drawing => session.in_progress.clone().map(Effect::Append),
    };
    if session.action != Action::Idle {
        log::debug!("{:?} finished", session.action);
    }
    (session.reset(), effect)
}
