use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::geometry::{Position, Viewport, WalkableArea};

/// The content panel (or conversation) an interaction opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Work history.
    Experience,
    /// Project showcase.
    Projects,
    /// Technical skills.
    Skills,
    /// Contact details.
    Contact,
    /// Resume download.
    Resume,
    /// About the site owner.
    About,
    /// Start a conversation.
    Talk,
}

impl ActionKind {
    /// Every action, in toolbar order.
    pub const ALL: [ActionKind; 7] = [
        Self::Experience,
        Self::Projects,
        Self::Skills,
        Self::Contact,
        Self::Resume,
        Self::About,
        Self::Talk,
    ];

    /// Parse an action from its lowercase name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "experience" => Some(Self::Experience),
            "projects" => Some(Self::Projects),
            "skills" => Some(Self::Skills),
            "contact" => Some(Self::Contact),
            "resume" => Some(Self::Resume),
            "about" => Some(Self::About),
            "talk" => Some(Self::Talk),
            _ => None,
        }
    }

    /// Lowercase name of this action.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Contact => "contact",
            Self::Resume => "resume",
            Self::About => "about",
            Self::Talk => "talk",
        }
    }

    /// Whether this action opens a content panel (everything but `Talk`).
    pub fn is_section(&self) -> bool {
        !matches!(self, Self::Talk)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Width and height of an object's hit box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width in scene units.
    pub width: f64,
    /// Height in scene units.
    pub height: f64,
}

/// Something in the scene the visitor can click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveObject {
    /// Stable identifier.
    pub id: String,
    /// Hover label.
    pub label: String,
    /// Where the object is drawn.
    pub position: Position,
    /// Hit box size.
    pub size: Size,
    /// What clicking it does.
    pub action: ActionKind,
    /// Where the character walks before the action fires.
    pub interaction_point: Position,
}

impl InteractiveObject {
    /// Create an object.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        action: ActionKind,
        position: Position,
        size: Size,
        interaction_point: Position,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            position,
            size,
            action,
            interaction_point,
        }
    }
}

/// Static description of a scene.
///
/// The character's starting point belongs to the motion settings, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    /// Canvas layout used to map clicks.
    pub viewport: Viewport,
    /// Legal character positions.
    pub walkable_area: WalkableArea,
    /// Clickable objects.
    pub objects: Vec<InteractiveObject>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::lobby()
    }
}

impl SceneConfig {
    /// The office lobby.
    pub fn lobby() -> Self {
        let obj = |id: &str, label: &str, action, pos: (f64, f64), size: (f64, f64), at: (f64, f64)| {
            InteractiveObject::new(
                id,
                label,
                action,
                Position::new(pos.0, pos.1),
                Size {
                    width: size.0,
                    height: size.1,
                },
                Position::new(at.0, at.1),
            )
        };

        Self {
            viewport: Viewport::CLASSIC,
            walkable_area: WalkableArea::LOBBY,
            objects: vec![
                obj(
                    "experience",
                    "Office Door",
                    ActionKind::Experience,
                    (540.0, 70.0),
                    (60.0, 120.0),
                    (500.0, 50.0),
                ),
                obj(
                    "projects",
                    "Desk",
                    ActionKind::Projects,
                    (340.0, 45.0),
                    (100.0, 60.0),
                    (360.0, 35.0),
                ),
                obj(
                    "skills",
                    "Vending Machine",
                    ActionKind::Skills,
                    (130.0, 30.0),
                    (60.0, 100.0),
                    (170.0, 28.0),
                ),
                obj(
                    "contact",
                    "Phone",
                    ActionKind::Contact,
                    (445.0, 115.0),
                    (30.0, 50.0),
                    (420.0, 40.0),
                ),
                obj(
                    "resume",
                    "Resume",
                    ActionKind::Resume,
                    (50.0, 145.0),
                    (50.0, 70.0),
                    (80.0, 45.0),
                ),
                obj(
                    "about",
                    "About Sign",
                    ActionKind::About,
                    (28.0, 85.0),
                    (70.0, 30.0),
                    (80.0, 50.0),
                ),
            ],
        }
    }

    /// Look up an object by id.
    pub fn object(&self, id: &str) -> Option<&InteractiveObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// The first object bound to an action.
    pub fn object_for_action(&self, action: ActionKind) -> Option<&InteractiveObject> {
        self.objects.iter().find(|o| o.action == action)
    }

    /// Check the area, object id uniqueness, and that every interaction point is walkable.
    pub fn validate(&self) -> CoreResult<()> {
        self.walkable_area.validate()?;

        let mut seen = HashSet::new();
        for object in &self.objects {
            if !seen.insert(object.id.as_str()) {
                return Err(CoreError::DuplicateObject(object.id.clone()));
            }
            if !self.walkable_area.contains(object.interaction_point) {
                return Err(CoreError::UnreachableObject {
                    id: object.id.clone(),
                });
            }
        }

        debug!(objects = self.objects.len(), "scene config validated");
        Ok(())
    }

    /// Parse a scene from JSON and validate it.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let scene: Self = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }
}
