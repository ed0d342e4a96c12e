//! Player input events
//!
//! Emitted by the host's input-translation layer (device events → abstract
//! actions), consumed by `route_player_input`.

use bevy::prelude::{Event, Vec2};
use serde::{Deserialize, Serialize};

/// Abstract player action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    MeleeAttack,
    /// Movement actions belong to the movement controller, not combat
    Move,
    Dash,
}

/// Phase of the action as reported by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputStatus {
    Started,
    Performed,
    Canceled,
}

/// Player input event
///
/// Only `MeleeAttack` + `Started` triggers an attack; other statuses are
/// accepted and ignored.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerInput {
    pub action: InputAction,
    pub status: InputStatus,
    /// Axis value (movement direction etc), None for buttons
    pub value: Option<Vec2>,
}

impl PlayerInput {
    pub fn new(action: InputAction, status: InputStatus) -> Self {
        Self {
            action,
            status,
            value: None,
        }
    }

    pub fn with_value(mut self, value: Vec2) -> Self {
        self.value = Some(value);
        self
    }

    /// Attack button pressed
    pub fn attack() -> Self {
        Self::new(InputAction::MeleeAttack, InputStatus::Started)
    }
}
