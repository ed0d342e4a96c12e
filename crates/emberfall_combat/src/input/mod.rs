//! Input boundary: abstract player actions → combat requests.

pub mod events;
pub mod router;

pub use events::{InputAction, InputStatus, PlayerInput};
pub use router::{
    bind_player_controlled, release_removed_from_router, route_player_input, InputRouter,
};
