//! Player kinematics: pure functions, no hidden state.

use crate::config::Rect;
use crate::entities::{MoveIntent, Player, Position, TurnIntent};

/// Wrap any angle in degrees into `[0, 360)`.
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// New heading after one tick of turning.
pub fn turn(angle: f32, intent: TurnIntent, rotate_speed: f32) -> f32 {
    match intent {
        TurnIntent::None => angle,
        TurnIntent::Ccw => wrap_degrees(angle + rotate_speed),
        TurnIntent::Cw => wrap_degrees(angle - rotate_speed),
    }
}

/// Clamp `pos` component-wise into `bounds`.
pub fn clamp_to(pos: Position, bounds: &Rect) -> Position {
    Position::new(
        pos.x.clamp(bounds.min_x, bounds.max_x),
        pos.y.clamp(bounds.min_y, bounds.max_y),
    )
}

/// New position after one tick of thrust along `angle`.
///
/// Heading 0 points up the screen and heading 90 points left, so the
/// displacement is subtracted from the position.
pub fn advance(pos: Position, angle: f32, intent: MoveIntent, speed: f32, bounds: &Rect) -> Position {
    let heading = match intent {
        MoveIntent::None => return pos,
        MoveIntent::Forward => angle,
        MoveIntent::Backward => wrap_degrees(angle + 180.0),
    };
    let radians = heading.to_radians();
    let dx = speed * radians.sin();
    let dy = speed * radians.cos();
    clamp_to(Position::new(pos.x - dx, pos.y - dy), bounds)
}

/// Apply the player's current intents: turn first, then move along the new heading.
pub fn step_player(player: &mut Player, bounds: &Rect) {
    player.angle = turn(player.angle, player.turn, player.rotate_speed);
    player.pos = advance(player.pos, player.angle, player.movement, player.move_speed, bounds);
}
