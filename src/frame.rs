//! Per-tick hand-off to the presentation layer.
//!
//! A `Frame` is everything the renderer needs and nothing more: colours,
//! HUD numbers and an ordered sprite list.  Sprite kinds are opaque handles;
//! how they look is the renderer's business.

use crate::entities::{BombState, Position, Session};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BACKGROUND: Rgb = Rgb(255, 255, 255);
pub const TEXT: Rgb = Rgb(0, 0, 0);
/// Bomb counter colour while every bomb slot is in use.
pub const WARNING: Rgb = Rgb(200, 30, 30);

/// Where the compass and heart icons sit, in field coordinates.
pub const COMPASS_POS: Position = Position::new(64.0, 64.0);
pub const HEART_POS: Position = Position::new(160.0, 40.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    BombArmed,
    BombExploding,
    Monster,
    Compass,
    Heart,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub pos: Position,
    /// Heading in degrees; only meaningful for the player.
    pub rotation: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub fps: f32,
    pub life: u32,
    pub countdown: u32,
    pub bombs_remaining: usize,
    pub bombs_color: Rgb,
    pub score: u32,
    pub high_score: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub background: Rgb,
    pub text: Rgb,
    pub hud: Hud,
    /// Fixed HUD icons.
    pub icons: Vec<Sprite>,
    /// Player first, then active bombs, then live monsters, each in slot order.
    pub sprites: Vec<Sprite>,
    /// The player is burning or has crashed this tick.
    pub player_hurt: bool,
    pub on_start: bool,
    pub over: bool,
}

pub fn build_frame(session: &Session, fps: f32) -> Frame {
    let player = &session.player;
    let mut sprites = vec![Sprite {
        kind: SpriteKind::Player,
        pos: player.pos,
        rotation: player.angle,
    }];

    for (_, bomb) in session.bombs.iter() {
        let kind = match bomb.state {
            BombState::Inactive => continue,
            BombState::Armed => SpriteKind::BombArmed,
            BombState::Exploding => SpriteKind::BombExploding,
        };
        if let Some(pos) = bomb.pos {
            sprites.push(Sprite { kind, pos, rotation: 0.0 });
        }
    }

    sprites.extend(session.monsters.alive().map(|(_, m)| Sprite {
        kind: SpriteKind::Monster,
        pos: m.pos,
        rotation: 0.0,
    }));

    let icons = vec![
        Sprite { kind: SpriteKind::Compass, pos: COMPASS_POS, rotation: 0.0 },
        Sprite { kind: SpriteKind::Heart, pos: HEART_POS, rotation: 0.0 },
    ];

    Frame {
        background: BACKGROUND,
        text: TEXT,
        hud: Hud {
            fps,
            life: player.life,
            countdown: session.countdown,
            bombs_remaining: session.bombs.remaining(),
            bombs_color: if session.bombs.is_saturated() { WARNING } else { TEXT },
            score: session.score,
            high_score: session.high_score,
        },
        icons,
        sprites,
        player_hurt: player.burned || player.crashed,
        on_start: session.flags.on_start,
        over: session.flags.over,
    }
}
