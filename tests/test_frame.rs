
use daga_bomber::compute::{init_session, start};
use daga_bomber::config::Config;
use daga_bomber::entities::*;
use daga_bomber::frame::*;
use daga_bomber::lifecycle::SpawnParams;

fn session() -> Session {
    let mut s = init_session(Config::default(), 9).unwrap();
    start(&mut s);
    s
}

fn monster_at(x: f32, y: f32) -> SpawnParams {
    SpawnParams {
        pos: Position::new(x, y),
        speed: 1,
        axis: Axis::Horizontal,
        direction: Direction::Positive,
    }
}

#[test]
fn empty_field_has_only_the_player() {
    let s = session();
    let f = build_frame(&s, 60.0);
    assert_eq!(f.sprites.len(), 1);
    assert_eq!(f.sprites[0].kind, SpriteKind::Player);
    assert_eq!(f.sprites[0].pos, s.player.pos);
    assert_eq!(f.background, BACKGROUND);
}

#[test]
fn sprites_ordered_player_bombs_monsters() {
    let mut s = session();
    let arm = s.config.bomb_arm_duration;
    let fire = s.config.bomb_fire_duration;
    let _ = s.monsters.spawn(monster_at(300.0, 300.0));
    let _ = s.bombs.drop_at(Position::new(200.0, 600.0), &mut s.timers, arm);
    let _ = s.bombs.drop_at(Position::new(250.0, 600.0), &mut s.timers, arm);
    let _ = s.bombs.explode(1, &mut s.timers, fire);

    let kinds: Vec<SpriteKind> = build_frame(&s, 0.0).sprites.iter().map(|sp| sp.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SpriteKind::Player,
            SpriteKind::BombArmed,
            SpriteKind::BombExploding,
            SpriteKind::Monster,
        ]
    );
}

#[test]
fn inactive_bombs_and_dead_monsters_are_hidden() {
    let mut s = session();
    let arm = s.config.bomb_arm_duration;
    let _ = s.bombs.drop_at(Position::new(200.0, 600.0), &mut s.timers, arm);
    let _ = s.bombs.expire(0, &mut s.timers);
    let _ = s.monsters.spawn(monster_at(300.0, 300.0));
    let _ = s.monsters.kill(0);
    assert_eq!(build_frame(&s, 0.0).sprites.len(), 1);
}

#[test]
fn player_sprite_carries_heading() {
    let mut s = session();
    s.player.angle = 135.0;
    assert_eq!(build_frame(&s, 0.0).sprites[0].rotation, 135.0);
}

#[test]
fn hud_reports_session_numbers() {
    let mut s = session();
    s.score = 3;
    s.countdown = 42;
    s.player.life = 77;
    let f = build_frame(&s, 118.5);
    assert_eq!(f.hud.fps, 118.5);
    assert_eq!(f.hud.score, 3);
    assert_eq!(f.hud.high_score, 9);
    assert_eq!(f.hud.countdown, 42);
    assert_eq!(f.hud.life, 77);
    assert_eq!(f.hud.bombs_remaining, 5);
    assert_eq!(f.hud.bombs_color, TEXT);
}

#[test]
fn saturated_bomb_pool_turns_counter_to_warning() {
    let mut s = session();
    let arm = s.config.bomb_arm_duration;
    for i in 0..5 {
        let _ = s.bombs.drop_at(Position::new(100.0 + i as f32 * 100.0, 600.0), &mut s.timers, arm);
    }
    let f = build_frame(&s, 0.0);
    assert_eq!(f.hud.bombs_remaining, 0);
    assert_eq!(f.hud.bombs_color, WARNING);
}

#[test]
fn hud_icons_present() {
    let f = build_frame(&session(), 0.0);
    let kinds: Vec<SpriteKind> = f.icons.iter().map(|i| i.kind).collect();
    assert_eq!(kinds, vec![SpriteKind::Compass, SpriteKind::Heart]);
}

#[test]
fn hurt_flag_follows_player_status() {
    let mut s = session();
    assert!(!build_frame(&s, 0.0).player_hurt);
    s.player.burned = true;
    assert!(build_frame(&s, 0.0).player_hurt);
}

#[test]
fn flags_passed_through() {
    let s = init_session(Config::default(), 0).unwrap();
    let f = build_frame(&s, 0.0);
    assert!(f.on_start);
    assert!(!f.over);
}
