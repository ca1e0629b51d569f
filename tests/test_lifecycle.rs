use std::time::Duration;

use daga_bomber::config::Config;
use daga_bomber::entities::*;
use daga_bomber::lifecycle::*;
use daga_bomber::timers::{BombTimer, Scheduler, TimerKey};

use rand::rngs::StdRng;
use rand::SeedableRng;

const ARM: Duration = Duration::from_millis(3000);
const FIRE: Duration = Duration::from_millis(1000);

fn arm_key(slot: usize) -> TimerKey {
    TimerKey::Bomb { slot, timer: BombTimer::Arm }
}

fn fire_key(slot: usize) -> TimerKey {
    TimerKey::Bomb { slot, timer: BombTimer::Fire }
}

fn at(x: f32, y: f32) -> Position {
    Position::new(x, y)
}

fn params(x: f32, y: f32) -> SpawnParams {
    SpawnParams {
        pos: at(x, y),
        speed: 2,
        axis: Axis::Horizontal,
        direction: Direction::Positive,
    }
}

/// Feed fired timers back into the pool the way the game loop does.
fn run_timers(pool: &mut BombPool, timers: &mut Scheduler, dt: Duration) {
    for key in timers.advance(dt) {
        match key {
            TimerKey::Bomb { slot, timer: BombTimer::Arm } => {
                let _ = pool.explode(slot, timers, FIRE);
            }
            TimerKey::Bomb { slot, timer: BombTimer::Fire } => {
                let _ = pool.expire(slot, timers);
            }
            _ => {}
        }
    }
}

// ── Bomb lifecycle ────────────────────────────────────────────────────────────

#[test]
fn drop_arms_bomb_at_position() {
    let mut pool = BombPool::new(5);
    let mut timers = Scheduler::new();
    let slot = pool.drop_at(at(500.0, 400.0), &mut timers, ARM);
    assert_eq!(slot, Some(0));
    let bomb = pool.get(0).unwrap();
    assert_eq!(bomb.state, BombState::Armed);
    assert_eq!(bomb.pos, Some(at(500.0, 400.0)));
    assert_eq!(timers.remaining(&arm_key(0)), Some(ARM));
}

#[test]
fn bomb_cycles_once_when_left_alone() {
    let mut pool = BombPool::new(5);
    let mut timers = Scheduler::new();
    let _ = pool.drop_at(at(500.0, 400.0), &mut timers, ARM);

    run_timers(&mut pool, &mut timers, ARM - Duration::from_millis(1));
    assert_eq!(pool.get(0).unwrap().state, BombState::Armed);

    run_timers(&mut pool, &mut timers, Duration::from_millis(1));
    let bomb = pool.get(0).unwrap();
    assert_eq!(bomb.state, BombState::Exploding);
    assert_eq!(bomb.pos, Some(at(500.0, 400.0)));

    run_timers(&mut pool, &mut timers, FIRE);
    let bomb = pool.get(0).unwrap();
    assert_eq!(bomb.state, BombState::Inactive);
    assert!(bomb.pos.is_none());
    assert!(!timers.is_pending(&arm_key(0)));
    assert!(!timers.is_pending(&fire_key(0)));

    // Nothing left to fire
    run_timers(&mut pool, &mut timers, Duration::from_secs(60));
    assert_eq!(pool.get(0).unwrap().state, BombState::Inactive);
}

#[test]
fn explode_only_from_armed() {
    let mut pool = BombPool::new(5);
    let mut timers = Scheduler::new();
    assert!(!pool.explode(0, &mut timers, FIRE)); // slot does not exist yet
    let _ = pool.drop_at(at(100.0, 200.0), &mut timers, ARM);
    assert!(pool.explode(0, &mut timers, FIRE));
    assert!(!pool.explode(0, &mut timers, FIRE)); // already exploding
    assert_eq!(pool.get(0).unwrap().state, BombState::Exploding);
}

#[test]
fn expire_inactive_is_noop() {
    let mut pool = BombPool::new(5);
    let mut timers = Scheduler::new();
    let _ = pool.drop_at(at(100.0, 200.0), &mut timers, ARM);
    assert!(pool.expire(0, &mut timers));
    assert!(!pool.expire(0, &mut timers));
    assert!(!pool.expire(42, &mut timers));
}

#[test]
fn expiring_an_armed_bomb_cancels_its_arm_timer() {
    let mut pool = BombPool::new(5);
    let mut timers = Scheduler::new();
    let _ = pool.drop_at(at(100.0, 200.0), &mut timers, ARM);
    assert!(pool.expire(0, &mut timers));
    assert!(!timers.is_pending(&arm_key(0)));
}

#[test]
fn pool_appends_until_capacity() {
    let mut pool = BombPool::new(5);
    let mut timers = Scheduler::new();
    for expected in 0..5 {
        assert_eq!(pool.drop_at(at(300.0, 300.0), &mut timers, ARM), Some(expected));
    }
    assert_eq!(pool.active_count(), 5);
    assert_eq!(pool.remaining(), 0);
    assert!(pool.is_saturated());
}

#[test]
fn drop_into_busy_slot_is_ignored() {
    let mut pool = BombPool::new(5);
    let mut timers = Scheduler::new();
    for _ in 0..5 {
        let _ = pool.drop_at(at(300.0, 300.0), &mut timers, ARM);
    }
    let before = pool.get(0).cloned();
    assert_eq!(pool.drop_at(at(700.0, 700.0), &mut timers, ARM), None);
    assert_eq!(pool.get(0).cloned(), before);
    assert_eq!(pool.active_count(), 5);
}

#[test]
fn full_pool_waits_on_cursor_slot() {
    let mut pool = BombPool::new(5);
    let mut timers = Scheduler::new();
    for _ in 0..5 {
        let _ = pool.drop_at(at(300.0, 300.0), &mut timers, ARM);
    }

    // Slot 0 frees up → reused
    assert!(pool.expire(0, &mut timers));
    assert_eq!(pool.drop_at(at(600.0, 600.0), &mut timers, ARM), Some(0));

    // Cursor now points at slot 1, which is busy; freeing slot 3 does not help
    assert!(pool.expire(3, &mut timers));
    assert_eq!(pool.drop_at(at(600.0, 600.0), &mut timers, ARM), None);
    assert_eq!(pool.get(3).unwrap().state, BombState::Inactive);
}

#[test]
fn reused_slot_is_not_hit_by_old_timers() {
    let mut pool = BombPool::new(1);
    let mut timers = Scheduler::new();
    let _ = pool.drop_at(at(300.0, 300.0), &mut timers, ARM);
    run_timers(&mut pool, &mut timers, ARM);
    assert!(pool.expire(0, &mut timers)); // killed early, fire timer cancelled

    let _ = pool.drop_at(at(400.0, 400.0), &mut timers, ARM);
    // The old fire timer would have been due here
    run_timers(&mut pool, &mut timers, FIRE);
    assert_eq!(pool.get(0).unwrap().state, BombState::Armed);
}

#[test]
fn exploding_lists_only_exploding_bombs() {
    let mut pool = BombPool::new(5);
    let mut timers = Scheduler::new();
    let _ = pool.drop_at(at(100.0, 300.0), &mut timers, ARM);
    let _ = pool.drop_at(at(200.0, 300.0), &mut timers, ARM);
    let _ = pool.explode(1, &mut timers, FIRE);
    assert_eq!(pool.exploding(), vec![(1, at(200.0, 300.0))]);
}

// ── Monster lifecycle ─────────────────────────────────────────────────────────

#[test]
fn spawn_appends_until_capacity() {
    let mut pool = MonsterPool::new(2);
    assert_eq!(pool.spawn(params(300.0, 300.0)), Some(0));
    assert_eq!(pool.spawn(params(400.0, 300.0)), Some(1));
    assert_eq!(pool.spawn(params(500.0, 300.0)), None);
    assert_eq!(pool.alive_count(), 2);
}

#[test]
fn spawn_reuses_first_dead_slot_round_robin() {
    let mut pool = MonsterPool::new(2);
    let _ = pool.spawn(params(300.0, 300.0));
    let _ = pool.spawn(params(400.0, 300.0));

    assert!(pool.kill(0));
    assert_eq!(pool.spawn(params(600.0, 500.0)), Some(0));
    assert_eq!(pool.get(0).unwrap().pos, at(600.0, 500.0));
    assert_eq!(pool.get(0).unwrap().state, MonsterState::Alive);

    // Both dead: the cursor sits after slot 0, so slot 1 goes first
    assert!(pool.kill(0));
    assert!(pool.kill(1));
    assert_eq!(pool.spawn(params(700.0, 500.0)), Some(1));
    assert_eq!(pool.spawn(params(700.0, 500.0)), Some(0));
}

#[test]
fn kill_is_one_shot() {
    let mut pool = MonsterPool::new(5);
    let _ = pool.spawn(params(300.0, 300.0));
    assert!(pool.kill(0));
    assert!(!pool.kill(0));
    assert!(!pool.kill(3));
    assert_eq!(pool.get(0).unwrap().state, MonsterState::Dead);
}

#[test]
fn reset_replaces_in_place() {
    let mut pool = MonsterPool::new(5);
    let _ = pool.spawn(params(300.0, 300.0));
    assert!(pool.kill(0));
    pool.reset(0, params(800.0, 600.0));
    let m = pool.get(0).unwrap();
    assert_eq!(m.state, MonsterState::Alive);
    assert_eq!(m.pos, at(800.0, 600.0));
}

#[test]
fn monster_moves_along_its_axis() {
    let bounds = Config::default().monster_bounds;
    let mut m = Monster::from(params(300.0, 300.0));
    step_monster(&mut m, &bounds);
    assert_eq!(m.pos, at(302.0, 300.0));

    let mut v = Monster::from(SpawnParams {
        axis: Axis::Vertical,
        direction: Direction::Negative,
        ..params(300.0, 300.0)
    });
    step_monster(&mut v, &bounds);
    assert_eq!(v.pos, at(300.0, 298.0));
}

#[test]
fn monster_bounces_off_right_bound() {
    let bounds = Config::default().monster_bounds;
    let mut m = Monster::from(SpawnParams { speed: 3, ..params(948.0, 400.0) });
    step_monster(&mut m, &bounds);
    assert_eq!(m.pos.x, 951.0);
    assert_eq!(m.direction, Direction::Negative);

    step_monster(&mut m, &bounds);
    assert_eq!(m.pos.x, 948.0);
    assert_eq!(m.direction, Direction::Negative);
}

#[test]
fn monster_bounces_off_top_bound() {
    let bounds = Config::default().monster_bounds;
    let mut m = Monster::from(SpawnParams {
        speed: 3,
        axis: Axis::Vertical,
        direction: Direction::Negative,
        pos: at(500.0, 202.0),
    });
    step_monster(&mut m, &bounds);
    assert_eq!(m.direction, Direction::Positive);
}

#[test]
fn dead_monster_does_not_move() {
    let bounds = Config::default().monster_bounds;
    let mut pool = MonsterPool::new(5);
    let _ = pool.spawn(params(300.0, 300.0));
    let _ = pool.kill(0);
    pool.step_all(&bounds);
    assert_eq!(pool.get(0).unwrap().pos, at(300.0, 300.0));
}

#[test]
fn random_spawn_stays_in_spawn_area() {
    let config = Config::default();
    let area = config.monster_spawn_area;
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let p = SpawnParams::random(&config, &mut rng);
        assert!(p.pos.x >= area.min_x && p.pos.x <= area.max_x);
        assert!(p.pos.y >= area.min_y && p.pos.y <= area.max_y);
        assert!((config.monster_speed_min..=config.monster_speed_max).contains(&p.speed));
    }
}
