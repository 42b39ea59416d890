//! Shared flight model of tumblers and jumpers.
//!
//! `special_x` holds the horizontal speed (always toward the facing),
//! `special_y` the vertical speed with negative values going up.

use lix_core::Activity;

use crate::{Agent, UpdateArgs};

const GRAVITY: i32 = 1;
const MAX_FLIGHT_SPEED: i32 = 16;
const STUN_SPEED: i32 = 10;
const HEAD_HEIGHT: i32 = 16;
/// Rows above the foot that count as hitting a wall while flying.
const BODY_HEIGHT: i32 = 8;
const JUMP_SPEED_X: i32 = 4;
const JUMP_SPEED_Y: i32 = -6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flight {
    Airborne,
    Landed,
    HitWall,
}

fn fly(lix: &mut Agent, args: &mut UpdateArgs<'_>) -> Flight {
    for _ in 0..lix.special_x / 2 {
        if lix.count_solid(args.terrain, 2, -BODY_HEIGHT, 3, -1) > 0 {
            return Flight::HitWall;
        }
        lix.move_ahead(args.terrain, 2);
        if lix.is_solid(args.terrain, 0, 0) {
            let rise = lix.solid_wall_height(args.terrain, 0, 0);
            lix.move_up(args.terrain, rise);
            return Flight::Landed;
        }
    }

    if lix.special_y < 0 {
        for _ in 0..-lix.special_y {
            if lix.ceiling_blocks(args.terrain, 0, -HEAD_HEIGHT) {
                lix.special_y = 0;
                break;
            }
            lix.move_up(args.terrain, 1);
        }
    } else {
        for _ in 0..lix.special_y {
            if lix.is_solid(args.terrain, 0, 1) {
                return Flight::Landed;
            }
            lix.move_down(args.terrain, 1);
        }
    }
    lix.special_y = (lix.special_y + GRAVITY).min(MAX_FLIGHT_SPEED);
    Flight::Airborne
}

fn land(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    let landing = if lix.special_y >= MAX_FLIGHT_SPEED {
        Activity::Splatter
    } else if lix.special_y >= STUN_SPEED {
        Activity::Stunner
    } else {
        Activity::Lander
    };
    lix.transition_to(landing, args);
}

pub(crate) fn update_tumbler(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    lix.advance_frame(args.frames);
    match fly(lix, args) {
        Flight::Airborne => {}
        Flight::Landed => land(lix, args),
        Flight::HitWall => lix.special_x = 0,
    }
}

pub(crate) fn become_jumper(lix: &mut Agent, _args: &mut UpdateArgs<'_>) {
    lix.become_default(Activity::Jumper);
    lix.special_x = JUMP_SPEED_X;
    lix.special_y = JUMP_SPEED_Y;
}

pub(crate) fn update_jumper(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    lix.advance_frame(args.frames);
    match fly(lix, args) {
        Flight::Airborne => {}
        Flight::Landed => land(lix, args),
        Flight::HitWall if lix.climber => lix.transition_to(Activity::Climber, args),
        Flight::HitWall => {
            let falling = lix.special_y;
            lix.transition_to(Activity::Tumbler, args);
            lix.special_y = falling;
        }
    }
}

#[cfg(test)]
mod tests {
    use lix_core::{Facing, Point, Rect, Sound};

    use crate::testing::Scene;

    use super::*;

    #[test]
    fn jump_over_flat_ground_lands_softly() {
        let mut scene = Scene::new();
        scene.fill(Rect::new(0, 51, 200, 10));
        let id = scene.spawn_walker(Point::new(20, 50), Facing::Right);
        scene.assign(id, Activity::Jumper);
        assert_eq!(scene.agent(id).frame(), -1);
        scene.update();
        assert_eq!(scene.agent(id).position(), Point::new(24, 44));

        scene.run_until(id, 30, |agent| agent.activity() != Activity::Jumper);
        let agent = scene.agent(id);
        assert_eq!(agent.activity(), Activity::Lander);
        assert_eq!(agent.position().y, 50);
        assert!(agent.position().x > 60);
        assert!(scene.heard(Sound::Jump));
    }

    #[test]
    fn jumper_into_wall_climbs_with_ability() {
        let mut scene = Scene::new();
        scene.fill(Rect::new(0, 51, 200, 10));
        scene.fill(Rect::new(30, 0, 6, 51));
        let id = scene.spawn_walker(Point::new(20, 50), Facing::Right);
        scene.agent_mut(id).climber = true;
        scene.assign(id, Activity::Jumper);
        scene.run_until(id, 10, |agent| agent.activity() != Activity::Jumper);
        assert_eq!(scene.agent(id).activity(), Activity::Climber);
    }

    #[test]
    fn jumper_into_wall_tumbles_without_ability() {
        let mut scene = Scene::new();
        scene.fill(Rect::new(0, 51, 200, 10));
        scene.fill(Rect::new(30, 0, 6, 51));
        let id = scene.spawn_walker(Point::new(20, 50), Facing::Right);
        scene.assign(id, Activity::Jumper);
        scene.run_until(id, 10, |agent| agent.activity() != Activity::Jumper);
        assert_eq!(scene.agent(id).activity(), Activity::Tumbler);
        scene.run_until(id, 30, |agent| agent.activity() != Activity::Tumbler);
        assert_eq!(scene.agent(id).activity(), Activity::Lander);
        assert_eq!(scene.agent(id).position().y, 50);
    }
}
