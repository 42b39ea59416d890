use lix_core::Activity;

use crate::{Agent, UpdateArgs};

/// Pixels per tick a faller reaches after accelerating.
const MAX_FALL_SPEED: i32 = 8;
/// Fall distance after which a floater opens its umbrella.
pub(crate) const FLOATER_DEPLOY_DISTANCE: i32 = 60;
/// Falls longer than this end in a splat.
pub(crate) const SPLAT_DISTANCE: i32 = 126;
const FLOAT_SPEED: i32 = 2;

/// Scratch values: `special_x` is the current speed, `special_y` the
/// distance fallen so far.
pub(crate) fn update_faller(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    lix.advance_frame(args.frames);
    lix.special_x = (lix.special_x + 1).min(MAX_FALL_SPEED);
    for _ in 0..lix.special_x {
        if lix.is_solid(args.terrain, 0, 1) {
            let landing = if lix.special_y > SPLAT_DISTANCE {
                Activity::Splatter
            } else {
                Activity::Lander
            };
            lix.transition_to(landing, args);
            return;
        }
        lix.move_down(args.terrain, 1);
        lix.special_y += 1;
        if lix.floater && lix.special_y >= FLOATER_DEPLOY_DISTANCE {
            lix.transition_to(Activity::Floater, args);
            return;
        }
    }
}

pub(crate) fn assign_floater(lix: &mut Agent, _args: &mut UpdateArgs<'_>) {
    lix.floater = true;
}

pub(crate) fn update_floater(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    lix.advance_frame(args.frames);
    for _ in 0..FLOAT_SPEED {
        if lix.is_solid(args.terrain, 0, 1) {
            lix.transition_to(Activity::Lander, args);
            return;
        }
        lix.move_down(args.terrain, 1);
    }
}

#[cfg(test)]
mod tests {
    use lix_core::{Facing, Point, Rect};

    use crate::testing::Scene;

    use super::*;

    #[test]
    fn short_fall_lands() {
        let mut scene = Scene::new();
        scene.fill(Rect::new(0, 81, 200, 10));
        let id = scene.spawn(Point::new(20, 40), Facing::Right);
        scene.run_until(id, 40, |agent| agent.activity() != Activity::Faller);
        let agent = scene.agent(id);
        assert_eq!(agent.activity(), Activity::Lander);
        assert_eq!(agent.position(), Point::new(20, 80));
    }

    #[test]
    fn long_fall_splats() {
        let mut scene = Scene::tall();
        scene.fill(Rect::new(0, 201, 200, 10));
        let id = scene.spawn(Point::new(20, 20), Facing::Right);
        scene.run_until(id, 60, |agent| agent.activity() != Activity::Faller);
        assert_eq!(scene.agent(id).activity(), Activity::Splatter);
    }

    #[test]
    fn floater_opens_umbrella_and_survives() {
        let mut scene = Scene::tall();
        scene.fill(Rect::new(0, 201, 200, 10));
        let id = scene.spawn(Point::new(20, 20), Facing::Right);
        scene.assign(id, Activity::Floater);
        assert_eq!(scene.agent(id).activity(), Activity::Faller);
        scene.run_until(id, 60, |agent| agent.activity() == Activity::Floater);
        assert_eq!(scene.agent(id).position().y, 20 + FLOATER_DEPLOY_DISTANCE);
        scene.run_until(id, 200, |agent| agent.activity() != Activity::Floater);
        assert_eq!(scene.agent(id).activity(), Activity::Lander);
        assert_eq!(scene.agent(id).position().y, 200);
    }
}
