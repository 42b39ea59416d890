use lix_core::Activity;

use crate::{Agent, UpdateArgs};

/// Highest step a walker climbs without stopping.
pub(crate) const MAX_STEP_UP: i32 = 6;
/// Deepest step a walker descends without starting to fall.
pub(crate) const MAX_STEP_DOWN: i32 = 6;
const STEP: i32 = 2;
const RUNNER_STEPS: usize = 2;

pub(crate) fn assign_walker(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    match lix.activity {
        Activity::Walker | Activity::Runner => lix.turn(),
        _ => lix.transition_to(Activity::Walker, args),
    }
}

/// Walkers with the runner ability become runners instead.
pub(crate) fn become_walker(lix: &mut Agent, _args: &mut UpdateArgs<'_>) {
    let activity = if lix.runner {
        Activity::Runner
    } else {
        Activity::Walker
    };
    lix.become_default(activity);
}

pub(crate) fn assign_runner(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    lix.runner = true;
    if lix.activity == Activity::Walker {
        lix.transition_to(Activity::Runner, args);
    }
}

pub(crate) fn update_walker(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    lix.advance_frame(args.frames);
    walk(lix, args);
}

pub(crate) fn update_runner(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    lix.advance_frame(args.frames);
    for _ in 0..RUNNER_STEPS {
        if lix.activity != Activity::Runner {
            break;
        }
        walk(lix, args);
    }
}

/// One step along the ground: up small steps, turn or climb at walls, down
/// small steps, fall off ledges.
pub(crate) fn walk(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    lix.move_ahead(args.terrain, STEP);

    if lix.is_solid(args.terrain, 0, 0) {
        let rise = lix.solid_wall_height(args.terrain, 0, 0);
        if rise <= MAX_STEP_UP {
            lix.move_up(args.terrain, rise);
        } else {
            lix.move_ahead(args.terrain, -STEP);
            hit_wall(lix, args);
        }
        return;
    }
    if lix.is_solid(args.terrain, 0, 1) {
        return;
    }
    match (1..=MAX_STEP_DOWN).find(|&drop| lix.is_solid(args.terrain, 0, drop + 1)) {
        Some(drop) => lix.move_down(args.terrain, drop),
        None => lix.transition_to(Activity::Faller, args),
    }
}

fn hit_wall(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    if lix.climber {
        lix.transition_to(Activity::Climber, args);
    } else {
        lix.turn();
    }
}

#[cfg(test)]
mod tests {
    use lix_core::{Facing, Point, Rect};

    use crate::testing::Scene;

    use super::*;

    #[test]
    fn walker_climbs_small_steps() {
        let mut scene = Scene::new();
        scene.fill(Rect::new(0, 51, 200, 10));
        scene.fill(Rect::new(24, 47, 40, 4));
        let id = scene.spawn_walker(Point::new(20, 50), Facing::Right);
        for _ in 0..3 {
            scene.update();
        }
        let agent = scene.agent(id);
        assert_eq!(agent.position(), Point::new(26, 46));
        assert_eq!(agent.activity(), Activity::Walker);
    }

    #[test]
    fn walker_turns_at_high_walls() {
        let mut scene = Scene::new();
        scene.fill(Rect::new(0, 51, 200, 10));
        scene.fill(Rect::new(24, 30, 4, 21));
        let id = scene.spawn_walker(Point::new(20, 50), Facing::Right);
        scene.update();
        scene.update();
        let agent = scene.agent(id);
        assert_eq!(agent.facing(), Facing::Left);
        assert_eq!(agent.position(), Point::new(22, 50));
    }

    #[test]
    fn climber_ability_climbs_instead_of_turning() {
        let mut scene = Scene::new();
        scene.fill(Rect::new(0, 51, 200, 10));
        scene.fill(Rect::new(24, 30, 4, 21));
        let id = scene.spawn_walker(Point::new(20, 50), Facing::Right);
        scene.agent_mut(id).climber = true;
        scene.update();
        scene.update();
        assert_eq!(scene.agent(id).activity(), Activity::Climber);
        assert_eq!(scene.agent(id).facing(), Facing::Right);
    }

    #[test]
    fn walker_descends_small_steps_and_falls_off_ledges() {
        let mut scene = Scene::new();
        scene.fill(Rect::new(0, 51, 24, 10));
        scene.fill(Rect::new(24, 55, 8, 10));
        let id = scene.spawn_walker(Point::new(20, 50), Facing::Right);
        scene.update();
        scene.update();
        assert_eq!(scene.agent(id).position(), Point::new(24, 54));
        for _ in 0..4 {
            scene.update();
        }
        assert_eq!(scene.agent(id).activity(), Activity::Faller);
    }

    #[test]
    fn runner_covers_twice_the_distance() {
        let mut scene = Scene::new();
        scene.fill(Rect::new(0, 51, 200, 10));
        let id = scene.spawn_walker(Point::new(20, 50), Facing::Right);
        scene.assign(id, Activity::Runner);
        assert_eq!(scene.agent(id).activity(), Activity::Runner);
        scene.update();
        assert_eq!(scene.agent(id).position(), Point::new(24, 50));
    }

    #[test]
    fn walker_on_walker_turns_around() {
        let mut scene = Scene::new();
        scene.fill(Rect::new(0, 51, 200, 10));
        let id = scene.spawn_walker(Point::new(20, 50), Facing::Right);
        scene.assign(id, Activity::Walker);
        assert_eq!(scene.agent(id).facing(), Facing::Left);
        assert_eq!(scene.agent(id).frame(), 0);
    }
}
