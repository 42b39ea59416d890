//! Landers, stunners and shruggers play their animation once, then walk.

use lix_core::Activity;

use crate::{Agent, UpdateArgs};

pub(crate) fn update_recovery(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    if lix.fall_if_unsupported(args) {
        return;
    }
    if lix.is_last_frame(args.frames) {
        lix.transition_to(Activity::Walker, args);
    } else {
        lix.advance_frame(args.frames);
    }
}

#[cfg(test)]
mod tests {
    use lix_core::{Facing, Point, Rect};

    use crate::testing::Scene;

    use super::*;

    #[test]
    fn lander_walks_after_its_animation() {
        let mut scene = Scene::new();
        scene.fill(Rect::new(0, 51, 200, 10));
        let id = scene.spawn(Point::new(20, 50), Facing::Right);
        scene.update();
        assert_eq!(scene.agent(id).activity(), Activity::Lander);
        scene.update();
        scene.update();
        assert_eq!(scene.agent(id).activity(), Activity::Walker);
        assert_eq!(scene.agent(id).position(), Point::new(20, 50));
    }

    #[test]
    fn stunner_falls_when_ground_vanishes() {
        let mut scene = Scene::new();
        scene.fill(Rect::new(0, 51, 200, 10));
        let id = scene.spawn_walker(Point::new(20, 50), Facing::Right);
        scene.agent_mut(id).become_default(Activity::Stunner);
        scene.update();
        assert_eq!(scene.agent(id).frame(), 1);
        scene.clear(Rect::new(0, 51, 200, 10));
        scene.update();
        assert_eq!(scene.agent(id).activity(), Activity::Faller);
    }
}
