use lix_core::{Activity, Point};

use crate::{Agent, FlingRequest, UpdateArgs};

/// Ticks between lighting the fuse and the explosion.
pub(crate) const FUSE_LENGTH: u32 = 75;
const EXPLOSION_RADIUS: i32 = 22;
/// Height of the blast centre above the foot.
const EXPLOSION_LIFT: i32 = 6;
/// Agents within this distance of the blast are thrown.
const FLING_RADIUS: i32 = 40;
const FLING_SPEED: Point = Point::new(10, -12);

/// Exploder as a skill only lights the fuse; the agent keeps its activity.
pub(crate) fn assign_exploder(lix: &mut Agent, _args: &mut UpdateArgs<'_>) {
    if lix.ploder_timer == 0 {
        lix.ploder_timer = 1;
    }
}

/// Blasts a round hole into non-steel terrain and throws nearby agents.
pub(crate) fn explode(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    let center = lix.point(0, -EXPLOSION_LIFT);
    let radius_squared = EXPLOSION_RADIUS * EXPLOSION_RADIUS;
    for dy in -EXPLOSION_RADIUS..=EXPLOSION_RADIUS {
        for dx in -EXPLOSION_RADIUS..=EXPLOSION_RADIUS {
            if dx * dx + dy * dy <= radius_squared {
                let _ = args
                    .terrain
                    .remove_pixel(Point::new(center.x + dx, center.y + dy));
            }
        }
    }
    args.effects
        .add_explosion(args.phyu, lix.style, lix.id, center);

    let topology = args.terrain.topology();
    for other in args.neighbors {
        if other.id == lix.id || other.activity == Activity::Nothing || other.activity.leaving() {
            continue;
        }
        let dx = topology.delta_x(center.x, other.position.x);
        let dy = topology.delta_y(center.y, other.position.y);
        if dx * dx + dy * dy > FLING_RADIUS * FLING_RADIUS {
            continue;
        }
        let direction = if dx < 0 { -1 } else { 1 };
        args.flings.push(FlingRequest {
            target: other.id,
            source: lix.id,
            speed: Point::new(FLING_SPEED.x * direction, FLING_SPEED.y),
        });
    }

    lix.ploder_timer = 0;
    lix.transition_to(Activity::Exploder, args);
}

pub(crate) fn update_exploder(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    lix.transition_to(Activity::Nothing, args);
}
