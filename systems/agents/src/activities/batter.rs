use lix_core::{Activity, Point, Sound};

use crate::{Agent, FlingRequest, UpdateArgs};

/// Frame of the swing during which the bat connects.
const HIT_FRAME: i32 = 2;
const REACH: i32 = 14;
const TOP: i32 = -16;
const BOTTOM: i32 = 4;
const BAT_SPEED: Point = Point::new(10, -12);

pub(crate) fn update_batter(lix: &mut Agent, args: &mut UpdateArgs<'_>) {
    if lix.fall_if_unsupported(args) {
        return;
    }
    if lix.frame == HIT_FRAME {
        swing(lix, args);
    }
    if lix.is_last_frame(args.frames) {
        lix.transition_to(Activity::Walker, args);
    } else {
        lix.advance_frame(args.frames);
    }
}

fn swing(lix: &Agent, args: &mut UpdateArgs<'_>) {
    let topology = args.terrain.topology();
    let sign = lix.facing.sign();
    let mut hit = false;
    for other in args.neighbors {
        if other.id == lix.id || other.activity == Activity::Nothing || other.activity.leaving() {
            continue;
        }
        let ahead = topology.delta_x(lix.ex, other.position.x) * sign;
        let dy = topology.delta_y(lix.ey, other.position.y);
        if !(0..=REACH).contains(&ahead) || !(TOP..=BOTTOM).contains(&dy) {
            continue;
        }
        args.flings.push(FlingRequest {
            target: other.id,
            source: lix.id,
            speed: Point::new(BAT_SPEED.x * sign, BAT_SPEED.y),
        });
        hit = true;
    }
    if hit {
        args.effects
            .add_sound(args.phyu, lix.style, Some(lix.id), Sound::Batter);
    }
}
