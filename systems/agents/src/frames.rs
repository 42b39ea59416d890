use lix_core::{Activity, FrameSource};

/// Frame counts of the stock agent sprite sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StandardFrames;

impl StandardFrames {
    /// Number of frames in the animation row of `activity`.
    #[must_use]
    pub const fn frame_count(activity: Activity) -> i32 {
        match activity {
            Activity::Nothing | Activity::Exploder => 1,
            Activity::Faller => 4,
            Activity::Tumbler => 8,
            Activity::Stunner => 32,
            Activity::Lander => 2,
            Activity::Splatter | Activity::Burner | Activity::Exiter => 16,
            Activity::Drowner => 16,
            Activity::Walker | Activity::Runner | Activity::Climber => 8,
            Activity::Ascender => 6,
            Activity::Floater => 8,
            Activity::Blocker => 16,
            Activity::Builder | Activity::Platformer => 16,
            Activity::Shrugger | Activity::Shrugger2 => 8,
            Activity::Basher => 16,
            Activity::Miner => 24,
            Activity::Digger => 16,
            Activity::Jumper => 2,
            Activity::Batter => 10,
        }
    }
}

impl FrameSource for StandardFrames {
    fn frame_exists(&self, frame: i32, activity: Activity) -> bool {
        frame >= 0 && frame < Self::frame_count(activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_activity_has_a_first_frame() {
        for activity in Activity::ALL {
            assert!(StandardFrames.frame_exists(0, activity), "{activity:?}");
            assert!(!StandardFrames.frame_exists(-1, activity));
        }
    }

    #[test]
    fn priority_thresholds_fit_inside_their_rows() {
        assert!(StandardFrames.frame_exists(16, Activity::Stunner));
        assert!(StandardFrames.frame_exists(5, Activity::Ascender));
        assert!(!StandardFrames.frame_exists(6, Activity::Ascender));
    }
}
