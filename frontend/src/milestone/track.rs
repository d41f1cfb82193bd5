/// Half the aircraft icon's width; the icon is centred on the waypoint.
pub const AIRCRAFT_HALF_WIDTH: f64 = 20.0;
pub const FLIGHT_DURATION_MS: u32 = 1500;
pub const CLICK_GUARD_MS: u32 = 600;
pub const RESIZE_SETTLE_MS: u32 = 100;

/// Horizontal extent of an element, as reported by its bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub left: f64,
    pub width: f64,
}

/// Pixel offset of the aircraft within the track when parked over
/// `waypoint`.
pub fn aircraft_offset(waypoint: Span, track: Span) -> f64 {
    waypoint.left - track.left + waypoint.width / 2.0 - AIRCRAFT_HALF_WIDTH
}

/// What the view has to apply after a successful move.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub step: usize,
    pub offset: f64,
    /// Whether to play the in-flight effect; the initial placement does not.
    pub animate: bool,
}

/// Which step of the flight path is active.
///
/// The waypoint card and the track dot both read their state from here, so
/// they cannot drift apart.
#[derive(Clone, Debug, PartialEq)]
pub struct MilestoneTrack {
    len: usize,
    step: usize,
}

impl MilestoneTrack {
    pub fn new(len: usize) -> Self {
        Self { len, step: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn current(&self) -> usize {
        self.step
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.len > 0 && index == self.step
    }

    pub fn track_class(&self) -> String {
        format!("flight-track progress-{}", self.step)
    }

    /// Moves to `step`. Out-of-range steps leave the track untouched and
    /// return `None`.
    pub fn move_to(&mut self, step: usize, waypoint: Span, track: Span) -> Option<Transition> {
        if step >= self.len {
            return None;
        }
        self.step = step;
        Some(Transition {
            step,
            offset: aircraft_offset(waypoint, track),
            animate: true,
        })
    }

    /// Re-places the aircraft over the current step without the flight
    /// effect, e.g. on first render or after a resize.
    pub fn place(&self, waypoint: Span, track: Span) -> Option<Transition> {
        if self.len == 0 {
            return None;
        }
        Some(Transition {
            step: self.step,
            offset: aircraft_offset(waypoint, track),
            animate: false,
        })
    }

    pub fn next_step(&self) -> usize {
        if self.len == 0 {
            0
        } else {
            (self.step + 1) % self.len
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: Span = Span { left: 100.0, width: 1000.0 };

    fn waypoint(i: usize) -> Span {
        Span { left: 100.0 + i as f64 * 200.0, width: 160.0 }
    }

    #[test]
    fn offset_centres_aircraft_on_waypoint() {
        assert_eq!(aircraft_offset(waypoint(0), TRACK), 60.0);
        assert_eq!(aircraft_offset(waypoint(2), TRACK), 460.0);
    }

    #[test]
    fn starts_on_first_step() {
        let track = MilestoneTrack::new(5);
        assert_eq!(track.current(), 0);
        assert!(track.is_active(0));
        assert_eq!(track.track_class(), "flight-track progress-0");
    }

    #[test]
    fn every_valid_step_has_exactly_one_active_marker() {
        let mut track = MilestoneTrack::new(6);
        for step in 0..6 {
            let t = track.move_to(step, waypoint(step), TRACK).expect("in range");
            assert_eq!(t.step, step);
            assert!(t.animate);
            let active: Vec<usize> = (0..track.len()).filter(|&i| track.is_active(i)).collect();
            assert_eq!(active, vec![step]);
            assert_eq!(track.track_class(), format!("flight-track progress-{step}"));
        }
    }

    #[test]
    fn out_of_range_is_a_no_op() {
        let mut track = MilestoneTrack::new(4);
        track.move_to(2, waypoint(2), TRACK);
        let before = track.clone();
        assert_eq!(track.move_to(4, waypoint(4), TRACK), None);
        assert_eq!(track.move_to(usize::MAX, waypoint(0), TRACK), None);
        assert_eq!(track, before);
    }

    #[test]
    fn place_keeps_step_and_skips_animation() {
        let mut track = MilestoneTrack::new(3);
        track.move_to(1, waypoint(1), TRACK);
        let wider = Span { left: 150.0, width: 300.0 };
        let t = track.place(wider, TRACK).expect("placed");
        assert_eq!(t.step, 1);
        assert!(!t.animate);
        assert_eq!(t.offset, 180.0);
    }

    #[test]
    fn next_step_wraps_around() {
        let mut track = MilestoneTrack::new(3);
        track.move_to(2, waypoint(2), TRACK);
        assert_eq!(track.next_step(), 0);
    }

    #[test]
    fn empty_track_has_nothing_active() {
        let mut track = MilestoneTrack::new(0);
        assert!(!track.is_active(0));
        assert_eq!(track.move_to(0, waypoint(0), TRACK), None);
        assert_eq!(track.place(waypoint(0), TRACK), None);
    }
}
