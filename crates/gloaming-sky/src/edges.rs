use gloaming_core::{Body, Cue};

/// Last tick's geometric visibility of both bodies.
///
/// Updated only after the comparison, so edges always compare against the
/// previous tick and never against a half-updated value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityEdge {
    pub sun_visible: bool,
    pub moon_visible: bool,
}

impl VisibilityEdge {
    /// Compare against this tick's visibility, record it, and return the
    /// rise/set cues for strict transitions (sun first, then moon).
    pub fn advance(&mut self, sun_visible: bool, moon_visible: bool) -> Vec<Cue> {
        let cues = [
            edge_cue(Body::Sun, self.sun_visible, sun_visible),
            edge_cue(Body::Moon, self.moon_visible, moon_visible),
        ]
        .into_iter()
        .flatten()
        .collect();
        self.sun_visible = sun_visible;
        self.moon_visible = moon_visible;
        cues
    }
}

fn edge_cue(body: Body, was: bool, is: bool) -> Option<Cue> {
    match (was, is) {
        (false, true) => Some(body.rise_cue()),
        (true, false) => Some(body.set_cue()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_altitude_sequence() {
        let mut edge = VisibilityEdge::default();
        let fired: Vec<Vec<Cue>> = [-0.1, 0.1, 0.1, -0.1]
            .into_iter()
            .map(|alt: f64| edge.advance(alt > 0.0, false))
            .collect();
        assert_eq!(
            fired,
            vec![vec![], vec![Cue::SunRise], vec![], vec![Cue::SunSet]]
        );
    }

    #[test]
    fn test_both_bodies_same_tick() {
        let mut edge = VisibilityEdge {
            sun_visible: true,
            moon_visible: false,
        };
        assert_eq!(edge.advance(false, true), vec![Cue::SunSet, Cue::MoonRise]);
        assert_eq!(
            edge,
            VisibilityEdge {
                sun_visible: false,
                moon_visible: true
            }
        );
        assert!(edge.advance(false, true).is_empty());
    }
}
