//! Line-of-sight path smoothing (string pulling)

use glam::Vec2;

use super::mask::NavMask;

/// Check that every sample along the segment `from -> to` is walkable.
///
/// Samples are spaced at most `step` apart along the dominant axis, endpoints
/// included, and floored to whole pixels before the mask lookup.
#[must_use]
pub fn has_line_of_sight(mask: &NavMask, from: Vec2, to: Vec2, step: f32) -> bool {
    let delta = to - from;
    let span = delta.abs().max_element();

    if span == 0.0 {
        return true;
    }

    let samples = (span / step.max(f32::EPSILON)).ceil().max(1.0) as usize;
    (0..=samples).all(|i| {
        let t = i as f32 / samples as f32;
        mask.is_walkable((from + delta * t).floor())
    })
}

/// Reduce a waypoint list to the points where the path must turn.
///
/// From each anchor, later waypoints are tried in order and the last one
/// still in sight becomes the next anchor. The first and last waypoints are
/// always kept; paths of two points or fewer come back unchanged.
#[must_use]
pub fn smooth_path(mask: &NavMask, path: &[Vec2], step: f32) -> Vec<Vec2> {
    if path.len() <= 2 {
        return path.to_vec();
    }

    let mut smoothed = vec![path[0]];
    let mut current = 0;

    while current < path.len() - 1 {
        let mut farthest = current + 1;

        for candidate in current + 2..path.len() {
            if !has_line_of_sight(mask, path[current], path[candidate], step) {
                break;
            }
            farthest = candidate;
        }

        smoothed.push(path[farthest]);
        current = farthest;
    }

    smoothed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::grid::NavGrid;
    use crate::nav::pathfinding::plan_world_path;
    use crate::nav::test_util::mask_from_ascii;

    #[test]
    fn test_line_of_sight_open_and_blocked() {
        let mask = mask_from_ascii(&["....", ".#..", "...."], 32);

        assert!(has_line_of_sight(&mask, Vec2::new(16.0, 16.0), Vec2::new(112.0, 16.0), 32.0));
        assert!(!has_line_of_sight(&mask, Vec2::new(16.0, 48.0), Vec2::new(112.0, 48.0), 32.0));
        assert!(!has_line_of_sight(&mask, Vec2::new(16.0, 16.0), Vec2::new(80.0, 80.0), 32.0));
    }

    #[test]
    fn test_line_of_sight_checks_endpoints() {
        let mask = mask_from_ascii(&["...#"], 32);

        assert!(!has_line_of_sight(&mask, Vec2::new(16.0, 16.0), Vec2::new(112.0, 16.0), 32.0));
        assert!(has_line_of_sight(&mask, Vec2::new(40.0, 10.0), Vec2::new(40.0, 10.0), 32.0));
    }

    #[test]
    fn test_short_paths_unchanged() {
        let mask = NavMask::absent();
        let path = vec![Vec2::new(1.0, 2.0), Vec2::new(30.0, 40.0)];

        assert_eq!(smooth_path(&mask, &path, 32.0), path);
        assert!(smooth_path(&mask, &[], 32.0).is_empty());
    }

    #[test]
    fn test_straight_run_collapses() {
        let mask = mask_from_ascii(&["........"], 32);
        let path: Vec<Vec2> = (0..8)
            .map(|x| Vec2::new(x as f32 * 32.0 + 16.0, 16.0))
            .collect();

        let smoothed = smooth_path(&mask, &path, 32.0);

        assert_eq!(smoothed, vec![path[0], path[7]]);
    }

    #[test]
    fn test_smoothing_keeps_turns_around_walls() {
        let mask = mask_from_ascii(
            &[
                "..........",
                "..........",
                "######....",
                "..........",
                "..........",
            ],
            32,
        );
        let grid = NavGrid::build(&mask, 32.0).unwrap();
        let path =
            plan_world_path(&grid, &mask, Vec2::new(16.0, 16.0), Vec2::new(16.0, 144.0), 16.0)
                .unwrap();

        let smoothed = smooth_path(&mask, &path, 32.0);

        assert!(smoothed.len() <= path.len());
        assert!(smoothed.len() >= 3, "must bend around the wall: {smoothed:?}");
        assert_eq!(smoothed.first(), path.first());
        assert_eq!(smoothed.last(), path.last());
        for pair in smoothed.windows(2) {
            assert!(has_line_of_sight(&mask, pair[0], pair[1], 32.0));
        }
    }
}
