//! Targeting queries over the board.
//!
//! ## Rays
//!
//! A straight action reaches along the four orthogonal rays from its
//! origin. Unless the action has free targeting, a ray stops at the first
//! blocking card: the blocker's cell is reachable, nothing beyond it is.
//!
//! ## Hit areas
//!
//! A hit area adds cells beside the ray at a given distance. Offsets are
//! perpendicular to the ray and obey the same stop-on-blocker policy,
//! walking outward from the ray cell.
//!
//! All functions here are pure queries; they drive both UI highlighting and
//! resolver validation.

use rustc_hash::FxHashSet;
use tracing::trace;

use super::grid::Board;
use super::location::{calculate_distance, get_champion_direction, Direction, Location};
use crate::cards::{ActionCard, CardArena, HitArea, TargetDirection};

/// Deduplicated, insertion-ordered set of candidate locations.
#[derive(Clone, Debug, Default)]
pub struct LocationSet {
    list: Vec<Location>,
    seen: FxHashSet<Location>,
}

impl LocationSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location unless already present.
    pub fn push(&mut self, location: Location) {
        if self.seen.insert(location) {
            self.list.push(location);
        }
    }

    #[must_use]
    pub fn contains(&self, location: Location) -> bool {
        self.seen.contains(&location)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Location> + '_ {
        self.list.iter().copied()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Location> {
        self.list
    }
}

/// Inclusive distance range check.
#[must_use]
pub fn check_allowed_distance(min: u32, max: u32, src: Location, dst: Location) -> bool {
    let distance = calculate_distance(src, dst);
    min <= distance && distance <= max
}

/// `Straight` requires a shared row or column; `Any` accepts everything.
#[must_use]
pub fn check_allowed_direction(direction: TargetDirection, src: Location, dst: Location) -> bool {
    match direction {
        TargetDirection::Straight => src.row == dst.row || src.col == dst.col,
        TargetDirection::Any => true,
    }
}

/// Check whether a cell holds a blocking card.
#[must_use]
pub fn is_blocked_cell(board: &Board, arena: &CardArena, location: Location) -> bool {
    board.get(location).is_some_and(|guid| arena.is_blocking(guid))
}

/// Walk from `src` toward `dst` and report whether any intermediate cell
/// holds a blocking card. Endpoints are excluded.
///
/// The walk is orthogonal: it covers the row axis first, then the column
/// axis, one cell per step.
#[must_use]
pub fn check_blocking_objects(board: &Board, arena: &CardArena, src: Location, dst: Location) -> bool {
    let (dr, _) = super::get_row_direction(src, dst).delta();
    let (_, dc) = super::get_column_direction(src, dst).delta();

    let mut current = src;
    while current.row != dst.row {
        current = current.offset(dr, 0);
        if current != dst && is_blocked_cell(board, arena, current) {
            return true;
        }
    }
    while current.col != dst.col {
        current = current.offset(0, dc);
        if current != dst && is_blocked_cell(board, arena, current) {
            return true;
        }
    }
    false
}

/// Attack direction from `src` to `dst` matches the target's facing, so the
/// attacker stands behind it. A target without facing can be hit from
/// anywhere.
#[must_use]
pub fn check_back_targeting(src: Location, dst: Location, target_facing: Direction) -> bool {
    target_facing == Direction::None || get_champion_direction(src, dst) == target_facing
}

/// Push `location` if it is on the board and `within_range`.
///
/// Returns whether a ray may continue past it: false when the location is
/// off the board, or when it holds a blocker and `stop_on_blockers` is set.
pub fn check_and_push_allowed_location(
    board: &Board,
    arena: &CardArena,
    location: Location,
    within_range: bool,
    stop_on_blockers: bool,
    out: &mut LocationSet,
) -> bool {
    if !board.in_bounds(location) {
        return false;
    }
    if within_range {
        out.push(location);
    }
    !(stop_on_blockers && is_blocked_cell(board, arena, location))
}

/// Expand a hit area beside a cell of a vertical ray: offsets shift columns.
pub fn check_and_push_hit_area_up_down_locations(
    board: &Board,
    arena: &CardArena,
    ray_cell: Location,
    area: &HitArea,
    stop_on_blockers: bool,
    out: &mut LocationSet,
) {
    push_lateral(board, arena, ray_cell, area, (0, 1), stop_on_blockers, out);
}

/// Expand a hit area beside a cell of a horizontal ray: offsets shift rows.
pub fn check_and_push_hit_area_left_right_locations(
    board: &Board,
    arena: &CardArena,
    ray_cell: Location,
    area: &HitArea,
    stop_on_blockers: bool,
    out: &mut LocationSet,
) {
    push_lateral(board, arena, ray_cell, area, (1, 0), stop_on_blockers, out);
}

fn push_lateral(
    board: &Board,
    arena: &CardArena,
    ray_cell: Location,
    area: &HitArea,
    (unit_row, unit_col): (i32, i32),
    stop_on_blockers: bool,
    out: &mut LocationSet,
) {
    for &offset in &area.offsets {
        let sign = offset.signum();
        let mut reachable = true;
        for step in 1..offset.abs() {
            let between = ray_cell.offset(unit_row * sign * step, unit_col * sign * step);
            if stop_on_blockers && is_blocked_cell(board, arena, between) {
                reachable = false;
                break;
            }
        }
        let target = ray_cell.offset(unit_row * offset, unit_col * offset);
        if reachable && offset != 0 && board.in_bounds(target) {
            out.push(target);
        }
    }
}

/// All locations an action can target from `origin`.
///
/// Straight rays within the distance range, each ray cell expanded by the
/// hit areas declared for its distance. `Any` actions also reach every cell
/// of the Manhattan diamond within range whose orthogonal walk is clear.
#[must_use]
pub fn get_board_location_in_straight_path(
    board: &Board,
    arena: &CardArena,
    origin: Location,
    action: &ActionCard,
) -> Vec<Location> {
    let stop_on_blockers = !action.is_free_targeting;
    let range = action.distance;
    let mut out = LocationSet::new();

    for direction in Direction::ORTHOGONAL {
        let mut distance = 1u32;
        while distance <= range.max {
            let cell = origin.step(direction, distance as i32);
            let within_range = distance >= range.min;
            let continues = check_and_push_allowed_location(
                board,
                arena,
                cell,
                within_range,
                stop_on_blockers,
                &mut out,
            );

            if within_range && board.in_bounds(cell) {
                for area in action.hit_areas.iter().filter(|a| a.distance == distance) {
                    if direction.is_vertical() {
                        check_and_push_hit_area_up_down_locations(
                            board, arena, cell, area, stop_on_blockers, &mut out,
                        );
                    } else {
                        check_and_push_hit_area_left_right_locations(
                            board, arena, cell, area, stop_on_blockers, &mut out,
                        );
                    }
                }
            }

            if !continues {
                break;
            }
            distance += 1;
        }
    }

    if action.direction == TargetDirection::Any {
        for cell in board.locations() {
            if cell != origin
                && range.contains(calculate_distance(origin, cell))
                && !(stop_on_blockers && check_blocking_objects(board, arena, origin, cell))
            {
                out.push(cell);
            }
        }
    }

    trace!(%origin, count = out.len(), "expanded action targets");
    out.into_vec()
}

/// Empty locations within `max` cells of `origin` along a row or column.
/// Movement does not check blockers, so occupied cells are skipped, not
/// treated as walls.
#[must_use]
pub fn get_step_locations(board: &Board, origin: Location, max: u32) -> Vec<Location> {
    let mut out = Vec::new();
    for direction in Direction::ORTHOGONAL {
        for distance in 1..=max as i32 {
            let cell = origin.step(direction, distance);
            if board.is_empty_at(cell) {
                out.push(cell);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{ActionType, Card, CardKind, Champion, Crystal, StatBlock};
    use crate::core::CardGuid;

    fn setup() -> (Board, CardArena) {
        (Board::new(7, 5), CardArena::new())
    }

    fn put_blocker(board: &mut Board, arena: &mut CardArena, guid: u32, loc: Location) {
        arena.insert(Card::new(
            CardGuid(guid),
            "Wall",
            CardKind::Champion(Champion::new("Warrior", StatBlock::new(1, 1, 1, 5))),
        ));
        board.place(loc, CardGuid(guid));
    }

    #[test]
    fn test_allowed_distance_inclusive() {
        let src = Location::new(3, 2);
        assert!(check_allowed_distance(1, 2, src, Location::new(1, 2)));
        assert!(check_allowed_distance(1, 2, src, Location::new(3, 3)));
        assert!(!check_allowed_distance(1, 2, src, Location::new(0, 2)));
        assert!(!check_allowed_distance(1, 2, src, src));
    }

    #[test]
    fn test_allowed_direction() {
        let src = Location::new(3, 2);
        assert!(check_allowed_direction(TargetDirection::Straight, src, Location::new(0, 2)));
        assert!(check_allowed_direction(TargetDirection::Straight, src, Location::new(3, 4)));
        assert!(!check_allowed_direction(TargetDirection::Straight, src, Location::new(2, 3)));
        assert!(check_allowed_direction(TargetDirection::Any, src, Location::new(2, 3)));
    }

    #[test]
    fn test_blocking_excludes_endpoints() {
        let (mut board, mut arena) = setup();
        put_blocker(&mut board, &mut arena, 1, Location::new(3, 2));
        put_blocker(&mut board, &mut arena, 2, Location::new(1, 2));

        assert!(!check_blocking_objects(&board, &arena, Location::new(3, 2), Location::new(1, 2)));
        assert!(!check_blocking_objects(&board, &arena, Location::new(2, 2), Location::new(1, 2)));
        assert!(check_blocking_objects(&board, &arena, Location::new(4, 2), Location::new(0, 2)));
    }

    #[test]
    fn test_non_blocking_card_does_not_block() {
        let (mut board, mut arena) = setup();
        put_blocker(&mut board, &mut arena, 1, Location::new(2, 2));
        arena.champion_mut(CardGuid(1)).unwrap().is_blocking = false;

        assert!(!check_blocking_objects(&board, &arena, Location::new(3, 2), Location::new(0, 2)));
    }

    #[test]
    fn test_blocking_walk_rows_then_columns() {
        let (mut board, mut arena) = setup();
        put_blocker(&mut board, &mut arena, 1, Location::new(1, 0));

        assert!(check_blocking_objects(&board, &arena, Location::new(0, 0), Location::new(2, 2)));
        assert!(!check_blocking_objects(&board, &arena, Location::new(0, 1), Location::new(2, 2)));
    }

    #[test]
    fn test_push_allowed_location_stops_on_blocker() {
        let (mut board, mut arena) = setup();
        put_blocker(&mut board, &mut arena, 1, Location::new(2, 2));
        let mut out = LocationSet::new();

        let continues = check_and_push_allowed_location(
            &board, &arena, Location::new(2, 2), true, true, &mut out,
        );
        assert!(!continues);
        assert!(out.contains(Location::new(2, 2)));

        let continues = check_and_push_allowed_location(
            &board, &arena, Location::new(2, 2), true, false, &mut out,
        );
        assert!(continues);
        assert_eq!(out.len(), 1);

        assert!(!check_and_push_allowed_location(
            &board, &arena, Location::new(9, 2), true, false, &mut out,
        ));
    }

    #[test]
    fn test_ray_stops_at_blocker() {
        let (mut board, mut arena) = setup();
        let origin = Location::new(5, 2);
        put_blocker(&mut board, &mut arena, 1, Location::new(3, 2));
        let action = ActionCard::new(ActionType::Ranged).with_distance(1, 4);

        let targets = get_board_location_in_straight_path(&board, &arena, origin, &action);

        assert!(targets.contains(&Location::new(4, 2)));
        assert!(targets.contains(&Location::new(3, 2)));
        assert!(!targets.contains(&Location::new(2, 2)));
        assert!(!targets.contains(&Location::new(1, 2)));
        assert!(targets.contains(&Location::new(6, 2)));
        assert!(targets.contains(&Location::new(5, 0)));
    }

    #[test]
    fn test_free_targeting_ignores_blockers() {
        let (mut board, mut arena) = setup();
        let origin = Location::new(5, 2);
        put_blocker(&mut board, &mut arena, 1, Location::new(4, 2));
        let action = ActionCard::new(ActionType::Magic).with_distance(1, 3).free_targeting();

        let targets = get_board_location_in_straight_path(&board, &arena, origin, &action);

        assert!(targets.contains(&Location::new(3, 2)));
        assert!(targets.contains(&Location::new(2, 2)));
    }

    #[test]
    fn test_min_distance_excludes_near_cells() {
        let (board, arena) = setup();
        let action = ActionCard::new(ActionType::Magic).with_distance(2, 3);

        let targets = get_board_location_in_straight_path(&board, &arena, Location::new(3, 2), &action);

        assert!(!targets.contains(&Location::new(2, 2)));
        assert!(targets.contains(&Location::new(1, 2)));
        assert!(targets.contains(&Location::new(0, 2)));
    }

    #[test]
    fn test_hit_area_adds_lateral_cells() {
        let (board, arena) = setup();
        let action = ActionCard::basic_hit().with_hit_area(HitArea::sweep(1));

        let targets = get_board_location_in_straight_path(&board, &arena, Location::new(3, 2), &action);

        // Upward ray: cell (2, 2) plus columns 1 and 3.
        assert!(targets.contains(&Location::new(2, 1)));
        assert!(targets.contains(&Location::new(2, 3)));
        // Rightward ray: cell (3, 3) plus rows 2 and 4.
        assert!(targets.contains(&Location::new(4, 3)));
        // Deduplicated.
        let unique: FxHashSet<_> = targets.iter().collect();
        assert_eq!(unique.len(), targets.len());
    }

    #[test]
    fn test_hit_area_respects_bounds() {
        let (board, arena) = setup();
        let action = ActionCard::basic_hit().with_hit_area(HitArea::sweep(1));

        let targets = get_board_location_in_straight_path(&board, &arena, Location::new(0, 0), &action);

        assert!(targets.iter().all(|&loc| board.in_bounds(loc)));
    }

    #[test]
    fn test_any_direction_diamond() {
        let (board, arena) = setup();
        let action = ActionCard::new(ActionType::Support)
            .with_distance(1, 2)
            .with_direction(TargetDirection::Any);

        let targets = get_board_location_in_straight_path(&board, &arena, Location::new(3, 2), &action);

        assert!(targets.contains(&Location::new(2, 3)));
        assert!(targets.contains(&Location::new(1, 2)));
        assert!(!targets.contains(&Location::new(1, 3)));
        assert_eq!(targets.len(), 12);
    }

    #[test]
    fn test_back_targeting() {
        let src = Location::new(4, 2);
        let dst = Location::new(3, 2);
        assert!(check_back_targeting(src, dst, Direction::Up));
        assert!(!check_back_targeting(src, dst, Direction::Down));
        assert!(check_back_targeting(src, dst, Direction::None));
    }

    #[test]
    fn test_step_locations_skip_occupied() {
        let (mut board, mut arena) = setup();
        arena.insert(Card::new(CardGuid(1), "Crystal", CardKind::Crystal(Crystal::new(20))));
        board.place(Location::new(2, 2), CardGuid(1));

        let steps = get_step_locations(&board, Location::new(4, 2), 3);

        assert!(steps.contains(&Location::new(3, 2)));
        assert!(!steps.contains(&Location::new(2, 2)));
        assert!(steps.contains(&Location::new(1, 2)));
        assert!(!steps.contains(&Location::new(0, 2)));
        assert!(steps.contains(&Location::new(4, 4)));
        assert!(!steps.contains(&Location::new(3, 3)));
    }
}
