//! Board geometry: locations, the grid, and targeting queries.

pub mod grid;
pub mod location;
pub mod targeting;

pub use grid::Board;
pub use location::{
    calculate_distance, get_champion_direction, get_column_direction, get_row_direction,
    Direction, Location,
};
pub use targeting::{
    check_allowed_direction, check_allowed_distance, check_and_push_allowed_location,
    check_and_push_hit_area_left_right_locations, check_and_push_hit_area_up_down_locations,
    check_back_targeting, check_blocking_objects, get_board_location_in_straight_path,
    get_step_locations, is_blocked_cell, LocationSet,
};
