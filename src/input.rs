//! Keyboard bindings
//!
//! Two logical actions, each bound to an arrow key and a letter key. Keys are
//! matched on `KeyboardEvent.key` values.

use crate::sim::LaneShift;

/// Map a key name to a lane change
pub fn lane_shift_for_key(key: &str) -> Option<LaneShift> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(LaneShift::Left),
        "ArrowRight" | "d" | "D" => Some(LaneShift::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        assert_eq!(lane_shift_for_key("ArrowLeft"), Some(LaneShift::Left));
        assert_eq!(lane_shift_for_key("a"), Some(LaneShift::Left));
        assert_eq!(lane_shift_for_key("ArrowRight"), Some(LaneShift::Right));
        assert_eq!(lane_shift_for_key("D"), Some(LaneShift::Right));
        assert_eq!(lane_shift_for_key("ArrowUp"), None);
        assert_eq!(lane_shift_for_key(" "), None);
    }
}
