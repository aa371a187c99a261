//! Health grading - maps a cell's loaded voltage to a letter grade.
//!
//! The ladder has 13 steps from "A" down to "F", each spanning 0.1 V
//! starting at 2.9 V. A voltage at a threshold earns the grade above it
//! (2.90 V is still an "A"); anything below 1.8 V is an "F".

/// Grade strings, best first. Index with [`grade_index`].
pub const GRADES: [&str; 13] = [
    "A", "A-", "B+", "B", "B-", "C+", "C", "C-", "C--", "D+", "D", "D-", "F",
];

/// Minimum loaded voltage for each grade above "F". `GRADES[i]` requires
/// at least `THRESHOLDS[i]` volts; failing all of them grades "F".
const THRESHOLDS: [f32; 12] = [
    2.9, 2.8, 2.7, 2.6, 2.5, 2.4, 2.3, 2.2, 2.1, 2.0, 1.9, 1.8,
];

/// Index into [`GRADES`] for a loaded cell voltage.
pub fn grade_index(loaded_volts: f32) -> usize {
    THRESHOLDS
        .iter()
        .position(|threshold| loaded_volts >= *threshold)
        .unwrap_or(GRADES.len() - 1)
}

/// Letter grade for a loaded cell voltage.
pub fn grade(loaded_volts: f32) -> &'static str {
    GRADES[grade_index(loaded_volts)]
}

/// Grade all four cells of a quad pack.
pub fn grade_cells(loaded_volts: &[f32; 4]) -> [&'static str; 4] {
    [
        grade(loaded_volts[0]),
        grade(loaded_volts[1]),
        grade(loaded_volts[2]),
        grade(loaded_volts[3]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_above_top_threshold() {
        assert_eq!(grade(2.95), "A");
        assert_eq!(grade(3.5), "A");
    }

    #[test]
    fn grade_threshold_is_inclusive() {
        // Exactly at a threshold earns the grade above it.
        assert_eq!(grade(2.9), "A");
        assert_eq!(grade(2.8), "A-");
        assert_eq!(grade(1.8), "D-");
    }

    #[test]
    fn grade_between_thresholds() {
        assert_eq!(grade(2.85), "A-");
        assert_eq!(grade(2.75), "B+");
        assert_eq!(grade(2.15), "C--");
    }

    #[test]
    fn grade_floor_is_f() {
        assert_eq!(grade(1.7), "F");
        assert_eq!(grade(1.5), "F");
        assert_eq!(grade(0.0), "F");
    }

    #[test]
    fn grade_index_never_out_of_bounds() {
        let mut v = -1.0;
        while v < 4.0 {
            assert!(grade_index(v) < GRADES.len());
            v += 0.01;
        }
    }

    #[test]
    fn grade_all_cells() {
        let grades = grade_cells(&[2.95, 2.85, 2.45, 1.5]);
        assert_eq!(grades, ["A", "A-", "C+", "F"]);
    }
}
