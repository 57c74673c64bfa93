/// Wrap-around index arithmetic with the mathematical-modulo convention:
/// moving -1 from 0 yields `count - 1`, moving +1 from `count - 1` yields 0.
///
/// Callers must guard `count == 0`; the debug assertion catches violations
/// and release builds fall back to 0 rather than dividing by zero.
pub fn wrap_index(current: usize, direction: isize, count: usize) -> usize {
    debug_assert!(count > 0, "wrap_index called on an empty collection");
    if count == 0 {
        return 0;
    }
    (current as isize + direction).rem_euclid(count as isize) as usize
}
