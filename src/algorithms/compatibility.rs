//! Pairwise compatibility between fixes

use crate::algorithms::geodesy::distance_between;
use crate::core::Fix;

/// Two fixes are compatible when their accuracy disks, each grown by
/// `radius_m`, overlap. Symmetric but not transitive.
pub fn compatible(a: &Fix, b: &Fix, radius_m: f64) -> bool {
    distance_between(a, b) - a.accuracy - b.accuracy - radius_m < 0.0
}

/// Whether `fix` is compatible with any member of `members`
pub fn compatible_with_any(fix: &Fix, members: &[Fix], radius_m: f64) -> bool {
    members.iter().any(|other| compatible(fix, other, radius_m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::geodesy::offset_north;

    fn fix_at(meters_north: f64, accuracy: f64) -> Fix {
        Fix::new("ap", offset_north(40.0, meters_north), -74.0, accuracy)
    }

    #[test]
    fn test_overlapping_disks_are_compatible() {
        let a = fix_at(0.0, 20.0);
        let b = fix_at(530.0, 20.0);
        assert!(compatible(&a, &b, 500.0));
        assert!(compatible(&b, &a, 500.0));
    }

    #[test]
    fn test_disjoint_disks_are_not_compatible() {
        let a = fix_at(0.0, 20.0);
        let b = fix_at(550.0, 20.0);
        assert!(!compatible(&a, &b, 500.0));
    }

    #[test]
    fn test_touching_disks_are_not_compatible() {
        let a = fix_at(0.0, 0.0);
        let b = fix_at(100.0, 0.0);
        // Strictly negative slack is required
        assert!(!compatible(&a, &b, 99.999));
        assert!(compatible(&a, &b, 100.001));
    }

    #[test]
    fn test_not_transitive() {
        let a = fix_at(0.0, 0.0);
        let b = fix_at(400.0, 0.0);
        let c = fix_at(800.0, 0.0);
        assert!(compatible(&a, &b, 500.0));
        assert!(compatible(&b, &c, 500.0));
        assert!(!compatible(&a, &c, 500.0));
        assert!(compatible_with_any(&c, &[a, b], 500.0));
    }
}
