//! Position -> click-through-rate curve.

use crate::config::FORECAST;

/// Expected click-through fraction for an organic result at `position`.
///
/// 1..=20 come from the industry table, 21..=50 and beyond follow two
/// exponential tails. Anything non-positive gets the floor.
pub fn ctr_at(position: i32) -> f64 {
    let curve = &FORECAST.ctr;
    if position < 1 {
        return curve.floor;
    }

    let position = position as u32;
    if position <= curve.table_end {
        return curve.table[(position - 1) as usize];
    }

    if position <= curve.mid_tail_end {
        let ranks_past_table = (position - curve.table_end) as f64;
        return curve.mid_tail_base * (-curve.mid_tail_decay * ranks_past_table).exp();
    }

    let ranks_past_mid_tail = (position - curve.mid_tail_end) as f64;
    curve.deep_tail_base * (-curve.deep_tail_decay * ranks_past_mid_tail).exp()
}

/// CTR with a caller-measured override. A positive `custom_ctr` wins regardless of position.
pub fn ctr_with_override(position: i32, custom_ctr: Option<f64>) -> f64 {
    match custom_ctr {
        Some(ctr) if ctr > 0.0 => ctr,
        _ => ctr_at(position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_values() {
        assert_eq!(ctr_at(1), 0.316);
        assert_eq!(ctr_at(12), 0.023);
        assert_eq!(ctr_at(20), 0.012);
    }

    #[test]
    fn test_strictly_decreasing_through_top_twenty() {
        for position in 1..20 {
            assert!(
                ctr_at(position) > ctr_at(position + 1),
                "CTR({}) should exceed CTR({})",
                position,
                position + 1
            );
        }
    }

    #[test]
    fn test_no_jump_at_tail_boundaries() {
        // 20 -> 21 continues the table's last value through the mid tail
        let step_20_21 = ctr_at(20) - ctr_at(21);
        assert!(step_20_21 > 0.0);
        assert!(step_20_21 < 0.001);

        // 50 -> 51 switches formula but keeps decreasing by a small step
        let step_50_51 = ctr_at(50) - ctr_at(51);
        assert!(step_50_51 > 0.0);
        assert!(step_50_51 < 0.002);
    }

    #[test]
    fn test_tail_formulas() {
        assert!((ctr_at(30) - 0.012 * (-0.2f64).exp()).abs() < 1e-12);
        assert!((ctr_at(100) - 0.005 * (-0.5f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_floor_for_non_positive_positions() {
        assert_eq!(ctr_at(0), 0.001);
        assert_eq!(ctr_at(-4), 0.001);
    }

    #[test]
    fn test_custom_ctr_overrides_when_positive() {
        assert_eq!(ctr_with_override(40, Some(0.2)), 0.2);
        assert_eq!(ctr_with_override(1, Some(0.0)), 0.316);
        assert_eq!(ctr_with_override(1, None), 0.316);
    }
}
