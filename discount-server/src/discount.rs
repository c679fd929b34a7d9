//! Discount calculation
//!
//! Pure function of `(row_sum, role, random draw)`; no persisted state.
//! Loyalty-tier users get the full row sum as the base, everyone else a
//! third of it. A uniform random adjustment in [5, 20] is added and the
//! rounded result is clipped to [5, 50].

use shared::models::LOYAL_ROLE;

/// Lower bound of the final discount (and of the random adjustment)
pub const DISCOUNT_MIN: i64 = 5;
/// Upper bound of the final discount
pub const DISCOUNT_MAX: i64 = 50;
/// Upper bound of the random adjustment
pub const ADJUSTMENT_MAX: i64 = 20;

/// Calculate the discount for a reservation's seat-row sum
pub fn calculate_discount(row_sum: i64, role: &str) -> i64 {
    use rand::Rng;
    let adjustment = rand::thread_rng().gen_range(DISCOUNT_MIN..=ADJUSTMENT_MAX);
    calculate_with_adjustment(row_sum, role, adjustment)
}

fn calculate_with_adjustment(row_sum: i64, role: &str, adjustment: i64) -> i64 {
    let base = if role == LOYAL_ROLE {
        row_sum as f64
    } else {
        row_sum as f64 / 3.0
    };

    let discount = (base + adjustment as f64).round() as i64;
    discount.clamp(DISCOUNT_MIN, DISCOUNT_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discount_always_within_bounds() {
        // The draw is random; assert range, not exact values
        for row_sum in [0, 1, 3, 30, 60, 500] {
            for role in ["loyal", "normal", "unknown"] {
                let d = calculate_discount(row_sum, role);
                assert!(
                    (DISCOUNT_MIN..=DISCOUNT_MAX).contains(&d),
                    "discount {d} out of range for row_sum={row_sum} role={role}"
                );
            }
        }
    }

    #[test]
    fn loyal_row_sum_30_is_unclipped() {
        // base=30, adjustment in [5,20] → raw in [35,50], no clipping
        for adjustment in DISCOUNT_MIN..=ADJUSTMENT_MAX {
            let d = calculate_with_adjustment(30, "loyal", adjustment);
            assert_eq!(d, 30 + adjustment);
        }
    }

    #[test]
    fn loyal_row_sum_60_clips_to_max() {
        for adjustment in DISCOUNT_MIN..=ADJUSTMENT_MAX {
            assert_eq!(calculate_with_adjustment(60, "loyal", adjustment), DISCOUNT_MAX);
        }
    }

    #[test]
    fn normal_role_uses_a_third_of_the_row_sum() {
        // base = 30/3 = 10 → 10 + adjustment
        assert_eq!(calculate_with_adjustment(30, "normal", 7), 17);
        // fractional base is rounded after the addition: 10/3 + 5 = 8.33 → 8
        assert_eq!(calculate_with_adjustment(10, "normal", 5), 8);
    }

    #[test]
    fn small_values_clip_to_min() {
        assert_eq!(calculate_with_adjustment(0, "normal", 5), DISCOUNT_MIN);
    }
}
