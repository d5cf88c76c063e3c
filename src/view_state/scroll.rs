//! Scroll projection and the load-more trigger.

/// Default number of viewport heights left below the viewport that triggers a load.
pub const DEFAULT_PREFETCH_SCREENS: f64 = 2.5;

/// Whether the next page should be requested after a scroll gesture ends.
///
/// `viewport_height` is the visible height, `content_height` the total height of all rows and
/// `offset_y` the projected (post-gesture) scroll offset. Triggers when the remaining distance
/// to the bottom is at most `screens` viewport heights.
pub fn should_load_next_page(
    viewport_height: f64,
    content_height: f64,
    offset_y: f64,
    screens: f64,
) -> bool {
    let remaining = content_height - viewport_height - offset_y;
    remaining <= viewport_height * screens
}

/// Largest valid scroll offset.
pub fn max_offset(viewport_height: f64, content_height: f64) -> f64 {
    (content_height - viewport_height).max(0.0)
}

/// Offset after moving by `delta`, clamped to `[0, max_offset]`.
pub fn project_offset(current: f64, delta: f64, viewport_height: f64, content_height: f64) -> f64 {
    (current + delta).clamp(0.0, max_offset(viewport_height, content_height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn triggers_within_prefetch_distance() {
        // 3000 - 800 - 1600 = 600 remaining.
        assert!(should_load_next_page(800.0, 3000.0, 1600.0, DEFAULT_PREFETCH_SCREENS));
        // 3000 - 800 - 400 = 1800 remaining, still within 2000.
        assert!(should_load_next_page(800.0, 3000.0, 400.0, DEFAULT_PREFETCH_SCREENS));
    }

    #[test]
    fn boundary_triggers() {
        // Remaining is exactly 2.5 screens.
        assert!(should_load_next_page(800.0, 2800.0, 0.0, 2.5));
        assert!(!should_load_next_page(800.0, 2801.0, 0.0, 2.5));
    }

    #[test]
    fn far_from_bottom_does_not_trigger() {
        assert!(!should_load_next_page(800.0, 10_000.0, 0.0, DEFAULT_PREFETCH_SCREENS));
    }

    #[test]
    fn short_content_always_triggers() {
        assert!(should_load_next_page(800.0, 100.0, 0.0, DEFAULT_PREFETCH_SCREENS));
    }

    #[test]
    fn projection_clamps_to_content() {
        assert_eq!(project_offset(0.0, -5.0, 10.0, 30.0), 0.0);
        assert_eq!(project_offset(15.0, 10.0, 10.0, 30.0), 20.0);
        assert_eq!(project_offset(0.0, 3.0, 10.0, 5.0), 0.0);
    }

    proptest! {
        #[test]
        fn trigger_is_monotonic_in_offset(
            viewport in 1.0f64..2000.0,
            content in 0.0f64..50_000.0,
            offset in 0.0f64..50_000.0,
            extra in 0.0f64..1000.0,
        ) {
            if should_load_next_page(viewport, content, offset, DEFAULT_PREFETCH_SCREENS) {
                prop_assert!(should_load_next_page(
                    viewport,
                    content,
                    offset + extra,
                    DEFAULT_PREFETCH_SCREENS
                ));
            }
        }

        #[test]
        fn projected_offset_stays_in_range(
            current in -100.0f64..10_000.0,
            delta in -500.0f64..500.0,
            viewport in 0.0f64..1000.0,
            content in 0.0f64..10_000.0,
        ) {
            let y = project_offset(current, delta, viewport, content);
            prop_assert!(y >= 0.0);
            prop_assert!(y <= max_offset(viewport, content));
        }
    }
}
