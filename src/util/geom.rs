use glam::Vec2;

/// Below this length a direction vector is treated as "no movement".
const DIR_EPSILON: f32 = 1e-4;

/// Normalize `v`, or return zero when it is too short to normalize.
/// Guards every direction computation against division by zero.
pub fn dir_or_zero(v: Vec2) -> Vec2 {
    let len = v.length();
    if len < DIR_EPSILON {
        Vec2::ZERO
    } else {
        v / len
    }
}

/// Strict circular containment: `a` is less than `radius` away from `b`.
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Clamp both axes to `[margin, extent - margin]`. Out-of-bounds positions
/// are corrected, never rejected.
pub fn clamp_to_world(pos: Vec2, margin: f32, extent: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(margin, extent - margin),
        pos.y.clamp(margin, extent - margin),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_vector_yields_zero_direction() {
        assert_eq!(dir_or_zero(Vec2::ZERO), Vec2::ZERO);
        let d = dir_or_zero(Vec2::new(3.0, -4.0));
        assert!((d.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn containment_is_strict() {
        let center = Vec2::new(100.0, 100.0);
        assert!(within(Vec2::new(100.0, 269.0), center, 170.0));
        assert!(!within(Vec2::new(100.0, 270.0), center, 170.0));
    }

    #[test]
    fn world_clamp_corrects_both_axes() {
        let p = clamp_to_world(Vec2::new(-50.0, 9000.0), 30.0, 3000.0);
        assert_eq!(p, Vec2::new(30.0, 2970.0));
    }
}
