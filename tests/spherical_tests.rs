use glam::DVec3;
use view_interactor::math::{ease_in_out, from_spherical, lerp, to_spherical, SphericalCoord};

#[cfg(test)]
mod roundtrip_tests {
    use super::*;

    #[test]
    fn test_spherical_inverse_off_axis_points() {
        let origins = [DVec3::ZERO, DVec3::new(1.0, -2.0, 0.5)];
        let offsets = [
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.3, 2.0, -1.0),
            DVec3::new(-4.0, -0.5, 2.5),
            DVec3::new(-1.0, 1.0, 1.0),
            DVec3::new(0.2, -3.0, -0.1),
        ];

        for origin in origins {
            for offset in offsets {
                let p = origin + offset;
                let back = from_spherical(to_spherical(p, origin), origin);
                assert!((back - p).length() < 1e-9, "{p} came back as {back}");
            }
        }
    }

    #[test]
    fn test_azimuth_sign_follows_y() {
        let above = to_spherical(DVec3::new(-1.0, 1e-9, 0.0), DVec3::ZERO);
        let below = to_spherical(DVec3::new(-1.0, -1e-9, 0.0), DVec3::ZERO);
        assert!(above.azimuth > 3.0);
        assert!(below.azimuth < -3.0);

        // y == 0 stays on the positive side
        let on_axis = to_spherical(DVec3::new(-1.0, 0.0, 0.0), DVec3::ZERO);
        assert!((on_axis.azimuth - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_inputs_are_not_guarded() {
        let s = to_spherical(DVec3::ONE, DVec3::ONE);
        assert_eq!(s.radius, 0.0);
        assert!(s.polar.is_nan());
    }
}

#[cfg(test)]
mod lerp_tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints_and_affinity() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        let b = DVec3::new(-3.0, 0.0, 7.0);
        assert_eq!(lerp(a, b, 0.0, false), a);
        assert_eq!(lerp(a, b, 1.0, false), b);

        for ratio in [0.1, 0.25, 0.5, 0.9] {
            let expected = a * (1.0 - ratio) + b * ratio;
            assert!((lerp(a, b, ratio, false) - expected).length() < 1e-12);
        }
    }

    #[test]
    fn test_lerp_clamp_only_when_asked() {
        assert_eq!(lerp(0.0, 10.0, 5.0, true), 10.0);
        assert_eq!(lerp(0.0, 10.0, -1.0, true), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.5, false), 15.0);
    }

    #[test]
    fn test_lerp_spherical_componentwise() {
        let s0 = SphericalCoord::new(1.0, 0.0, 1.0);
        let s1 = SphericalCoord::new(3.0, 1.0, 2.0);
        let mid = lerp(s0, s1, 0.5, false);
        assert_eq!(mid, SphericalCoord::new(2.0, 0.5, 1.5));
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert!((ease_in_out(1.0) - 1.0).abs() < 1e-12);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-12);
        for t in [0.1, 0.2, 0.3, 0.4] {
            assert!((ease_in_out(t) + ease_in_out(1.0 - t) - 1.0).abs() < 1e-12);
            assert!(ease_in_out(t) < t);
        }
    }
}
