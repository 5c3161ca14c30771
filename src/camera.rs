use glam::Vec3;

/// Closest the polar angle may approach either pole, in degrees. Keeping a
/// degree of clearance avoids the gimbal flip when the view direction would
/// become collinear with the up vector.
pub const POLAR_MIN_DEG: f32 = 1.0;
pub const POLAR_MAX_DEG: f32 = 179.0;

/// Fly camera described by a position and two spherical orientation angles.
///
/// The view direction is reconstructed from the angles after every look
/// update, so it is always unit length. The up vector is fixed world-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub up: Vec3,
    dir: Vec3,
    polar_deg: f32,
    azimuth_deg: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(-10.0, 0.0, 1.0), 90.0, 0.0)
    }
}

impl Camera {
    /// Creates a camera at `eye` oriented by the given spherical angles.
    ///
    /// The polar angle is measured from the up axis (90 degrees is
    /// horizontal), the azimuth from the world x axis.
    pub fn new(eye: Vec3, polar_deg: f32, azimuth_deg: f32) -> Self {
        let mut camera = Self {
            eye,
            up: Vec3::Z,
            dir: Vec3::X,
            polar_deg: polar_deg.clamp(POLAR_MIN_DEG, POLAR_MAX_DEG),
            azimuth_deg,
        };
        camera.rebuild_direction();
        camera
    }

    /// Current view direction (unit length).
    pub fn dir(&self) -> Vec3 {
        self.dir
    }

    pub fn polar_deg(&self) -> f32 {
        self.polar_deg
    }

    pub fn azimuth_deg(&self) -> f32 {
        self.azimuth_deg
    }

    /// Applies a look delta in degrees and rebuilds the direction vector.
    ///
    /// The polar angle is clamped to [1, 179] degrees; the azimuth is
    /// unbounded and wraps naturally through the trigonometry.
    pub fn apply_look(&mut self, polar_delta_deg: f32, azimuth_delta_deg: f32) {
        self.polar_deg = (self.polar_deg + polar_delta_deg).clamp(POLAR_MIN_DEG, POLAR_MAX_DEG);
        self.azimuth_deg += azimuth_delta_deg;
        self.rebuild_direction();
    }

    fn rebuild_direction(&mut self) {
        let polar = self.polar_deg.to_radians();
        let azimuth = self.azimuth_deg.to_radians();
        self.dir = Vec3::new(
            polar.sin() * azimuth.cos(),
            polar.sin() * azimuth.sin(),
            polar.cos(),
        )
        .normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn default_camera_looks_along_x() {
        let camera = Camera::default();
        assert_eq!(camera.eye, Vec3::new(-10.0, 0.0, 1.0));
        assert!((camera.dir() - Vec3::X).length() < EPS);
        assert_eq!(camera.up, Vec3::Z);
    }

    #[test]
    fn polar_angle_clamps_at_both_poles() {
        let mut camera = Camera::default();
        camera.apply_look(10_000.0, 0.0);
        assert_eq!(camera.polar_deg(), POLAR_MAX_DEG);
        camera.apply_look(-20_000.0, 0.0);
        assert_eq!(camera.polar_deg(), POLAR_MIN_DEG);
        // Clamp holds after an arbitrary delta sequence.
        for delta in [500.0, -3.0, -900.0, 42.5, 179.0, -179.0] {
            camera.apply_look(delta, delta);
            assert!(camera.polar_deg() >= POLAR_MIN_DEG);
            assert!(camera.polar_deg() <= POLAR_MAX_DEG);
        }
    }

    #[test]
    fn direction_stays_unit_length_after_look_updates() {
        let mut camera = Camera::default();
        for delta in [13.0, -77.0, 340.0, 0.25, -1000.0] {
            camera.apply_look(delta * 0.3, delta);
            assert!((camera.dir().length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn azimuth_is_unbounded() {
        let mut camera = Camera::default();
        camera.apply_look(0.0, 720.0);
        assert_eq!(camera.azimuth_deg(), 720.0);
        // Two full turns land back on the starting direction.
        assert!((camera.dir() - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn spherical_reconstruction_matches_the_angles() {
        let camera = Camera::new(Vec3::ZERO, 45.0, 90.0);
        let expected = Vec3::new(0.0, 45f32.to_radians().sin(), 45f32.to_radians().cos());
        assert!((camera.dir() - expected).length() < EPS);
    }
}
