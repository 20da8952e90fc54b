//! Closed-form drag-free projectile results
//!
//! Used for the "theoretical" readouts next to the projectile canvas. All
//! return `None` when gravity is zero (the flight never ends).

/// Horizontal range R = v² sin(2θ) / g
pub fn range(speed: f64, angle_deg: f64, gravity: f64) -> Option<f64> {
    if gravity <= 0.0 {
        return None;
    }
    let theta = angle_deg.to_radians();
    Some(speed * speed * (2.0 * theta).sin() / gravity)
}

/// Peak height h = v² sin²(θ) / (2g)
pub fn max_height(speed: f64, angle_deg: f64, gravity: f64) -> Option<f64> {
    if gravity <= 0.0 {
        return None;
    }
    let s = angle_deg.to_radians().sin();
    Some(speed * speed * s * s / (2.0 * gravity))
}

/// Time of flight t = 2 v sin(θ) / g
pub fn flight_time(speed: f64, angle_deg: f64, gravity: f64) -> Option<f64> {
    if gravity <= 0.0 {
        return None;
    }
    Some(2.0 * speed * angle_deg.to_radians().sin() / gravity)
}

/// All three theoretical values for one set of launch parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    pub range: Option<f64>,
    pub max_height: Option<f64>,
    pub flight_time: Option<f64>,
}

impl Trajectory {
    pub fn new(speed: f64, angle_deg: f64, gravity: f64) -> Self {
        Self {
            range: range(speed, angle_deg, gravity),
            max_height: max_height(speed, angle_deg, gravity),
            flight_time: flight_time(speed, angle_deg, gravity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forty_five_degrees() {
        let t = Trajectory::new(20.0, 45.0, 9.8);
        assert!((t.range.unwrap() - 40.8).abs() < 0.1);
        assert!((t.max_height.unwrap() - 10.2).abs() < 0.1);
        assert!((t.flight_time.unwrap() - 2.9).abs() < 0.1);
    }

    #[test]
    fn test_zero_gravity_is_unbounded() {
        let t = Trajectory::new(20.0, 45.0, 0.0);
        assert_eq!(t.range, None);
        assert_eq!(t.max_height, None);
        assert_eq!(t.flight_time, None);
    }

    #[test]
    fn test_horizontal_launch_has_no_flight() {
        let t = Trajectory::new(10.0, 0.0, 9.8);
        assert!(t.range.unwrap().abs() < 1e-12);
        assert!(t.max_height.unwrap().abs() < 1e-12);
        assert!(t.flight_time.unwrap().abs() < 1e-12);
    }
}
