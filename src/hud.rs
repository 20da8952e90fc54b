//! Textual readouts shown next to each canvas

use crate::sim::{ForceSim, ProjectileSim, Trajectory};

/// Newton's second law panel of the force/mass simulator
#[derive(Debug, Clone, PartialEq)]
pub struct ForceReadout {
    pub force: String,
    pub mass: String,
    pub law: String,
}

impl ForceReadout {
    pub fn new(sim: &ForceSim) -> Self {
        let force = sim.controls.force();
        let mass = sim.controls.mass().get();
        Self {
            force: format!("Force: {}N", force),
            mass: format!("Mass: {}kg", mass),
            law: format!(
                "F = ma → a = F/m = {}/{} = {:.2} m/s²",
                force,
                mass,
                sim.acceleration()
            ),
        }
    }
}

/// Launch parameters and theoretical results of the projectile simulator
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileReadout {
    pub angle: String,
    pub speed: String,
    pub mass: String,
    pub gravity: String,
    pub drag: String,
    pub range: String,
    pub max_height: String,
    pub flight_time: String,
    pub in_flight: String,
}

impl ProjectileReadout {
    pub fn new(sim: &ProjectileSim) -> Self {
        let c = &sim.controls;
        let t = Trajectory::new(c.speed(), c.angle_deg(), c.gravity());
        Self {
            angle: format!("{}°", c.angle_deg()),
            speed: format!("Initial Velocity: {} m/s", c.speed()),
            mass: format!("Mass: {} kg", c.mass().get()),
            gravity: format!("Gravity: {} m/s²", c.gravity()),
            drag: format!("Air Resistance: {}", c.drag()),
            range: format!("Theoretical Range: {} m", one_decimal(t.range)),
            max_height: format!("Max Height: {} m", one_decimal(t.max_height)),
            flight_time: format!("Flight Time: {} s", one_decimal(t.flight_time)),
            in_flight: format!("In flight: {}", sim.field.active_count()),
        }
    }
}

fn one_decimal(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "∞".to_string(),
    }
}
