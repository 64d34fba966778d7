//! Cars moving along a track.

use std::sync::Arc;

use coaster_core::EPSILON;
use coaster_geometry::Curve;
use coaster_math::{dvec3, Transform, Vector3};
use tracing::warn;

use crate::track::Track;

/// Largest time step, in seconds, taken in one go by [`Scene::step`].
pub const DT_MAX: f64 = 1.0 / 1024.0;

/// A car at parameter `u` on its path.
#[derive(Debug, Clone)]
pub struct Car {
    u: f64,
    path: Arc<dyn Curve>,
}

impl Car {
    pub fn new(u: f64, path: Arc<dyn Curve>) -> Self {
        let mut car = Self { u: 0.0, path };
        car.move_by(u);
        car
    }

    /// Current parameter, in `[0, 1)`.
    pub fn u(&self) -> f64 {
        self.u
    }

    pub fn path(&self) -> &Arc<dyn Curve> {
        &self.path
    }

    /// Advance by `du`, wrapping around the path.
    pub fn move_by(&mut self, du: f64) {
        let u = (self.u + du).rem_euclid(1.0);
        // rem_euclid can round up to exactly 1 for tiny negative inputs
        self.u = if u >= 1.0 { 0.0 } else { u };
    }

    pub fn speed(&self, track: &Track) -> f64 {
        track.speed(self.u)
    }

    /// Model-to-world transform: the path frame at `u`, scaled by `scale`,
    /// with the model raised `lift` along its own up axis.
    ///
    /// # Panics
    /// Panics if `scale` is (nearly) zero.
    pub fn model_transform(&self, scale: f64, lift: f64) -> Transform {
        let mut transform = self.path.coordinate_frame(self.u);
        transform.scale(Vector3::splat(scale));
        transform.translate(dvec3(0.0, 0.0, lift));
        transform
    }
}

/// A track and the cars riding it. The camera rides on the first car.
#[derive(Debug)]
pub struct Scene {
    track: Track,
    cars: Vec<Car>,
}

impl Scene {
    /// `n_cars` cars spaced evenly in `u` along the track's guide curve.
    pub fn new(track: Track, n_cars: usize) -> Self {
        let cars = (0..n_cars)
            .map(|i| Car::new(i as f64 / n_cars as f64, track.guide().clone()))
            .collect();
        Self { track, cars }
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// Advance every car by `dt` seconds, in sub-steps of at most
    /// [`DT_MAX`]. Returns the number of sub-steps taken; a non-finite `dt`
    /// takes none.
    pub fn step(&mut self, dt: f64) -> usize {
        if !dt.is_finite() {
            warn!(dt, "non-finite time step, cars not moved");
            return 0;
        }
        let mut elapsed = 0.0;
        let mut n_steps = 0;
        while elapsed < dt {
            let h = (dt - elapsed).min(DT_MAX);
            for car in &mut self.cars {
                // speed is ds/dt = ds/du * du/dt
                let ds_du = car.path.tangent_at(car.u).length();
                if ds_du < EPSILON {
                    continue;
                }
                let du = self.track.speed(car.u) * h / ds_du;
                car.move_by(du);
            }
            elapsed += h;
            n_steps += 1;
        }
        n_steps
    }

    /// Parameter of the camera, which follows the first car.
    pub fn camera_u(&self) -> Option<f64> {
        self.cars.first().map(Car::u)
    }

    /// Speed of the camera, zero without cars.
    pub fn camera_speed(&self) -> f64 {
        self.cars.first().map_or(0.0, |car| car.speed(&self.track))
    }

    /// Frame of the guide curve at the camera.
    pub fn camera_frame(&self) -> Option<Transform> {
        self.camera_u().map(|u| self.track.guide().coordinate_frame(u))
    }
}
