//! One globe session: clock, sun tracker, material, and view wired together.
//!
//! Both update triggers land here. [`GlobeSession::tick`] is driven by the
//! periodic timer and [`GlobeSession::rotate`] by the orbit controls; each
//! recomputes the sun uniforms through the same tracker path.

use std::time::Duration;

use chrono::{DateTime, Utc};
use sunglobe_config::{Config, DeclinationFormula};
use sunglobe_countries::Country;
use sunglobe_solar::{
    Clock, DeclinationModel, IlluminationState, SunEstimator, SunPosition, SunTracker,
    UpdateTrigger,
};
use tracing::info;

use crate::globe::{GlobeView, PointOfView};
use crate::material::GlobeMaterial;

/// Map the configured formula onto the estimator's model.
pub fn declination_model(formula: DeclinationFormula) -> DeclinationModel {
    match formula {
        DeclinationFormula::Sinusoidal => DeclinationModel::Sinusoidal,
        DeclinationFormula::Fourier => DeclinationModel::Fourier,
    }
}

/// Build the estimator described by `config`.
pub fn estimator_from_config(config: &Config) -> SunEstimator {
    SunEstimator::with_model(declination_model(config.sun.declination))
}

/// A running globe.
pub struct GlobeSession<C> {
    clock: C,
    estimator: SunEstimator,
    tracker: SunTracker,
    material: GlobeMaterial,
    view: GlobeView,
}

impl<C: Clock> GlobeSession<C> {
    /// Create a session from config, reading time from `clock`.
    pub fn new(config: &Config, clock: C) -> Self {
        let estimator = estimator_from_config(config);
        let interval = Duration::from_secs(config.sun.update_interval_seconds.max(1));
        Self {
            clock,
            estimator,
            tracker: SunTracker::new(estimator, interval),
            material: GlobeMaterial::new(&config.globe, &config.sun),
            view: GlobeView::new(&config.globe),
        }
    }

    /// Initial update: light the globe and point the camera at the sub-solar point.
    pub fn start(&mut self) -> PointOfView {
        let now = self.clock.now();
        self.tracker
            .recompute(UpdateTrigger::Tick, now, &mut self.material);
        let sun = self.sun_position_at(now);
        info!(%sun, "globe started");
        self.view.look_at_sun(sun)
    }

    /// Periodic timer hook. Returns the new state when a refresh was due.
    pub fn tick(&mut self) -> Option<IlluminationState> {
        let now = self.clock.now();
        self.tracker.poll(now, &mut self.material)
    }

    /// Orbit-controls hook: the globe was rotated to `azimuth` radians.
    pub fn rotate(&mut self, azimuth: f64) -> IlluminationState {
        let trigger = self.view.set_azimuth(azimuth);
        let now = self.clock.now();
        self.tracker.recompute(trigger, now, &mut self.material)
    }

    /// Country list hook: fly to `country` and pin it.
    pub fn select(&mut self, country: &Country) -> PointOfView {
        info!(country = %country.name.common, "country selected");
        self.view.select_country(country)
    }

    /// Sun position for the session clock's current instant.
    pub fn sun_position(&self) -> SunPosition {
        self.sun_position_at(self.clock.now())
    }

    fn sun_position_at(&self, now: DateTime<Utc>) -> SunPosition {
        self.estimator.compute(now)
    }

    /// Time until the periodic refresh is due.
    pub fn time_until_tick(&self) -> Duration {
        self.tracker.time_until_due(self.clock.now())
    }

    /// The globe material.
    pub fn material(&self) -> &GlobeMaterial {
        &self.material
    }

    /// The view model.
    pub fn view(&self) -> &GlobeView {
        &self.view
    }

    /// Mutable access to the view model.
    pub fn view_mut(&mut self) -> &mut GlobeView {
        &mut self.view
    }

    /// The sun tracker.
    pub fn tracker(&self) -> &SunTracker {
        &self.tracker
    }

    /// The session clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
