//! Globe view model: camera point-of-view requests, pin markers, and the
//! orbit controls' azimuth.
//!
//! The renderer owns the actual camera animation; this module only records
//! what was asked of it.

use std::time::Duration;

use sunglobe_config::GlobeConfig;
use sunglobe_countries::Country;
use sunglobe_solar::{SunPosition, UpdateTrigger};

/// A camera move request: look down at a point from `altitude` globe radii.
#[derive(Clone, Debug, PartialEq)]
pub struct PointOfView {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Camera altitude in globe radii above the surface.
    pub altitude: f64,
    /// Animation length; zero jumps immediately.
    pub duration: Duration,
}

/// A labelled pin dropped on the globe surface.
#[derive(Clone, Debug, PartialEq)]
pub struct PinMarker {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Text shown next to the pin.
    pub label: String,
}

/// View state shared between the country list and the globe.
#[derive(Clone, Debug)]
pub struct GlobeView {
    default_altitude: f64,
    selection_altitude: f64,
    fly_to_duration: Duration,
    azimuth: f64,
    selected: Option<String>,
    markers: Vec<PinMarker>,
    point_of_view: Option<PointOfView>,
}

impl GlobeView {
    /// Create a view using the altitudes and animation length from `config`.
    pub fn new(config: &GlobeConfig) -> Self {
        Self {
            default_altitude: config.default_altitude,
            selection_altitude: config.selection_altitude,
            fly_to_duration: Duration::from_millis(config.fly_to_duration_ms),
            azimuth: 0.0,
            selected: None,
            markers: Vec::new(),
            point_of_view: None,
        }
    }

    /// Jump the camera over the sub-solar point.
    pub fn look_at_sun(&mut self, sun: SunPosition) -> PointOfView {
        self.request(PointOfView {
            latitude: sun.latitude,
            longitude: sun.longitude,
            altitude: self.default_altitude,
            duration: Duration::ZERO,
        })
    }

    /// Select a country: fly to it and drop a pin labelled with its name.
    pub fn select_country(&mut self, country: &Country) -> PointOfView {
        let name = country.name.common.clone();
        self.add_pin_marker(country.latitude(), country.longitude(), &name);
        self.selected = Some(name);
        self.request(PointOfView {
            latitude: country.latitude(),
            longitude: country.longitude(),
            altitude: self.selection_altitude,
            duration: self.fly_to_duration,
        })
    }

    /// Drop a pin marker.
    pub fn add_pin_marker(&mut self, latitude: f64, longitude: f64, label: &str) {
        self.markers.push(PinMarker {
            latitude,
            longitude,
            label: label.to_string(),
        });
    }

    /// Remove every pin marker.
    pub fn clear_markers(&mut self) {
        self.markers.clear();
    }

    /// Record a new orbit azimuth (radians) and return the matching tracker trigger.
    pub fn set_azimuth(&mut self, azimuth: f64) -> UpdateTrigger {
        self.azimuth = azimuth;
        UpdateTrigger::RotationChanged { azimuth }
    }

    /// Current orbit azimuth in radians.
    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Common name of the selected country.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Pins currently on the globe.
    pub fn markers(&self) -> &[PinMarker] {
        &self.markers
    }

    /// The most recent camera request.
    pub fn point_of_view(&self) -> Option<&PointOfView> {
        self.point_of_view.as_ref()
    }

    fn request(&mut self, pov: PointOfView) -> PointOfView {
        self.point_of_view = Some(pov.clone());
        pov
    }
}
