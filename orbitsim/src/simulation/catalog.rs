//! Star, planet and moon presets.
//!
//! A category plus a sub-type resolves once to a plain [`Body`] with the
//! matching mass, radius and color. Sub-type tags are parsed leniently: an
//! unknown tag falls back to the category default and logs a warning.

use log::warn;

use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, Rgb};

pub const STAR_RADIUS: f64 = 25.0;
pub const ROCKY_RADIUS: f64 = 7.0;
pub const GASEOUS_RADIUS: f64 = 15.0;
pub const SMALL_MOON_RADIUS: f64 = 3.0;
pub const LARGE_MOON_RADIUS: f64 = 5.0;

pub const MOON_COLOR: Rgb = Rgb::new(150, 150, 150);

/// Planet color when a scene does not give one
pub const DEFAULT_PLANET_COLOR: Rgb = Rgb::new(80, 140, 255);

/// Where a new body goes and how it moves before any orbit seeding
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitSeed {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub angle: f64, // radians
}

impl OrbitSeed {
    /// A body at rest at `(x, y)`
    pub fn at(x: f64, y: f64) -> Self {
        Self { x, y, speed: 0.0, angle: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StarKind {
    #[default]
    Main,
    Blue,
    Red,
    Yellow,
    Orange,
    Giant,
}

impl StarKind {
    /// "main", "blue", "red", "yellow", "orange" or "giant"; anything else is `Main`
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "main" => Self::Main,
            "blue" => Self::Blue,
            "red" => Self::Red,
            "yellow" => Self::Yellow,
            "orange" => Self::Orange,
            "giant" => Self::Giant,
            other => {
                warn!("unknown star type {other:?}, using main sequence");
                Self::default()
            }
        }
    }

    /// Mass in units of the stellar mass `M`
    pub fn mass_scale(self) -> f64 {
        match self {
            Self::Main => 1.0,
            Self::Blue => 50.0,
            Self::Red => 0.1,
            Self::Yellow => 0.85,
            Self::Orange => 0.55,
            Self::Giant => 1000.0,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Self::Main => Rgb::new(255, 244, 214),
            Self::Blue => Rgb::new(155, 176, 255),
            Self::Red => Rgb::new(255, 90, 60),
            Self::Yellow => Rgb::new(255, 230, 110),
            Self::Orange => Rgb::new(255, 165, 80),
            Self::Giant => Rgb::new(255, 120, 90),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlanetKind {
    #[default]
    Rocky,
    Gaseous,
}

impl PlanetKind {
    /// "rocky" or "gaseous"; anything else is `Rocky`
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "rocky" => Self::Rocky,
            "gaseous" => Self::Gaseous,
            other => {
                warn!("unknown planet type {other:?}, using rocky");
                Self::default()
            }
        }
    }

    /// Mass in units of the planetary mass `P`
    pub fn mass_scale(self) -> f64 {
        match self {
            Self::Rocky => 1.0,
            Self::Gaseous => 1000.0,
        }
    }

    pub fn radius(self) -> f64 {
        match self {
            Self::Rocky => ROCKY_RADIUS,
            Self::Gaseous => GASEOUS_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MoonKind {
    #[default]
    Small, // P / 1e4
    Large, // P / 1e2
}

impl MoonKind {
    /// "small" or "large"; anything else is `Small`
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "small" => Self::Small,
            "large" => Self::Large,
            other => {
                warn!("unknown moon type {other:?}, using small");
                Self::default()
            }
        }
    }

    pub fn radius(self) -> f64 {
        match self {
            Self::Small => SMALL_MOON_RADIUS,
            Self::Large => LARGE_MOON_RADIUS,
        }
    }
}

/// Category plus sub-type. Planets carry their caller-chosen color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind {
    Star(StarKind),
    Planet(PlanetKind, Rgb),
    Moon(MoonKind),
}

impl BodyKind {
    pub fn mass(&self, params: &Parameters) -> f64 {
        match self {
            Self::Star(kind) => kind.mass_scale() * params.stellar_mass,
            Self::Planet(kind, _) => kind.mass_scale() * params.planet_mass(),
            Self::Moon(MoonKind::Small) => params.small_moon_mass(),
            Self::Moon(MoonKind::Large) => params.large_moon_mass(),
        }
    }

    pub fn radius(&self) -> f64 {
        match self {
            Self::Star(_) => STAR_RADIUS,
            Self::Planet(kind, _) => kind.radius(),
            Self::Moon(kind) => kind.radius(),
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            Self::Star(kind) => kind.color(),
            Self::Planet(_, color) => *color,
            Self::Moon(_) => MOON_COLOR,
        }
    }

    pub fn build(&self, params: &Parameters, seed: OrbitSeed) -> Body {
        Body::new(
            self.mass(params),
            seed.x,
            seed.y,
            seed.speed,
            seed.angle,
            self.radius(),
            self.color(),
        )
    }
}

pub fn star(kind: StarKind, params: &Parameters, seed: OrbitSeed) -> Body {
    BodyKind::Star(kind).build(params, seed)
}

pub fn planet(kind: PlanetKind, color: Rgb, params: &Parameters, seed: OrbitSeed) -> Body {
    BodyKind::Planet(kind, color).build(params, seed)
}

pub fn moon(kind: MoonKind, params: &Parameters, seed: OrbitSeed) -> Body {
    BodyKind::Moon(kind).build(params, seed)
}
