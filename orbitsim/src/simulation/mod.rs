pub mod states;
pub mod params;
pub mod engine;
pub mod error;
pub mod catalog;
pub mod orbits;
pub mod forces;
pub mod integrator;
pub mod render;
pub mod scenario;
pub mod barnes_hut;
