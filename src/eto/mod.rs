pub mod calculator;
pub mod formulas;
pub mod trace;

/// Gsc [MJ m-2 min-1]
pub const SOLAR_CONSTANT: f64 = 0.0820;
/// sigma [MJ K-4 m-2 day-1]
pub const STEFAN_BOLTZMANN_CONSTANT: f64 = 0.000000004903;
