/// Boltzmann constant in kcal/(mol·K), as used by Colvars.
pub const BOLTZMANN_KCAL_MOL_K: f64 = 0.0019872041;

pub const DEFAULT_TEMPERATURE_K: f64 = 300.0;

/// Thermal energy `k_B·T` in kcal/mol for a temperature in kelvin.
#[inline]
pub fn thermal_energy(temperature_k: f64) -> f64 {
    temperature_k * BOLTZMANN_KCAL_MOL_K
}

/// `k_B·T` at 300 K, used whenever the caller supplies no thermal energy.
#[inline]
pub fn default_kbt() -> f64 {
    thermal_energy(DEFAULT_TEMPERATURE_K)
}
