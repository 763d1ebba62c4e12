// hs-core/src/units.rs

use uom::si::f64::{
    Acceleration as UomAcceleration, DynamicViscosity as UomDynamicViscosity,
    Length as UomLength, MassDensity as UomMassDensity, Power as UomPower,
    Pressure as UomPressure, Velocity as UomVelocity, VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Accel = UomAcceleration;
pub type DynVisc = UomDynamicViscosity;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Velocity = UomVelocity;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn inch(v: f64) -> Length {
    use uom::si::length::inch;
    Length::new::<inch>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn mps2(v: f64) -> Accel {
    use uom::si::acceleration::meter_per_second_squared;
    Accel::new::<meter_per_second_squared>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn pas(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

pub mod constants {
    use super::*;

    /// Standard gravity rounded the way hydraulic hand calculations use it.
    pub const G_MPS2: f64 = 9.81;

    /// Metres per inch, used for catalog diameters.
    pub const M_PER_INCH: f64 = 0.0254;

    pub const HOURS_PER_YEAR: f64 = 24.0 * 365.0;

    #[inline]
    pub fn g() -> Accel {
        mps2(G_MPS2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _l = m(2.0);
        let _v = mps(1.5);
        let _rho = kgpm3(1000.0);
        let _mu = pas(1.0e-3);
        let _q = m3ps(0.006);
        let _pw = w(250.0);
        let _g = constants::g();
    }

    #[test]
    fn inch_is_si_metres() {
        assert!((inch(2.0).value - 2.0 * constants::M_PER_INCH).abs() < 1e-12);
    }

    #[test]
    fn kilowatt_is_stored_in_watts() {
        assert!((kw(1.5).value - 1500.0).abs() < 1e-9);
    }
}
