//! Smoke tests for catalog parts working together against one flow.

use hs_components::{
    CatalogItem, HeatExchanger, Material, PipeSpec, Pump, PumpCatalog, PumpEconomics, PumpTarget,
    Schedule, resolve_pipe, select_pump,
};
use hs_core::units::{m, pa};
use hs_fluids::{DemandProfile, FluidProperties, Hydraulics};

#[test]
fn pipe_exchanger_and_pump_for_reference_demand() {
    let hyd = Hydraulics::from_demand(FluidProperties::water(), &DemandProfile::default()).unwrap();
    let pipe = resolve_pipe(&PipeSpec::new(3.0, Schedule::Forty, Material::Pvc)).unwrap();
    let hx = HeatExchanger::new("PHE-M", 4100.0, 4.5).unwrap();

    let heads = hyd
        .pressures_to_head(pipe.inner_diameter, hx.k_factor, pa(100_000.0))
        .unwrap();
    assert!((heads.p0.value - 100_000.0 / (1000.0 * 9.81)).abs() < 1e-9);
    assert!(heads.p2 > heads.p0);
    assert!(heads.p2 < pipe.max_head);

    let pumps = PumpCatalog::new(vec![
        Pump::new("CP-20", 1750.0, 1800.0, m(20.0), 0.55).unwrap(),
        Pump::new("CP-50", 1750.0, 3400.0, m(50.0), 0.68).unwrap(),
    ])
    .unwrap();
    let selection = select_pump(
        &pumps,
        m(30.0),
        &hyd,
        &PumpEconomics::default(),
        PumpTarget::Cost,
    )
    .unwrap();
    assert_eq!(selection.name, "CP-50");
    assert!(selection.power_kw() > 0.0);

    let items: Vec<&dyn CatalogItem> = vec![&pipe, &hx, pumps.get(0).unwrap()];
    let names: Vec<_> = items.iter().map(|i| i.name()).collect();
    assert_eq!(names, ["3 in sch 40 PVC", "PHE-M", "CP-20"]);
}
