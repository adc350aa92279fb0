//! Frame element benchmarks against closed-form beam theory.

use approx::assert_relative_eq;
use deckframe::prelude::*;

const E: f64 = 200.0e9;
const IY: f64 = 8.0e-5;
const A: f64 = 1.0e-2;

fn bare_section() -> Section {
    Section::new(A, IY, 4.0e-5, 2.0e-6)
}

fn cantilever(length: f64) -> StructuralModel {
    let mut model = StructuralModel::new();
    model.add_material("Steel", Material::steel()).unwrap();
    model.add_section("S", bare_section()).unwrap();
    model.add_node("N1", Node::new(0.0, 0.0, 0.0)).unwrap();
    model.add_node("N2", Node::new(length, 0.0, 0.0)).unwrap();
    model
        .add_member("M1", Member::new("N1", "N2", "Steel", "S"))
        .unwrap();
    model.add_support("N1", Support::fixed()).unwrap();
    model
}

#[test]
fn cantilever_under_uniform_load_matches_theory() {
    let q = 10.0e3;
    let l = 4.0;

    let mut model = cantilever(l);
    model
        .add_member_load("M1", DistributedLoad::uniform(-q, LocalAxis::Z))
        .unwrap();

    let results = model
        .analyze(&AnalysisOptions::default().with_statics_check())
        .unwrap();

    // Tip deflection q*l^4 / (8*E*I)
    let tip = &results.displacements["N2"];
    assert_relative_eq!(tip.dz, -q * l.powi(4) / (8.0 * E * IY), max_relative = 1e-9);

    // Base carries the whole load and the overturning moment
    let rxn = &results.reactions["N1"];
    assert_relative_eq!(rxn.fz, q * l, max_relative = 1e-9);
    assert_relative_eq!(rxn.my, -q * l * l / 2.0, max_relative = 1e-9);

    // Shear and moment diagrams: q*l and q*l^2/2 at the support, zero at
    // the free end
    let diagram = &results.member_forces["M1"];
    assert_relative_eq!(diagram.shear_z[0], -q * l, max_relative = 1e-9);
    assert_relative_eq!(diagram.moment_y[0], -q * l * l / 2.0, max_relative = 1e-9);
    let last = diagram.positions.len() - 1;
    assert_relative_eq!(diagram.shear_z[last], 0.0, epsilon = 1e-6 * q * l);
    assert_relative_eq!(diagram.moment_y[last], 0.0, epsilon = 1e-6 * q * l * l);

    // Maximum deflection summary points at the tip
    assert_eq!(results.max_deflection.node, "N2");
    assert_relative_eq!(results.max_deflection.value, tip.dz.abs(), max_relative = 1e-12);

    // Local end forces: the fixed end props up the full load and the
    // governing end moment is q*l^2/2
    let end_forces = model.member_end_forces("M1").unwrap();
    assert_relative_eq!(end_forces[2], q * l, max_relative = 1e-9);
    assert_eq!(model.members["M1"].local_force(), Some(end_forces));
    assert_relative_eq!(
        model.members["M1"].max_end_moment().unwrap(),
        q * l * l / 2.0,
        max_relative = 1e-9
    );
}

#[test]
fn simply_supported_beam_matches_theory() {
    let q = 10.0e3;
    let l = 8.0;

    let mut model = StructuralModel::new();
    model.add_material("Steel", Material::steel()).unwrap();
    model.add_section("S", bare_section()).unwrap();
    model.add_node("N1", Node::new(0.0, 0.0, 0.0)).unwrap();
    model.add_node("N2", Node::new(l / 2.0, 0.0, 0.0)).unwrap();
    model.add_node("N3", Node::new(l, 0.0, 0.0)).unwrap();
    model
        .add_member("M1", Member::new("N1", "N2", "Steel", "S"))
        .unwrap();
    model
        .add_member("M2", Member::new("N2", "N3", "Steel", "S"))
        .unwrap();

    // Pin at one end (torsion held there), roller at the other
    model
        .add_support(
            "N1",
            Support::with_restraints(true, true, true, true, false, false),
        )
        .unwrap();
    model
        .add_support(
            "N3",
            Support::with_restraints(false, true, true, false, false, false),
        )
        .unwrap();

    model
        .add_member_load("M1", DistributedLoad::uniform(-q, LocalAxis::Z))
        .unwrap();
    model
        .add_member_load("M2", DistributedLoad::uniform(-q, LocalAxis::Z))
        .unwrap();

    let results = model
        .analyze(&AnalysisOptions::default().with_statics_check())
        .unwrap();

    // Midspan deflection 5*q*l^4 / (384*E*I)
    let mid = &results.displacements["N2"];
    assert_relative_eq!(
        mid.dz,
        -5.0 * q * l.powi(4) / (384.0 * E * IY),
        max_relative = 1e-9
    );

    // Each support takes half the load
    assert_relative_eq!(results.reactions["N1"].fz, q * l / 2.0, max_relative = 1e-9);
    assert_relative_eq!(results.reactions["N3"].fz, q * l / 2.0, max_relative = 1e-9);

    // Peak moment q*l^2/8 at midspan (the j-end of the first member)
    let diagram = &results.member_forces["M1"];
    let last = diagram.positions.len() - 1;
    assert_relative_eq!(
        diagram.moment_y[last].abs(),
        q * l * l / 8.0,
        max_relative = 1e-9
    );
    assert_relative_eq!(diagram.moment_y[0], 0.0, epsilon = 1e-6 * q * l * l);
}

#[test]
fn axial_bar_matches_theory() {
    let p = 50.0e3;
    let l = 4.0;

    let mut model = cantilever(l);
    model
        .add_node_load("N2", NodeLoad::force(p, 0.0, 0.0))
        .unwrap();

    let results = model.analyze(&AnalysisOptions::default()).unwrap();

    // Elongation P*l / (E*A)
    let tip = &results.displacements["N2"];
    assert_relative_eq!(tip.dx, p * l / (E * A), max_relative = 1e-9);
    assert_relative_eq!(results.reactions["N1"].fx, -p, max_relative = 1e-9);

    // Constant tension along the member
    let diagram = &results.member_forces["M1"];
    for axial in &diagram.axial {
        assert_relative_eq!(*axial, p, max_relative = 1e-9);
    }
}

#[test]
fn diagram_station_count_is_configurable() {
    let mut model = cantilever(4.0);
    model
        .add_member_load("M1", DistributedLoad::uniform(-1.0e3, LocalAxis::Z))
        .unwrap();

    let results = model.analyze(&AnalysisOptions::default()).unwrap();
    assert_eq!(results.member_forces["M1"].positions.len(), 21);

    let results = model
        .analyze(&AnalysisOptions::default().with_stations(11))
        .unwrap();
    let diagram = &results.member_forces["M1"];
    assert_eq!(diagram.positions.len(), 11);
    assert_relative_eq!(diagram.positions[0], 0.0);
    assert_relative_eq!(diagram.positions[10], 4.0);
}

#[test]
fn unloaded_structure_stays_at_rest() {
    let mut model = cantilever(4.0);
    let results = model.analyze(&AnalysisOptions::default()).unwrap();

    for disp in results.displacements.values() {
        assert_eq!(disp.translation_magnitude(), 0.0);
    }
    assert_eq!(results.reactions["N1"].force_magnitude(), 0.0);
    assert_eq!(results.max_deflection.value, 0.0);
}

#[test]
fn partial_load_resultant_is_balanced() {
    let q = 10.0e3;
    let l = 4.0;

    let mut model = cantilever(l);
    // Load covers only the middle half of the span
    model
        .add_member_load(
            "M1",
            DistributedLoad::partial_uniform(-q, 0.25, 0.75, LocalAxis::Z),
        )
        .unwrap();

    let results = model
        .analyze(&AnalysisOptions::default().with_statics_check())
        .unwrap();
    assert_relative_eq!(results.reactions["N1"].fz, q * l / 2.0, max_relative = 1e-9);
}
