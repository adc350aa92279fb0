//! Parametric floor-system generation.
//!
//! Turns a grid layout (bay spacings, height, framing directions) into a
//! ready-to-analyze [`StructuralModel`]: columns on a regular grid with fixed
//! bases, main beams chained between column tops along the primary direction,
//! and secondary beams subdividing each orthogonal bay.

use serde::{Deserialize, Serialize};

use crate::elements::{Material, Member, MemberKind, Node, Section, Support};
use crate::error::{FrameError, FrameResult};
use crate::loads::{DistributedLoad, LocalAxis};
use crate::model::StructuralModel;

/// Direction of the main (primary) beams in plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamDirection {
    X,
    Y,
}

/// Plan and elevation parameters of one floor system.
///
/// All dimensions are in consistent length units. The column grid is derived
/// from the overall plan dimensions by truncating integer division, so a
/// length that is not a whole multiple of the spacing leaves the remainder
/// outside the framed grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorLayout {
    /// Plan dimension along global X
    pub length: f64,
    /// Plan dimension along global Y
    pub width: f64,
    /// Column height (floor-to-floor)
    pub floor_height: f64,
    /// Column spacing along global X
    pub column_spacing_x: f64,
    /// Column spacing along global Y
    pub column_spacing_y: f64,
    /// Direction the main beams span
    pub main_beam_direction: BeamDirection,
    /// Spacing of the secondary beams within each bay
    pub secondary_beam_spacing: f64,
}

impl FloorLayout {
    pub fn new(
        length: f64,
        width: f64,
        floor_height: f64,
        column_spacing_x: f64,
        column_spacing_y: f64,
        main_beam_direction: BeamDirection,
        secondary_beam_spacing: f64,
    ) -> Self {
        Self {
            length,
            width,
            floor_height,
            column_spacing_x,
            column_spacing_y,
            main_beam_direction,
            secondary_beam_spacing,
        }
    }

    /// Number of column grid points along X
    pub fn num_cols_x(&self) -> usize {
        (self.length / self.column_spacing_x).floor() as usize + 1
    }

    /// Number of column grid points along Y
    pub fn num_cols_y(&self) -> usize {
        (self.width / self.column_spacing_y).floor() as usize + 1
    }

    pub fn validate(&self) -> FrameResult<()> {
        let dims = [
            ("length", self.length),
            ("width", self.width),
            ("floor_height", self.floor_height),
            ("column_spacing_x", self.column_spacing_x),
            ("column_spacing_y", self.column_spacing_y),
            ("secondary_beam_spacing", self.secondary_beam_spacing),
        ];
        for (name, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(FrameError::InvalidLayout(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        if self.length < self.column_spacing_x {
            return Err(FrameError::InvalidLayout(format!(
                "length {} is smaller than one column spacing {}",
                self.length, self.column_spacing_x
            )));
        }
        if self.width < self.column_spacing_y {
            return Err(FrameError::InvalidLayout(format!(
                "width {} is smaller than one column spacing {}",
                self.width, self.column_spacing_y
            )));
        }
        Ok(())
    }
}

/// Section and material assignment for the three member families
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorFraming {
    pub material: Material,
    pub column_section: Section,
    pub main_beam_section: Section,
    pub secondary_beam_section: Section,
}

impl FloorFraming {
    /// A one-material framing scheme (the common case)
    pub fn new(
        material: Material,
        column_section: Section,
        main_beam_section: Section,
        secondary_beam_section: Section,
    ) -> Self {
        Self {
            material,
            column_section,
            main_beam_section,
            secondary_beam_section,
        }
    }
}

const MATERIAL: &str = "Steel";
const COLUMN_SECTION: &str = "Column";
const MAIN_BEAM_SECTION: &str = "MainBeam";
const SECONDARY_SECTION: &str = "SecondaryBeam";

/// Build the floor model for a layout under a uniform area load.
///
/// `area_load` is the downward floor pressure (force per unit area); it is
/// converted to a line load on every beam using the secondary-beam spacing as
/// the tributary width. Column bases are fully fixed.
///
/// Within each bay orthogonal to the main beams, the column line is
/// subdivided into `floor(bay / secondary_spacing)` secondary spans (at least
/// one); when the spacing does not divide the bay evenly, the remainder is
/// absorbed into the last span.
pub fn build_floor_model(
    layout: &FloorLayout,
    framing: &FloorFraming,
    area_load: f64,
) -> FrameResult<StructuralModel> {
    layout.validate()?;

    let mut model = StructuralModel::new();
    model.add_material(MATERIAL, framing.material.clone())?;
    model.add_section(COLUMN_SECTION, framing.column_section.clone())?;
    model.add_section(MAIN_BEAM_SECTION, framing.main_beam_section.clone())?;
    model.add_section(SECONDARY_SECTION, framing.secondary_beam_section.clone())?;

    let ncx = layout.num_cols_x();
    let ncy = layout.num_cols_y();
    let sx = layout.column_spacing_x;
    let sy = layout.column_spacing_y;
    let h = layout.floor_height;

    // Column grid with fixed bases
    for i in 0..ncx {
        for j in 0..ncy {
            let x = i as f64 * sx;
            let y = j as f64 * sy;
            let base = format!("C{}_{}_B", i, j);
            let top = format!("C{}_{}_T", i, j);
            model.add_node(&base, Node::new(x, y, 0.0).with_support(Support::fixed()))?;
            model.add_node(&top, Node::new(x, y, h))?;
            model.add_member(
                &format!("Col_{}_{}", i, j),
                Member::new(&base, &top, MATERIAL, COLUMN_SECTION).with_kind(MemberKind::Column),
            )?;
        }
    }

    // Beams carry the floor through their tributary strip
    let w_beam = -area_load * layout.secondary_beam_spacing;
    let beam_load = DistributedLoad::uniform(w_beam, LocalAxis::Z);

    // Main beams between adjacent column tops along the primary direction
    match layout.main_beam_direction {
        BeamDirection::X => {
            for j in 0..ncy {
                for i in 0..ncx - 1 {
                    model.add_member(
                        &format!("MB_{}_{}", i, j),
                        Member::new(
                            &format!("C{}_{}_T", i, j),
                            &format!("C{}_{}_T", i + 1, j),
                            MATERIAL,
                            MAIN_BEAM_SECTION,
                        )
                        .with_kind(MemberKind::MainBeam)
                        .with_load(beam_load),
                    )?;
                }
            }
        }
        BeamDirection::Y => {
            for i in 0..ncx {
                for j in 0..ncy - 1 {
                    model.add_member(
                        &format!("MB_{}_{}", i, j),
                        Member::new(
                            &format!("C{}_{}_T", i, j),
                            &format!("C{}_{}_T", i, j + 1),
                            MATERIAL,
                            MAIN_BEAM_SECTION,
                        )
                        .with_kind(MemberKind::MainBeam)
                        .with_load(beam_load),
                    )?;
                }
            }
        }
    }

    // Secondary beams chain across each bay orthogonal to the main beams,
    // spanning between column tops with intermediate nodes at multiples of
    // the secondary spacing
    let ss = layout.secondary_beam_spacing;
    match layout.main_beam_direction {
        BeamDirection::X => {
            for i in 0..ncx {
                for j in 0..ncy - 1 {
                    let spans = ((sy / ss).floor() as usize).max(1);
                    let x = i as f64 * sx;
                    let y0 = j as f64 * sy;

                    let mut prev = format!("C{}_{}_T", i, j);
                    for k in 1..spans {
                        let node = format!("SB{}_{}_{}", i, j, k);
                        model.add_node(&node, Node::new(x, y0 + k as f64 * ss, h))?;
                        model.add_member(
                            &format!("SecB_{}_{}_{}", i, j, k),
                            Member::new(&prev, &node, MATERIAL, SECONDARY_SECTION)
                                .with_kind(MemberKind::SecondaryBeam)
                                .with_load(beam_load),
                        )?;
                        prev = node;
                    }
                    // Last span absorbs any remainder of the bay
                    model.add_member(
                        &format!("SecB_{}_{}_{}", i, j, spans),
                        Member::new(
                            &prev,
                            &format!("C{}_{}_T", i, j + 1),
                            MATERIAL,
                            SECONDARY_SECTION,
                        )
                        .with_kind(MemberKind::SecondaryBeam)
                        .with_load(beam_load),
                    )?;
                }
            }
        }
        BeamDirection::Y => {
            for j in 0..ncy {
                for i in 0..ncx - 1 {
                    let spans = ((sx / ss).floor() as usize).max(1);
                    let y = j as f64 * sy;
                    let x0 = i as f64 * sx;

                    let mut prev = format!("C{}_{}_T", i, j);
                    for k in 1..spans {
                        let node = format!("SB{}_{}_{}", i, j, k);
                        model.add_node(&node, Node::new(x0 + k as f64 * ss, y, h))?;
                        model.add_member(
                            &format!("SecB_{}_{}_{}", i, j, k),
                            Member::new(&prev, &node, MATERIAL, SECONDARY_SECTION)
                                .with_kind(MemberKind::SecondaryBeam)
                                .with_load(beam_load),
                        )?;
                        prev = node;
                    }
                    model.add_member(
                        &format!("SecB_{}_{}_{}", i, j, spans),
                        Member::new(
                            &prev,
                            &format!("C{}_{}_T", i + 1, j),
                            MATERIAL,
                            SECONDARY_SECTION,
                        )
                        .with_kind(MemberKind::SecondaryBeam)
                        .with_load(beam_load),
                    )?;
                }
            }
        }
    }

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framing() -> FloorFraming {
        FloorFraming::new(
            Material::steel(),
            Section::wide_flange(0.2032, 0.2034, 0.0110, 0.0072),
            Section::wide_flange(0.3034, 0.1654, 0.0102, 0.0060),
            Section::wide_flange(0.2032, 0.1332, 0.0078, 0.0057),
        )
    }

    #[test]
    fn test_grid_counts() {
        let layout = FloorLayout::new(12.0, 9.0, 3.5, 6.0, 4.5, BeamDirection::X, 1.5);
        let model = build_floor_model(&layout, &framing(), 5.0e3).unwrap();

        // 3x3 column grid
        assert_eq!(layout.num_cols_x(), 3);
        assert_eq!(layout.num_cols_y(), 3);

        let columns = model
            .members
            .values()
            .filter(|m| m.kind == MemberKind::Column)
            .count();
        let main_beams = model
            .members
            .values()
            .filter(|m| m.kind == MemberKind::MainBeam)
            .count();
        let secondary = model
            .members
            .values()
            .filter(|m| m.kind == MemberKind::SecondaryBeam)
            .count();

        assert_eq!(columns, 9);
        // num_cols_y rows of (num_cols_x - 1) spans
        assert_eq!(main_beams, 3 * 2);
        // 3 column lines x 2 bays x floor(4.5/1.5) spans
        assert_eq!(secondary, 3 * 2 * 3);

        // bases + tops + interior secondary nodes
        assert_eq!(model.nodes.len(), 9 + 9 + 3 * 2 * 2);
    }

    #[test]
    fn test_remainder_absorbed_into_last_span() {
        // 4.5 m bay with 2.0 m spacing: two spans of 2.0 and 2.5
        let layout = FloorLayout::new(6.0, 4.5, 3.5, 6.0, 4.5, BeamDirection::X, 2.0);
        let model = build_floor_model(&layout, &framing(), 5.0e3).unwrap();

        let node = &model.nodes["SB0_0_1"];
        assert_eq!(node.coords()[1], 2.0);

        let last = &model.members["SecB_0_0_2"];
        assert_eq!(last.i_node, "SB0_0_1");
        assert_eq!(last.j_node, "C0_1_T");
    }

    #[test]
    fn test_spacing_wider_than_bay_gives_single_span() {
        let layout = FloorLayout::new(6.0, 4.5, 3.5, 6.0, 4.5, BeamDirection::X, 10.0);
        let model = build_floor_model(&layout, &framing(), 5.0e3).unwrap();

        let secondary: Vec<_> = model
            .members
            .iter()
            .filter(|(_, m)| m.kind == MemberKind::SecondaryBeam)
            .collect();
        // one span per column line per bay, no interior nodes
        assert_eq!(secondary.len(), 2);
        assert!(model.nodes.keys().all(|n| !n.starts_with("SB")));
    }

    #[test]
    fn test_invalid_layouts_rejected() {
        let base = FloorLayout::new(12.0, 9.0, 3.5, 6.0, 4.5, BeamDirection::X, 1.5);

        let mut layout = base.clone();
        layout.column_spacing_x = 0.0;
        assert!(matches!(
            build_floor_model(&layout, &framing(), 5.0e3),
            Err(FrameError::InvalidLayout(_))
        ));

        let mut layout = base.clone();
        layout.length = 2.0;
        assert!(matches!(
            build_floor_model(&layout, &framing(), 5.0e3),
            Err(FrameError::InvalidLayout(_))
        ));

        let mut layout = base;
        layout.secondary_beam_spacing = -1.0;
        assert!(matches!(
            build_floor_model(&layout, &framing(), 5.0e3),
            Err(FrameError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_column_bases_fixed_and_beams_loaded() {
        let layout = FloorLayout::new(6.0, 4.5, 3.5, 6.0, 4.5, BeamDirection::X, 1.5);
        let model = build_floor_model(&layout, &framing(), 5.0e3).unwrap();

        for (name, node) in &model.nodes {
            if name.ends_with("_B") {
                assert_eq!(node.support.num_restrained(), 6, "base {} not fixed", name);
            } else {
                assert_eq!(node.support.num_restrained(), 0);
            }
        }

        for (name, member) in &model.members {
            match member.kind {
                MemberKind::Column => assert!(member.loads.is_empty(), "{} loaded", name),
                _ => {
                    assert_eq!(member.loads.len(), 1);
                    let load = &member.loads[0];
                    assert_eq!(load.axis, LocalAxis::Z);
                    assert!(load.is_uniform() && load.is_full_span());
                    assert_eq!(load.w1, -5.0e3 * 1.5);
                }
            }
        }
    }
}
