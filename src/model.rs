//! Structural model - owns the topology and runs the analysis pipeline

use std::collections::BTreeMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisOptions, AnalysisStatus};
use crate::elements::{Material, Member, Node, Section, Support};
use crate::error::{FrameError, FrameResult};
use crate::loads::{DistributedLoad, NodeLoad};
use crate::math::{self, Mat, Vec12};
use crate::results::{
    AnalysisResults, DeflectionSummary, ForceDiagram, NodeDisplacement, Reactions,
};

/// Geometric tolerance for coincident endpoints
const COINCIDENT_TOL: f64 = 1e-10;

/// The 3D structural model for one analysis run.
///
/// Owns the node and member sets plus the section/material catalog. Created
/// empty, populated by the topology builder (or by hand), analyzed once, and
/// annotated with results; rebuilding from scratch is the way to change it
/// afterwards. Collections are ordered maps so repeated runs of identical
/// models produce identical numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralModel {
    /// Nodes keyed by name
    pub nodes: BTreeMap<String, Node>,
    /// Materials keyed by name
    pub materials: BTreeMap<String, Material>,
    /// Sections keyed by name
    pub sections: BTreeMap<String, Section>,
    /// Members keyed by name
    pub members: BTreeMap<String, Member>,

    #[serde(skip)]
    solved: bool,
}

impl Default for StructuralModel {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuralModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            materials: BTreeMap::new(),
            sections: BTreeMap::new(),
            members: BTreeMap::new(),
            solved: false,
        }
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a node to the model
    pub fn add_node(&mut self, name: &str, node: Node) -> FrameResult<()> {
        if self.nodes.contains_key(name) {
            return Err(FrameError::DuplicateName(name.to_string()));
        }
        self.nodes.insert(name.to_string(), node);
        self.solved = false;
        Ok(())
    }

    /// Add a material to the catalog
    pub fn add_material(&mut self, name: &str, material: Material) -> FrameResult<()> {
        material.validate(name)?;
        if self.materials.contains_key(name) {
            return Err(FrameError::DuplicateName(name.to_string()));
        }
        self.materials.insert(name.to_string(), material);
        Ok(())
    }

    /// Add a section to the catalog
    pub fn add_section(&mut self, name: &str, section: Section) -> FrameResult<()> {
        section.validate(name)?;
        if self.sections.contains_key(name) {
            return Err(FrameError::DuplicateName(name.to_string()));
        }
        self.sections.insert(name.to_string(), section);
        Ok(())
    }

    /// Add a member to the model.
    ///
    /// Both endpoints, the material and the section must already exist, and
    /// the endpoints must be distinct non-coincident nodes.
    pub fn add_member(&mut self, name: &str, member: Member) -> FrameResult<()> {
        if member.i_node == member.j_node {
            return Err(FrameError::InvalidGeometry(format!(
                "member '{}' connects node '{}' to itself",
                name, member.i_node
            )));
        }
        let i_node = self
            .nodes
            .get(&member.i_node)
            .ok_or_else(|| FrameError::NodeNotFound(member.i_node.clone()))?;
        let j_node = self
            .nodes
            .get(&member.j_node)
            .ok_or_else(|| FrameError::NodeNotFound(member.j_node.clone()))?;
        if i_node.distance_to(j_node) < COINCIDENT_TOL {
            return Err(FrameError::InvalidGeometry(format!(
                "member '{}' has coincident endpoints '{}' and '{}'",
                name, member.i_node, member.j_node
            )));
        }
        if !self.materials.contains_key(&member.material) {
            return Err(FrameError::MaterialNotFound(member.material.clone()));
        }
        if !self.sections.contains_key(&member.section) {
            return Err(FrameError::SectionNotFound(member.section.clone()));
        }
        if self.members.contains_key(name) {
            return Err(FrameError::DuplicateName(name.to_string()));
        }

        self.members.insert(name.to_string(), member);
        self.solved = false;
        Ok(())
    }

    /// Set the support condition at a node
    pub fn add_support(&mut self, node_name: &str, support: Support) -> FrameResult<()> {
        let node = self
            .nodes
            .get_mut(node_name)
            .ok_or_else(|| FrameError::NodeNotFound(node_name.to_string()))?;
        node.support = support;
        self.solved = false;
        Ok(())
    }

    /// Accumulate a concentrated load on a node
    pub fn add_node_load(&mut self, node_name: &str, load: NodeLoad) -> FrameResult<()> {
        let node = self
            .nodes
            .get_mut(node_name)
            .ok_or_else(|| FrameError::NodeNotFound(node_name.to_string()))?;
        let arr = load.as_array();
        for i in 0..6 {
            node.loads[i] += arr[i];
        }
        self.solved = false;
        Ok(())
    }

    /// Attach a distributed load to a member
    pub fn add_member_load(&mut self, member_name: &str, load: DistributedLoad) -> FrameResult<()> {
        if !load.positions_valid() {
            return Err(FrameError::InvalidGeometry(format!(
                "distributed load on member '{}' has invalid positions x1={}, x2={}",
                member_name, load.x1, load.x2
            )));
        }
        let member = self
            .members
            .get_mut(member_name)
            .ok_or_else(|| FrameError::MemberNotFound(member_name.to_string()))?;
        member.loads.push(load);
        self.solved = false;
        Ok(())
    }

    // ========================
    // Analysis Pipeline
    // ========================

    /// Run the linear static analysis pipeline:
    /// prepare → translate loads → assemble → solve → reactions → extract.
    ///
    /// Any stage failure aborts the pipeline and is returned as an error; a
    /// returned `AnalysisResults` is always a real solve, never a zeroed
    /// placeholder.
    pub fn analyze(&mut self, options: &AnalysisOptions) -> FrameResult<AnalysisResults> {
        info!(
            "analyzing model: {} nodes, {} members, {} dofs",
            self.nodes.len(),
            self.members.len(),
            self.nodes.len() * 6
        );

        self.prepare()?;

        let f = self.translate_loads()?;
        debug!("load translation done, |f| = {:.3e}", f.norm());

        let k = self.assemble_stiffness()?;
        debug!("global stiffness assembled ({}x{})", k.nrows(), k.ncols());

        let u = self.solve_displacements(&k, &f)?;
        debug!("solved, |u| = {:.3e}", u.norm());

        self.store_displacements(&u);
        self.recover_reactions(&k, &u, &f);

        if options.check_statics {
            self.check_statics(&f, options.equilibrium_tolerance)?;
        }

        self.recover_member_forces()?;
        let results = self.extract_results(options)?;

        self.solved = true;
        info!(
            "analysis complete, max deflection {:.3e} at node '{}'",
            results.max_deflection.value, results.max_deflection.node
        );
        Ok(results)
    }

    /// Assign DOF indices, cache member lengths, and clear previous results
    fn prepare(&mut self) -> FrameResult<()> {
        for (i, node) in self.nodes.values_mut().enumerate() {
            node.id = Some(i);
            node.displacement = None;
            node.reaction = None;
        }

        let member_names: Vec<String> = self.members.keys().cloned().collect();
        for name in member_names {
            let member = &self.members[&name];
            let i_coords = self.node_coords(&member.i_node)?;
            let j_coords = self.node_coords(&member.j_node)?;
            let (_, length) = math::local_axes(&i_coords, &j_coords)?;

            let member = self.members.get_mut(&name).ok_or(FrameError::NotAnalyzed)?;
            member.length = Some(length);
            member.fixed_end_forces = [0.0; 12];
            member.local_forces = None;
        }

        Ok(())
    }

    fn node_coords(&self, name: &str) -> FrameResult<[f64; 3]> {
        self.nodes
            .get(name)
            .map(|n| n.coords())
            .ok_or_else(|| FrameError::NodeNotFound(name.to_string()))
    }

    /// Base global DOF index of a node (6 per node, assigned in prepare)
    fn node_dof(&self, name: &str) -> FrameResult<usize> {
        let node = self
            .nodes
            .get(name)
            .ok_or_else(|| FrameError::NodeNotFound(name.to_string()))?;
        let id = node.id.ok_or(FrameError::NotAnalyzed)?;
        Ok(id * 6)
    }

    /// Build the global nodal load vector.
    ///
    /// Concentrated nodal loads go straight in. Each member distributed load
    /// contributes its work-equivalent nodal loads (the negated, rotated
    /// fixed-end forces); the local un-negated fixed-end vector is stored on
    /// the member for force recovery.
    fn translate_loads(&mut self) -> FrameResult<math::Vec> {
        let n_dofs = self.nodes.len() * 6;
        let mut f = math::Vec::zeros(n_dofs);

        for node in self.nodes.values() {
            let base = node.id.ok_or(FrameError::NotAnalyzed)? * 6;
            for i in 0..6 {
                f[base + i] += node.loads[i];
            }
        }

        let member_names: Vec<String> = self.members.keys().cloned().collect();
        for name in member_names {
            let member = &self.members[&name];
            if member.loads.is_empty() {
                continue;
            }

            let length = member.length.ok_or(FrameError::NotAnalyzed)?;
            let i_coords = self.node_coords(&member.i_node)?;
            let j_coords = self.node_coords(&member.j_node)?;
            let i_dof = self.node_dof(&member.i_node)?;
            let j_dof = self.node_dof(&member.j_node)?;
            let (r, _) = math::local_axes(&i_coords, &j_coords)?;
            let t = math::transformation_matrix(&r);

            let mut fer_total = Vec12::zeros();
            for load in &member.loads {
                if !load.positions_valid() {
                    return Err(FrameError::InvalidGeometry(format!(
                        "distributed load on member '{}' has invalid positions x1={}, x2={}",
                        name, load.x1, load.x2
                    )));
                }
                let fer = if load.is_uniform() && load.is_full_span() {
                    math::fer_uniform_load(load.w1, length, load.axis)
                } else {
                    math::fer_linear_load(
                        load.w1,
                        load.w2,
                        load.x1 * length,
                        load.x2 * length,
                        length,
                        load.axis,
                    )
                };
                fer_total += fer;
            }

            // Equivalent nodal loads: rotate to global and negate
            let fer_global = t.transpose() * fer_total;
            for i in 0..6 {
                f[i_dof + i] -= fer_global[i];
                f[j_dof + i] -= fer_global[i + 6];
            }

            let member = self.members.get_mut(&name).ok_or(FrameError::NotAnalyzed)?;
            let mut stored = [0.0; 12];
            for i in 0..12 {
                stored[i] = fer_total[i];
            }
            member.fixed_end_forces = stored;
        }

        Ok(f)
    }

    /// Assemble the global stiffness matrix
    fn assemble_stiffness(&self) -> FrameResult<Mat> {
        let n_dofs = self.nodes.len() * 6;
        let mut k_global = Mat::zeros(n_dofs, n_dofs);

        for (name, member) in &self.members {
            let material = self
                .materials
                .get(&member.material)
                .ok_or_else(|| FrameError::MaterialNotFound(member.material.clone()))?;
            let section = self
                .sections
                .get(&member.section)
                .ok_or_else(|| FrameError::SectionNotFound(member.section.clone()))?;
            let length = member.length.ok_or(FrameError::NotAnalyzed)?;

            let k_local = math::member_local_stiffness(
                material.e, material.g, section.a, section.iy, section.iz, section.j, length,
            );

            let i_coords = self.node_coords(&member.i_node)?;
            let j_coords = self.node_coords(&member.j_node)?;
            let (r, _) = math::local_axes(&i_coords, &j_coords)?;
            let t = math::transformation_matrix(&r);

            // K_global = T^T * K_local * T
            let k_member = t.transpose() * k_local * t;

            let i_dof = self.node_dof(&member.i_node)?;
            let j_dof = self.node_dof(&member.j_node)?;
            debug!("assembling member '{}' at dofs ({}, {})", name, i_dof, j_dof);

            // Scatter the four 6x6 blocks, accumulating shared nodes
            for a in 0..6 {
                for b in 0..6 {
                    k_global[(i_dof + a, i_dof + b)] += k_member[(a, b)];
                    k_global[(i_dof + a, j_dof + b)] += k_member[(a, b + 6)];
                    k_global[(j_dof + a, i_dof + b)] += k_member[(a + 6, b)];
                    k_global[(j_dof + a, j_dof + b)] += k_member[(a + 6, b + 6)];
                }
            }
        }

        Ok(k_global)
    }

    /// Partition by support condition and solve the reduced system.
    ///
    /// Restrained DOFs carry zero displacement (rigid supports only); the
    /// reduced system is symmetric positive-definite for a properly
    /// supported structure, so a failed Cholesky factorization is reported
    /// as `SingularSystem`.
    fn solve_displacements(&self, k: &Mat, f: &math::Vec) -> FrameResult<math::Vec> {
        let n_dofs = self.nodes.len() * 6;

        let mut free_dofs: Vec<usize> = Vec::new();
        for node in self.nodes.values() {
            let base = node.id.ok_or(FrameError::NotAnalyzed)? * 6;
            let mask = node.support.as_array();
            for (i, &restrained) in mask.iter().enumerate() {
                if !restrained {
                    free_dofs.push(base + i);
                }
            }
        }

        let mut u = math::Vec::zeros(n_dofs);
        if free_dofs.is_empty() {
            return Ok(u);
        }

        let n_free = free_dofs.len();
        let mut k_ff = Mat::zeros(n_free, n_free);
        let mut f_f = math::Vec::zeros(n_free);

        for (i, &di) in free_dofs.iter().enumerate() {
            f_f[i] = f[di];
            for (j, &dj) in free_dofs.iter().enumerate() {
                k_ff[(i, j)] = k[(di, dj)];
            }
        }

        let u_f = math::solve_cholesky(&k_ff, &f_f).ok_or(FrameError::SingularSystem)?;

        for (i, &di) in free_dofs.iter().enumerate() {
            u[di] = u_f[i];
        }

        Ok(u)
    }

    /// Write the solved displacement vector back onto the nodes
    fn store_displacements(&mut self, u: &math::Vec) {
        for node in self.nodes.values_mut() {
            if let Some(id) = node.id {
                let base = id * 6;
                let mut disp = [0.0; 6];
                disp.copy_from_slice(&u.as_slice()[base..base + 6]);
                node.displacement = Some(disp);
            }
        }
    }

    /// Recover reactions at restrained DOFs: R = K·U − F
    fn recover_reactions(&mut self, k: &Mat, u: &math::Vec, f: &math::Vec) {
        let r_full = k * u - f;

        for node in self.nodes.values_mut() {
            if !node.support.is_supported() {
                node.reaction = None;
                continue;
            }
            if let Some(id) = node.id {
                let base = id * 6;
                let mask = node.support.as_array();
                let mut reaction = [0.0; 6];
                for i in 0..6 {
                    if mask[i] {
                        reaction[i] = r_full[base + i];
                    }
                }
                node.reaction = Some(reaction);
            }
        }
    }

    /// Verify global equilibrium: applied loads plus reactions sum to zero
    /// in all six global directions, with moments taken about the origin
    fn check_statics(&self, f: &math::Vec, tolerance: f64) -> FrameResult<()> {
        // Forces contribute r x F to the moment balance on top of any
        // direct moment components
        fn accumulate(total: &mut [f64; 6], scale: &mut [f64; 6], r: [f64; 3], v: [f64; 6]) {
            let moments = [
                v[3] + r[1] * v[2] - r[2] * v[1],
                v[4] + r[2] * v[0] - r[0] * v[2],
                v[5] + r[0] * v[1] - r[1] * v[0],
            ];
            for d in 0..3 {
                total[d] += v[d];
                scale[d] = scale[d].max(v[d].abs());
                total[d + 3] += moments[d];
                scale[d + 3] = scale[d + 3].max(moments[d].abs());
            }
        }

        let mut total = [0.0_f64; 6];
        let mut scale = [1.0_f64; 6];

        for node in self.nodes.values() {
            let pos = node.coords();
            if let Some(id) = node.id {
                let base = id * 6;
                let mut applied = [0.0; 6];
                applied.copy_from_slice(&f.as_slice()[base..base + 6]);
                accumulate(&mut total, &mut scale, pos, applied);
            }
            if let Some(reaction) = node.reaction {
                accumulate(&mut total, &mut scale, pos, reaction);
            }
        }

        let axes = ["X", "Y", "Z"];
        for dir in 0..3 {
            if total[dir].abs() > tolerance * scale[dir] {
                return Err(FrameError::EquilibriumCheckFailed(format!(
                    "unbalanced force {:.3e} in global {}",
                    total[dir], axes[dir]
                )));
            }
            if total[dir + 3].abs() > tolerance * scale[dir + 3] {
                return Err(FrameError::EquilibriumCheckFailed(format!(
                    "unbalanced moment {:.3e} about global {}",
                    total[dir + 3], axes[dir]
                )));
            }
        }
        Ok(())
    }

    /// Recover local member end forces: F = K_local · d_local + F_fixed
    fn recover_member_forces(&mut self) -> FrameResult<()> {
        let member_names: Vec<String> = self.members.keys().cloned().collect();

        for name in member_names {
            let member = &self.members[&name];
            let material = self
                .materials
                .get(&member.material)
                .ok_or_else(|| FrameError::MaterialNotFound(member.material.clone()))?;
            let section = self
                .sections
                .get(&member.section)
                .ok_or_else(|| FrameError::SectionNotFound(member.section.clone()))?;
            let length = member.length.ok_or(FrameError::NotAnalyzed)?;

            let i_node = self
                .nodes
                .get(&member.i_node)
                .ok_or_else(|| FrameError::NodeNotFound(member.i_node.clone()))?;
            let j_node = self
                .nodes
                .get(&member.j_node)
                .ok_or_else(|| FrameError::NodeNotFound(member.j_node.clone()))?;

            let d_i = i_node.displacement.ok_or(FrameError::NotAnalyzed)?;
            let d_j = j_node.displacement.ok_or(FrameError::NotAnalyzed)?;
            let d_global = Vec12::from_iterator(d_i.iter().chain(d_j.iter()).copied());

            let (r, _) = math::local_axes(&i_node.coords(), &j_node.coords())?;
            let t = math::transformation_matrix(&r);
            let d_local = t * d_global;

            let k_local = math::member_local_stiffness(
                material.e, material.g, section.a, section.iy, section.iz, section.j, length,
            );

            let f_elastic = k_local * d_local;
            let mut forces = [0.0; 12];
            for i in 0..12 {
                forces[i] = f_elastic[i] + member.fixed_end_forces[i];
            }

            let member = self.members.get_mut(&name).ok_or(FrameError::NotAnalyzed)?;
            member.local_forces = Some(forces);
        }

        Ok(())
    }

    /// Build the caller-facing results tables and the deflection summary
    fn extract_results(&self, options: &AnalysisOptions) -> FrameResult<AnalysisResults> {
        let mut displacements = BTreeMap::new();
        let mut reactions = BTreeMap::new();
        let mut max_deflection = 0.0_f64;
        let mut max_node = String::new();

        for (name, node) in &self.nodes {
            let disp = node.displacement.ok_or(FrameError::NotAnalyzed)?;
            displacements.insert(name.clone(), NodeDisplacement::from_array(disp));

            if disp[2].abs() > max_deflection || max_node.is_empty() {
                max_deflection = disp[2].abs();
                max_node = name.clone();
            }

            if let Some(reaction) = node.reaction {
                reactions.insert(name.clone(), Reactions::from_array(reaction));
            }
        }

        let stations = options.stations.max(2);
        let mut member_forces = BTreeMap::new();
        for (name, member) in &self.members {
            member_forces.insert(name.clone(), self.member_diagram_for(member, stations)?);
        }

        Ok(AnalysisResults {
            status: AnalysisStatus::Solved,
            displacements,
            reactions,
            member_forces,
            max_deflection: DeflectionSummary {
                value: max_deflection,
                node: max_node,
                limit: options.deflection_limit,
            },
        })
    }

    fn member_diagram_for(&self, member: &Member, stations: usize) -> FrameResult<ForceDiagram> {
        let length = member.length.ok_or(FrameError::NotAnalyzed)?;
        let mut diagram = ForceDiagram {
            length,
            positions: Vec::with_capacity(stations),
            axial: Vec::with_capacity(stations),
            shear_y: Vec::with_capacity(stations),
            shear_z: Vec::with_capacity(stations),
            torsion: Vec::with_capacity(stations),
            moment_y: Vec::with_capacity(stations),
            moment_z: Vec::with_capacity(stations),
        };

        for s in 0..stations {
            let x = length * s as f64 / (stations - 1) as f64;
            diagram.positions.push(x);
            diagram
                .axial
                .push(member.axial(x).ok_or(FrameError::NotAnalyzed)?);
            diagram
                .shear_y
                .push(member.shear_y(x).ok_or(FrameError::NotAnalyzed)?);
            diagram
                .shear_z
                .push(member.shear_z(x).ok_or(FrameError::NotAnalyzed)?);
            diagram
                .torsion
                .push(member.torsion(x).ok_or(FrameError::NotAnalyzed)?);
            diagram
                .moment_y
                .push(member.moment_y(x).ok_or(FrameError::NotAnalyzed)?);
            diagram
                .moment_z
                .push(member.moment_z(x).ok_or(FrameError::NotAnalyzed)?);
        }

        Ok(diagram)
    }

    // ========================
    // Result Access Methods
    // ========================

    /// Check if the model has been analyzed
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Displacement of a node from the last solve
    pub fn node_displacement(&self, node_name: &str) -> FrameResult<NodeDisplacement> {
        let node = self
            .nodes
            .get(node_name)
            .ok_or_else(|| FrameError::NodeNotFound(node_name.to_string()))?;
        let disp = node.displacement.ok_or(FrameError::NotAnalyzed)?;
        Ok(NodeDisplacement::from_array(disp))
    }

    /// Reactions of a supported node from the last solve
    pub fn node_reaction(&self, node_name: &str) -> FrameResult<Reactions> {
        let node = self
            .nodes
            .get(node_name)
            .ok_or_else(|| FrameError::NodeNotFound(node_name.to_string()))?;
        let reaction = node.reaction.ok_or(FrameError::NotAnalyzed)?;
        Ok(Reactions::from_array(reaction))
    }

    /// Local end forces of a member from the last solve
    pub fn member_end_forces(&self, member_name: &str) -> FrameResult<[f64; 12]> {
        let member = self
            .members
            .get(member_name)
            .ok_or_else(|| FrameError::MemberNotFound(member_name.to_string()))?;
        member.local_forces.ok_or(FrameError::NotAnalyzed)
    }

    /// Serialize the model to a JSON string
    pub fn to_json(&self) -> FrameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a model from a JSON string
    pub fn from_json(json: &str) -> FrameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
