//! Signal names shared with the stress-recovery and aggregation subsystems.
//!
//! These names are the wire contract with the numerical kernels and must not change.

/// Element wall thickness of a tube spar.
pub const THICKNESS: &str = "thickness";
/// Element outer radius of a tube spar.
pub const RADIUS: &str = "radius";
/// Thickness feasibility margin per element.
pub const THICKNESS_INTERSECTS: &str = "thickness_intersects";
/// Finite-element node coordinates.
pub const NODES: &str = "nodes";
/// Solved nodal displacements.
pub const DISP: &str = "disp";
/// Von Mises stress per element.
pub const VONMISES: &str = "vonmises";
/// Tsai–Wu strength ratio per element and ply.
pub const TSAIWU_SR: &str = "tsaiwu_sr";
/// First moment of area about the neutral axis.
pub const QZ: &str = "Qz";
/// Torsion constant.
pub const J: &str = "J";
/// Enclosed area of the wingbox cross-section.
pub const A_ENC: &str = "A_enc";
/// Wingbox spar wall thickness.
pub const SPAR_THICKNESS: &str = "spar_thickness";
/// Distance from the neutral axis to the top skin.
pub const HTOP: &str = "htop";
/// Distance from the neutral axis to the bottom skin.
pub const HBOTTOM: &str = "hbottom";
/// Distance from the neutral axis to the front spar.
pub const HFRONT: &str = "hfront";
/// Distance from the neutral axis to the rear spar.
pub const HREAR: &str = "hrear";
/// Failure constraint value(s) handed to the optimizer.
pub const FAILURE: &str = "failure";

/// Inputs consumed by both wingbox stress-recovery kernels, in declaration order.
pub const WINGBOX_STRESS_INPUTS: [&str; 10] = [
    QZ,
    J,
    A_ENC,
    SPAR_THICKNESS,
    HTOP,
    HBOTTOM,
    HFRONT,
    HREAR,
    NODES,
    DISP,
];
