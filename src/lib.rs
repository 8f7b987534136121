pub mod backend;
pub mod boundary;
pub mod build_info;
pub mod cli;
pub mod dump;
pub mod error;
pub mod grid;
pub mod heatmap;
pub mod linear;
pub mod par_slice;
pub mod solver;
pub mod stencil;
pub mod util;
