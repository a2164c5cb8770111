//! # Urbanistika
//!
//! Urban-planning feasibility calculator for residential slab-block
//! (lamel) massings on a single parcel.
//!
//! ## Features
//!
//! - Massing: footprint, above-ground BTP, NFA and suggested unit count
//! - Zoning checks: density (FI), coverage (FZ) and green factor (FZP)
//! - Parking demand and basement/surface split per scenario
//! - Investment, revenue and margin
//! - One-step optimization proposals for non-compliant projects
//! - Export to CSV and JSON, terminal dashboard
//!
//! ## Example
//!
//! ```no_run
//! use urbanistika::engine::evaluate;
//! use urbanistika::parser::load_project_file;
//!
//! let inputs = load_project_file("project.json").expect("Failed to load");
//! let result = evaluate(&inputs).expect("Invalid project");
//! println!("Status: {}", result.status);
//! println!("Units: {}", result.units.count);
//! ```

pub mod advisor;
pub mod engine;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod ui;
