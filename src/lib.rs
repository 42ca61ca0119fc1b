//! Ganging optimization engine for transfer printing.
//!
//! Groups individual print jobs onto shared 310 × 440 mm print sheets to
//! minimize wasted material and screen-setup cost, respecting product
//! compatibility rules and deadlines.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Job`, `OutputSlot`, `RunReport`
//! - **`geometry`**: Size dimension table, sheet constants, grid capacity
//! - **`packing`**: Shelf-packing sheet utilization calculator
//! - **`templates`**: Curated, geometry-validated layout catalog
//! - **`cost`**: Waste cost, cost-effectiveness, gang priority
//! - **`grouping`**: Compatibility pools and cross-compatibility pass
//! - **`selection`**: Best-combination search for one sheet
//! - **`engine`**: Run orchestration, allocation tracking, finalization
//! - **`normalize`**: Free-text product description classification
//! - **`validation`**: Input integrity checks (duplicate IDs, quantities)
//!
//! # Usage
//!
//! ```
//! use transfer_ganging::engine::GangingEngine;
//! use transfer_ganging::models::{Job, OutputSlot, ProductType, TransferSize};
//!
//! let jobs = vec![
//!     Job::new("J1", ProductType::FullColour, TransferSize::A5).with_quantity(4),
//!     Job::new("J2", ProductType::FullColour, TransferSize::A6).with_quantity(8),
//! ];
//! let slots = vec![OutputSlot::new("LAY-A1"), OutputSlot::new("LAY-B1")];
//!
//! let report = GangingEngine::new().run(&jobs, &slots, 0);
//! assert_eq!(report.summary.unallocated, 0);
//! ```
//!
//! The engine is a pure synchronous pass: jobs go in as immutable
//! snapshots, slot commits come out as an explicit list. Infeasibility
//! (a layout that doesn't fit, a pool with nothing to place) is a normal
//! outcome, never an error.

pub mod cost;
pub mod engine;
pub mod geometry;
pub mod grouping;
pub mod models;
pub mod normalize;
pub mod packing;
pub mod selection;
pub mod templates;
pub mod validation;
