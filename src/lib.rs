//! beacon-assembly: parametric 3D mock-up of a WSPR beacon board
//!
//! This library lays out a simplified mechanical assembly of the beacon PCB
//! (ESP32 module, OLED display, SMA connector and the low-pass filter parts)
//! and builds it into a CAD document.
//!
//! # Architecture
//!
//! - A declarative layout table anchors every part to the board outline or to
//!   an earlier part; resolving it against the board dimensions gives a list
//!   of placed boxes and cylinders.
//! - The builder replays that list against a [`document::CadHost`], the
//!   object-creation API of a CAD application.
//! - An in-memory document implements the host API and can be exported as
//!   JSON or as an OpenSCAD script.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`document`] — CAD host API, in-memory document and builder
//! - [`error`] — Error types
//! - [`export`] — JSON and OpenSCAD output
//! - [`geometry`] — Vectors, rotations, primitives and bounds
//! - [`layout`] — Layout tables and the beacon layout
//!
//! # Example
//!
//! ```
//! use beacon_assembly::document::{build_beacon, NamePolicy, Workspace};
//! use beacon_assembly::geometry::BoardSpec;
//!
//! let mut workspace = Workspace::new(NamePolicy::Reuse);
//! let report = build_beacon(&mut workspace, "Beacon_Assembly", &BoardSpec::default()).unwrap();
//! assert_eq!(report.objects.len(), 12);
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod geometry;
pub mod layout;
