//! Layout table for the WSPR beacon board.
//!
//! Parts, near (Y = 0) edge to far edge:
//!
//! - SMA connector body and pin on the near edge, the pin pointing off-board
//! - LPF row: three toroid inductors interleaved with four capacitors
//! - OLED display
//! - ESP32 module against the far edge
//!
//! The ESP32 is pulled in from the far edge by its nominal module depth
//! ([`ESP32_EDGE_INSET`]) rather than by its modelled body depth.

use crate::geometry::{Color, Dimensions, Rotation, Vector3};
use crate::layout::{LayoutRow, LayoutTable, RowSize, XAnchor, YAnchor, ZAnchor};

/// PCB solder mask green.
pub const PCB_COLOR: Color = Color::rgb(0.0, 0.5, 0.0);
/// ESP32 shield.
pub const ESP32_COLOR: Color = Color::rgb(0.2, 0.2, 0.2);
/// OLED glass.
pub const OLED_COLOR: Color = Color::rgb(0.1, 0.1, 0.8);
/// Gold-plated RF connector.
pub const SMA_COLOR: Color = Color::rgb(0.8, 0.6, 0.1);
/// Enamelled toroid winding.
pub const INDUCTOR_COLOR: Color = Color::rgb(0.8, 0.8, 0.0);
/// Ceramic capacitor body.
pub const CAPACITOR_COLOR: Color = Color::rgb(0.6, 0.4, 0.2);

/// ESP32 `DevKit` body (L × W × H).
pub const ESP32_SIZE: Dimensions = Dimensions::cuboid(28.0, 52.0, 13.0);
/// Distance from the far board edge to the ESP32 body.
pub const ESP32_EDGE_INSET: f64 = 54.0;

/// 0.96" OLED module.
pub const OLED_SIZE: Dimensions = Dimensions::cuboid(27.0, 27.0, 4.0);
/// OLED offset from the ESP32, towards the near edge.
pub const OLED_OFFSET_FROM_ESP32: f64 = -30.0;

/// SMA edge-mount body.
pub const SMA_BODY_SIZE: Dimensions = Dimensions::cuboid(6.0, 6.0, 6.0);
/// SMA centre pin.
pub const SMA_PIN_SIZE: Dimensions = Dimensions::cylinder(2.0, 10.0);
/// SMA pin base distance from the near edge.
pub const SMA_PIN_EDGE_OFFSET: f64 = 3.0;
/// SMA pin axis height above the board surface.
pub const SMA_PIN_HEIGHT: f64 = 3.0;
/// Turns the pin from +Z to point out over the near edge.
pub const SMA_PIN_ROTATION: Rotation = Rotation::new(Vector3::X, 90.0);

/// Y of the LPF component row.
pub const LPF_ROW_Y: f64 = 20.0;
/// Toroid approximated as a flat cylinder.
pub const INDUCTOR_SIZE: Dimensions = Dimensions::cylinder(4.0, 3.0);
/// Inductor offsets from the board centre line.
pub const INDUCTOR_OFFSETS: [f64; 3] = [-10.0, 0.0, 10.0];
/// Capacitor body.
pub const CAPACITOR_SIZE: Dimensions = Dimensions::cuboid(2.0, 1.2, 1.0);
/// Capacitor offsets from the board centre line, between and outside the inductors.
pub const CAPACITOR_OFFSETS: [f64; 4] = [-15.0, -5.0, 5.0, 15.0];

/// Number of parts in the beacon layout.
pub const PART_COUNT: usize = 5 + INDUCTOR_OFFSETS.len() + CAPACITOR_OFFSETS.len();

const ON_SURFACE: ZAnchor = ZAnchor::BoardSurface { offset: 0.0 };
const CENTRED: XAnchor = XAnchor::CentredOnBoard { offset: 0.0 };

/// Builds the beacon layout table.
#[must_use]
pub fn table() -> LayoutTable {
    let mut table = LayoutTable::new()
        .with(LayoutRow::new("PCB", RowSize::Board).colored(PCB_COLOR))
        .with(
            LayoutRow::new("ESP32", RowSize::Fixed(ESP32_SIZE))
                .anchored(
                    CENTRED,
                    YAnchor::FarEdge {
                        inset: ESP32_EDGE_INSET,
                    },
                    ON_SURFACE,
                )
                .colored(ESP32_COLOR),
        )
        .with(
            LayoutRow::new("OLED", RowSize::Fixed(OLED_SIZE))
                .anchored(
                    CENTRED,
                    YAnchor::RelativeTo {
                        name: "ESP32".to_string(),
                        offset: OLED_OFFSET_FROM_ESP32,
                    },
                    ON_SURFACE,
                )
                .colored(OLED_COLOR),
        )
        .with(
            LayoutRow::new("SMA_Body", RowSize::Fixed(SMA_BODY_SIZE))
                .anchored(CENTRED, YAnchor::NearEdge { offset: 0.0 }, ON_SURFACE)
                .colored(SMA_COLOR),
        )
        .with(
            LayoutRow::new("SMA_Pin", RowSize::Fixed(SMA_PIN_SIZE))
                .anchored(
                    XAnchor::BoardCentre { offset: 0.0 },
                    YAnchor::NearEdge {
                        offset: SMA_PIN_EDGE_OFFSET,
                    },
                    ZAnchor::BoardSurface {
                        offset: SMA_PIN_HEIGHT,
                    },
                )
                .rotated(SMA_PIN_ROTATION)
                .colored(SMA_COLOR),
        );

    for (i, offset) in INDUCTOR_OFFSETS.iter().enumerate() {
        table.push(lpf_part(format!("L{}", i + 1), INDUCTOR_SIZE, *offset, INDUCTOR_COLOR));
    }
    for (i, offset) in CAPACITOR_OFFSETS.iter().enumerate() {
        table.push(lpf_part(format!("C{}", i + 1), CAPACITOR_SIZE, *offset, CAPACITOR_COLOR));
    }

    table
}

fn lpf_part(name: String, size: Dimensions, offset: f64, color: Color) -> LayoutRow {
    LayoutRow::new(name, RowSize::Fixed(size))
        .anchored(
            XAnchor::BoardCentre { offset },
            YAnchor::Fixed(LPF_ROW_Y),
            ON_SURFACE,
        )
        .colored(color)
}
