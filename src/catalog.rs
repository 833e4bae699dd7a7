//! PGNs offered for selection
//!
//! The generation server only knows a fixed set of parameter groups. Front
//! ends render this list as checkboxes; the dispatcher itself never checks
//! selections against it.

use crate::types::PgnId;
use serde::Serialize;

/// One selectable parameter group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PgnEntry {
    /// Parameter Group Number
    pub pgn: u32,
    /// Display name with acronym
    pub name: &'static str,
    /// 29-bit CAN identifier (priority, PGN, source address 0)
    pub can_id: u32,
    /// Transmit cycle in milliseconds
    pub cycle_time_ms: u32,
}

impl PgnEntry {
    /// Identifier as sent on the wire
    pub fn id(&self) -> PgnId {
        PgnId::from(self.pgn)
    }

    /// CAN identifier as `0x0CF00400`
    pub fn can_id_hex(&self) -> String {
        format!("0x{:08X}", self.can_id)
    }
}

const CATALOG: [PgnEntry; 5] = [
    PgnEntry {
        pgn: 61444,
        name: "Electronic Engine Controller 1 (EEC1)",
        can_id: 0x0CF0_0400,
        cycle_time_ms: 20,
    },
    PgnEntry {
        pgn: 65265,
        name: "Cruise Control/Vehicle Speed (CCVS1)",
        can_id: 0x18FE_F100,
        cycle_time_ms: 100,
    },
    PgnEntry {
        pgn: 65266,
        name: "Fuel Economy (LFE)",
        can_id: 0x18FE_F200,
        cycle_time_ms: 100,
    },
    PgnEntry {
        pgn: 65262,
        name: "Engine Temperature 1 (ET1)",
        can_id: 0x18FE_EE00,
        cycle_time_ms: 1000,
    },
    PgnEntry {
        pgn: 65263,
        name: "Engine Fluid Level/Pressure 1 (EFL/P1)",
        can_id: 0x18FE_EF00,
        cycle_time_ms: 500,
    },
];

/// All known parameter groups, in display order
pub fn all() -> &'static [PgnEntry] {
    &CATALOG
}

/// Look up a parameter group by identifier
pub fn lookup(pgn: &PgnId) -> Option<&'static PgnEntry> {
    let number: u32 = pgn.as_str().parse().ok()?;
    CATALOG.iter().find(|entry| entry.pgn == number)
}
