//! Mining fleet dashboard data.

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinerStatus {
    Busy,
    Idle,
}

impl MinerStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MinerStatus::Busy => "busy",
            MinerStatus::Idle => "idle",
        }
    }
}

impl FromStr for MinerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "busy" => Ok(MinerStatus::Busy),
            "idle" => Ok(MinerStatus::Idle),
            other => Err(format!("unknown miner status: {other}")),
        }
    }
}

/// One GPU miner in the global fleet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Miner {
    pub id: u32,
    pub location: &'static str,
    pub country: &'static str,
    pub gpu: &'static str,
    pub memory: &'static str,
    pub status: MinerStatus,
    /// Utilization percentage.
    pub usage: u8,
    /// Earnings in ⚡.
    pub earning: f64,
    pub uptime: &'static str,
}

const FLEET: [Miner; 8] = [
    Miner {
        id: 1,
        location: "New York",
        country: "US",
        gpu: "RTX 5090",
        memory: "24 GB GDDR7",
        status: MinerStatus::Busy,
        usage: 87,
        earning: 12.5,
        uptime: "3d 14h 22m",
    },
    Miner {
        id: 2,
        location: "Berlin",
        country: "DE",
        gpu: "RTX 4090",
        memory: "24 GB GDDR6X",
        status: MinerStatus::Idle,
        usage: 12,
        earning: 8.2,
        uptime: "1d 8h 45m",
    },
    Miner {
        id: 3,
        location: "Paris",
        country: "FR",
        gpu: "RTX 5090",
        memory: "24 GB GDDR7",
        status: MinerStatus::Busy,
        usage: 94,
        earning: 15.8,
        uptime: "5d 2h 11m",
    },
    Miner {
        id: 4,
        location: "Shanghai",
        country: "CN",
        gpu: "RTX 4090",
        memory: "24 GB GDDR6X",
        status: MinerStatus::Busy,
        usage: 76,
        earning: 11.3,
        uptime: "2d 19h 33m",
    },
    Miner {
        id: 5,
        location: "Tokyo",
        country: "JP",
        gpu: "RTX 5090",
        memory: "24 GB GDDR7",
        status: MinerStatus::Idle,
        usage: 8,
        earning: 6.7,
        uptime: "4d 6h 58m",
    },
    Miner {
        id: 6,
        location: "Sydney",
        country: "AU",
        gpu: "RTX 4090",
        memory: "24 GB GDDR6X",
        status: MinerStatus::Busy,
        usage: 91,
        earning: 13.1,
        uptime: "1d 15h 42m",
    },
    Miner {
        id: 7,
        location: "Toronto",
        country: "CA",
        gpu: "RTX 5090",
        memory: "24 GB GDDR7",
        status: MinerStatus::Idle,
        usage: 15,
        earning: 9.4,
        uptime: "3d 9h 27m",
    },
    Miner {
        id: 8,
        location: "London",
        country: "GB",
        gpu: "RTX 4090",
        memory: "24 GB GDDR6X",
        status: MinerStatus::Busy,
        usage: 83,
        earning: 14.2,
        uptime: "2d 12h 8m",
    },
];

/// The whole fleet, in display order.
#[must_use]
pub fn fleet() -> &'static [Miner] {
    &FLEET
}

/// Miners matching the status filter; `None` means "All".
#[must_use]
pub fn filter_by_status(status: Option<MinerStatus>) -> Vec<&'static Miner> {
    FLEET
        .iter()
        .filter(|miner| status.is_none_or(|s| miner.status == s))
        .collect()
}

/// Aggregates shown above the fleet table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FleetStats {
    pub total: usize,
    pub busy: usize,
    pub idle: usize,
    pub total_earnings: f64,
}

#[must_use]
pub fn stats() -> FleetStats {
    let busy = FLEET.iter().filter(|m| m.status == MinerStatus::Busy).count();
    FleetStats {
        total: FLEET.len(),
        busy,
        idle: FLEET.len() - busy,
        total_earnings: FLEET.iter().map(|m| m.earning).sum(),
    }
}

#[cfg(test)]
#[path = "mining_test.rs"]
mod tests;
