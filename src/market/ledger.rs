//! Account balance and transaction history fixtures.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Earning,
    Spending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Completed,
    Pending,
    Failed,
}

/// One row in the account history tab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerEntry {
    pub id: &'static str,
    pub kind: EntryKind,
    /// Signed amount in ⚡; spending entries are negative.
    pub amount: f64,
    pub description: &'static str,
    pub timestamp: &'static str,
    pub status: EntryStatus,
}

/// Headline numbers on the account overview card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountSummary {
    pub balance: f64,
    pub total_earned: f64,
    pub total_spent: f64,
}

#[must_use]
pub fn summary() -> AccountSummary {
    AccountSummary { balance: 47.8, total_earned: 156.3, total_spent: 108.5 }
}

const HISTORY: [LedgerEntry; 6] = [
    LedgerEntry {
        id: "1",
        kind: EntryKind::Earning,
        amount: 12.5,
        description: "LoRA usage reward - Nishikigi Chisato",
        timestamp: "2024-01-15 14:30",
        status: EntryStatus::Completed,
    },
    LedgerEntry {
        id: "2",
        kind: EntryKind::Spending,
        amount: -8.2,
        description: "Image generation - Text2Image Cartoon",
        timestamp: "2024-01-15 13:15",
        status: EntryStatus::Completed,
    },
    LedgerEntry {
        id: "3",
        kind: EntryKind::Earning,
        amount: 15.8,
        description: "LoRA usage reward - Illustrious Gehenna",
        timestamp: "2024-01-14 16:45",
        status: EntryStatus::Completed,
    },
    LedgerEntry {
        id: "4",
        kind: EntryKind::Spending,
        amount: -12.1,
        description: "Video generation - Text2Video Cartoon",
        timestamp: "2024-01-14 11:20",
        status: EntryStatus::Completed,
    },
    LedgerEntry {
        id: "5",
        kind: EntryKind::Earning,
        amount: 9.4,
        description: "Mining reward - GPU computation",
        timestamp: "2024-01-13 09:30",
        status: EntryStatus::Completed,
    },
    LedgerEntry {
        id: "6",
        kind: EntryKind::Spending,
        amount: -6.7,
        description: "Image generation - Image2Image Cartoon",
        timestamp: "2024-01-13 15:10",
        status: EntryStatus::Completed,
    },
];

/// Transaction history, newest first.
#[must_use]
pub fn history() -> &'static [LedgerEntry] {
    &HISTORY
}

/// Display form of a signed amount: earnings carry an explicit `+`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    if amount >= 0.0 {
        format!("+{amount:.1}")
    } else {
        format!("{amount:.1}")
    }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
