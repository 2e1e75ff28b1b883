//! Admin dashboard.
//!
//! All figures are fixed sample data; nothing here reads the remote store.

use crate::types::Money;
use std::io;
use std::path::Path;
use thiserror::Error;

/// CSV export errors
#[derive(Error, Debug)]
pub enum ExportError {
    /// Could not create or write the file
    #[error("could not write export: {0}")]
    Io(#[from] io::Error),

    /// CSV encoding failed
    #[error("could not encode CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// One headline figure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatCard {
    /// Caption
    pub title: &'static str,
    /// Rendered value
    pub value: &'static str,
}

/// A row of the bookings table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookingRow {
    /// Day, e.g. `25 Jan`
    pub date: &'static str,
    /// Turf name
    pub turf: &'static str,
    /// Slot, e.g. `07:00 - 08:00`
    pub slot: &'static str,
    /// Customer name
    pub user: &'static str,
    /// Amount paid
    pub amount: Money,
    /// Status text
    pub status: &'static str,
}

/// Today's totals for one turf
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurfPerformance {
    /// Turf name
    pub turf: &'static str,
    /// Slots sold
    pub slots: u32,
    /// Revenue, pre-formatted
    pub revenue: &'static str,
}

/// Occupancy of one heatmap cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupancy {
    /// Open
    Free,
    /// Partly booked
    Filling,
    /// Sold out
    Full,
}

impl Occupancy {
    /// Occupancy of heatmap column `index`
    #[must_use]
    pub const fn for_column(index: usize) -> Self {
        match index {
            0 => Self::Free,
            1 => Self::Filling,
            _ => Self::Full,
        }
    }
}

/// Slot headings of the heatmap
pub const HEATMAP_SLOTS: [&str; 4] = ["6-7", "7-8", "8-9", "9-10"];

/// Turfs shown on the heatmap
pub const HEATMAP_TURFS: [&str; 2] = ["Green Field", "Sky Sports"];

/// CSV header of the bookings export
pub const CSV_HEADER: [&str; 5] = ["Date", "Turf", "Slot", "User", "Amount"];

const STATS: [StatCard; 4] = [
    StatCard { title: "Total Turfs", value: "8" },
    StatCard { title: "Today Bookings", value: "14" },
    StatCard { title: "Today Revenue", value: "₹12,600" },
    StatCard { title: "Total Users", value: "312" },
];

const BOOKINGS: [BookingRow; 2] = [
    BookingRow {
        date: "25 Jan",
        turf: "Green Field Arena",
        slot: "07:00 - 08:00",
        user: "Askar",
        amount: Money::rupees(800),
        status: "Confirmed",
    },
    BookingRow {
        date: "25 Jan",
        turf: "Sky Sports Turf",
        slot: "09:00 - 10:00",
        user: "Rahul",
        amount: Money::rupees(1000),
        status: "Confirmed",
    },
];

const PERFORMANCE: [TurfPerformance; 3] = [
    TurfPerformance { turf: "Green Field Arena", slots: 6, revenue: "₹4,800" },
    TurfPerformance { turf: "Sky Sports Turf", slots: 4, revenue: "₹4,000" },
    TurfPerformance { turf: "Champions Ground", slots: 3, revenue: "₹2,250" },
];

/// Headline figures
#[must_use]
pub const fn stats() -> &'static [StatCard] {
    &STATS
}

/// Per-turf totals
#[must_use]
pub const fn performance() -> &'static [TurfPerformance] {
    &PERFORMANCE
}

/// Bookings whose turf or user contains `query`, ignoring case
#[must_use]
pub fn filter_bookings(query: &str) -> Vec<BookingRow> {
    let query = query.trim().to_lowercase();
    BOOKINGS
        .into_iter()
        .filter(|row| {
            row.turf.to_lowercase().contains(&query) || row.user.to_lowercase().contains(&query)
        })
        .collect()
}

/// Writes `rows` as CSV with [`CSV_HEADER`]
///
/// # Errors
///
/// Returns [`ExportError`] if writing fails.
pub fn write_csv<W: io::Write>(writer: W, rows: &[BookingRow]) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(CSV_HEADER)?;

    for row in rows {
        let amount = row.amount.as_rupees().to_string();
        wtr.write_record([row.date, row.turf, row.slot, row.user, amount.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes `rows` to a CSV file at `path`
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub fn export_csv(path: &Path, rows: &[BookingRow]) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_csv(file, rows)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "Exported bookings");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn stat_cards() {
        let values: Vec<_> = stats().iter().map(|s| s.value).collect();
        assert_eq!(values, vec!["8", "14", "₹12,600", "312"]);
    }

    #[test]
    fn search_matches_turf_or_user() {
        assert_eq!(filter_bookings("").len(), 2);
        assert_eq!(filter_bookings("SKY")[0].user, "Rahul");
        assert_eq!(filter_bookings("askar")[0].turf, "Green Field Arena");
        assert!(filter_bookings("nobody").is_empty());
    }

    #[test]
    fn csv_contains_only_visible_rows() {
        let mut out = Vec::new();
        write_csv(&mut out, &filter_bookings("rahul")).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Date,Turf,Slot,User,Amount\n25 Jan,Sky Sports Turf,09:00 - 10:00,Rahul,1000\n"
        );
    }

    #[test]
    fn export_writes_file() {
        let path = std::env::temp_dir().join(format!("turfbook-export-{}.csv", uuid::Uuid::new_v4()));

        export_csv(&path, &filter_bookings("")).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(written.lines().count(), 3);
    }

    #[test]
    fn heatmap_columns() {
        assert_eq!(Occupancy::for_column(0), Occupancy::Free);
        assert_eq!(Occupancy::for_column(1), Occupancy::Filling);
        assert_eq!(Occupancy::for_column(3), Occupancy::Full);
        assert_eq!(performance()[2].slots, 3);
    }
}
