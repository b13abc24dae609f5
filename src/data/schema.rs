//! Result Table Schemas
//! The ten precomputed summary tables the dashboard reads, and the columns each must carry.

use serde::Serialize;

/// Delay cause columns of `result5.csv`, in legend order.
pub const DELAY_CAUSES: [&str; 5] = [
    "Carrier_Delays",
    "Weather_Delays",
    "NAS_Delays",
    "Security_Delays",
    "Late_Aircraft_Delays",
];

/// One of the ten summary tables produced by the upstream SQL queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ResultTable {
    FlightsPerYear,
    OnTimeVsDelayed,
    CancellationsPerYear,
    AverageDelaysPerYear,
    DelayCauses,
    AirportDelayPct,
    AirlineAverageDelay,
    AirlineCancellationPct,
    RouteDelayPct,
    DepartureTimeDelayPct,
}

impl ResultTable {
    /// All tables in slot order (`result1.csv` first).
    pub const ALL: [ResultTable; 10] = [
        ResultTable::FlightsPerYear,
        ResultTable::OnTimeVsDelayed,
        ResultTable::CancellationsPerYear,
        ResultTable::AverageDelaysPerYear,
        ResultTable::DelayCauses,
        ResultTable::AirportDelayPct,
        ResultTable::AirlineAverageDelay,
        ResultTable::AirlineCancellationPct,
        ResultTable::RouteDelayPct,
        ResultTable::DepartureTimeDelayPct,
    ];

    /// 1-based slot number, matching the `resultN.csv` naming.
    pub fn slot(self) -> usize {
        match self {
            ResultTable::FlightsPerYear => 1,
            ResultTable::OnTimeVsDelayed => 2,
            ResultTable::CancellationsPerYear => 3,
            ResultTable::AverageDelaysPerYear => 4,
            ResultTable::DelayCauses => 5,
            ResultTable::AirportDelayPct => 6,
            ResultTable::AirlineAverageDelay => 7,
            ResultTable::AirlineCancellationPct => 8,
            ResultTable::RouteDelayPct => 9,
            ResultTable::DepartureTimeDelayPct => 10,
        }
    }

    pub fn file_name(self) -> String {
        format!("result{}.csv", self.slot())
    }

    /// Columns the consuming charts read from this table.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            ResultTable::FlightsPerYear => &["Year", "Total_Flights"],
            ResultTable::OnTimeVsDelayed => &["Year", "On_Time_Flights", "Delayed_Flights"],
            ResultTable::CancellationsPerYear => &["Year", "Total_Cancellations"],
            ResultTable::AverageDelaysPerYear => &[
                "Year",
                "Average_Departure_Delay",
                "Average_Arrival_Delay",
            ],
            ResultTable::DelayCauses => &[
                "DEST",
                "ORIGIN",
                "AIRLINE",
                "Carrier_Delays",
                "Weather_Delays",
                "NAS_Delays",
                "Security_Delays",
                "Late_Aircraft_Delays",
            ],
            ResultTable::AirportDelayPct => &["ORIGIN", "Departure_Delay_Percentage"],
            ResultTable::AirlineAverageDelay => &["AIRLINE", "Average_Departure_Delay"],
            ResultTable::AirlineCancellationPct => &["AIRLINE", "Cancellation_Percentage"],
            ResultTable::RouteDelayPct => &[
                "Route",
                "Departure_Delay_Percentage",
                "Arrival_Delay_Percentage",
            ],
            ResultTable::DepartureTimeDelayPct => &[
                "CRS_DEP_TIME",
                "Departure_Delay_Percentage",
                "Arrival_Delay_Percentage",
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_follow_file_numbering() {
        for (i, table) in ResultTable::ALL.iter().enumerate() {
            assert_eq!(table.slot(), i + 1);
            assert_eq!(table.file_name(), format!("result{}.csv", i + 1));
        }
    }

    #[test]
    fn delay_causes_table_carries_every_cause_column() {
        let columns = ResultTable::DelayCauses.columns();
        for cause in DELAY_CAUSES {
            assert!(columns.contains(&cause), "missing {cause}");
        }
    }
}
