//! Dashboard page layout and commentary.

use crate::charts::ChartId;

pub const PAGE_TITLE: &str = "US Flight Delay Analysis Dashboard";
pub const PAGE_INTRO: &str = "This dashboard analyzes US flight delay trends, causes, and \
high-risk routes from 2019 to 2023.";
pub const FOOTER: &str = "Created by Anbu Ezhilmathi Nambi | Powered by Rust, egui & Polars";

/// A row of charts inside a section.
pub enum PanelRow {
    /// Two side-by-side columns, each a vertical list of charts.
    Columns(&'static [ChartId], &'static [ChartId]),
    /// Full-width charts, one under another.
    Full(&'static [ChartId]),
}

/// One bullet of commentary. `detail` renders as an indented italic note.
pub struct Insight {
    pub lead: &'static str,
    pub text: &'static str,
    pub detail: Option<&'static str>,
}

pub struct NoteGroup {
    pub title: &'static str,
    pub insights: &'static [Insight],
}

pub struct Section {
    pub title: &'static str,
    pub heading: &'static str,
    pub rows: &'static [PanelRow],
    pub notes: &'static [NoteGroup],
}

impl Section {
    /// Charts in this section, in reading order.
    pub fn charts(&self) -> Vec<ChartId> {
        self.rows
            .iter()
            .flat_map(|row| match row {
                PanelRow::Columns(left, right) => {
                    left.iter().chain(right.iter()).copied().collect()
                }
                PanelRow::Full(charts) => charts.to_vec(),
            })
            .collect()
    }
}

const fn insight(lead: &'static str, text: &'static str) -> Insight {
    Insight {
        lead,
        text,
        detail: None,
    }
}

pub static SECTIONS: [Section; 5] = [
    Section {
        title: "SECTION 1: Delay Trends Over Time",
        heading: "Visualizing Yearly Trends in Flights, Delays, and Cancellations",
        rows: &[PanelRow::Columns(
            &[ChartId::TotalFlights, ChartId::Cancellations],
            &[ChartId::OnTimeVsDelayed, ChartId::AverageDelays],
        )],
        notes: &[NoteGroup {
            title: "Section 1 Insights",
            insights: &[
                Insight {
                    lead: "Total Flights & On-Time Performance",
                    text: "2019 had the most flights (~758K), but 2023 showed the worst delay \
                           rates (nearly 40%) despite lower volume, hinting at deeper operational \
                           inefficiencies rather than passenger demand.",
                    detail: Some(
                        "Why? This may point to staffing shortages, airline scheduling \
                         compression, or inefficient fleet management post-COVID.",
                    ),
                },
                insight(
                    "Cancellations",
                    "2020's cancellation spike (~6%) aligns with the pandemic onset. Rates \
                     stabilized in 2023, but delays continued rising, suggesting the problem \
                     shifted from cancellations to delay management.",
                ),
                insight(
                    "Connecting the Dots",
                    "As cancellation rates dropped but delays increased, airlines may have opted \
                     to avoid cancellations by padding schedules, inadvertently increasing delays \
                     and turnarounds.",
                ),
            ],
        }],
    },
    Section {
        title: "SECTION 2: Analyzing the Causes of Delays",
        heading: "Breakdown of Delay Causes by Airport and Airline",
        rows: &[PanelRow::Full(&[
            ChartId::CausesByDestination,
            ChartId::CausesByOrigin,
            ChartId::CausesByAirline,
        ])],
        notes: &[NoteGroup {
            title: "Section 2 Insights",
            insights: &[
                insight(
                    "Dominant Causes",
                    "Late Aircraft and Carrier Delays were consistently the top causes, both \
                     internal and controllable. External causes (Weather, NAS, Security) were \
                     relatively low.",
                ),
                insight(
                    "Example (OGG-HNL)",
                    "Of 3,577 flights, 522 delays were from late aircraft and 517 from the \
                     carrier, while only 41 were from weather.",
                ),
                insight(
                    "Why This Matters",
                    "These delays can be fixed. Airlines should optimize scheduling, crew \
                     rotations, and turnaround times.",
                ),
            ],
        }],
    },
    Section {
        title: "SECTION 3: Identifying Airport & Airline Bottlenecks",
        heading: "Pinpointing the Most Delay-Prone Airports and Airlines",
        rows: &[PanelRow::Columns(
            &[ChartId::AirportDelayPct, ChartId::AirlineCancellationPct],
            &[ChartId::AirlineAverageDelay],
        )],
        notes: &[NoteGroup {
            title: "Section 3 Insights",
            insights: &[
                insight(
                    "Worst Airports",
                    "Cold Bay (AK) leads with 71% delayed departures, but major hubs like MDW \
                     (Chicago) and HOU (Houston) are highly impacted too.",
                ),
                insight(
                    "Worst Airlines",
                    "JetBlue, Frontier, and Allegiant are among the worst in both average delay \
                     and cancellation percentage. Delta and Hawaiian are the best-performing.",
                ),
                insight(
                    "Cross-link Insight",
                    "The high-delay SEA-HOU route (from Section 4) is operated by airlines like \
                     Southwest, which is in the worst-performing group for cancellations. This \
                     connects specific route problems to broader airline performance issues.",
                ),
                insight(
                    "Why Low-Cost Airlines Struggle",
                    "Their business model relies on tight scheduling and point-to-point routes, \
                     which leaves less room for recovery from initial delays and causes a domino \
                     effect.",
                ),
            ],
        }],
    },
    Section {
        title: "SECTION 4: Identifying High-Risk Routes and Timings",
        heading: "Finding Consistently Delayed Routes and Problematic Departure Times",
        rows: &[
            PanelRow::Columns(
                &[ChartId::RouteDepartureDelayPct],
                &[ChartId::RouteArrivalDelayPct],
            ),
            PanelRow::Full(&[ChartId::DepartureTimeImpact]),
        ],
        notes: &[NoteGroup {
            title: "Section 4 Insights",
            insights: &[
                insight(
                    "Worst Routes",
                    "Routes like SEA-HOU and SJU-CVG had 100% delayed departures. Some routes \
                     catch up on arrival, suggesting intentional schedule padding to absorb \
                     delays.",
                ),
                insight(
                    "Time-of-Day Patterns",
                    "High delay percentages are seen in 3-5 AM and 11 PM-12 AM windows. This may \
                     indicate issues with crew changes, overnight airport constraints, or early \
                     morning mechanical readiness.",
                ),
                insight(
                    "Cross-link",
                    "The airports identified as bottlenecks in Section 3 (like MDW and HOU) are \
                     part of the high-risk routes in this section, confirming they are sources \
                     of structural, system-wide inefficiencies.",
                ),
            ],
        }],
    },
    Section {
        title: "Recommendations",
        heading: "Actionable Recommendations Based on Analysis",
        rows: &[],
        notes: &[
            NoteGroup {
                title: "For Airlines",
                insights: &[
                    insight(
                        "Operational Efficiency",
                        "Focus on improving turnaround efficiency and crew planning to reduce \
                         the top two causes of delays: 'Late Aircraft' and 'Carrier' issues.",
                    ),
                    insight(
                        "Contingency Planning",
                        "Low-cost carriers in particular should re-evaluate buffer times and \
                         contingency routing to build more resilience into their tight \
                         schedules.",
                    ),
                ],
            },
            NoteGroup {
                title: "For Passengers",
                insights: &[
                    insight(
                        "Strategic Booking",
                        "Avoid flights departing late at night or very early in the morning, \
                         especially on known high-risk routes like SEA-HOU.",
                    ),
                    insight(
                        "Airline Choice",
                        "For better on-time performance and lower cancellation risk, consider \
                         legacy carriers like Delta or Hawaiian, which consistently outperform \
                         their low-cost counterparts in this dataset.",
                    ),
                ],
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn placed_charts() -> Vec<ChartId> {
        SECTIONS.iter().flat_map(|s| s.charts()).collect()
    }

    #[test]
    fn every_chart_is_placed_exactly_once() {
        let mut placed = placed_charts();
        placed.sort();
        let mut all = ChartId::ALL.to_vec();
        all.sort();
        assert_eq!(placed, all);
    }

    #[test]
    fn delay_cause_section_holds_only_cause_charts() {
        assert_eq!(
            SECTIONS[1].charts(),
            vec![
                ChartId::CausesByDestination,
                ChartId::CausesByOrigin,
                ChartId::CausesByAirline
            ]
        );
    }

    #[test]
    fn every_section_has_commentary() {
        assert!(SECTIONS.iter().all(|s| !s.notes.is_empty()));
    }
}
