//! config/demo.rs Demo input configuration.
//!
//! Small, deterministic data set written by the `make_demo_inputs` binary so
//! the CLI can be tried end to end without real exports.

/// A demo keyword row: (keyword, current position, target position, monthly volume)
pub type DemoKeyword = (&'static str, i32, i32, i64);

/// A demo history row: (month label, sessions, conversions)
pub type DemoHistory = (&'static str, i64, i64);

/// Static assets required for the Demo
pub struct DemoResources {
    pub keywords: &'static [DemoKeyword],
    pub history: &'static [DemoHistory],
}

/// The Master Demo Configuration
pub struct DemoConfig {
    /// Directory (relative to the working directory) the demo files land in
    pub directory: &'static str,
    pub keywords_filename: &'static str,
    pub history_filename: &'static str,
    pub resources: DemoResources,
}

pub const DEMO: DemoConfig = DemoConfig {
    directory: "demo_inputs",
    keywords_filename: "keywords.csv",
    history_filename: "historical.csv",

    resources: DemoResources {
        keywords: &[
            ("running shoes", 14, 3, 22_000),
            ("trail running shoes", 9, 2, 6_600),
            ("best marathon shoes", 27, 5, 3_400),
            ("wide toe box sneakers", 41, 8, 1_900),
            ("running shoe size guide", 4, 1, 880),
        ],
        history: &[
            ("2024-01", 11_850, 201),
            ("2024-02", 12_120, 219),
            ("2024-03", 12_940, 228),
            ("2024-04", 12_610, 240),
            ("2024-05", 13_330, 251),
            ("2024-06", 13_980, 262),
        ],
    },
};
