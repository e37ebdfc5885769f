//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Every flag is further gated by `cfg(debug_assertions)`
//! at the call site.

pub struct DebugFlags {
    /// Emit the projected position of every keyword for every month.
    pub print_trajectory: bool,

    /// Emit the per-month running totals inside the accumulator.
    pub print_accumulation: bool,

    /// Emit every row the ingest layer rejects, not just the summary count.
    pub print_ingest_rejections: bool,

    /// Emit timing of effort-scenario runs.
    pub print_scenario_timing: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_trajectory: false,
    print_accumulation: false,
    print_ingest_rejections: true,
    print_scenario_timing: false,
};
