use clap::Args;

/// Runtime knobs for the packing search.
#[derive(Args, Debug, Clone)]
pub struct SearchParams {
    /// Force the finished grid to be point-symmetrical.
    #[arg(short = 's', long, default_value_t = false)]
    pub symmetrical: bool,

    /// Wall-clock budget in seconds; the best grid so far is printed when it
    /// runs out.
    #[arg(short = 't', long = "time-max", default_value_t = 585)]
    pub time_max: u64,

    /// Per-round budget of completed grids; pending-worklist grids are
    /// always expanded and do not count against it.
    #[arg(short = 'n', long = "node-max", default_value_t = 15_000)]
    pub node_max: usize,

    /// Hard ceiling on grid states held in memory before the search gives
    /// up and reports its best result.
    #[arg(long, default_value_t = 4_000_000)]
    pub max_states: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            symmetrical: false,
            time_max: 585,
            node_max: 15_000,
            max_states: 4_000_000,
        }
    }
}
