// Domain models: samples and the per-subject series that holds them

mod sample;
mod series;

pub use sample::{
    DiskDelta, DiskStat, LoadAvg, NANOS_PER_SECOND, NetDelta, NetStat, ProcStat, Sample,
};
pub use series::Series;
