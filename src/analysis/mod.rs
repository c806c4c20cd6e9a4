//! Statistics over extracted samples. Everything here is a pure function of a sample slice.

pub mod buckets;
pub mod fit;
pub mod rolling;
