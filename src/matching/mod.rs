mod correlate;
mod extract;

pub use correlate::Correlator;
pub use extract::unique_fights;
