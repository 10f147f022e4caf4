use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TokenBinError {
    #[snafu(display("Invalid input: {reason}"))]
    InvalidInput { reason: String },

    #[snafu(display("Capacity exceeded: {what} would overflow a 64-bit counter"))]
    CapacityExceeded { what: &'static str },
}
