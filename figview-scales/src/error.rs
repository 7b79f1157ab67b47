#[derive(Debug, PartialEq, thiserror::Error)]
pub enum FigviewScaleError {
    #[error("Log scale domain must be strictly positive, got ({0}, {1})")]
    NonPositiveLogDomain(f32, f32),

    #[error("Log scale base must be a finite value > 1, got {0}")]
    InvalidLogBase(f32),

    #[error("Date scale domain must be ordered start <= end: ({0}, {1})")]
    ReversedDateDomain(chrono::NaiveDateTime, chrono::NaiveDateTime),

    #[error("Date scale ordinal domain is degenerate: ({0}, {1})")]
    DegenerateOrdinalDomain(f32, f32),
}
