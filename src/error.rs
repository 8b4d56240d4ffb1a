/// Errors reported by fallible [`List`](crate::List) and cursor operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// `front`, `back` or `pop_front` was called on an empty list.
    #[error("cannot access an element of an empty list")]
    EmptyAccess,
    /// An index-based position lies past the end of the list.
    #[error("index {index} is out of bounds for a list of {count} elements")]
    OutOfBounds { index: usize, count: usize },
    /// A range whose start lies after its end.
    #[error("range start {start} is greater than range end {end}")]
    InvalidRange { start: usize, end: usize },
    /// The cursor is at the end position and cannot move forward.
    #[error("cursor cannot move past the end of the list")]
    PastEnd,
}
