use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Position is outside the grid")]
    OutOfBounds,
    #[error("Start is already placed")]
    StartAlreadySet,
    #[error("End is already placed")]
    EndAlreadySet,
    #[error("Cell is an obstacle")]
    OccupiedByObstacle,
    #[error("Cell holds the start")]
    OccupiedByStart,
    #[error("Cell holds the end")]
    OccupiedByEnd,
    #[error("Start and end must both be placed before searching")]
    MissingEndpoints,
    #[error("Start and end must be different cells")]
    EndpointsCoincide,
    #[error("A search is already running")]
    AlreadyRunning,
}

pub type Result<T> = core::result::Result<T, GridError>;
