use jl_core::CoreError;
use jl_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("planner configuration error: {0}")]
    Config(#[from] CoreError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

pub type PlanResult<T> = Result<T, PlanError>;
