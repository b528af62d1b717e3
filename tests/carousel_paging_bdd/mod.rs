//! Support modules for the carousel paging BDD tests.

pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use state::{
    CarouselState, StepResult, gateway_for, mount, mount_daily, mount_page, runtime_and_server,
};
