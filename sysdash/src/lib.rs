//! sysdash: terminal dashboard that polls a system metrics endpoint and
//! redraws CPU, memory, disk, GPU, battery and network panels.

pub mod app;
pub mod fetch;
pub mod history;
pub mod profiles;
pub mod scheduler;
pub mod status;
pub mod types;
pub mod ui;
pub mod widgets;
