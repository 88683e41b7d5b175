pub mod tasks;

pub use tasks::{TASK_POINTS, TASKS};
