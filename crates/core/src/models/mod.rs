pub mod change_point;
pub mod chart;
pub mod event;
pub mod price;
pub mod snapshot;
pub mod window;
