pub mod calculate;
pub mod closeout;
pub mod estimate;
pub mod pay;
