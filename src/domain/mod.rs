// Domain layer - pure, synchronous telemetry transformations
pub mod chart;
pub mod density;
pub mod downsample;
pub mod duty_cycle;
pub mod join;
pub mod labels;
pub mod parameter;
pub mod telemetry;
pub mod timestamp;
pub mod window;
