pub mod camera;
pub mod controls;
pub mod pointer;
pub mod simulation;
pub mod visualization;
