// Domain layer - Series, reference tables and view models
pub mod chart;
pub mod controls;
pub mod dashboard;
pub mod observations;
pub mod reference;
pub mod region;
pub mod sector;
pub mod series;
pub mod session;
pub mod stream;
