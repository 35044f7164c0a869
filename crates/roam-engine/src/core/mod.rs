pub mod agent;
pub mod bounds;
pub mod collision;
pub mod controller;
pub mod proximity;
pub mod registry;
pub mod time;
