// pwcheck shared type definitions
// Each submodule defines types used across the controller, services and hosts.

pub mod analysis;
pub mod breach;
pub mod errors;
pub mod generator;
pub mod page;
pub mod settings;
