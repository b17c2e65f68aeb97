pub mod behavior;
pub mod formulas;
pub mod scenario;
pub mod tax;
