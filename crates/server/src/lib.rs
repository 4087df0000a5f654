pub mod routes;
pub mod startup;
pub mod errors;
pub mod extract;
pub mod metrics;

pub use startup::run;
