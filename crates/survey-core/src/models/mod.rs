pub mod feedback;
pub mod participant;
pub mod sociodemographic;
pub mod submission;
