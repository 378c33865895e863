pub mod collaborators;
pub mod investors;
pub mod sale;
