/// Feature modules
pub mod tasks;
