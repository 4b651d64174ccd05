pub mod goal;
pub mod progress;
pub mod shell;
pub mod transfer;
