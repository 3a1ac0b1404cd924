pub mod generate;
pub mod init;
pub mod model;
pub mod process;
