pub mod analyze;
pub mod init;
