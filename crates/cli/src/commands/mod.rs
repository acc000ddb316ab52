pub mod ask;
pub mod init;
pub mod operations;
pub mod serve;
