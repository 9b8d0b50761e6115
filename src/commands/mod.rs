pub mod csv;
pub mod init;
pub mod serve;
pub mod snippets;
