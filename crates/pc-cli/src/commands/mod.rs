pub mod dispatch;
pub mod login;
pub mod logout;
pub mod process;
pub mod prompt;
pub mod whoami;
