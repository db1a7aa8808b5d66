pub mod auth;
pub mod home;
pub mod login;
pub mod logout;
