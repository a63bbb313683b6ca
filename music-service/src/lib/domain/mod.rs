pub mod account;
pub mod playlist;
pub mod song;
