pub mod account;
pub mod playlist;
pub mod song;

pub use account::PostgresAccountRepository;
pub use playlist::PostgresPlaylistRepository;
pub use song::PostgresSongRepository;
