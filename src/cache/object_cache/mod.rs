pub mod moka;
pub mod redis;

pub use self::moka::MokaCacheWrapper;
