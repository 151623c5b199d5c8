pub mod response;

pub use response::{ApiResponse, CountResponse};
