pub mod insurer;
pub mod quote;
pub mod request;
