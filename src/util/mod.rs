pub mod conv;
pub mod http;
pub mod url;
