pub use self::{http::HTTP, rpc::Rpc};

mod http;
mod rpc;
