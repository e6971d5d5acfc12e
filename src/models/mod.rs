pub mod inbound_request;
pub mod response_route;
