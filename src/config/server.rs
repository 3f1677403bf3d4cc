use std::env;
use std::net::SocketAddr;

pub fn bind_addr() -> SocketAddr {
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());

    format!("{}:{}", host, port)
        .parse()
        .expect("HOST/PORT must form a valid socket address")
}
