use std::net::SocketAddr;

#[derive(Clone, Debug)]
pub struct Config {
    pub web: WebConfig,
}

#[derive(Clone, Debug)]
pub struct WebConfig {
    pub listen_address: SocketAddr,
}
