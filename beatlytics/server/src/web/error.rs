use std::net::SocketAddr;

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Error occurs while binding TCP server on {listen_address}, error: {source}"))]
    BindTcpServer { listen_address: SocketAddr, source: std::io::Error },

    #[snafu(display("Error occurs while serving HTTP server, error: {source}"))]
    ServeHttpServer { source: std::io::Error },
}
