use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::ChatHttpServer;

use super::super::Container;

pub struct ServeController<'a> {
    container: &'a Container,
}

impl<'a> ServeController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn serve(&self, host: String, port: u16, system: Option<String>) -> Result<String> {
        let addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .with_context(|| format!("invalid bind address {host}:{port}"))?;
        let system_prompt = system.unwrap_or_else(|| self.container.system_prompt().to_string());

        let server = ChatHttpServer::new(Arc::new(self.container.respond_use_case()), system_prompt);
        server.serve(addr).await?;

        Ok("Server stopped.".to_string())
    }
}
