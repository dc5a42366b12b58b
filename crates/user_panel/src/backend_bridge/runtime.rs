use anyhow::{Context, Result};
use tokio::runtime::{Builder, Handle, Runtime};

/// Owns the tokio runtime that gateway futures are spawned onto.
pub struct BackendRuntime {
    runtime: Runtime,
}

impl BackendRuntime {
    pub fn start() -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("cockpit-backend")
            .enable_all()
            .build()
            .context("failed to build backend runtime")?;
        tracing::debug!("backend runtime started");
        Ok(Self { runtime })
    }

    pub fn handle(&self) -> Handle {
        self.runtime.handle().clone()
    }
}
