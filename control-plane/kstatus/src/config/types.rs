use envconfig::Envconfig;

use crate::output::OutputFormat;

#[derive(Envconfig, Clone, Debug)]
pub struct StatusConfig {
    /// Namespace used for namespaced resources that carry none.
    #[envconfig(from = "KSTATUS_NAMESPACE", default = "default")]
    pub namespace: String,

    /// Number of resources fetched at once.
    /// Env: KSTATUS_CONCURRENCY
    #[envconfig(from = "KSTATUS_CONCURRENCY", default = "1")]
    pub concurrency: usize,

    #[envconfig(from = "KSTATUS_OUTPUT", default = "table")]
    pub output: OutputFormat,

    /// Default tracing directive; `RUST_LOG` still takes precedence.
    #[envconfig(from = "KSTATUS_LOG", default = "info")]
    pub log: String,
}

impl StatusConfig {
    /// Replace env values with the ones given on the command line.
    pub fn with_overrides(
        mut self,
        namespace: Option<String>,
        concurrency: Option<usize>,
        output: Option<OutputFormat>,
    ) -> Self {
        if let Some(ns) = namespace {
            self.namespace = ns;
        }
        if let Some(n) = concurrency {
            self.concurrency = n;
        }
        if let Some(o) = output {
            self.output = o;
        }
        self.concurrency = self.concurrency.max(1);
        self
    }
}
