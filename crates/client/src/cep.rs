//! Address lookup by CEP (Brazilian postal code).

use serde::Deserialize;

use orderlink_core::Cep;

use crate::api::execute;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::types::CepAddress;

/// ViaCEP answers 200 with `{"erro": true}` for unknown codes.
#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    erro: Option<serde_json::Value>,
    #[serde(flatten)]
    address: CepAddress,
}

impl LookupResponse {
    fn not_found(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(flag)) => flag == "true",
            Some(_) => true,
            None => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CepClient {
    http: reqwest::Client,
    base_url: String,
}

impl CepClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.cep_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve `cep` to an address; `None` when the code does not exist.
    pub async fn lookup(&self, cep: &Cep) -> Result<Option<CepAddress>, ApiError> {
        let url = format!("{}/{}/json/", self.base_url, cep.as_str());
        let response: LookupResponse = execute(self.http.get(url)).await?;
        if response.not_found() {
            tracing::debug!(cep = %cep, "CEP not found");
            return Ok(None);
        }
        Ok(Some(response.address))
    }
}
