//! Manticore Search backend over the HTTP JSON API

use super::traits::*;
use crate::config::EngineSettings;
use crate::error::DispatchError;
use crate::network::{HttpClient, HttpResponse};
use crate::search::IndexDocument;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Manticore Search engine
pub struct Manticore {
    client: HttpClient,
    search_url: String,
    replace_url: String,
    id_field: String,
}

impl Manticore {
    pub fn new(client: HttpClient, settings: &EngineSettings) -> anyhow::Result<Self> {
        let mut base = Url::parse(&settings.url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client,
            search_url: base.join("search")?.to_string(),
            replace_url: base.join("replace")?.to_string(),
            id_field: settings.id_field.clone(),
        })
    }

    fn search_body(&self, query: &EngineQuery) -> Value {
        json!({
            "index": query.index,
            "query": { "query_string": query.query },
            "limit": query.limit,
            "max_matches": query.max_matches,
            "_source": [self.id_field],
        })
    }

    fn parse_hits(&self, response: &HttpResponse) -> Result<EngineHits, DispatchError> {
        let body: SearchResponse = response
            .json()
            .map_err(|e| DispatchError::MalformedResponse(e.to_string()))?;

        if body.timed_out {
            return Err(DispatchError::Engine {
                status: response.status,
                message: "query timed out".to_string(),
            });
        }

        let ids = body
            .hits
            .hits
            .iter()
            .enumerate()
            .map(|(rank, hit)| {
                hit.source
                    .get(&self.id_field)
                    .and_then(id_to_string)
                    .ok_or_else(|| {
                        DispatchError::MalformedResponse(format!(
                            "hit {} has no '{}' attribute",
                            rank, self.id_field
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EngineHits {
            ids,
            took: Duration::from_millis(body.took),
        })
    }
}

#[async_trait]
impl SearchBackend for Manticore {
    fn name(&self) -> &str {
        "manticore"
    }

    async fn search(&self, query: &EngineQuery) -> Result<EngineHits, DispatchError> {
        let response = self
            .client
            .post_json(&self.search_url, &self.search_body(query))
            .await?;
        check_status(&response)?;

        let hits = self.parse_hits(&response)?;
        debug!(
            "Manticore returned {} hits for '{}' in {:?}",
            hits.ids.len(),
            query.query,
            hits.took
        );
        Ok(hits)
    }

    async fn replace(
        &self,
        index: &str,
        doc_id: u64,
        doc: &IndexDocument,
    ) -> Result<(), DispatchError> {
        let mut fields = Map::new();
        fields.insert(self.id_field.clone(), Value::from(doc.incident_id.clone()));
        fields.insert("fields".to_string(), Value::from(doc.fields.clone()));

        let body = json!({
            "index": index,
            "id": doc_id,
            "doc": fields,
        });
        let response = self.client.post_json(&self.replace_url, &body).await?;
        check_status(&response)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    took: u64,
    #[serde(default)]
    timed_out: bool,
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source", default)]
    source: Map<String, Value>,
}

/// Map a non-2xx status or an `error` body to an engine error
fn check_status(response: &HttpResponse) -> Result<(), DispatchError> {
    let reported = response
        .json::<Value>()
        .ok()
        .and_then(|v| v.get("error").cloned())
        .filter(|e| !e.is_null());

    match reported {
        Some(error) => Err(DispatchError::Engine {
            status: response.status,
            message: match error {
                Value::String(s) => s,
                other => other.to_string(),
            },
        }),
        None if !response.is_success() => Err(DispatchError::Engine {
            status: response.status,
            message: response.text.clone(),
        }),
        None => Ok(()),
    }
}

fn id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
